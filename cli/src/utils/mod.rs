mod logger;
mod output;

pub use logger::init_logger;
pub use output::{print_records, print_report};
