use super::{load_tickets, spec_from_args};
use crate::argparse::FilterArgs;
use crate::utils::print_records;
use log::info;

pub fn handle_filter_command(
    args: FilterArgs,
    presets_file: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let spec = spec_from_args(&args.criteria, presets_file)?;
    let tickets = load_tickets(&args.input.input)?;

    if spec.is_empty() {
        info!("No criteria given, listing all {} tickets", tickets.len());
    }
    let matching = tickets.filter(&spec);
    print_records(&matching, args.format)
}
