use log::LevelFilter;

const OWN_CRATES: [&str; 3] = ["tickets", "ticket_cli", "ticket_filter"];

/// `RUST_LOG` wins; otherwise `info`, with `debug` for our own crates when verbose.
pub fn init_logger(verbose: bool) {
    let mut builder = pretty_env_logger::formatted_builder();
    match std::env::var("RUST_LOG") {
        Ok(filters) => {
            builder.parse_filters(&filters);
        }
        Err(_) => {
            builder.filter_level(LevelFilter::Info);
            if verbose {
                for module in OWN_CRATES {
                    builder.filter_module(module, LevelFilter::Debug);
                }
            }
        }
    }
    // a logger may already be installed when running under a test harness
    let _ = builder.try_init();
}
