use super::{load_tickets, spec_from_args};
use crate::argparse::ReportArgs;
use crate::utils::print_report;
use log::info;
use ticket_filter::Report;

pub fn handle_report_command(
    args: ReportArgs,
    presets_file: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let spec = spec_from_args(&args.criteria, presets_file)?;
    let tickets = load_tickets(&args.input.input)?;

    let matching = tickets.filter(&spec);
    if !spec.is_empty() {
        info!("Reporting on {} of {} tickets", matching.len(), tickets.len());
    }
    print_report(&Report::from_records(matching));
    Ok(())
}
