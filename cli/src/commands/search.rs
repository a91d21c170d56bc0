use super::load_tickets;
use crate::argparse::SearchArgs;
use crate::utils::print_records;
use ticket_filter::FilterSpec;

pub fn handle_search_command(args: SearchArgs) -> Result<(), Box<dyn std::error::Error>> {
    let tickets = load_tickets(&args.input.input)?;
    let matching = tickets.filter(&FilterSpec::new().with_keyword(&args.keyword));
    print_records(&matching, args.format)
}
