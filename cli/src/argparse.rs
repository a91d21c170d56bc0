use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(
    name = "tickets",
    about = "Filter, search and summarize citizen complaint tickets",
    version,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// YAML file with saved filter presets [default: <config dir>/ticket-filter/presets.yaml]
    #[arg(long, global = true)]
    pub presets_file: Option<String>,

    /// Pick which subcommand to use
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the tickets matching all given criteria
    Filter(FilterArgs),
    /// List the tickets where any field contains the keyword
    Search(SearchArgs),
    /// Count the matching tickets by status, issue type and city
    Report(ReportArgs),
    /// Show the saved filter presets
    Presets,
}

#[derive(Args, Clone, Default)]
pub struct InputArgs {
    /// Ticket export to read, `.json`, `.yaml` or `.yml`
    #[arg(long, short)]
    pub input: String,
}

#[derive(Args, Clone, Default)]
pub struct CriteriaArgs {
    /// Apply a saved preset before the other criteria
    #[arg(long)]
    pub preset: Option<String>,

    /// Status, exact match ignoring case (e.g. Open, Closed)
    #[arg(long)]
    pub status: Option<String>,

    /// Issue type, exact match ignoring case (e.g. Pothole)
    #[arg(long)]
    pub issue_type: Option<String>,

    /// City or suburb, exact match ignoring case
    #[arg(long, visible_aliases = ["suburb"])]
    pub city: Option<String>,

    /// Submission date: YYYY-MM-DD, DD/MM/YYYY or YYYY/MM/DD
    #[arg(long)]
    pub date: Option<String>,

    /// Part of the address, matched ignoring case
    #[arg(long)]
    pub location: Option<String>,

    /// Text to look for in any field
    #[arg(long)]
    pub keyword: Option<String>,

    /// Extra criterion as `field rule value`, e.g. `assignee = ops`; repeatable
    #[arg(long = "where", value_name = "CRITERION")]
    pub conditions: Vec<String>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Yaml,
}

#[derive(Args)]
pub struct FilterArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub criteria: CriteriaArgs,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

#[derive(Args)]
pub struct SearchArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Text to look for in any field, ignoring case
    pub keyword: String,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

#[derive(Args)]
pub struct ReportArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub criteria: CriteriaArgs,
}

pub fn parse_args() -> Cli {
    Cli::parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_filter_flags() {
        let cli = Cli::try_parse_from([
            "tickets",
            "filter",
            "--input",
            "t.json",
            "--status",
            "Open",
            "--suburb",
            "Glebe",
            "--where",
            "assignee = ops",
            "--where",
            "priority == 1",
            "--format",
            "json",
        ])
        .unwrap();
        let Commands::Filter(args) = cli.command else {
            panic!("expected filter command");
        };
        assert_eq!(args.input.input, "t.json");
        assert_eq!(args.criteria.status.as_deref(), Some("Open"));
        assert_eq!(args.criteria.city.as_deref(), Some("Glebe"));
        assert_eq!(args.criteria.conditions.len(), 2);
        assert_eq!(args.format, OutputFormat::Json);
    }

    #[test]
    fn test_parse_search_with_global_flags() {
        let cli = Cli::try_parse_from(["tickets", "search", "-i", "t.yaml", "graffiti", "-v"])
            .unwrap();
        assert!(cli.verbose);
        let Commands::Search(args) = cli.command else {
            panic!("expected search command");
        };
        assert_eq!(args.keyword, "graffiti");
        assert_eq!(args.format, OutputFormat::Table);
    }

    #[test]
    fn test_input_is_required() {
        assert!(Cli::try_parse_from(["tickets", "report"]).is_err());
    }
}
