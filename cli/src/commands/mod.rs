mod filter;
mod presets;
mod report;
mod search;

use crate::argparse::{Cli, Commands, CriteriaArgs};
use anyhow::Context;
pub use filter::handle_filter_command;
use log::debug;
pub use presets::handle_presets_command;
pub use report::handle_report_command;
pub use search::handle_search_command;
use std::error::Error;
use std::path::PathBuf;
use ticket_cli::dates::normalize_date;
use ticket_cli::CliError;
use ticket_filter::{Criterion, FilterSpec, Presets, TicketSet};

pub fn handle_command(cli: Cli) -> Result<(), Box<dyn Error>> {
    let presets_file = cli.presets_file;

    match cli.command {
        Commands::Filter(args) => handle_filter_command(args, presets_file.as_deref()),
        Commands::Search(args) => handle_search_command(args),
        Commands::Report(args) => handle_report_command(args, presets_file.as_deref()),
        Commands::Presets => handle_presets_command(presets_file.as_deref()),
    }
}

pub(crate) fn load_tickets(path: &str) -> Result<TicketSet, CliError> {
    TicketSet::new_from_file(path)
        .with_context(|| format!("Reading {}", path))
        .map_err(CliError::TicketsLoad)
}

pub(crate) fn presets_path(presets_file: Option<&str>) -> Result<PathBuf, CliError> {
    match presets_file {
        Some(path) => Ok(PathBuf::from(path)),
        None => Presets::default_path().ok_or(CliError::ConfigDirNotFound),
    }
}

/// A missing default presets file is the same as having no presets.
pub(crate) fn load_presets(presets_file: Option<&str>) -> Result<Presets, CliError> {
    let path = presets_path(presets_file)?;
    if presets_file.is_none() && !path.exists() {
        debug!("No presets file at {}", path.display());
        return Ok(Presets::default());
    }
    Presets::load(&path).map_err(|e| CliError::PresetsLoad(path, e))
}

/// Presets are only read when a preset is actually requested.
pub(crate) fn spec_from_args(
    criteria: &CriteriaArgs,
    presets_file: Option<&str>,
) -> Result<FilterSpec, CliError> {
    let presets = match criteria.preset {
        Some(_) => load_presets(presets_file)?,
        None => Presets::default(),
    };
    build_spec(criteria, &presets)
}

/// Preset first, then the flags in a fixed order, then `--where` conditions.
pub(crate) fn build_spec(
    criteria: &CriteriaArgs,
    presets: &Presets,
) -> Result<FilterSpec, CliError> {
    let mut spec = match &criteria.preset {
        Some(name) => presets
            .get(name)
            .cloned()
            .ok_or_else(|| CliError::PresetNotFound {
                name: name.clone(),
                available: presets.names().map(str::to_string).collect(),
            })?,
        None => FilterSpec::new(),
    };

    if let Some(status) = &criteria.status {
        spec = spec.with_status(status);
    }
    if let Some(issue_type) = &criteria.issue_type {
        spec = spec.with_issue_type(issue_type);
    }
    if let Some(city) = &criteria.city {
        spec = spec.with_city(city);
    }
    if let Some(date) = &criteria.date {
        spec = spec.with_date_submitted(&normalize_date(date)?);
    }
    if let Some(location) = &criteria.location {
        spec = spec.with_location_keyword(location);
    }
    if let Some(keyword) = &criteria.keyword {
        spec = spec.with_keyword(keyword);
    }
    for condition in &criteria.conditions {
        spec = spec.with_criterion(condition.parse::<Criterion>()?);
    }

    debug!("Filter specification: [{}]", spec);
    Ok(spec)
}
