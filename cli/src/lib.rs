pub mod dates;

use std::path::PathBuf;
use ticket_filter::FilterError;

/// Error type for the `tickets` command line front end
#[derive(Debug)]
pub enum CliError {
    ConfigDirNotFound,
    PresetNotFound {
        name: String,
        available: Vec<String>,
    },
    PresetsLoad(PathBuf, FilterError),
    InvalidDate(String),
    TicketsLoad(anyhow::Error),
    InvalidCriteria(FilterError),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::ConfigDirNotFound => {
                write!(
                    f,
                    "Could not determine the configuration directory. Please set HOME (or XDG_CONFIG_HOME) or use --presets-file to specify the presets location."
                )
            }
            CliError::PresetNotFound { name, available } => {
                if available.is_empty() {
                    write!(
                        f,
                        "Preset '{}' not found: no presets are saved.\n\nAdd it to the presets file or use --presets-file to point to another one.",
                        name
                    )
                } else {
                    write!(
                        f,
                        "Preset '{}' not found.\n\nAvailable presets: {}",
                        name,
                        available.join(", ")
                    )
                }
            }
            CliError::PresetsLoad(path, e) => {
                write!(
                    f,
                    "Failed to load presets from {}: {}\n\nFix the file or use --presets-file to specify another one.",
                    path.display(),
                    e
                )
            }
            CliError::InvalidDate(date) => {
                write!(
                    f,
                    "Invalid date: '{}'\n\nSupported formats are YYYY-MM-DD, DD/MM/YYYY and YYYY/MM/DD.",
                    date
                )
            }
            CliError::TicketsLoad(e) => {
                write!(
                    f,
                    "Failed to load tickets: {e:#}\n\nPossible fixes:\n  - Ensure the file exists and is readable\n  - Use a .json, .yaml or .yml export\n  - Check that the export is a list of tickets or a collection of documents"
                )
            }
            CliError::InvalidCriteria(e) => {
                write!(
                    f,
                    "{e}\n\nCriteria are written as `field rule value`, e.g. `status = Open` or `location contains \"main st\"`."
                )
            }
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::ConfigDirNotFound => None,
            CliError::PresetNotFound { .. } => None,
            CliError::PresetsLoad(_, e) => Some(e),
            CliError::InvalidDate(_) => None,
            CliError::TicketsLoad(e) => Some(e.as_ref()),
            CliError::InvalidCriteria(e) => Some(e),
        }
    }
}

impl From<FilterError> for CliError {
    fn from(err: FilterError) -> Self {
        CliError::InvalidCriteria(err)
    }
}
