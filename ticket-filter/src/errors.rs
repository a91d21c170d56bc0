/// Error types for building filter specifications and loading tickets
#[derive(Debug)]
pub enum FilterError {
    InvalidSpecification(String),
    ParseError(String),
    UnsupportedFormat(String),
    IoError(std::io::Error),
    SerdeJsonError(serde_json::Error),
    SerdeYamlError(serde_yaml_ng::Error),
}

impl From<std::io::Error> for FilterError {
    fn from(err: std::io::Error) -> Self {
        FilterError::IoError(err)
    }
}

impl From<serde_json::Error> for FilterError {
    fn from(err: serde_json::Error) -> Self {
        FilterError::SerdeJsonError(err)
    }
}

impl From<serde_yaml_ng::Error> for FilterError {
    fn from(err: serde_yaml_ng::Error) -> Self {
        FilterError::SerdeYamlError(err)
    }
}

impl From<FilterError> for String {
    fn from(error: FilterError) -> Self {
        error.to_string()
    }
}

impl std::fmt::Display for FilterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FilterError::InvalidSpecification(msg) => {
                write!(f, "Invalid filter specification: {}", msg)
            }
            FilterError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            FilterError::UnsupportedFormat(format) => write!(
                f,
                "Unsupported format '{}'. Use 'json' or 'yaml'.",
                format
            ),
            FilterError::IoError(err) => write!(f, "IO error: {}", err),
            FilterError::SerdeJsonError(err) => write!(f, "Serde JSON error: {}", err),
            FilterError::SerdeYamlError(err) => write!(f, "Serde YAML error: {}", err),
        }
    }
}

impl std::error::Error for FilterError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FilterError::IoError(err) => Some(err),
            FilterError::SerdeJsonError(err) => Some(err),
            FilterError::SerdeYamlError(err) => Some(err),
            _ => None,
        }
    }
}
