use crate::errors::FilterError;
use crate::spec::FilterSpec;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const PRESETS_FILE_NAME: &str = "presets.yaml";

/// Named filter specifications saved by staff, stored as YAML:
///
/// ```yaml
/// open-potholes:
///   criteria:
///     - field: status
///       rule: exact-case-insensitive
///       value: Open
///     - field: issueType
///       rule: exact-case-insensitive
///       value: Pothole
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Presets {
    presets: IndexMap<String, FilterSpec>,
}

impl Presets {
    /// `<config dir>/ticket-filter/presets.yaml`, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("ticket-filter").join(PRESETS_FILE_NAME))
    }

    pub fn load(path: &Path) -> Result<Self, FilterError> {
        let input = fs_err::read_to_string(path)?;
        Self::from_yaml_str(&input)
    }

    pub fn from_yaml_str(input: &str) -> Result<Self, FilterError> {
        if input.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml_ng::from_str(input)?)
    }

    pub fn save(&self, path: &Path) -> Result<(), FilterError> {
        if let Some(parent) = path.parent() {
            fs_err::create_dir_all(parent)?;
        }
        fs_err::write(path, serde_yaml_ng::to_string(self)?)?;
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&FilterSpec> {
        self.presets.get(name)
    }

    pub fn insert(&mut self, name: &str, spec: FilterSpec) -> Option<FilterSpec> {
        self.presets.insert(name.to_string(), spec)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.presets.keys().map(String::as_str)
    }
}
