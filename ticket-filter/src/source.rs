use crate::engine;
use crate::errors::FilterError;
use crate::record::Record;
use crate::spec::FilterSpec;
use log::{debug, warn};
use serde_json::Value as JsonValue;
use serde_yaml_ng::Value as YamlValue;

/// Top-level keys under which exports keep their ticket arrays.
const COLLECTION_KEYS: [&str; 2] = ["tickets", "complaints"];

/// A batch of tickets loaded from an export of the document store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TicketSet {
    pub records: Vec<Record>,
}

impl TicketSet {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    pub fn new_from_file(path: &str) -> Result<Self, FilterError> {
        let lower = path.to_lowercase();
        let format = if lower.ends_with(".json") {
            "json"
        } else if lower.ends_with(".yaml") || lower.ends_with(".yml") {
            "yaml"
        } else {
            return Err(FilterError::UnsupportedFormat(
                path.rsplit_once('.').map(|(_, ext)| ext).unwrap_or(path).to_string(),
            ));
        };
        let input = fs_err::read_to_string(path)?;
        let set = Self::new_from_str(&input, format)?;
        debug!("Loaded {} tickets from {}", set.len(), path);
        Ok(set)
    }

    /// Accepts an array of tickets, an object with a `tickets`/`complaints` array,
    /// or a collection export mapping document ids to tickets.
    pub fn new_from_str(input: &str, format: &str) -> Result<Self, FilterError> {
        let doc: JsonValue = match format {
            "yaml" | "yml" => {
                let yaml_value: YamlValue = serde_yaml_ng::from_str(input)?;
                serde_json::to_value(yaml_value)?
            }
            "json" => serde_json::from_str(input)?,
            other => return Err(FilterError::UnsupportedFormat(other.to_string())),
        };
        Self::from_json_value(doc)
    }

    pub fn from_json_value(doc: JsonValue) -> Result<Self, FilterError> {
        match doc {
            JsonValue::Array(items) => Ok(Self::new(records_from_array(items))),
            JsonValue::Object(mut map) => {
                for key in COLLECTION_KEYS {
                    if !matches!(map.get(key), Some(JsonValue::Array(_))) {
                        continue;
                    }
                    if let Some(JsonValue::Array(items)) = map.remove(key) {
                        return Ok(Self::new(records_from_array(items)));
                    }
                }
                let records = map
                    .into_iter()
                    .map(|(doc_id, value)| {
                        let mut record = Record::from_value(value);
                        if record.id.is_none() {
                            record.id = Some(JsonValue::String(doc_id));
                        }
                        record
                    })
                    .collect();
                Ok(Self::new(records))
            }
            JsonValue::Null => Ok(Self::default()),
            other => Err(FilterError::ParseError(format!(
                "expected a list of tickets or a collection export, found {}",
                other
            ))),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn filter(&self, spec: &FilterSpec) -> Vec<&Record> {
        engine::filter(&self.records, spec)
    }
}

impl<'a> IntoIterator for &'a TicketSet {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

fn records_from_array(items: Vec<JsonValue>) -> Vec<Record> {
    let total = items.len();
    let records: Vec<Record> = items.into_iter().map(Record::from_value).collect();
    let empty = records.iter().filter(|r| **r == Record::default()).count();
    if empty > 0 {
        warn!("{} of {} tickets carried no usable fields", empty, total);
    }
    records
}
