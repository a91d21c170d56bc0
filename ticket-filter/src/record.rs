use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::borrow::Cow;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Where a ticket was reported. Only `address` takes part in locality filtering,
/// the rest (coordinates, ward, ...) is kept for keyword search and output.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Location {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Location {
    pub fn new(address: &str) -> Self {
        Self {
            address: Some(address.to_string()),
            extra: Map::new(),
        }
    }

    fn from_value(value: Value) -> Self {
        match value {
            Value::String(address) => Self {
                address: Some(address),
                extra: Map::new(),
            },
            Value::Object(mut map) => Self {
                address: take_text(&mut map, &["address"]),
                extra: map,
            },
            _ => Self::default(),
        }
    }
}

/// A ticket / complaint as exported by the record source.
///
/// The fields the dashboard filters on are typed; everything else lands in `extra`
/// untouched so that keyword search still sees it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_submitted: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Record {
    /// Builds a record from arbitrary JSON. Never fails: scalars of the wrong type are
    /// stringified, unusable values stay in `extra`, a non-object gives an empty record.
    pub fn from_value(value: Value) -> Self {
        let Value::Object(mut map) = value else {
            return Self::default();
        };

        let id = match map.remove("id") {
            Some(Value::Null) | None => None,
            Some(id) => Some(id),
        };
        let status = take_text(&mut map, &["status"]);
        let issue_type = take_text(&mut map, &["issueType", "issue_type"]);
        let city = take_text(&mut map, &["city", "suburb"]);
        let date_submitted = take_text(&mut map, &["dateSubmitted", "date_submitted"]);
        let location = match map.remove("location") {
            Some(v @ (Value::String(_) | Value::Object(_))) => Some(Location::from_value(v)),
            Some(Value::Null) | None => None,
            Some(other) => {
                map.insert("location".to_string(), other);
                None
            }
        };

        Self {
            id,
            status,
            issue_type,
            city,
            date_submitted,
            location,
            extra: map,
        }
    }

    pub fn as_json_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    /// Comparison value of `field`, `None` when the record does not carry it.
    pub fn field(&self, field: &Field) -> Option<Cow<'_, str>> {
        match field {
            Field::Id => self.id.as_ref().and_then(scalar_text),
            Field::Status => self.status.as_deref().map(Cow::Borrowed),
            Field::IssueType => self.issue_type.as_deref().map(Cow::Borrowed),
            Field::City => self.city.as_deref().map(Cow::Borrowed),
            Field::DateSubmitted => self.date_submitted.as_deref().map(Cow::Borrowed),
            Field::LocationAddress => self
                .location
                .as_ref()
                .and_then(|location| location.address.as_deref())
                .map(Cow::Borrowed),
            Field::Extra(name) => {
                if let Some(rest) = name.strip_prefix("location.") {
                    if let Some(location) = &self.location {
                        return lookup_path(&location.extra, rest).and_then(scalar_text);
                    }
                }
                lookup_path(&self.extra, name).and_then(scalar_text)
            }
        }
    }

    /// Runs `pred` over every scalar value in the record, stopping at the first hit.
    pub fn any_value(&self, mut pred: impl FnMut(&str) -> bool) -> bool {
        let pred = &mut pred as &mut dyn FnMut(&str) -> bool;
        let typed = [
            self.status.as_deref(),
            self.issue_type.as_deref(),
            self.city.as_deref(),
            self.date_submitted.as_deref(),
            self.location.as_ref().and_then(|l| l.address.as_deref()),
        ];
        self.id.as_ref().is_some_and(|id| any_leaf(id, &mut *pred))
            || typed.into_iter().flatten().any(|text| pred(text))
            || self
                .location
                .as_ref()
                .is_some_and(|l| l.extra.values().any(|v| any_leaf(v, &mut *pred)))
            || self.extra.values().any(|v| any_leaf(v, &mut *pred))
    }

    /// Every scalar value in the record, stringified.
    pub fn values(&self) -> Vec<String> {
        let mut out = Vec::new();
        self.any_value(|text| {
            out.push(text.to_string());
            false
        });
        out
    }
}

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Record::from_value)
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_string(self) {
            Ok(json) => write!(f, "{}", json),
            Err(_) => Err(fmt::Error),
        }
    }
}

/// A selectable attribute of a [`Record`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Field {
    Id,
    Status,
    IssueType,
    City,
    DateSubmitted,
    LocationAddress,
    /// Any other field, dotted names walk into nested objects.
    Extra(String),
}

impl Field {
    pub fn name(&self) -> &str {
        match self {
            Field::Id => "id",
            Field::Status => "status",
            Field::IssueType => "issueType",
            Field::City => "city",
            Field::DateSubmitted => "dateSubmitted",
            Field::LocationAddress => "location.address",
            Field::Extra(name) => name,
        }
    }
}

impl FromStr for Field {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Ok(match s {
            "id" => Field::Id,
            "status" => Field::Status,
            "issueType" | "issue_type" | "issue-type" => Field::IssueType,
            "city" | "suburb" => Field::City,
            "dateSubmitted" | "date_submitted" | "date-submitted" | "date" => Field::DateSubmitted,
            "location" | "location.address" | "address" => Field::LocationAddress,
            other => Field::Extra(other.to_string()),
        })
    }
}

impl From<String> for Field {
    fn from(name: String) -> Self {
        match Field::from_str(&name) {
            Ok(field) => field,
            Err(never) => match never {},
        }
    }
}

impl From<Field> for String {
    fn from(field: Field) -> Self {
        field.name().to_string()
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Removes the first of `keys` holding a scalar and returns it as text.
/// Non-scalar values are left in place, except under `keys[0]` when an alias
/// supplied the text: the typed field serializes under that key, so the leftover
/// moves to a free `<key>_original` slot.
fn take_text(map: &mut Map<String, Value>, keys: &[&str]) -> Option<String> {
    for (i, key) in keys.iter().enumerate() {
        let usable = map.get(*key).and_then(scalar_text).map(Cow::into_owned);
        if usable.is_some() {
            map.remove(*key);
            if i > 0 {
                displace(map, keys[0]);
            }
            return usable;
        }
    }
    None
}

fn displace(map: &mut Map<String, Value>, key: &str) {
    match map.remove(key) {
        Some(Value::Null) | None => {}
        Some(value) => {
            let mut slot = format!("{}_original", key);
            while map.contains_key(&slot) {
                slot.push('_');
            }
            map.insert(slot, value);
        }
    }
}

fn scalar_text(value: &Value) -> Option<Cow<'_, str>> {
    match value {
        Value::String(s) => Some(Cow::Borrowed(s)),
        Value::Number(n) => Some(Cow::Owned(n.to_string())),
        Value::Bool(b) => Some(Cow::Owned(b.to_string())),
        _ => None,
    }
}

fn lookup_path<'a>(map: &'a Map<String, Value>, path: &str) -> Option<&'a Value> {
    if let Some(value) = map.get(path) {
        return Some(value);
    }
    let (first, rest) = path.split_once('.')?;
    match map.get(first)? {
        Value::Object(inner) => lookup_path(inner, rest),
        _ => None,
    }
}

fn any_leaf(value: &Value, pred: &mut dyn FnMut(&str) -> bool) -> bool {
    match value {
        Value::String(s) => pred(s),
        Value::Number(n) => pred(&n.to_string()),
        Value::Bool(b) => pred(if *b { "true" } else { "false" }),
        Value::Array(items) => items.iter().any(|v| any_leaf(v, &mut *pred)),
        Value::Object(map) => map.values().any(|v| any_leaf(v, &mut *pred)),
        Value::Null => false,
    }
}
