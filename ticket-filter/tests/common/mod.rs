//! Shared fixtures for the ticket-filter integration tests

#![allow(dead_code)]

use serde_json::{json, Value};
use ticket_filter::Record;

/// A small export in the shape the dashboard reads from the document store
pub const SAMPLE_JSON: &str = r#"[
  {"id": 1, "status": "Open", "issueType": "Pothole", "city": "Newtown",
   "dateSubmitted": "2024-03-01", "location": {"address": "12 Main Street"}},
  {"id": 2, "status": "Closed", "issueType": "Pothole", "suburb": "Glebe",
   "dateSubmitted": "2024-03-02", "location": {"address": "4 King St"}},
  {"id": 3, "status": "Open", "issueType": "Garbage", "city": "Newtown",
   "dateSubmitted": "2024-03-01", "location": "Main Rd",
   "description": "Overflowing bins near the playground"},
  {"id": 4, "status": "in progress", "city": "Glebe",
   "comments": [{"author": "ops", "text": "Crew dispatched"}]},
  {"id": 5}
]"#;

pub const SAMPLE_YAML: &str = r#"
tickets:
  - id: 1
    status: Open
    issueType: Pothole
    city: Newtown
  - id: 2
    status: Closed
    issueType: Streetlight
    suburb: Glebe
"#;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn sample_records() -> Vec<Record> {
    serde_json::from_str(SAMPLE_JSON).expect("sample export parses")
}

pub fn ids<'a>(records: impl IntoIterator<Item = &'a Record>) -> Vec<Value> {
    records
        .into_iter()
        .map(|r| r.id.clone().unwrap_or(Value::Null))
        .collect()
}

pub fn id_list(ids: &[i64]) -> Vec<Value> {
    ids.iter().map(|i| json!(i)).collect()
}
