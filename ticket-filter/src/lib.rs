//! Filtering of ticket / complaint records by independently optional criteria.
//!
//! ```
//! use ticket_filter::{filter, FilterSpec, Record};
//!
//! let records: Vec<Record> = serde_json::from_str(
//!     r#"[{"id": 1, "status": "Open"}, {"id": 2, "status": "Closed"}]"#,
//! )
//! .unwrap();
//! let open = filter(&records, &FilterSpec::new().with_status("open"));
//! assert_eq!(open.len(), 1);
//! ```

pub mod criterion;
pub mod engine;
pub mod errors;
pub mod memo;
pub mod presets;
pub mod record;
pub mod report;
pub mod source;
pub mod spec;

pub use criterion::{CompareRule, Criterion};
pub use engine::{filter, filter_owned, matches_keyword};
pub use errors::FilterError;
pub use memo::MemoFilter;
pub use presets::Presets;
pub use record::{Field, Location, Record};
pub use report::Report;
pub use source::TicketSet;
pub use spec::FilterSpec;

/// Parses `search_str` as a [`FilterSpec`] and checks it against a single record.
pub fn record_matches(record: &Record, search_str: &str) -> Result<bool, FilterError> {
    let spec = search_str.parse::<FilterSpec>()?;
    Ok(spec.matches(record))
}
