use crate::record::{Field, Record};
use indexmap::IndexMap;
use serde::Serialize;

/// Label used for tickets that do not carry the grouped field.
pub const NO_VALUE: &str = "(none)";

/// Ticket counts for a (usually filtered) set of records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Report {
    pub total: usize,
    pub by_status: IndexMap<String, usize>,
    pub by_issue_type: IndexMap<String, usize>,
    pub by_city: IndexMap<String, usize>,
}

impl Report {
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a Record>,
    {
        let mut report = Report::default();
        for record in records {
            report.total += 1;
            bump(&mut report.by_status, record, &Field::Status);
            bump(&mut report.by_issue_type, record, &Field::IssueType);
            bump(&mut report.by_city, record, &Field::City);
        }
        report
    }

    /// Entries of `group` by descending count, first-seen order on ties.
    pub fn sorted_by_count(group: &IndexMap<String, usize>) -> Vec<(&str, usize)> {
        let mut entries: Vec<(&str, usize)> =
            group.iter().map(|(k, v)| (k.as_str(), *v)).collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        entries
    }
}

fn bump(group: &mut IndexMap<String, usize>, record: &Record, field: &Field) {
    let label = record
        .field(field)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| NO_VALUE.to_string());
    *group.entry(label).or_insert(0) += 1;
}
