use crate::record::Record;
use crate::spec::FilterSpec;
use log::debug;

/// Returns the records matching every active criterion of `spec`, in input order.
///
/// Works over anything yielding `&Record`, so results can be filtered again.
pub fn filter<'a, I>(records: I, spec: &FilterSpec) -> Vec<&'a Record>
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut scanned = 0usize;
    let matched: Vec<&'a Record> = records
        .into_iter()
        .inspect(|_| scanned += 1)
        .filter(|record| spec.matches(record))
        .collect();
    debug!(
        "Filter [{}] matched {} of {} records",
        spec,
        matched.len(),
        scanned
    );
    matched
}

/// Same as [`filter`] for callers owning their records.
pub fn filter_owned(records: Vec<Record>, spec: &FilterSpec) -> Vec<Record> {
    records
        .into_iter()
        .filter(|record| spec.matches(record))
        .collect()
}

/// True if any value of the record contains `keyword`, ignoring case.
/// An empty keyword matches everything.
pub fn matches_keyword(record: &Record, keyword: &str) -> bool {
    if keyword.is_empty() {
        return true;
    }
    let keyword = keyword.to_lowercase();
    record.any_value(|value| value.to_lowercase().contains(&keyword))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tickets() -> Vec<Record> {
        [
            json!({"id": 1, "status": "Open", "issueType": "Pothole"}),
            json!({"id": 2, "status": "Closed", "issueType": "Pothole"}),
            json!({"id": 3, "status": "Open", "issueType": "Garbage"}),
        ]
        .into_iter()
        .map(Record::from_value)
        .collect()
    }

    fn ids(records: &[&Record]) -> Vec<serde_json::Value> {
        records.iter().filter_map(|r| r.id.clone()).collect()
    }

    #[test]
    fn test_status_then_issue_type() {
        let records = tickets();
        let open = filter(&records, &FilterSpec::new().with_status("Open"));
        assert_eq!(ids(&open), vec![json!(1), json!(3)]);

        let open_potholes = filter(
            &records,
            &FilterSpec::new()
                .with_status("Open")
                .with_issue_type("Pothole"),
        );
        assert_eq!(ids(&open_potholes), vec![json!(1)]);
    }

    #[test]
    fn test_empty_spec_is_identity() {
        let records = tickets();
        let all = filter(&records, &FilterSpec::new());
        assert_eq!(ids(&all), vec![json!(1), json!(2), json!(3)]);
    }

    #[test]
    fn test_empty_input() {
        let records: Vec<Record> = Vec::new();
        assert!(filter(&records, &FilterSpec::new().with_status("Open")).is_empty());
        assert!(filter_owned(records, &FilterSpec::new()).is_empty());
    }

    #[test]
    fn test_refilter_is_idempotent() {
        let records = tickets();
        let spec = FilterSpec::new().with_status("open");
        let once = filter(&records, &spec);
        let twice = filter(once.iter().copied(), &spec);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_keyword_scans_all_fields() {
        let record = Record::from_value(json!({
            "id": 9,
            "status": "Open",
            "location": {"address": "12 Main Street"},
            "comments": [{"text": "Broken LAMP post"}]
        }));
        assert!(matches_keyword(&record, "lamp"));
        assert!(matches_keyword(&record, "main st"));
        assert!(matches_keyword(&record, "9"));
        assert!(matches_keyword(&record, ""));
        assert!(!matches_keyword(&record, "pothole"));
    }

    #[test]
    fn test_filter_owned_keeps_order() {
        let kept = filter_owned(tickets(), &FilterSpec::new().with_issue_type("POTHOLE"));
        let kept_ids: Vec<_> = kept.iter().filter_map(|r| r.id.clone()).collect();
        assert_eq!(kept_ids, vec![json!(1), json!(2)]);
    }
}
