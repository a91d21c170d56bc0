use crate::record::Record;
use crate::spec::FilterSpec;
use log::trace;

struct LastRun {
    records: Vec<Record>,
    spec: FilterSpec,
    selected: Vec<usize>,
}

/// Remembers the last filtering call and replays it when the inputs are unchanged.
///
/// Purely an optimization for callers re-filtering on every UI change; results
/// are the same as [`crate::filter`].
///
/// The cache is keyed on record contents, not on the slice address, so records
/// edited in place are never served stale. That costs a copy of the slice on a miss
/// and a field-by-field comparison on every call, which only pays off for
/// dashboard-sized sets where keyword scans and fuzzy rules dominate. For large
/// exports call [`crate::filter`] directly.
#[derive(Default)]
pub struct MemoFilter {
    last: Option<LastRun>,
    hits: u64,
    misses: u64,
}

impl MemoFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter<'a>(&mut self, records: &'a [Record], spec: &FilterSpec) -> Vec<&'a Record> {
        if let Some(last) = &self.last {
            if last.spec == *spec
                && last.records.len() == records.len()
                && last.records.as_slice() == records
            {
                self.hits += 1;
                trace!("Filter cache hit for [{}]", spec);
                return last.selected.iter().map(|&i| &records[i]).collect();
            }
        }

        self.misses += 1;
        trace!("Filter cache miss for [{}]", spec);
        let selected: Vec<usize> = records
            .iter()
            .enumerate()
            .filter(|(_, record)| spec.matches(record))
            .map(|(i, _)| i)
            .collect();
        let result = selected.iter().map(|&i| &records[i]).collect();
        match &mut self.last {
            Some(last) => {
                // keeps the previous allocation
                last.records.clear();
                last.records.extend_from_slice(records);
                last.spec.clone_from(spec);
                last.selected = selected;
            }
            None => {
                self.last = Some(LastRun {
                    records: records.to_vec(),
                    spec: spec.clone(),
                    selected,
                })
            }
        }
        result
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }

    pub fn clear(&mut self) {
        self.last = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::filter;
    use serde_json::json;

    fn tickets() -> Vec<Record> {
        (1..=4)
            .map(|i| {
                Record::from_value(json!({
                    "id": i,
                    "status": if i % 2 == 0 { "Closed" } else { "Open" },
                }))
            })
            .collect()
    }

    #[test]
    fn test_same_result_as_engine() {
        let records = tickets();
        let spec = FilterSpec::new().with_status("open");
        let mut memo = MemoFilter::new();
        assert_eq!(memo.filter(&records, &spec), filter(&records, &spec));
        assert_eq!(memo.filter(&records, &spec), filter(&records, &spec));
        assert_eq!((memo.hits(), memo.misses()), (1, 1));
    }

    #[test]
    fn test_keyed_on_contents_not_address() {
        let records = tickets();
        let copy = records.clone();
        let spec = FilterSpec::new().with_status("closed");
        let mut memo = MemoFilter::new();
        memo.filter(&records, &spec);
        let replayed = memo.filter(&copy, &spec);
        assert_eq!(memo.hits(), 1);
        assert_eq!(replayed.len(), 2);
        assert!(replayed
            .iter()
            .all(|r| copy.iter().any(|c| std::ptr::eq(*r, c))));

        assert_eq!(memo.filter(&copy[..2], &spec).len(), 1);
        assert_eq!(memo.misses(), 2);
    }

    #[test]
    fn test_changed_inputs_recompute() {
        let mut records = tickets();
        let mut memo = MemoFilter::new();
        let open = FilterSpec::new().with_status("open");
        assert_eq!(memo.filter(&records, &open).len(), 2);

        let closed = FilterSpec::new().with_status("closed");
        assert_eq!(memo.filter(&records, &closed).len(), 2);

        records[1].status = Some("Open".to_string());
        assert_eq!(memo.filter(&records, &closed).len(), 1);
        assert_eq!(memo.hits(), 0);
        assert_eq!(memo.misses(), 3);

        memo.clear();
        memo.filter(&records, &closed);
        assert_eq!(memo.misses(), 4);
    }
}
