use crate::criterion::{unquote, CompareRule, Criterion};
use crate::errors::FilterError;
use crate::record::{Field, Record};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const KEYWORD_PREFIX: &str = "keyword:";

/// The criteria applied in one filtering call, evaluated in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSpec {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    criteria: Vec<Criterion>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    keyword: Option<String>,
}

impl FilterSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_criterion(mut self, criterion: Criterion) -> Self {
        self.criteria.push(criterion);
        self
    }

    pub fn with_status(self, status: &str) -> Self {
        self.with_criterion(Criterion::new(
            Field::Status,
            CompareRule::ExactCaseInsensitive,
            status,
        ))
    }

    pub fn with_issue_type(self, issue_type: &str) -> Self {
        self.with_criterion(Criterion::new(
            Field::IssueType,
            CompareRule::ExactCaseInsensitive,
            issue_type,
        ))
    }

    pub fn with_city(self, city: &str) -> Self {
        self.with_criterion(Criterion::new(
            Field::City,
            CompareRule::ExactCaseInsensitive,
            city,
        ))
    }

    /// `date` must already be in the same format as the records' `dateSubmitted`.
    pub fn with_date_submitted(self, date: &str) -> Self {
        self.with_criterion(Criterion::new(
            Field::DateSubmitted,
            CompareRule::ExactEquality,
            date,
        ))
    }

    pub fn with_location_keyword(self, keyword: &str) -> Self {
        self.with_criterion(Criterion::new(
            Field::LocationAddress,
            CompareRule::SubstringCaseInsensitive,
            keyword,
        ))
    }

    pub fn with_keyword(mut self, keyword: &str) -> Self {
        self.keyword = Some(keyword.to_string());
        self
    }

    /// Appends the criteria of `other`; its keyword, if active, replaces ours.
    pub fn merge(mut self, other: FilterSpec) -> Self {
        self.criteria.extend(other.criteria);
        if other.keyword.as_deref().is_some_and(|k| !k.is_empty()) {
            self.keyword = other.keyword;
        }
        self
    }

    pub fn criteria(&self) -> &[Criterion] {
        &self.criteria
    }

    pub fn active_criteria(&self) -> impl Iterator<Item = &Criterion> {
        self.criteria.iter().filter(|c| c.is_active())
    }

    /// The keyword, if one is set and non-empty.
    pub fn keyword(&self) -> Option<&str> {
        self.keyword.as_deref().filter(|k| !k.is_empty())
    }

    /// True when nothing would be filtered out.
    pub fn is_empty(&self) -> bool {
        self.keyword().is_none() && self.active_criteria().next().is_none()
    }

    pub fn matches(&self, record: &Record) -> bool {
        self.active_criteria().all(|c| c.matches(record))
            && self
                .keyword()
                .map_or(true, |keyword| crate::engine::matches_keyword(record, keyword))
    }
}

impl FromStr for FilterSpec {
    type Err = FilterError;

    /// Parses `criterion and criterion and ...`; a `keyword:<text>` term sets the keyword.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut spec = FilterSpec::new();
        for term in split_terms(s) {
            let term = term.trim();
            if term.is_empty() {
                continue;
            }
            if let Some(keyword) = term.strip_prefix(KEYWORD_PREFIX) {
                spec = spec.with_keyword(unquote(keyword.trim()));
            } else {
                spec = spec.with_criterion(Criterion::from_str(term)?);
            }
        }
        Ok(spec)
    }
}

impl fmt::Display for FilterSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut terms: Vec<String> = self.criteria.iter().map(|c| c.to_string()).collect();
        if let Some(keyword) = self.keyword() {
            terms.push(format!("{}\"{}\"", KEYWORD_PREFIX, keyword));
        }
        write!(f, "{}", terms.join(" and "))
    }
}

/// Splits on ` and ` outside of quotes.
fn split_terms(s: &str) -> Vec<&str> {
    const SEPARATOR: &str = " and ";
    let mut terms = Vec::new();
    let mut quote: Option<char> = None;
    let mut start = 0;
    let mut chars = s.char_indices();
    while let Some((i, c)) = chars.next() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None if (c == '"' || c == '\'') && opens_quote(&s[..i]) => quote = Some(c),
            None if s[i..].starts_with(SEPARATOR) => {
                terms.push(&s[start..i]);
                start = i + SEPARATOR.len();
                // skip the rest of the separator
                for _ in 1..SEPARATOR.len() {
                    chars.next();
                }
            }
            None => {}
        }
    }
    terms.push(&s[start..]);
    terms
}

/// A quote only opens a value at the start of a token, so "O'Connell St" stays literal.
fn opens_quote(before: &str) -> bool {
    before
        .chars()
        .next_back()
        .map_or(true, |p| p.is_whitespace() || "=~:".contains(p))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builder_keeps_order() {
        let spec = FilterSpec::new()
            .with_status("Open")
            .with_issue_type("Pothole")
            .with_location_keyword("main");
        let fields: Vec<_> = spec.criteria().iter().map(|c| c.field.clone()).collect();
        assert_eq!(
            fields,
            vec![Field::Status, Field::IssueType, Field::LocationAddress]
        );
    }

    #[test]
    fn test_empty_values_make_empty_spec() {
        let spec = FilterSpec::new().with_status("").with_keyword("");
        assert!(spec.is_empty());
        assert_eq!(spec.active_criteria().count(), 0);
        assert_eq!(spec.keyword(), None);
        assert!(!FilterSpec::new().with_city("Glebe").is_empty());
    }

    #[test]
    fn test_matches_requires_keyword_too() {
        let record = Record::from_value(json!({"status": "Open", "note": "near the school"}));
        assert!(FilterSpec::new()
            .with_status("open")
            .with_keyword("SCHOOL")
            .matches(&record));
        assert!(!FilterSpec::new()
            .with_status("open")
            .with_keyword("park")
            .matches(&record));
    }

    #[test]
    fn test_from_str() {
        let spec =
            FilterSpec::from_str("status = Open and issueType = Pothole and keyword:\"main st\"")
                .unwrap();
        assert_eq!(
            spec,
            FilterSpec::new()
                .with_status("Open")
                .with_issue_type("Pothole")
                .with_keyword("main st")
        );
    }

    #[test]
    fn test_from_str_quoted_and() {
        let spec = FilterSpec::from_str("location ~ \"Smith and Sons Rd\" and status = Open")
            .unwrap();
        assert_eq!(spec.criteria().len(), 2);
        assert_eq!(
            spec.criteria()[0].value.as_deref(),
            Some("Smith and Sons Rd")
        );
    }

    #[test]
    fn test_from_str_apostrophe_in_value() {
        let spec = FilterSpec::from_str("location ~ O'Connell and status = Open").unwrap();
        assert_eq!(spec.criteria().len(), 2);
        assert_eq!(spec.criteria()[0].value.as_deref(), Some("O'Connell"));
    }

    #[test]
    fn test_quoted_keyword_parses_back() {
        let spec = FilterSpec::new().with_keyword("\"quoted\"");
        let reparsed = FilterSpec::from_str(&spec.to_string()).unwrap();
        assert_eq!(reparsed.keyword(), Some("\"quoted\""));
        assert_eq!(
            FilterSpec::from_str("keyword:'bins'").unwrap().keyword(),
            Some("bins")
        );
    }

    #[test]
    fn test_from_str_unknown_rule() {
        assert!(matches!(
            FilterSpec::from_str("status = Open and issueType regex Pot.*"),
            Err(FilterError::InvalidSpecification(_))
        ));
    }

    #[test]
    fn test_display_parses_back() {
        let spec = FilterSpec::new()
            .with_city("Newtown")
            .with_date_submitted("2024-03-01")
            .with_location_keyword("King St")
            .with_keyword("graffiti");
        assert_eq!(FilterSpec::from_str(&spec.to_string()).unwrap(), spec);
        assert_eq!(FilterSpec::from_str("").unwrap(), FilterSpec::new());
    }

    #[test]
    fn test_merge() {
        let preset = FilterSpec::new().with_status("Open").with_keyword("old");
        let merged = preset.merge(FilterSpec::new().with_city("Glebe").with_keyword("new"));
        assert_eq!(merged.criteria().len(), 2);
        assert_eq!(merged.keyword(), Some("new"));

        let kept = FilterSpec::new()
            .with_keyword("old")
            .merge(FilterSpec::new().with_keyword(""));
        assert_eq!(kept.keyword(), Some("old"));
    }

    #[test]
    fn test_deserialize_rejects_unknown_rule() {
        let yaml = "criteria:\n  - field: status\n    rule: startswith\n    value: Op\n";
        assert!(serde_yaml_ng::from_str::<FilterSpec>(yaml).is_err());

        let yaml = "criteria:\n  - field: suburb\n    rule: exact-case-insensitive\n    value: Glebe\nkeyword: dog\n";
        let spec: FilterSpec = serde_yaml_ng::from_str(yaml).unwrap();
        assert_eq!(spec, FilterSpec::new().with_city("Glebe").with_keyword("dog"));
    }
}
