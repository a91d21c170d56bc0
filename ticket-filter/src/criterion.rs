use crate::errors::FilterError;
use crate::record::{Field, Record};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;
use strsim::jaro_winkler;

const SIMILARITY_THRESHOLD: f64 = 0.9;

static CRITERION_REGEX: OnceLock<Regex> = OnceLock::new();

/// `field rule value`, the rule either symbolic (`=`, `~`, `==`) or a word.
fn criterion_regex() -> &'static Regex {
    CRITERION_REGEX.get_or_init(|| {
        Regex::new(r"^\s*([\w\.\-]+)(?:\s*([=~!<>]+)|\s+([A-Za-z][\w\-]*))\s*(.*)$").unwrap()
    })
}

/// How a criterion value is compared against a record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CompareRule {
    ExactCaseInsensitive,
    SubstringCaseInsensitive,
    /// No case folding. Meant for dates, which the caller normalizes beforehand.
    ExactEquality,
    SimilarCaseInsensitive,
}

impl CompareRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompareRule::ExactCaseInsensitive => "exact-case-insensitive",
            CompareRule::SubstringCaseInsensitive => "substring-case-insensitive",
            CompareRule::ExactEquality => "exact-equality",
            CompareRule::SimilarCaseInsensitive => "similar-case-insensitive",
        }
    }

    /// `field_value` is `None` when the record lacks the field. The case-insensitive
    /// rules compare it as an empty string, `ExactEquality` never matches it.
    pub fn matches(&self, field_value: Option<&str>, wanted: &str) -> bool {
        match self {
            CompareRule::ExactCaseInsensitive => {
                field_value.unwrap_or_default().to_lowercase() == wanted.to_lowercase()
            }
            CompareRule::SubstringCaseInsensitive => field_value
                .unwrap_or_default()
                .to_lowercase()
                .contains(&wanted.to_lowercase()),
            CompareRule::ExactEquality => field_value.is_some_and(|value| value == wanted),
            CompareRule::SimilarCaseInsensitive => {
                let value = field_value.unwrap_or_default().to_lowercase();
                jaro_winkler(&value, &wanted.to_lowercase()) > SIMILARITY_THRESHOLD
            }
        }
    }
}

impl FromStr for CompareRule {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "exact-case-insensitive" | "=" | "eq" | "ieq" => Ok(CompareRule::ExactCaseInsensitive),
            "substring-case-insensitive" | "~" | "contains" | "like" => {
                Ok(CompareRule::SubstringCaseInsensitive)
            }
            "exact-equality" | "==" | "is" => Ok(CompareRule::ExactEquality),
            "similar-case-insensitive" | "similar" | "fuzzy" => {
                Ok(CompareRule::SimilarCaseInsensitive)
            }
            _ => Err(FilterError::InvalidSpecification(format!(
                "unknown comparison rule '{}', supported: exact-case-insensitive (=), \
                 substring-case-insensitive (~), exact-equality (==), similar-case-insensitive",
                s.trim()
            ))),
        }
    }
}

impl TryFrom<String> for CompareRule {
    type Error = FilterError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        CompareRule::from_str(&value)
    }
}

impl From<CompareRule> for String {
    fn from(rule: CompareRule) -> Self {
        rule.as_str().to_string()
    }
}

impl fmt::Display for CompareRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One independently optional filter dimension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Criterion {
    pub field: Field,
    pub rule: CompareRule,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl Criterion {
    pub fn new(field: Field, rule: CompareRule, value: impl Into<String>) -> Self {
        Self {
            field,
            rule,
            value: Some(value.into()),
        }
    }

    pub fn inactive(field: Field, rule: CompareRule) -> Self {
        Self {
            field,
            rule,
            value: None,
        }
    }

    /// Only an absent or empty value disables a criterion; "0" or "false" are real filters.
    pub fn is_active(&self) -> bool {
        self.value.as_deref().is_some_and(|v| !v.is_empty())
    }

    pub fn matches(&self, record: &Record) -> bool {
        match self.value.as_deref() {
            Some(wanted) if !wanted.is_empty() => self
                .rule
                .matches(record.field(&self.field).as_deref(), wanted),
            _ => true,
        }
    }
}

impl FromStr for Criterion {
    type Err = FilterError;

    /// Parses `field rule value`, e.g. `status = Open` or `location contains "main st"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some(captures) = criterion_regex().captures(s) else {
            return Err(FilterError::ParseError(format!(
                "Expected format: `field rule value` (with optional spaces around a symbolic rule), found {}",
                s
            )));
        };

        let field = Field::from(captures[1].to_string());
        let rule = captures
            .get(2)
            .or_else(|| captures.get(3))
            .map(|m| m.as_str())
            .unwrap_or_default()
            .parse::<CompareRule>()?;
        let value = unquote(captures[4].trim());

        Ok(Self {
            field,
            rule,
            value: (!value.is_empty()).then(|| value.to_string()),
        })
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = self.value.as_deref().unwrap_or_default();
        if value.is_empty() || value.contains(char::is_whitespace) {
            write!(f, "{} {} \"{}\"", self.field, self.rule, value)
        } else {
            write!(f, "{} {} {}", self.field, self.rule, value)
        }
    }
}

/// Strips one pair of matching quotes.
pub(crate) fn unquote(s: &str) -> &str {
    for quote in ['"', '\''] {
        if s.len() >= 2 && s.starts_with(quote) && s.ends_with(quote) {
            return &s[1..s.len() - 1];
        }
    }
    s
}
