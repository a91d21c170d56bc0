use crate::CliError;
use chrono::{Datelike, NaiveDate};

/// Canonical form tickets store `dateSubmitted` in.
pub const CANONICAL_DATE_FORMAT: &str = "%Y-%m-%d";

const ACCEPTED_DATE_FORMATS: [&str; 3] = [CANONICAL_DATE_FORMAT, "%d/%m/%Y", "%Y/%m/%d"];

/// Years below this come from two-digit input like `01/03/24`, which chrono reads as
/// year 24 and no stored ticket can carry.
const MIN_YEAR: i32 = 1000;

/// Turns a user-typed date into the canonical form, since the filter engine
/// compares dates by exact equality. The year must have four digits.
pub fn normalize_date(input: &str) -> Result<String, CliError> {
    let trimmed = input.trim();
    ACCEPTED_DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
        .filter(|date| date.year() >= MIN_YEAR)
        .map(|date| date.format(CANONICAL_DATE_FORMAT).to_string())
        .ok_or_else(|| CliError::InvalidDate(input.to_string()))
}
