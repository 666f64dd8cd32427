use chrono::NaiveDate;
use thiserror::Error;

const ISO_DATE: &str = "%Y-%m-%d";
const DISPLAY_DATE: &str = "%b %-d, %Y";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateError {
    #[error("invalid date `{0}`, expected YYYY-MM-DD")]
    Invalid(String),
    #[error("end date {end} is before start date {start}")]
    Reversed { start: NaiveDate, end: NaiveDate },
}

pub fn parse_iso_date(text: &str) -> Result<NaiveDate, DateError> {
    NaiveDate::parse_from_str(text.trim(), ISO_DATE)
        .map_err(|_| DateError::Invalid(text.to_string()))
}

/// Number of calendar days from `start` to `end`, both ends counted.
pub fn inclusive_day_count(start: NaiveDate, end: NaiveDate) -> Result<u32, DateError> {
    if end < start {
        return Err(DateError::Reversed { start, end });
    }
    let span = (end - start).num_days() + 1;
    u32::try_from(span).map_err(|_| DateError::Reversed { start, end })
}

pub fn inclusive_day_count_str(start: &str, end: &str) -> Result<u32, DateError> {
    inclusive_day_count(parse_iso_date(start)?, parse_iso_date(end)?)
}

/// `2024-01-05` renders as `Jan 5, 2024`; anything unparseable is shown as-is.
pub fn format_display_date(text: &str) -> String {
    match parse_iso_date(text) {
        Ok(date) => date.format(DISPLAY_DATE).to_string(),
        Err(_) => text.to_string(),
    }
}
