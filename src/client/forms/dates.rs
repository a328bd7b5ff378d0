use chrono::{DateTime, NaiveDate, Utc};

/// Calendar format used by date inputs.
pub const EDIT_DATE_FORMAT: &str = "%Y-%m-%d";

pub fn to_edit_date(date: &DateTime<Utc>) -> String {
    date.format(EDIT_DATE_FORMAT).to_string()
}

/// Parse a date input into UTC midnight of that day. Blank or malformed
/// input yields `None`.
pub fn parse_edit_date(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(input, EDIT_DATE_FORMAT)
        .ok()?
        .and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc())
}

pub fn seed_edit_date(date: Option<&DateTime<Utc>>) -> String {
    date.map(to_edit_date).unwrap_or_default()
}
