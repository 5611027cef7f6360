//! Calendar date normalization at the wire boundary
//!
//! Forms produce `YYYY-MM-DD`; older data may use `YYYY/MM/DD`. Both are
//! accepted and rewritten into the single configured wire layout.

use chrono::NaiveDate;
use compteweb_config::WireDateFormat;

use crate::error::{CoreError, CoreResult};

const ACCEPTED_PATTERNS: [&str; 2] = ["%Y-%m-%d", "%Y/%m/%d"];

/// Parse a date typed by the user in either accepted layout
pub fn parse_date(field: &str, input: &str) -> CoreResult<NaiveDate> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(CoreError::validation(field, "a date is required"));
    }
    ACCEPTED_PATTERNS
        .iter()
        .find_map(|pattern| NaiveDate::parse_from_str(trimmed, pattern).ok())
        .ok_or_else(|| {
            CoreError::validation(field, format!("'{}' is not a valid YYYY-MM-DD date", trimmed))
        })
}

/// Format a date in the wire layout
pub fn format_wire_date(date: NaiveDate, format: WireDateFormat) -> String {
    date.format(format.pattern()).to_string()
}

/// Validate and rewrite a user date into the wire layout
pub fn normalize_date(field: &str, input: &str, format: WireDateFormat) -> CoreResult<String> {
    parse_date(field, input).map(|date| format_wire_date(date, format))
}

/// Today's local date
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Value for an `<input type='date'>`, which always expects `YYYY-MM-DD`
pub fn input_value(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
