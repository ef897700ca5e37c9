//! Calendar-date conversions for due dates and creation stamps.
//!
//! Dates are stored as epoch milliseconds at UTC midnight. Forms exchange
//! `YYYY-MM-DD`; cards show the short US form `M/D/YYYY`.

use chrono::{DateTime, NaiveDate, Utc};
use std::error::Error;
use std::fmt::{Display, Formatter};

const DATE_INPUT_FORMAT: &str = "%Y-%m-%d";
const DISPLAY_FORMAT: &str = "%-m/%-d/%Y";
const INVALID_DATE_LABEL: &str = "Invalid Date";

/// Date input could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateInputError(pub String);

impl Display for DateInputError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid date input `{}`; expected YYYY-MM-DD", self.0)
    }
}

impl Error for DateInputError {}

/// Parses `YYYY-MM-DD` into epoch milliseconds at UTC midnight.
pub fn parse_date_input(value: &str) -> Result<i64, DateInputError> {
    let trimmed = value.trim();
    NaiveDate::parse_from_str(trimmed, DATE_INPUT_FORMAT)
        .ok()
        .and_then(naive_date_to_epoch_ms)
        .ok_or_else(|| DateInputError(trimmed.to_string()))
}

/// Formats epoch milliseconds as `YYYY-MM-DD` for a date input.
pub fn format_date_input(epoch_ms: i64) -> String {
    match DateTime::<Utc>::from_timestamp_millis(epoch_ms) {
        Some(value) => value.format(DATE_INPUT_FORMAT).to_string(),
        None => String::new(),
    }
}

/// Formats epoch milliseconds as a short display date (`4/30/2023`).
pub fn format_display_date(epoch_ms: i64) -> String {
    match DateTime::<Utc>::from_timestamp_millis(epoch_ms) {
        Some(value) => value.format(DISPLAY_FORMAT).to_string(),
        None => INVALID_DATE_LABEL.to_string(),
    }
}

/// Epoch milliseconds of today's UTC midnight.
pub fn today_epoch_ms() -> i64 {
    naive_date_to_epoch_ms(Utc::now().date_naive()).unwrap_or_default()
}

/// Epoch milliseconds of the given calendar day at UTC midnight.
pub fn ymd_epoch_ms(year: i32, month: u32, day: u32) -> Option<i64> {
    NaiveDate::from_ymd_opt(year, month, day).and_then(naive_date_to_epoch_ms)
}

fn naive_date_to_epoch_ms(date: NaiveDate) -> Option<i64> {
    date.and_hms_opt(0, 0, 0)
        .map(|value| value.and_utc().timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::{
        format_date_input, format_display_date, parse_date_input, today_epoch_ms, ymd_epoch_ms,
    };

    #[test]
    fn parse_date_input_returns_utc_midnight() {
        let parsed = parse_date_input("2023-04-30").unwrap();
        assert_eq!(parsed, 1_682_812_800_000);
        assert_eq!(Some(parsed), ymd_epoch_ms(2023, 4, 30));
    }

    #[test]
    fn parse_date_input_rejects_garbage() {
        let err = parse_date_input("next tuesday").unwrap_err();
        assert!(err.to_string().contains("YYYY-MM-DD"));
        assert!(parse_date_input("2023-02-30").is_err());
    }

    #[test]
    fn date_input_formats_back_to_iso_day() {
        let value = ymd_epoch_ms(2023, 6, 1).unwrap();
        assert_eq!(format_date_input(value), "2023-06-01");
    }

    #[test]
    fn display_date_has_no_zero_padding() {
        let value = ymd_epoch_ms(2023, 5, 1).unwrap();
        assert_eq!(format_display_date(value), "5/1/2023");
        assert_eq!(format_display_date(i64::MAX), "Invalid Date");
    }

    #[test]
    fn today_is_a_midnight() {
        assert_eq!(today_epoch_ms() % 86_400_000, 0);
    }
}
