//! Last-updated date handling
//!
//! Upstream timestamps look like `26/04/2020, 10:00:00 pm`. The dashboard
//! shows them as `26th April 2020, 10:00:00 pm`.

use chrono::{Datelike, NaiveDateTime};
use thiserror::Error;

/// Accepted upstream formats, tried in order
const UPSTREAM_FORMATS: [&str; 2] = [
    // DD/MM/YYYY, h:mm:ss a
    "%d/%m/%Y, %I:%M:%S %p",
    // 24-hour variant also served by the API
    "%d/%m/%Y %H:%M:%S",
];

const DISPLAY_FORMAT: &str = "%B %Y, %-I:%M:%S %P";
const DISPLAY_PARSE_FORMAT: &str = "%d %B %Y, %I:%M:%S %p";

/// Date parsing errors
#[derive(Error, Debug, PartialEq)]
pub enum DateError {
    #[error("Unrecognized date: {0:?}")]
    Unrecognized(String),
}

/// Parse an upstream last-updated timestamp
pub fn parse_last_updated(text: &str) -> Result<NaiveDateTime, DateError> {
    let text = text.trim();
    UPSTREAM_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .ok_or_else(|| DateError::Unrecognized(text.to_string()))
}

/// Format for display, e.g. `26th April 2020, 10:00:00 pm`
pub fn format_display(dt: &NaiveDateTime) -> String {
    let day = dt.day();
    format!("{}{} {}", day, ordinal_suffix(day), dt.format(DISPLAY_FORMAT))
}

/// Parse a string produced by [`format_display`]
pub fn parse_display(text: &str) -> Result<NaiveDateTime, DateError> {
    let unrecognized = || DateError::Unrecognized(text.to_string());

    let (day, rest) = text.trim().split_once(' ').ok_or_else(unrecognized)?;
    let digits = day.trim_end_matches(|c: char| c.is_ascii_alphabetic());
    let suffix = &day[digits.len()..];
    let day_num: u32 = digits.parse().map_err(|_| unrecognized())?;
    if suffix != ordinal_suffix(day_num) {
        return Err(unrecognized());
    }

    NaiveDateTime::parse_from_str(&format!("{} {}", digits, rest), DISPLAY_PARSE_FORMAT)
        .map_err(|_| unrecognized())
}

/// Upstream timestamp → display string; `None` (with a warning) if unparseable
pub fn last_updated_display(text: &str) -> Option<String> {
    match parse_last_updated(text) {
        Ok(dt) => Some(format_display(&dt)),
        Err(e) => {
            tracing::warn!("Cannot format last-updated time: {}", e);
            None
        }
    }
}

fn ordinal_suffix(day: u32) -> &'static str {
    match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn dt(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    #[test]
    fn test_parse_twelve_hour() {
        let parsed = parse_last_updated("26/04/2020, 10:00:00 pm").unwrap();
        assert_eq!(parsed, dt(2020, 4, 26, 22, 0, 0));

        let parsed = parse_last_updated("01/05/2020, 9:05:07 AM").unwrap();
        assert_eq!(parsed, dt(2020, 5, 1, 9, 5, 7));
    }

    #[test]
    fn test_parse_twenty_four_hour_fallback() {
        let parsed = parse_last_updated("26/04/2020 22:00:00").unwrap();
        assert_eq!(parsed, dt(2020, 4, 26, 22, 0, 0));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(
            parse_last_updated("yesterday"),
            Err(DateError::Unrecognized("yesterday".to_string()))
        );
        assert!(parse_last_updated("").is_err());
    }

    #[test]
    fn test_format_display() {
        let parsed = parse_last_updated("26/04/2020, 10:00:00 pm").unwrap();
        assert_eq!(format_display(&parsed), "26th April 2020, 10:00:00 pm");

        assert_eq!(
            format_display(&dt(2020, 5, 1, 9, 5, 7)),
            "1st May 2020, 9:05:07 am"
        );
        assert_eq!(
            format_display(&dt(2020, 3, 22, 0, 30, 0)),
            "22nd March 2020, 12:30:00 am"
        );
    }

    #[test]
    fn test_ordinal_suffix() {
        assert_eq!(ordinal_suffix(1), "st");
        assert_eq!(ordinal_suffix(2), "nd");
        assert_eq!(ordinal_suffix(3), "rd");
        assert_eq!(ordinal_suffix(4), "th");
        assert_eq!(ordinal_suffix(11), "th");
        assert_eq!(ordinal_suffix(12), "th");
        assert_eq!(ordinal_suffix(13), "th");
        assert_eq!(ordinal_suffix(21), "st");
        assert_eq!(ordinal_suffix(23), "rd");
        assert_eq!(ordinal_suffix(31), "st");
    }

    #[test]
    fn test_display_round_trip() {
        let samples = [
            dt(2020, 4, 26, 22, 0, 0),
            dt(2020, 1, 30, 0, 0, 0),
            dt(2020, 12, 11, 12, 59, 59),
            dt(2021, 2, 3, 13, 1, 2),
        ];
        for original in samples {
            let shown = format_display(&original);
            assert_eq!(parse_display(&shown).unwrap(), original, "{}", shown);
        }
    }

    #[test]
    fn test_parse_display_rejects_wrong_suffix() {
        assert!(parse_display("26st April 2020, 10:00:00 pm").is_err());
        assert!(parse_display("April").is_err());
    }

    #[test]
    fn test_last_updated_display() {
        assert_eq!(
            last_updated_display("26/04/2020, 10:00:00 pm").as_deref(),
            Some("26th April 2020, 10:00:00 pm")
        );
        assert_eq!(last_updated_display("not a date"), None);
    }
}
