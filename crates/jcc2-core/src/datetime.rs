//! Timestamp parsing for coerced cells.
//!
//! The form exporter writes RFC 3339 timestamps (`2024-01-15T10:30:00.000Z`)
//! for submission times and plain ISO dates elsewhere; `m/d/Y` shows up in
//! hand-edited files. Anything outside that set coerces to null rather than
//! erroring.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y"];

fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.naive_utc());
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
}

/// Parses a `datetime` cell. Offset timestamps are converted to UTC; a bare
/// date reads as midnight.
pub fn parse_datetime_value(raw: &str) -> Option<NaiveDateTime> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }
    parse_timestamp(value).or_else(|| {
        parse_plain_date(value).map(|date| date.and_time(chrono::NaiveTime::MIN))
    })
}

/// Parses a `date` cell. Full timestamps fall back to their date part.
pub fn parse_date_value(raw: &str) -> Option<NaiveDate> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }
    parse_plain_date(value).or_else(|| parse_timestamp(value).map(|datetime| datetime.date()))
}

fn parse_plain_date(value: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_exporter_timestamps() {
        let parsed = parse_datetime_value("2024-01-15T10:30:00.000Z").unwrap();
        assert_eq!(parsed.to_string(), "2024-01-15 10:30:00");

        let offset = parse_datetime_value("2024-01-15T10:30:00+02:00").unwrap();
        assert_eq!(offset.to_string(), "2024-01-15 08:30:00");
    }

    #[test]
    fn parses_naive_and_legacy_forms() {
        assert!(parse_datetime_value("2024-01-15 10:30:00").is_some());
        assert!(parse_datetime_value("2024-01-15T10:30").is_some());
        assert_eq!(
            parse_date_value("3/4/2024").unwrap().to_string(),
            "2024-03-04"
        );
    }

    #[test]
    fn date_cells_accept_timestamps() {
        assert_eq!(
            parse_date_value("2024-01-15T10:30:00Z").unwrap().to_string(),
            "2024-01-15"
        );
    }

    #[test]
    fn bare_dates_read_as_midnight() {
        let parsed = parse_datetime_value("2024-01-15").unwrap();
        assert_eq!(parsed.to_string(), "2024-01-15 00:00:00");
    }

    #[test]
    fn garbage_is_none() {
        assert!(parse_date_value("not a date").is_none());
        assert!(parse_datetime_value("").is_none());
        assert!(parse_date_value("2024-13-45").is_none());
    }
}
