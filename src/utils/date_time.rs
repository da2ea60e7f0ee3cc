//! Wire format for match dates and kick-off times.
//!
//! Dates travel as `dd/MM/yyyy` and times as `HH:mm`, exactly. Shorter forms
//! such as `1/2/2025` or `9:05` are rejected even though chrono would accept them.

use chrono::{NaiveDate, NaiveTime};

pub const DATE_FORMAT: &str = "%d/%m/%Y";
pub const TIME_FORMAT: &str = "%H:%M";

pub const DATE_FORMAT_MESSAGE: &str = "Date must be in the format dd/MM/yyyy";
pub const TIME_FORMAT_MESSAGE: &str = "Time must be in the format HH:mm";

/// Returns true when `value` consists of ascii digits with `sep` at the given byte offsets.
fn has_shape(value: &str, len: usize, separators: &[usize], sep: u8) -> bool {
    let bytes = value.as_bytes();
    if bytes.len() != len {
        return false;
    }
    bytes.iter().enumerate().all(|(i, b)| {
        if separators.contains(&i) {
            *b == sep
        } else {
            b.is_ascii_digit()
        }
    })
}

pub fn parse_date(value: &str) -> Result<NaiveDate, String> {
    if !has_shape(value, 10, &[2, 5], b'/') {
        return Err(DATE_FORMAT_MESSAGE.to_string());
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|e| format!("{}: {}", DATE_FORMAT_MESSAGE, e))
}

pub fn parse_time(value: &str) -> Result<NaiveTime, String> {
    if !has_shape(value, 5, &[2], b':') {
        return Err(TIME_FORMAT_MESSAGE.to_string());
    }
    NaiveTime::parse_from_str(value, TIME_FORMAT)
        .map_err(|e| format!("{}: {}", TIME_FORMAT_MESSAGE, e))
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn format_time(time: NaiveTime) -> String {
    time.format(TIME_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_well_formed_date() {
        let date = parse_date("21/02/2025").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2025, 2, 21).unwrap());
        assert_eq!(format_date(date), "21/02/2025");
    }

    #[test]
    fn rejects_loose_or_impossible_dates() {
        for bad in ["1/2/2025", "2025-02-21", "21/02/25", "31/02/2025", "", "aa/bb/cccc"] {
            assert!(parse_date(bad).is_err(), "{bad} should not parse");
        }
    }

    #[test]
    fn parses_well_formed_time() {
        let time = parse_time("07:05").unwrap();
        assert_eq!(time, NaiveTime::from_hms_opt(7, 5, 0).unwrap());
        assert_eq!(format_time(time), "07:05");
    }

    #[test]
    fn rejects_loose_or_impossible_times() {
        for bad in ["7:05", "07:5", "24:00", "12:60", "12-30", "12:30:00"] {
            assert!(parse_time(bad).is_err(), "{bad} should not parse");
        }
    }
}
