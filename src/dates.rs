//! Date parsing for availability windows and due dates.
//!
//! Formats are tried in order and the first match wins:
//! 1) `YYYY-MM-DD HH:MM`
//! 2) `YYYY-MM-DD` (midnight)
//!
//! All values are naive; no timezone is attached. Input is matched strictly:
//! no surrounding whitespace, no sign, and only a single space between the
//! date and the time.

use chrono::{NaiveDate, NaiveDateTime};

const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M";
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse `text` with the first format that accepts it.
pub fn parse(text: &str) -> Option<NaiveDateTime> {
    if !is_plain(text) {
        return None;
    }
    if let Ok(value) = NaiveDateTime::parse_from_str(text, DATETIME_FORMAT) {
        return Some(value);
    }
    NaiveDate::parse_from_str(text, DATE_FORMAT)
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

// chrono skips whitespace before numeric fields and lets `%Y` carry a sign.
fn is_plain(text: &str) -> bool {
    let bytes = text.as_bytes();
    if !bytes.first().is_some_and(u8::is_ascii_digit) {
        return false;
    }
    bytes.iter().enumerate().all(|(i, b)| match b {
        b'0'..=b'9' | b'-' | b':' => true,
        b' ' => {
            bytes[i - 1].is_ascii_digit() && bytes.get(i + 1).is_some_and(u8::is_ascii_digit)
        }
        _ => false,
    })
}

pub fn is_valid(text: &str) -> bool {
    parse(text).is_some()
}

/// Parse a bare calendar day (`YYYY-MM-DD`, or a datetime truncated to its day).
pub fn parse_day(text: &str) -> Option<NaiveDate> {
    parse(text).map(|value| value.date())
}
