//! The human-entered `YYYY-MM-DD : h[h][:mm]am|pm` entry-time format.

use chrono::{Datelike, NaiveDateTime, Timelike};
use once_cell::sync::Lazy;
use regex::Regex;

// Digit counts only; month/day/hour ranges are not checked.
static ENTRY_TIME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^[0-9]{4}-[0-9]{2}-[0-9]{2}\s*:\s*[0-9]{1,2}(?::[0-9]{2})?[ap]m$")
        .expect("entry time pattern is valid")
});

/// Whether `input` matches the entry-time grammar after trimming.
pub fn is_valid_entry_time(input: &str) -> bool {
    ENTRY_TIME.is_match(input.trim())
}

/// Renders a local time the way the "now" shortcut fills the date field:
/// 12-hour clock, minutes omitted on the hour.
pub fn format_entry_time(at: NaiveDateTime) -> String {
    let hour = at.hour();
    let hour12 = match hour {
        0 => 12,
        h if h > 12 => h - 12,
        h => h,
    };
    let meridiem = if hour >= 12 { "pm" } else { "am" };
    let minutes = match at.minute() {
        0 => String::new(),
        m => format!(":{m:02}"),
    };
    format!(
        "{:04}-{:02}-{:02} : {hour12}{minutes}{meridiem}",
        at.year(),
        at.month(),
        at.day()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 5)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn accepts_grammar_variants() {
        for input in [
            "2024-03-15 : 2:30pm",
            "2024-03-15 : 2pm",
            "2024-03-15 : 11am",
            "2024-03-15:11AM",
            "2024-03-15   :   09:05Pm",
            "  2024-03-15 : 2pm  ",
        ] {
            assert!(is_valid_entry_time(input), "should accept {input:?}");
        }
    }

    #[test]
    fn rejects_malformed_input() {
        for input in [
            "2024-13-1",
            "2024-03-15",
            "2024-03-15 2pm",
            "2024-03-15 : 2",
            "2024-03-15 : 123pm",
            "2024-03-15 : 2:3pm",
            "2024-03-15 : 2 pm",
            "24-03-15 : 2pm",
            "2024/03/15 : 2pm",
            "２０２４-03-15 : 2pm",
        ] {
            assert!(!is_valid_entry_time(input), "should reject {input:?}");
        }
    }

    #[test]
    fn formats_twelve_hour_clock() {
        assert_eq!(format_entry_time(at(0, 0)), "2024-03-05 : 12am");
        assert_eq!(format_entry_time(at(9, 7)), "2024-03-05 : 9:07am");
        assert_eq!(format_entry_time(at(12, 0)), "2024-03-05 : 12pm");
        assert_eq!(format_entry_time(at(14, 30)), "2024-03-05 : 2:30pm");
        assert_eq!(format_entry_time(at(23, 59)), "2024-03-05 : 11:59pm");
    }

    #[test]
    fn formatted_now_is_accepted() {
        for hour in 0..24 {
            assert!(is_valid_entry_time(&format_entry_time(at(hour, 45))));
        }
    }
}
