//! Builders shared by unit tests.

use crate::{CalendarDate, MonthDay};

pub fn date(year: u16, month: u8, day: u8) -> CalendarDate {
    CalendarDate::new(year, month, day).expect("test date must be valid")
}

pub fn month_day(month: u8, day: u8) -> MonthDay {
    MonthDay::new(month, day).expect("test month/day must be valid")
}

pub fn at(iso: &str) -> chrono::DateTime<chrono::Utc> {
    iso.parse().expect("test timestamp must be RFC 3339")
}
