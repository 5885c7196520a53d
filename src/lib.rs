//! Numerology and zodiac calculations for an astrology content app.
//!
//! The core is four pure functions: [`parse_date`], [`classify_zodiac`],
//! [`life_path_number`] and [`destiny_number`]. Static content (zodiac date
//! ranges, interpretations, daily horoscopes) is carried by [`ContentConfig`]
//! and handed to the classifier and lookups when they are built. Session, cart
//! and feedback state go through the [`KeyValueStore`] port.

mod consts;
mod error;
mod prelude;
mod types;

pub mod cart;
pub mod config;
pub mod feedback;
pub mod horoscope;
pub mod interpretation;
#[cfg(feature = "cli")]
pub mod logger;
pub mod numerology;
pub mod session;
pub mod storage;
pub mod zodiac;

#[cfg(test)]
mod test_utils;

pub use config::{ConfigError, ContentConfig};
pub use consts::*;
pub use error::{Error, ErrorKind, ParseError};
pub use interpretation::{Interpretation, InterpretationTable, NumerologyReading};
pub use numerology::{NumerologyNumber, destiny_number, life_path_number, reduce};
pub use storage::{KeyValueStore, MemoryStore, StoreError};
pub use types::{Day, Month, MonthDay, Year, days_in_month, is_leap_year};
pub use zodiac::{Element, ZodiacClassifier, ZodiacSign, ZodiacTable};

use crate::prelude::*;
use crate::types::parse_fixed_digits;
use std::str::FromStr;
use std::sync::LazyLock;

/// A validated Gregorian calendar date.
///
/// Built by parsing `YYYY-MM-DD` or through [`CalendarDate::new`]; the day is
/// always valid for its month and year. Ordering is chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{year}-{month}-{day}")]
pub struct CalendarDate {
    year:  Year,
    month: Month,
    day:   Day,
}

impl CalendarDate {
    /// # Errors
    /// Returns the `ParseError` for the first component that is out of range.
    pub fn new(year: u16, month: u8, day: u8) -> Result<Self, ParseError> {
        Ok(Self {
            year:  Year::new(year)?,
            month: Month::new(month)?,
            day:   Day::new(day, year, month)?,
        })
    }

    pub const fn year(&self) -> u16 {
        self.year.get()
    }

    pub const fn month(&self) -> u8 {
        self.month.get()
    }

    pub const fn day(&self) -> u8 {
        self.day.get()
    }

    pub const fn year_typed(&self) -> Year {
        self.year
    }

    pub const fn month_typed(&self) -> Month {
        self.month
    }

    pub const fn day_typed(&self) -> Day {
        self.day
    }

    /// The date with its year dropped
    pub const fn month_day(&self) -> MonthDay {
        MonthDay::new_unchecked(self.month.get(), self.day.get())
    }

    pub const fn is_leap_year(&self) -> bool {
        self.year.is_leap()
    }

    /// Converts to database columns: (year, month, day)
    pub const fn to_columns(&self) -> (u16, u8, u8) {
        (self.year.get(), self.month.get(), self.day.get())
    }
}

impl FromStr for CalendarDate {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseError::EmptyInput);
        }

        let parts: Vec<&str> = trimmed.split(DATE_SEPARATOR).collect();
        let [year, month, day] = parts.as_slice() else {
            return Err(ParseError::InvalidFormat(format!(
                "expected YYYY{DATE_SEPARATOR}MM{DATE_SEPARATOR}DD, found {} {DATE_SEPARATOR} separators in {s:?}",
                parts.len().saturating_sub(1)
            )));
        };

        // Digit-count checks first: "2021-2-30" is a format error, not a bad day
        let year = parse_fixed_digits(year, YEAR_DIGITS)?;
        let month = parse_fixed_digits(month, MONTH_DIGITS)?;
        let day = parse_fixed_digits(day, DAY_DIGITS)?;

        let month = u8::try_from(month).map_err(|_| ParseError::InvalidFormat(s.to_owned()))?;
        let day = u8::try_from(day).map_err(|_| ParseError::InvalidFormat(s.to_owned()))?;

        Self::new(year, month, day)
    }
}

impl TryFrom<(u16, u8, u8)> for CalendarDate {
    type Error = ParseError;

    fn try_from(value: (u16, u8, u8)) -> Result<Self, Self::Error> {
        Self::new(value.0, value.1, value.2)
    }
}

impl TryFrom<chrono::NaiveDate> for CalendarDate {
    type Error = ParseError;

    /// Fails only for years outside `1..=9999`.
    fn try_from(date: chrono::NaiveDate) -> Result<Self, Self::Error> {
        use chrono::Datelike;

        let year = u16::try_from(date.year())
            .map_err(|_| ParseError::InvalidFormat(format!("year {} is out of range", date.year())))?;
        let month = u8::try_from(date.month()).map_err(|_| ParseError::InvalidFormat(date.to_string()))?;
        let day = u8::try_from(date.day()).map_err(|_| ParseError::InvalidFormat(date.to_string()))?;
        Self::new(year, month, day)
    }
}

impl serde::Serialize for CalendarDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for CalendarDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

static DEFAULT_CLASSIFIER: LazyLock<ZodiacClassifier> = LazyLock::new(ZodiacClassifier::default);

/// Parses a strict `YYYY-MM-DD` date.
///
/// # Errors
/// Returns a `ParseError` (always of kind [`ErrorKind::InvalidFormat`]) when the
/// layout is wrong or the date does not exist.
pub fn parse_date(raw: &str) -> Result<CalendarDate, ParseError> {
    raw.parse()
}

/// Zodiac sign for `date` using the standard tropical date ranges.
/// Use a [`ZodiacClassifier`] built from a [`ZodiacTable`] for custom ranges.
pub fn classify_zodiac(date: CalendarDate) -> ZodiacSign {
    DEFAULT_CLASSIFIER.classify(date)
}
