use crate::ParseError;
use crate::consts::{
    CENTURY_CYCLE, DATE_SEPARATOR, DAY_DIGITS, DAYS_IN_MONTH, FEBRUARY, FEBRUARY_DAYS_LEAP,
    GREGORIAN_CYCLE, LEAP_REFERENCE_YEAR, LEAP_YEAR_CYCLE, MAX_MONTH, MAX_YEAR, MONTH_DIGITS,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::{NonZeroU8, NonZeroU16};
use std::str::FromStr;

/// A year value guaranteed to be in the range `1..=MAX_YEAR` (1..=9999)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct Year(NonZeroU16);

impl Year {
    /// Creates a new Year, validating that it's non-zero and <= `MAX_YEAR`
    ///
    /// # Errors
    /// Returns `ParseError::InvalidYear` if the value is 0 or > `MAX_YEAR`.
    pub fn new(value: u16) -> Result<Self, ParseError> {
        let non_zero = NonZeroU16::new(value).ok_or(ParseError::InvalidYear(value))?;
        if value > MAX_YEAR {
            return Err(ParseError::InvalidYear(value));
        }
        Ok(Self(non_zero))
    }

    #[inline]
    pub const fn get(self) -> u16 {
        self.0.get()
    }

    pub const fn is_leap(self) -> bool {
        is_leap_year(self.get())
    }
}

impl TryFrom<u16> for Year {
    type Error = ParseError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Year> for u16 {
    fn from(year: Year) -> Self {
        year.get()
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}", self.get())
    }
}

/// A calendar month, 1 (January) through 12 (December)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Month(NonZeroU8);

const MONTH_NAMES: [&str; 13] = [
    "",
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

impl Month {
    /// # Errors
    /// Returns `ParseError::InvalidMonth` if the value is 0 or > `MAX_MONTH`.
    pub fn new(value: u8) -> Result<Self, ParseError> {
        let non_zero = NonZeroU8::new(value).ok_or(ParseError::InvalidMonth(value))?;
        if value > MAX_MONTH {
            return Err(ParseError::InvalidMonth(value));
        }
        Ok(Self(non_zero))
    }

    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }

    /// English month name ("January")
    pub const fn name(self) -> &'static str {
        MONTH_NAMES[self.get() as usize]
    }
}

impl TryFrom<u8> for Month {
    type Error = ParseError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Month> for u8 {
    fn from(month: Month) -> Self {
        month.get()
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}", self.get())
    }
}

/// A day of month. Only constructible against a concrete year and month,
/// so a `Day` is always valid for the date it was built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Day(NonZeroU8);

impl Day {
    /// Creates a new Day, validating it against the length of `year`-`month`
    ///
    /// # Errors
    /// Returns `ParseError::InvalidDay` if the value is 0 or past the end of the month.
    pub fn new(value: u8, year: u16, month: u8) -> Result<Self, ParseError> {
        let invalid = ParseError::InvalidDay {
            month,
            day: value,
            year,
        };
        let non_zero = NonZeroU8::new(value).ok_or_else(|| invalid.clone())?;
        if month == 0 || month > MAX_MONTH || value > days_in_month(year, month) {
            return Err(invalid);
        }
        Ok(Self(non_zero))
    }

    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }
}

impl From<Day> for u8 {
    fn from(day: Day) -> Self {
        day.get()
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}", self.get())
    }
}

/// A month/day pair with no year, such as a zodiac boundary.
/// Validated against a leap year, so February 29 is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthDay {
    month: u8,
    day:   u8,
}

impl MonthDay {
    /// # Errors
    /// Returns `ParseError::InvalidMonth` or `ParseError::InvalidDay` when the
    /// pair does not exist in a leap year.
    pub fn new(month: u8, day: u8) -> Result<Self, ParseError> {
        Month::new(month)?;
        Day::new(day, LEAP_REFERENCE_YEAR, month)?;
        Ok(Self { month, day })
    }

    /// For compile-time tables whose values are checked by tests.
    pub(crate) const fn new_unchecked(month: u8, day: u8) -> Self {
        debug_assert!(month != 0 && month <= MAX_MONTH && day != 0);
        Self { month, day }
    }

    pub const fn month(self) -> u8 {
        self.month
    }

    pub const fn day(self) -> u8 {
        self.day
    }

    /// Comparable key `month * 100 + day`, so March 21 is `321`
    pub const fn key(self) -> u16 {
        self.month as u16 * 100 + self.day as u16
    }

    /// Zero-based position of this day within a leap year (Jan 1 = 0, Dec 31 = 365)
    pub fn ordinal(self) -> usize {
        let before: usize = (1..self.month)
            .map(|m| usize::from(days_in_month(LEAP_REFERENCE_YEAR, m)))
            .sum();
        before + usize::from(self.day) - 1
    }

    /// Every month/day pair of a leap year in calendar order
    pub fn all() -> impl Iterator<Item = Self> {
        (1..=MAX_MONTH).flat_map(|month| {
            (1..=days_in_month(LEAP_REFERENCE_YEAR, month)).map(move |day| Self { month, day })
        })
    }

    /// Human form used in content screens ("March 21")
    pub fn describe(self) -> String {
        let name = Month::new(self.month).map_or("", Month::name);
        format!("{name} {}", self.day)
    }
}

impl fmt::Display for MonthDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}{DATE_SEPARATOR}{:02}", self.month, self.day)
    }
}

impl FromStr for MonthDay {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (month, day) = trimmed
            .split_once(DATE_SEPARATOR)
            .ok_or_else(|| ParseError::InvalidFormat(s.to_owned()))?;
        let month = parse_fixed_digits(month, MONTH_DIGITS)?;
        let day = parse_fixed_digits(day, DAY_DIGITS)?;
        let month = u8::try_from(month).map_err(|_| ParseError::InvalidFormat(s.to_owned()))?;
        let day = u8::try_from(day).map_err(|_| ParseError::InvalidFormat(s.to_owned()))?;
        Self::new(month, day)
    }
}

impl Serialize for MonthDay {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MonthDay {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Parses a segment that must be exactly `width` ASCII digits.
/// Rejects signs and inner whitespace that `str::parse` would otherwise accept.
pub(crate) fn parse_fixed_digits(segment: &str, width: usize) -> Result<u16, ParseError> {
    if segment.len() != width || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseError::InvalidFormat(segment.to_owned()));
    }
    segment
        .parse::<u16>()
        .map_err(|_| ParseError::InvalidFormat(segment.to_owned()))
}

// Helper functions

pub const fn is_leap_year(year: u16) -> bool {
    (year % LEAP_YEAR_CYCLE == 0 && year % CENTURY_CYCLE != 0) || (year % GREGORIAN_CYCLE == 0)
}

pub const fn days_in_month(year: u16, month: u8) -> u8 {
    debug_assert!(month != 0 && month <= MAX_MONTH);

    if month == FEBRUARY && is_leap_year(year) {
        FEBRUARY_DAYS_LEAP
    } else {
        DAYS_IN_MONTH[month as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::DAYS_IN_LEAP_YEAR;

    #[test]
    fn test_year_bounds() {
        assert!(Year::new(1).is_ok());
        assert!(Year::new(9999).is_ok());
        assert!(matches!(Year::new(0), Err(ParseError::InvalidYear(0))));
        assert!(matches!(Year::new(10000), Err(ParseError::InvalidYear(10000))));
    }

    #[test]
    fn test_year_display_pads_to_four_digits() {
        assert_eq!(Year::new(987).unwrap().to_string(), "0987");
        assert_eq!(Year::new(2024).unwrap().to_string(), "2024");
    }

    #[test]
    fn test_year_serde_rejects_zero() {
        let year: Year = serde_json::from_str("1990").unwrap();
        assert_eq!(year.get(), 1990);
        assert!(serde_json::from_str::<Year>("0").is_err());
    }

    #[test]
    fn test_month_bounds() {
        for m in 1..=12 {
            assert!(Month::new(m).is_ok(), "Month {m} should be valid");
        }
        assert!(matches!(Month::new(0), Err(ParseError::InvalidMonth(0))));
        assert!(matches!(Month::new(13), Err(ParseError::InvalidMonth(13))));
    }

    #[test]
    fn test_month_names() {
        assert_eq!(Month::new(1).unwrap().name(), "January");
        assert_eq!(Month::new(9).unwrap().name(), "September");
        assert_eq!(Month::new(12).unwrap().name(), "December");
    }

    #[test]
    fn test_day_validated_against_month_length() {
        assert!(Day::new(31, 2024, 1).is_ok());
        assert!(Day::new(30, 2024, 4).is_ok());
        assert!(Day::new(31, 2024, 4).is_err());
        assert!(Day::new(29, 2024, 2).is_ok());
        assert!(Day::new(29, 2023, 2).is_err());
        assert!(matches!(
            Day::new(0, 2024, 1),
            Err(ParseError::InvalidDay { day: 0, .. })
        ));
        assert!(matches!(
            Day::new(32, 2024, 1),
            Err(ParseError::InvalidDay {
                month: 1,
                day: 32,
                year: 2024
            })
        ));
    }

    #[test]
    fn test_day_rejects_impossible_month() {
        assert!(Day::new(1, 2024, 0).is_err());
        assert!(Day::new(1, 2024, 13).is_err());
    }

    #[test]
    fn test_is_leap_year_cases() {
        struct TestCase {
            year:        u16,
            is_leap:     bool,
            description: &'static str,
        }

        let cases = [
            TestCase {
                year:        2020,
                is_leap:     true,
                description: "divisible by 4",
            },
            TestCase {
                year:        2021,
                is_leap:     false,
                description: "not divisible by 4",
            },
            TestCase {
                year:        1900,
                is_leap:     false,
                description: "century not divisible by 400",
            },
            TestCase {
                year:        2100,
                is_leap:     false,
                description: "century not divisible by 400",
            },
            TestCase {
                year:        2000,
                is_leap:     true,
                description: "divisible by 400",
            },
            TestCase {
                year:        2400,
                is_leap:     true,
                description: "divisible by 400",
            },
        ];

        for case in &cases {
            assert_eq!(
                is_leap_year(case.year),
                case.is_leap,
                "Year {} ({})",
                case.year,
                case.description
            );
        }
    }

    #[test]
    fn test_days_in_month_table() {
        let expected = [0, 31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
        for month in 1..=12u8 {
            assert_eq!(
                days_in_month(2023, month),
                expected[month as usize],
                "Month {month} has incorrect day count"
            );
        }
        assert_eq!(days_in_month(2000, 2), 29);
        assert_eq!(days_in_month(1900, 2), 28);
    }

    #[test]
    fn test_month_day_accepts_leap_day() {
        let leap = MonthDay::new(2, 29).unwrap();
        assert_eq!(leap.key(), 229);
        assert!(MonthDay::new(2, 30).is_err());
        assert!(MonthDay::new(4, 31).is_err());
        assert!(MonthDay::new(13, 1).is_err());
    }

    #[test]
    fn test_month_day_parse_and_display() {
        let md: MonthDay = "12-22".parse().unwrap();
        assert_eq!((md.month(), md.day()), (12, 22));
        assert_eq!(md.to_string(), "12-22");
        assert_eq!(md.describe(), "December 22");

        assert!("1-22".parse::<MonthDay>().is_err());
        assert!("12/22".parse::<MonthDay>().is_err());
        assert!("+1-22".parse::<MonthDay>().is_err());
    }

    #[test]
    fn test_month_day_serde_as_string() {
        let md = MonthDay::new(3, 21).unwrap();
        let json = serde_json::to_string(&md).unwrap();
        assert_eq!(json, "\"03-21\"");
        let parsed: MonthDay = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, md);
        assert!(serde_json::from_str::<MonthDay>("\"02-30\"").is_err());
    }

    #[test]
    fn test_month_day_all_covers_leap_year_in_order() {
        let all: Vec<MonthDay> = MonthDay::all().collect();
        assert_eq!(all.len(), DAYS_IN_LEAP_YEAR);
        for (i, md) in all.iter().enumerate() {
            assert_eq!(md.ordinal(), i, "ordinal mismatch for {md}");
        }
        assert!(all.windows(2).all(|w| w[0].key() < w[1].key()));
    }

    #[test]
    fn test_parse_fixed_digits() {
        assert_eq!(parse_fixed_digits("0042", 4).unwrap(), 42);
        assert!(parse_fixed_digits("042", 4).is_err());
        assert!(parse_fixed_digits("+042", 4).is_err());
        assert!(parse_fixed_digits("4 2", 3).is_err());
        assert!(parse_fixed_digits("ab", 2).is_err());
    }
}
