//! Tropical zodiac signs and the date-range classifier.
//!
//! A [`ZodiacTable`] holds one inclusive month/day range per sign. Ranges are
//! compared on the key `month * 100 + day`; a range whose start key is larger
//! than its end key (Capricorn, December 22 to January 19) wraps the year
//! boundary and matches when the key is `>= start` or `<= end`.
//!
//! A table is only accepted when every one of the 366 month/day pairs of a
//! leap year falls in exactly one range, so [`ZodiacClassifier::classify`]
//! cannot miss.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::consts::DAYS_IN_LEAP_YEAR;
use crate::prelude::*;
use crate::{CalendarDate, ConfigError, MonthDay};

/// Classical element of a sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Element {
    Fire,
    Earth,
    Air,
    Water,
}

/// The twelve tropical signs, Aries first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZodiacSign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

/// All 12 signs in order (0 = Aries, 11 = Pisces).
pub const ALL_SIGNS: [ZodiacSign; 12] = [
    ZodiacSign::Aries,
    ZodiacSign::Taurus,
    ZodiacSign::Gemini,
    ZodiacSign::Cancer,
    ZodiacSign::Leo,
    ZodiacSign::Virgo,
    ZodiacSign::Libra,
    ZodiacSign::Scorpio,
    ZodiacSign::Sagittarius,
    ZodiacSign::Capricorn,
    ZodiacSign::Aquarius,
    ZodiacSign::Pisces,
];

impl ZodiacSign {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Aries => "Aries",
            Self::Taurus => "Taurus",
            Self::Gemini => "Gemini",
            Self::Cancer => "Cancer",
            Self::Leo => "Leo",
            Self::Virgo => "Virgo",
            Self::Libra => "Libra",
            Self::Scorpio => "Scorpio",
            Self::Sagittarius => "Sagittarius",
            Self::Capricorn => "Capricorn",
            Self::Aquarius => "Aquarius",
            Self::Pisces => "Pisces",
        }
    }

    pub const fn symbol(self) -> char {
        match self {
            Self::Aries => '♈',
            Self::Taurus => '♉',
            Self::Gemini => '♊',
            Self::Cancer => '♋',
            Self::Leo => '♌',
            Self::Virgo => '♍',
            Self::Libra => '♎',
            Self::Scorpio => '♏',
            Self::Sagittarius => '♐',
            Self::Capricorn => '♑',
            Self::Aquarius => '♒',
            Self::Pisces => '♓',
        }
    }

    /// Elements cycle Fire, Earth, Air, Water from Aries.
    pub const fn element(self) -> Element {
        match self.index() % 4 {
            0 => Element::Fire,
            1 => Element::Earth,
            2 => Element::Air,
            _ => Element::Water,
        }
    }

    /// 0-based index (Aries=0 .. Pisces=11).
    pub const fn index(self) -> u8 {
        self as u8
    }

    pub const fn all() -> &'static [Self; 12] {
        &ALL_SIGNS
    }
}

impl fmt::Display for ZodiacSign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a sign name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown zodiac sign: {0}")]
pub struct UnknownSign(pub String);

impl FromStr for ZodiacSign {
    type Err = UnknownSign;

    /// Case-insensitive English name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        ALL_SIGNS
            .iter()
            .copied()
            .find(|sign| sign.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownSign(s.to_owned()))
    }
}

/// Inclusive month/day range belonging to one sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SignRange {
    pub sign:  ZodiacSign,
    pub start: MonthDay,
    pub end:   MonthDay,
}

impl SignRange {
    pub const fn wraps_year_end(&self) -> bool {
        self.start.key() > self.end.key()
    }

    pub const fn contains(&self, day: MonthDay) -> bool {
        let key = day.key();
        if self.wraps_year_end() {
            key >= self.start.key() || key <= self.end.key()
        } else {
            self.start.key() <= key && key <= self.end.key()
        }
    }

    /// "March 21 - April 19"
    pub fn describe(&self) -> String {
        format!("{} - {}", self.start.describe(), self.end.describe())
    }
}

const fn range(sign: ZodiacSign, start: (u8, u8), end: (u8, u8)) -> SignRange {
    SignRange {
        sign,
        start: MonthDay::new_unchecked(start.0, start.1),
        end: MonthDay::new_unchecked(end.0, end.1),
    }
}

/// Standard tropical sun-sign dates.
pub const STANDARD_RANGES: [SignRange; 12] = [
    range(ZodiacSign::Aries, (3, 21), (4, 19)),
    range(ZodiacSign::Taurus, (4, 20), (5, 20)),
    range(ZodiacSign::Gemini, (5, 21), (6, 20)),
    range(ZodiacSign::Cancer, (6, 21), (7, 22)),
    range(ZodiacSign::Leo, (7, 23), (8, 22)),
    range(ZodiacSign::Virgo, (8, 23), (9, 22)),
    range(ZodiacSign::Libra, (9, 23), (10, 22)),
    range(ZodiacSign::Scorpio, (10, 23), (11, 21)),
    range(ZodiacSign::Sagittarius, (11, 22), (12, 21)),
    range(ZodiacSign::Capricorn, (12, 22), (1, 19)),
    range(ZodiacSign::Aquarius, (1, 20), (2, 18)),
    range(ZodiacSign::Pisces, (2, 19), (3, 20)),
];

/// Linear scan over `ranges`, returning every sign whose range holds `day`.
fn matching_signs(ranges: &[SignRange], day: MonthDay) -> impl Iterator<Item = ZodiacSign> + '_ {
    ranges
        .iter()
        .filter(move |r| r.contains(day))
        .map(|r| r.sign)
}

/// Validated set of sign ranges that partitions the calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<SignRange>", into = "Vec<SignRange>")]
pub struct ZodiacTable {
    ranges: Vec<SignRange>,
}

impl ZodiacTable {
    /// # Errors
    /// Returns `ConfigError::InvalidTable` unless every sign appears exactly
    /// once and every day of a leap year is covered by exactly one range.
    pub fn new(ranges: Vec<SignRange>) -> Result<Self, ConfigError> {
        for sign in ALL_SIGNS {
            let count = ranges.iter().filter(|r| r.sign == sign).count();
            if count != 1 {
                return Err(ConfigError::InvalidTable(format!(
                    "{sign} appears {count} times in the zodiac table"
                )));
            }
        }
        if ranges.len() != ALL_SIGNS.len() {
            return Err(ConfigError::InvalidTable(format!(
                "expected {} zodiac ranges, found {}",
                ALL_SIGNS.len(),
                ranges.len()
            )));
        }

        for day in MonthDay::all() {
            let hits: Vec<ZodiacSign> = matching_signs(&ranges, day).collect();
            match hits.as_slice() {
                [_] => {}
                [] => {
                    return Err(ConfigError::InvalidTable(format!(
                        "{} is not covered by any sign",
                        day.describe()
                    )));
                }
                [first, second, ..] => {
                    return Err(ConfigError::InvalidTable(format!(
                        "{} is covered by both {first} and {second}",
                        day.describe()
                    )));
                }
            }
        }

        Ok(Self { ranges })
    }

    pub fn ranges(&self) -> &[SignRange] {
        &self.ranges
    }

    pub fn range_of(&self, sign: ZodiacSign) -> Option<&SignRange> {
        self.ranges.iter().find(|r| r.sign == sign)
    }
}

impl Default for ZodiacTable {
    fn default() -> Self {
        Self {
            ranges: STANDARD_RANGES.to_vec(),
        }
    }
}

impl TryFrom<Vec<SignRange>> for ZodiacTable {
    type Error = ConfigError;

    fn try_from(ranges: Vec<SignRange>) -> Result<Self, Self::Error> {
        Self::new(ranges)
    }
}

impl From<ZodiacTable> for Vec<SignRange> {
    fn from(table: ZodiacTable) -> Self {
        table.ranges
    }
}

/// Maps calendar dates to signs.
///
/// Construction runs the range scan once for each of the 366 month/day pairs
/// and keeps the answers, so classification is a single lookup.
#[derive(Debug, Clone)]
pub struct ZodiacClassifier {
    by_day: [ZodiacSign; DAYS_IN_LEAP_YEAR],
}

impl ZodiacClassifier {
    pub fn new(table: &ZodiacTable) -> Self {
        let mut by_day = [ZodiacSign::Aries; DAYS_IN_LEAP_YEAR];
        for day in MonthDay::all() {
            // ZodiacTable::new guarantees exactly one match
            if let Some(sign) = matching_signs(table.ranges(), day).next() {
                by_day[day.ordinal()] = sign;
            }
        }
        tracing::debug!(ranges = table.ranges().len(), "zodiac classifier built");
        Self { by_day }
    }

    pub fn classify(&self, date: CalendarDate) -> ZodiacSign {
        self.classify_month_day(date.month_day())
    }

    pub fn classify_month_day(&self, day: MonthDay) -> ZodiacSign {
        self.by_day[day.ordinal()]
    }
}

impl Default for ZodiacClassifier {
    fn default() -> Self {
        Self::new(&ZodiacTable::default())
    }
}
