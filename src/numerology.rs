//! Life-path and destiny number derivation.
//!
//! Both calculations reduce a digit sum with [`reduce`], which folds a number
//! into its decimal digit sum until it reaches a single digit or one of the
//! master numbers 11, 22 and 33. The master check runs before every fold, so
//! `29` stops at `11` rather than continuing to `2`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::{MASTER_NUMBERS, MAX_SINGLE_DIGIT, PYTHAGOREAN_TABLE};
use crate::{CalendarDate, Error};

/// A fully reduced numerology value: `1..=9` or a master number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct NumerologyNumber(u8);

impl NumerologyNumber {
    /// For compile-time tables whose values are checked by tests.
    pub(crate) const fn new_unchecked(value: u8) -> Self {
        debug_assert!(is_reduced(value as u64));
        Self(value)
    }

    #[inline]
    pub const fn get(self) -> u8 {
        self.0
    }

    pub const fn is_master(self) -> bool {
        self.0 > MAX_SINGLE_DIGIT
    }
}

/// Only accepts values [`reduce`] could have produced.
impl TryFrom<u8> for NumerologyNumber {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if value == 0 || !is_reduced(u64::from(value)) {
            return Err(Error::invalid_input(format!(
                "{value} is not a reduced numerology number"
            )));
        }
        Ok(Self(value))
    }
}

impl From<NumerologyNumber> for u8 {
    fn from(number: NumerologyNumber) -> Self {
        number.0
    }
}

impl fmt::Display for NumerologyNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

const fn is_reduced(value: u64) -> bool {
    if value <= MAX_SINGLE_DIGIT as u64 {
        return true;
    }
    let mut i = 0;
    while i < MASTER_NUMBERS.len() {
        if value == MASTER_NUMBERS[i] as u64 {
            return true;
        }
        i += 1;
    }
    false
}

/// Sum of the decimal digits of `value`.
pub const fn digit_sum(mut value: u64) -> u64 {
    let mut sum = 0;
    while value > 0 {
        sum += value % 10;
        value /= 10;
    }
    sum
}

/// Reduces `value` to a single digit or a master number.
///
/// # Errors
/// Returns `Error::InvalidInput` for `0`, which has no numerology value.
pub fn reduce(value: u64) -> Result<NumerologyNumber, Error> {
    if value == 0 {
        return Err(Error::invalid_input("cannot reduce 0"));
    }

    let mut current = value;
    while !is_reduced(current) {
        let next = digit_sum(current);
        tracing::trace!(from = current, to = next, "digit reduction step");
        current = next;
    }

    // A positive number's digit sum is positive, and is_reduced bounds it by 33.
    u8::try_from(current)
        .map(NumerologyNumber)
        .map_err(|_| Error::invalid_input(format!("reduction of {value} overflowed")))
}

/// Life-path number: every digit of year, month and day summed as one flat
/// sequence, then reduced.
///
/// # Errors
/// Propagates [`reduce`] errors; a validated date always has a positive digit sum.
pub fn life_path_number(date: CalendarDate) -> Result<NumerologyNumber, Error> {
    let sum = digit_sum(u64::from(date.year()))
        + digit_sum(u64::from(date.month()))
        + digit_sum(u64::from(date.day()));
    let number = reduce(sum)?;
    tracing::debug!(%date, sum, %number, "life path number");
    Ok(number)
}

/// Pythagorean value of a Latin letter, case-insensitive. `None` for anything else.
pub fn letter_value(c: char) -> Option<u8> {
    if !c.is_ascii_alphabetic() {
        return None;
    }
    let upper = u8::try_from(c.to_ascii_uppercase()).ok()?;
    PYTHAGOREAN_TABLE.get(usize::from(upper - b'A')).copied()
}

/// Destiny number: letter values of the name summed, then reduced.
/// Characters other than the 26 Latin letters are ignored.
///
/// # Errors
/// Returns `Error::InvalidInput` when the name contains no Latin letters.
pub fn destiny_number(name: &str) -> Result<NumerologyNumber, Error> {
    let mut letters = 0usize;
    let sum: u64 = name
        .chars()
        .filter_map(letter_value)
        .inspect(|_| letters += 1)
        .map(u64::from)
        .sum();

    if letters == 0 {
        return Err(Error::invalid_input(format!(
            "name {name:?} contains no Latin letters"
        )));
    }

    let number = reduce(sum)?;
    tracing::debug!(letters, sum, %number, "destiny number");
    Ok(number)
}
