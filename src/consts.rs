/// Maximum valid year (inclusive), the largest four-digit year
pub const MAX_YEAR: u16 = 9999;

/// Maximum valid month (December)
pub const MAX_MONTH: u8 = 12;

/// Month number for February
pub const FEBRUARY: u8 = 2;

/// Days in February for leap years
pub const FEBRUARY_DAYS_LEAP: u8 = 29;

/// Maximum days in each month (index 0 is unused, months are 1-indexed)
/// February shows 28 days (non-leap year default)
pub const DAYS_IN_MONTH: [u8; 13] = [
    0,  // index 0 unused (months are 1-indexed)
    31, // January
    28, // February (non-leap, adjusted by is_leap_year check)
    31, // March
    30, // April
    31, // May
    30, // June
    31, // July
    31, // August
    30, // September
    31, // October
    30, // November
    31, // December
];

/// Number of distinct (month, day) pairs across a leap year
pub const DAYS_IN_LEAP_YEAR: usize = 366;

/// Leap year used to validate month/day pairs that carry no year
pub(crate) const LEAP_REFERENCE_YEAR: u16 = 2000;

/// Leap year occurs every 4 years
pub(crate) const LEAP_YEAR_CYCLE: u16 = 4;
/// Century years are not leap years unless...
pub(crate) const CENTURY_CYCLE: u16 = 100;
/// ...they are divisible by 400 (Gregorian calendar correction)
pub(crate) const GREGORIAN_CYCLE: u16 = 400;

/// Date component separator (ISO 8601 format)
pub const DATE_SEPARATOR: char = '-';

/// Digit counts of the `YYYY-MM-DD` layout
pub(crate) const YEAR_DIGITS: usize = 4;
pub(crate) const MONTH_DIGITS: usize = 2;
pub(crate) const DAY_DIGITS: usize = 2;

/// Master numbers are never reduced further
pub const MASTER_NUMBERS: [u8; 3] = [11, 22, 33];

/// Largest single-digit numerology value
pub const MAX_SINGLE_DIGIT: u8 = 9;

/// Pythagorean letter values, indexed by `letter - 'A'`
///
/// ```text
/// A,J,S=1  B,K,T=2  C,L,U=3  D,M,V=4  E,N,W=5  F,O,X=6  G,P,Y=7  H,Q,Z=8  I,R=9
/// ```
pub const PYTHAGOREAN_TABLE: [u8; 26] = [
    1, 2, 3, 4, 5, 6, 7, 8, 9, // A-I
    1, 2, 3, 4, 5, 6, 7, 8, 9, // J-R
    1, 2, 3, 4, 5, 6, 7, 8, // S-Z
];

/// Text used when a number has no interpretation entry
pub const NO_INTERPRETATION: &str = "No interpretation available";

/// Storage keys shared with the app's key-value store
pub const USER_KEY: &str = "user";
pub const CART_KEY: &str = "cart";
pub const ORDERS_KEY: &str = "orders";
pub const FEEDBACK_KEY: &str = "feedback";
