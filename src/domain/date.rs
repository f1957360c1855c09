//! Day/month/year strings as stored on ledger records.
//!
//! Record dates are kept as `DD/MM/YYYY` text rather than [`chrono::NaiveDate`]
//! because month rollover advances the month number without clamping the day,
//! so `31/01/2024` becomes `31/02/2024`. That value is not a calendar date but
//! must still round-trip through storage untouched.

use std::fmt;
use std::str::FromStr;

use crate::errors::LedgerError;

/// A parsed `DD/MM/YYYY` triple. No calendar validation is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedgerDate {
    pub day: u32,
    pub month: u32,
    pub year: i32,
}

impl LedgerDate {
    pub fn new(day: u32, month: u32, year: i32) -> Self {
        Self { day, month, year }
    }

    /// Moves to the same day of the following month.
    ///
    /// The day is never clamped to the length of the target month. `None` when
    /// the month or year would overflow.
    pub fn next_month(self) -> Option<Self> {
        let (month, year) = match self.month.checked_add(1)? {
            month if month > 12 => (1, self.year.checked_add(1)?),
            month => (month, self.year),
        };
        Some(Self {
            day: self.day,
            month,
            year,
        })
    }
}

impl FromStr for LedgerDate {
    type Err = LedgerError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let malformed = || LedgerError::MalformedDate(raw.to_string());
        let mut parts = raw.split('/');
        let (Some(day), Some(month), Some(year), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(malformed());
        };
        Ok(Self {
            day: day.trim().parse().map_err(|_| malformed())?,
            month: month.trim().parse().map_err(|_| malformed())?,
            year: year.trim().parse().map_err(|_| malformed())?,
        })
    }
}

impl fmt::Display for LedgerDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{:02}/{}", self.day, self.month, self.year)
    }
}

/// Parses `raw`, advances it one month and formats it back.
pub fn advance_one_month(raw: &str) -> Result<String, LedgerError> {
    let date: LedgerDate = raw.parse()?;
    date.next_month()
        .map(|next| next.to_string())
        .ok_or_else(|| LedgerError::MalformedDate(raw.to_string()))
}
