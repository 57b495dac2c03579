//! Calendar-day value type and canonical "today"/"yesterday".
//!
//! All progression logic in this crate is calendar-day based, not
//! 24-hour-window based: two calls within the same local calendar day
//! always agree, and "yesterday" means the preceding calendar date
//! regardless of the hour. Dates are carried as [`DateKey`] values
//! (canonical `YYYY-MM-DD` form) rather than raw strings so equality and
//! ordering are explicit and format drift cannot creep in.

use std::fmt;
use std::str::FromStr;

use chrono::{Days, Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// A local calendar date with canonical `YYYY-MM-DD` string form.
///
/// Ordering is chronological. Serializes as the canonical string, so it
/// can be used directly as a JSON map key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DateKey(NaiveDate);

impl DateKey {
    /// Wrap a known calendar date.
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Build from year/month/day, for tests and fixtures.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// The calendar date immediately before this one.
    pub fn pred(&self) -> Self {
        // Days::new(1) cannot underflow within chrono's representable range
        Self(self.0 - Days::new(1))
    }

    /// The calendar date immediately after this one.
    pub fn succ(&self) -> Self {
        Self(self.0 + Days::new(1))
    }

    /// Underlying chrono date.
    pub fn date(&self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for DateKey {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").map(Self)
    }
}

/// Date key for the current local calendar date.
pub fn today() -> DateKey {
    DateKey(Local::now().date_naive())
}

/// Date key for the calendar date immediately preceding today.
pub fn yesterday() -> DateKey {
    today().pred()
}
