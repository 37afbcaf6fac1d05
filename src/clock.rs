//! Source of "today" for lookback windows and relative labels.

use chrono::{Local, NaiveDate};

/// Supplies the current calendar date.
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// The local wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A clock pinned to one date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
