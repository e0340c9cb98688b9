//! Calendar time to row index of an annual hourly table.
//!
//! Rows hold hourly intervals labeled by their END time. The value that
//! represents clock time H:00 therefore sits in the interval ending at H:00,
//! one row before the raw hour count since 1 January 00:00. The first hour of
//! the year clamps to row 0.
//!
//! Only 365-day years are modeled (8760 rows). Leap years are rejected.

use crate::{Error, Result};
use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};

pub const HOURS_PER_YEAR: usize = 8760;

/// Non-leap year used when none is given.
pub const DEFAULT_YEAR: i32 = 2023;

/// Maps (month, day, hour) of a fixed non-leap year to a table row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HourOfYear {
    year: i32,
}

impl HourOfYear {
    pub fn new(year: i32) -> Result<Self> {
        let is_leap = NaiveDate::from_ymd_opt(year, 2, 29).is_some();
        if is_leap {
            return Err(Error::LeapYear(year));
        }
        Ok(Self { year })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// Whole hours elapsed since 1 January 00:00 (no interval shift).
    pub fn raw_hour(&self, month: u32, day: u32, hour: u32) -> Result<usize> {
        let target = NaiveDate::from_ymd_opt(self.year, month, day)
            .and_then(|d| d.and_hms_opt(hour, 0, 0))
            .ok_or_else(|| {
                Error::IndexOutOfRange(format!(
                    "{:04}-{:02}-{:02} {:02}:00 is not a valid time of year {}",
                    self.year, month, day, hour, self.year
                ))
            })?;
        let start = NaiveDate::from_ymd_opt(self.year, 1, 1)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .ok_or_else(|| Error::IndexOutOfRange(format!("year {} is out of range", self.year)))?;
        let hours = (target - start).num_hours();
        usize::try_from(hours)
            .map_err(|_| Error::IndexOutOfRange(format!("negative hour offset {}", hours)))
    }

    /// Row holding the interval that ends at `hour`:00 on `month`/`day`.
    pub fn index(&self, month: u32, day: u32, hour: u32) -> Result<usize> {
        let raw = self.raw_hour(month, day, hour)?;
        Ok(raw.saturating_sub(1))
    }

    /// Same as `index()`, with minutes and seconds of `datetime` dropped.
    ///
    /// The date must fall within the modeled year.
    pub fn index_of(&self, datetime: NaiveDateTime) -> Result<usize> {
        if datetime.year() != self.year {
            return Err(Error::IndexOutOfRange(format!(
                "{} is outside the modeled year {}",
                datetime, self.year
            )));
        }
        self.index(datetime.month(), datetime.day(), datetime.hour())
    }
}

impl Default for HourOfYear {
    fn default() -> Self {
        Self {
            year: DEFAULT_YEAR,
        }
    }
}
