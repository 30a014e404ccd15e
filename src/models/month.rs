//! Target month model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// The calendar month a schedule is built for.
///
/// # Example
///
/// ```
/// use roster_engine::models::TargetMonth;
///
/// let month = TargetMonth::new(2025, 6);
/// assert_eq!(month.day_count().unwrap(), 30);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetMonth {
    /// The calendar year.
    pub year: i32,
    /// The calendar month (1-12).
    pub month: u32,
}

impl TargetMonth {
    /// Creates a target month. Validity is checked when dates are derived.
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    /// Returns the first calendar date of the month.
    pub fn first_day(&self) -> EngineResult<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).ok_or(EngineError::InvalidMonth {
            year: self.year,
            month: self.month,
        })
    }

    /// Returns the number of days in the month.
    pub fn day_count(&self) -> EngineResult<u32> {
        let first = self.first_day()?;
        let next = if self.month == 12 {
            NaiveDate::from_ymd_opt(self.year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(self.year, self.month + 1, 1)
        }
        .ok_or(EngineError::InvalidMonth {
            year: self.year,
            month: self.month,
        })?;
        Ok((next - first).num_days() as u32)
    }

}

impl std::fmt::Display for TargetMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}
