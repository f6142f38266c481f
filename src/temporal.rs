//! Temporal range and the quarterly sampling grid.
//! Dates are ISO `YYYY-MM-DD` literals parsed with `chrono`.
//! The grid is anchored on calendar quarter starts (Jan 1, Apr 1, Jul 1, Oct 1).

use chrono::{Datelike, Months, NaiveDate};
use serde::Serialize;

use crate::error::{RegistryError, Result};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Inclusive date range. Construction guarantees `start <= end`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct TemporalRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl TemporalRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(RegistryError::InvalidDate {
                value: format!("{start}..{end}"),
                reason: "start is after end".into(),
            });
        }
        Ok(Self { start, end })
    }

    /// Parses both endpoints from ISO date literals.
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        Self::new(parse_date(start)?, parse_date(end)?)
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn bounds(&self) -> (NaiveDate, NaiveDate) {
        (self.start, self.end)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Lazy quarter-start sequence. Each call starts over from the beginning.
    pub fn quarters(&self) -> QuarterStarts {
        let first = quarter_start(self.start);
        let next = if first < self.start {
            first.checked_add_months(Months::new(3))
        } else {
            Some(first)
        };
        QuarterStarts { next, end: self.end }
    }

    pub fn sampling_grid(&self) -> Vec<NaiveDate> {
        self.quarters().collect()
    }
}

/// Iterator over quarter-start dates up to an inclusive end.
#[derive(Clone, Debug)]
pub struct QuarterStarts {
    next: Option<NaiveDate>,
    end: NaiveDate,
}

impl Iterator for QuarterStarts {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        let current = self.next.filter(|d| *d <= self.end)?;
        self.next = current.checked_add_months(Months::new(3));
        Some(current)
    }
}

/// First day of the calendar quarter containing `date`.
pub fn quarter_start(date: NaiveDate) -> NaiveDate {
    let month = (date.month0() / 3) * 3 + 1;
    // Day 1 of months 1, 4, 7 and 10 exists in every year chrono supports.
    date.with_day(1)
        .and_then(|d| d.with_month(month))
        .unwrap_or(date)
}

/// Quarter number (1..=4) of `date`.
pub fn quarter_of(date: NaiveDate) -> u32 {
    date.month0() / 3 + 1
}

pub fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|e| RegistryError::InvalidDate {
        value: value.to_string(),
        reason: e.to_string(),
    })
}
