//! Sunday-aligned week grid over a calendar year or an explicit date range.
//!
//! All arithmetic is on [`NaiveDate`], so the grid never shifts with the
//! host timezone or across DST transitions.

use chrono::{Datelike, Days, NaiveDate};
use serde::Serialize;

use crate::error::CalendarError;

/// An inclusive, non-inverted range of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TimeRange {
    from: NaiveDate,
    to: NaiveDate,
}

impl TimeRange {
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidRange`] when `to` is before `from`, or
    /// when the range touches the edge of the representable calendar so that
    /// its surrounding weeks cannot be aligned.
    pub fn new(from: NaiveDate, to: NaiveDate) -> Result<Self, CalendarError> {
        if to < from || sunday_on_or_before(from).is_none() || saturday_on_or_after(to).is_none() {
            return Err(CalendarError::InvalidRange { from, to });
        }
        Ok(Self { from, to })
    }

    /// January 1 through December 31 of `year`.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidYear`] if the year is not representable.
    pub fn for_year(year: i32) -> Result<Self, CalendarError> {
        let from = NaiveDate::from_ymd_opt(year, 1, 1).ok_or(CalendarError::InvalidYear(year))?;
        let to = NaiveDate::from_ymd_opt(year, 12, 31).ok_or(CalendarError::InvalidYear(year))?;
        Self::new(from, to).map_err(|_| CalendarError::InvalidYear(year))
    }

    #[must_use]
    pub fn start(&self) -> NaiveDate {
        self.from
    }

    #[must_use]
    pub fn end(&self) -> NaiveDate {
        self.to
    }

    /// Number of days in the range, both ends included.
    #[must_use]
    pub fn num_days(&self) -> usize {
        usize::try_from((self.to - self.from).num_days() + 1).unwrap_or(0)
    }

    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from <= date && date <= self.to
    }

    /// Every day from `from` to `to` inclusive, in order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let to = self.to;
        self.from.iter_days().take_while(move |d| *d <= to)
    }
}

/// What the caller asked for: a whole year or an explicit range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CalendarSpan {
    Year(i32),
    Range(TimeRange),
}

impl CalendarSpan {
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidYear`] for an unrepresentable year.
    pub fn resolve(&self) -> Result<TimeRange, CalendarError> {
        match self {
            Self::Year(year) => TimeRange::for_year(*year),
            Self::Range(range) => Ok(*range),
        }
    }
}

impl From<TimeRange> for CalendarSpan {
    fn from(range: TimeRange) -> Self {
        Self::Range(range)
    }
}

/// The visible part of one Sunday-to-Saturday week.
///
/// `first_day` and `last_day` are clamped to the requested range, so edge
/// weeks may cover fewer than seven days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeekSpan {
    pub week_start: NaiveDate,
    pub first_day: NaiveDate,
    pub last_day: NaiveDate,
}

impl WeekSpan {
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let last = self.last_day;
        self.first_day.iter_days().take_while(move |d| *d <= last)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        usize::try_from((self.last_day - self.first_day).num_days() + 1).unwrap_or(0)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The Sunday on or before `date`.
#[must_use]
pub fn sunday_on_or_before(date: NaiveDate) -> Option<NaiveDate> {
    let back = u64::from(date.weekday().num_days_from_sunday());
    date.checked_sub_days(Days::new(back))
}

fn saturday_on_or_after(date: NaiveDate) -> Option<NaiveDate> {
    let ahead = 6 - u64::from(date.weekday().num_days_from_sunday());
    date.checked_add_days(Days::new(ahead))
}

/// Builds the week boundaries for a year or explicit range.
///
/// # Errors
///
/// Returns [`CalendarError::InvalidYear`] if a year cannot be resolved.
pub fn build_weeks(span: &CalendarSpan) -> Result<Vec<WeekSpan>, CalendarError> {
    Ok(weeks_in_range(&span.resolve()?))
}

/// Splits `range` into Sunday-aligned weeks. Weeks entirely outside the
/// range are never produced.
#[must_use]
pub fn weeks_in_range(range: &TimeRange) -> Vec<WeekSpan> {
    let mut weeks = Vec::with_capacity(range.num_days() / 7 + 2);
    let mut cursor = sunday_on_or_before(range.from);

    while let Some(week_start) = cursor.filter(|start| *start <= range.to) {
        let Some(week_end) = week_start.checked_add_days(Days::new(6)) else {
            break;
        };
        weeks.push(WeekSpan {
            week_start,
            first_day: week_start.max(range.from),
            last_day: week_end.min(range.to),
        });
        cursor = week_start.checked_add_days(Days::new(7));
    }

    weeks
}
