//! The render-ready view of one year (or range) of contributions.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::error::CalendarError;
use crate::grid::{weeks_in_range, TimeRange};
use crate::labels::MONTH_NAMES;
use crate::reconcile::{group_into_weeks, reconcile, ContributionRecord, WeekBucket};
use crate::types::ContributionCalendar;

/// Placement of one calendar month within [`ProcessedData::contributions`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthSpan {
    pub name: &'static str,
    pub year: i32,
    /// Zero-based index of the month's first visible day in `contributions`.
    pub first_day_ordinal: usize,
    /// Length of the calendar month, regardless of range clamping.
    pub days_in_month: u32,
}

/// Built fresh for every (calendar, span) pair and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessedData {
    pub contributions: Vec<ContributionRecord>,
    /// Copied from the upstream calendar; see [`ProcessedData::reconciled_total`].
    pub total_contributions: u64,
    pub weeks: Vec<WeekBucket>,
    pub months: Vec<MonthSpan>,
    pub range_start: NaiveDate,
    pub range_end: NaiveDate,
}

impl ProcessedData {
    /// Sum of the per-day counts actually inside the range. May differ from
    /// `total_contributions` when the provider counted a different window.
    #[must_use]
    pub fn reconciled_total(&self) -> u64 {
        self.contributions.iter().map(|c| u64::from(c.count)).sum()
    }

    /// The day with the highest count; the earliest wins a tie.
    #[must_use]
    pub fn busiest_day(&self) -> Option<&ContributionRecord> {
        self.contributions
            .iter()
            .filter(|c| c.count > 0)
            .rev()
            .max_by_key(|c| c.count)
    }

    #[must_use]
    pub fn active_days(&self) -> usize {
        self.contributions.iter().filter(|c| c.count > 0).count()
    }
}

/// Processes a full calendar year.
///
/// # Errors
///
/// Returns [`CalendarError::InvalidYear`] if `year` is not representable.
pub fn process_contribution_data(
    calendar: &ContributionCalendar,
    year: i32,
) -> Result<ProcessedData, CalendarError> {
    Ok(process_contribution_range(calendar, TimeRange::for_year(year)?))
}

/// Processes an explicit range.
#[must_use]
pub fn process_contribution_range(
    calendar: &ContributionCalendar,
    range: TimeRange,
) -> ProcessedData {
    let contributions = reconcile(&calendar.raw_records(), &range);
    let weeks = group_into_weeks(&contributions, &weeks_in_range(&range));
    let months = month_spans(&range);

    ProcessedData {
        contributions,
        total_contributions: calendar.total_contributions,
        weeks,
        months,
        range_start: range.start(),
        range_end: range.end(),
    }
}

fn month_spans(range: &TimeRange) -> Vec<MonthSpan> {
    let mut spans = Vec::new();
    let mut cursor = NaiveDate::from_ymd_opt(range.start().year(), range.start().month(), 1);

    while let Some(first_of_month) = cursor.filter(|d| *d <= range.end()) {
        let next = first_of_next_month(first_of_month);
        let days_in_month = next.map_or(31, |n| {
            u32::try_from((n - first_of_month).num_days()).unwrap_or(31)
        });
        let first_visible = first_of_month.max(range.start());
        let name_index = usize::try_from(first_of_month.month0()).unwrap_or(0);

        spans.push(MonthSpan {
            name: MONTH_NAMES[name_index],
            year: first_of_month.year(),
            first_day_ordinal: usize::try_from((first_visible - range.start()).num_days())
                .unwrap_or(0),
            days_in_month,
        });
        cursor = next;
    }

    spans
}

fn first_of_next_month(date: NaiveDate) -> Option<NaiveDate> {
    if date.month() == 12 {
        NaiveDate::from_ymd_opt(date.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(date.year(), date.month() + 1, 1)
    }
}

#[cfg(test)]
#[path = "processed_test.rs"]
mod tests;
