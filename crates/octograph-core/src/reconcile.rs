//! Merges sparse upstream counts onto the full day grid.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::grid::{TimeRange, WeekSpan};
use crate::level::ContributionLevel;
use crate::types::RawContribution;

/// One calendar day in the processed range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ContributionRecord {
    pub date: NaiveDate,
    pub count: u32,
    pub level: ContributionLevel,
}

impl ContributionRecord {
    #[must_use]
    pub fn new(date: NaiveDate, count: u32) -> Self {
        Self {
            date,
            count,
            level: ContributionLevel::from_count(count),
        }
    }
}

/// The records of one Sunday-aligned week, Sunday first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekBucket {
    pub week_start: NaiveDate,
    pub days: Vec<ContributionRecord>,
}

/// Produces exactly one record per day of `range`, in order.
///
/// Days absent from `raw` get a zero count. Raw days outside the range are
/// ignored. If a date repeats, the later entry wins.
#[must_use]
pub fn reconcile(raw: &[RawContribution], range: &TimeRange) -> Vec<ContributionRecord> {
    let counts: HashMap<NaiveDate, u32> = raw.iter().map(|r| (r.date, r.count)).collect();

    range
        .days()
        .map(|date| ContributionRecord::new(date, counts.get(&date).copied().unwrap_or(0)))
        .collect()
}

/// Partitions chronologically sorted `records` into the given weeks.
///
/// Each record lands in the week whose visible days contain it; weeks with
/// no matching records are skipped.
#[must_use]
pub fn group_into_weeks(records: &[ContributionRecord], weeks: &[WeekSpan]) -> Vec<WeekBucket> {
    weeks
        .iter()
        .filter_map(|week| {
            let lo = records.partition_point(|r| r.date < week.first_day);
            let hi = records.partition_point(|r| r.date <= week.last_day);
            (lo < hi).then(|| WeekBucket {
                week_start: week.week_start,
                days: records[lo..hi].to_vec(),
            })
        })
        .collect()
}
