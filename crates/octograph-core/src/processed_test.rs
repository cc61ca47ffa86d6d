use super::*;
use crate::level::ContributionLevel;
use crate::types::{ContributionDay, ContributionWeek, QuartileLevel};

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

fn day(d: &str, count: u32) -> ContributionDay {
    ContributionDay {
        contribution_count: count,
        date: date(d),
        color: "#000000".to_owned(),
        contribution_level: QuartileLevel::from(ContributionLevel::from_count(count)),
    }
}

fn calendar(total: u64, days: Vec<ContributionDay>) -> ContributionCalendar {
    let first_day = days.first().map_or(date("2024-01-01"), |d| d.date);
    ContributionCalendar {
        total_contributions: total,
        weeks: vec![ContributionWeek {
            contribution_days: days,
            first_day,
        }],
    }
}

#[test]
fn single_contribution_in_leap_year() {
    let cal = calendar(5, vec![day("2024-01-01", 5)]);
    let out = process_contribution_data(&cal, 2024).unwrap();

    assert_eq!(out.contributions.len(), 366);
    assert_eq!(out.contributions[0].date, date("2024-01-01"));
    assert_eq!(out.contributions[0].count, 5);
    assert_eq!(out.contributions[0].level, ContributionLevel::Medium);
    assert!(out.contributions[1..]
        .iter()
        .all(|c| c.count == 0 && c.level == ContributionLevel::None));

    let first_week = &out.weeks[0];
    assert_eq!(first_week.week_start, date("2023-12-31"));
    let first_dates: Vec<NaiveDate> = first_week.days.iter().map(|c| c.date).collect();
    assert_eq!(
        first_dates,
        (1..=6)
            .map(|d| NaiveDate::from_ymd_opt(2024, 1, d).unwrap())
            .collect::<Vec<_>>()
    );

    assert_eq!(out.range_start, date("2024-01-01"));
    assert_eq!(out.range_end, date("2024-12-31"));
}

#[test]
fn weeks_partition_contributions() {
    let cal = calendar(0, vec![]);
    let out = process_contribution_data(&cal, 2025).unwrap();
    let flattened: Vec<ContributionRecord> = out
        .weeks
        .iter()
        .flat_map(|w| w.days.iter().copied())
        .collect();
    assert_eq!(flattened, out.contributions);
    assert!(out.weeks.iter().all(|w| (1..=7).contains(&w.days.len())));
}

#[test]
fn upstream_total_is_trusted_not_recomputed() {
    let cal = calendar(
        42,
        vec![day("2023-12-30", 10), day("2024-03-01", 2), day("2024-03-02", 3)],
    );
    let out = process_contribution_data(&cal, 2024).unwrap();
    assert_eq!(out.total_contributions, 42);
    assert_eq!(out.reconciled_total(), 5);
}

#[test]
fn months_cover_the_year() {
    let cal = calendar(0, vec![]);
    let out = process_contribution_data(&cal, 2024).unwrap();
    assert_eq!(out.months.len(), 12);

    let names: Vec<&str> = out.months.iter().map(|m| m.name).collect();
    assert_eq!(
        names,
        ["Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec"]
    );
    assert_eq!(out.months[0].first_day_ordinal, 0);
    assert_eq!(out.months[1].first_day_ordinal, 31);
    assert_eq!(out.months[1].days_in_month, 29);
    assert_eq!(out.months[11].days_in_month, 31);

    let total: u32 = out.months.iter().map(|m| m.days_in_month).sum();
    assert_eq!(total, 366);
}

#[test]
fn months_for_range_spanning_new_year() {
    let cal = calendar(0, vec![]);
    let range = TimeRange::new(date("2023-12-15"), date("2024-01-10")).unwrap();
    let out = process_contribution_range(&cal, range);

    assert_eq!(out.contributions.len(), 27);
    assert_eq!(out.months.len(), 2);
    assert_eq!(out.months[0].name, "Dec");
    assert_eq!(out.months[0].year, 2023);
    assert_eq!(out.months[0].first_day_ordinal, 0);
    assert_eq!(out.months[1].name, "Jan");
    assert_eq!(out.months[1].year, 2024);
    assert_eq!(out.months[1].first_day_ordinal, 17);
}

#[test]
fn busiest_day_prefers_earliest_on_tie() {
    let cal = calendar(
        14,
        vec![day("2024-05-01", 7), day("2024-05-02", 3), day("2024-06-01", 7)],
    );
    let out = process_contribution_data(&cal, 2024).unwrap();
    assert_eq!(out.busiest_day().unwrap().date, date("2024-05-01"));
    assert_eq!(out.active_days(), 3);
}

#[test]
fn busiest_day_is_none_without_activity() {
    let out = process_contribution_data(&calendar(0, vec![]), 2024).unwrap();
    assert!(out.busiest_day().is_none());
}

#[test]
fn processing_twice_is_identical() {
    let cal = calendar(9, vec![day("2024-08-08", 9)]);
    assert_eq!(
        process_contribution_data(&cal, 2024).unwrap(),
        process_contribution_data(&cal, 2024).unwrap()
    );
}

#[test]
fn invalid_year_is_reported() {
    let cal = calendar(0, vec![]);
    assert_eq!(
        process_contribution_data(&cal, i32::MIN),
        Err(CalendarError::InvalidYear(i32::MIN))
    );
}
