//! Synthetic calendars for demos and tests.

use rand::Rng;

use crate::error::CalendarError;
use crate::grid::{weeks_in_range, TimeRange};
use crate::level::ContributionLevel;
use crate::theme::{get_theme, ThemeMode, DEFAULT_THEME};
use crate::types::{ContributionCalendar, ContributionDay, ContributionWeek};

/// Builds an upstream-shaped calendar for `year` with random daily counts in `0..15`.
///
/// # Errors
///
/// Returns [`CalendarError::InvalidYear`] if `year` is not representable.
pub fn generate_mock_calendar<R: Rng + ?Sized>(
    year: i32,
    rng: &mut R,
) -> Result<ContributionCalendar, CalendarError> {
    let range = TimeRange::for_year(year)?;
    let palette = get_theme(DEFAULT_THEME, ThemeMode::Light);
    let mut total_contributions = 0u64;

    let weeks = weeks_in_range(&range)
        .iter()
        .map(|week| {
            let contribution_days = week
                .days()
                .map(|date| {
                    let count: u32 = rng.random_range(0..15);
                    total_contributions += u64::from(count);
                    let level = ContributionLevel::from_count(count);
                    ContributionDay {
                        contribution_count: count,
                        date,
                        color: palette.level_color(level).to_owned(),
                        contribution_level: level.into(),
                    }
                })
                .collect();
            ContributionWeek {
                contribution_days,
                first_day: week.week_start,
            }
        })
        .collect();

    Ok(ContributionCalendar {
        total_contributions,
        weeks,
    })
}
