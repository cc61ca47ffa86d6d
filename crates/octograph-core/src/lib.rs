//! Contribution calendar pipeline: day grid, levels, reconciliation and the
//! render-facing types built from them.

pub mod app_config;
pub mod config;
pub mod duration;
pub mod error;
pub mod grid;
pub mod labels;
pub mod level;
pub mod mock;
pub mod processed;
pub mod reconcile;
pub mod render;
pub mod theme;
pub mod types;

pub use app_config::AppConfig;
pub use config::{
    load_app_config, load_app_config_from_env, load_app_config_with_overrides, DEFAULT_API_URL,
};
pub use duration::{parse_cache_duration, CacheDuration, DEFAULT_CACHE_DURATION};
pub use error::{CalendarError, ConfigError};
pub use grid::{build_weeks, weeks_in_range, CalendarSpan, TimeRange, WeekSpan};
pub use labels::{
    aria_label, format_contribution_text, format_tooltip_date, month_labels, weekday_labels,
};
pub use level::{level_for_count, ContributionLevel};
pub use mock::generate_mock_calendar;
pub use processed::{
    process_contribution_data, process_contribution_range, MonthSpan, ProcessedData,
};
pub use reconcile::{group_into_weeks, reconcile, ContributionRecord, WeekBucket};
pub use render::{CellHandler, CellProps, RenderOptions};
pub use theme::{
    get_theme, is_valid_theme_name, merge_theme, resolve_theme, theme_names, LevelColors,
    LevelOverride, ThemeColors, ThemeMode, ThemeOverride, ThemeSelection,
};
pub use types::{
    ContributionCalendar, ContributionDay, ContributionWeek, QuartileLevel, RawContribution,
};
