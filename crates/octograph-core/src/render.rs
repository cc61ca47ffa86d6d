//! Configuration handed to a renderer alongside [`crate::ProcessedData`].
//!
//! Drawing itself lives outside this crate; this module only resolves what
//! each cell should look like and dispatches cell interactions.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;

use crate::labels::aria_label;
use crate::level::ContributionLevel;
use crate::reconcile::ContributionRecord;
use crate::theme::{resolve_theme, ThemeColors, ThemeMode, ThemeSelection};

/// Called with the cell's date and count.
pub type CellHandler = Arc<dyn Fn(NaiveDate, u32) + Send + Sync>;

#[derive(Clone)]
pub struct RenderOptions {
    pub cell_size: u32,
    pub cell_radius: u32,
    pub show_tooltip: bool,
    pub show_month_labels: bool,
    pub show_weekday_labels: bool,
    pub show_legend: bool,
    pub theme: ThemeSelection,
    pub theme_mode: ThemeMode,
    pub on_cell_click: Option<CellHandler>,
    pub on_cell_hover: Option<CellHandler>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            cell_size: 12,
            cell_radius: 2,
            show_tooltip: true,
            show_month_labels: true,
            show_weekday_labels: true,
            show_legend: true,
            theme: ThemeSelection::default(),
            theme_mode: ThemeMode::default(),
            on_cell_click: None,
            on_cell_hover: None,
        }
    }
}

impl std::fmt::Debug for RenderOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderOptions")
            .field("cell_size", &self.cell_size)
            .field("cell_radius", &self.cell_radius)
            .field("show_tooltip", &self.show_tooltip)
            .field("show_month_labels", &self.show_month_labels)
            .field("show_weekday_labels", &self.show_weekday_labels)
            .field("show_legend", &self.show_legend)
            .field("theme", &self.theme)
            .field("theme_mode", &self.theme_mode)
            .field("on_cell_click", &self.on_cell_click.as_ref().map(|_| "<handler>"))
            .field("on_cell_hover", &self.on_cell_hover.as_ref().map(|_| "<handler>"))
            .finish()
    }
}

/// Everything a renderer needs to draw one cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CellProps {
    pub date: NaiveDate,
    pub count: u32,
    pub level: ContributionLevel,
    pub size: u32,
    pub radius: u32,
    pub color: String,
    pub aria_label: String,
    /// True when a click handler is attached.
    pub interactive: bool,
}

impl RenderOptions {
    #[must_use]
    pub fn with_on_cell_click<F>(mut self, handler: F) -> Self
    where
        F: Fn(NaiveDate, u32) + Send + Sync + 'static,
    {
        self.on_cell_click = Some(Arc::new(handler));
        self
    }

    #[must_use]
    pub fn with_on_cell_hover<F>(mut self, handler: F) -> Self
    where
        F: Fn(NaiveDate, u32) + Send + Sync + 'static,
    {
        self.on_cell_hover = Some(Arc::new(handler));
        self
    }

    /// Gap between cells: a fifth of the cell size, never below 2.
    #[must_use]
    pub fn cell_gap(&self) -> u32 {
        (self.cell_size / 5).max(2)
    }

    /// Width and height of the cell area for `week_count` columns of seven rows.
    #[must_use]
    pub fn grid_size(&self, week_count: usize) -> (u32, u32) {
        let pitch = self.cell_size + self.cell_gap();
        let columns = u32::try_from(week_count).unwrap_or(u32::MAX);
        let width = columns.saturating_mul(pitch).saturating_sub(self.cell_gap());
        let height = 7 * pitch - self.cell_gap();
        (width, height)
    }

    #[must_use]
    pub fn theme_colors(&self) -> ThemeColors {
        resolve_theme(&self.theme, self.theme_mode)
    }

    #[must_use]
    pub fn cell_props(&self, record: &ContributionRecord, theme: &ThemeColors) -> CellProps {
        CellProps {
            date: record.date,
            count: record.count,
            level: record.level,
            size: self.cell_size,
            radius: self.cell_radius,
            color: theme.level_color(record.level).to_owned(),
            aria_label: aria_label(record.date, record.count),
            interactive: self.on_cell_click.is_some(),
        }
    }

    /// Fires the click handler, if any. Returns whether one ran.
    pub fn click(&self, record: &ContributionRecord) -> bool {
        Self::dispatch(self.on_cell_click.as_ref(), record)
    }

    /// Fires the hover handler, if any. Returns whether one ran.
    pub fn hover(&self, record: &ContributionRecord) -> bool {
        Self::dispatch(self.on_cell_hover.as_ref(), record)
    }

    fn dispatch(handler: Option<&CellHandler>, record: &ContributionRecord) -> bool {
        let Some(handler) = handler else {
            return false;
        };
        handler(record.date, record.count);
        true
    }
}
