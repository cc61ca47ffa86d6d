//! Text and JSON rendering of processed calendars.

use chrono::Datelike;
use clap::Args;
use octograph_core::{
    format_tooltip_date, weekday_labels, ContributionLevel, ProcessedData, RenderOptions,
    ThemeColors, ThemeMode,
};

const LEVEL_GLYPHS: [char; 5] = ['·', '░', '▒', '▓', '█'];
const GUTTER: usize = 4;

#[derive(Debug, Clone, Default, Args)]
pub(crate) struct OutputArgs {
    /// Print the processed data as JSON
    #[arg(long)]
    pub json: bool,
    /// Use the dark palette for colour hints
    #[arg(long)]
    pub dark: bool,
    /// Hide month and weekday labels
    #[arg(long)]
    pub no_labels: bool,
}

impl OutputArgs {
    pub(crate) fn render_options(&self) -> RenderOptions {
        RenderOptions {
            show_month_labels: !self.no_labels,
            show_weekday_labels: !self.no_labels,
            theme_mode: if self.dark {
                ThemeMode::Dark
            } else {
                ThemeMode::Light
            },
            ..RenderOptions::default()
        }
    }
}

/// # Errors
///
/// Returns an error if JSON serialization fails.
pub(crate) fn print_processed(
    data: &ProcessedData,
    title: &str,
    output: &OutputArgs,
) -> anyhow::Result<()> {
    if output.json {
        println!("{}", serde_json::to_string_pretty(data)?);
    } else {
        print!("{}", render_summary(data, title, &output.render_options()));
    }
    Ok(())
}

pub(crate) fn render_summary(
    data: &ProcessedData,
    title: &str,
    options: &RenderOptions,
) -> String {
    let theme = options.theme_colors();
    let mut lines = vec![
        format!(
            "{title}: {} to {}",
            format_tooltip_date(data.range_start),
            format_tooltip_date(data.range_end)
        ),
        format!(
            "Total contributions: {} ({} in range)",
            data.total_contributions,
            data.reconciled_total()
        ),
        format!(
            "Active days: {} of {}",
            data.active_days(),
            data.contributions.len()
        ),
    ];
    if let Some(day) = data.busiest_day() {
        let cell = options.cell_props(day, &theme);
        lines.push(format!("Busiest day: {} ({})", cell.aria_label, cell.color));
    }

    lines.push(String::new());
    lines.extend(render_heatmap(data, options));

    if options.show_legend {
        lines.push(String::new());
        lines.push(render_legend(&theme));
    }

    let mut text = lines.join("\n");
    text.push('\n');
    text
}

/// Seven rows, Sunday first, one column per week.
fn render_heatmap(data: &ProcessedData, options: &RenderOptions) -> Vec<String> {
    let columns = data.weeks.len();
    let lead = data.range_start.weekday().num_days_from_sunday() as usize;
    let gutter = if options.show_weekday_labels { GUTTER } else { 0 };
    let mut rows = Vec::with_capacity(8);

    if options.show_month_labels {
        let mut header = vec![' '; gutter + columns + 3];
        for month in &data.months {
            let col = gutter + (month.first_day_ordinal + lead) / 7;
            let slot = col.saturating_sub(1)..col + month.name.len();
            // Skip labels that would touch the previous one.
            if slot.end <= header.len() && header[slot].iter().all(|c| *c == ' ') {
                for (i, ch) in month.name.chars().enumerate() {
                    header[col + i] = ch;
                }
            }
        }
        rows.push(header.into_iter().collect::<String>().trim_end().to_owned());
    }

    let mut grid = vec![vec![' '; columns]; 7];
    for (col, week) in data.weeks.iter().enumerate() {
        for day in &week.days {
            let row = day.date.weekday().num_days_from_sunday() as usize;
            grid[row][col] = glyph(day.level);
        }
    }

    let labels = weekday_labels();
    for (row, cells) in grid.into_iter().enumerate() {
        let prefix = match (options.show_weekday_labels, row % 2 == 1) {
            (true, true) => format!("{:<GUTTER$}", labels[row]),
            (true, false) => " ".repeat(GUTTER),
            (false, _) => String::new(),
        };
        let cells: String = cells.into_iter().collect();
        rows.push(format!("{prefix}{}", cells.trim_end()));
    }
    rows
}

fn render_legend(theme: &ThemeColors) -> String {
    let glyphs = ContributionLevel::ALL
        .iter()
        .map(|level| glyph(*level).to_string())
        .collect::<Vec<_>>()
        .join(" ");
    let colors = ContributionLevel::ALL
        .iter()
        .map(|level| theme.level_color(*level))
        .collect::<Vec<_>>()
        .join(" ");
    format!("Less {glyphs} More   {colors}")
}

fn glyph(level: ContributionLevel) -> char {
    LEVEL_GLYPHS[usize::from(level.as_u8())]
}
