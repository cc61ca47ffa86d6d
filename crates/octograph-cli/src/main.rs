mod output;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use chrono::{Datelike, NaiveDate, Utc};
use clap::{Args, Parser, Subcommand, ValueEnum};
use octograph_core::{
    generate_mock_calendar, get_theme, load_app_config_with_overrides, parse_cache_duration,
    process_contribution_range, theme_names, AppConfig, CacheDuration, CalendarSpan,
    ContributionCalendar, ContributionLevel, ThemeMode, TimeRange,
};
use octograph_github::{ContributionCache, ContributionFetcher, FetchRequest, QueryState};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

use crate::output::{print_processed, OutputArgs};

#[derive(Debug, Parser)]
#[command(name = "octograph")]
#[command(about = "GitHub contribution calendar pipeline")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch a user's contribution calendar from GitHub
    Fetch {
        /// GitHub login
        username: String,
        #[command(flatten)]
        span: SpanArgs,
        /// Freshness window, e.g. 30s, 10m, 1d (defaults to OCTOGRAPH_CACHE_DURATION)
        #[arg(long)]
        cache_duration: Option<String>,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Process a generated calendar without touching the network
    Demo {
        /// Calendar year (defaults to the current year)
        #[arg(long)]
        year: Option<i32>,
        /// Seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Process a calendar JSON file without touching the network
    Process {
        /// File holding an upstream-shaped contribution calendar
        file: PathBuf,
        #[command(flatten)]
        span: SpanArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// List built-in themes and their level colours
    Themes {
        #[arg(long, value_enum, default_value_t = ModeArg::Light)]
        mode: ModeArg,
    },
}

/// Either a year or an explicit inclusive date range.
#[derive(Debug, Clone, Default, Args)]
struct SpanArgs {
    /// Calendar year to show
    #[arg(long, conflicts_with_all = ["from", "to"])]
    year: Option<i32>,
    /// First day of an explicit range (YYYY-MM-DD)
    #[arg(long, requires = "to")]
    from: Option<NaiveDate>,
    /// Last day of an explicit range (YYYY-MM-DD)
    #[arg(long, requires = "from")]
    to: Option<NaiveDate>,
}

impl SpanArgs {
    /// Explicit range first, then `--year`, then `default_year`.
    fn to_span(&self, default_year: i32) -> anyhow::Result<CalendarSpan> {
        match (self.from, self.to) {
            (Some(from), Some(to)) => Ok(TimeRange::new(from, to)?.into()),
            _ => Ok(CalendarSpan::Year(self.year.unwrap_or(default_year))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ModeArg {
    Light,
    Dark,
}

impl From<ModeArg> for ThemeMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Light => Self::Light,
            ModeArg::Dark => Self::Dark,
        }
    }
}

fn current_year() -> i32 {
    Utc::now().year()
}

/// `RUST_LOG` first, then `OCTOGRAPH_LOG_LEVEL`, then `info`.
fn log_filter() -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| {
            let level =
                std::env::var("OCTOGRAPH_LOG_LEVEL").unwrap_or_else(|_| "info".to_owned());
            EnvFilter::try_new(level)
        })
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter())
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Some(Commands::Fetch {
            username,
            span,
            cache_duration,
            output,
        }) => {
            let config = load_fetch_config(cache_duration.as_deref())?;
            run_fetch(&config, &username, &span, &output).await
        }
        Some(Commands::Demo { year, seed, output }) => run_demo(year, seed, &output),
        Some(Commands::Process { file, span, output }) => run_process(&file, &span, &output),
        Some(Commands::Themes { mode }) => {
            run_themes(mode.into());
            Ok(())
        }
        None => {
            println!("octograph: run `octograph --help` for usage");
            Ok(())
        }
    }
}

/// Reads config from the environment, with `--cache-duration` replacing
/// `OCTOGRAPH_CACHE_DURATION` when given.
fn load_fetch_config(cache_duration: Option<&str>) -> anyhow::Result<AppConfig> {
    let mut overrides = Vec::new();
    if let Some(raw) = cache_duration {
        parse_cache_duration(raw).context("invalid --cache-duration")?;
        overrides.push(("OCTOGRAPH_CACHE_DURATION", raw));
    }
    Ok(load_app_config_with_overrides(&overrides)?)
}

async fn run_fetch(
    config: &AppConfig,
    username: &str,
    span: &SpanArgs,
    output: &OutputArgs,
) -> anyhow::Result<()> {
    let cache_ms = u64::try_from(config.cache_duration.as_millis()).unwrap_or(u64::MAX);
    let request = FetchRequest::new(username, span.to_span(current_year())?)?
        .with_cache_duration(CacheDuration::Millis(cache_ms))?;

    let fetcher = ContributionFetcher::from_config(config, Arc::new(ContributionCache::new()))?;
    let calendar = match fetcher.fetch_contributions(&request).await {
        QueryState::Success { data, .. } => data,
        QueryState::Error(err) => {
            return Err(err).with_context(|| format!("fetching contributions for {username}"))
        }
        QueryState::Idle | QueryState::Loading => {
            anyhow::bail!("no contributions requested: username is empty")
        }
    };

    let processed = process_contribution_range(&calendar, *request.range());
    print_processed(&processed, request.username(), output)
}

fn run_demo(year: Option<i32>, seed: Option<u64>, output: &OutputArgs) -> anyhow::Result<()> {
    let year = year.unwrap_or_else(current_year);
    let mut rng = seed.map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);
    let calendar = generate_mock_calendar(year, &mut rng)?;
    let range = TimeRange::for_year(year)?;
    let processed = process_contribution_range(&calendar, range);
    print_processed(&processed, "demo", output)
}

fn run_process(file: &Path, span: &SpanArgs, output: &OutputArgs) -> anyhow::Result<()> {
    let raw = std::fs::read_to_string(file)
        .with_context(|| format!("reading calendar file {}", file.display()))?;
    let calendar: ContributionCalendar = serde_json::from_str(&raw)
        .with_context(|| format!("parsing calendar file {}", file.display()))?;

    let default_year = latest_year(&calendar).unwrap_or_else(current_year);
    let range = span.to_span(default_year)?.resolve()?;

    let state = QueryState::supplied(calendar);
    let calendar = state
        .data()
        .context("supplied calendar should always be available")?;
    let processed = process_contribution_range(calendar, range);
    print_processed(&processed, &file.display().to_string(), output)
}

/// Year of the most recent day in the calendar.
fn latest_year(calendar: &ContributionCalendar) -> Option<i32> {
    calendar
        .raw_records()
        .iter()
        .map(|r| r.date)
        .max()
        .map(|d| d.year())
}

fn run_themes(mode: ThemeMode) {
    for name in theme_names() {
        let theme = get_theme(name, mode);
        let swatches = ContributionLevel::ALL
            .iter()
            .map(|level| theme.level_color(*level))
            .collect::<Vec<_>>()
            .join(" ");
        println!("{name:<12}{swatches}");
    }
}

#[cfg(test)]
mod tests;
