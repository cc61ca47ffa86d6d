//! Colour themes and typed partial overrides.

use serde::{Deserialize, Serialize};

use crate::level::ContributionLevel;

pub const DEFAULT_THEME: &str = "github";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelColors {
    pub none: String,
    pub low: String,
    pub medium: String,
    pub high: String,
    pub max: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeColors {
    pub background: String,
    pub foreground: String,
    pub border: String,
    pub muted: String,
    pub muted_foreground: String,
    pub card: String,
    pub card_foreground: String,
    pub primary: String,
    pub primary_foreground: String,
    pub secondary: String,
    pub secondary_foreground: String,
    pub accent: String,
    pub accent_foreground: String,
    pub destructive: String,
    pub destructive_foreground: String,
    pub ring: String,
    pub levels: LevelColors,
}

impl ThemeColors {
    #[must_use]
    pub fn level_color(&self, level: ContributionLevel) -> &str {
        match level {
            ContributionLevel::None => &self.levels.none,
            ContributionLevel::Low => &self.levels.low,
            ContributionLevel::Medium => &self.levels.medium,
            ContributionLevel::High => &self.levels.high,
            ContributionLevel::Max => &self.levels.max,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelOverride {
    pub none: Option<String>,
    pub low: Option<String>,
    pub medium: Option<String>,
    pub high: Option<String>,
    pub max: Option<String>,
}

/// A partial theme: every present field replaces the base value.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ThemeOverride {
    pub background: Option<String>,
    pub foreground: Option<String>,
    pub border: Option<String>,
    pub muted: Option<String>,
    pub muted_foreground: Option<String>,
    pub card: Option<String>,
    pub card_foreground: Option<String>,
    pub primary: Option<String>,
    pub primary_foreground: Option<String>,
    pub secondary: Option<String>,
    pub secondary_foreground: Option<String>,
    pub accent: Option<String>,
    pub accent_foreground: Option<String>,
    pub destructive: Option<String>,
    pub destructive_foreground: Option<String>,
    pub ring: Option<String>,
    pub levels: Option<LevelOverride>,
}

/// Either a built-in theme by name or overrides on top of the default theme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThemeSelection {
    Named(String),
    Custom(ThemeOverride),
}

impl Default for ThemeSelection {
    fn default() -> Self {
        Self::Named(DEFAULT_THEME.to_owned())
    }
}

fn pick(base: &str, over: Option<&String>) -> String {
    over.map_or_else(|| base.to_owned(), Clone::clone)
}

/// Applies `over` on top of `base`, field by field. Override wins when present.
#[must_use]
pub fn merge_theme(base: &ThemeColors, over: &ThemeOverride) -> ThemeColors {
    let levels = over.levels.clone().unwrap_or_default();
    ThemeColors {
        background: pick(&base.background, over.background.as_ref()),
        foreground: pick(&base.foreground, over.foreground.as_ref()),
        border: pick(&base.border, over.border.as_ref()),
        muted: pick(&base.muted, over.muted.as_ref()),
        muted_foreground: pick(&base.muted_foreground, over.muted_foreground.as_ref()),
        card: pick(&base.card, over.card.as_ref()),
        card_foreground: pick(&base.card_foreground, over.card_foreground.as_ref()),
        primary: pick(&base.primary, over.primary.as_ref()),
        primary_foreground: pick(&base.primary_foreground, over.primary_foreground.as_ref()),
        secondary: pick(&base.secondary, over.secondary.as_ref()),
        secondary_foreground: pick(&base.secondary_foreground, over.secondary_foreground.as_ref()),
        accent: pick(&base.accent, over.accent.as_ref()),
        accent_foreground: pick(&base.accent_foreground, over.accent_foreground.as_ref()),
        destructive: pick(&base.destructive, over.destructive.as_ref()),
        destructive_foreground: pick(
            &base.destructive_foreground,
            over.destructive_foreground.as_ref(),
        ),
        ring: pick(&base.ring, over.ring.as_ref()),
        levels: LevelColors {
            none: pick(&base.levels.none, levels.none.as_ref()),
            low: pick(&base.levels.low, levels.low.as_ref()),
            medium: pick(&base.levels.medium, levels.medium.as_ref()),
            high: pick(&base.levels.high, levels.high.as_ref()),
            max: pick(&base.levels.max, levels.max.as_ref()),
        },
    }
}

#[must_use]
pub fn theme_names() -> &'static [&'static str] {
    &[DEFAULT_THEME]
}

#[must_use]
pub fn is_valid_theme_name(name: &str) -> bool {
    theme_names().contains(&name)
}

/// Looks up a built-in theme. Unknown names fall back to the default theme.
#[must_use]
pub fn get_theme(name: &str, mode: ThemeMode) -> ThemeColors {
    builtin(name, mode).unwrap_or_else(|| github(mode))
}

fn builtin(name: &str, mode: ThemeMode) -> Option<ThemeColors> {
    match name {
        DEFAULT_THEME => Some(github(mode)),
        _ => None,
    }
}

/// Resolves a selection against the built-in themes for `mode`.
#[must_use]
pub fn resolve_theme(selection: &ThemeSelection, mode: ThemeMode) -> ThemeColors {
    match selection {
        ThemeSelection::Named(name) => get_theme(name, mode),
        ThemeSelection::Custom(over) => merge_theme(&get_theme(DEFAULT_THEME, mode), over),
    }
}

fn github(mode: ThemeMode) -> ThemeColors {
    let s = str::to_owned;
    match mode {
        ThemeMode::Light => ThemeColors {
            background: s("#ffffff"),
            foreground: s("#24292f"),
            border: s("#d0d7de"),
            muted: s("#f6f8fa"),
            muted_foreground: s("#57606a"),
            card: s("#ffffff"),
            card_foreground: s("#24292f"),
            primary: s("#0969da"),
            primary_foreground: s("#ffffff"),
            secondary: s("#f6f8fa"),
            secondary_foreground: s("#24292f"),
            accent: s("#ddf4ff"),
            accent_foreground: s("#0969da"),
            destructive: s("#cf222e"),
            destructive_foreground: s("#ffffff"),
            ring: s("#0969da"),
            levels: LevelColors {
                none: s("#ebedf0"),
                low: s("#9be9a8"),
                medium: s("#40c463"),
                high: s("#30a14e"),
                max: s("#216e39"),
            },
        },
        ThemeMode::Dark => ThemeColors {
            background: s("#0d1117"),
            foreground: s("#c9d1d9"),
            border: s("#30363d"),
            muted: s("#161b22"),
            muted_foreground: s("#8b949e"),
            card: s("#0d1117"),
            card_foreground: s("#c9d1d9"),
            primary: s("#58a6ff"),
            primary_foreground: s("#0d1117"),
            secondary: s("#161b22"),
            secondary_foreground: s("#c9d1d9"),
            accent: s("#1f6feb"),
            accent_foreground: s("#ffffff"),
            destructive: s("#f85149"),
            destructive_foreground: s("#ffffff"),
            ring: s("#58a6ff"),
            levels: LevelColors {
                none: s("#161b22"),
                low: s("#0e4429"),
                medium: s("#006d32"),
                high: s("#26a641"),
                max: s("#39d353"),
            },
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_override_is_identity() {
        let base = get_theme(DEFAULT_THEME, ThemeMode::Light);
        assert_eq!(merge_theme(&base, &ThemeOverride::default()), base);
    }

    #[test]
    fn override_wins_per_field() {
        let base = get_theme(DEFAULT_THEME, ThemeMode::Dark);
        let over = ThemeOverride {
            background: Some("#000000".to_owned()),
            levels: Some(LevelOverride {
                max: Some("#ff0000".to_owned()),
                ..LevelOverride::default()
            }),
            ..ThemeOverride::default()
        };
        let merged = merge_theme(&base, &over);
        assert_eq!(merged.background, "#000000");
        assert_eq!(merged.foreground, base.foreground);
        assert_eq!(merged.levels.max, "#ff0000");
        assert_eq!(merged.levels.none, base.levels.none);
    }

    #[test]
    fn unknown_name_falls_back_to_default() {
        assert_eq!(
            get_theme("neon", ThemeMode::Light),
            get_theme(DEFAULT_THEME, ThemeMode::Light)
        );
        assert!(!is_valid_theme_name("neon"));
    }

    #[test]
    fn custom_selection_merges_over_default() {
        let json = r##"{"levels": {"none": "#ff0000"}, "mutedForeground": "#111111"}"##;
        let over: ThemeOverride = serde_json::from_str(json).unwrap();
        let theme = resolve_theme(&ThemeSelection::Custom(over), ThemeMode::Light);
        assert_eq!(theme.level_color(ContributionLevel::None), "#ff0000");
        assert_eq!(theme.muted_foreground, "#111111");
        assert_eq!(theme.level_color(ContributionLevel::Max), "#216e39");
    }

    #[test]
    fn modes_differ() {
        assert_ne!(
            get_theme(DEFAULT_THEME, ThemeMode::Light),
            get_theme(DEFAULT_THEME, ThemeMode::Dark)
        );
    }
}
