//! Discrete intensity levels derived from a day's contribution count.

use serde::{Deserialize, Serialize};

use crate::error::CalendarError;

/// Intensity bucket 0–4 used to pick a cell colour.
///
/// Serialized as its numeric value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
#[repr(u8)]
pub enum ContributionLevel {
    None = 0,
    Low = 1,
    Medium = 2,
    High = 3,
    Max = 4,
}

impl ContributionLevel {
    pub const ALL: [Self; 5] = [Self::None, Self::Low, Self::Medium, Self::High, Self::Max];

    /// Maps a count onto its level: 0 → 0, 1–3 → 1, 4–6 → 2, 7–9 → 3, ≥10 → 4.
    #[must_use]
    pub fn from_count(count: u32) -> Self {
        match count {
            0 => Self::None,
            1..=3 => Self::Low,
            4..=6 => Self::Medium,
            7..=9 => Self::High,
            _ => Self::Max,
        }
    }

    #[must_use]
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

impl From<ContributionLevel> for u8 {
    fn from(level: ContributionLevel) -> Self {
        level.as_u8()
    }
}

impl TryFrom<u8> for ContributionLevel {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .get(usize::from(value))
            .copied()
            .ok_or_else(|| format!("contribution level {value} is outside 0..=4"))
    }
}

impl std::fmt::Display for ContributionLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

/// Levels a signed count, rejecting negative values.
///
/// Counts above `u32::MAX` saturate to the top level.
///
/// # Errors
///
/// Returns [`CalendarError::InvalidCount`] when `count` is negative.
pub fn level_for_count(count: i64) -> Result<ContributionLevel, CalendarError> {
    if count < 0 {
        return Err(CalendarError::InvalidCount(count));
    }
    let count = u32::try_from(count).unwrap_or(u32::MAX);
    Ok(ContributionLevel::from_count(count))
}
