//! Upstream contribution calendar shape, as returned by the GitHub GraphQL API.
//!
//! Deserializing into these types is the schema check: a missing field, a
//! non-integer count, an unparseable date or an unknown quartile name fails.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::level::ContributionLevel;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionCalendar {
    pub total_contributions: u64,
    pub weeks: Vec<ContributionWeek>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionWeek {
    pub contribution_days: Vec<ContributionDay>,
    pub first_day: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionDay {
    pub contribution_count: u32,
    pub date: NaiveDate,
    pub color: String,
    pub contribution_level: QuartileLevel,
}

/// GitHub's own level naming. Not used for levelling; local levels are
/// always recomputed from the count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuartileLevel {
    None,
    FirstQuartile,
    SecondQuartile,
    ThirdQuartile,
    FourthQuartile,
}

impl From<ContributionLevel> for QuartileLevel {
    fn from(level: ContributionLevel) -> Self {
        match level {
            ContributionLevel::None => Self::None,
            ContributionLevel::Low => Self::FirstQuartile,
            ContributionLevel::Medium => Self::SecondQuartile,
            ContributionLevel::High => Self::ThirdQuartile,
            ContributionLevel::Max => Self::FourthQuartile,
        }
    }
}

/// One `(date, count)` pair from the upstream provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawContribution {
    pub date: NaiveDate,
    pub count: u32,
}

impl ContributionCalendar {
    /// Flattens every week's days into raw records, in upstream order.
    #[must_use]
    pub fn raw_records(&self) -> Vec<RawContribution> {
        self.weeks
            .iter()
            .flat_map(|week| week.contribution_days.iter())
            .map(|day| RawContribution {
                date: day.date,
                count: day.contribution_count,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_json() -> serde_json::Value {
        serde_json::json!({
            "totalContributions": 7,
            "weeks": [
                {
                    "firstDay": "2023-12-31",
                    "contributionDays": [
                        { "contributionCount": 0, "date": "2023-12-31", "color": "#ebedf0", "contributionLevel": "NONE" },
                        { "contributionCount": 5, "date": "2024-01-01", "color": "#40c463", "contributionLevel": "SECOND_QUARTILE" }
                    ]
                },
                {
                    "firstDay": "2024-01-07",
                    "contributionDays": [
                        { "contributionCount": 2, "date": "2024-01-07", "color": "#9be9a8", "contributionLevel": "FIRST_QUARTILE" }
                    ]
                }
            ]
        })
    }

    #[test]
    fn deserializes_camel_case_payload() {
        let cal: ContributionCalendar = serde_json::from_value(sample_json()).unwrap();
        assert_eq!(cal.total_contributions, 7);
        assert_eq!(cal.weeks.len(), 2);
        assert_eq!(
            cal.weeks[0].contribution_days[1].contribution_level,
            QuartileLevel::SecondQuartile
        );
    }

    #[test]
    fn raw_records_flatten_in_order() {
        let cal: ContributionCalendar = serde_json::from_value(sample_json()).unwrap();
        let raw = cal.raw_records();
        let dates: Vec<String> = raw.iter().map(|r| r.date.to_string()).collect();
        assert_eq!(dates, ["2023-12-31", "2024-01-01", "2024-01-07"]);
        assert_eq!(raw[1].count, 5);
    }

    #[test]
    fn unknown_quartile_is_rejected() {
        let mut json = sample_json();
        json["weeks"][0]["contributionDays"][0]["contributionLevel"] = "FIFTH_QUARTILE".into();
        assert!(serde_json::from_value::<ContributionCalendar>(json).is_err());
    }

    #[test]
    fn negative_count_is_rejected() {
        let mut json = sample_json();
        json["weeks"][0]["contributionDays"][0]["contributionCount"] = (-3).into();
        assert!(serde_json::from_value::<ContributionCalendar>(json).is_err());
    }

    #[test]
    fn malformed_date_is_rejected() {
        let mut json = sample_json();
        json["weeks"][1]["contributionDays"][0]["date"] = "January 7th".into();
        assert!(serde_json::from_value::<ContributionCalendar>(json).is_err());
    }
}
