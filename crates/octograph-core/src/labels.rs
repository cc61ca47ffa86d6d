//! Human-readable text for cells, tooltips and axis labels.

use chrono::NaiveDate;

pub const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

pub const WEEKDAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Weekday axis labels, Sunday first.
#[must_use]
pub fn weekday_labels() -> [&'static str; 7] {
    WEEKDAY_NAMES
}

#[must_use]
pub fn month_labels() -> [&'static str; 12] {
    MONTH_NAMES
}

/// `2024-01-05` → `"Jan 5, 2024"`.
#[must_use]
pub fn format_tooltip_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

#[must_use]
pub fn format_contribution_text(count: u32) -> String {
    match count {
        0 => "No contributions".to_owned(),
        1 => "1 contribution".to_owned(),
        n => format!("{n} contributions"),
    }
}

/// Accessible description of a single cell.
#[must_use]
pub fn aria_label(date: NaiveDate, count: u32) -> String {
    format!(
        "{} on {}",
        format_contribution_text(count),
        format_tooltip_date(date)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn tooltip_date_has_no_zero_padding() {
        assert_eq!(format_tooltip_date(date("2024-01-05")), "Jan 5, 2024");
        assert_eq!(format_tooltip_date(date("2023-12-25")), "Dec 25, 2023");
    }

    #[test]
    fn contribution_text_pluralizes() {
        assert_eq!(format_contribution_text(0), "No contributions");
        assert_eq!(format_contribution_text(1), "1 contribution");
        assert_eq!(format_contribution_text(12), "12 contributions");
    }

    #[test]
    fn aria_label_combines_both() {
        assert_eq!(
            aria_label(date("2024-02-29"), 3),
            "3 contributions on Feb 29, 2024"
        );
    }

    #[test]
    fn labels_start_on_sunday_and_january() {
        assert_eq!(weekday_labels()[0], "Sun");
        assert_eq!(weekday_labels()[6], "Sat");
        assert_eq!(month_labels()[0], "Jan");
        assert_eq!(month_labels()[11], "Dec");
    }
}
