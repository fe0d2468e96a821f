//! Long-form French dates for display.

use chrono::{Datelike, NaiveDate};

const MONTHS: [&str; 12] = [
    "janvier",
    "février",
    "mars",
    "avril",
    "mai",
    "juin",
    "juillet",
    "août",
    "septembre",
    "octobre",
    "novembre",
    "décembre",
];

/// Format an ISO date (`YYYY-MM-DD`, optionally followed by a time part) as
/// `"5 mars 2024"`.
///
/// Empty input yields an empty string. Input that does not start with a valid
/// date is returned unchanged.
#[must_use]
pub fn format_date_fr(date: &str) -> String {
    let trimmed = date.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    let Some(day_part) = trimmed.get(..10) else {
        return trimmed.to_string();
    };

    match NaiveDate::parse_from_str(day_part, "%Y-%m-%d") {
        Ok(d) => format!("{} {} {}", d.day(), MONTHS[d.month0() as usize], d.year()),
        Err(_) => trimmed.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_date() {
        assert_eq!(format_date_fr("2024-03-05"), "5 mars 2024");
        assert_eq!(format_date_fr("2023-12-31"), "31 décembre 2023");
    }

    #[test]
    fn test_datetime_is_truncated_to_day() {
        assert_eq!(format_date_fr("2024-08-01T15:30:00+02:00"), "1 août 2024");
        assert_eq!(format_date_fr("2024-02-29 10:00:00"), "29 février 2024");
    }

    #[test]
    fn test_empty_and_invalid() {
        assert_eq!(format_date_fr(""), "");
        assert_eq!(format_date_fr("   "), "");
        assert_eq!(format_date_fr("hier"), "hier");
        assert_eq!(format_date_fr("2024-13-45"), "2024-13-45");
    }
}
