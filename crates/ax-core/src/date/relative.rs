use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

static RE_LEADING_COUNT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*(\d+)").unwrap());

/// Age assigned to relative-date strings with unrecognized units.
///
/// Sorts worse than any recognized age. Unrecognized strings are NOT parsed
/// further; changing this would change observable sort order.
pub const AGE_SENTINEL_DAYS: i64 = 999;

/// Normalize a relative-age string ("Just now", "3 days ago", "2 weeks ago",
/// "1 month ago") to an age in days.
///
/// Vocabulary: "just now" -> 0, "N day(s)" -> N, "N week(s)" -> 7N,
/// "N month(s)" -> 30N, anything else -> [`AGE_SENTINEL_DAYS`].
pub fn normalize_age(posted: &str) -> i64 {
    let lower = posted.to_lowercase();

    if lower.contains("just now") {
        return 0;
    }
    if lower.contains("day") {
        return leading_number(&lower);
    }
    if lower.contains("week") {
        return leading_number(&lower) * 7;
    }
    if lower.contains("month") {
        return leading_number(&lower) * 30;
    }

    AGE_SENTINEL_DAYS
}

/// Leading count in the string; 0 when it does not start with digits
/// (mirrors `parseInt(...) || 0`).
fn leading_number(lower: &str) -> i64 {
    RE_LEADING_COUNT
        .captures(lower)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0)
}

/// Parse an event-style absolute date such as "Dec 10, 2024".
pub fn parse_event_date(raw: &str) -> Option<NaiveDate> {
    const FORMATS: [&str; 2] = ["%b %d, %Y", "%B %d, %Y"];

    let trimmed = raw.trim();
    FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
}

/// Whole days elapsed from `date` to `today`, clamped at 0 for future dates.
pub fn age_in_days(date: NaiveDate, today: NaiveDate) -> i64 {
    (today - date).num_days().max(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_known_vocabulary() {
        assert_eq!(normalize_age("Just now"), 0);
        assert_eq!(normalize_age("1 day ago"), 1);
        assert_eq!(normalize_age("3 days ago"), 3);
        assert_eq!(normalize_age("1 week ago"), 7);
        assert_eq!(normalize_age("2 weeks ago"), 14);
        assert_eq!(normalize_age("1 month ago"), 30);
        assert_eq!(normalize_age("6 months ago"), 180);
    }

    #[test]
    fn unrecognized_units_hit_the_sentinel() {
        assert!(normalize_age("garbage") >= 999);
        assert!(normalize_age("Yesterday") >= 999);
        assert!(normalize_age("2 years ago") >= 999);
        assert!(normalize_age("") >= 999);
    }

    #[test]
    fn missing_leading_number_counts_as_zero() {
        assert_eq!(normalize_age("some days ago"), 0);
        assert_eq!(normalize_age("a week ago"), 0);
    }

    #[test]
    fn normalization_is_case_insensitive() {
        assert_eq!(normalize_age("JUST NOW"), 0);
        assert_eq!(normalize_age("2 Weeks Ago"), 14);
    }

    #[test]
    fn parses_event_dates() {
        let date = parse_event_date("Dec 10, 2024").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 12, 10).unwrap());

        let long = parse_event_date("December 10, 2024").unwrap();
        assert_eq!(long, date);

        assert!(parse_event_date("next Tuesday").is_none());
    }

    #[test]
    fn absolute_age_clamps_future_dates() {
        let today = NaiveDate::from_ymd_opt(2024, 12, 1).unwrap();
        let past = NaiveDate::from_ymd_opt(2024, 11, 28).unwrap();
        let future = NaiveDate::from_ymd_opt(2024, 12, 24).unwrap();

        assert_eq!(age_in_days(past, today), 3);
        assert_eq!(age_in_days(future, today), 0);
    }
}
