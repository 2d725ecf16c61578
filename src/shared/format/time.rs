use chrono::{DateTime, NaiveDateTime, Utc};

/// Parse a backend timestamp. Offset-less values are taken as UTC.
pub fn parse_timestamp(timestamp: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(timestamp) {
        return Some(dt.with_timezone(&Utc));
    }
    timestamp
        .parse::<NaiveDateTime>()
        .ok()
        .map(|naive| naive.and_utc())
}

/// "just now", "5 minutes ago", "2 days ago", "3 months ago", ...
///
/// Unparseable and future timestamps are returned unchanged.
pub fn format_relative_time(timestamp: &str) -> String {
    format_relative_time_at(timestamp, Utc::now())
}

pub fn format_relative_time_at(timestamp: &str, now: DateTime<Utc>) -> String {
    let Some(parsed) = parse_timestamp(timestamp) else {
        return timestamp.to_string();
    };

    let seconds = now.signed_duration_since(parsed).num_seconds();
    if seconds < 0 {
        return timestamp.to_string();
    }

    const MINUTE: i64 = 60;
    const HOUR: i64 = 60 * MINUTE;
    const DAY: i64 = 24 * HOUR;
    const WEEK: i64 = 7 * DAY;
    const MONTH: i64 = 30 * DAY;
    const YEAR: i64 = 365 * DAY;

    let (amount, unit) = match seconds {
        s if s < MINUTE => return "just now".to_string(),
        s if s < HOUR => (s / MINUTE, "minute"),
        s if s < DAY => (s / HOUR, "hour"),
        s if s < WEEK => (s / DAY, "day"),
        s if s < MONTH => (s / WEEK, "week"),
        s if s < YEAR => (s / MONTH, "month"),
        s => (s / YEAR, "year"),
    };
    let plural = if amount == 1 { "" } else { "s" };
    format!("{amount} {unit}{plural} ago")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use rstest::rstest;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn ago(duration: Duration) -> String {
        (now() - duration).to_rfc3339()
    }

    #[rstest]
    #[case::just_now(Duration::seconds(30), "just now")]
    #[case::one_minute(Duration::minutes(1), "1 minute ago")]
    #[case::fifty_nine_minutes(Duration::minutes(59), "59 minutes ago")]
    #[case::one_hour(Duration::hours(1), "1 hour ago")]
    #[case::twenty_three_hours(Duration::hours(23), "23 hours ago")]
    #[case::one_day(Duration::days(1), "1 day ago")]
    #[case::six_days(Duration::days(6), "6 days ago")]
    #[case::one_week(Duration::weeks(1), "1 week ago")]
    #[case::four_weeks(Duration::weeks(4), "4 weeks ago")]
    #[case::two_months(Duration::days(61), "2 months ago")]
    #[case::one_year(Duration::days(400), "1 year ago")]
    fn test_relative_time(#[case] duration: Duration, #[case] expected: &str) {
        assert_eq!(format_relative_time_at(&ago(duration), now()), expected);
    }

    #[test]
    fn naive_timestamps_are_utc() {
        assert_eq!(
            format_relative_time_at("2024-06-01T09:00:00", now()),
            "3 hours ago"
        );
        assert_eq!(
            format_relative_time_at("2024-06-01T11:57:59.5", now()),
            "2 minutes ago"
        );
    }

    #[test]
    fn partial_minutes_round_down() {
        assert_eq!(
            format_relative_time_at("2024-06-01T11:58:00.123456", now()),
            "1 minute ago"
        );
    }

    #[rstest]
    #[case::invalid("invalid")]
    #[case::empty("")]
    #[case::future("2024-06-02T00:00:00Z")]
    fn test_passthrough(#[case] input: &str) {
        assert_eq!(format_relative_time_at(input, now()), input);
    }
}
