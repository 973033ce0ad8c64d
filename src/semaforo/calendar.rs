use chrono::{Duration, Local, NaiveDate, NaiveDateTime, NaiveTime};

pub const MS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Current calendar day in server-local time.
///
/// Only request boundaries call this; everything below them takes `today` as an argument.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Drop the time-of-day component. All local-midnight truncation goes through here.
pub fn truncate_to_day(at: NaiveDateTime) -> NaiveDateTime {
    start_of_day(at.date())
}

pub fn start_of_day(day: NaiveDate) -> NaiveDateTime {
    day.and_time(NaiveTime::MIN)
}

/// Last representable millisecond of `day` (23:59:59.999).
pub fn end_of_day(day: NaiveDate) -> NaiveDateTime {
    start_of_day(day) + Duration::milliseconds(MS_PER_DAY - 1)
}

/// Days from local midnight of `today` to `at`, rounded up.
///
/// Rounding up matters for instants that are not midnight: 23:59:59.999 two days
/// out counts as 3.
pub fn diff_days(today: NaiveDate, at: NaiveDateTime) -> i64 {
    let ms = (at - start_of_day(today)).num_milliseconds();
    let whole = ms.div_euclid(MS_PER_DAY);
    if ms.rem_euclid(MS_PER_DAY) == 0 { whole } else { whole + 1 }
}

/// Parse a `YYYY-MM-DD` filter value.
pub fn parse_day(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> NaiveDate {
        parse_day(s).unwrap()
    }

    #[test]
    fn diff_days_counts_whole_days() {
        let today = day("2025-06-10");
        assert_eq!(diff_days(today, start_of_day(day("2025-06-10"))), 0);
        assert_eq!(diff_days(today, start_of_day(day("2025-06-12"))), 2);
        assert_eq!(diff_days(today, start_of_day(day("2025-06-07"))), -3);
    }

    #[test]
    fn diff_days_rounds_partial_days_up() {
        let today = day("2025-06-10");
        assert_eq!(diff_days(today, end_of_day(day("2025-06-10"))), 1);
        assert_eq!(diff_days(today, end_of_day(day("2025-06-12"))), 3);
        // Half a day in the past rounds toward zero
        let noon_yesterday = start_of_day(day("2025-06-09")) + Duration::hours(12);
        assert_eq!(diff_days(today, noon_yesterday), 0);
    }

    #[test]
    fn truncate_strips_time() {
        let at = start_of_day(day("2025-06-10")) + Duration::hours(17) + Duration::minutes(3);
        assert_eq!(truncate_to_day(at), start_of_day(day("2025-06-10")));
    }

    #[test]
    fn parse_day_rejects_garbage() {
        assert!(parse_day("2025-13-01").is_none());
        assert!(parse_day("10/06/2025").is_none());
        assert_eq!(parse_day(" 2025-06-10 "), Some(day("2025-06-10")));
    }
}
