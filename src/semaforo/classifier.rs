use chrono::{Duration, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use std::ops::RangeInclusive;

use super::bucket::Bucket;
use super::calendar::{diff_days, end_of_day, parse_day, start_of_day, truncate_to_day};

/// Filter value the dashboard sends when the "Possível perda" card is clicked.
pub const POSSIBLE_LOSS_FROM: &str = "2026-01-01";

/// Overdue deadlines only count as a possible loss from this date on.
pub static POSSIBLE_LOSS_CUTOFF: Lazy<NaiveDate> =
    Lazy::new(|| NaiveDate::from_ymd_opt(2026, 1, 1).expect("valid calendar date"));

/// How far into the future a widened `Normal` query reaches. `Normal` deadlines
/// past this horizon still classify, but a bucket query never fetches them.
pub const NORMAL_HORIZON_DAYS: i64 = 365;

/// Anything carrying an optional fatal deadline.
pub trait Deadline {
    fn deadline(&self) -> Option<NaiveDate>;
}

/// Classify a deadline relative to `today`. `None` deadlines never classify.
pub fn classify(today: NaiveDate, deadline: Option<NaiveDate>) -> Option<Bucket> {
    let deadline = deadline?;
    let days = diff_days(today, start_of_day(deadline));

    match days {
        d if d < 0 => (deadline >= *POSSIBLE_LOSS_CUTOFF).then_some(Bucket::PossibleLoss),
        0 => Some(Bucket::Critical),
        1 | 2 => Some(Bucket::Attention),
        3..=5 => Some(Bucket::Upcoming),
        _ => Some(Bucket::Normal),
    }
}

/// Same as [`classify`] for timestamps; both sides are truncated to local midnight first.
pub fn classify_instant(now: NaiveDateTime, deadline: Option<NaiveDateTime>) -> Option<Bucket> {
    classify(truncate_to_day(now).date(), deadline.map(|d| truncate_to_day(d).date()))
}

/// Infer which bucket a `from`/`to` filter pair was meant to select.
///
/// The ranges tolerate one day of drift either way because the dashboard computes
/// them in the browser's timezone. Returns `None` for ranges that are plain date filters.
pub fn detect_bucket(today: NaiveDate, from: Option<&str>, to: Option<&str>) -> Option<Bucket> {
    let from = from.map(str::trim).filter(|s| !s.is_empty());
    let to = to.map(str::trim).filter(|s| !s.is_empty());

    match (from, to) {
        (Some(from), None) if from == POSSIBLE_LOSS_FROM => Some(Bucket::PossibleLoss),
        (Some(from), Some(to)) if from == to => Some(Bucket::Critical),
        (Some(from), None) => {
            let diff_from = diff_days(today, start_of_day(parse_day(from)?));
            (diff_from >= 5).then_some(Bucket::Normal)
        }
        (Some(from), Some(to)) => {
            let diff_from = diff_days(today, start_of_day(parse_day(from)?));
            let diff_to = diff_days(today, end_of_day(parse_day(to)?));

            match (diff_from, diff_to) {
                (0 | 1, 1..=3) => Some(Bucket::Attention),
                (2 | 3, 4..=6) => Some(Bucket::Upcoming),
                (f, t) if f >= 6 && t >= 6 => Some(Bucket::Normal),
                _ => None,
            }
        }
        _ => None,
    }
}

/// Inclusive deadline range containing every record of `bucket`, except `Normal`
/// deadlines more than [`NORMAL_HORIZON_DAYS`] ahead.
///
/// Deliberately loose to absorb clock skew between the API and the database;
/// callers must re-filter with [`classify`].
pub fn widen_range_for_bucket(today: NaiveDate, bucket: Bucket) -> RangeInclusive<NaiveDateTime> {
    let day = |offset: i64| today + Duration::days(offset);

    match bucket {
        Bucket::Critical => start_of_day(day(-1))..=end_of_day(day(1)),
        Bucket::Attention => start_of_day(day(-1))..=end_of_day(day(3)),
        Bucket::Upcoming => start_of_day(day(-1))..=end_of_day(day(6)),
        Bucket::Normal => start_of_day(day(5))..=end_of_day(day(NORMAL_HORIZON_DAYS)),
        Bucket::PossibleLoss => start_of_day(*POSSIBLE_LOSS_CUTOFF)..=end_of_day(day(1)),
    }
}

/// Keep only the rows whose deadline classifies into `bucket`.
pub fn retain_bucket<T: Deadline>(today: NaiveDate, rows: Vec<T>, bucket: Bucket) -> Vec<T> {
    rows.into_iter()
        .filter(|row| classify(today, row.deadline()) == Some(bucket))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> NaiveDate {
        parse_day(s).unwrap()
    }

    fn plus(today: NaiveDate, days: i64) -> NaiveDate {
        today + Duration::days(days)
    }

    struct Row(u32, Option<NaiveDate>);

    impl Deadline for Row {
        fn deadline(&self) -> Option<NaiveDate> {
            self.1
        }
    }

    #[test]
    fn classifies_forward_boundaries() {
        let today = day("2025-06-10");
        assert_eq!(classify(today, Some(today)), Some(Bucket::Critical));
        assert_eq!(classify(today, Some(plus(today, 1))), Some(Bucket::Attention));
        assert_eq!(classify(today, Some(plus(today, 2))), Some(Bucket::Attention));
        for d in 3..=5 {
            assert_eq!(classify(today, Some(plus(today, d))), Some(Bucket::Upcoming));
        }
        assert_eq!(classify(today, Some(plus(today, 6))), Some(Bucket::Normal));
        assert_eq!(classify(today, Some(plus(today, 400))), Some(Bucket::Normal));
    }

    #[test]
    fn overdue_before_cutoff_is_unclassified() {
        let today = day("2025-06-10");
        assert_eq!(classify(today, Some(day("2025-06-09"))), None);
        assert_eq!(classify(today, None), None);

        let later = day("2026-03-10");
        assert_eq!(classify(later, Some(day("2025-12-31"))), None);
    }

    #[test]
    fn overdue_after_cutoff_is_possible_loss() {
        let today = day("2026-03-10");
        assert_eq!(classify(today, Some(day("2026-01-01"))), Some(Bucket::PossibleLoss));
        assert_eq!(classify(today, Some(day("2026-03-09"))), Some(Bucket::PossibleLoss));
        assert_eq!(classify(today, Some(today)), Some(Bucket::Critical));
    }

    #[test]
    fn every_day_maps_to_at_most_one_bucket() {
        let today = day("2026-02-01");
        for offset in -60..60 {
            let deadline = plus(today, offset);
            let hits: Vec<_> = Bucket::ALL
                .iter()
                .filter(|b| retain_bucket(today, vec![Row(0, Some(deadline))], **b).len() == 1)
                .collect();
            let expected = usize::from(deadline >= *POSSIBLE_LOSS_CUTOFF || offset >= 0);
            assert_eq!(hits.len(), expected, "offset {}", offset);
        }
    }

    #[test]
    fn time_of_day_is_ignored() {
        let today = day("2025-06-10");
        let late = start_of_day(today) + Duration::hours(23) + Duration::minutes(59);
        let deadline = start_of_day(today) + Duration::hours(8);
        assert_eq!(classify_instant(late, Some(deadline)), Some(Bucket::Critical));
        assert_eq!(classify_instant(late, Some(deadline + Duration::days(1))), Some(Bucket::Attention));
    }

    #[test]
    fn scenario_from_fixed_today() {
        let today = day("2025-06-10");
        let rows = vec![
            Row(1, Some(day("2025-06-10"))),
            Row(2, Some(day("2025-06-11"))),
            Row(3, Some(day("2025-06-09"))),
            Row(4, None),
            Row(5, Some(day("2025-06-16"))),
        ];
        let buckets: Vec<_> = rows.iter().map(|r| (r.0, classify(today, r.1))).collect();
        assert_eq!(
            buckets,
            vec![
                (1, Some(Bucket::Critical)),
                (2, Some(Bucket::Attention)),
                (3, None),
                (4, None),
                (5, Some(Bucket::Normal)),
            ]
        );
    }

    #[test]
    fn detects_card_ranges() {
        let today = day("2025-06-10");
        assert_eq!(detect_bucket(today, Some("2026-01-01"), None), Some(Bucket::PossibleLoss));
        assert_eq!(detect_bucket(today, Some("2025-06-10"), Some("2025-06-10")), Some(Bucket::Critical));
        assert_eq!(detect_bucket(today, Some("1999-01-01"), Some("1999-01-01")), Some(Bucket::Critical));
        assert_eq!(detect_bucket(today, Some("2025-06-11"), Some("2025-06-12")), Some(Bucket::Attention));
        assert_eq!(detect_bucket(today, Some("2025-06-13"), Some("2025-06-15")), Some(Bucket::Upcoming));
        assert_eq!(detect_bucket(today, Some("2025-06-16"), None), Some(Bucket::Normal));
        assert_eq!(detect_bucket(today, Some("2025-06-16"), Some("2025-06-30")), Some(Bucket::Normal));
    }

    #[test]
    fn detection_tolerates_one_day_of_drift() {
        let today = day("2025-06-10");
        // Attention requested from a browser one day behind
        assert_eq!(detect_bucket(today, Some("2025-06-10"), Some("2025-06-11")), Some(Bucket::Attention));
        // Upcoming shifted back a day
        assert_eq!(detect_bucket(today, Some("2025-06-12"), Some("2025-06-14")), Some(Bucket::Upcoming));
        // Normal with from only five days out
        assert_eq!(detect_bucket(today, Some("2025-06-15"), None), Some(Bucket::Normal));
    }

    #[test]
    fn literal_ranges_are_not_buckets() {
        let today = day("2025-06-10");
        assert_eq!(detect_bucket(today, None, None), None);
        assert_eq!(detect_bucket(today, Some(""), Some("")), None);
        assert_eq!(detect_bucket(today, None, Some("2025-06-20")), None);
        assert_eq!(detect_bucket(today, Some("2025-06-12"), None), None);
        assert_eq!(detect_bucket(today, Some("2025-01-01"), Some("2025-12-31")), None);
        assert_eq!(detect_bucket(today, Some("not-a-date"), Some("2025-06-12")), None);
    }

    #[test]
    fn widened_critical_keeps_one_day_of_slack() {
        let today = day("2025-06-10");
        let range = widen_range_for_bucket(today, Bucket::Critical);
        assert!(range.contains(&start_of_day(day("2025-06-09"))));
        assert!(range.contains(&start_of_day(day("2025-06-11"))));
        assert!(range.contains(&end_of_day(day("2025-06-11"))));
        assert!(!range.contains(&start_of_day(day("2025-06-12"))));
        assert!(!range.contains(&end_of_day(day("2025-06-08"))));
    }

    #[test]
    fn widened_ranges_cover_their_bucket() {
        let today = day("2026-02-15");
        for bucket in Bucket::ALL {
            let range = widen_range_for_bucket(today, bucket);
            for offset in -60..=NORMAL_HORIZON_DAYS + 30 {
                let deadline = plus(today, offset);
                if classify(today, Some(deadline)) != Some(bucket) {
                    continue;
                }
                let covered = range.contains(&start_of_day(deadline));
                if bucket == Bucket::Normal && offset > NORMAL_HORIZON_DAYS {
                    assert!(!covered, "Normal horizon should stop before offset {}", offset);
                } else {
                    assert!(covered, "{:?} misses offset {}", bucket, offset);
                }
            }
        }
    }

    #[test]
    fn widened_literal_bounds() {
        let today = day("2025-06-10");
        assert_eq!(
            widen_range_for_bucket(today, Bucket::Normal),
            start_of_day(day("2025-06-15"))..=end_of_day(day("2026-06-10"))
        );
        assert_eq!(
            widen_range_for_bucket(today, Bucket::PossibleLoss),
            start_of_day(day("2026-01-01"))..=end_of_day(day("2025-06-11"))
        );
        assert_eq!(
            widen_range_for_bucket(today, Bucket::Upcoming),
            start_of_day(day("2025-06-09"))..=end_of_day(day("2025-06-16"))
        );
    }

    #[test]
    fn retain_drops_slack_rows() {
        let today = day("2025-06-10");
        let fetched = vec![
            Row(1, Some(day("2025-06-09"))),
            Row(2, Some(day("2025-06-10"))),
            Row(3, Some(day("2025-06-11"))),
            Row(4, None),
        ];
        let kept = retain_bucket(today, fetched, Bucket::Critical);
        assert_eq!(kept.iter().map(|r| r.0).collect::<Vec<_>>(), vec![2]);
    }
}
