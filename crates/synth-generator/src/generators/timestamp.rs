//! Timestamp value generators.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;

/// Generate a random timestamp in `[start, end]` at whole-second precision.
///
/// Returns `start` when the range is empty or inverted.
pub fn between<R: Rng>(rng: &mut R, start: DateTime<Utc>, end: DateTime<Utc>) -> DateTime<Utc> {
    let start_ts = start.timestamp();
    let end_ts = end.timestamp();

    if start_ts >= end_ts {
        return start;
    }

    let random_ts = rng.gen_range(start_ts..=end_ts);
    DateTime::from_timestamp(random_ts, 0).unwrap_or(start)
}

/// Generate a random timestamp within the `days` days before `now`.
pub fn within_last_days<R: Rng>(rng: &mut R, now: DateTime<Utc>, days: i64) -> DateTime<Utc> {
    between(rng, now - Duration::days(days), now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_between_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(42);
        let start = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 12, 31, 23, 59, 59).unwrap();

        for _ in 0..200 {
            let ts = between(&mut rng, start, end);
            assert!(ts >= start && ts <= end);
        }
    }

    #[test]
    fn test_inverted_range_returns_start() {
        let mut rng = StdRng::seed_from_u64(42);
        let start = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();

        assert_eq!(between(&mut rng, start, end), start);
        assert_eq!(between(&mut rng, start, start), start);
    }

    #[test]
    fn test_within_last_days() {
        let mut rng = StdRng::seed_from_u64(42);
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();

        for _ in 0..100 {
            let ts = within_last_days(&mut rng, now, 90);
            assert!(ts <= now);
            assert!(ts >= now - Duration::days(90));
        }
    }

    #[test]
    fn test_deterministic_generation() {
        let mut rng1 = StdRng::seed_from_u64(42);
        let mut rng2 = StdRng::seed_from_u64(42);
        let start = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 12, 31, 0, 0, 0).unwrap();

        assert_eq!(between(&mut rng1, start, end), between(&mut rng2, start, end));
    }
}
