//! Timestamp utilities

use chrono::{DateTime, TimeDelta, Utc};

/// Get current UTC timestamp
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Convert whole seconds to a signed time delta
///
/// Returns `None` when the value does not fit chrono's representable range.
pub fn secs_to_delta(secs: u64) -> Option<TimeDelta> {
    i64::try_from(secs).ok().and_then(TimeDelta::try_seconds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_now_returns_valid_timestamp() {
        let timestamp = now();
        // After 2000-01-01 00:00:00 UTC
        assert!(timestamp.timestamp() > 946_684_800);
    }

    #[tokio::test]
    async fn test_now_successive_calls_advance() {
        let time1 = now();
        tokio::time::sleep(Duration::from_millis(10)).await;
        let time2 = now();
        assert!(time2 > time1);
    }

    #[test]
    fn test_secs_to_delta_zero() {
        assert_eq!(secs_to_delta(0), Some(TimeDelta::zero()));
    }

    #[test]
    fn test_secs_to_delta_ten_minutes() {
        let delta = secs_to_delta(600).unwrap();
        assert_eq!(delta.num_seconds(), 600);
        assert_eq!(delta.num_minutes(), 10);
    }

    #[test]
    fn test_secs_to_delta_out_of_range() {
        // Should reject without panicking
        assert_eq!(secs_to_delta(u64::MAX), None);
        assert_eq!(secs_to_delta(i64::MAX as u64), None);
    }
}
