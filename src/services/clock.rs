//! Injectable time source
//!
//! Every status derivation takes `now` as a value; services obtain it from
//! this trait so tests can pin the clock instead of racing the wall clock.

use chrono::{DateTime, Utc};

#[cfg_attr(test, mockall::automock)]
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Production clock reading the system time
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::sync::Arc;

    #[test]
    fn test_mock_clock_pins_time() {
        let pinned = Utc.with_ymd_and_hms(2025, 6, 10, 7, 0, 0).unwrap();
        let mut mock = MockClock::new();
        mock.expect_now().return_const(pinned);

        let clock: Arc<dyn Clock> = Arc::new(mock);
        assert_eq!(clock.now(), pinned);
        assert_eq!(clock.now(), pinned);
    }
}
