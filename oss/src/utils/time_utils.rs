use std::time::{SystemTime, SystemTimeError, UNIX_EPOCH};
use time::OffsetDateTime;

use crate::error::OssError;

fn system_seconds() -> Result<u64, SystemTimeError> {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|t| t.as_secs())
}

/// Seconds since the unix epoch. Signed URLs count their expiry from here.
#[cfg(not(test))]
pub fn current_time() -> Result<u64, SystemTimeError> {
    system_seconds()
}

/// Request date for the `Date` header and the string to sign.
pub fn now_utc() -> Result<OffsetDateTime, OssError> {
    Ok(OffsetDateTime::from_unix_timestamp(current_time()? as i64)?)
}

/// Per-thread clock override for tests; 0 means the system clock.
#[cfg(test)]
mod fixed_clock {
    use super::*;

    use std::cell::Cell;

    thread_local! {
        static FIXED_SECONDS: Cell<u64> = const { Cell::new(0) };
    }

    pub fn current_time() -> Result<u64, SystemTimeError> {
        match FIXED_SECONDS.with(Cell::get) {
            0 => system_seconds(),
            fixed => Ok(fixed),
        }
    }

    /// Puts the previous clock back when dropped.
    pub struct FixedClock {
        previous: u64,
    }

    impl Drop for FixedClock {
        fn drop(&mut self) {
            FIXED_SECONDS.with(|s| s.set(self.previous));
        }
    }

    pub fn with_timestamp(seconds: u64) -> FixedClock {
        FixedClock {
            previous: FIXED_SECONDS.with(|s| s.replace(seconds)),
        }
    }

    mod tests {
        use super::*;

        const JAN_2020: u64 = 1_577_836_800;

        #[test]
        fn system_clock_by_default() {
            let before = system_seconds().unwrap();
            assert!(current_time().unwrap() >= before);
        }

        #[test]
        fn fixed_until_dropped() {
            let before = system_seconds().unwrap();
            let clock = with_timestamp(JAN_2020);
            assert_eq!(current_time().unwrap(), JAN_2020);
            assert_eq!(now_utc().unwrap().unix_timestamp(), JAN_2020 as i64);

            drop(clock);
            assert!(current_time().unwrap() >= before);
        }

        #[test]
        fn nested_clocks_restore_in_order() {
            let _outer = with_timestamp(JAN_2020);
            {
                let _inner = with_timestamp(JAN_2020 + 60);
                assert_eq!(current_time().unwrap(), JAN_2020 + 60);
            }
            assert_eq!(current_time().unwrap(), JAN_2020);
        }
    }
}

#[cfg(test)]
pub use fixed_clock::*;
