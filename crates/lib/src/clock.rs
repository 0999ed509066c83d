//! Time sources for stamping local write times.
//!
//! A pending server timestamp records when the write happened on this
//! client. [`Clock`] supplies that time so production code reads the system
//! clock while tests pin it.
//!
//! ```
//! use firestore_model::{Clock, SystemClock};
//!
//! let now = SystemClock.now_timestamp();
//! assert!(now.seconds() > 0);
//! ```

use std::fmt::Debug;

#[cfg(any(test, feature = "testing"))]
use std::sync::Mutex;

use chrono::Utc;

use crate::model::Timestamp;

/// A source of the current time.
pub trait Clock: Send + Sync + Debug {
    /// Current time as milliseconds since the Unix epoch.
    fn now_millis(&self) -> i64;

    /// Current time as a [`Timestamp`].
    ///
    /// Defaults to millisecond precision derived from [`Clock::now_millis`].
    fn now_timestamp(&self) -> Timestamp {
        Timestamp::from_millis(self.now_millis())
    }
}

/// Wall-clock time from the operating system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }

    fn now_timestamp(&self) -> Timestamp {
        Timestamp::from_datetime(Utc::now())
    }
}

/// Test clock that advances by one millisecond per reading.
///
/// Successive readings are strictly increasing unless the clock is held.
///
/// ```
/// use firestore_model::{Clock, FixedClock};
///
/// let clock = FixedClock::new(1_000);
/// assert!(clock.now_timestamp() < clock.now_timestamp());
///
/// let _hold = clock.hold();
/// assert_eq!(clock.now_millis(), clock.now_millis());
/// ```
#[cfg(any(test, feature = "testing"))]
pub struct FixedClock {
    state: Mutex<FixedClockState>,
}

#[cfg(any(test, feature = "testing"))]
#[derive(Debug)]
struct FixedClockState {
    millis: i64,
    held: bool,
}

/// Keeps a [`FixedClock`] frozen until dropped.
#[cfg(any(test, feature = "testing"))]
pub struct ClockHold<'a>(&'a FixedClock);

#[cfg(any(test, feature = "testing"))]
impl Drop for ClockHold<'_> {
    fn drop(&mut self) {
        self.0.lock().held = false;
    }
}

#[cfg(any(test, feature = "testing"))]
impl FixedClock {
    pub fn new(millis: i64) -> Self {
        Self {
            state: Mutex::new(FixedClockState {
                millis,
                held: false,
            }),
        }
    }

    /// Freezes the clock until the returned guard is dropped.
    pub fn hold(&self) -> ClockHold<'_> {
        self.lock().held = true;
        ClockHold(self)
    }

    pub fn advance(&self, ms: i64) {
        self.lock().millis += ms;
    }

    pub fn set(&self, ms: i64) {
        self.lock().millis = ms;
    }

    /// Reads the current time without advancing.
    pub fn get(&self) -> i64 {
        self.lock().millis
    }

    // A poisoned lock only means a test panicked mid-reading; the state is
    // two plain fields and stays usable.
    fn lock(&self) -> std::sync::MutexGuard<'_, FixedClockState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(any(test, feature = "testing"))]
impl Clock for FixedClock {
    fn now_millis(&self) -> i64 {
        let mut state = self.lock();
        let now = state.millis;
        if !state.held {
            state.millis += 1;
        }
        now
    }
}

#[cfg(any(test, feature = "testing"))]
impl Default for FixedClock {
    fn default() -> Self {
        // 2024-01-01T00:00:00Z
        Self::new(1_704_067_200_000)
    }
}

#[cfg(any(test, feature = "testing"))]
impl Debug for FixedClock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.lock();
        f.debug_struct("FixedClock")
            .field("millis", &state.millis)
            .field("held", &state.held)
            .finish()
    }
}
