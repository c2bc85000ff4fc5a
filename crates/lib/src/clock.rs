//! Time provider abstraction
//!
//! Every `createdAt` stamp in a basket comes from a [`Clock`]. Production code
//! uses [`SystemClock`]; tests can pin time with `FixedClock`.
//!
//! # Example
//!
//! ```
//! use harvest::{Clock, SystemClock};
//!
//! let clock = SystemClock;
//! let stamp = clock.now();
//! assert!(stamp.timestamp() > 0);
//! ```

use std::fmt::Debug;

use chrono::{DateTime, Utc};

#[cfg(any(test, feature = "testing"))]
use std::sync::Mutex;

/// A time provider for creation timestamps.
pub trait Clock: Send + Sync + Debug {
    /// Returns the current instant.
    fn now(&self) -> DateTime<Utc>;

    /// Returns the current instant as an RFC3339-formatted string.
    fn now_rfc3339(&self) -> String {
        self.now().to_rfc3339()
    }
}

/// Production clock backed by [`chrono::Utc`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Test clock that steps forward by one millisecond on every read.
///
/// Timestamps handed out by a single `FixedClock` are strictly increasing, so
/// versions created in sequence can be ordered by `createdAt`. Use
/// [`FixedClock::hold`] to freeze it.
///
/// ```
/// use harvest::{Clock, FixedClock};
///
/// let clock = FixedClock::new(1000);
/// let t1 = clock.now();
/// let t2 = clock.now();
/// assert!(t2 > t1);
/// ```
#[cfg(any(test, feature = "testing"))]
pub struct FixedClock {
    state: Mutex<FixedClockState>,
}

#[cfg(any(test, feature = "testing"))]
struct FixedClockState {
    millis: i64,
    held: bool,
}

/// RAII guard that freezes a [`FixedClock`] while held.
#[cfg(any(test, feature = "testing"))]
pub struct ClockHold<'a>(&'a FixedClock);

#[cfg(any(test, feature = "testing"))]
impl Drop for ClockHold<'_> {
    fn drop(&mut self) {
        self.0.state.lock().unwrap().held = false;
    }
}

#[cfg(any(test, feature = "testing"))]
impl FixedClock {
    /// Create a clock starting at `millis` milliseconds since the Unix epoch.
    pub fn new(millis: i64) -> Self {
        Self {
            state: Mutex::new(FixedClockState {
                millis,
                held: false,
            }),
        }
    }

    /// Freeze the clock until the returned guard is dropped.
    pub fn hold(&self) -> ClockHold<'_> {
        self.state.lock().unwrap().held = true;
        ClockHold(self)
    }

    /// Move the clock forward by `ms` milliseconds.
    pub fn advance(&self, ms: i64) {
        self.state.lock().unwrap().millis += ms;
    }

    /// Current value in milliseconds, without stepping.
    pub fn get(&self) -> i64 {
        self.state.lock().unwrap().millis
    }
}

#[cfg(any(test, feature = "testing"))]
impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        let millis = {
            let mut state = self.state.lock().unwrap();
            let t = state.millis;
            if !state.held {
                state.millis += 1;
            }
            t
        };
        DateTime::from_timestamp_millis(millis).unwrap_or_default()
    }
}

#[cfg(any(test, feature = "testing"))]
impl Default for FixedClock {
    fn default() -> Self {
        // 2024-01-01 00:00:00 UTC
        Self::new(1704067200000)
    }
}

#[cfg(any(test, feature = "testing"))]
impl Debug for FixedClock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock().unwrap();
        f.debug_struct("FixedClock")
            .field("millis", &state.millis)
            .field("held", &state.held)
            .finish()
    }
}
