//! Client-side approximation of the server's rate limit.
//!
//! The server owns the real window; this tracker only mirrors it closely
//! enough to skip requests that are certain to be refused.

use std::time::Duration;

use tokio::time::Instant;

use crate::{Error, Result};

/// How many requests the server allows per window.
pub const DEFAULT_QUOTA_LIMIT: u8 = 10;

/// Fallback reset window applied when the server does not say how long to
/// wait.
pub const RESET_WINDOW_SECS: u64 = 60;

//////////////////////////////////////////// QuotaTracker /////////////////////////////////////////

/// Tracks how many sends remain before the server would refuse us.
///
/// The count decrements on each successful send and drops to zero when the
/// server returns 429. Once a reset deadline is known and still in the
/// future, [`QuotaTracker::check`] refuses locally without touching the
/// network. When the deadline passes the tracker refills to its limit.
#[derive(Debug)]
pub struct QuotaTracker {
    limit: u8,
    remaining: u8,
    reset_at: Option<Instant>,
}

impl QuotaTracker {
    /// Creates a tracker with the given per-window limit.
    pub fn new(limit: u8) -> Self {
        Self {
            limit,
            remaining: limit,
            reset_at: None,
        }
    }

    /// The per-window limit this tracker was created with.
    pub fn limit(&self) -> u8 {
        self.limit
    }

    /// How many sends remain in the current window.
    ///
    /// An elapsed reset deadline reads as a full refill even before a
    /// mutating call observes it.
    pub fn remaining(&self) -> u8 {
        match self.reset_at {
            Some(reset_at) if Instant::now() >= reset_at => self.limit,
            _ => self.remaining,
        }
    }

    /// Time until the tracker refills, when a reset deadline is pending.
    pub fn reset_in(&self) -> Option<Duration> {
        let remaining = self.reset_at?.checked_duration_since(Instant::now())?;
        if remaining.is_zero() {
            None
        } else {
            Some(remaining)
        }
    }

    /// Refuses locally when the quota is exhausted and the reset deadline has
    /// not passed yet.
    ///
    /// An exhausted count with no known deadline does not refuse: the server
    /// may have reset its window already, and the next 429 will teach us the
    /// real deadline.
    pub fn check(&mut self) -> Result<()> {
        self.refill_if_elapsed();
        if self.remaining == 0 {
            if let Some(wait) = self.reset_in() {
                return Err(Error::rate_limited(
                    "local quota exhausted",
                    Some(ceil_secs(wait)),
                ));
            }
        }
        Ok(())
    }

    /// Records a send the server accepted.
    pub fn record_success(&mut self) {
        self.refill_if_elapsed();
        self.remaining = self.remaining.saturating_sub(1);
    }

    /// Records a 429 from the server.
    ///
    /// `retry_after` is the server's Retry-After value in seconds when it sent
    /// one; otherwise the fallback window applies.
    pub fn record_rate_limited(&mut self, retry_after: Option<u64>) {
        self.remaining = 0;
        let wait = Duration::from_secs(retry_after.unwrap_or(RESET_WINDOW_SECS));
        self.reset_at = Some(Instant::now() + wait);
    }

    fn refill_if_elapsed(&mut self) {
        if let Some(reset_at) = self.reset_at {
            if Instant::now() >= reset_at {
                self.remaining = self.limit;
                self.reset_at = None;
            }
        }
    }
}

impl Default for QuotaTracker {
    fn default() -> Self {
        Self::new(DEFAULT_QUOTA_LIMIT)
    }
}

fn ceil_secs(duration: Duration) -> u64 {
    let secs = duration.as_secs();
    if duration.subsec_nanos() > 0 {
        secs + 1
    } else {
        secs
    }
}

/////////////////////////////////////////////// tests /////////////////////////////////////////////
