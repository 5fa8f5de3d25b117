//! Tick-based polling of a byte source against a matcher.
//!
//! A polling run repeatedly drains every currently-available byte through
//! the matcher, then spends one tick of its budget sleeping before the next
//! drain. The budget is a coarse integer tick count rather than a wall-clock
//! deadline: drift accumulates under load, which is acceptable for
//! seconds-scale modem handshakes and keeps tick-count-based tests
//! reproducible. Cancellation is budget exhaustion only.

use std::fmt;
use std::time::Duration;

use tracing::{debug, trace};

use crate::expect::{IncrementalMatcher, Verdict};
use crate::source::ByteSource;

/// Timeout budget for one polling run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollConfig {
    /// Number of drain-then-wait cycles before giving up.
    pub max_ticks: u32,
    /// How long to suspend between ticks.
    pub tick_interval: Duration,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self::new(100, Duration::from_millis(100))
    }
}

impl PollConfig {
    /// Create a configuration from a tick budget and interval.
    #[must_use]
    pub const fn new(max_ticks: u32, tick_interval: Duration) -> Self {
        Self {
            max_ticks,
            tick_interval,
        }
    }

    /// Set the tick budget.
    #[must_use]
    pub const fn max_ticks(mut self, max_ticks: u32) -> Self {
        self.max_ticks = max_ticks;
        self
    }

    /// Set the per-tick suspension interval.
    #[must_use]
    pub const fn tick_interval(mut self, tick_interval: Duration) -> Self {
        self.tick_interval = tick_interval;
        self
    }
}

/// Drive `source` through `matcher` until a decisive verdict or exhaustion.
///
/// Each tick drains every byte `source` currently has; a decisive verdict
/// returns immediately and abandons any bytes still buffered for this call
/// (they remain in the source for the next unrelated read). After the drain
/// the remaining budget is decremented; when it reaches zero the run returns
/// [`Verdict::TimedOut`] without a final sleep. A `max_ticks` of zero times
/// out immediately, consuming nothing.
///
/// The per-tick sleep is the only suspension point; a drain is atomic with
/// respect to the matcher.
pub async fn run_to_verdict<T, S>(
    matcher: &mut IncrementalMatcher<T>,
    source: &mut S,
    config: PollConfig,
) -> Verdict<T>
where
    T: Copy + fmt::Debug,
    S: ByteSource,
{
    let mut remaining = config.max_ticks;
    while remaining > 0 {
        while source.available() {
            let verdict = matcher.feed(source.read_byte());
            if verdict.is_decisive() {
                debug!(?verdict, ticks_left = remaining, "decisive match");
                return verdict;
            }
        }

        remaining -= 1;
        if remaining == 0 {
            break;
        }
        trace!(ticks_left = remaining, "no match yet, suspending for a tick");
        tokio::time::sleep(config.tick_interval).await;
    }

    debug!(max_ticks = config.max_ticks, "tick budget exhausted");
    Verdict::TimedOut
}
