//! SMS delivery-outcome tracking.
//!
//! After a text message is sent the SIM900 echoes `OK` once for entering
//! command mode and once for the final transmission confirmation; a single
//! stray `OK` in unrelated chatter is not proof of delivery, so two
//! occurrences are required. `ERROR` at any point is decisive failure and
//! preempts further counting.

use std::time::Duration;

use tracing::debug;

use crate::expect::{IncrementalMatcher, Pattern, PatternSet, Verdict};
use crate::poll::{PollConfig, run_to_verdict};
use crate::source::ByteSource;

/// Acknowledgement token echoed by the modem.
const OK_TOKEN: &[u8; 2] = b"OK";

/// Failure token printed by the modem.
const ERROR_TOKEN: &[u8; 5] = b"ERROR";

/// How many times the acknowledgement token must complete before the send
/// counts as delivered.
///
/// This is a fixed policy constant: one echo for command-mode entry plus one
/// for the final confirmation. It is deliberately independent of the token's
/// length, which happens to also be two.
pub const REQUIRED_OK_OCCURRENCES: u32 = 2;

/// Default budget for a delivery wait: 100 ticks of 100 ms.
const DELIVERY_POLL: PollConfig = PollConfig::new(100, Duration::from_millis(100));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DeliveryTag {
    Error,
    Ok,
}

/// The outcome of one send attempt.
///
/// Produced fresh per attempt; nothing is persisted between sends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryResult {
    /// The acknowledgement token completed the required number of times.
    Delivered,
    /// The failure token appeared, or the tick budget ran out first.
    NotDelivered,
}

/// Watches modem chatter for the outcome of a text-message send.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeliveryOutcomeTracker;

impl DeliveryOutcomeTracker {
    /// Create a tracker.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Wait for a delivery outcome with the default budget (100 ticks of
    /// 100 ms).
    pub async fn wait_delivered<S: ByteSource>(&self, source: &mut S) -> DeliveryResult {
        self.wait_delivered_with(source, DELIVERY_POLL).await
    }

    /// Wait for a delivery outcome with an explicit budget.
    ///
    /// The failure token is decisive on its first occurrence and is checked
    /// ahead of the acknowledgement token, so an `ERROR` arriving between
    /// the two `OK`s still yields [`DeliveryResult::NotDelivered`].
    pub async fn wait_delivered_with<S: ByteSource>(
        &self,
        source: &mut S,
        config: PollConfig,
    ) -> DeliveryResult {
        let mut matcher = IncrementalMatcher::new(delivery_patterns());
        let result = match run_to_verdict(&mut matcher, source, config).await {
            Verdict::Matched(DeliveryTag::Ok) | Verdict::MatchedRepeated(DeliveryTag::Ok, _) => {
                DeliveryResult::Delivered
            }
            Verdict::Matched(DeliveryTag::Error)
            | Verdict::MatchedRepeated(DeliveryTag::Error, _)
            | Verdict::Pending
            | Verdict::TimedOut => DeliveryResult::NotDelivered,
        };

        debug!(?result, "delivery wait completed");
        result
    }
}

fn delivery_patterns() -> PatternSet<DeliveryTag> {
    // Failure is declared first so it wins if both tokens somehow complete
    // on the same byte.
    let mut set = PatternSet::new(Pattern::literal(DeliveryTag::Error, ERROR_TOKEN));
    set.add(Pattern::literal(DeliveryTag::Ok, OK_TOKEN).repeated(REQUIRED_OK_OCCURRENCES));
    set
}
