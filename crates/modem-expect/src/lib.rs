//! modem-expect: Expect-style watcher for GSM modem serial chatter
//!
//! This crate detects asynchronous modem responses (power-state transitions
//! and message-delivery confirmations) arriving one byte at a time over an
//! unframed serial link with no guaranteed delivery latency.
//!
//! # Features
//!
//! - **Incremental multi-pattern matching** that holds per-pattern progress
//!   across feeds, so a response split over many reads is still recognized
//! - **Tick-based polling** with a coarse, reproducible timeout budget
//! - **Power-state tracking** (`OFFLINE` / `READY` / `UNKNOWN`) driven by the
//!   modem's human-readable status lines
//! - **Delivery-outcome tracking** for SMS sends, requiring the modem's
//!   acknowledgement token twice before declaring success
//! - **Mock modem** for testing without hardware
//!
//! # Example
//!
//! ```
//! use modem_expect::prelude::*;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let mut modem = MockModem::new();
//!     modem.queue_output_str("+CMGS: 12\r\nOK\r\n\r\nOK\r\n");
//!
//!     let tracker = DeliveryOutcomeTracker::new();
//!     let result = tracker.wait_delivered(&mut modem).await;
//!     assert_eq!(result, DeliveryResult::Delivered);
//! }
//! ```

pub mod delivery;
pub mod error;
pub mod expect;
pub mod mock;
pub mod poll;
pub mod power;
pub mod prelude;
pub mod send;
pub mod source;

pub use delivery::{DeliveryOutcomeTracker, DeliveryResult, REQUIRED_OK_OCCURRENCES};
pub use error::PatternError;
pub use expect::{IncrementalMatcher, Pattern, PatternSet, Verdict};
pub use mock::MockModem;
pub use poll::{PollConfig, run_to_verdict};
pub use power::{MAX_POWER_RETRIES, PowerState, PowerStateTracker, PowerSwitch};
pub use send::{CTRL_Z, CommandSink, send_text_message, write_at_command};
pub use source::ByteSource;
