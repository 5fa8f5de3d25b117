//! Convenient re-exports for common modem-expect usage.
//!
//! # Example
//!
//! ```ignore
//! use modem_expect::prelude::*;
//!
//! let mut tracker = PowerStateTracker::new();
//! let state = tracker.wait_power_toggle_completed(&mut port).await;
//! assert_eq!(state, PowerState::Ready);
//! ```

// Pattern matching
pub use crate::expect::{IncrementalMatcher, Pattern, PatternSet, Verdict};

// Polling
pub use crate::poll::{PollConfig, run_to_verdict};

// Trackers
pub use crate::delivery::{DeliveryOutcomeTracker, DeliveryResult};
pub use crate::power::{PowerState, PowerStateTracker, PowerSwitch};

// Serial seams
pub use crate::send::{CommandSink, send_text_message, write_at_command};
pub use crate::source::ByteSource;

// Error handling
pub use crate::error::PatternError;

// Test support
pub use crate::mock::MockModem;
