//! Mock modem for testing without hardware.
//!
//! [`MockModem`] stands in for the serial link: it is a [`ByteSource`] whose
//! pending bytes are scripted by the test, and a [`CommandSink`] that
//! records everything written to it. Clones share state, so a test can hold
//! one handle for queueing chatter (possibly from a spawned task, under
//! paused time) while the tracker drains another.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

use crate::send::CommandSink;
use crate::source::ByteSource;

#[derive(Debug, Default)]
struct MockState {
    /// Chatter waiting to be read by a tracker.
    output: VecDeque<u8>,
    /// Commands written toward the modem.
    input: Vec<u8>,
}

/// A scripted modem endpoint implementing [`ByteSource`] and [`CommandSink`].
#[derive(Debug, Clone, Default)]
pub struct MockModem {
    state: Arc<Mutex<MockState>>,
}

impl MockModem {
    /// Create a mock modem with nothing pending.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue chatter for the trackers to read.
    pub fn queue_output(&self, data: &[u8]) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.output.extend(data);
    }

    /// Queue chatter from a string.
    pub fn queue_output_str(&self, s: &str) {
        self.queue_output(s.as_bytes());
    }

    /// How many queued bytes have not been read yet.
    #[must_use]
    pub fn pending_output(&self) -> usize {
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.output.len()
    }

    /// Take everything written toward the modem so far.
    #[must_use]
    pub fn take_input(&self) -> Vec<u8> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        std::mem::take(&mut state.input)
    }

    /// Take written data as a string.
    #[must_use]
    pub fn take_input_str(&self) -> String {
        String::from_utf8_lossy(&self.take_input()).into_owned()
    }
}

impl ByteSource for MockModem {
    fn available(&mut self) -> bool {
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        !state.output.is_empty()
    }

    fn read_byte(&mut self) -> u8 {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.output.pop_front().unwrap_or_default()
    }
}

impl CommandSink for MockModem {
    fn write_bytes(&mut self, data: &[u8]) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.input.extend_from_slice(data);
    }
}
