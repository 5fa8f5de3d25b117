//! Command emission toward the modem.
//!
//! The modem accepts AT-style commands over the same serial link it chatters
//! on. Sending a text message is a fixed sequence of steps with settle
//! pauses between them; the modem's echo of each step comes back as ordinary
//! stream bytes and is never interpreted specially by the trackers.

use std::time::Duration;

use tracing::debug;

/// The Ctrl-Z byte that terminates an SMS body in text mode.
pub const CTRL_Z: u8 = 0x1A;

/// Pause between the steps of the send sequence.
const INTER_STEP_PAUSE: Duration = Duration::from_millis(500);

/// Settle pause after a standalone AT command.
const COMMAND_SETTLE_PAUSE: Duration = Duration::from_millis(100);

/// A write-only text sink toward the modem.
pub trait CommandSink {
    /// Write raw bytes.
    fn write_bytes(&mut self, data: &[u8]);

    /// Write a string as-is.
    fn write_str(&mut self, text: &str) {
        self.write_bytes(text.as_bytes());
    }

    /// Write a string followed by CRLF.
    fn write_line(&mut self, line: &str) {
        self.write_str(line);
        self.write_bytes(b"\r\n");
    }
}

impl<W: CommandSink + ?Sized> CommandSink for &mut W {
    fn write_bytes(&mut self, data: &[u8]) {
        (**self).write_bytes(data);
    }
}

/// Send a text message: enter text mode, address the recipient, write the
/// body, terminate with Ctrl-Z.
///
/// Each step is followed by a fixed 500 ms pause so the modem can process it
/// before the next one arrives. Whether the send actually succeeded is
/// answered separately by
/// [`DeliveryOutcomeTracker::wait_delivered`](crate::DeliveryOutcomeTracker::wait_delivered).
pub async fn send_text_message<W: CommandSink>(sink: &mut W, message: &str, phone_number: &str) {
    debug!(phone_number, len = message.len(), "sending text message");

    sink.write_str("AT+CMGF=1\r");
    tokio::time::sleep(INTER_STEP_PAUSE).await;

    sink.write_line(&format!("AT+CMGS=\"{phone_number}\""));
    tokio::time::sleep(INTER_STEP_PAUSE).await;

    sink.write_line(message);
    tokio::time::sleep(INTER_STEP_PAUSE).await;

    sink.write_bytes(&[CTRL_Z, b'\r', b'\n']);
    tokio::time::sleep(INTER_STEP_PAUSE).await;
}

/// Write a standalone AT command and give the modem a moment to settle.
pub async fn write_at_command<W: CommandSink>(sink: &mut W, command: &str) {
    debug!(command, "writing AT command");
    sink.write_line(command);
    tokio::time::sleep(COMMAND_SETTLE_PAUSE).await;
}
