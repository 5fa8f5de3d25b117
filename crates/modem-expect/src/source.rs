//! Byte source abstraction over the modem's serial link.
//!
//! The trackers in this crate never own the serial port; they borrow a
//! [`ByteSource`] for the duration of one wait call and drain whatever bytes
//! have arrived. The contract mirrors a non-blocking UART receive buffer:
//! `available` must not block, and `read_byte` is only called after
//! `available` reported a pending byte.

/// A non-blocking source of serial bytes.
pub trait ByteSource {
    /// Check whether at least one byte is ready to be read.
    ///
    /// Must not block.
    fn available(&mut self) -> bool;

    /// Read the next pending byte.
    ///
    /// Only called after [`available`](Self::available) returned `true`.
    fn read_byte(&mut self) -> u8;

    /// Discard every currently-pending byte.
    ///
    /// Useful before issuing a command whose response should not be
    /// confused with stale chatter.
    fn discard_pending(&mut self) {
        while self.available() {
            let _ = self.read_byte();
        }
    }
}

impl<S: ByteSource + ?Sized> ByteSource for &mut S {
    fn available(&mut self) -> bool {
        (**self).available()
    }

    fn read_byte(&mut self) -> u8 {
        (**self).read_byte()
    }
}
