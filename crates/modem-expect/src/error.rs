//! Error types for modem-expect.
//!
//! Matching and tracking operations are total: a timeout is a defined
//! terminal verdict (`Unknown`, `NotDelivered`), not an error, and garbled
//! stream bytes are silently absorbed. The only fallible surface is dynamic
//! pattern construction.

use thiserror::Error;

/// Errors produced when constructing a [`Pattern`](crate::Pattern) from
/// runtime data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    /// The pattern byte sequence was empty. An empty pattern would complete
    /// on every fed byte, so it is rejected at construction.
    #[error("pattern must contain at least one byte")]
    Empty,
}
