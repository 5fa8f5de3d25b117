//! Incremental pattern matching.
//!
//! This module provides the multi-pattern matcher at the heart of the crate:
//! pattern and pattern-set types, and the byte-at-a-time matcher that tracks
//! partial progress across feeds.

mod matcher;
mod pattern;

pub use matcher::{IncrementalMatcher, Verdict};
pub use pattern::{Pattern, PatternSet};
