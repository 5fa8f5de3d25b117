//! Pattern types for incremental matching.
//!
//! A pattern is an exact, non-empty byte sequence identified by a
//! caller-chosen tag. Patterns are grouped into an ordered, non-empty
//! [`PatternSet`]; when two patterns complete on the same fed byte, the one
//! declared first wins.

use crate::error::PatternError;

/// An exact byte token to watch for, identified by a tag.
///
/// The tag type is caller-chosen; trackers in this crate use small private
/// enums. A pattern may require multiple occurrences before it is decisive
/// (see [`Pattern::repeated`]); the default is one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern<T> {
    tag: T,
    bytes: Vec<u8>,
    required: u32,
}

impl<T> Pattern<T> {
    /// Create a pattern from a static byte literal.
    ///
    /// Non-emptiness is checked at compile time, so the built-in modem
    /// tokens can never violate the matcher's invariant.
    #[must_use]
    pub fn literal<const N: usize>(tag: T, bytes: &'static [u8; N]) -> Self {
        const { assert!(N > 0, "pattern must contain at least one byte") };
        Self {
            tag,
            bytes: bytes.to_vec(),
            required: 1,
        }
    }

    /// Create a pattern from runtime bytes.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError::Empty`] if `bytes` is empty.
    pub fn from_bytes(tag: T, bytes: impl Into<Vec<u8>>) -> Result<Self, PatternError> {
        let bytes = bytes.into();
        if bytes.is_empty() {
            return Err(PatternError::Empty);
        }
        Ok(Self {
            tag,
            bytes,
            required: 1,
        })
    }

    /// Require the pattern to complete `count` times before it is decisive.
    ///
    /// The count is clamped to at least one. Each completion resets the
    /// pattern's cursor so the next occurrence can begin on the very next
    /// byte.
    #[must_use]
    pub fn repeated(mut self, count: u32) -> Self {
        self.required = count.max(1);
        self
    }

    /// The pattern's tag.
    pub const fn tag(&self) -> &T {
        &self.tag
    }

    /// The exact bytes this pattern matches.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// The number of completions required for a decisive verdict.
    #[must_use]
    pub const fn required_occurrences(&self) -> u32 {
        self.required
    }

    /// The pattern length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Always `false`; patterns are non-empty by construction.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// An ordered, non-empty collection of patterns matched in one session.
///
/// Declaration order is the resolution order when multiple patterns complete
/// on the same byte, so decisive-failure tokens should be declared before
/// success tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternSet<T> {
    patterns: Vec<Pattern<T>>,
}

impl<T> PatternSet<T> {
    /// Create a set containing a first pattern.
    ///
    /// Requiring the first pattern up front keeps the set non-empty by
    /// construction.
    #[must_use]
    pub fn new(first: Pattern<T>) -> Self {
        Self {
            patterns: vec![first],
        }
    }

    /// Add a pattern to the set.
    ///
    /// Later additions rank after earlier ones when completions collide.
    pub fn add(&mut self, pattern: Pattern<T>) -> &mut Self {
        self.patterns.push(pattern);
        self
    }

    /// The number of patterns in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Always `false`; sets hold at least one pattern.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Iterate over the patterns in declaration order.
    pub fn iter(&self) -> std::slice::Iter<'_, Pattern<T>> {
        self.patterns.iter()
    }
}

impl<'a, T> IntoIterator for &'a PatternSet<T> {
    type Item = &'a Pattern<T>;
    type IntoIter = std::slice::Iter<'a, Pattern<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_pattern_bytes() {
        let pattern = Pattern::literal("ready", b"Call Ready");
        assert_eq!(pattern.as_bytes(), b"Call Ready");
        assert_eq!(pattern.required_occurrences(), 1);
        assert_eq!(pattern.len(), 10);
    }

    #[test]
    fn from_bytes_rejects_empty() {
        let result = Pattern::from_bytes("tag", Vec::new());
        assert_eq!(result.unwrap_err(), PatternError::Empty);
    }

    #[test]
    fn repeated_clamps_to_one() {
        let pattern = Pattern::literal("ok", b"OK").repeated(0);
        assert_eq!(pattern.required_occurrences(), 1);

        let pattern = Pattern::literal("ok", b"OK").repeated(2);
        assert_eq!(pattern.required_occurrences(), 2);
    }

    #[test]
    fn set_preserves_declaration_order() {
        let mut set = PatternSet::new(Pattern::literal("error", b"ERROR"));
        set.add(Pattern::literal("ok", b"OK"));

        let tags: Vec<_> = set.iter().map(|p| *p.tag()).collect();
        assert_eq!(tags, vec!["error", "ok"]);
        assert_eq!(set.len(), 2);
        assert!(!set.is_empty());
    }
}
