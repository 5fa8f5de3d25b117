//! The incremental multi-pattern matcher.
//!
//! The matcher consumes one byte at a time and keeps a cursor per pattern:
//! the count of consecutive leading bytes matched so far. On a mismatch the
//! cursor restarts at zero and the breaking byte is *not* re-tested against
//! the start of the pattern; only the next fed byte is. This naive-restart
//! behavior is the contract the trackers are built on, so it must not be
//! replaced with a prefix-reusing automaton even though one would match
//! strictly more streams.

use super::pattern::PatternSet;

/// The outcome of feeding a byte, or of a completed polling run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict<T> {
    /// No pattern has completed yet.
    Pending,
    /// A single-occurrence pattern completed on the fed byte.
    Matched(T),
    /// A repeat-counted pattern reached its required occurrence count.
    MatchedRepeated(T, u32),
    /// The polling tick budget was exhausted. Never produced by
    /// [`IncrementalMatcher::feed`] itself.
    TimedOut,
}

impl<T> Verdict<T> {
    /// Whether this verdict ends a polling run early.
    ///
    /// Timeout exhaustion is terminal but not decisive; only a completed
    /// pattern is.
    #[must_use]
    pub const fn is_decisive(&self) -> bool {
        matches!(self, Self::Matched(_) | Self::MatchedRepeated(..))
    }

    /// The tag of the completed pattern, if any.
    pub const fn tag(&self) -> Option<&T> {
        match self {
            Self::Matched(tag) | Self::MatchedRepeated(tag, _) => Some(tag),
            Self::Pending | Self::TimedOut => None,
        }
    }
}

/// Per-pattern match progress.
#[derive(Debug, Clone, Copy, Default)]
struct Track {
    /// How many leading pattern bytes matched contiguously, ending at the
    /// most recently fed byte.
    cursor: usize,
    /// How many times the pattern has completed since the last reset.
    completions: u32,
}

/// A multi-pattern matcher that holds partial progress across feeds.
///
/// Each pattern's cursor advances or restarts independently; progress on one
/// pattern never touches another's cursor. When two patterns complete on the
/// same byte, the one declared first in the set wins.
#[derive(Debug, Clone)]
pub struct IncrementalMatcher<T> {
    patterns: PatternSet<T>,
    tracks: Vec<Track>,
}

impl<T: Copy> IncrementalMatcher<T> {
    /// Create a matcher over the given pattern set.
    #[must_use]
    pub fn new(patterns: PatternSet<T>) -> Self {
        let tracks = vec![Track::default(); patterns.len()];
        Self { patterns, tracks }
    }

    /// Feed one byte through every pattern.
    ///
    /// Returns the first decisive verdict in declaration order, or
    /// [`Verdict::Pending`]. All cursors are updated from their own prior
    /// values before the verdict is chosen, so progress on one pattern does
    /// not block progress on another within the same call.
    pub fn feed(&mut self, byte: u8) -> Verdict<T> {
        let mut decisive = None;

        for (pattern, track) in self.patterns.iter().zip(self.tracks.iter_mut()) {
            if byte == pattern.as_bytes()[track.cursor] {
                track.cursor += 1;
                if track.cursor == pattern.len() {
                    // Completed; restart so the next occurrence can begin on
                    // the very next byte.
                    track.cursor = 0;
                    track.completions += 1;
                    if decisive.is_none() && track.completions >= pattern.required_occurrences() {
                        decisive = Some(if pattern.required_occurrences() == 1 {
                            Verdict::Matched(*pattern.tag())
                        } else {
                            Verdict::MatchedRepeated(*pattern.tag(), track.completions)
                        });
                    }
                }
            } else {
                // Naive restart: the breaking byte is not re-tested against
                // the pattern's first byte.
                track.cursor = 0;
            }
        }

        decisive.unwrap_or(Verdict::Pending)
    }

    /// Clear every cursor and completion count.
    ///
    /// A reset matcher behaves exactly like a freshly constructed one.
    pub fn reset(&mut self) {
        for track in &mut self.tracks {
            *track = Track::default();
        }
    }

    /// How many times the pattern with the given tag has completed.
    pub fn completions(&self, tag: T) -> u32
    where
        T: PartialEq,
    {
        self.patterns
            .iter()
            .zip(&self.tracks)
            .find(|(pattern, _)| *pattern.tag() == tag)
            .map_or(0, |(_, track)| track.completions)
    }

    /// The pattern set this matcher was built over.
    #[must_use]
    pub const fn patterns(&self) -> &PatternSet<T> {
        &self.patterns
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expect::Pattern;

    fn single(bytes: &'static [u8]) -> IncrementalMatcher<&'static str> {
        let pattern = Pattern::from_bytes("only", bytes).unwrap();
        IncrementalMatcher::new(PatternSet::new(pattern))
    }

    fn feed_all<T: Copy>(matcher: &mut IncrementalMatcher<T>, bytes: &[u8]) -> Verdict<T> {
        let mut last = Verdict::Pending;
        for &b in bytes {
            last = matcher.feed(b);
            if last.is_decisive() {
                return last;
            }
        }
        last
    }

    #[test]
    fn matches_on_final_byte() {
        let mut matcher = single(b"OK");
        assert_eq!(matcher.feed(b'O'), Verdict::Pending);
        assert_eq!(matcher.feed(b'K'), Verdict::Matched("only"));
    }

    #[test]
    fn noise_is_absorbed() {
        let mut matcher = single(b"OK");
        assert_eq!(feed_all(&mut matcher, b"zz OK"), Verdict::Matched("only"));
    }

    #[test]
    fn naive_restart_does_not_retest_breaking_byte() {
        // "AAB" against "AB": the second 'A' breaks the run at cursor 1 and
        // restarts to 0 without being re-tested, so the trailing 'B' is
        // compared against 'A' and the stream never matches.
        let mut matcher = single(b"AB");
        assert_eq!(matcher.feed(b'A'), Verdict::Pending);
        assert_eq!(matcher.feed(b'A'), Verdict::Pending);
        assert_eq!(matcher.feed(b'B'), Verdict::Pending);
    }

    #[test]
    fn declaration_order_wins_simultaneous_completion() {
        let mut set = PatternSet::new(Pattern::literal("long", b"CAB"));
        set.add(Pattern::literal("short", b"AB"));
        let mut matcher = IncrementalMatcher::new(set);

        // Both patterns complete on the trailing 'B'; the first-declared
        // pattern's tag is reported.
        assert_eq!(feed_all(&mut matcher, b"CAB"), Verdict::Matched("long"));

        // The matcher exposes its set with the declaration order intact.
        let tags: Vec<_> = matcher.patterns().iter().map(|p| *p.tag()).collect();
        assert_eq!(tags, ["long", "short"]);
    }

    #[test]
    fn cursors_advance_independently() {
        let mut set = PatternSet::new(Pattern::literal("ba", b"BA"));
        set.add(Pattern::literal("ab", b"AB"));
        let mut matcher = IncrementalMatcher::new(set);

        // 'B' advances only "BA"; 'A' then completes it while "AB" restarts
        // its own run. Neither pattern's progress disturbs the other.
        assert_eq!(matcher.feed(b'B'), Verdict::Pending);
        assert_eq!(matcher.feed(b'A'), Verdict::Matched("ba"));
    }

    #[test]
    fn repeated_pattern_counts_completions() {
        let pattern = Pattern::literal("ok", b"OK").repeated(2);
        let mut matcher = IncrementalMatcher::new(PatternSet::new(pattern));

        assert_eq!(feed_all(&mut matcher, b"OK"), Verdict::Pending);
        assert_eq!(matcher.completions("ok"), 1);
        assert_eq!(
            feed_all(&mut matcher, b"..OK"),
            Verdict::MatchedRepeated("ok", 2)
        );
    }

    #[test]
    fn back_to_back_occurrences_count() {
        // A completed counted pattern restarts at cursor 0, so "OKOK" with
        // no separator reaches the required count.
        let pattern = Pattern::literal("ok", b"OK").repeated(2);
        let mut matcher = IncrementalMatcher::new(PatternSet::new(pattern));
        assert_eq!(
            feed_all(&mut matcher, b"OKOK"),
            Verdict::MatchedRepeated("ok", 2)
        );
    }

    #[test]
    fn reset_reproduces_fresh_matcher() {
        let mut matcher = single(b"READY");
        assert_eq!(feed_all(&mut matcher, b"REA"), Verdict::Pending);

        matcher.reset();
        assert_eq!(feed_all(&mut matcher, b"READY"), Verdict::Matched("only"));

        let mut fresh = single(b"READY");
        assert_eq!(feed_all(&mut fresh, b"READY"), Verdict::Matched("only"));
    }

    #[test]
    fn verdict_queries() {
        assert!(Verdict::Matched("x").is_decisive());
        assert!(Verdict::MatchedRepeated("x", 2).is_decisive());
        assert!(!Verdict::<&str>::Pending.is_decisive());
        assert!(!Verdict::<&str>::TimedOut.is_decisive());
        assert_eq!(Verdict::Matched("x").tag(), Some(&"x"));
        assert_eq!(Verdict::<&str>::TimedOut.tag(), None);
    }
}
