//! Modem power-state tracking.
//!
//! After a power-key pulse the SIM900 announces the transition on its serial
//! line: `Call Ready` once the radio is up, `NORMAL POWER DOWN` when it shut
//! off cleanly. [`PowerStateTracker`] watches for both phrases and persists
//! whichever wins; silence for the whole tick budget leaves the modem in an
//! unknown state.

use std::future::Future;
use std::time::Duration;

use tracing::debug;

use crate::expect::{IncrementalMatcher, Pattern, PatternSet, Verdict};
use crate::poll::{PollConfig, run_to_verdict};
use crate::source::ByteSource;

/// Status phrase the modem prints when the radio comes up.
const READY_PHRASE: &[u8; 10] = b"Call Ready";

/// Status phrase the modem prints on a clean shutdown.
const OFFLINE_PHRASE: &[u8; 17] = b"NORMAL POWER DOWN";

/// Default budget for a power-toggle wait: 250 ticks of 100 ms.
const POWER_POLL: PollConfig = PollConfig::new(250, Duration::from_millis(100));

/// How many toggle-then-wait attempts [`PowerStateTracker::ensure_ready`]
/// and [`PowerStateTracker::ensure_offline`] make before giving up.
pub const MAX_POWER_RETRIES: u32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PowerTag {
    Ready,
    Offline,
}

/// The modem's last observed power state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerState {
    /// The modem reported a clean power-down, or has not been toggled yet.
    Offline,
    /// The modem reported the radio is up.
    Ready,
    /// A toggle wait timed out without a decisive phrase.
    Unknown,
}

/// A collaborator that can pulse the modem's power key.
///
/// The SIM900 power key is held high for a second and released for another
/// before the modem reacts; that sequencing (and the pin itself) belongs to
/// the implementor.
pub trait PowerSwitch {
    /// Pulse the power key once, returning after the pulse sequence.
    fn pulse_power_key(&mut self) -> impl Future<Output = ()> + Send;
}

/// Tracks a single modem's power state across toggle operations.
///
/// One tracker is constructed per physical modem and held by the owner of
/// the communication session. The persisted state starts [`Offline`]
/// (`PowerState::Offline`) and is mutated only by a completed toggle wait.
///
/// [`Offline`]: PowerState::Offline
#[derive(Debug, Clone)]
pub struct PowerStateTracker {
    state: PowerState,
}

impl Default for PowerStateTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl PowerStateTracker {
    /// Create a tracker; the modem is assumed off until proven otherwise.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: PowerState::Offline,
        }
    }

    /// The last state set by a completed toggle wait.
    #[must_use]
    pub const fn state(&self) -> PowerState {
        self.state
    }

    /// Whether the last toggle wait saw the ready phrase. Pure read, no I/O.
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        matches!(self.state, PowerState::Ready)
    }

    /// Whether the last toggle wait saw the power-down phrase (or no toggle
    /// has happened yet). Pure read, no I/O.
    #[must_use]
    pub const fn is_offline(&self) -> bool {
        matches!(self.state, PowerState::Offline)
    }

    /// Whether the last toggle wait timed out. Pure read, no I/O.
    #[must_use]
    pub const fn is_unknown_state(&self) -> bool {
        matches!(self.state, PowerState::Unknown)
    }

    /// Wait for a power toggle to complete with the default budget
    /// (250 ticks of 100 ms).
    pub async fn wait_power_toggle_completed<S: ByteSource>(
        &mut self,
        source: &mut S,
    ) -> PowerState {
        self.wait_power_toggle_completed_with(source, POWER_POLL)
            .await
    }

    /// Wait for a power toggle to complete with an explicit budget.
    ///
    /// Watches the modem chatter for the ready and power-down phrases and
    /// persists the mapped result: ready phrase → [`PowerState::Ready`],
    /// power-down phrase → [`PowerState::Offline`], budget exhausted →
    /// [`PowerState::Unknown`].
    pub async fn wait_power_toggle_completed_with<S: ByteSource>(
        &mut self,
        source: &mut S,
        config: PollConfig,
    ) -> PowerState {
        let mut matcher = IncrementalMatcher::new(power_patterns());
        let state = match run_to_verdict(&mut matcher, source, config).await {
            Verdict::Matched(PowerTag::Ready) | Verdict::MatchedRepeated(PowerTag::Ready, _) => {
                PowerState::Ready
            }
            Verdict::Matched(PowerTag::Offline)
            | Verdict::MatchedRepeated(PowerTag::Offline, _) => PowerState::Offline,
            Verdict::Pending | Verdict::TimedOut => PowerState::Unknown,
        };

        debug!(?state, "power toggle wait completed");
        self.state = state;
        state
    }

    /// Toggle the modem on until it reports ready, retrying up to
    /// [`MAX_POWER_RETRIES`] times. Returns whether it got there.
    pub async fn ensure_ready<S, P>(&mut self, source: &mut S, switch: &mut P) -> bool
    where
        S: ByteSource,
        P: PowerSwitch,
    {
        self.ensure_power_state(PowerState::Ready, source, switch, POWER_POLL)
            .await
    }

    /// [`ensure_ready`](Self::ensure_ready) with an explicit per-wait budget.
    pub async fn ensure_ready_with<S, P>(
        &mut self,
        source: &mut S,
        switch: &mut P,
        config: PollConfig,
    ) -> bool
    where
        S: ByteSource,
        P: PowerSwitch,
    {
        self.ensure_power_state(PowerState::Ready, source, switch, config)
            .await
    }

    /// Toggle the modem off until it reports a clean power-down, retrying up
    /// to [`MAX_POWER_RETRIES`] times. Returns whether it got there.
    pub async fn ensure_offline<S, P>(&mut self, source: &mut S, switch: &mut P) -> bool
    where
        S: ByteSource,
        P: PowerSwitch,
    {
        self.ensure_power_state(PowerState::Offline, source, switch, POWER_POLL)
            .await
    }

    /// [`ensure_offline`](Self::ensure_offline) with an explicit per-wait
    /// budget.
    pub async fn ensure_offline_with<S, P>(
        &mut self,
        source: &mut S,
        switch: &mut P,
        config: PollConfig,
    ) -> bool
    where
        S: ByteSource,
        P: PowerSwitch,
    {
        self.ensure_power_state(PowerState::Offline, source, switch, config)
            .await
    }

    async fn ensure_power_state<S, P>(
        &mut self,
        target: PowerState,
        source: &mut S,
        switch: &mut P,
        config: PollConfig,
    ) -> bool
    where
        S: ByteSource,
        P: PowerSwitch,
    {
        if self.state == target {
            return true;
        }

        for attempt in 1..=MAX_POWER_RETRIES {
            debug!(attempt, ?target, "pulsing modem power key");
            switch.pulse_power_key().await;
            if self.wait_power_toggle_completed_with(source, config).await == target {
                return true;
            }
        }

        debug!(?target, state = ?self.state, "power retries exhausted");
        false
    }
}

fn power_patterns() -> PatternSet<PowerTag> {
    let mut set = PatternSet::new(Pattern::literal(PowerTag::Offline, OFFLINE_PHRASE));
    set.add(Pattern::literal(PowerTag::Ready, READY_PHRASE));
    set
}
