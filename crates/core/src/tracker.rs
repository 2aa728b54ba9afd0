//! Advance tracking against periodically observed generator state.
//!
//! The external debugger session re-reads the live generator words from the
//! target process; a [`Tracker`] advances its own engine until it reproduces
//! the observation, which tells it exactly how many advances elapsed since
//! the last read.

use crate::error::RngError;
use crate::state::State;
use crate::xorshift::Xorshift128;

/// Advances applied while searching for an observation before giving up.
///
/// A miss past this cap means the observed words almost certainly belong to
/// a different generator (or the tracked one was reseeded).
pub const DEFAULT_OBSERVE_CAP: u64 = 10_000_000;

/// A live generator plus the cumulative advance count since seeding.
#[derive(Debug, Clone)]
pub struct Tracker {
    live: Xorshift128,
    advances: u64,
}

impl Tracker {
    /// Starts tracking from freshly observed seed words.
    pub fn new(seed: State) -> Self {
        Self {
            live: Xorshift128::new(seed),
            advances: 0,
        }
    }

    /// Total advances applied since seeding.
    pub fn advances(&self) -> u64 {
        self.advances
    }

    /// The tracked engine's current state.
    pub fn state(&self) -> State {
        self.live.state()
    }

    /// Catches the tracked engine up to a fresh observation and returns the
    /// cumulative advance count. See [`observe_capped`](Self::observe_capped).
    pub fn observe(&mut self, observed: State) -> Result<u64, RngError> {
        self.observe_capped(observed, DEFAULT_OBSERVE_CAP)
    }

    /// Advances a probe until its state equals `observed`, then commits it.
    ///
    /// Observing the current state is a zero-advance no-op. On
    /// [`RngError::SearchExhausted`] the tracked engine is left untouched,
    /// so a spurious observation cannot corrupt the live sequence.
    pub fn observe_capped(&mut self, observed: State, cap: u64) -> Result<u64, RngError> {
        let mut probe = self.live.clone();
        let mut taken = 0u64;
        while probe.state() != observed {
            if taken == cap {
                return Err(RngError::SearchExhausted { cap });
            }
            probe.next();
            taken += 1;
        }
        self.live = probe;
        self.advances += taken;
        Ok(self.advances)
    }

    /// A clone of the live engine for prediction branches. Advancing the
    /// clone never disturbs the tracked sequence.
    pub fn lookahead(&self) -> Xorshift128 {
        self.live.clone()
    }
}
