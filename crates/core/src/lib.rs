#![deny(unsafe_code)]
//! Core library for rngtrace: a bit-exact model of UnityEngine.Random's
//! Xorshift128 PRNG as consumed by the target game.
//!
//! Provides the reversible [`Xorshift128`] engine (forward and backward
//! state transitions plus the ranged/float sampling paths), the [`State`]
//! seed type, weighted-categorical selection over nested [`WeightTable`]
//! documents, advance re-synchronization via [`Tracker`], and the spawn
//! outcome search in [`spawn`].
//!
//! Everything here is pure computation: the debugger session that reads and
//! writes the target process lives outside this crate and only hands over
//! observed state words.

pub mod error;
pub mod spawn;
pub mod state;
pub mod tracker;
pub mod weights;
pub mod xorshift;

pub use error::RngError;
pub use spawn::{Prediction, Spawn};
pub use state::State;
pub use tracker::Tracker;
pub use weights::{Slot, SlotList, WeightTable};
pub use xorshift::Xorshift128;
