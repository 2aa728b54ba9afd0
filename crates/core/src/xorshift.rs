//! Bit-exact model of UnityEngine.Random's Xorshift128 PRNG.
//!
//! Reproduces the target binary's generator in both directions: `next`
//! advances the 4-word state, `previous` is its exact algebraic inverse, and
//! the ranged/float sampling paths match the game's own consumption of the
//! raw stream bit for bit. Same state always produces the same sequence
//! across all platforms (pure integer arithmetic in the core transition).

use crate::error::RngError;
use crate::state::State;
use serde::{Deserialize, Serialize};

/// Upper clamp on ranged sampling: `maximum` above 2^32 is silently reduced,
/// matching the target's behavior (oversized input is not an error there).
const RANGE_CEIL: u64 = 0x1_0000_0000;

/// Lower bound of the signed draw used by [`Xorshift128::alt_rand`],
/// i.e. -0x80000000 reinterpreted as unsigned.
const ALT_MIN: u32 = 0x8000_0000;

/// Upper bound of the signed draw used by [`Xorshift128::alt_rand`].
const ALT_MAX: u32 = 0x7FFF_FFFF;

/// Mask keeping the 23 mantissa-width entropy bits for float derivation.
const FLOAT_MASK: u32 = 0x7F_FFFF;

/// Bit pattern of the f32 constant the target multiplies the masked draw by.
/// Slightly above 2^-23, so the fraction can reach exactly 1.0.
const FLOAT_MUL_BITS: u32 = 0x3400_0001;

/// Xorshift128 generator with value semantics.
///
/// Each instance is independently owned; clone it to fork a lookahead branch
/// without disturbing the live tracked sequence. Every operation is a pure
/// transition `state -> (state', output)` with no other side effects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Xorshift128 {
    state: State,
}

impl Xorshift128 {
    /// Creates a generator from an observed state.
    pub fn new(state: State) -> Self {
        Self { state }
    }

    /// Creates a generator from four seed words.
    pub fn from_words(s0: u32, s1: u32, s2: u32, s3: u32) -> Self {
        Self {
            state: State::new(s0, s1, s2, s3),
        }
    }

    /// The current 4-word state.
    pub fn state(&self) -> State {
        self.state
    }

    /// Advances the state and returns the next raw 32-bit value.
    ///
    /// Shift constants (11, 8, 19) are the Xorshift128 parameters the target
    /// uses; the new word shifts into position 3 while the rest slide down.
    pub fn next(&mut self) -> u32 {
        let [mut s0, s1, s2, s3] = self.state.0;

        s0 ^= s0 << 11;
        s0 ^= s0 >> 8;
        s0 ^= s3 ^ (s3 >> 19);

        self.state.0 = [s1, s2, s3, s0];
        s0
    }

    /// Steps the state backwards, returning the word restored to position 0.
    ///
    /// Inverse of [`next`](Self::next): the >>19 fold is undone from the
    /// relation between words 2 and 3, then `x ^= x >> 8` is cancelled by the
    /// (>>8, >>16) pass and `x ^= x << 11` by the (<<11, <<22) pass. For any
    /// state, `previous` composed with `next` is the identity.
    pub fn previous(&mut self) -> u32 {
        let [s0, s1, s2, s3] = self.state.0;

        let mut restored = (s2 >> 19) ^ s2 ^ s3;
        restored ^= restored >> 8;
        restored ^= restored >> 16;
        restored ^= restored << 11;
        restored ^= restored << 22;

        self.state.0 = [restored, s0, s1, s2];
        restored
    }

    /// Random integer in `[minimum, maximum)` by modulo reduction of the span.
    ///
    /// `maximum` above 2^32 is silently clamped to 2^32, so the full-range
    /// call `rand(0, 2^32)` degenerates to the raw [`next`](Self::next)
    /// value. Returns [`RngError::InvalidRange`] when the clamped `maximum`
    /// is not greater than `minimum`.
    pub fn rand(&mut self, minimum: u64, maximum: u64) -> Result<u32, RngError> {
        let maximum = maximum.min(RANGE_CEIL);
        if maximum <= minimum {
            return Err(RngError::InvalidRange {
                min: minimum,
                max: maximum,
            });
        }
        let span = maximum - minimum;
        Ok((u64::from(self.next()) % span + minimum) as u32)
    }

    /// The alternate in-game sampling path: a draw over the signed 32-bit
    /// range reinterpreted as unsigned, reduced modulo `maximum` (not the
    /// span) and offset by `minimum`.
    ///
    /// The inner draw runs in wrapping u32 arithmetic exactly as the target
    /// does: its "span" is 0x7FFFFFFF - 0x80000000, which wraps to
    /// 0xFFFFFFFF. Only the outer range is validated; returns
    /// [`RngError::InvalidRange`] when the clamped `maximum` is not greater
    /// than `minimum`.
    pub fn alt_rand(&mut self, minimum: u64, maximum: u64) -> Result<u32, RngError> {
        let maximum = maximum.min(RANGE_CEIL);
        if maximum <= minimum {
            return Err(RngError::InvalidRange {
                min: minimum,
                max: maximum,
            });
        }
        let draw = self.rand_wrapping(ALT_MIN, ALT_MAX);
        Ok((u64::from(draw) % maximum + minimum) as u32)
    }

    /// Random f32 interpolated between `minimum` and `maximum`.
    ///
    /// Masks the low 23 bits of the next raw value and scales by the f32
    /// with bit pattern 0x34000001. The interpolation weights `minimum` by
    /// the fraction and `maximum` by its complement — inverted relative to a
    /// conventional lerp, but that is what the target binary computes, so it
    /// must stay this way. With default bounds (0.0, 1.0) the output lies in
    /// [0, 1]; the closed top end is reachable only when the masked fraction
    /// is exactly zero.
    pub fn rand_float(&mut self, minimum: f32, maximum: f32) -> f32 {
        let fraction = (self.next() & FLOAT_MASK) as f32 * f32::from_bits(FLOAT_MUL_BITS);
        fraction * minimum + (1.0 - fraction) * maximum
    }

    /// Ranged draw in wrapping u32 arithmetic, no validation. The target's
    /// alternate path deliberately passes minimum > maximum here.
    fn rand_wrapping(&mut self, minimum: u32, maximum: u32) -> u32 {
        let span = maximum.wrapping_sub(minimum);
        (self.next() % span).wrapping_add(minimum)
    }
}
