//! Random number generation for dice and chance draws.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical games
//! - **Serializable**: O(1) state capture and restore
//! - **Pluggable**: The engine only sees [`RandomSource`], so tests can
//!   script exact dice and card draws
//!
//! ```
//! use rust_monopoly::core::{GameRng, RandomSource};
//!
//! let mut a = GameRng::new(42);
//! let mut b = GameRng::new(42);
//!
//! for _ in 0..10 {
//!     assert_eq!(a.roll_die(), b.roll_die());
//! }
//! ```

#[cfg(any(test, feature = "test-util"))]
use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Source of randomness consumed by the rules.
///
/// `Send` so a match can live behind a mutex or inside an actor task.
pub trait RandomSource: Send {
    /// One die face in `1..=6`.
    fn roll_die(&mut self) -> u8;

    /// A uniformly chosen index in `0..len`. `len` is never zero.
    fn pick_index(&mut self, len: usize) -> usize;
}

/// Seeded ChaCha8 generator used in production matches.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// The seed this generator was created from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Get the current state for serialization.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    /// Restore from a saved state.
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
        }
    }
}

impl RandomSource for GameRng {
    fn roll_die(&mut self) -> u8 {
        self.inner.gen_range(1..=6)
    }

    fn pick_index(&mut self, len: usize) -> usize {
        self.inner.gen_range(0..len)
    }
}

/// Serializable RNG state for checkpointing.
///
/// Uses the ChaCha8 word position so capture is O(1) regardless of
/// how many values have been generated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    /// Original seed
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter)
    pub word_pos: u128,
}

/// Replays a fixed script of dice faces and card indices.
///
/// Dice and picks are queued separately so a test can say "roll 5 and 3,
/// then draw card 9" without caring about call interleaving. When a queue
/// runs dry the source falls back to 1 for dice and 0 for picks.
///
/// Only built for tests and with the `test-util` feature.
#[cfg(any(test, feature = "test-util"))]
#[derive(Clone, Debug, Default)]
pub struct ScriptedRng {
    dice: VecDeque<u8>,
    picks: VecDeque<usize>,
}

#[cfg(any(test, feature = "test-util"))]
impl ScriptedRng {
    /// Create an empty script.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Script that yields the given dice faces in order.
    #[must_use]
    pub fn with_dice(dice: impl IntoIterator<Item = u8>) -> Self {
        let mut rng = Self::new();
        rng.push_dice(dice);
        rng
    }

    /// Queue more dice faces.
    pub fn push_dice(&mut self, dice: impl IntoIterator<Item = u8>) {
        self.dice.extend(dice);
    }

    /// Queue more pick indices (chance card draws).
    pub fn push_picks(&mut self, picks: impl IntoIterator<Item = usize>) {
        self.picks.extend(picks);
    }

    /// Dice faces not yet consumed.
    #[must_use]
    pub fn remaining_dice(&self) -> usize {
        self.dice.len()
    }
}

#[cfg(any(test, feature = "test-util"))]
impl RandomSource for ScriptedRng {
    fn roll_die(&mut self) -> u8 {
        self.dice.pop_front().unwrap_or(1)
    }

    fn pick_index(&mut self, len: usize) -> usize {
        self.picks.pop_front().unwrap_or(0) % len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        let mut rng1 = GameRng::new(42);
        let mut rng2 = GameRng::new(42);

        for _ in 0..100 {
            assert_eq!(rng1.roll_die(), rng2.roll_die());
            assert_eq!(rng1.pick_index(14), rng2.pick_index(14));
        }
    }

    #[test]
    fn test_different_seeds() {
        let mut rng1 = GameRng::new(1);
        let mut rng2 = GameRng::new(2);

        let seq1: Vec<_> = (0..20).map(|_| rng1.roll_die()).collect();
        let seq2: Vec<_> = (0..20).map(|_| rng2.roll_die()).collect();

        assert_ne!(seq1, seq2);
    }

    #[test]
    fn test_die_faces_in_range() {
        let mut rng = GameRng::new(7);
        let mut seen = [false; 6];

        for _ in 0..600 {
            let face = rng.roll_die();
            assert!((1..=6).contains(&face));
            seen[usize::from(face - 1)] = true;
        }

        assert!(seen.iter().all(|&s| s), "every face should show up in 600 rolls");
    }

    #[test]
    fn test_state_serialization() {
        let mut rng = GameRng::new(42);

        for _ in 0..100 {
            rng.roll_die();
        }

        let state = rng.state();
        let expected: Vec<_> = (0..10).map(|_| rng.roll_die()).collect();

        let mut restored = GameRng::from_state(&state);
        let actual: Vec<_> = (0..10).map(|_| restored.roll_die()).collect();

        assert_eq!(expected, actual);
    }

    #[test]
    fn test_state_serde() {
        let state = GameRngState {
            seed: 42,
            word_pos: 12345,
        };

        let json = serde_json::to_string(&state).unwrap();
        let deserialized: GameRngState = serde_json::from_str(&json).unwrap();

        assert_eq!(state, deserialized);
    }

    #[test]
    fn test_scripted_rng_replays_queues() {
        let mut rng = ScriptedRng::with_dice([5, 3]);
        rng.push_picks([9]);

        assert_eq!(rng.roll_die(), 5);
        assert_eq!(rng.pick_index(14), 9);
        assert_eq!(rng.roll_die(), 3);
        assert_eq!(rng.remaining_dice(), 0);

        // Exhausted queues fall back to the lowest outcome
        assert_eq!(rng.roll_die(), 1);
        assert_eq!(rng.pick_index(14), 0);
    }

    #[test]
    fn test_scripted_pick_wraps_to_len() {
        let mut rng = ScriptedRng::new();
        rng.push_picks([20]);

        assert_eq!(rng.pick_index(14), 6);
    }
}
