//! Randomness as an injected capability.
//!
//! The engine never reaches for a global RNG: every draw comes from a
//! [`RollSource`] owned by the caller. A seeded [`rand::rngs::StdRng`]
//! gives replayable real rolls; a [`ScriptedSource`] plays back an exact
//! face sequence for tests. Draw order is part of the engine's contract
//! (it decides tie-breaks and which dice are kept), so a single logical
//! roll must own its source exclusively for the duration of the call.

use std::collections::VecDeque;

use rand::Rng;
use rand::rngs::StdRng;

/// A substitutable uniform integer generator over `[1, sides]`.
pub trait RollSource {
    /// Draw one face value, uniformly distributed in `[1, sides]`.
    fn draw(&mut self, sides: u32) -> u32;
}

/// The standard generator is a roll source, so callers pass
/// `StdRng::seed_from_u64(seed)` (or `StdRng::from_os_rng()`) directly.
impl RollSource for StdRng {
    fn draw(&mut self, sides: u32) -> u32 {
        self.random_range(1..=sides)
    }
}

/// A source that plays back a fixed sequence of face values.
///
/// Intended for tests that need to force a specific outcome (tie-breaks,
/// maxed damage dice, natural 1s). Not uniform, not random.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    values: VecDeque<u32>,
}

impl ScriptedSource {
    /// Create a source that yields `values` in order.
    pub fn new(values: impl IntoIterator<Item = u32>) -> Self {
        Self {
            values: values.into_iter().collect(),
        }
    }

    /// How many scripted values remain unconsumed.
    pub fn remaining(&self) -> usize {
        self.values.len()
    }
}

impl RollSource for ScriptedSource {
    /// # Panics
    ///
    /// Panics if the script is exhausted or the next scripted value
    /// cannot appear on a die with `sides` faces — both indicate a
    /// broken test script, not a recoverable condition.
    fn draw(&mut self, sides: u32) -> u32 {
        let Some(value) = self.values.pop_front() else {
            panic!("scripted source exhausted (d{sides} requested)");
        };
        assert!(
            (1..=sides).contains(&value),
            "scripted value {value} cannot come from a d{sides}"
        );
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn std_rng_draws_are_in_range() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..100 {
            let value = rng.draw(6);
            assert!((1..=6).contains(&value));
        }
    }

    #[test]
    fn std_rng_is_deterministic_per_seed() {
        let mut a = StdRng::seed_from_u64(99);
        let mut b = StdRng::seed_from_u64(99);
        for _ in 0..20 {
            assert_eq!(a.draw(20), b.draw(20));
        }
    }

    #[test]
    fn scripted_source_plays_back_in_order() {
        let mut source = ScriptedSource::new([3, 18, 1]);
        assert_eq!(source.remaining(), 3);
        assert_eq!(source.draw(6), 3);
        assert_eq!(source.draw(20), 18);
        assert_eq!(source.draw(4), 1);
        assert_eq!(source.remaining(), 0);
    }

    #[test]
    #[should_panic(expected = "exhausted")]
    fn scripted_source_panics_when_exhausted() {
        let mut source = ScriptedSource::new([]);
        source.draw(6);
    }

    #[test]
    #[should_panic(expected = "cannot come from")]
    fn scripted_source_rejects_impossible_faces() {
        let mut source = ScriptedSource::new([7]);
        source.draw(6);
    }
}
