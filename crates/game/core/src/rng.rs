//! Seedable randomness for decisions, deck draws and narrative picks.
//!
//! Every component that rolls dice takes the RNG as an explicit argument, so a
//! session constructed from the same seed replays identical turns.
//!
//! # Streams
//!
//! A session derives one generator per consumer with [`compute_seed`]. Drawing a
//! narrative line therefore never shifts the sequence the opponent AI sees.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Generator used throughout the engine.
pub type AiRng = ChaCha8Rng;

/// Independent random streams derived from one session seed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum RngStream {
    /// Opponent decisions: bluff rolls, chaotic noise, damage variance.
    Decisions = 0,
    /// Card pool draws and refills.
    Deck = 1,
    /// Narrative line selection on tier transitions.
    Narrative = 2,
}

/// Creates a generator from a 64-bit seed.
pub fn seeded_rng(seed: u64) -> AiRng {
    AiRng::seed_from_u64(seed)
}

/// Compute a deterministic seed from session components.
///
/// Combines multiple entropy sources to ensure unique seeds for each stream of
/// each combat.
///
/// # Arguments
///
/// * `session_seed` - Base seed chosen when the session is created
/// * `combat_index` - Zero-based index of the combat within the session
/// * `stream` - Which consumer the seed is for
///
/// # Returns
///
/// A well-mixed 64-bit seed suitable for [`seeded_rng`].
pub fn compute_seed(session_seed: u64, combat_index: u64, stream: RngStream) -> u64 {
    // SplitMix64-style mixing for good avalanche properties
    let mut hash = session_seed;

    hash ^= combat_index.wrapping_mul(0x9e3779b97f4a7c15);
    hash = hash.wrapping_mul(0xbf58476d1ce4e5b9);

    hash ^= (stream as u64).wrapping_mul(0x94d049bb133111eb);
    hash = hash.wrapping_mul(0x9e3779b97f4a7c15);

    hash ^= hash >> 31;
    hash
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = seeded_rng(42);
        let mut b = seeded_rng(42);
        for _ in 0..16 {
            assert_eq!(a.gen_range(0..1000u32), b.gen_range(0..1000u32));
        }
    }

    #[test]
    fn streams_are_distinct() {
        let decisions = compute_seed(7, 0, RngStream::Decisions);
        let deck = compute_seed(7, 0, RngStream::Deck);
        let narrative = compute_seed(7, 0, RngStream::Narrative);
        assert_ne!(decisions, deck);
        assert_ne!(deck, narrative);
        assert_ne!(compute_seed(7, 1, RngStream::Deck), deck);
    }

    #[test]
    fn compute_seed_is_stable() {
        assert_eq!(
            compute_seed(123, 4, RngStream::Deck),
            compute_seed(123, 4, RngStream::Deck)
        );
    }
}
