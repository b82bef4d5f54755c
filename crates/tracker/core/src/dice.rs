//! Dice oracle for deterministic local initiative rolls.
//!
//! This module provides a trait-based dice system so the engine can roll
//! initiative without an external service. All implementations must be
//! deterministic: given the same seed they must produce the same value, which
//! keeps encounters replayable in tests.

/// Dice oracle for deterministic die rolls.
pub trait DiceOracle: Send + Sync {
    /// Generate a random u32 value from a seed.
    fn next_u32(&self, seed: u64) -> u32;

    /// Roll a die with N sides (1-N inclusive).
    fn roll_die(&self, seed: u64, sides: u32) -> u32 {
        if sides == 0 {
            return 1;
        }
        (self.next_u32(seed) % sides) + 1
    }
}

/// PCG random number generator (Permuted Congruential Generator).
///
/// PCG-XSH-RR produces 32-bit output from 64-bit state with a single
/// multiply, xorshift, and rotate. Same seed always produces the same
/// output, and the statistical quality is good enough that a d20 stays
/// uniform over the 1-20 range.
///
/// Reference: <https://www.pcg-random.org/>
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgDice;

impl PcgDice {
    /// PCG multiplier constant.
    const MULTIPLIER: u64 = 6364136223846793005;

    /// PCG increment constant.
    const INCREMENT: u64 = 1442695040888963407;

    /// Advance the PCG state by one LCG step.
    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// PCG output permutation (xorshift high, random rotate).
    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl DiceOracle for PcgDice {
    fn next_u32(&self, seed: u64) -> u32 {
        let state = Self::pcg_step(seed);
        Self::pcg_output(state)
    }
}

/// Compute a deterministic roll seed from encounter state components.
///
/// Combines the encounter seed, the mutation nonce, and the participant
/// identity so that every roll in an encounter draws from a distinct seed,
/// while replaying the same encounter reproduces the same rolls.
pub fn compute_seed(encounter_seed: u64, nonce: u64, participant: u32) -> u64 {
    // Mixing constants are based on SplitMix64 and FxHash multipliers.
    let mut hash = encounter_seed;

    hash ^= nonce.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= (participant as u64).wrapping_mul(0x517cc1b727220a95);

    // Final avalanche step
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;

    hash
}
