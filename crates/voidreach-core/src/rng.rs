//! Deterministic random number generation.
//!
//! Everything random in the engine (placement, market rolls, interdiction)
//! flows through [`SeededRng`] so that the same 32-byte seed always produces
//! the same galaxy across all platforms. The RNG state lives inside the
//! galaxy aggregate and serializes with it, so a restored snapshot resumes
//! the exact sequence it left off at.

use serde::{Deserialize, Serialize};

/// Xorshift64* generator with a 64-bit state word.
///
/// Not cryptographic. Plenty for galaxy layout and market rolls, and the
/// whole state is one u64, so saves stay small.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeededRng {
    state: u64,
}

impl SeededRng {
    /// Fold a 32-byte seed into the initial state with FNV-1a.
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        let mut state: u64 = 0xcbf29ce484222325;
        for &byte in seed.iter() {
            state ^= byte as u64;
            state = state.wrapping_mul(0x100000001b3);
        }
        // Xorshift fixes on zero, so never start there.
        if state == 0 {
            state = 0x853c49e6748fea9b;
        }
        Self { state }
    }

    /// Next value in the sequence.
    pub fn next_u64(&mut self) -> u64 {
        self.state ^= self.state >> 12;
        self.state ^= self.state << 25;
        self.state ^= self.state >> 27;
        self.state.wrapping_mul(0x2545F4914F6CDD1D)
    }

    /// Next value, narrowed. Takes the high half, which is the
    /// better-mixed end of xorshift64* output.
    pub fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    /// Roll in `[0, max)`. Zero max rolls zero.
    pub fn next_range(&mut self, max: u32) -> u32 {
        if max == 0 {
            return 0;
        }
        self.next_u32() % max
    }

    /// Roll in `[min, max]`, both ends inclusive.
    pub fn next_between(&mut self, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        min + self.next_range(max - min + 1)
    }

    /// Roll a fraction in `[0.0, 1.0]`.
    pub fn next_f32(&mut self) -> f32 {
        (self.next_u32() as f32) / (u32::MAX as f32)
    }

    /// Roll in `[min, max]`.
    pub fn next_f32_between(&mut self, min: f32, max: f32) -> f32 {
        min + self.next_f32() * (max - min)
    }

    /// Roll true with the given probability.
    pub fn chance(&mut self, probability: f32) -> bool {
        self.next_f32() < probability
    }
}
