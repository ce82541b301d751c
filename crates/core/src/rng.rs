//! RNG module - uniform random piece generation
//!
//! Every spawn picks one of the seven kinds with equal probability, and the
//! kind after it is always known one piece in advance for the preview.
//!
//! A small LCG keeps whole games reproducible from a seed.

use crate::types::ShapeKind;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        // High bits of an LCG are far less periodic than the low ones.
        (self.next_u32() >> 16) % max
    }
}

/// Uniform piece generator with a one-piece preview
#[derive(Debug, Clone)]
pub struct PieceSource {
    next: ShapeKind,
    rng: SimpleRng,
}

impl PieceSource {
    /// Create a new source with the given seed
    pub fn new(seed: u32) -> Self {
        let mut rng = SimpleRng::new(seed);
        let next = Self::roll(&mut rng);
        Self { next, rng }
    }

    fn roll(rng: &mut SimpleRng) -> ShapeKind {
        let idx = rng.next_range(ShapeKind::ALL.len() as u32) as usize;
        ShapeKind::ALL[idx]
    }

    /// Peek at the next piece without removing it
    pub fn peek(&self) -> ShapeKind {
        self.next
    }

    /// Take the previewed piece and roll a new preview
    pub fn draw(&mut self) -> ShapeKind {
        let piece = self.next;
        self.next = Self::roll(&mut self.rng);
        piece
    }
}

impl Default for PieceSource {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        // Same seed should produce same sequence
        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_rng_different_seeds() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(54321);

        assert_ne!(rng1.next_u32(), rng2.next_u32());
    }

    #[test]
    fn test_zero_seed_is_remapped() {
        let mut zero = SimpleRng::new(0);
        let mut one = SimpleRng::new(1);
        assert_eq!(zero.next_u32(), one.next_u32());
    }

    #[test]
    fn test_next_range_bounds() {
        let mut rng = SimpleRng::new(7);
        for _ in 0..1000 {
            assert!(rng.next_range(7) < 7);
        }
    }

    #[test]
    fn test_source_peek_matches_draw() {
        let mut source = PieceSource::new(1);
        for _ in 0..50 {
            let peeked = source.peek();
            assert_eq!(source.draw(), peeked);
        }
    }

    #[test]
    fn test_source_produces_every_kind() {
        let mut source = PieceSource::new(42);
        let mut seen = [false; 7];
        for _ in 0..500 {
            seen[source.draw().index()] = true;
        }
        assert!(seen.iter().all(|&s| s), "missing kinds: {:?}", seen);
    }
}
