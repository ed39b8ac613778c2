//! Piece randomizer
//!
//! Every draw is an independent uniform pick from the 7 catalog types, with
//! replacement. Repeats and droughts are possible; there is no bag.

use crate::piece::Piece;
use crate::tetromino::TetrominoType;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

#[derive(Debug, Clone)]
pub struct Randomizer {
    rng: ChaCha8Rng,
}

impl Default for Randomizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Randomizer {
    /// Create a randomizer seeded from the thread RNG
    pub fn new() -> Self {
        Self::with_seed(rand::random())
    }

    /// Create a randomizer with a fixed seed (reproducible sequences)
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Draw the next piece type
    pub fn next_type(&mut self) -> TetrominoType {
        TetrominoType::random(&mut self.rng)
    }

    /// Draw a fresh piece at spawn position
    pub fn next_piece(&mut self) -> Piece {
        Piece::new(self.next_type())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = Randomizer::with_seed(42);
        let mut b = Randomizer::with_seed(42);
        for _ in 0..50 {
            assert_eq!(a.next_type(), b.next_type());
        }
    }

    #[test]
    fn test_distribution_is_roughly_uniform() {
        let mut randomizer = Randomizer::with_seed(1);
        let mut counts: HashMap<TetrominoType, u32> = HashMap::new();
        for _ in 0..7000 {
            *counts.entry(randomizer.next_type()).or_default() += 1;
        }
        assert_eq!(counts.len(), 7);
        for (kind, count) in counts {
            assert!(
                (700..1300).contains(&count),
                "{} drawn {} times",
                kind.name(),
                count
            );
        }
    }

    #[test]
    fn test_next_piece_spawns_at_top() {
        let mut randomizer = Randomizer::with_seed(3);
        for _ in 0..20 {
            let piece = randomizer.next_piece();
            assert_eq!(piece.y, 0);
            assert!(piece.kind().is_some());
        }
    }
}
