//! Uniform random piece generation
//!
//! Every spawn is an independent draw: each of the 7 kinds is equally likely
//! regardless of what came before. The generator is seeded so a game can be
//! replayed deterministically in tests.

use crate::piece::Piece;
use crate::tetromino::PieceKind;
use crate::theme::ThemeSelector;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Seeded source of new pieces
#[derive(Debug, Clone)]
pub struct Randomizer {
    rng: ChaCha8Rng,
}

impl Randomizer {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Draw the next piece kind
    pub fn next_kind(&mut self) -> PieceKind {
        PieceKind::ALL[self.rng.gen_range(0..PieceKind::ALL.len())]
    }

    /// Spawn a fresh piece at the spawn position, theme resolved by `selector`
    pub fn spawn(&mut self, selector: ThemeSelector) -> Piece {
        let kind = self.next_kind();
        let theme = selector.resolve(&mut self.rng);
        Piece::new(kind, theme)
    }
}
