//! Piece randomizer
//!
//! Every spawn picks a shape and a colour independently and uniformly. The
//! generator is seeded so a seed replays the same sequence of pieces.

use crate::piece::ActivePiece;
use crate::settings::GameConfig;
use crate::tetromino::{PALETTE, TetrominoType};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use ratatui::style::Color;

/// Seeded source of new pieces
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
    /// Create a randomizer with a random seed
    pub fn new() -> Self {
        Self::with_seed(rand::random())
    }

    /// Create a randomizer that replays the sequence for `seed`
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn next_kind(&mut self) -> TetrominoType {
        let kinds = TetrominoType::all();
        kinds[self.rng.gen_range(0..kinds.len())]
    }

    pub fn next_color(&mut self) -> Color {
        PALETTE[self.rng.gen_range(0..PALETTE.len())]
    }

    /// Spawn the next piece at the top of a board described by `config`
    pub fn next_piece(&mut self, config: &GameConfig) -> ActivePiece {
        let kind = self.next_kind();
        let color = self.next_color();
        ActivePiece::spawn(kind, color, config)
    }
}
