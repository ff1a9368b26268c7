//! Random Move Character
//!
//! A side that picks uniformly among its legal moves.
//! Useful for:
//! - Exercising the rules engine before pitting the AI against anything
//! - Baseline comparisons (the AI should beat this comfortably)
//! - Stress testing move legality and the undo log

use gunjin_core::{Board, Character, FormationError, Move, Player};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, RngCore, SeedableRng};
use tracing::debug;


/// Most same-side swaps applied on top of the random setup.
const MAX_SETUP_SWAPS: usize = 8;

/// A character that plays random legal moves.
///
/// It keeps its own seeded generator so that a match replays exactly
/// from the same seed.
#[derive(Debug, Clone)]
pub struct RandomCharacter {
    player: Player,
    rng: StdRng,
    moves: u64,
}

impl RandomCharacter {
    pub fn new(player: Player, seed: u64) -> Self {
        Self {
            player,
            rng: StdRng::seed_from_u64(seed),
            moves: 0,
        }
    }

    /// Moves played since the last `new_game`.
    pub fn moves(&self) -> u64 {
        self.moves
    }
}

impl Character for RandomCharacter {
    fn name(&self) -> &str {
        "Random"
    }

    fn player(&self) -> Player {
        self.player
    }

    fn replace_pieces(
        &mut self,
        board: &mut Board,
        rng: &mut dyn RngCore,
    ) -> Result<(), FormationError> {
        let swaps = rng.gen_range(0..=MAX_SETUP_SWAPS);
        board.shuffle(self.player, swaps, rng);
        Ok(())
    }

    fn move_piece(&mut self, board: &mut Board) -> Move {
        let moves = board.legal_moves(self.player);
        let mv = *moves
            .choose(&mut self.rng)
            .expect("move requested from a side with no valid move");
        let result = board.battle(mv);
        self.moves += 1;
        debug!(player = %self.player, %mv, ?result, "random move");
        mv
    }

    fn new_game(&mut self) {
        self.moves = 0;
    }
}
