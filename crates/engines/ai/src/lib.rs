//! Gunjin Shogi computer opponent
//!
//! One-ply search with a positional evaluation, played under hidden
//! information: enemy pieces are judged by the rank the AI has inferred
//! for them, never by their true rank.
//!
//! Each turn the AI
//! - refines its beliefs from the opponent's last move,
//! - tries every valid move as a supposed battle and keeps the best,
//! - commits that move and learns from its own battle.

mod eval;
mod inference;
mod search;
mod setup;

use std::path::PathBuf;

use gunjin_core::{Board, Character, FormationBook, FormationError, Move, Player};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub use eval::evaluate;
pub use inference::suppose_opponents_formation;
pub use search::{pick_best_move, SearchOutcome};

/// Tunables of the computer opponent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    /// Formation book read on the first setup
    pub formation_path: PathBuf,
    /// Upper bound (exclusive) on random swaps applied after placement
    pub max_random_swaps: usize,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            formation_path: PathBuf::from("resources/formations.txt"),
            max_random_swaps: 2,
        }
    }
}

/// The computer opponent.
#[derive(Debug, Clone)]
pub struct Ai {
    player: Player,
    config: AiConfig,
    /// Loaded lazily from `config.formation_path` unless supplied up front
    book: Option<FormationBook>,
    /// Supposed battles evaluated since the last `new_game`
    evaluated: u64,
}

impl Ai {
    pub fn new(player: Player, config: AiConfig) -> Self {
        Self {
            player,
            config,
            book: None,
            evaluated: 0,
        }
    }

    /// An AI that uses `book` instead of reading its formation file.
    pub fn with_formations(player: Player, config: AiConfig, book: FormationBook) -> Self {
        Self {
            book: Some(book),
            ..Self::new(player, config)
        }
    }

    pub fn evaluated(&self) -> u64 {
        self.evaluated
    }
}

impl Character for Ai {
    fn name(&self) -> &str {
        "Computer"
    }

    fn player(&self) -> Player {
        self.player
    }

    fn replace_pieces(
        &mut self,
        board: &mut Board,
        rng: &mut dyn RngCore,
    ) -> Result<(), FormationError> {
        let book = match self.book.take() {
            Some(book) => book,
            None => FormationBook::load(&self.config.formation_path)?,
        };
        setup::replace_pieces(&book, board, self.player, self.config.max_random_swaps, rng);
        self.book = Some(book);
        Ok(())
    }

    fn move_piece(&mut self, board: &mut Board) -> Move {
        if let Some(attacked) = board.last_entry().map(|entry| entry.dest_before) {
            suppose_opponents_formation(board, self.player, attacked);
        }

        let outcome = pick_best_move(board, self.player);
        self.evaluated += outcome.evaluated;
        let (mv, score) = outcome
            .best_move
            .expect("move requested from a side with no valid move");

        let result = board.battle(mv);
        debug!(player = %self.player, %mv, score, ?result, "ai move");

        let mover = board.last_entry().and_then(|entry| entry.src_before);
        suppose_opponents_formation(board, self.player, mover);
        mv
    }

    fn new_game(&mut self) {
        self.evaluated = 0;
    }
}

#[cfg(test)]
mod lib_tests;
