//! A single game between two characters

use gunjin_core::{score, Board, Character, FormationError, Outcome, Player};
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Why a game stopped.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum GameEnd {
    /// The board reported a finished game
    Finished,
    /// The side to move had pieces but no legal move
    Stuck,
    /// The ply limit was reached
    TurnLimit,
}

/// What happened in one game.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameRecord {
    /// Winning side, `None` for a draw
    pub winner: Option<String>,
    pub end: GameEnd,
    pub plies: u32,
    /// Scoreboard values for North and South after the last move
    pub scores: [i32; 2],
}

impl GameRecord {
    pub fn winner_side(&self) -> Option<Player> {
        let name = self.winner.as_deref()?;
        Player::ALL.into_iter().find(|p| p.to_string() == name)
    }
}

/// Headless turn driver: end check, move, score refresh.
pub struct Game {
    board: Board,
    max_turns: u32,
    scores: [i32; 2],
}

impl Game {
    /// A fresh random board. Characters rearrange their half in `play`.
    pub fn new<R: Rng + ?Sized>(max_turns: u32, rng: &mut R) -> Self {
        Self {
            board: Board::initialize(rng),
            max_turns,
            scores: [0; 2],
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    fn refresh_scores(&mut self) {
        for player in Player::ALL {
            self.scores[player.idx()] = score(&self.board, player);
        }
    }

    /// Plays the game to its end. North sets up and moves first.
    ///
    /// Fails only when a character cannot place its pieces.
    pub fn play(
        &mut self,
        north: &mut dyn Character,
        south: &mut dyn Character,
        rng: &mut dyn RngCore,
    ) -> Result<GameRecord, FormationError> {
        debug_assert_eq!(north.player(), Player::North);
        debug_assert_eq!(south.player(), Player::South);

        north.new_game();
        south.new_game();
        north.replace_pieces(&mut self.board, rng)?;
        south.replace_pieces(&mut self.board, rng)?;
        self.refresh_scores();
        info!(north = north.name(), south = south.name(), "game start");

        let mut turn = Player::North;
        let mut plies = 0;
        let (winner, end) = loop {
            if let Some(outcome) = self.board.is_end() {
                let winner = match outcome {
                    Outcome::Winner(player) => Some(player),
                    Outcome::Draw => None,
                };
                break (winner, GameEnd::Finished);
            }
            if plies >= self.max_turns {
                break (None, GameEnd::TurnLimit);
            }
            if !self.board.has_legal_move(turn) {
                break (Some(turn.other()), GameEnd::Stuck);
            }

            let character: &mut dyn Character = match turn {
                Player::North => &mut *north,
                Player::South => &mut *south,
            };
            let mv = character.move_piece(&mut self.board);
            self.refresh_scores();
            debug!(ply = plies, %turn, %mv, scores = ?self.scores, "turn");

            plies += 1;
            turn = turn.other();
        };

        info!(?winner, ?end, plies, "game over");
        Ok(GameRecord {
            winner: winner.map(|p| p.to_string()),
            end,
            plies,
            scores: self.scores,
        })
    }
}

#[cfg(test)]
#[path = "game_tests.rs"]
mod game_tests;
