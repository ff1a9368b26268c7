pub mod battle;
pub mod board;
pub mod formation;
pub mod types;

// Re-export core game logic (not character-specific)
pub use battle::*;
pub use board::*;
pub use formation::*;
pub use types::*;

use rand::RngCore;

// =============================================================================
// Character trait: implemented by every side that can sit at the board
// =============================================================================

/// A participant in a game: the AI, a baseline random mover, or a front end
/// relaying a human's clicks.
///
/// All board mutation goes through `Board`, so a character only decides;
/// it never bypasses the rules.
pub trait Character: Send {
    /// Returns the character's display name
    fn name(&self) -> &str;

    /// The side this character plays
    fn player(&self) -> Player;

    /// Arrange this side's pieces before the first move.
    ///
    /// Must leave the side with its starting counts and a valid placement.
    fn replace_pieces(
        &mut self,
        board: &mut Board,
        rng: &mut dyn RngCore,
    ) -> Result<(), FormationError>;

    /// Choose a move and commit it with `Board::battle`.
    ///
    /// Called only when the side has at least one legal move.
    fn move_piece(&mut self, board: &mut Board) -> Move;

    /// Reset internal state for a new game
    fn new_game(&mut self) {}
}

/// Material balance as shown on a scoreboard: own pieces minus the opponent's.
pub fn score(board: &Board, player: Player) -> i32 {
    board.count_pieces(player) as i32 - board.count_pieces(player.other()) as i32
}
