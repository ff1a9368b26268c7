//! One-ply search over every pseudo-legal move of the AI's side

use gunjin_core::{Board, Move, Player, Point};

use crate::eval::evaluate;

/// Result from pick_best_move.
pub struct SearchOutcome {
    /// Best move found with its evaluation (if the side can move at all)
    pub best_move: Option<(Move, i32)>,
    /// Number of supposed battles evaluated
    pub evaluated: u64,
}

/// Tries every valid move of `ai` as a supposed battle and keeps the one
/// with the highest evaluation.
///
/// Sources and destinations are scanned in row-major order, dummy
/// headquarters squares included, and ties keep the first move found.
/// Every supposed battle is undone, so the board is left as it was.
pub fn pick_best_move(board: &mut Board, ai: Player) -> SearchOutcome {
    let mut best_move: Option<(Move, i32)> = None;
    let mut evaluated = 0;

    for src in Point::all() {
        if board.piece_at(src).map_or(true, |pc| pc.owner != ai) {
            continue;
        }
        if board.count_placeable_squares(src) == 0 {
            continue;
        }

        for dest in Point::all() {
            let mv = Move::new(src, dest);
            if !board.is_move_valid(mv) {
                continue;
            }

            let score = board.with_supposed_battle(ai, mv, |b| evaluate(b, ai));
            evaluated += 1;

            if best_move.map_or(true, |(_, best)| score > best) {
                best_move = Some((mv, score));
            }
        }
    }

    SearchOutcome {
        best_move,
        evaluated,
    }
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod search_tests;
