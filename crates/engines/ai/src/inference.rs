//! Guessing the ranks of enemy pieces from how they moved and fought.

use gunjin_core::{defeats, Board, Piece, Player, Rank};
use tracing::trace;

/// Refines the AI's belief about the enemy piece standing on the
/// destination of the last logged move.
///
/// `known` is the AI's own piece taking part in that battle, whose true
/// rank the AI knows: the defender when the enemy just moved, the mover
/// when the AI itself just moved. A belief is only ever replaced by a
/// strictly stronger guess.
pub fn suppose_opponents_formation(board: &mut Board, ai: Player, known: Option<Piece>) {
    let Some(entry) = board.last_entry() else {
        return;
    };
    let mv = entry.mv;
    let Some(mover) = entry.src_before else {
        return;
    };
    let Some(current) = board.piece_at(mv.dest) else {
        return;
    };
    if current.owner == ai {
        return;
    }

    let known = known.filter(|pc| pc.owner == ai).map(|pc| pc.rank);
    let d = mover.owner.orient(mv.delta());

    let guess = if board.is_piece_hitting_obstacle(mv) {
        Some(Rank::Plane)
    } else if d.col.abs() >= 2 {
        Some(Rank::Engineer)
    } else if d.row >= 2 {
        Some(Rank::Plane)
    } else if d.row <= -2 {
        let refined = known.and_then(|k| weakest_victor(k, Rank::can_advance_two));
        Some(refined.unwrap_or(Rank::Cavalry))
    } else {
        known.and_then(|k| weakest_victor(k, |_| true))
    };

    let Some(guess) = guess else {
        return;
    };
    if current.belief.map_or(true, |belief| guess < belief) {
        trace!(at = %mv.dest, from = ?current.belief, to = %guess, "belief raised");
        board.record_belief(mv.dest, guess);
    }
}

/// The weakest movable rank allowed by `eligible` that beats `known`.
fn weakest_victor(known: Rank, eligible: impl Fn(Rank) -> bool) -> Option<Rank> {
    Rank::ALL[..=Rank::Spy.idx()]
        .iter()
        .rev()
        .copied()
        .find(|&r| eligible(r) && defeats(r, known))
}

#[cfg(test)]
#[path = "inference_tests.rs"]
mod inference_tests;
