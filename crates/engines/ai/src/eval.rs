//! Positional evaluation weighted by distance to the headquarters.

use gunjin_core::{Board, Piece, Player, Rank, HEIGHT, WIDTH};

/// Weight of one piece of material difference.
const MATERIAL_WEIGHT: i32 = 10;

/// Evaluates the board from `ai`'s perspective.
///
/// Every piece contributes `strength × (H + W − distance)` towards the
/// headquarters of each side: as defense for its owner when measured
/// against its own headquarters, as attack for its owner when measured
/// against the enemy's. Terms measured against the AI's headquarters use
/// true ranks for every piece; terms measured against the opponent's use
/// the AI's beliefs, with the AI's own pieces counted as unknown.
///
/// Returns a higher score for positions better for `ai`.
pub fn evaluate(board: &Board, ai: Player) -> i32 {
    let mut attack = [0i32; 2];
    let mut defense = [0i32; 2];

    for side in Player::ALL {
        for (p, pc) in board.pieces() {
            let strength = counted_rank(pc, side, ai).strength();
            let closeness = (HEIGHT + WIDTH) - board.distance_to_headquarters(side, p);
            if pc.owner == side {
                defense[side.idx()] += closeness * strength;
            } else {
                attack[side.other().idx()] += closeness * strength;
            }
        }
    }

    let material = board.count_pieces(ai) as i32 - board.count_pieces(ai.other()) as i32;
    let own = attack[ai.idx()] + defense[ai.idx()];
    let theirs = attack[ai.other().idx()] + defense[ai.other().idx()];
    own - theirs + material * MATERIAL_WEIGHT
}

fn counted_rank(pc: Piece, side: Player, ai: Player) -> Rank {
    if side == ai {
        pc.rank
    } else if pc.owner == ai {
        Rank::UNKNOWN
    } else {
        pc.belief.unwrap_or(Rank::UNKNOWN)
    }
}

#[cfg(test)]
#[path = "eval_tests.rs"]
mod eval_tests;
