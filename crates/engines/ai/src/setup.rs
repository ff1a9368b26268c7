//! Opening placement from the formation book.

use gunjin_core::{Board, FormationBook, Player};
use rand::Rng;
use tracing::debug;

/// Places a random formation from `book` on `player`'s half, then applies
/// a few random same-side swaps so that repeated games differ.
///
/// The number of swaps is drawn from `0..max_swaps`; a limit of zero skips
/// the swaps. The placement is repaired either way.
pub fn replace_pieces<R: Rng + ?Sized>(
    book: &FormationBook,
    board: &mut Board,
    player: Player,
    max_swaps: usize,
    rng: &mut R,
) {
    let formation = book.choose(rng);
    formation.place(board, player);

    let swaps = if max_swaps == 0 {
        0
    } else {
        rng.gen_range(0..max_swaps)
    };
    board.shuffle(player, swaps, rng);
    debug!(%player, swaps, "formation placed");
}

#[cfg(test)]
#[path = "setup_tests.rs"]
mod setup_tests;
