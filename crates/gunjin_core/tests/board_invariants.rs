//! Invariants checked over many random games
//!
//! - Setup always yields the starting counts and a valid placement
//! - Every battle removes pieces the way its result says
//! - Undoing a whole game restores the initial board exactly

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rayon::prelude::*;

use gunjin_core::{BattleResult, Board, Player, Rank, NUM_PIECES};

const FULL_SWEEP_ENV: &str = "FULL_SWEEP";
const QUICK_SEEDS: u64 = 48;
const FULL_SEEDS: u64 = 2_000;
const MAX_PLIES: usize = 300;

fn seeds() -> u64 {
    if std::env::var(FULL_SWEEP_ENV).is_ok() {
        FULL_SEEDS
    } else {
        QUICK_SEEDS
    }
}

fn rank_counts(board: &Board, player: Player) -> [usize; Rank::COUNT] {
    let mut out = [0; Rank::COUNT];
    for (_, pc) in board.pieces() {
        if pc.owner == player {
            out[pc.rank.idx()] += 1;
        }
    }
    out
}

#[test]
fn initialize_respects_counts_and_entrances() {
    (0..seeds()).into_par_iter().for_each(|seed| {
        let mut rng = StdRng::seed_from_u64(seed);
        let board = Board::initialize(&mut rng);
        for player in Player::ALL {
            assert_eq!(
                rank_counts(&board, player),
                Rank::STARTING_COUNTS,
                "seed {seed}: wrong counts for {player}"
            );
            assert!(board.is_valid(player).is_ok(), "seed {seed}: {player} blocked");
        }
    });
}

#[test]
fn random_games_keep_piece_accounting_and_unwind() {
    (0..seeds()).into_par_iter().for_each(|seed| {
        let mut rng = StdRng::seed_from_u64(seed);
        let start = Board::initialize(&mut rng);
        let mut board = start.clone();
        let mut side = Player::South;

        for ply in 0..MAX_PLIES {
            if board.is_end().is_some() {
                break;
            }
            let moves = board.legal_moves(side);
            let Some(&mv) = moves.choose(&mut rng) else {
                break;
            };
            for m in &moves {
                let d = m.delta();
                assert!(d.row == 0 || d.col == 0, "seed {seed}: diagonal {m}");
                assert!(d.row != 0 || d.col != 0, "seed {seed}: null move {m}");
            }

            let mine_before = board.count_pieces(side);
            let theirs_before = board.count_pieces(side.other());
            let result = board.battle(mv);
            let entry = board.last_entry().unwrap();
            let guard_lost = usize::from(entry.guard.is_some());
            let defended = usize::from(entry.dest_before.is_some());
            let mine_lost = mine_before - board.count_pieces(side);
            let theirs_lost = theirs_before - board.count_pieces(side.other());

            match result {
                BattleResult::Win => {
                    assert_eq!(mine_lost, 0, "seed {seed} ply {ply}");
                    assert_eq!(theirs_lost, defended + guard_lost, "seed {seed} ply {ply}");
                }
                BattleResult::Draw => {
                    assert_eq!((mine_lost, theirs_lost), (1, 1), "seed {seed} ply {ply}");
                }
                BattleResult::Lose => {
                    assert_eq!(mine_lost, 1, "seed {seed} ply {ply}");
                    assert!(theirs_lost <= 1, "seed {seed} ply {ply}");
                }
            }
            assert!(board.count_pieces(side) <= NUM_PIECES);
            side = side.other();
        }

        while board.log_len() > 0 {
            board.undo();
        }
        assert_eq!(board, start, "seed {seed}: undo did not restore the start");
    });
}
