use super::*;
use gunjin_core::{BattleResult, Move, Point};

const AI: Player = Player::South;
const ENEMY: Player = Player::North;

fn place(board: &mut Board, row: i32, col: i32, rank: Rank, owner: Player) {
    board.set_piece(Point::new(row, col), Some(Piece::new(rank, owner)));
}

fn mv(src: (i32, i32), dest: (i32, i32)) -> Move {
    Move::new(Point::new(src.0, src.1), Point::new(dest.0, dest.1))
}

fn belief_at(board: &Board, row: i32, col: i32) -> Option<Rank> {
    board.piece_at(Point::new(row, col)).and_then(|pc| pc.belief)
}

/// Commits an enemy move and runs the inference the AI does before its turn.
fn enemy_moves(board: &mut Board, m: Move) -> BattleResult {
    let result = board.battle(m);
    let attacked = board.last_entry().and_then(|e| e.dest_before);
    suppose_opponents_formation(board, AI, attacked);
    result
}

#[test]
fn empty_log_is_a_no_op() {
    let mut board = Board::empty();
    place(&mut board, 2, 0, Rank::Engineer, ENEMY);
    let before = board.clone();
    suppose_opponents_formation(&mut board, AI, None);
    assert_eq!(board, before);
}

#[test]
fn sideways_two_is_an_engineer() {
    let mut board = Board::empty();
    place(&mut board, 2, 0, Rank::Engineer, ENEMY);
    enemy_moves(&mut board, mv((2, 0), (2, 2)));
    assert_eq!(belief_at(&board, 2, 2), Some(Rank::Engineer));
}

#[test]
fn belief_survives_undo_of_the_move() {
    let mut board = Board::empty();
    place(&mut board, 2, 0, Rank::Engineer, ENEMY);
    enemy_moves(&mut board, mv((2, 0), (2, 2)));
    board.undo();
    assert_eq!(belief_at(&board, 2, 0), Some(Rank::Engineer));
}

#[test]
fn jumping_over_a_piece_is_a_plane() {
    let mut board = Board::empty();
    place(&mut board, 1, 0, Rank::Plane, ENEMY);
    place(&mut board, 2, 0, Rank::Spy, ENEMY);
    enemy_moves(&mut board, mv((1, 0), (3, 0)));
    assert_eq!(belief_at(&board, 3, 0), Some(Rank::Plane));
}

#[test]
fn retreating_two_is_a_plane() {
    let mut board = Board::empty();
    place(&mut board, 3, 0, Rank::Plane, ENEMY);
    enemy_moves(&mut board, mv((3, 0), (1, 0)));
    assert_eq!(belief_at(&board, 1, 0), Some(Rank::Plane));
}

#[test]
fn advancing_two_onto_empty_is_cavalry() {
    let mut board = Board::empty();
    place(&mut board, 2, 1, Rank::Tank, ENEMY);
    enemy_moves(&mut board, mv((2, 1), (4, 1)));
    assert_eq!(belief_at(&board, 4, 1), Some(Rank::Cavalry));
}

#[test]
fn advancing_two_through_a_captain_is_at_least_a_tank() {
    let mut board = Board::empty();
    place(&mut board, 2, 1, Rank::Tank, ENEMY);
    place(&mut board, 4, 1, Rank::Captain, AI);
    let result = enemy_moves(&mut board, mv((2, 1), (4, 1)));
    assert_eq!(result, BattleResult::Win);
    assert_eq!(belief_at(&board, 4, 1), Some(Rank::Tank));
}

#[test]
fn advancing_two_through_a_spy_is_cavalry() {
    let mut board = Board::empty();
    place(&mut board, 2, 1, Rank::Tank, ENEMY);
    place(&mut board, 4, 1, Rank::Spy, AI);
    enemy_moves(&mut board, mv((2, 1), (4, 1)));
    assert_eq!(belief_at(&board, 4, 1), Some(Rank::Cavalry));
}

#[test]
fn one_step_win_names_the_weakest_victor() {
    let mut board = Board::empty();
    place(&mut board, 3, 1, Rank::Major, ENEMY);
    place(&mut board, 4, 1, Rank::Captain, AI);
    enemy_moves(&mut board, mv((3, 1), (4, 1)));
    assert_eq!(belief_at(&board, 4, 1), Some(Rank::Major));
}

#[test]
fn one_step_onto_empty_teaches_nothing() {
    let mut board = Board::empty();
    place(&mut board, 2, 1, Rank::Major, ENEMY);
    enemy_moves(&mut board, mv((2, 1), (3, 1)));
    assert_eq!(belief_at(&board, 3, 1), None);
}

#[test]
fn failed_attack_leaves_nothing_to_learn() {
    let mut board = Board::empty();
    place(&mut board, 3, 1, Rank::Captain, ENEMY);
    place(&mut board, 4, 1, Rank::Major, AI);
    let result = enemy_moves(&mut board, mv((3, 1), (4, 1)));
    assert_eq!(result, BattleResult::Lose);
    let defender = board.piece_at(Point::new(4, 1)).unwrap();
    assert_eq!(defender.owner, AI);
    assert_eq!(defender.belief, None);
}

#[test]
fn belief_never_gets_weaker() {
    let mut board = Board::empty();
    let mut general = Piece::new(Rank::Major, ENEMY);
    general.belief = Some(Rank::General);
    board.set_piece(Point::new(3, 1), Some(general));
    place(&mut board, 4, 1, Rank::Captain, AI);

    enemy_moves(&mut board, mv((3, 1), (4, 1)));
    assert_eq!(belief_at(&board, 4, 1), Some(Rank::General));
}

#[test]
fn stronger_guess_replaces_a_weaker_belief() {
    let mut board = Board::empty();
    let mut spy = Piece::new(Rank::Major, ENEMY);
    spy.belief = Some(Rank::Spy);
    board.set_piece(Point::new(3, 1), Some(spy));
    place(&mut board, 4, 1, Rank::Captain, AI);

    enemy_moves(&mut board, mv((3, 1), (4, 1)));
    assert_eq!(belief_at(&board, 4, 1), Some(Rank::Major));
}

#[test]
fn losing_attack_reveals_a_stronger_defender() {
    let mut board = Board::empty();
    place(&mut board, 4, 1, Rank::Major, AI);
    place(&mut board, 3, 1, Rank::General, ENEMY);

    let result = board.battle(mv((4, 1), (3, 1)));
    assert_eq!(result, BattleResult::Lose);
    let mover = board.last_entry().and_then(|e| e.src_before);
    suppose_opponents_formation(&mut board, AI, mover);

    assert_eq!(belief_at(&board, 3, 1), Some(Rank::LieutenantColonel));
}

#[test]
fn winning_attack_leaves_beliefs_alone() {
    let mut board = Board::empty();
    place(&mut board, 4, 1, Rank::General, AI);
    place(&mut board, 3, 1, Rank::Major, ENEMY);

    board.battle(mv((4, 1), (3, 1)));
    let mover = board.last_entry().and_then(|e| e.src_before);
    let before = board.clone();
    suppose_opponents_formation(&mut board, AI, mover);

    assert_eq!(board, before);
}
