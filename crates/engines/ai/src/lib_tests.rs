use super::*;
use gunjin_core::{Piece, Point, Rank};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn shipped_book() -> FormationBook {
    FormationBook::parse(include_str!("../../../../resources/formations.txt")).unwrap()
}

fn ai(player: Player) -> Ai {
    Ai::with_formations(player, AiConfig::default(), shipped_book())
}

#[test]
fn config_defaults() {
    let config = AiConfig::default();
    assert_eq!(config.formation_path, PathBuf::from("resources/formations.txt"));
    assert_eq!(config.max_random_swaps, 2);
}

#[test]
fn config_from_toml_fills_missing_fields() {
    let config: AiConfig = toml::from_str(r#"formation_path = "books/aggressive.txt""#).unwrap();
    assert_eq!(config.formation_path, PathBuf::from("books/aggressive.txt"));
    assert_eq!(config.max_random_swaps, 2);

    let empty: AiConfig = toml::from_str("").unwrap();
    assert_eq!(empty, AiConfig::default());
}

#[test]
fn missing_formation_file_is_reported() {
    let config = AiConfig {
        formation_path: PathBuf::from("no/such/formations.txt"),
        ..AiConfig::default()
    };
    let mut ai = Ai::new(Player::North, config);
    let mut board = Board::empty();
    let mut rng = StdRng::seed_from_u64(1);

    let err = ai.replace_pieces(&mut board, &mut rng).unwrap_err();
    assert!(matches!(err, FormationError::Io { .. }));
    assert_eq!(board.count_pieces(Player::North), 0);
}

#[test]
fn move_is_committed_exactly_once() {
    let mut rng = StdRng::seed_from_u64(2);
    let mut board = Board::empty();
    let mut north = ai(Player::North);
    let mut south = ai(Player::South);
    north.replace_pieces(&mut board, &mut rng).unwrap();
    south.replace_pieces(&mut board, &mut rng).unwrap();

    let before = board.clone();
    let mv = south.move_piece(&mut board);

    assert!(before.is_move_valid(mv));
    assert_eq!(board.log_len(), 1);
    assert_eq!(board.last_entry().unwrap().mv, mv);
    assert!(south.evaluated() > 0);

    board.undo();
    for p in Point::all() {
        let (a, b) = (board.piece_at(p), before.piece_at(p));
        assert_eq!(a.map(|pc| (pc.rank, pc.owner)), b.map(|pc| (pc.rank, pc.owner)));
    }
}

#[test]
fn opponent_guesses_about_own_pieces_do_not_steer_the_ai() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut board = Board::empty();
    let mut north = ai(Player::North);
    let mut south = ai(Player::South);
    north.replace_pieces(&mut board, &mut rng).unwrap();
    south.replace_pieces(&mut board, &mut rng).unwrap();

    // North's beliefs live on South's pieces; South must play as before.
    let mut guessed = board.clone();
    for (p, mut pc) in board.pieces() {
        if pc.owner == Player::South {
            pc.belief = Some(Rank::General);
            guessed.set_piece(p, Some(pc));
        }
    }

    let a = pick_best_move(&mut board, Player::South).best_move;
    let b = pick_best_move(&mut guessed, Player::South).best_move;
    assert_eq!(a, b);
}

#[test]
fn self_play_runs_to_completion() {
    let mut rng = StdRng::seed_from_u64(4);
    let mut board = Board::empty();
    let mut sides = [ai(Player::North), ai(Player::South)];
    for side in sides.iter_mut() {
        side.replace_pieces(&mut board, &mut rng).unwrap();
    }

    let mut turn = Player::South;
    let mut plies = 0;
    while plies < 300 && board.is_end().is_none() && board.has_legal_move(turn) {
        sides[turn.idx()].move_piece(&mut board);
        plies += 1;
        turn = turn.other();
    }
    assert_eq!(board.log_len(), plies);
    assert!(board.count_pieces(Player::North) <= gunjin_core::NUM_PIECES);
}

#[test]
#[should_panic(expected = "no valid move")]
fn moving_without_a_valid_move_panics() {
    let mut board = Board::empty();
    board.set_piece(Point::new(7, 2), Some(Piece::new(Rank::Flag, Player::South)));
    let mut south = ai(Player::South);
    south.move_piece(&mut board);
}

#[test]
fn new_game_resets_statistics() {
    let mut rng = StdRng::seed_from_u64(5);
    let mut board = Board::initialize(&mut rng);
    let mut south = ai(Player::South);
    south.move_piece(&mut board);
    assert!(south.evaluated() > 0);
    south.new_game();
    assert_eq!(south.evaluated(), 0);
}
