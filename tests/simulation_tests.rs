//! End-to-end checks of the simulation core through its public API

use blockfall::board::{Board, Cell};
use blockfall::game::{Action, Game, GameState, LockEvent};
use blockfall::piece::{ActivePiece, TickOutcome};
use blockfall::settings::GameConfig;
use blockfall::tetromino::{TetrominoType, occupied};
use ratatui::style::Color;

fn config() -> GameConfig {
    GameConfig::default()
}

#[test]
fn test_i_piece_falls_to_floor_and_locks() {
    let mut board = Board::new(&config());
    let mut piece = ActivePiece::spawn(TetrominoType::I, Color::Red, &config());
    assert_eq!((piece.col(), piece.row()), (3, 0));

    for _ in 0..19 {
        assert_eq!(piece.tick(&mut board), TickOutcome::Moved);
    }
    assert_eq!(piece.row(), 19);

    assert_eq!(piece.tick(&mut board), TickOutcome::Locked);
    assert!(piece.is_landed());
    for col in 3..=6 {
        assert!(board.is_occupied(col, 19), "column {} should be filled", col);
    }
}

#[test]
fn test_collides_matches_bounds_for_every_shape() {
    let board = Board::new(&config());
    for kind in TetrominoType::all() {
        let shape = kind.shape();
        for col in -4..14 {
            for row in -4..24 {
                let expected = occupied(&shape)
                    .any(|(c, r)| col + c < 0 || col + c >= 10 || row + r >= 20);
                assert_eq!(
                    ActivePiece::collides(col, row, &shape, &board),
                    expected,
                    "{} at ({}, {})",
                    kind.name(),
                    col,
                    row
                );
            }
        }
    }
}

#[test]
fn test_hard_drop_never_overlaps_stack() {
    let mut board = Board::new(&config());
    // A ragged stack
    for (col, height) in [(0, 3), (1, 5), (2, 1), (3, 7), (4, 2), (5, 4), (6, 6), (7, 0), (8, 2), (9, 1)] {
        let cells: Vec<_> = (0..height).map(|h| (col, 19 - h)).collect();
        board.place(&cells, Color::Blue);
    }

    for kind in TetrominoType::all() {
        for col in 0..7 {
            let mut scratch = board.clone();
            let mut piece = ActivePiece::at(kind, Color::Red, col, 0);
            if ActivePiece::collides(col, 0, piece.shape(), &scratch) {
                continue;
            }
            assert!(piece.hard_drop(&mut scratch).is_some());
            assert!(piece.is_landed());

            for (c, r) in piece.cells() {
                assert_eq!(board.get(c, r), Some(Cell::Empty), "{} overlapped", kind.name());
                assert_eq!(scratch.get(c, r), Some(Cell::Filled(Color::Red)));
            }
            // Resting on the stack as it was before the drop
            assert!(!ActivePiece::collides(piece.col(), piece.row(), piece.shape(), &board));
            assert!(ActivePiece::collides(piece.col(), piece.row() + 1, piece.shape(), &board));
        }
    }
}

#[test]
fn test_session_plays_until_game_over() {
    let config = GameConfig {
        fall_speed: 1,
        ..config()
    };
    let mut game = Game::with_seed(config, 2024);

    // Only hard drops in the middle: the stack must top out eventually
    let mut locks = 0;
    while game.state == GameState::Playing {
        assert!(game.process_action(Action::HardDrop));
        locks += 1;
        assert!(locks < 200, "game should have ended");
    }

    assert_eq!(game.state, GameState::GameOver);
    assert_eq!(game.last_lock, Some(LockEvent::GameOver));
    assert!(game.current_piece.is_none());
    assert_eq!(game.score.pieces, locks);
    assert!(!game.process_action(Action::MoveLeft));
}
