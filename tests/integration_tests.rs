//! Integration tests for the game loop driven by the autopilot

use autotris::core::{Board, GameState, Piece, FLOOR_CELL};
use autotris::engine::{Autopilot, DropStyle, ExecuteError};
use autotris::types::{GameAction, ShapeKind};

/// Drive one piece to lock, falling back to a hard drop on a rejected step.
/// Returns true if a fallback was needed.
fn play_piece(pilot: &mut Autopilot, state: &mut GameState) -> bool {
    for _ in 0..200 {
        match pilot.step(state) {
            Ok(out) if out.done => return false,
            Ok(_) => {}
            Err(ExecuteError::NotPlayable) | Err(ExecuteError::NoActive) => return false,
            Err(_) => {
                state.apply_action(GameAction::HardDrop);
                return true;
            }
        }
    }
    panic!("piece never locked");
}

#[test]
fn test_game_lifecycle() {
    let mut state = GameState::new(12345);
    assert!(!state.started());
    assert!(state.active().is_none());

    state.start();
    assert!(state.started());
    assert!(state.active().is_some());
    assert!(!state.game_over());
    assert!(!state.paused());
    assert_eq!(state.level(), 1);
}

#[test]
fn test_line_clear_through_actions() {
    let mut rows = vec![".........."; 21];
    rows.push("####.#####");
    let mut state = GameState::with_board(3, Board::from_ascii(&rows));
    state.start();

    let mut bar = Piece::spawn(ShapeKind::I, 10).rotated_cw();
    bar.x = 4;
    state.set_active(bar);
    assert!(state.apply_action(GameAction::HardDrop));

    let event = state.take_last_event().unwrap();
    assert_eq!(event.lines_cleared, 1);
    assert_eq!(event.line_clear_score, 40);
    assert_eq!(state.lines(), 1);
    // Remaining three bar cells slid down one row
    for y in 19..22 {
        assert_eq!(state.board().get(4, y), Some(6));
    }
    assert_eq!(state.board().get(4, 18), Some(0));
    assert_eq!(state.board().occupied_count(), 3);
}

#[test]
fn test_autopilot_survives_and_clears_lines() {
    let mut state = GameState::new(2024);
    state.start();
    let mut pilot = Autopilot::new(DropStyle::Hard);

    for _ in 0..120 {
        if state.game_over() {
            break;
        }
        play_piece(&mut pilot, &mut state);
    }

    // 120 pieces cannot fit on a 22x10 board without clearing rows
    assert!(!state.game_over());
    assert_eq!(state.pieces_locked(), 120);
    assert!(state.lines() >= 20, "lines cleared: {}", state.lines());
    assert!(state.level() > 1);
    assert!(state.board().row(22).iter().all(|&c| c == FLOOR_CELL));
}

#[test]
fn test_same_seed_same_game() {
    let run = |seed: u32| {
        let mut state = GameState::new(seed);
        state.start();
        let mut pilot = Autopilot::new(DropStyle::Soft);
        for _ in 0..30 {
            play_piece(&mut pilot, &mut state);
        }
        (state.score(), state.lines(), state.board().clone())
    };
    assert_eq!(run(77), run(77));
}

#[test]
fn test_gravity_locks_without_input() {
    let mut state = GameState::new(9);
    state.start();
    let first_id = state.piece_id();
    // 23 gravity steps is always enough for the first piece to land and lock
    for _ in 0..23 {
        state.tick(state.drop_interval_ms());
    }
    assert_eq!(state.pieces_locked(), 1);
    assert!(state.piece_id() > first_id);
    assert_eq!(state.score(), 0);
}

#[test]
fn test_pause_blocks_autopilot() {
    let mut state = GameState::new(4);
    state.start();
    state.apply_action(GameAction::Pause);
    let mut pilot = Autopilot::default();
    assert_eq!(pilot.step(&mut state), Err(ExecuteError::NotPlayable));
    state.apply_action(GameAction::Pause);
    assert!(pilot.step(&mut state).is_ok());
}
