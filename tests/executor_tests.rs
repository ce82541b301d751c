//! Action executor tests against the live game state

use autotris::core::{Board, GameState, Piece};
use autotris::engine::{
    apply_step, choose_move, next_action, plan_actions, DropStyle, ExecuteError, Placement,
};
use autotris::types::{GameAction, ShapeKind};

fn game_with(kind: ShapeKind, board: Board) -> GameState {
    let mut state = GameState::with_board(5, board);
    state.start();
    state.set_active(Piece::spawn(kind, 10));
    state
}

fn run_to_lock(state: &mut GameState, target: &Placement, style: DropStyle) -> Vec<GameAction> {
    let mut actions = Vec::new();
    for _ in 0..100 {
        let out = apply_step(state, target, style).expect("step rejected");
        actions.push(out.action);
        if out.done {
            return actions;
        }
    }
    panic!("piece never locked");
}

#[test]
fn test_steps_follow_plan() {
    let mut state = game_with(ShapeKind::L, Board::default());
    let target = Placement { rotation: 2, column: 0, row: 20 };
    let plan = plan_actions(state.active().unwrap(), &target, DropStyle::Hard);
    let taken = run_to_lock(&mut state, &target, DropStyle::Hard);
    assert_eq!(taken, plan);
    assert_eq!(
        plan,
        vec![
            GameAction::RotateCw,
            GameAction::RotateCw,
            GameAction::MoveLeft,
            GameAction::MoveLeft,
            GameAction::MoveLeft,
            GameAction::HardDrop,
        ]
    );
}

#[test]
fn test_square_end_to_end() {
    let board = Board::default();
    let mut state = game_with(ShapeKind::O, board.clone());
    let decision = choose_move(&board, state.active().unwrap()).unwrap();
    run_to_lock(&mut state, &decision, DropStyle::Hard);

    let expected = board.merged(
        &autotris::core::Shape::of(ShapeKind::O),
        decision.column,
        decision.row,
    );
    assert_eq!(state.board(), &expected);
    assert_eq!(state.board().get(0, 21), Some(7));
    assert_eq!(state.board().get(1, 20), Some(7));
}

#[test]
fn test_soft_drop_lands_same_as_hard_drop() {
    let target = Placement { rotation: 1, column: 7, row: 19 };

    let mut hard = game_with(ShapeKind::S, Board::default());
    run_to_lock(&mut hard, &target, DropStyle::Hard);

    let mut soft = game_with(ShapeKind::S, Board::default());
    let actions = run_to_lock(&mut soft, &target, DropStyle::Soft);
    assert!(actions.iter().filter(|a| **a == GameAction::SoftDrop).count() > 1);

    assert_eq!(hard.board(), soft.board());
}

#[test]
fn test_rotation_uses_symmetry() {
    let bar = Piece::spawn(ShapeKind::I, 10);
    let target = Placement { rotation: 2, column: 3, row: 21 };
    // Two turns of the bar is its spawn orientation
    assert_eq!(next_action(&bar, &target, DropStyle::Hard), GameAction::HardDrop);
    assert_eq!(plan_actions(&bar, &target, DropStyle::Soft), vec![GameAction::SoftDrop]);
}

#[test]
fn test_errors_are_values() {
    let mut state = game_with(ShapeKind::T, Board::default());
    state.apply_action(GameAction::Pause);
    let target = Placement { rotation: 0, column: 0, row: 20 };
    let err = apply_step(&mut state, &target, DropStyle::Hard).unwrap_err();
    assert_eq!(err, ExecuteError::NotPlayable);
    assert_eq!(err.code(), "not_playable");
    assert_eq!(err.message(), "game is not playable");

    let mut unstarted = GameState::new(1);
    assert_eq!(
        apply_step(&mut unstarted, &target, DropStyle::Hard),
        Err(ExecuteError::NotPlayable)
    );
}

#[test]
fn test_shift_blocked_by_wall_of_cells() {
    let mut rows = vec![".........."; 22];
    rows[1] = "..#.......";
    let mut state = game_with(ShapeKind::O, Board::from_ascii(&rows));
    let target = Placement { rotation: 0, column: 0, row: 20 };
    // O spawns at column 4 and can step left once before the cell at (2, 1)
    assert!(apply_step(&mut state, &target, DropStyle::Hard).is_ok());
    assert_eq!(
        apply_step(&mut state, &target, DropStyle::Hard),
        Err(ExecuteError::ShiftBlocked)
    );
    assert_eq!(ExecuteError::ShiftBlocked.code(), "blocked");
}
