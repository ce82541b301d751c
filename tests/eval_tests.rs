//! Board evaluator tests

use autotris::core::Board;
use autotris::engine::eval::{bumpiness, column_heights, complete_lines, count_holes};
use autotris::engine::{features, score, BoardFeatures};

#[test]
fn test_single_hole_under_cap() {
    let board = Board::from_ascii(&["....", "#...", ".#..", "##.."]);
    // Column 0: row 2 empty under row 1. Column 1 has no gap.
    assert_eq!(count_holes(&board), 1);
}

#[test]
fn test_stacked_holes_in_one_column() {
    let board = Board::from_ascii(&["#...", "....", "....", "#..."]);
    assert_eq!(count_holes(&board), 2);
}

#[test]
fn test_no_holes_without_cover() {
    let board = Board::from_ascii(&["....", "....", "#.#.", "####"]);
    assert_eq!(count_holes(&board), 0);
}

#[test]
fn test_heights_and_bumpiness() {
    let board = Board::from_ascii(&["....", "..#.", ".##.", "###."]);
    let heights = column_heights(&board);
    assert_eq!(heights, vec![1, 2, 3, 0]);
    assert_eq!(bumpiness(&heights), 1 + 1 + 3);
    assert_eq!(complete_lines(&board), 0);
}

#[test]
fn test_feature_vector() {
    let board = Board::from_ascii(&["....", "#...", "####", "#.##"]);
    assert_eq!(
        features(&board),
        BoardFeatures {
            aggregate_height: 3 + 2 + 2 + 2,
            complete_lines: 1,
            holes: 1,
            bumpiness: 1,
        }
    );
}

#[test]
fn test_score_is_deterministic() {
    let board = Board::from_ascii(&["......", "#..#..", "##.###", "#####."]);
    let first = score(&board);
    for _ in 0..10 {
        assert_eq!(score(&board), first);
    }
    assert_eq!(score(&board.clone()), first);
}

#[test]
fn test_lower_flat_stack_scores_higher() {
    let flat = Board::from_ascii(&["....", "....", "....", "##.."]);
    let tower = Board::from_ascii(&["....", "#...", "#...", "...."]);
    assert!(score(&flat) > score(&tower));
}
