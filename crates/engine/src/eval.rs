//! Board evaluation: classic stack features and a fixed linear score.
//!
//! All scans cover the playable rows only; the floor row never counts.

use autotris_core::Board;

/// Weight on the summed column heights
pub const AGGREGATE_HEIGHT_WEIGHT: f64 = -0.510066;
/// Weight on full rows waiting to be cleared
pub const COMPLETE_LINES_WEIGHT: f64 = 0.760666;
/// Weight on covered empty cells
pub const HOLES_WEIGHT: f64 = -0.45663;
/// Weight on height differences between neighbouring columns
pub const BUMPINESS_WEIGHT: f64 = -0.284483;

/// Feature vector of a board
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoardFeatures {
    pub aggregate_height: u32,
    pub complete_lines: u32,
    pub holes: u32,
    pub bumpiness: u32,
}

impl BoardFeatures {
    /// Weighted sum of the features
    pub fn score(&self) -> f64 {
        AGGREGATE_HEIGHT_WEIGHT * self.aggregate_height as f64
            + COMPLETE_LINES_WEIGHT * self.complete_lines as f64
            + HOLES_WEIGHT * self.holes as f64
            + BUMPINESS_WEIGHT * self.bumpiness as f64
    }
}

/// Height of each column: `rows - r` for the topmost occupied playable row `r`,
/// 0 for an empty column.
pub fn column_heights(board: &Board) -> Vec<u32> {
    let rows = board.rows();
    (0..board.cols())
        .map(|c| {
            (0..rows)
                .find(|&r| board.row(r)[c] != 0)
                .map_or(0, |r| (rows - r) as u32)
        })
        .collect()
}

/// Empty cells below the first occupied cell of their column
pub fn count_holes(board: &Board) -> u32 {
    let rows = board.rows();
    let mut holes = 0u32;
    for c in 0..board.cols() {
        let Some(top) = (0..rows).find(|&r| board.row(r)[c] != 0) else {
            continue;
        };
        holes += (top..rows).filter(|&r| board.row(r)[c] == 0).count() as u32;
    }
    holes
}

pub fn bumpiness(heights: &[u32]) -> u32 {
    heights.windows(2).map(|w| w[0].abs_diff(w[1])).sum()
}

pub fn complete_lines(board: &Board) -> u32 {
    board.find_full_rows().len() as u32
}

pub fn features(board: &Board) -> BoardFeatures {
    let heights = column_heights(board);
    BoardFeatures {
        aggregate_height: heights.iter().sum(),
        complete_lines: complete_lines(board),
        holes: count_holes(board),
        bumpiness: bumpiness(&heights),
    }
}

/// Heuristic value of a board; higher is better. Pure and deterministic.
pub fn score(board: &Board) -> f64 {
    features(board).score()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_board_scores_zero() {
        let board = Board::default();
        assert_eq!(features(&board), BoardFeatures::default());
        assert_eq!(score(&board), 0.0);
    }

    #[test]
    fn heights_ignore_floor() {
        let board = Board::from_ascii(&["....", "..#.", "#.#."]);
        assert_eq!(column_heights(&board), vec![1, 0, 2, 0]);
        assert_eq!(bumpiness(&column_heights(&board)), 1 + 2 + 2);
    }

    #[test]
    fn holes_below_surface() {
        let board = Board::from_ascii(&[
            "#...",
            "..#.",
            "#...",
            "..#.",
        ]);
        // column 0: rows 1 and 3 empty below row 0; column 2: row 2 empty below row 1
        assert_eq!(count_holes(&board), 3);
    }

    #[test]
    fn full_rows_counted() {
        let board = Board::from_ascii(&["....", "####", "#.##", "####"]);
        let f = features(&board);
        assert_eq!(f.complete_lines, 2);
        assert_eq!(f.aggregate_height, 12);
        assert_eq!(f.holes, 1);
        assert_eq!(f.bumpiness, 0);
    }

    #[test]
    fn score_uses_fixed_weights() {
        let f = BoardFeatures {
            aggregate_height: 2,
            complete_lines: 1,
            holes: 3,
            bumpiness: 4,
        };
        let expected = -0.510066 * 2.0 + 0.760666 - 0.45663 * 3.0 - 0.284483 * 4.0;
        assert!((f.score() - expected).abs() < 1e-12);
    }
}
