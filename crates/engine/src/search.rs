//! One-ply move selection
//!
//! Every placement of the falling piece is simulated on a private copy of the
//! board and scored; the best one wins. The live board is only read.

use autotris_core::{Board, Piece};
use autotris_types::ShapeKind;

use crate::eval;
use crate::placement::{for_each_placement, Placement};

/// A placement with the evaluator's score of the board it leaves behind
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredPlacement {
    pub placement: Placement,
    /// `None` when the piece cannot enter the board at this column
    pub score: Option<f64>,
}

/// Score every placement of `kind`, in enumeration order
pub fn rank_placements(board: &Board, kind: ShapeKind) -> Vec<ScoredPlacement> {
    let mut out = Vec::new();
    for_each_placement(board, kind, |placement, shape| {
        let score = placement.is_reachable().then(|| {
            let after = board.merged(shape, placement.column, placement.row);
            eval::score(&after)
        });
        out.push(ScoredPlacement { placement, score });
    });
    out
}

/// Best placement for the falling piece.
///
/// Candidates blocked at entry are skipped. Ties keep the first candidate in
/// enumeration order. Returns `None` only when every candidate is blocked.
pub fn choose_move(board: &Board, piece: &Piece) -> Option<Placement> {
    choose_scored_move(board, piece).map(|best| best.placement)
}

/// [`choose_move`] together with the winning score
pub fn choose_scored_move(board: &Board, piece: &Piece) -> Option<ScoredPlacement> {
    let mut best: Option<ScoredPlacement> = None;
    for_each_placement(board, piece.kind, |placement, shape| {
        if !placement.is_reachable() {
            return;
        }
        let after = board.merged(shape, placement.column, placement.row);
        let score = eval::score(&after);
        let better = match best.and_then(|b| b.score) {
            Some(top) => score > top,
            None => true,
        };
        if better {
            best = Some(ScoredPlacement {
                placement,
                score: Some(score),
            });
        }
    });
    best
}
