//! Placement enumeration
//!
//! A placement is where a piece would come to rest if it were turned to a
//! rotation, shifted to a column, and dropped straight down from the top.
//! Rotations are absolute: the number of clockwise turns from the spawn
//! orientation.

use autotris_core::{unique_rotation_count, Board, Shape};
use autotris_types::ShapeKind;

/// A candidate final resting position for the falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Placement {
    /// Clockwise turns from the spawn orientation
    pub rotation: u8,
    /// Column of the bounding box's left edge
    pub column: i32,
    /// Row of the bounding box's top edge once dropped; -1 if blocked at entry
    pub row: i32,
}

impl Placement {
    /// Whether the piece can enter the board at this column at all
    pub fn is_reachable(&self) -> bool {
        self.row >= 0
    }
}

/// Resting row of `shape` dropped straight down at `column`.
///
/// Rows are scanned from the top; the row before the first collision is the
/// answer. A result of `-1` means the shape collides already at row 0.
pub fn find_lowest_position(board: &Board, shape: &Shape, column: i32) -> i32 {
    let rows = board.rows() as i32;
    for row in 0..rows {
        if board.collides(shape, column, row) {
            return row - 1;
        }
    }
    rows - 1
}

/// Every placement of `kind`, rotation-major then column ascending.
///
/// Yields exactly `unique_rotation_count(kind) * (cols - width + 1)` entries
/// (rotations wider than the board contribute none).
pub fn enumerate_placements(board: &Board, kind: ShapeKind) -> Vec<Placement> {
    let mut out = Vec::with_capacity(4 * board.cols());
    for_each_placement(board, kind, |placement, _| out.push(placement));
    out
}

/// Visit every placement together with the shape it was computed for
pub(crate) fn for_each_placement(
    board: &Board,
    kind: ShapeKind,
    mut f: impl FnMut(Placement, &Shape),
) {
    let cols = board.cols();
    let mut shape = Shape::of(kind);
    for rotation in 0..unique_rotation_count(kind) {
        if shape.width() <= cols {
            for column in 0..=(cols - shape.width()) as i32 {
                let row = find_lowest_position(board, &shape, column);
                f(Placement { rotation, column, row }, &shape);
            }
        }
        shape = shape.rotate_clockwise();
    }
}
