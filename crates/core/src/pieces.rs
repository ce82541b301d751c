//! Pieces module - shape catalog, matrix rotation, and the live falling piece
//!
//! Shapes are small row-major matrices. A cell value of 0 is empty; any other
//! value is filled and equals the kind's color id. Rotation is a plain matrix
//! transform with no wall kicks: width and height swap on every turn.

use arrayvec::ArrayVec;

use crate::board::Board;
use crate::types::{Cell, ShapeKind};

/// Largest shape dimension in the catalog
pub const MAX_SHAPE_DIM: usize = 4;

/// Row-major shape storage (at most 4x4)
pub type ShapeCells = ArrayVec<Cell, { MAX_SHAPE_DIM * MAX_SHAPE_DIM }>;

/// Catalog rows for a kind, in spawn orientation
fn catalog_rows(kind: ShapeKind) -> &'static [&'static [Cell]] {
    match kind {
        ShapeKind::T => &[&[1, 1, 1], &[0, 1, 0]],
        ShapeKind::S => &[&[0, 2, 2], &[2, 2, 0]],
        ShapeKind::Z => &[&[3, 3, 0], &[0, 3, 3]],
        ShapeKind::J => &[&[4, 0, 0], &[4, 4, 4]],
        ShapeKind::L => &[&[0, 0, 5], &[5, 5, 5]],
        ShapeKind::I => &[&[6, 6, 6, 6]],
        ShapeKind::O => &[&[7, 7], &[7, 7]],
    }
}

/// A shape matrix tagged with its kind
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Shape {
    kind: ShapeKind,
    width: u8,
    height: u8,
    cells: ShapeCells,
}

impl Shape {
    /// Spawn orientation of a catalog kind
    pub fn of(kind: ShapeKind) -> Self {
        let rows = catalog_rows(kind);
        let mut cells = ShapeCells::new();
        for row in rows {
            cells.extend(row.iter().copied());
        }
        Self {
            kind,
            width: rows[0].len() as u8,
            height: rows.len() as u8,
            cells,
        }
    }

    /// The kind's shape after `turns` clockwise rotations from spawn
    pub fn rotated(kind: ShapeKind, turns: u8) -> Self {
        let mut shape = Self::of(kind);
        for _ in 0..turns % 4 {
            shape = shape.rotate_clockwise();
        }
        shape
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    pub fn width(&self) -> usize {
        self.width as usize
    }

    pub fn height(&self) -> usize {
        self.height as usize
    }

    /// Cell at (col, row) inside the matrix; out-of-range reads as empty
    pub fn get(&self, col: usize, row: usize) -> Cell {
        if col >= self.width() || row >= self.height() {
            return 0;
        }
        self.cells[row * self.width() + col]
    }

    /// Iterate the filled cells as (dx, dy, value)
    pub fn filled(&self) -> impl Iterator<Item = (i32, i32, Cell)> + '_ {
        let width = self.width();
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &v)| v != 0)
            .map(move |(i, &v)| ((i % width) as i32, (i / width) as i32, v))
    }

    /// Rows of the matrix, top to bottom
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[Cell]> + '_ {
        self.cells.chunks(self.width())
    }

    /// Rotate 90° clockwise: an HxW matrix becomes WxH with
    /// `new[r][c] = old[c][W - 1 - r]`.
    pub fn rotate_clockwise(&self) -> Self {
        let (w, h) = (self.width(), self.height());
        let mut cells = ShapeCells::new();
        for r in 0..w {
            for c in 0..h {
                cells.push(self.cells[c * w + (w - 1 - r)]);
            }
        }
        Self {
            kind: self.kind,
            width: self.height,
            height: self.width,
            cells,
        }
    }
}

/// Free-function form of [`Shape::rotate_clockwise`].
pub fn rotate_clockwise(shape: &Shape) -> Shape {
    shape.rotate_clockwise()
}

/// Number of distinct orientations of a kind (O: 1, I: 2, others: 4).
pub fn unique_rotation_count(kind: ShapeKind) -> u8 {
    kind.unique_rotations()
}

/// Active falling piece
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: ShapeKind,
    /// Clockwise turns applied since spawn, modulo 4
    pub rotation: u8,
    pub shape: Shape,
    /// Column of the bounding box's left edge
    pub x: i32,
    /// Row of the bounding box's top edge
    pub y: i32,
}

impl Piece {
    /// Create a piece at the spawn position, centered on a board `cols` wide
    pub fn spawn(kind: ShapeKind, cols: usize) -> Self {
        let shape = Shape::of(kind);
        let x = (cols.saturating_sub(shape.width()) / 2) as i32;
        Self {
            kind,
            rotation: 0,
            shape,
            x,
            y: 0,
        }
    }

    /// Check whether the piece overlaps the board or leaves its sides
    pub fn collides(&self, board: &Board) -> bool {
        board.collides(&self.shape, self.x, self.y)
    }

    /// The same piece turned once clockwise in place
    pub fn rotated_cw(&self) -> Self {
        Self {
            rotation: (self.rotation + 1) % 4,
            shape: self.shape.rotate_clockwise(),
            ..self.clone()
        }
    }

    /// The same piece translated by (dx, dy)
    pub fn shifted(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..self.clone()
        }
    }

    /// Whether the current orientation is equivalent to `turns` clockwise
    /// rotations from spawn
    pub fn matches_rotation(&self, turns: u8) -> bool {
        let unique = self.kind.unique_rotations();
        self.rotation % unique == turns % unique
    }
}
