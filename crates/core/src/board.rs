//! Board module - manages the game grid
//!
//! The board is a `rows x cols` grid of cells stored as a flat row-major array,
//! with one extra floor row appended below the last playable row. The floor is
//! always fully occupied, so it bounds every collision check and is never
//! removed by line clears.
//!
//! Coordinates: (x, y) where x is the column (left to right) and y is the row
//! (top to bottom). Rows above 0 are open sky: shape cells there never collide
//! and are discarded on merge.

use crate::pieces::Shape;
use crate::types::{Cell, BOARD_COLS, BOARD_ROWS};

/// Value stored in every floor cell
pub const FLOOR_CELL: Cell = 1;

/// The game board with a permanent floor row
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    rows: usize,
    cols: usize,
    /// Flat array of cells, row-major order (y * cols + x), floor row last
    cells: Vec<Cell>,
}

impl Board {
    /// Create an empty board with `rows` playable rows
    pub fn new(rows: usize, cols: usize) -> Self {
        let mut cells = vec![0; (rows + 1) * cols];
        cells[rows * cols..].fill(FLOOR_CELL);
        Self { rows, cols, cells }
    }

    /// Build a board from text rows, top to bottom, floor excluded.
    ///
    /// `.` is empty, a digit is that cell value, any other character is `1`.
    /// Every row must have the same length.
    ///
    /// # Examples
    ///
    /// ```
    /// use autotris_core::Board;
    ///
    /// let board = Board::from_ascii(&["....", "#..#", "####"]);
    /// assert_eq!(board.rows(), 3);
    /// assert_eq!(board.cols(), 4);
    /// assert_eq!(board.find_full_rows(), vec![2]);
    /// ```
    pub fn from_ascii(lines: &[&str]) -> Self {
        let cols = lines.first().map(|l| l.chars().count()).unwrap_or(0);
        let mut board = Self::new(lines.len(), cols);
        for (y, line) in lines.iter().enumerate() {
            assert_eq!(line.chars().count(), cols, "ragged board row {}", y);
            for (x, ch) in line.chars().enumerate() {
                let cell = match ch {
                    '.' => 0,
                    c => c.to_digit(10).map(|d| d as Cell).unwrap_or(1),
                };
                board.cells[y * cols + x] = cell;
            }
        }
        board
    }

    /// Calculate flat index from (x, y), floor row included
    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || x >= self.cols as i32 || y < 0 || y > self.rows as i32 {
            return None;
        }
        Some((y as usize) * self.cols + (x as usize))
    }

    /// Number of playable rows (floor excluded)
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Rows including the floor
    pub fn total_rows(&self) -> usize {
        self.rows + 1
    }

    /// Get cell at (x, y); the floor row is readable at `y == rows()`.
    /// Returns None if out of bounds.
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Set a playable cell at (x, y).
    /// Returns false if out of bounds or on the floor row.
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        if y >= self.rows as i32 {
            return false;
        }
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// A row as a slice (floor row allowed)
    pub fn row(&self, y: usize) -> &[Cell] {
        let start = y * self.cols;
        &self.cells[start..start + self.cols]
    }

    /// Playable rows, top to bottom
    pub fn playable_rows(&self) -> impl ExactSizeIterator<Item = &[Cell]> + '_ {
        self.cells[..self.rows * self.cols].chunks(self.cols)
    }

    /// Check whether `shape` placed with its top-left corner at (x, y)
    /// overlaps an occupied cell or leaves the grid.
    ///
    /// Cells above row 0 never collide on their own.
    pub fn collides(&self, shape: &Shape, x: i32, y: i32) -> bool {
        for (dx, dy, _) in shape.filled() {
            let px = x + dx;
            let py = y + dy;
            if py < 0 {
                if px < 0 || px >= self.cols as i32 {
                    return true;
                }
                continue;
            }
            match self.get(px, py) {
                Some(0) => {}
                _ => return true,
            }
        }
        false
    }

    /// Add the shape's cells into the board at (x, y), the same alignment
    /// [`Board::collides`] uses. Cells above row 0 or outside the grid are dropped.
    pub fn merge(&mut self, shape: &Shape, x: i32, y: i32) {
        for (dx, dy, value) in shape.filled() {
            let px = x + dx;
            let py = y + dy;
            if py >= self.rows as i32 {
                continue;
            }
            if let Some(idx) = self.index(px, py) {
                self.cells[idx] = self.cells[idx].saturating_add(value);
            }
        }
    }

    /// Copy-on-write form of [`Board::merge`]
    pub fn merged(&self, shape: &Shape, x: i32, y: i32) -> Self {
        let mut next = self.clone();
        next.merge(shape, x, y);
        next
    }

    /// Check if a playable row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= self.rows {
            return false;
        }
        self.row(y).iter().all(|&cell| cell != 0)
    }

    /// Indices of the full playable rows, top to bottom
    pub fn find_full_rows(&self) -> Vec<usize> {
        (0..self.rows).filter(|&y| self.is_row_full(y)).collect()
    }

    /// Delete row `y` and prepend an empty row at the top.
    /// The floor row and out-of-range rows are left alone.
    pub fn remove_row(&mut self, y: usize) {
        if y >= self.rows {
            return;
        }

        let width = self.cols;

        // Shift all rows above down by one
        for row in (1..=y).rev() {
            let src_start = (row - 1) * width;
            self.cells
                .copy_within(src_start..src_start + width, row * width);
        }

        self.cells[..width].fill(0);
    }

    /// Clear all full rows and return how many were removed
    /// Uses a two-pointer pass from the bottom playable row upward
    pub fn clear_full_rows(&mut self) -> usize {
        let width = self.cols;
        let mut write_y = self.rows;
        let mut cleared = 0;

        for read_y in (0..self.rows).rev() {
            if self.is_row_full(read_y) {
                cleared += 1;
            } else {
                write_y -= 1;
                if write_y != read_y {
                    let src_start = read_y * width;
                    self.cells
                        .copy_within(src_start..src_start + width, write_y * width);
                }
            }
        }

        self.cells[..write_y * width].fill(0);
        cleared
    }

    /// Number of non-empty playable cells
    pub fn occupied_count(&self) -> usize {
        self.cells[..self.rows * self.cols]
            .iter()
            .filter(|&&c| c != 0)
            .count()
    }

    /// Get a reference to the internal cells array (floor row last)
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(BOARD_ROWS, BOARD_COLS)
    }
}

/// Merge `shape` at (x, y) into a copy of `board`, then clear every full row.
/// Returns the new board and the number of rows cleared.
pub fn lock_piece_and_clear_lines(board: &Board, shape: &Shape, x: i32, y: i32) -> (Board, usize) {
    let mut next = board.merged(shape, x, y);
    let cleared = next.clear_full_rows();
    (next, cleared)
}
