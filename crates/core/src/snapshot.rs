use crate::pieces::Piece;
use crate::types::{Cell, ShapeKind, BOARD_COLS, BOARD_ROWS};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: ShapeKind,
    pub rotation: u8,
    pub x: i32,
    pub y: i32,
    /// Current shape rows, top to bottom
    pub cells: Vec<Vec<Cell>>,
}

impl ActiveSnapshot {
    /// Overwrite with `piece`, reusing the row buffers
    pub fn copy_from(&mut self, piece: &Piece) {
        self.kind = piece.kind;
        self.rotation = piece.rotation;
        self.x = piece.x;
        self.y = piece.y;
        copy_rows(&mut self.cells, piece.shape.rows());
    }
}

/// Copy `src` rows into `dst`, keeping existing allocations
pub(crate) fn copy_rows<'a>(dst: &mut Vec<Vec<Cell>>, src: impl ExactSizeIterator<Item = &'a [Cell]>) {
    dst.resize_with(src.len(), Vec::new);
    for (out, row) in dst.iter_mut().zip(src) {
        out.clear();
        out.extend_from_slice(row);
    }
}

impl From<&Piece> for ActiveSnapshot {
    fn from(value: &Piece) -> Self {
        Self {
            kind: value.kind,
            rotation: value.rotation,
            x: value.x,
            y: value.y,
            cells: value.shape.rows().map(|row| row.to_vec()).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub rows: usize,
    pub cols: usize,
    /// Playable rows only, top to bottom
    pub board: Vec<Vec<Cell>>,
    pub active: Option<ActiveSnapshot>,
    pub next: ShapeKind,
    pub paused: bool,
    pub game_over: bool,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub pieces: u32,
}

impl GameSnapshot {
    pub fn playable(&self) -> bool {
        !self.game_over && !self.paused
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            rows: BOARD_ROWS,
            cols: BOARD_COLS,
            board: vec![vec![0; BOARD_COLS]; BOARD_ROWS],
            active: None,
            next: ShapeKind::T,
            paused: false,
            game_over: false,
            score: 0,
            level: 1,
            lines: 0,
            pieces: 0,
        }
    }
}
