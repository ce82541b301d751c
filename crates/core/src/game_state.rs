//! Game state module - manages the complete live session
//!
//! This module ties together the board, the falling piece, the piece source,
//! and scoring. It owns all mutable game state; nothing is global. Callers
//! drive it with [`GameAction`]s and with [`GameState::tick`] for gravity.

use crate::board::{lock_piece_and_clear_lines, Board};
use crate::pieces::Piece;
use crate::rng::PieceSource;
use crate::scoring::{drop_interval_ms, drop_score, level_after, line_clear_score};
use crate::snapshot::{copy_rows, ActiveSnapshot, GameSnapshot};
use crate::types::{GameAction, LockEvent, ShapeKind, BOARD_COLS, BOARD_ROWS};

/// Terminal condition: the piece already overlaps the board where it stands.
pub fn is_game_over(board: &Board, piece: &Piece) -> bool {
    piece.collides(board)
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    active: Option<Piece>,
    source: PieceSource,
    /// Monotonic id for spawned pieces, kept across restarts.
    piece_id: u32,
    pieces_locked: u32,
    /// Last lock event (consumed by observers).
    last_event: Option<LockEvent>,
    score: u32,
    level: u32,
    lines: u32,
    drop_timer_ms: u32,
    paused: bool,
    game_over: bool,
    started: bool,
}

impl GameState {
    /// Create a new game on the default 22x10 board
    pub fn new(seed: u32) -> Self {
        Self::with_size(seed, BOARD_ROWS, BOARD_COLS)
    }

    /// Create a new game with custom board dimensions
    pub fn with_size(seed: u32, rows: usize, cols: usize) -> Self {
        Self::with_board(seed, Board::new(rows, cols))
    }

    /// Create a new game on a prepared board
    pub fn with_board(seed: u32, board: Board) -> Self {
        Self {
            board,
            active: None,
            source: PieceSource::new(seed),
            piece_id: 0,
            pieces_locked: 0,
            last_event: None,
            score: 0,
            level: 1,
            lines: 0,
            drop_timer_ms: 0,
            paused: false,
            game_over: false,
            started: false,
        }
    }

    /// Start the game and spawn the first piece
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        self.spawn_piece();
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    /// Whether actions and gravity currently apply
    pub fn playable(&self) -> bool {
        self.started && !self.paused && !self.game_over
    }

    pub fn piece_id(&self) -> u32 {
        self.piece_id
    }

    pub fn pieces_locked(&self) -> u32 {
        self.pieces_locked
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn next_kind(&self) -> ShapeKind {
        self.source.peek()
    }

    pub fn active(&self) -> Option<&Piece> {
        self.active.as_ref()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mutable board access for tests and scripted setups
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// Replace the active piece (tests and scripted setups)
    pub fn set_active(&mut self, piece: Piece) {
        self.game_over = is_game_over(&self.board, &piece);
        self.active = Some(piece);
    }

    /// Current gravity interval
    pub fn drop_interval_ms(&self) -> u32 {
        drop_interval_ms(self.level)
    }

    /// Copy the state into `out`, reusing its buffers
    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.rows = self.board.rows();
        out.cols = self.board.cols();
        copy_rows(&mut out.board, self.board.playable_rows());
        match (&mut out.active, &self.active) {
            (Some(dst), Some(piece)) => dst.copy_from(piece),
            (slot, piece) => *slot = piece.as_ref().map(ActiveSnapshot::from),
        }
        out.next = self.source.peek();
        out.paused = self.paused;
        out.game_over = self.game_over;
        out.score = self.score;
        out.level = self.level;
        out.lines = self.lines;
        out.pieces = self.pieces_locked;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Spawn the previewed piece at the top center.
    /// Returns false (and ends the game) if the spawn position is blocked.
    pub fn spawn_piece(&mut self) -> bool {
        let kind = self.source.draw();
        let piece = Piece::spawn(kind, self.board.cols());

        self.piece_id = self.piece_id.wrapping_add(1);
        self.drop_timer_ms = 0;

        if is_game_over(&self.board, &piece) {
            self.game_over = true;
        }
        self.active = Some(piece);

        !self.game_over
    }

    /// Try to move the active piece horizontally.
    ///
    /// The target column is clamped to keep the bounding box on the board,
    /// then rejected if it collides.
    pub(crate) fn try_move(&mut self, dx: i32) -> bool {
        if !self.playable() {
            return false;
        }
        let Some(active) = self.active.as_ref() else {
            return false;
        };

        let max_x = self.board.cols().saturating_sub(active.shape.width()) as i32;
        let new_x = (active.x + dx).clamp(0, max_x);
        if new_x == active.x {
            return false;
        }

        let moved = active.shifted(new_x - active.x, 0);
        if moved.collides(&self.board) {
            return false;
        }
        self.active = Some(moved);
        true
    }

    /// Try to rotate the active piece clockwise in place (no kicks)
    pub(crate) fn try_rotate(&mut self) -> bool {
        if !self.playable() {
            return false;
        }
        let Some(active) = self.active.as_ref() else {
            return false;
        };

        let rotated = active.rotated_cw();
        if rotated.collides(&self.board) {
            return false;
        }
        self.active = Some(rotated);
        true
    }

    /// Move the active piece down one row, locking it if it cannot move.
    ///
    /// `manual` drops score one point. Returns true if the piece locked.
    pub(crate) fn soft_drop(&mut self, manual: bool) -> bool {
        if !self.playable() {
            return false;
        }
        let Some(active) = self.active.as_ref() else {
            return false;
        };

        self.score += drop_score(1, manual);

        let lowered = active.shifted(0, 1);
        if lowered.collides(&self.board) {
            self.lock_piece();
            return true;
        }
        self.active = Some(lowered);
        false
    }

    /// Soft drop repeatedly until the piece locks. Returns rows travelled.
    pub(crate) fn hard_drop(&mut self) -> u32 {
        let mut rows = 0;
        while self.playable() && self.active.is_some() {
            if self.soft_drop(true) {
                break;
            }
            rows += 1;
        }
        rows
    }

    /// Lock the active piece where it stands, clear lines, and spawn the next piece
    pub fn lock_piece(&mut self) {
        let Some(active) = self.active.take() else {
            return;
        };

        let (board, cleared) =
            lock_piece_and_clear_lines(&self.board, &active.shape, active.x, active.y);
        self.board = board;
        self.pieces_locked = self.pieces_locked.wrapping_add(1);

        let line_clear_score = self.add_cleared_lines(cleared);
        self.last_event = Some(LockEvent {
            lines_cleared: cleared as u32,
            line_clear_score,
        });

        if !self.game_over {
            self.spawn_piece();
        }
    }

    /// Credit `cleared` lines: score, line total, and level. Returns points awarded.
    fn add_cleared_lines(&mut self, cleared: usize) -> u32 {
        let points = line_clear_score(cleared, self.level);
        self.lines += cleared as u32;
        self.score += points;
        self.level = level_after(self.level, self.lines);
        points
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    /// Advance gravity timers; returns true when a gravity step ran.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if !self.playable() || self.active.is_none() {
            return false;
        }

        self.drop_timer_ms += elapsed_ms;
        if self.drop_timer_ms < self.drop_interval_ms() {
            return false;
        }

        self.drop_timer_ms = 0;
        self.soft_drop(false);
        true
    }

    /// Apply a game action; returns false if it had no effect
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.try_move(-1),
            GameAction::MoveRight => self.try_move(1),
            GameAction::RotateCw => self.try_rotate(),
            GameAction::SoftDrop => {
                if !self.playable() || self.active.is_none() {
                    return false;
                }
                self.soft_drop(true);
                true
            }
            GameAction::HardDrop => {
                if !self.playable() || self.active.is_none() {
                    return false;
                }
                self.hard_drop();
                true
            }
            GameAction::Pause => {
                if self.game_over {
                    return false;
                }
                self.paused = !self.paused;
                true
            }
            GameAction::Restart => {
                if !self.game_over {
                    return false;
                }
                self.restart();
                true
            }
        }
    }

    /// Start over on an empty board of the same size.
    ///
    /// The previewed piece is the first one of the new game, and piece ids
    /// keep counting up so per-piece caches never see a reused id.
    /// Only honoured through [`GameAction::Restart`] once the game is over.
    pub fn restart(&mut self) {
        let board = Board::new(self.board.rows(), self.board.cols());
        let piece_id = self.piece_id;
        let source = std::mem::take(&mut self.source);
        *self = Self {
            source,
            piece_id,
            ..Self::with_board(1, board)
        };
        self.start();
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}
