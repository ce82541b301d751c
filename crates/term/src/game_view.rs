//! GameView: maps a `core::GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use std::fmt::Write;

use arrayvec::ArrayString;

use crate::core::{GameSnapshot, Shape};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::Cell as BoardCell;

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// What the side panel shows about the autonomous player.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AutopilotView {
    pub enabled: bool,
    /// Target rotation and column for the falling piece
    pub target: Option<(u8, i32)>,
    /// Heuristic value of the board the target leaves behind
    pub score: Option<f64>,
    pub fallbacks: u32,
}

/// A board value with no palette entry, and where it was first seen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownCell {
    pub value: BoardCell,
    pub x: u16,
    pub y: u16,
}

/// Problems noticed while drawing. Drawing itself never fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderReport {
    /// Cells drawn as background because their value had no color
    pub unknown_cells: u32,
    pub first_unknown: Option<UnknownCell>,
}

impl RenderReport {
    pub fn is_clean(&self) -> bool {
        self.unknown_cells == 0
    }

    /// Fold another frame's report into this one
    pub fn absorb(&mut self, other: RenderReport) {
        self.unknown_cells = self.unknown_cells.saturating_add(other.unknown_cells);
        if self.first_unknown.is_none() {
            self.first_unknown = other.first_unknown;
        }
    }

    fn record(&mut self, value: BoardCell, x: u16, y: u16) {
        self.unknown_cells = self.unknown_cells.saturating_add(1);
        if self.first_unknown.is_none() {
            self.first_unknown = Some(UnknownCell { value, x, y });
        }
    }
}

/// Empty-cell color for the checkerboard
pub const GRID_COLOR: Rgb = Rgb::new(35, 35, 35);
const BLACK: Rgb = Rgb::new(0, 0, 0);

/// Cell colors by board value. 0 is empty; 1..=7 are the shape kinds in
/// catalog order; 8 is the checkerboard tone.
pub const PALETTE: [Rgb; 9] = [
    BLACK,
    Rgb::new(255, 85, 85),
    Rgb::new(100, 200, 115),
    Rgb::new(120, 108, 245),
    Rgb::new(255, 140, 50),
    Rgb::new(50, 120, 52),
    Rgb::new(146, 202, 73),
    Rgb::new(150, 161, 218),
    GRID_COLOR,
];

/// Color for a board value, `None` when it is outside the palette
pub fn palette_color(value: BoardCell) -> Option<Rgb> {
    PALETTE.get(value as usize).copied()
}

/// A lightweight terminal renderer for the board and its side panel.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
            anchor_y: AnchorY::Center,
        }
    }
}

impl GameView {
    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Render the snapshot into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames and only resize when the
    /// terminal size changes.
    pub fn render_into(
        &self,
        snap: &GameSnapshot,
        autopilot: Option<&AutopilotView>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) -> RenderReport {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        let mut report = RenderReport::default();

        // Oversized boards clip at the framebuffer edge.
        let board_px_w = clamp_u16(snap.cols).saturating_mul(self.cell_w);
        let board_px_h = clamp_u16(snap.rows).saturating_mul(self.cell_h);
        let frame_w = board_px_w.saturating_add(2);
        let frame_h = board_px_h.saturating_add(2);

        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
            AnchorY::Top => 0,
        };

        let border = CellStyle::text(Rgb::new(255, 255, 255));
        self.draw_border(fb, start_x, start_y, frame_w, frame_h, border);

        // Locked cells over the checkerboard.
        for (y, row) in snap.board.iter().enumerate() {
            for (x, &value) in row.iter().enumerate() {
                let (x, y) = (clamp_u16(x), clamp_u16(y));
                let color = match value {
                    0 => background(x, y),
                    v => palette_color(v).unwrap_or_else(|| {
                        report.record(v, x, y);
                        background(x, y)
                    }),
                };
                self.fill_cell_rect(fb, start_x, start_y, x, y, color);
            }
        }

        // Active piece.
        if let Some(active) = snap.active.as_ref() {
            for (dy, row) in active.cells.iter().enumerate() {
                for (dx, &value) in row.iter().enumerate() {
                    if value == 0 {
                        continue;
                    }
                    let x = active.x + dx as i32;
                    let y = active.y + dy as i32;
                    if x < 0 || x >= snap.cols as i32 || y < 0 || y >= snap.rows as i32 {
                        continue;
                    }
                    let (x, y) = (x as u16, y as u16);
                    let color = palette_color(value).unwrap_or_else(|| {
                        report.record(value, x, y);
                        background(x, y)
                    });
                    self.fill_cell_rect(fb, start_x, start_y, x, y, color);
                }
            }
        }

        self.draw_side_panel(fb, snap, autopilot, viewport, start_x, start_y, frame_w);

        // Overlays.
        if snap.paused {
            self.draw_overlay_text(fb, start_x, start_y, frame_w, frame_h, 0, "PAUSED");
        } else if snap.game_over {
            self.draw_overlay_text(fb, start_x, start_y, frame_w, frame_h, 0, "GAME OVER");
            self.draw_overlay_text(fb, start_x, start_y, frame_w, frame_h, 2, "SPACE: again");
        }

        report
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(
        &self,
        snap: &GameSnapshot,
        autopilot: Option<&AutopilotView>,
        viewport: Viewport,
    ) -> (FrameBuffer, RenderReport) {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        let report = self.render_into(snap, autopilot, viewport, &mut fb);
        (fb, report)
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
        if w < 2 || h < 2 {
            return;
        }

        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    fn fill_cell_rect(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        cell_x: u16,
        cell_y: u16,
        color: Rgb,
    ) {
        let px = start_x
            .saturating_add(1)
            .saturating_add(cell_x.saturating_mul(self.cell_w));
        let py = start_y
            .saturating_add(1)
            .saturating_add(cell_y.saturating_mul(self.cell_h));
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ' ', CellStyle::solid(color));
    }

    fn draw_preview(&self, fb: &mut FrameBuffer, x: u16, y: u16, shape: &Shape) {
        for (dx, dy, value) in shape.filled() {
            let color = palette_color(value).unwrap_or(BLACK);
            let px = x + dx as u16 * self.cell_w;
            let py = y + dy as u16 * self.cell_h;
            fb.fill_rect(px, py, self.cell_w, self.cell_h, ' ', CellStyle::solid(color));
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        autopilot: Option<&AutopilotView>,
        viewport: Viewport,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
    ) {
        let panel_x = start_x.saturating_add(frame_w).saturating_add(2);
        if panel_x >= viewport.width {
            return;
        }
        let panel_w = viewport.width - panel_x;
        if panel_w < 12 {
            return;
        }

        let label = CellStyle {
            bold: true,
            ..CellStyle::text(Rgb::new(255, 255, 255))
        };
        let value = CellStyle::text(Rgb::new(200, 200, 200));

        let mut y = start_y;
        fb.put_str(panel_x, y, "Next:", label);
        y = y.saturating_add(1);
        let next = Shape::of(snap.next);
        self.draw_preview(fb, panel_x, y, &next);
        y = y.saturating_add(next.height() as u16 * self.cell_h + 1);

        for (name, v) in [
            ("Score:", snap.score),
            ("Level:", snap.level),
            ("Lines:", snap.lines),
            ("Pieces:", snap.pieces),
        ] {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x + 8, y, v, value);
            y = y.saturating_add(2);
        }

        fb.put_str(panel_x, y, "Auto:", label);
        let Some(ap) = autopilot.filter(|ap| ap.enabled) else {
            fb.put_str(panel_x + 8, y, "off", value);
            return;
        };
        fb.put_str(panel_x + 8, y, "on", value);
        y = y.saturating_add(1);

        let dim = CellStyle { dim: true, ..value };
        match ap.target {
            Some((rotation, column)) => {
                fb.put_str(panel_x, y, "rot", dim);
                fb.put_u32(panel_x + 4, y, rotation as u32, value);
                fb.put_str(panel_x + 6, y, "col", dim);
                fb.put_u32(panel_x + 10, y, column.max(0) as u32, value);
            }
            None => fb.put_str(panel_x, y, "no target", dim),
        }
        y = y.saturating_add(1);

        if let Some(score) = ap.score {
            fb.put_str(panel_x, y, "eval", dim);
            let mut text = ArrayString::<16>::new();
            if write!(text, "{:.2}", score).is_err() {
                text.clear();
                text.push('?');
            }
            fb.put_str(panel_x + 5, y, &text, value);
            y = y.saturating_add(1);
        }

        fb.put_str(panel_x, y, "fallbacks", dim);
        fb.put_u32(panel_x + 10, y, ap.fallbacks, value);
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_overlay_text(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
        frame_h: u16,
        line: u16,
        text: &str,
    ) {
        let mid_y = start_y.saturating_add(frame_h / 2).saturating_add(line);
        let text_w = text.chars().count() as u16;
        let x = start_x.saturating_add(frame_w.saturating_sub(text_w) / 2);
        let style = CellStyle {
            bold: true,
            ..CellStyle::text(Rgb::new(255, 255, 255))
        };
        fb.put_str(x, mid_y, text, style);
    }
}

fn clamp_u16(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

/// Checkerboard tone behind an empty cell
fn background(x: u16, y: u16) -> Rgb {
    if x % 2 == y % 2 {
        GRID_COLOR
    } else {
        BLACK
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameState;

    fn top_view() -> GameView {
        GameView::default().with_anchor_y(AnchorY::Top)
    }

    #[test]
    fn checkerboard_background() {
        let snap = GameSnapshot::default();
        let (fb, report) = top_view().render(&snap, None, Viewport::new(22, 24));
        assert!(report.is_clean());
        // Board starts at (1, 1); two columns per cell.
        assert_eq!(fb.get(1, 1).unwrap().style.bg, GRID_COLOR);
        assert_eq!(fb.get(3, 1).unwrap().style.bg, BLACK);
        assert_eq!(fb.get(3, 2).unwrap().style.bg, GRID_COLOR);
    }

    #[test]
    fn locked_cells_use_palette() {
        let mut snap = GameSnapshot::default();
        snap.board[21][0] = 6;
        let (fb, _) = top_view().render(&snap, None, Viewport::new(22, 24));
        assert_eq!(fb.get(1, 22).unwrap().style.bg, PALETTE[6]);
        assert_eq!(fb.get(2, 22).unwrap().style.bg, PALETTE[6]);
    }

    #[test]
    fn unknown_values_counted_not_drawn() {
        let mut snap = GameSnapshot::default();
        snap.board[21][0] = 14;
        snap.board[21][3] = 200;
        let (fb, report) = top_view().render(&snap, None, Viewport::new(22, 24));
        assert_eq!(report.unknown_cells, 2);
        assert_eq!(
            report.first_unknown,
            Some(UnknownCell { value: 14, x: 0, y: 21 })
        );
        // (0, 21): 0 % 2 != 21 % 2, so plain black
        assert_eq!(fb.get(1, 22).unwrap().style.bg, BLACK);

        let mut total = RenderReport::default();
        total.absorb(report);
        total.absorb(report);
        assert_eq!(total.unknown_cells, 4);
        assert_eq!(total.first_unknown.map(|u| u.value), Some(14));
    }

    #[test]
    fn active_piece_drawn() {
        let mut state = GameState::new(3);
        state.start();
        let snap = state.snapshot();
        let active = snap.active.as_ref().unwrap();
        let (dx, _, v) = Shape::of(active.kind).filled().next().unwrap();
        let (fb, _) = top_view().render(&snap, None, Viewport::new(22, 24));
        let px = 1 + (active.x + dx) as u16 * 2;
        assert_eq!(fb.get(px, 1).unwrap().style.bg, PALETTE[v as usize]);
    }

    #[test]
    fn side_panel_and_overlays() {
        let mut snap = GameSnapshot::default();
        snap.score = 1234;
        snap.game_over = true;
        let ap = AutopilotView {
            enabled: true,
            target: Some((1, 4)),
            score: Some(-3.5),
            fallbacks: 2,
        };
        let (fb, _) = top_view().render(&snap, Some(&ap), Viewport::new(60, 24));
        let text: Vec<String> = (0..24).map(|y| fb.row_text(y)).collect();
        assert!(text.iter().any(|l| l.contains("Score:") && l.contains("1234")));
        assert!(text.iter().any(|l| l.contains("GAME OVER")));
        assert!(text.iter().any(|l| l.contains("-3.50")));
        assert!(text.iter().any(|l| l.contains("fallbacks") && l.contains('2')));
    }

    #[test]
    fn paused_overlay() {
        let snap = GameSnapshot {
            paused: true,
            ..GameSnapshot::default()
        };
        let (fb, _) = top_view().render(&snap, None, Viewport::new(60, 24));
        assert!((0..24).any(|y| fb.row_text(y).contains("PAUSED")));
    }

    #[test]
    fn oversized_board_clips_instead_of_overflowing() {
        let mut state = GameState::with_size(3, 40, 40_000);
        state.start();
        let snap = state.snapshot();

        let (fb, report) = GameView::default().render(&snap, None, Viewport::new(80, 24));
        assert!(report.is_clean());
        assert_eq!(fb.get(0, 0).map(|c| c.ch), Some('┌'));
    }
}
