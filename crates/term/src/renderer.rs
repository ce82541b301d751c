//! TerminalRenderer: flushes a framebuffer to a real terminal.
//!
//! The first frame (and any frame after a resize) is a full redraw; every other
//! frame only rewrites the runs of cells that changed.

use std::io::{self, Write};

use anyhow::{Context, Result};

use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};
use crate::game_view::Viewport;

pub struct TerminalRenderer {
    stdout: io::Stdout,
    last: Option<FrameBuffer>,
    buf: Vec<u8>,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            last: None,
            buf: Vec::with_capacity(64 * 1024),
        }
    }

    /// Current terminal size
    pub fn viewport() -> Result<Viewport> {
        let (w, h) = terminal::size().context("failed to query terminal size")?;
        Ok(Viewport::new(w, h))
    }

    /// Switch to raw mode on the alternate screen
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode().context("failed to enable raw mode")?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush_buf()?;
        Ok(())
    }

    /// Restore the terminal; safe to call after a failed `enter`
    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode().context("failed to disable raw mode")?;
        Ok(())
    }

    /// Force the next draw to be a full redraw.
    ///
    /// Useful on terminal resize events.
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Draw `fb`, diffing against the previous frame, then swap buffers.
    ///
    /// On return `fb` holds the previous frame; callers redraw it in full
    /// before the next call.
    pub fn draw_swap(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        self.buf.clear();
        let mut prev = match self.last.take() {
            Some(prev) if prev.width() == fb.width() && prev.height() == fb.height() => {
                encode_diff_into(&prev, fb, &mut self.buf)?;
                prev
            }
            stale => {
                encode_full_into(fb, &mut self.buf)?;
                let mut prev = stale.unwrap_or_else(|| FrameBuffer::new(0, 0));
                prev.resize(fb.width(), fb.height());
                prev
            }
        };
        self.flush_buf()?;

        std::mem::swap(&mut prev, fb);
        self.last = Some(prev);
        Ok(())
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout
            .write_all(&self.buf)
            .context("failed to write frame")?;
        self.stdout.flush().context("failed to flush terminal")?;
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Tracks the style last sent to the terminal so unchanged attributes are
/// not re-emitted.
#[derive(Default)]
struct Pen {
    style: Option<CellStyle>,
}

impl Pen {
    fn print(&mut self, out: &mut Vec<u8>, cell: Cell) -> Result<()> {
        let prev = self.style.replace(cell.style);
        let style = cell.style;
        let attrs_changed = prev.map_or(true, |p| p.bold != style.bold || p.dim != style.dim);
        if attrs_changed {
            out.queue(SetAttribute(Attribute::Reset))?;
            if style.bold {
                out.queue(SetAttribute(Attribute::Bold))?;
            }
            if style.dim {
                out.queue(SetAttribute(Attribute::Dim))?;
            }
        }
        // An attribute reset also resets colors.
        if attrs_changed || prev.map(|p| p.fg) != Some(style.fg) {
            out.queue(SetForegroundColor(rgb_to_color(style.fg)))?;
        }
        if attrs_changed || prev.map(|p| p.bg) != Some(style.bg) {
            out.queue(SetBackgroundColor(rgb_to_color(style.bg)))?;
        }
        out.queue(Print(cell.ch))?;
        Ok(())
    }

    fn finish(self, out: &mut Vec<u8>) -> Result<()> {
        out.queue(ResetColor)?;
        out.queue(SetAttribute(Attribute::Reset))?;
        Ok(())
    }
}

/// Encode a full-frame redraw into `out` without touching stdout.
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let mut pen = Pen::default();
    for (y, row) in rows(fb).enumerate() {
        out.queue(cursor::MoveTo(0, y as u16))?;
        for &cell in row {
            pen.print(out, cell)?;
        }
    }
    pen.finish(out)
}

/// Encode only the runs of cells that differ from `prev`.
pub fn encode_diff_into(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    let mut pen = Pen::default();
    for_each_changed_run(prev, next, |x, y, len| {
        out.queue(cursor::MoveTo(x, y))?;
        let start = y as usize * next.width() as usize + x as usize;
        for &cell in &next.cells()[start..start + len as usize] {
            pen.print(out, cell)?;
        }
        Ok(())
    })?;
    pen.finish(out)
}

fn rows(fb: &FrameBuffer) -> impl Iterator<Item = &[Cell]> + '_ {
    fb.cells().chunks(fb.width().max(1) as usize)
}

fn rgb_to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

/// Call `f(x, y, len)` for each horizontal run of changed cells.
/// Frames of different sizes are treated as fully changed.
fn for_each_changed_run(
    prev: &FrameBuffer,
    next: &FrameBuffer,
    mut f: impl FnMut(u16, u16, u16) -> Result<()>,
) -> Result<()> {
    if prev.width() != next.width() || prev.height() != next.height() {
        for y in 0..next.height() {
            f(0, y, next.width())?;
        }
        return Ok(());
    }

    for (y, (old, new)) in rows(prev).zip(rows(next)).enumerate() {
        let mut run: Option<usize> = None;
        for x in 0..=new.len() {
            let changed = x < new.len() && old[x] != new[x];
            match (run, changed) {
                (None, true) => run = Some(x),
                (Some(start), false) => {
                    f(start as u16, y as u16, (x - start) as u16)?;
                    run = None;
                }
                _ => {}
            }
        }
    }
    Ok(())
}
