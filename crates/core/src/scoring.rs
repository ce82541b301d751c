//! Scoring module - line clear points, level progression, and gravity speed
//!
//! Levels start at 1. Clearing `n` lines awards `LINE_SCORES[n] * level`, and
//! the level goes up once the running line total reaches `level * 6`.

use crate::types::{
    BASE_DROP_MS, DROP_INTERVAL_MIN_MS, DROP_STEP_MS, LINES_PER_LEVEL, LINE_SCORES,
};

/// Points for clearing `lines` rows at `level`
///
/// More than four rows at once (only possible on boards built by hand) is
/// scored like four.
pub fn line_clear_score(lines: usize, level: u32) -> u32 {
    let idx = lines.min(LINE_SCORES.len() - 1);
    LINE_SCORES[idx].saturating_mul(level)
}

/// Points for dropping a piece `rows` rows by hand
pub fn drop_score(rows: u32, manual: bool) -> u32 {
    if manual {
        rows
    } else {
        0
    }
}

/// Level after reaching `total_lines`, starting from `level`
///
/// Only one level is gained per lock, matching the line-total check that runs
/// once after every clear.
pub fn level_after(level: u32, total_lines: u32) -> u32 {
    if total_lines >= level.saturating_mul(LINES_PER_LEVEL) {
        level + 1
    } else {
        level
    }
}

/// Gravity interval for a level, in milliseconds
pub fn drop_interval_ms(level: u32) -> u32 {
    let speedup = DROP_STEP_MS.saturating_mul(level.saturating_sub(1));
    BASE_DROP_MS
        .saturating_sub(speedup)
        .max(DROP_INTERVAL_MIN_MS)
}
