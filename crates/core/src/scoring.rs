//! Scoring module - score table, leveling and the speed curve
//!
//! - Line clears score `(level + 1) * LINE_CLEAR_SCORES[n]`.
//! - Soft drop scores 1 point per gravity step taken while held.
//! - Hard drop scores 2 points per row travelled.
//! - Level goes up every `LEVEL_STEP` cleared lines.

use crate::types::{
    HARD_DROP_POINTS_PER_ROW, LEVEL_STEP, LINE_CLEAR_SCORES, SOFT_DROP_INTERVAL_MS,
    SOFT_DROP_POINTS_PER_ROW, SPEED_TABLE_MS,
};

/// Calculate line clear score
/// lines: number of lines cleared at once (0-4)
/// level: current level (0-based)
pub fn calculate_line_score(lines: u32, level: u32) -> u32 {
    match LINE_CLEAR_SCORES.get(lines as usize) {
        Some(&base) => base.saturating_mul(level.saturating_add(1)),
        None => 0,
    }
}

/// Calculate drop score
/// soft_drop: +1 per row
/// hard_drop: +2 per row
pub fn calculate_drop_score(rows: u32, is_hard_drop: bool) -> u32 {
    if is_hard_drop {
        rows.saturating_mul(HARD_DROP_POINTS_PER_ROW)
    } else {
        rows.saturating_mul(SOFT_DROP_POINTS_PER_ROW)
    }
}

/// Level for a cumulative line count
pub fn calculate_level(total_lines: u32) -> u32 {
    total_lines / LEVEL_STEP
}

/// Gravity interval for a level (in milliseconds)
///
/// Levels past the end of the speed table stay on its last entry.
pub fn get_drop_interval_ms(level: u32) -> u32 {
    let last = SPEED_TABLE_MS.len() - 1;
    SPEED_TABLE_MS[(level as usize).min(last)]
}

/// Tick interval actually in effect
pub fn effective_interval_ms(level: u32, soft_drop: bool) -> u32 {
    if soft_drop {
        SOFT_DROP_INTERVAL_MS
    } else {
        get_drop_interval_ms(level)
    }
}
