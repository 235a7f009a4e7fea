//! Severity ordering and grid row keys.

use crate::model::{Category, Phase, Row};

/// Phase bonus that lifts every Set above every Ready of any category.
pub const SET_BONUS: u32 = 100;

/// `categoryIndex * 10 + (Set ? bonus : 0)`.
///
/// With `bonus = 0` Ready and Set of one category share a bucket.
pub fn severity_order(category: Category, phase: Phase, bonus: u32) -> u32 {
    let phase_bonus = if phase == Phase::Set { bonus } else { 0 };
    category.index() * 10 + phase_bonus
}

/// Display priority of a row (Set first, then category).
pub fn row_severity(row: &Row) -> u32 {
    severity_order(row.category, row.phase, SET_BONUS)
}

/// Phase-sensitive timeline key: `categoryIndex * 10 + phaseIndex`.
pub fn timeline_row_key(category: Category, phase: Phase) -> u32 {
    category.index() * 10 + phase.index()
}
