//! Row Priority Resolution
//!
//! Decides which row keeps a (date, grid row) slot when several rows land on it.
//!
//! | strategy         | higher wins on          | equal rank       |
//! |------------------|-------------------------|------------------|
//! | `ValidityRanked` | both phases valid > this phase valid > none | earlier row stays |
//! | `KeepAll`        | no resolution           | every row kept   |
//!
//! Resolution is a left-to-right fold, so with equal ranks the outcome depends
//! on input order.

use serde::{Deserialize, Serialize};

use crate::model::Row;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    #[default]
    ValidityRanked,
    KeepAll,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    KeepExisting,
    TakeCandidate,
    KeepBoth,
}

pub fn resolve(tie_break: TieBreak, existing: &Row, candidate: &Row) -> Resolution {
    match tie_break {
        TieBreak::KeepAll => Resolution::KeepBoth,
        TieBreak::ValidityRanked => {
            if candidate.validity_rank() > existing.validity_rank() {
                Resolution::TakeCandidate
            } else {
                Resolution::KeepExisting
            }
        }
    }
}

/// Adds `candidate` to a slot list. A resolved survivor moves to the end of the list.
pub fn push_resolved(slot: &mut Vec<Row>, candidate: Row, tie_break: TieBreak) {
    let Some(pos) = slot.iter().position(|r| r.date == candidate.date) else {
        slot.push(candidate);
        return;
    };
    match resolve(tie_break, &slot[pos], &candidate) {
        Resolution::KeepBoth => slot.push(candidate),
        Resolution::KeepExisting => {
            let existing = slot.remove(pos);
            slot.push(existing);
        }
        Resolution::TakeCandidate => {
            slot.remove(pos);
            slot.push(candidate);
        }
    }
}
