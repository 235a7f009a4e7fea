//! District View
//!
//! Month × severity-bucket grid for one district: one column per forecast
//! month, one line per category with only the most advanced phase shown.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

use super::severity::severity_order;
use crate::model::{Category, Filters, Phase, Row};
use crate::season::SeasonCalculator;
use crate::utils::dates::month_label;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistrictView {
    /// Date -> short month label, ascending.
    pub months: BTreeMap<String, String>,
    /// Severity bucket (phase collapsed) -> rows, by date then input order.
    pub transformed: BTreeMap<u32, Vec<Row>>,
}

/// Returns `None` only when there are no rows for the district at all.
pub fn district_view(
    rows: Option<&[Row]>,
    filters: &Filters,
    seasons: &SeasonCalculator,
) -> Option<DistrictView> {
    let rows = rows?;
    let season = seasons.season(filters.selected_date());

    // Invalid rows stay on the grid but show no phase.
    let by_date = rows
        .iter()
        .filter(|r| {
            filters.category_enabled(r.category)
                && season.as_deref() == Some(r.season.as_str())
                && filters.index_matches(r)
        })
        .map(|r| if r.is_valid { r.clone() } else { r.with_phase(Phase::Na) })
        .fold(BTreeMap::<String, Vec<Row>>::new(), |mut acc, r| {
            acc.entry(r.date.clone()).or_default().push(r);
            acc
        });

    let shown: Vec<Row> = by_date.into_values().flat_map(top_phase_rows).collect();

    let months = shown
        .iter()
        .map(|r| (r.date.clone(), month_label(&r.date)))
        .collect::<BTreeMap<_, _>>();

    let transformed = shown
        .into_iter()
        .fold(BTreeMap::<u32, Vec<Row>>::new(), |mut acc, r| {
            acc.entry(severity_order(r.category, r.phase, 0)).or_default().push(r);
            acc
        });

    debug!(
        months = months.len(),
        buckets = transformed.len(),
        "district view built"
    );
    Some(DistrictView {
        months,
        transformed,
    })
}

/// Keeps, per category, the Set rows, else the Ready rows, else the `na` rows.
/// A date made only of computed rows is dropped.
fn top_phase_rows(day: Vec<Row>) -> Vec<Row> {
    if day.iter().all(|r| r.computed_row) {
        return Vec::new();
    }

    let with_phase = |phase: Phase| -> BTreeSet<Category> {
        day.iter()
            .filter(|r| r.phase == phase)
            .map(|r| r.category)
            .collect()
    };
    let set = with_phase(Phase::Set);
    let ready = with_phase(Phase::Ready);

    day.into_iter()
        .filter(|r| match r.phase {
            Phase::Set => true,
            Phase::Ready => !set.contains(&r.category),
            Phase::Na => !set.contains(&r.category) && !ready.contains(&r.category),
            Phase::Ny => false,
        })
        .collect()
}
