//! Timeline View
//!
//! Month × (category, phase) grid per window. `all_rows` lists every grid row
//! seen in any window so side-by-side windows render the same lines.

use serde::{Deserialize, Serialize};
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use tracing::debug;

use super::priority::{push_resolved, TieBreak};
use super::severity::timeline_row_key;
use crate::model::{district_rows, AAData, Filters, Phase, Row, Status, Window};
use crate::season::SeasonCalculator;
use crate::utils::dates::month_label;

/// Row keying and slot resolution flavour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimelineVariant {
    /// Phase-sensitive keys, validity-ranked slots.
    #[default]
    Drought,
    /// Invalid rows share a per-category `na` line; every row is kept.
    Generic,
}

impl TimelineVariant {
    pub fn tie_break(self) -> TieBreak {
        match self {
            TimelineVariant::Drought => TieBreak::ValidityRanked,
            TimelineVariant::Generic => TieBreak::KeepAll,
        }
    }

    pub fn row_key(self, row: &Row) -> u32 {
        match self {
            TimelineVariant::Generic if !row.is_valid => row.category.index() * 10,
            _ => timeline_row_key(row.category, row.phase),
        }
    }

    fn status(self, row: &Row) -> Status {
        match self {
            TimelineVariant::Generic if !row.is_valid => Status::new(row.category, Phase::Na),
            _ => row.status(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineRow {
    pub status: Status,
    pub data: Vec<Row>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowTimeline {
    /// `[date, short month]`, ascending.
    pub months: Vec<(String, String)>,
    pub rows: BTreeMap<u32, TimelineRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineView {
    /// `None` for a window without data for the district.
    pub window_data: BTreeMap<Window, Option<WindowTimeline>>,
    pub all_rows: BTreeMap<u32, TimelineRow>,
}

pub struct TimelineParams<'a> {
    pub data: &'a AAData,
    pub filters: &'a Filters,
    pub selected_district: &'a str,
    pub single_window_mode: bool,
    pub variant: TimelineVariant,
}

pub fn timeline_view(params: &TimelineParams<'_>, seasons: &SeasonCalculator) -> TimelineView {
    let filters = params.filters;
    let season = seasons.season(filters.selected_date());

    let window_data: BTreeMap<Window, Option<WindowTimeline>> = filters
        .selected_window
        .windows(params.single_window_mode)
        .into_iter()
        .map(|window| {
            let timeline = district_rows(params.data, window, params.selected_district)
                .map(|rows| window_timeline(rows, filters, season.as_deref(), params.variant));
            (window, timeline)
        })
        .collect();

    let all_rows = window_data
        .values()
        .flatten()
        .flat_map(|timeline| timeline.rows.iter())
        .map(|(key, row)| {
            (
                *key,
                TimelineRow {
                    status: row.status,
                    data: Vec::new(),
                },
            )
        })
        .collect::<BTreeMap<_, _>>();

    debug!(
        district = params.selected_district,
        windows = window_data.len(),
        rows = all_rows.len(),
        "timeline built"
    );
    TimelineView {
        window_data,
        all_rows,
    }
}

fn window_timeline(
    rows: &[Row],
    filters: &Filters,
    season: Option<&str>,
    variant: TimelineVariant,
) -> WindowTimeline {
    let filtered: Vec<&Row> = rows
        .iter()
        .filter(|r| {
            Some(r.season.as_str()) == season
                && !r.computed_row
                && filters.index_matches(r)
                && filters.category_enabled(r.category)
        })
        .collect();

    let months = filtered
        .iter()
        .map(|r| (r.date.clone(), month_label(&r.date)))
        .collect::<BTreeMap<_, _>>()
        .into_iter()
        .collect();

    let tie_break = variant.tie_break();
    let rows = filtered
        .into_iter()
        .fold(BTreeMap::<u32, TimelineRow>::new(), |mut acc, r| {
            match acc.entry(variant.row_key(r)) {
                Entry::Occupied(mut line) => {
                    push_resolved(&mut line.get_mut().data, r.clone(), tie_break)
                }
                Entry::Vacant(slot) => {
                    slot.insert(TimelineRow {
                        status: variant.status(r),
                        data: vec![r.clone()],
                    });
                }
            }
            acc
        });

    WindowTimeline { months, rows }
}
