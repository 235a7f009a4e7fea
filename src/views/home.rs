//! Home Aggregation
//!
//! Fleet-wide status: what every district shows on the map for the selected
//! date, and the home table grouping districts under (category, phase) rows.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use tracing::debug;

use super::severity::{row_severity, severity_order, SET_BONUS};
use crate::model::{AAData, Category, Filters, Phase, Row, Status, Window, WindowFilter};
use crate::season::SeasonCalculator;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistrictStatus {
    pub category: Category,
    pub phase: Phase,
    pub is_new: bool,
}

impl DistrictStatus {
    const NOT_YET_MONITORED: DistrictStatus = DistrictStatus {
        category: Category::Ny,
        phase: Phase::Ny,
        is_new: false,
    };
    const NO_ACTION: DistrictStatus = DistrictStatus {
        category: Category::Na,
        phase: Phase::Na,
        is_new: false,
    };

    pub fn severity(&self) -> u32 {
        severity_order(self.category, self.phase, SET_BONUS)
    }

    pub fn status(&self) -> Status {
        Status::new(self.category, self.phase)
    }
}

/// First and last forecast date of a window, as computed at ingestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowRange {
    pub start: String,
    pub end: String,
}

pub type WindowRanges = BTreeMap<Window, WindowRange>;

/// Window -> district -> statuses, most relevant first.
pub type RenderedDistricts = BTreeMap<Window, BTreeMap<String, Vec<DistrictStatus>>>;

/// First and last forecast date of each window that has rows.
pub fn window_ranges(data: &AAData) -> WindowRanges {
    data.iter()
        .filter_map(|(window, districts)| {
            let dates = districts.values().flatten().map(|r| r.date.as_str());
            let start = dates.clone().min()?;
            let end = dates.max()?;
            Some((
                *window,
                WindowRange {
                    start: start.to_string(),
                    end: end.to_string(),
                },
            ))
        })
        .collect()
}

/// Latest date first, then most severe first.
fn display_order(a: &Row, b: &Row) -> Ordering {
    b.date
        .cmp(&a.date)
        .then_with(|| row_severity(b).cmp(&row_severity(a)))
}

/// Statuses every district shows for the selected date. Both windows are always present.
pub fn rendered_districts(
    data: &AAData,
    filters: &Filters,
    window_ranges: &WindowRanges,
    seasons: &SeasonCalculator,
) -> RenderedDistricts {
    let season = seasons.season(filters.selected_date());

    Window::ALL
        .iter()
        .map(|window| {
            let districts: BTreeMap<String, Vec<DistrictStatus>> = data
                .get(window)
                .map(|districts| {
                    districts
                        .iter()
                        .map(|(name, rows)| {
                            let statuses = district_statuses(
                                rows,
                                filters,
                                season.as_deref(),
                                window_ranges.get(window),
                            );
                            (name.clone(), statuses)
                        })
                        .collect()
                })
                .unwrap_or_default();
            (*window, districts)
        })
        .collect()
}

fn district_statuses(
    rows: &[Row],
    filters: &Filters,
    season: Option<&str>,
    range: Option<&WindowRange>,
) -> Vec<DistrictStatus> {
    let in_season = |r: &&Row| Some(r.season.as_str()) == season;

    let Some(selected) = filters.selected_date() else {
        return vec![DistrictStatus::NOT_YET_MONITORED];
    };
    if !rows.iter().filter(in_season).any(|r| r.date.as_str() <= selected) {
        return vec![DistrictStatus::NOT_YET_MONITORED];
    }

    // Past the window's last forecast the final state stays on display.
    let date = match range {
        Some(range) if selected >= range.end.as_str() => range.end.as_str(),
        _ => selected,
    };

    let mut day: Vec<Row> = rows
        .iter()
        .filter(in_season)
        .filter(|r| r.date == date)
        .cloned()
        .collect();

    // A reached Set persists until the end of the window.
    if day.is_empty() {
        day = rows
            .iter()
            .filter(in_season)
            .filter(|r| r.date.as_str() <= date && r.phase == Phase::Set && r.is_valid)
            .last()
            .map(|r| Row {
                computed_row: true,
                ..r.clone()
            })
            .into_iter()
            .collect();
    }

    let mut shown: Vec<Row> = day
        .into_iter()
        .filter(|r| (r.computed_row || r.is_valid) && filters.category_enabled(r.category))
        .collect();
    if shown.is_empty() {
        return vec![DistrictStatus::NO_ACTION];
    }

    shown.sort_by(display_order);
    shown
        .iter()
        .map(|r| DistrictStatus {
            category: r.category,
            phase: r.phase,
            is_new: !r.computed_row && r.is_new,
        })
        .collect()
}

/// Most severe leading status across both windows; Window 1 wins ties.
pub fn combined_districts(rendered: &RenderedDistricts) -> BTreeMap<String, DistrictStatus> {
    let Some(first_window) = rendered.get(&Window::Window1) else {
        return BTreeMap::new();
    };
    let second_window = rendered.get(&Window::Window2);

    first_window
        .iter()
        .filter_map(|(district, statuses)| {
            let first = statuses.first()?;
            let second = second_window?.get(district)?.first()?;
            let pick = if first.severity() >= second.severity() {
                first
            } else {
                second
            };
            Some((district.clone(), *pick))
        })
        .collect()
}

/// Marker status per district for the selected window.
pub fn map_statuses(
    rendered: &RenderedDistricts,
    selected_window: WindowFilter,
) -> BTreeMap<String, DistrictStatus> {
    let window = match selected_window {
        WindowFilter::All => return combined_districts(rendered),
        WindowFilter::Window1 => Window::Window1,
        WindowFilter::Window2 => Window::Window2,
    };
    rendered
        .get(&window)
        .map(|districts| {
            districts
                .iter()
                .filter_map(|(district, statuses)| Some((district.clone(), *statuses.first()?)))
                .collect()
        })
        .unwrap_or_default()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AreaTag {
    pub name: String,
    pub is_new: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HomeRow {
    pub id: u32,
    pub status: Status,
    /// One column per window in scope.
    pub windows: Vec<Vec<AreaTag>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HomeTable {
    pub header: Vec<Window>,
    pub rows: Vec<HomeRow>,
}

pub fn home_table(
    rendered: &RenderedDistricts,
    filters: &Filters,
    row_categories: &[Status],
    single_window_mode: bool,
) -> HomeTable {
    let header = filters.selected_window.windows(single_window_mode);

    let rows: Vec<HomeRow> = row_categories
        .iter()
        .filter(|status| filters.category_enabled(status.category))
        .map(|status| HomeRow {
            id: severity_order(status.category, status.phase, SET_BONUS),
            status: *status,
            windows: header
                .iter()
                .map(|window| area_tags(rendered, *window, *status))
                .collect(),
        })
        .collect();

    debug!(rows = rows.len(), windows = header.len(), "home table built");
    HomeTable { header, rows }
}

/// Districts showing `status` in `window`, one tag per district name.
fn area_tags(rendered: &RenderedDistricts, window: Window, status: Status) -> Vec<AreaTag> {
    let Some(districts) = rendered.get(&window) else {
        return Vec::new();
    };
    districts
        .iter()
        .flat_map(|(district, statuses)| {
            statuses
                .iter()
                .filter(move |s| s.status() == status)
                .map(move |s| AreaTag {
                    name: district.clone(),
                    is_new: s.is_new,
                })
        })
        .fold(Vec::new(), |mut tags: Vec<AreaTag>, tag| {
            match tags.iter_mut().find(|t| t.name == tag.name) {
                Some(existing) => *existing = tag,
                None => tags.push(tag),
            }
            tags
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::season::FixedClock;
    use chrono::NaiveDate;
    use std::sync::Arc;

    fn seasons() -> SeasonCalculator {
        let today = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        SeasonCalculator::new(4, Arc::new(FixedClock(today)))
    }

    fn row(district: &str, category: Category, phase: Phase, date: &str, is_valid: bool) -> Row {
        Row {
            category,
            district: district.to_string(),
            index: "SPI DJF".to_string(),
            kind: "SPI".to_string(),
            window: Window::Window1,
            is_new: true,
            phase,
            probability: 0.3,
            trigger: 0.2,
            date: date.to_string(),
            season: "2023-24".to_string(),
            is_valid,
            is_other_phase_valid: false,
            computed_row: false,
            vulnerability: None,
        }
    }

    fn window_data(window: Window, rows: Vec<Row>) -> AAData {
        let mut data = AAData::new();
        for mut r in rows {
            r.window = window;
            data.entry(window)
                .or_default()
                .entry(r.district.clone())
                .or_default()
                .push(r);
        }
        data
    }

    fn status(category: Category, phase: Phase, is_new: bool) -> DistrictStatus {
        DistrictStatus {
            category,
            phase,
            is_new,
        }
    }

    #[test]
    fn test_not_yet_monitored_without_date() {
        let data = window_data(
            Window::Window1,
            vec![row("Changara", Category::Mild, Phase::Set, "2023-10-01", true)],
        );
        let filters = Filters::new(WindowFilter::All, None);
        let rendered = rendered_districts(&data, &filters, &WindowRanges::new(), &seasons());

        assert_eq!(rendered[&Window::Window1]["Changara"], vec![DistrictStatus::NOT_YET_MONITORED]);
        assert!(rendered[&Window::Window2].is_empty());

        let filters = Filters::new(WindowFilter::All, Some("2023-09-01"));
        let rendered = rendered_districts(&data, &filters, &WindowRanges::new(), &seasons());
        assert_eq!(rendered[&Window::Window1]["Changara"], vec![DistrictStatus::NOT_YET_MONITORED]);
    }

    #[test]
    fn test_no_action_without_valid_rows() {
        let data = window_data(
            Window::Window1,
            vec![row("Changara", Category::Mild, Phase::Ready, "2023-10-01", false)],
        );
        let filters = Filters::new(WindowFilter::All, Some("2023-10-01"));
        let rendered = rendered_districts(&data, &filters, &WindowRanges::new(), &seasons());
        assert_eq!(rendered[&Window::Window1]["Changara"], vec![DistrictStatus::NO_ACTION]);
    }

    #[test]
    fn test_statuses_sorted_by_severity() {
        let data = window_data(
            Window::Window1,
            vec![
                row("Changara", Category::Severe, Phase::Ready, "2023-10-01", true),
                row("Changara", Category::Mild, Phase::Set, "2023-10-01", true),
                row("Changara", Category::Moderate, Phase::Ready, "2023-10-01", false),
            ],
        );
        let filters = Filters::new(WindowFilter::All, Some("2023-10-01"));
        let rendered = rendered_districts(&data, &filters, &WindowRanges::new(), &seasons());
        assert_eq!(
            rendered[&Window::Window1]["Changara"],
            vec![
                status(Category::Mild, Phase::Set, true),
                status(Category::Severe, Phase::Ready, true),
            ]
        );
    }

    #[test]
    fn test_set_persists_after_its_date() {
        let data = window_data(
            Window::Window1,
            vec![
                row("Changara", Category::Moderate, Phase::Set, "2023-09-01", true),
                row("Changara", Category::Mild, Phase::Set, "2023-10-01", true),
                row("Changara", Category::Mild, Phase::Ready, "2023-10-01", true),
            ],
        );
        let filters = Filters::new(WindowFilter::All, Some("2023-12-01"));
        let rendered = rendered_districts(&data, &filters, &WindowRanges::new(), &seasons());
        // Carried forward, so never flagged new.
        assert_eq!(
            rendered[&Window::Window1]["Changara"],
            vec![status(Category::Mild, Phase::Set, false)]
        );
    }

    #[test]
    fn test_window_end_clamps_date() {
        let data = window_data(
            Window::Window1,
            vec![row("Changara", Category::Mild, Phase::Ready, "2023-11-01", true)],
        );
        let mut ranges = WindowRanges::new();
        ranges.insert(
            Window::Window1,
            WindowRange {
                start: "2023-08-01".to_string(),
                end: "2023-11-01".to_string(),
            },
        );
        let filters = Filters::new(WindowFilter::All, Some("2024-01-01"));
        let rendered = rendered_districts(&data, &filters, &ranges, &seasons());
        assert_eq!(
            rendered[&Window::Window1]["Changara"],
            vec![status(Category::Mild, Phase::Ready, true)]
        );
    }

    #[test]
    fn test_window_ranges_span_all_districts() {
        let mut data = window_data(
            Window::Window1,
            vec![
                row("Changara", Category::Mild, Phase::Set, "2023-10-01", true),
                row("Chibabava", Category::Mild, Phase::Set, "2023-08-01", true),
                row("Chibabava", Category::Mild, Phase::Ready, "2023-11-01", true),
            ],
        );
        data.insert(Window::Window2, BTreeMap::new());

        let ranges = window_ranges(&data);
        assert_eq!(ranges.len(), 1);
        assert_eq!(ranges[&Window::Window1].start, "2023-08-01");
        assert_eq!(ranges[&Window::Window1].end, "2023-11-01");
    }

    #[test]
    fn test_combined_prefers_more_severe_window() {
        let mut rendered = RenderedDistricts::new();
        let w1 = rendered.entry(Window::Window1).or_default();
        w1.insert("A".to_string(), vec![status(Category::Mild, Phase::Ready, false)]);
        w1.insert("B".to_string(), vec![status(Category::Severe, Phase::Ready, true)]);
        w1.insert("C".to_string(), vec![status(Category::Mild, Phase::Set, false)]);
        let w2 = rendered.entry(Window::Window2).or_default();
        w2.insert("A".to_string(), vec![status(Category::Mild, Phase::Set, true)]);
        w2.insert("B".to_string(), vec![status(Category::Severe, Phase::Ready, false)]);

        let combined = combined_districts(&rendered);
        assert_eq!(combined["A"], status(Category::Mild, Phase::Set, true));
        assert_eq!(combined["B"], status(Category::Severe, Phase::Ready, true));
        assert!(!combined.contains_key("C"));

        assert_eq!(map_statuses(&rendered, WindowFilter::All), combined);
        assert_eq!(
            map_statuses(&rendered, WindowFilter::Window2)["A"],
            status(Category::Mild, Phase::Set, true)
        );
    }

    #[test]
    fn test_home_table_groups_and_dedupes() {
        let mut rendered = RenderedDistricts::new();
        let w1 = rendered.entry(Window::Window1).or_default();
        w1.insert(
            "Changara".to_string(),
            vec![
                status(Category::Mild, Phase::Set, false),
                status(Category::Mild, Phase::Set, true),
            ],
        );
        w1.insert("Chibabava".to_string(), vec![status(Category::Severe, Phase::Ready, false)]);
        rendered.insert(Window::Window2, BTreeMap::new());

        let rows = vec![
            Status::new(Category::Severe, Phase::Ready),
            Status::new(Category::Mild, Phase::Set),
            Status::new(Category::Na, Phase::Na),
        ];
        let mut filters = Filters::new(WindowFilter::All, Some("2023-10-01"));
        filters.categories.insert(Category::Na, false);

        let table = home_table(&rendered, &filters, &rows, false);
        assert_eq!(table.header, vec![Window::Window1, Window::Window2]);
        assert_eq!(table.rows.len(), 2);

        assert_eq!(table.rows[0].id, 50);
        assert_eq!(table.rows[0].windows[0][0].name, "Chibabava");

        let mild = &table.rows[1];
        assert_eq!(mild.id, 130);
        assert_eq!(
            mild.windows[0],
            vec![AreaTag {
                name: "Changara".to_string(),
                is_new: true
            }]
        );
        assert!(mild.windows[1].is_empty());
    }
}
