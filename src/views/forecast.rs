//! Forecast View
//!
//! Latest forecast probability per category and index, for the chart panel.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

use crate::model::{district_rows, AAData, Category, Filters, Row};
use crate::season::SeasonCalculator;

/// Index families, in chart order.
const INDEX_TYPE_ORDER: [&str; 2] = ["SPI", "DRY"];
/// Leading letter of each forecast period, October to June. First match wins.
const INDEX_MONTH_ORDER: [&str; 9] = ["O", "N", "D", "J", "F", "M", "A", "M", "J"];

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexForecast {
    /// Percent, two decimals. `None` when no forecast exists for the index.
    pub probability: Option<f64>,
    pub show_warning_sign: bool,
}

impl IndexForecast {
    pub const MISSING: IndexForecast = IndexForecast {
        probability: None,
        show_warning_sign: false,
    };
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastView {
    /// Category -> index -> forecast. Iterate `indexes` for chart order.
    pub chart_data: BTreeMap<Category, BTreeMap<String, IndexForecast>>,
    pub indexes: Vec<String>,
}

pub struct ForecastParams<'a> {
    pub data: &'a AAData,
    pub filters: &'a Filters,
    pub selected_district: &'a str,
    pub single_window_mode: bool,
}

pub fn forecast_view(params: &ForecastParams<'_>, seasons: &SeasonCalculator) -> ForecastView {
    let filters = params.filters;
    let selected_date = filters.selected_date();
    let season = seasons.season(selected_date);

    let rows: Vec<&Row> = filters
        .selected_window
        .windows(params.single_window_mode)
        .into_iter()
        .filter_map(|window| district_rows(params.data, window, params.selected_district))
        .flatten()
        .filter(|r| {
            Some(r.season.as_str()) == season.as_deref()
                && selected_date.map_or(true, |date| r.date.as_str() <= date)
        })
        .collect();

    let mut seen = BTreeSet::new();
    let mut indexes: Vec<String> = rows
        .iter()
        .filter(|r| seen.insert(r.index.as_str()))
        .map(|r| r.index.clone())
        .collect();
    sort_indexes(&mut indexes);

    let categories: BTreeSet<Category> = rows
        .iter()
        .filter(|r| !r.computed_row)
        .map(|r| r.category)
        .collect();

    let chart_data = categories
        .into_iter()
        .map(|category| {
            let per_index = indexes
                .iter()
                .map(|index| {
                    let point = latest(&rows, category, index)
                        .map(|row| IndexForecast {
                            probability: Some(to_percent(row.probability)),
                            show_warning_sign: row.is_valid,
                        })
                        .unwrap_or(IndexForecast::MISSING);
                    (index.clone(), point)
                })
                .collect();
            (category, per_index)
        })
        .collect();

    debug!(
        district = params.selected_district,
        indexes = indexes.len(),
        "forecast built"
    );
    ForecastView {
        chart_data,
        indexes,
    }
}

/// Forecast row with the latest date; the first one seen among equal dates.
fn latest<'a>(rows: &[&'a Row], category: Category, index: &str) -> Option<&'a Row> {
    rows.iter()
        .copied()
        .filter(|r| !r.computed_row && r.category == category && r.index == index)
        .fold(None, |best: Option<&Row>, r| match best {
            Some(b) if r.date <= b.date => Some(b),
            _ => Some(r),
        })
}

fn to_percent(probability: f64) -> f64 {
    (probability * 100.0 * 100.0).round() / 100.0
}

fn position(order: &[&str], matches: impl Fn(&str) -> bool) -> i32 {
    order
        .iter()
        .position(|candidate| matches(candidate))
        .map_or(-1, |p| p as i32)
}

/// Stable sort by index family, then by the period's first month. Unknown
/// families and periods sort first.
pub fn sort_indexes(indexes: &mut [String]) {
    indexes.sort_by_key(|index| {
        let mut parts = index.split(' ');
        let kind = parts.next().unwrap_or_default();
        let period = parts.next().unwrap_or_default();
        (
            position(&INDEX_TYPE_ORDER, |t| t == kind),
            position(&INDEX_MONTH_ORDER, |m| !period.is_empty() && period.starts_with(m)),
        )
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Phase, Window, WindowFilter};
    use crate::season::FixedClock;
    use chrono::NaiveDate;
    use std::sync::Arc;

    fn seasons() -> SeasonCalculator {
        let today = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        SeasonCalculator::new(4, Arc::new(FixedClock(today)))
    }

    fn row(window: Window, category: Category, index: &str, date: &str, probability: f64, is_valid: bool) -> Row {
        Row {
            category,
            district: "Changara".to_string(),
            index: index.to_string(),
            kind: index.split(' ').next().unwrap().to_string(),
            window,
            is_new: false,
            phase: Phase::Ready,
            probability,
            trigger: 0.2,
            date: date.to_string(),
            season: "2023-24".to_string(),
            is_valid,
            is_other_phase_valid: false,
            computed_row: false,
            vulnerability: None,
        }
    }

    fn dataset(rows: Vec<Row>) -> AAData {
        let mut data = AAData::new();
        for r in rows {
            data.entry(r.window)
                .or_default()
                .entry(r.district.clone())
                .or_default()
                .push(r);
        }
        data
    }

    fn run(data: &AAData, filters: &Filters) -> ForecastView {
        let params = ForecastParams {
            data,
            filters,
            selected_district: "Changara",
            single_window_mode: false,
        };
        forecast_view(&params, &seasons())
    }

    #[test]
    fn test_latest_date_wins() {
        let data = dataset(vec![
            row(Window::Window1, Category::Moderate, "SPI DJF", "2023-10-01", 0.28, true),
            row(Window::Window1, Category::Moderate, "SPI DJF", "2023-09-01", 0.19, false),
        ]);
        let view = run(&data, &Filters::new(WindowFilter::Window1, Some("2024-02-01")));

        let point = view.chart_data[&Category::Moderate]["SPI DJF"];
        assert_eq!(point.probability, Some(28.0));
        assert!(point.show_warning_sign);
    }

    #[test]
    fn test_selected_date_caps_rows() {
        let data = dataset(vec![
            row(Window::Window1, Category::Moderate, "SPI DJF", "2023-09-01", 0.19, true),
            row(Window::Window1, Category::Moderate, "SPI DJF", "2023-10-01", 0.28, false),
        ]);
        let view = run(&data, &Filters::new(WindowFilter::Window1, Some("2023-09-15")));
        assert_eq!(view.chart_data[&Category::Moderate]["SPI DJF"].probability, Some(19.0));
    }

    #[test]
    fn test_missing_pairs_are_null() {
        let data = dataset(vec![
            row(Window::Window1, Category::Mild, "SPI DJF", "2023-10-01", 0.31, true),
            row(Window::Window2, Category::Severe, "DRY ONDJ", "2023-11-01", 0.123456, false),
        ]);
        let view = run(&data, &Filters::new(WindowFilter::All, Some("2024-02-01")));

        assert_eq!(view.indexes, vec!["SPI DJF".to_string(), "DRY ONDJ".to_string()]);
        assert_eq!(view.chart_data[&Category::Mild]["DRY ONDJ"], IndexForecast::MISSING);
        assert_eq!(view.chart_data[&Category::Severe]["DRY ONDJ"].probability, Some(12.35));
        assert_eq!(view.chart_data[&Category::Severe]["SPI DJF"], IndexForecast::MISSING);
    }

    #[test]
    fn test_computed_rows_do_not_report() {
        let mut computed = row(Window::Window1, Category::Severe, "SPI JFM", "2023-12-01", 0.5, true);
        computed.computed_row = true;
        let data = dataset(vec![
            computed,
            row(Window::Window1, Category::Mild, "SPI DJF", "2023-10-01", 0.31, true),
        ]);
        let view = run(&data, &Filters::new(WindowFilter::Window1, Some("2024-02-01")));

        // The computed row still contributes its index column.
        assert_eq!(view.indexes, vec!["SPI DJF".to_string(), "SPI JFM".to_string()]);
        assert!(!view.chart_data.contains_key(&Category::Severe));
        assert_eq!(view.chart_data[&Category::Mild]["SPI JFM"], IndexForecast::MISSING);
    }

    #[test]
    fn test_other_season_and_district_ignored() {
        let mut old = row(Window::Window1, Category::Mild, "SPI DJF", "2022-10-01", 0.31, true);
        old.season = "2022-23".to_string();
        let data = dataset(vec![old]);
        let view = run(&data, &Filters::new(WindowFilter::Window1, Some("2024-02-01")));
        assert!(view.indexes.is_empty());
        assert!(view.chart_data.is_empty());

        let params = ForecastParams {
            data: &data,
            filters: &Filters::new(WindowFilter::All, Some("2024-02-01")),
            selected_district: "Nowhere",
            single_window_mode: false,
        };
        assert!(forecast_view(&params, &seasons()).chart_data.is_empty());
    }

    #[test]
    fn test_no_date_uses_clock_season_without_cap() {
        // Today is 2024-02-01; a later forecast of the same season still counts.
        let mut old = row(Window::Window1, Category::Severe, "SPI DJF", "2023-03-01", 0.9, true);
        old.season = "2022-23".to_string();
        let data = dataset(vec![
            row(Window::Window1, Category::Mild, "SPI DJF", "2023-11-01", 0.31, true),
            row(Window::Window1, Category::Mild, "SPI DJF", "2024-03-01", 0.42, false),
            row(Window::Window1, Category::Moderate, "SPI JFM", "2024-01-01", 0.2, false),
            old,
        ]);
        let view = run(&data, &Filters::new(WindowFilter::Window1, None));

        assert_eq!(view.indexes, vec!["SPI DJF".to_string(), "SPI JFM".to_string()]);
        let mild = view.chart_data[&Category::Mild]["SPI DJF"];
        assert_eq!(mild.probability, Some(42.0));
        assert!(!mild.show_warning_sign);
        assert_eq!(view.chart_data[&Category::Moderate]["SPI JFM"].probability, Some(20.0));
        assert!(!view.chart_data.contains_key(&Category::Severe));
    }

    #[test]
    fn test_indexes_keep_first_seen_order_within_a_rank() {
        let data = dataset(vec![
            row(Window::Window1, Category::Mild, "FOO Z", "2023-10-01", 0.3, true),
            row(Window::Window1, Category::Mild, "FOO X", "2023-10-01", 0.3, true),
            row(Window::Window1, Category::Severe, "FOO Z", "2023-11-01", 0.3, true),
        ]);
        let view = run(&data, &Filters::new(WindowFilter::Window1, Some("2024-02-01")));
        assert_eq!(view.indexes, vec!["FOO Z".to_string(), "FOO X".to_string()]);
    }

    #[test]
    fn test_index_ordering() {
        let mut indexes: Vec<String> = ["DRY NDJ", "SPI MAM", "SPI OND", "FOO X", "SPI JFM", "DRY ONDJ", "SPI DJF"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        sort_indexes(&mut indexes);
        assert_eq!(
            indexes,
            vec!["FOO X", "SPI OND", "SPI DJF", "SPI JFM", "SPI MAM", "DRY ONDJ", "DRY NDJ"]
        );
    }

    #[test]
    fn test_percent_rounding() {
        assert_eq!(to_percent(0.28), 28.0);
        assert_eq!(to_percent(0.29), 29.0);
        assert_eq!(to_percent(0.123456), 12.35);
        assert_eq!(to_percent(0.0), 0.0);
    }
}
