//! View Transforms
//!
//! Pure functions from rows and filters to the structures the panels render.
//! None of them fail: unknown districts and empty inputs give empty output.

pub mod district;
pub mod forecast;
pub mod home;
pub mod priority;
pub mod severity;
pub mod timeline;

pub use district::{district_view, DistrictView};
pub use forecast::{forecast_view, sort_indexes, ForecastParams, ForecastView, IndexForecast};
pub use home::{
    combined_districts, home_table, map_statuses, rendered_districts, window_ranges, AreaTag, DistrictStatus,
    HomeRow, HomeTable, RenderedDistricts, WindowRange, WindowRanges,
};
pub use priority::TieBreak;
pub use severity::{row_severity, severity_order, timeline_row_key, SET_BONUS};
pub use timeline::{timeline_view, TimelineParams, TimelineRow, TimelineVariant, TimelineView, WindowTimeline};
