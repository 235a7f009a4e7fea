//! View Engine
//!
//! Binds a validated country configuration and a season calculator to the
//! view transforms, so callers only pass data, filters and a district.

use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::info;

use crate::config::CountryConfig;
use crate::error::Result;
use crate::model::{district_rows, AAData, Filters, Window};
use crate::render;
use crate::season::{Clock, SeasonCalculator, SystemClock};
use crate::views::{
    combined_districts, district_view, forecast_view, home_table, map_statuses,
    rendered_districts, timeline_view, DistrictStatus, DistrictView, ForecastParams,
    ForecastView, HomeTable, RenderedDistricts, TimelineParams, TimelineVariant, TimelineView,
    WindowRanges,
};

#[derive(Debug, Clone)]
pub struct ViewEngine {
    config: CountryConfig,
    seasons: SeasonCalculator,
}

impl ViewEngine {
    /// Validates the configuration and its icons before accepting it.
    pub fn new(config: CountryConfig, clock: Arc<dyn Clock>) -> Result<Self> {
        let config = config.normalized();
        config.validate()?;
        render::validate(&config)?;

        info!(
            categories = config.categories.len(),
            season_start_month = config.season_start_month,
            single_window_mode = config.single_window_mode,
            "view engine ready"
        );
        Ok(Self {
            seasons: SeasonCalculator::new(config.season_start_month, clock),
            config,
        })
    }

    pub fn with_system_clock(config: CountryConfig) -> Result<Self> {
        Self::new(config, Arc::new(SystemClock))
    }

    pub fn config(&self) -> &CountryConfig {
        &self.config
    }

    pub fn seasons(&self) -> &SeasonCalculator {
        &self.seasons
    }

    /// Season label for the filters' date, or today's when none is selected.
    pub fn season(&self, filters: &Filters) -> Option<String> {
        self.seasons.season(filters.selected_date())
    }

    pub fn district(
        &self,
        data: &AAData,
        window: Window,
        district: &str,
        filters: &Filters,
    ) -> Option<DistrictView> {
        district_view(district_rows(data, window, district), filters, &self.seasons)
    }

    pub fn timeline(
        &self,
        data: &AAData,
        district: &str,
        filters: &Filters,
        variant: TimelineVariant,
    ) -> TimelineView {
        let params = TimelineParams {
            data,
            filters,
            selected_district: district,
            single_window_mode: self.config.single_window_mode,
            variant,
        };
        timeline_view(&params, &self.seasons)
    }

    pub fn forecast(&self, data: &AAData, district: &str, filters: &Filters) -> ForecastView {
        let params = ForecastParams {
            data,
            filters,
            selected_district: district,
            single_window_mode: self.config.single_window_mode,
        };
        forecast_view(&params, &self.seasons)
    }

    pub fn rendered_districts(
        &self,
        data: &AAData,
        filters: &Filters,
        window_ranges: &WindowRanges,
    ) -> RenderedDistricts {
        rendered_districts(data, filters, window_ranges, &self.seasons)
    }

    pub fn combined(&self, rendered: &RenderedDistricts) -> BTreeMap<String, DistrictStatus> {
        combined_districts(rendered)
    }

    pub fn map(&self, rendered: &RenderedDistricts, filters: &Filters) -> BTreeMap<String, DistrictStatus> {
        map_statuses(rendered, filters.selected_window)
    }

    pub fn home_table(&self, rendered: &RenderedDistricts, filters: &Filters) -> HomeTable {
        home_table(
            rendered,
            filters,
            &self.config.row_categories,
            self.config.single_window_mode,
        )
    }
}
