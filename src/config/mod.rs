//! Country Configuration
//!
//! Which categories a country monitors, when its season starts and how its
//! panels are labelled. Presets cover the deployed countries; other countries
//! are built with [`CountryConfig::from_categories`] or loaded from disk.

mod presets;

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::info;

use crate::error::{AaError, Result};
use crate::model::{Category, Phase, Status};

pub use presets::PRESET_COUNTRIES;

/// A category checkbox offered to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryOption {
    pub id: Category,
    pub label: String,
}

impl CategoryOption {
    pub fn new(id: Category, label: &str) -> Self {
        Self {
            id,
            label: label.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HowToReadEntry {
    pub title: String,
    pub text: String,
}

impl HowToReadEntry {
    pub fn new(title: &str, text: &str) -> Self {
        Self {
            title: title.to_string(),
            text: text.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryConfig {
    #[serde(alias = "checkboxes")]
    pub categories: Vec<CategoryOption>,
    /// 0-based month (January = 0).
    pub season_start_month: u32,
    #[serde(default)]
    pub single_window_mode: bool,
    /// Home table rows, most severe first. Derived from `categories` when empty.
    #[serde(default)]
    pub row_categories: Vec<Status>,
    #[serde(default)]
    pub how_to_read_content: Vec<HowToReadEntry>,
    #[serde(default)]
    pub description_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forecast_source: Option<String>,
}

fn forecast_clause(forecast_source: Option<&str>) -> String {
    match forecast_source {
        Some(source) if source != "default" => format!(" from {}", source),
        _ => String::new(),
    }
}

/// Return period in years used in the category blurb.
fn return_period(category: Category) -> u32 {
    match category {
        Category::Severe => 7,
        Category::Moderate => 5,
        Category::Mild => 4,
        _ => 3,
    }
}

/// Set then Ready for each category, followed by the `na` and `ny` rows.
pub fn default_row_categories(categories: &[CategoryOption]) -> Vec<Status> {
    categories
        .iter()
        .flat_map(|c| [Status::new(c.id, Phase::Set), Status::new(c.id, Phase::Ready)])
        .chain([
            Status::new(Category::Na, Phase::Na),
            Status::new(Category::Ny, Phase::Ny),
        ])
        .collect()
}

impl CountryConfig {
    /// Builds a configuration with the standard row layout and wording.
    pub fn from_categories(
        categories: Vec<CategoryOption>,
        season_start_month: u32,
        forecast_source: Option<&str>,
    ) -> Self {
        let clause = forecast_clause(forecast_source);

        let mut how_to_read = vec![
            HowToReadEntry::new("Window 1", "Start to mid of the rainfall season."),
            HowToReadEntry::new("Window 2", "Mid to end of the rainfall season."),
        ];
        how_to_read.extend(categories.iter().map(|c| HowToReadEntry {
            title: format!("{} category", c.label.to_lowercase()),
            text: format!(
                "Drought events that typically occur once every {} years.",
                return_period(c.id)
            ),
        }));
        how_to_read.push(HowToReadEntry {
            title: "Ready, Set and Go phases".to_string(),
            text: format!(
                "The \"Ready, Set & Go!\" system uses seasonal forecasts{} with longer lead time for preparedness (Ready phase) and shorter lead times for activation and mobilization (Set & Go! phases).",
                clause
            ),
        });

        Self {
            row_categories: default_row_categories(&categories),
            categories,
            season_start_month,
            single_window_mode: false,
            how_to_read_content: how_to_read,
            description_text: format!(
                "uses seasonal forecasts{} with longer lead time for preparedness (Ready phase) and shorter lead times for activation and mobilization (Set & Go! phases).",
                clause
            ),
            forecast_source: forecast_source.map(str::to_string),
        }
    }

    /// Named preset, case-insensitive.
    pub fn preset(country: &str) -> Result<Self> {
        presets::preset(&country.to_lowercase())
            .ok_or_else(|| AaError::UnknownCountry(country.to_string()))
    }

    pub fn validate(&self) -> Result<()> {
        let invalid = |reason: String| Err(AaError::InvalidConfig { reason });

        if self.season_start_month > 11 {
            return invalid(format!(
                "seasonStartMonth must be within 0..=11, got {}",
                self.season_start_month
            ));
        }
        if self.categories.is_empty() {
            return invalid("at least one category is required".to_string());
        }
        let mut seen = BTreeSet::new();
        for option in &self.categories {
            if !option.id.is_forecast() {
                return invalid(format!("`{}` cannot be offered as a category", option.id));
            }
            if !seen.insert(option.id) {
                return invalid(format!("category `{}` listed twice", option.id));
            }
        }
        Ok(())
    }

    /// Fills derived fields left empty by a hand-written file.
    pub fn normalized(mut self) -> Self {
        if self.row_categories.is_empty() {
            self.row_categories = default_row_categories(&self.categories);
        }
        self
    }

    pub fn category_ids(&self) -> impl Iterator<Item = Category> + '_ {
        self.categories.iter().map(|c| c.id)
    }

    pub fn forecast_source(&self) -> &str {
        self.forecast_source.as_deref().unwrap_or("default")
    }
}

/// Loads a country configuration from a JSON or YAML file.
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn load(&self) -> Result<CountryConfig> {
        let content = fs::read_to_string(&self.path).await?;
        let extension = self
            .path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_lowercase();

        let config: CountryConfig = match extension.as_str() {
            "json" => serde_json::from_str(&content)?,
            "yaml" | "yml" => serde_yaml::from_str(&content)?,
            other => return Err(AaError::UnsupportedFormat(other.to_string())),
        };
        let config = config.normalized();
        config.validate()?;

        info!(
            path = %self.path.display(),
            categories = config.categories.len(),
            season_start_month = config.season_start_month,
            "country configuration loaded"
        );
        Ok(config)
    }
}
