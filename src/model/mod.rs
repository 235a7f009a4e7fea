//! Data Model
//!
//! Forecast rows, filters and the ordered enumerations every view is keyed on.
//! Rows are produced upstream and never mutated here.

mod filters;

pub use filters::{Filters, WindowFilter};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Rows for every district of a window, keyed by district name.
pub type DistrictRows = BTreeMap<String, Vec<Row>>;

/// Full dataset as handed over by ingestion: window -> district -> rows.
pub type AAData = BTreeMap<Window, DistrictRows>;

/// Severity categories. Declaration order is the rank order (`Severe` highest).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "ny")]
    Ny,
    #[serde(rename = "na")]
    Na,
    Normal,
    Mild,
    Moderate,
    Severe,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Ny,
        Category::Na,
        Category::Normal,
        Category::Mild,
        Category::Moderate,
        Category::Severe,
    ];

    pub fn index(self) -> u32 {
        match self {
            Category::Ny => 0,
            Category::Na => 1,
            Category::Normal => 2,
            Category::Mild => 3,
            Category::Moderate => 4,
            Category::Severe => 5,
        }
    }

    /// Categories that carry forecasts; `na`/`ny` only exist as display placeholders.
    pub fn is_forecast(self) -> bool {
        !matches!(self, Category::Na | Category::Ny)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Ny => "ny",
            Category::Na => "na",
            Category::Normal => "Normal",
            Category::Mild => "Mild",
            Category::Moderate => "Moderate",
            Category::Severe => "Severe",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Action phases, ranked in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Phase {
    #[serde(rename = "ny")]
    Ny,
    #[serde(rename = "na")]
    Na,
    Ready,
    Set,
}

impl Phase {
    pub const ALL: [Phase; 4] = [Phase::Ny, Phase::Na, Phase::Ready, Phase::Set];

    pub fn index(self) -> u32 {
        match self {
            Phase::Ny => 0,
            Phase::Na => 1,
            Phase::Ready => 2,
            Phase::Set => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Ny => "ny",
            Phase::Na => "na",
            Phase::Ready => "Ready",
            Phase::Set => "Set",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Forecast validity period within a season.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Window {
    #[serde(rename = "Window 1")]
    Window1,
    #[serde(rename = "Window 2")]
    Window2,
}

impl Window {
    pub const ALL: [Window; 2] = [Window::Window1, Window::Window2];

    pub fn as_str(self) -> &'static str {
        match self {
            Window::Window1 => "Window 1",
            Window::Window2 => "Window 2",
        }
    }
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Vulnerability {
    #[serde(rename = "General Triggers")]
    General,
    #[serde(rename = "Emergency Triggers")]
    Emergency,
}

/// A (category, phase) pair as shown in a grid row header or map marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Status {
    pub category: Category,
    pub phase: Phase,
}

impl Status {
    pub fn new(category: Category, phase: Phase) -> Self {
        Self { category, phase }
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// One forecast observation for a district, date and phase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Row {
    pub category: Category,
    pub district: String,
    pub index: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub window: Window,
    #[serde(rename = "new", default)]
    pub is_new: bool,
    pub phase: Phase,
    pub probability: f64,
    pub trigger: f64,
    pub date: String,
    pub season: String,
    #[serde(default)]
    pub is_valid: bool,
    #[serde(default)]
    pub is_other_phase_valid: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub computed_row: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vulnerability: Option<Vulnerability>,
}

impl Row {
    pub fn status(&self) -> Status {
        Status::new(self.category, self.phase)
    }

    /// 2 when both phases cleared their triggers, 1 when only this one did, 0 otherwise.
    pub fn validity_rank(&self) -> u8 {
        match (self.is_valid, self.is_other_phase_valid) {
            (true, true) => 2,
            (true, false) => 1,
            _ => 0,
        }
    }

    /// A row flagged valid must have reached its trigger. The converse does not
    /// hold: a Set row is also invalidated by its Ready phase.
    pub fn validity_consistent(&self) -> bool {
        !self.is_valid || self.probability >= self.trigger
    }

    pub fn is_well_formed(&self) -> bool {
        let in_unit = |v: f64| v.is_finite() && (0.0..=1.0).contains(&v);
        in_unit(self.probability) && in_unit(self.trigger)
    }

    /// Copy of the row under another phase.
    pub fn with_phase(&self, phase: Phase) -> Row {
        Row {
            phase,
            ..self.clone()
        }
    }
}

/// Rows of one district in one window, if the district is known there.
pub fn district_rows<'a>(data: &'a AAData, window: Window, district: &str) -> Option<&'a [Row]> {
    if district.is_empty() {
        return None;
    }
    data.get(&window)
        .and_then(|districts| districts.get(district))
        .map(Vec::as_slice)
}
