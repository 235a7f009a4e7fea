//! Status Rendering
//!
//! Icon and color lookup for a (category, phase) pair. The table is a closed
//! match; pairs outside it fail with [`AaError::IconNotImplemented`], and
//! [`validate`] runs the lookup once for everything a configuration can emit.

use serde::Serialize;
use tracing::debug;

use crate::config::CountryConfig;
use crate::error::{AaError, Result};
use crate::model::{Category, Phase, Status};

// ---------------------------------------------------------------------------
// Palette
// ---------------------------------------------------------------------------

const NEUTRAL: &str = "#F1F1F1";
const STRIPE: &str = "white";
const SEVERE_SET: &str = "#831F00";
const SEVERE_READY: &str = "#E63701";
const MODERATE_SET: &str = "#FF8934";
const MODERATE_READY: &str = "#FFD52D";
const MILD_SET: &str = "#FFF503";
const MILD_READY: &str = "#FFFCB3";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum Background {
    Solid { color: &'static str },
    /// Diagonal stripes alternating `color` and `stripe`.
    Striped { color: &'static str, stripe: &'static str },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextColor {
    Black,
    White,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderDescriptor {
    pub background: Background,
    pub top_text: &'static str,
    /// Dropped on map-layer placeholder icons.
    pub bottom_text: Option<&'static str>,
    pub text_color: TextColor,
}

fn solid(color: &'static str, top: &'static str, bottom: &'static str, text: TextColor) -> RenderDescriptor {
    RenderDescriptor {
        background: Background::Solid { color },
        top_text: top,
        bottom_text: Some(bottom),
        text_color: text,
    }
}

fn category_code(category: Category) -> Option<&'static str> {
    match category {
        Category::Severe => Some("SEV"),
        Category::Moderate => Some("MOD"),
        Category::Mild => Some("MIL"),
        Category::Normal => Some("BNO"),
        Category::Na | Category::Ny => None,
    }
}

/// Descriptor for a status. `for_layer` selects the compact map-layer icon.
pub fn descriptor(category: Category, phase: Phase, for_layer: bool) -> Result<RenderDescriptor> {
    use Category::*;
    use TextColor::{Black, White};

    let placeholder = |top: &'static str, background: Background| RenderDescriptor {
        background,
        top_text: top,
        bottom_text: if for_layer { None } else { Some("-") },
        text_color: Black,
    };

    let code = category_code(category);
    let found = match (category, phase, code) {
        // Placeholder categories ignore the phase.
        (Na, _, _) => placeholder("na", Background::Solid { color: NEUTRAL }),
        (Ny, _, _) if for_layer => placeholder("ny", Background::Solid { color: NEUTRAL }),
        (Ny, _, _) => placeholder(
            "ny",
            Background::Striped {
                color: NEUTRAL,
                stripe: STRIPE,
            },
        ),
        (Severe, Phase::Set, Some(c)) => solid(SEVERE_SET, "S", c, White),
        (Severe, Phase::Ready, Some(c)) => solid(SEVERE_READY, "R", c, White),
        (Moderate, Phase::Set, Some(c)) => solid(MODERATE_SET, "S", c, Black),
        (Moderate, Phase::Ready, Some(c)) => solid(MODERATE_READY, "R", c, Black),
        (Mild | Normal, Phase::Set, Some(c)) => solid(MILD_SET, "S", c, Black),
        (Mild | Normal, Phase::Ready, Some(c)) => solid(MILD_READY, "R", c, Black),
        (_, Phase::Na, Some(c)) => solid(NEUTRAL, "na", c, Black),
        _ => return Err(AaError::IconNotImplemented { category, phase }),
    };
    Ok(found)
}

/// Every status the views can emit for `config`.
fn reachable(config: &CountryConfig) -> Vec<Status> {
    config
        .category_ids()
        .flat_map(|c| [Phase::Set, Phase::Ready, Phase::Na].map(|p| Status::new(c, p)))
        .chain([
            Status::new(Category::Na, Phase::Na),
            Status::new(Category::Ny, Phase::Ny),
        ])
        .chain(config.row_categories.iter().copied())
        .collect()
}

/// Fails on the first status of `config` that has no icon.
pub fn validate(config: &CountryConfig) -> Result<()> {
    let statuses = reachable(config);
    for status in &statuses {
        descriptor(status.category, status.phase, false)?;
        descriptor(status.category, status.phase, true)?;
    }
    debug!(statuses = statuses.len(), "render table validated");
    Ok(())
}
