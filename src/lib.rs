//! Anticipatory Action Views
//!
//! Turns drought forecast rows into the structures an early-warning panel shows:
//! - District grid (month × severity bucket)
//! - Timeline grid per forecast window
//! - Latest forecast per category and index
//! - Fleet-wide map statuses and the home table
//! - Icon lookup for every (category, phase) pair

pub mod config;
pub mod engine;
pub mod error;
pub mod model;
pub mod render;
pub mod season;
pub mod utils;
pub mod views;

// Re-exports for convenience
pub use config::{CategoryOption, ConfigManager, CountryConfig};
pub use engine::ViewEngine;
pub use error::{AaError, Result};
pub use model::{AAData, Category, Filters, Phase, Row, Status, Window, WindowFilter};
pub use season::{Clock, FixedClock, SeasonCalculator, SystemClock};
