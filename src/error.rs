//! Error Types
//!
//! View transforms never fail; errors only come from configuration, rendering
//! lookups and file loading.

use crate::model::{Category, Phase};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AaError {
    #[error("Icon not implemented: {category}, {phase}")]
    IconNotImplemented { category: Category, phase: Phase },
    #[error("invalid country configuration: {reason}")]
    InvalidConfig { reason: String },
    #[error("unknown country preset `{0}`")]
    UnknownCountry(String),
    #[error("unsupported configuration format `{0}`")]
    UnsupportedFormat(String),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, AaError>;
