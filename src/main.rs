//! aa-views
//!
//! Loads a country configuration and a forecast data file, then prints one
//! view as JSON. Meant for inspecting data, not as a service.
//!
//! Usage: `aa-views <data.json> <view> [district] [filters.json]`
//! where `view` is one of `district`, `timeline`, `forecast`, `rendered`,
//! `map` or `home`.

use anyhow::{bail, Context, Result};
use std::env;
use tokio::fs;
use tracing::info;
use tracing_subscriber::EnvFilter;

use anticipatory_action::views::{window_ranges, TimelineVariant};
use anticipatory_action::{
    AAData, ConfigManager, CountryConfig, Filters, ViewEngine, Window, WindowFilter,
};

// ──────────────────────────────────────────────────────────────────────────────
// CONFIGURATION
// ──────────────────────────────────────────────────────────────────────────────

const DEFAULT_COUNTRY: &str = "mozambique";

/// `AA_CONFIG` (a JSON or YAML file) wins over the `AA_COUNTRY` preset.
async fn load_config() -> Result<CountryConfig> {
    if let Ok(path) = env::var("AA_CONFIG") {
        return ConfigManager::new(&path)
            .load()
            .await
            .with_context(|| format!("loading configuration from {}", path));
    }
    let country = env::var("AA_COUNTRY").unwrap_or_else(|_| DEFAULT_COUNTRY.to_string());
    CountryConfig::preset(&country).with_context(|| format!("resolving preset {}", country))
}

async fn load_filters(path: Option<&String>) -> Result<Filters> {
    match path {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .await
                .with_context(|| format!("reading filters {}", path))?;
            serde_json::from_str(&raw).with_context(|| format!("parsing filters {}", path))
        }
        None => {
            let date = env::var("AA_DATE").ok();
            Ok(Filters::new(WindowFilter::All, date.as_deref()))
        }
    }
}

// ──────────────────────────────────────────────────────────────────────────────
// MAIN ENTRY POINT
// ──────────────────────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("anticipatory_action=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let (Some(data_path), Some(view)) = (args.first(), args.get(1)) else {
        bail!("usage: aa-views <data.json> <view> [district] [filters.json]");
    };
    let district = args.get(2).map(String::as_str).unwrap_or_default();

    let engine = ViewEngine::with_system_clock(load_config().await?)
        .context("configuration rejected")?;

    let raw = fs::read_to_string(data_path)
        .await
        .with_context(|| format!("reading data {}", data_path))?;
    let data: AAData =
        serde_json::from_str(&raw).with_context(|| format!("parsing data {}", data_path))?;
    let filters = load_filters(args.get(3)).await?;

    info!(
        view = view.as_str(),
        district,
        windows = data.len(),
        season = ?engine.season(&filters),
        "rendering view"
    );

    let rendered = || engine.rendered_districts(&data, &filters, &window_ranges(&data));
    let output = match view.as_str() {
        "district" => {
            let window = match filters.selected_window {
                WindowFilter::Window2 => Window::Window2,
                _ => Window::Window1,
            };
            serde_json::to_value(engine.district(&data, window, district, &filters))?
        }
        "timeline" => serde_json::to_value(engine.timeline(
            &data,
            district,
            &filters,
            TimelineVariant::Drought,
        ))?,
        "forecast" => serde_json::to_value(engine.forecast(&data, district, &filters))?,
        "rendered" => serde_json::to_value(rendered())?,
        "map" => serde_json::to_value(engine.map(&rendered(), &filters))?,
        "home" => serde_json::to_value(engine.home_table(&rendered(), &filters))?,
        other => bail!("unknown view `{}`", other),
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
