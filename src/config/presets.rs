use super::{default_row_categories, CategoryOption, CountryConfig, HowToReadEntry};
use crate::model::Category;

pub const PRESET_COUNTRIES: [&str; 4] = ["malawi", "mozambique", "zambia", "zimbabwe"];

const READY_SET_GO: &str = "The \"Ready, Set & Go!\" system uses seasonal forecasts with longer lead time for preparedness (Ready phase) and shorter lead times for activation and mobilization (Set & Go! phases).";
const READY_SET_GO_ECMWF: &str = "The \"Ready, Set & Go!\" system uses seasonal forecasts from ECMWF with longer lead time for preparedness (Ready phase) and shorter lead times for activation and mobilization (Set & Go! phases).";
const DESCRIPTION: &str = "uses seasonal forecasts with longer lead time for preparedness (Ready phase) and shorter lead times for activation and mobilization (Set & Go! phases).";
const DESCRIPTION_ECMWF: &str = "uses seasonal forecasts from ECMWF with longer lead time for preparedness (Ready phase) and shorter lead times for activation and mobilization (Set & Go! phases).";

const BELOW_NORMAL_BLURB: &str = "Drought events that typically occur once every 3 years.";

fn assemble(
    categories: Vec<CategoryOption>,
    season_start_month: u32,
    single_window_mode: bool,
    how_to_read_content: Vec<HowToReadEntry>,
    description_text: &str,
    forecast_source: Option<&str>,
) -> CountryConfig {
    CountryConfig {
        row_categories: default_row_categories(&categories),
        categories,
        season_start_month,
        single_window_mode,
        how_to_read_content,
        description_text: description_text.to_string(),
        forecast_source: forecast_source.map(str::to_string),
    }
}

pub(super) fn preset(country: &str) -> Option<CountryConfig> {
    let config = match country {
        "malawi" => assemble(
            vec![CategoryOption::new(Category::Normal, "Below Normal")],
            7,
            false,
            vec![
                HowToReadEntry::new("NDJ", "November to January"),
                HowToReadEntry::new("JFM", "January to March"),
                HowToReadEntry::new("Below normal category", BELOW_NORMAL_BLURB),
                HowToReadEntry::new("Ready, Set and Go phases", READY_SET_GO_ECMWF),
            ],
            DESCRIPTION_ECMWF,
            Some("ECMWF"),
        ),
        "mozambique" => assemble(
            vec![
                CategoryOption::new(Category::Severe, "Severe"),
                CategoryOption::new(Category::Moderate, "Moderate"),
                CategoryOption::new(Category::Mild, "Mild"),
            ],
            4,
            false,
            vec![
                HowToReadEntry::new("Window 1", "Start to mid of the rainfall season."),
                HowToReadEntry::new("Window 2", "Mid to end of the rainfall season."),
                HowToReadEntry::new(
                    "Mild category",
                    "Drought events that typically occur once every 4 years.",
                ),
                HowToReadEntry::new(
                    "Moderate category",
                    "Drought events that typically occur once every 5 years.",
                ),
                HowToReadEntry::new(
                    "Severe category",
                    "Drought events that typically occur once every 7 years.",
                ),
                HowToReadEntry::new("Ready, Set and Go phases", READY_SET_GO),
            ],
            DESCRIPTION,
            None,
        ),
        "zambia" => assemble(
            vec![CategoryOption::new(Category::Normal, "Below Normal")],
            7,
            true,
            vec![
                HowToReadEntry::new("Window 1", "November to January"),
                HowToReadEntry::new("Below normal category", BELOW_NORMAL_BLURB),
                HowToReadEntry::new("Ready, Set and Go phases", READY_SET_GO_ECMWF),
            ],
            DESCRIPTION,
            None,
        ),
        "zimbabwe" => assemble(
            vec![
                CategoryOption::new(Category::Moderate, "Moderate"),
                CategoryOption::new(Category::Normal, "Below Normal"),
            ],
            4,
            false,
            vec![
                HowToReadEntry::new("Window 1", "Start to mid of the rainfall season."),
                HowToReadEntry::new("Window 2", "Mid to end of the rainfall season."),
                HowToReadEntry::new("Below normal category", BELOW_NORMAL_BLURB),
                HowToReadEntry::new(
                    "Moderate category",
                    "Drought events that typically occur once every 5 years.",
                ),
                HowToReadEntry::new("Ready, Set and Go phases", READY_SET_GO),
            ],
            DESCRIPTION,
            None,
        ),
        _ => return None,
    };
    Some(config)
}
