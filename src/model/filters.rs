use super::{Category, Row, Window};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Window selection as offered by the panel: one window or both side by side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WindowFilter {
    #[serde(rename = "Window 1")]
    Window1,
    #[serde(rename = "Window 2")]
    Window2,
    All,
}

impl WindowFilter {
    /// Windows in scope. Single-window countries only ever show the first window.
    pub fn windows(self, single_window_mode: bool) -> Vec<Window> {
        match self {
            WindowFilter::Window1 => vec![Window::Window1],
            WindowFilter::Window2 => vec![Window::Window2],
            WindowFilter::All if single_window_mode => vec![Window::Window1],
            WindowFilter::All => Window::ALL.to_vec(),
        }
    }
}

impl From<Window> for WindowFilter {
    fn from(window: Window) -> Self {
        match window {
            Window::Window1 => WindowFilter::Window1,
            Window::Window2 => WindowFilter::Window2,
        }
    }
}

/// Caller-owned filter snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Filters {
    pub selected_window: WindowFilter,
    #[serde(default)]
    pub categories: BTreeMap<Category, bool>,
    /// Empty string selects every index.
    #[serde(default)]
    pub selected_index: String,
    #[serde(default)]
    pub selected_date: Option<String>,
}

impl Filters {
    /// Every category enabled, no index restriction.
    pub fn new(selected_window: WindowFilter, selected_date: Option<&str>) -> Self {
        Self {
            selected_window,
            categories: Category::ALL.iter().map(|c| (*c, true)).collect(),
            selected_index: String::new(),
            selected_date: selected_date.map(str::to_string),
        }
    }

    pub fn category_enabled(&self, category: Category) -> bool {
        self.categories.get(&category).copied().unwrap_or(false)
    }

    pub fn index_matches(&self, row: &Row) -> bool {
        self.selected_index.is_empty() || self.selected_index == row.index
    }

    pub fn selected_date(&self) -> Option<&str> {
        self.selected_date.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_scope() {
        assert_eq!(WindowFilter::All.windows(false), vec![Window::Window1, Window::Window2]);
        assert_eq!(WindowFilter::All.windows(true), vec![Window::Window1]);
        assert_eq!(WindowFilter::Window2.windows(true), vec![Window::Window2]);
    }

    #[test]
    fn test_missing_category_is_disabled() {
        let json = r#"{"selectedWindow":"All","categories":{"Mild":true,"Severe":false}}"#;
        let filters: Filters = serde_json::from_str(json).unwrap();
        assert!(filters.category_enabled(Category::Mild));
        assert!(!filters.category_enabled(Category::Severe));
        assert!(!filters.category_enabled(Category::Moderate));
        assert_eq!(filters.selected_index, "");
        assert_eq!(filters.selected_date(), None);
    }
}
