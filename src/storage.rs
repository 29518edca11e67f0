/// Saved tab list format: the JSON document written on save and read on import

use crate::error::TabbyError;
use crate::tab_data::Group;
use serde::{Deserialize, Serialize};

/// Default file name for saved tab lists
pub const EXPORT_FILENAME: &str = "tabby_tabs.json";

/// One group in a saved tab list
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SavedGroup {
    pub domain: String,
    pub tabs: Vec<SavedTab>,
}

/// A saved tab within a group
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SavedTab {
    pub url: String,
    #[serde(default)]
    pub title: String,
}

pub fn to_saved_groups(groups: &[Group]) -> Vec<SavedGroup> {
    groups
        .iter()
        .map(|group| SavedGroup {
            domain: group.label.clone(),
            tabs: group
                .tabs
                .iter()
                .map(|tab| SavedTab {
                    url: tab.url.clone().unwrap_or_default(),
                    title: tab.title.clone(),
                })
                .collect(),
        })
        .collect()
}

/// Serialize groups as a pretty-printed saved tab list
pub fn export_tab_list(groups: &[Group]) -> Result<String, TabbyError> {
    serde_json::to_string_pretty(&to_saved_groups(groups)).map_err(TabbyError::Export)
}

/// Parse a saved tab list; the whole document must be valid before anything is used
pub fn parse_tab_list(json: &str) -> Result<Vec<SavedGroup>, TabbyError> {
    serde_json::from_str(json).map_err(TabbyError::Import)
}

/// URLs to reopen, in group order then tab order
pub fn urls_to_open(saved: &[SavedGroup]) -> Vec<&str> {
    saved
        .iter()
        .flat_map(|group| group.tabs.iter().map(|tab| tab.url.as_str()))
        .collect()
}
