/// Data structures for Tabby
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Snapshot of a browser tab as reported by `chrome.tabs.query`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabRecord {
    #[serde(default)]
    pub id: Option<i32>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub fav_icon_url: Option<String>,
    #[serde(default)]
    pub active: bool,
}

impl TabRecord {
    pub fn new(id: i32, url: &str, title: &str) -> TabRecord {
        TabRecord {
            id: Some(id),
            title: title.to_string(),
            url: Some(url.to_string()),
            fav_icon_url: None,
            active: false,
        }
    }
}

/// A labelled cluster of tabs, rebuilt from scratch on every reload
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub label: String,
    pub tabs: Vec<TabRecord>,
}

impl Group {
    /// Identifier of the first tab, used as the recency key
    pub fn first_tab_id(&self) -> i32 {
        self.tabs.first().and_then(|tab| tab.id).unwrap_or(0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortCriterion {
    Alphabetical,
    Recency,
    /// Reserved; leaves the group order untouched
    Relevance,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> SortDirection {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState {
    pub criterion: SortCriterion,
    pub direction: SortDirection,
}

impl SortState {
    pub fn new(criterion: SortCriterion, direction: SortDirection) -> SortState {
        SortState {
            criterion,
            direction,
        }
    }

    /// Clicking the active criterion flips direction; a new one starts ascending
    pub fn toggle(self, criterion: SortCriterion) -> SortState {
        if self.criterion == criterion {
            SortState::new(criterion, self.direction.flipped())
        } else {
            SortState::new(criterion, SortDirection::Ascending)
        }
    }
}

impl Default for SortState {
    fn default() -> Self {
        SortState::new(SortCriterion::Recency, SortDirection::Descending)
    }
}

/// Presentation state owned by the popup and passed into the grouping functions
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PopupState {
    pub search_term: String,
    pub sort: SortState,
    pub expanded: HashSet<String>,
}

impl PopupState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_group(&mut self, label: &str) {
        if !self.expanded.remove(label) {
            self.expanded.insert(label.to_string());
        }
    }

    pub fn is_expanded(&self, label: &str) -> bool {
        self.expanded.contains(label)
    }

    pub fn toggle_sort(&mut self, criterion: SortCriterion) {
        self.sort = self.sort.toggle(criterion);
    }
}
