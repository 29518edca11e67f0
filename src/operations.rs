/// Tab operations: grouping, filtering, sorting, auto-group planning

use crate::domain::{extract_hostname, resolve_group_label};
use crate::tab_data::{Group, SortCriterion, SortDirection, SortState, TabRecord};
use log::{debug, warn};
use std::collections::HashMap;

/// Title the browser gives an empty new tab
pub const NEW_TAB_TITLE: &str = "New Tab";

/// Label for tabs whose URL is missing or unparseable
pub const UNKNOWN_GROUP: &str = "unknown";

/// How tabs are labelled when partitioned into groups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GroupingMode {
    /// Label from hostname and page title; "New Tab" placeholders are dropped
    #[default]
    TitleAware,
    /// Label is the raw hostname; every tab is kept
    Hostname,
}

/// Tab ids sharing one hostname
#[derive(Debug, Clone, PartialEq)]
pub struct HostBucket {
    pub host: String,
    pub tab_ids: Vec<i32>,
}

/// A request for the browser to create a native tab group
#[derive(Debug, Clone, PartialEq)]
pub struct GroupRequest {
    pub title: String,
    pub tab_ids: Vec<i32>,
    pub index: usize,
    pub collapsed: bool,
}

fn group_label(tab: &TabRecord, mode: GroupingMode) -> String {
    let Some(url) = tab.url.as_deref() else {
        return UNKNOWN_GROUP.to_string();
    };

    let resolved = match mode {
        GroupingMode::TitleAware => resolve_group_label(url, &tab.title),
        GroupingMode::Hostname => extract_hostname(url),
    };

    resolved.unwrap_or_else(|e| {
        warn!("Grouping tab {:?} as '{}': {}", tab.id, UNKNOWN_GROUP, e);
        UNKNOWN_GROUP.to_string()
    })
}

/// Partition tabs into groups, in order of each label's first appearance
pub fn build_groups(tabs: &[TabRecord], mode: GroupingMode) -> Vec<Group> {
    let mut groups: Vec<Group> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for tab in tabs {
        if mode == GroupingMode::TitleAware && tab.title == NEW_TAB_TITLE {
            continue;
        }

        let label = group_label(tab, mode);
        match positions.get(&label) {
            Some(&position) => groups[position].tabs.push(tab.clone()),
            None => {
                positions.insert(label.clone(), groups.len());
                groups.push(Group {
                    label,
                    tabs: vec![tab.clone()],
                });
            }
        }
    }

    debug!("Built {} groups from {} tabs", groups.len(), tabs.len());
    groups
}

fn tab_matches(tab: &TabRecord, needle: &str) -> bool {
    tab.title.to_lowercase().contains(needle)
        || tab
            .url
            .as_deref()
            .unwrap_or_default()
            .to_lowercase()
            .contains(needle)
}

/// Keep tabs whose title or URL contains the search term, drop emptied groups, then order groups
pub fn filter_and_sort(groups: &[Group], search_term: &str, sort: SortState) -> Vec<Group> {
    let needle = search_term.to_lowercase();

    let mut filtered: Vec<Group> = groups
        .iter()
        .filter_map(|group| {
            let tabs: Vec<TabRecord> = group
                .tabs
                .iter()
                .filter(|tab| tab_matches(tab, &needle))
                .cloned()
                .collect();

            (!tabs.is_empty()).then(|| Group {
                label: group.label.clone(),
                tabs,
            })
        })
        .collect();

    // Descending is the exact reverse of ascending, ties included
    match sort.criterion {
        SortCriterion::Alphabetical => filtered.sort_by(|a, b| a.label.cmp(&b.label)),
        SortCriterion::Recency => filtered.sort_by_key(|group| group.first_tab_id()),
        SortCriterion::Relevance => return filtered,
    }

    if sort.direction == SortDirection::Descending {
        filtered.reverse();
    }

    filtered
}

/// Flatten groups into a single tab list (search results view)
pub fn matching_tabs(groups: &[Group]) -> Vec<TabRecord> {
    groups
        .iter()
        .flat_map(|group| group.tabs.iter().cloned())
        .collect()
}

/// Bucket tab ids by raw hostname, in order of first appearance
pub fn bucket_tab_ids_by_host(tabs: &[TabRecord]) -> Vec<HostBucket> {
    build_groups(tabs, GroupingMode::Hostname)
        .into_iter()
        .map(|group| HostBucket {
            host: group.label,
            tab_ids: group.tabs.iter().filter_map(|tab| tab.id).collect(),
        })
        .collect()
}

/// Plan native tab groups: largest bucket first, laid out contiguously from index 0
///
/// Single-tab buckets get no group but still occupy their slot.
pub fn plan_auto_groups(buckets: &[HostBucket]) -> Vec<GroupRequest> {
    let mut ordered: Vec<&HostBucket> = buckets.iter().collect();
    ordered.sort_by(|a, b| b.tab_ids.len().cmp(&a.tab_ids.len()));

    let mut index = 0;
    let mut requests = Vec::new();

    for bucket in ordered {
        if bucket.tab_ids.len() > 1 {
            requests.push(GroupRequest {
                title: bucket.host.clone(),
                tab_ids: bucket.tab_ids.clone(),
                index,
                collapsed: true,
            });
        }
        index += bucket.tab_ids.len();
    }

    requests
}

/// Ids of every tab that is not the active one (purge targets)
pub fn inactive_tab_ids(tabs: &[TabRecord]) -> Vec<i32> {
    tabs.iter()
        .filter(|tab| !tab.active)
        .filter_map(|tab| tab.id)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_tab(id: i32, url: &str, title: &str) -> TabRecord {
        TabRecord::new(id, url, title)
    }

    fn sample_tabs() -> Vec<TabRecord> {
        vec![
            create_test_tab(3, "https://github.com/rust-lang/rust", "GitHub - rust-lang/rust"),
            create_test_tab(1, "https://www.bbc.com/news/technology", "Technology - BBC News"),
            create_test_tab(5, "https://github.com/yewstack/yew", "GitHub - yewstack/yew"),
            create_test_tab(2, "https://en.wikipedia.org/wiki/Rust", "Rust - Wikipedia"),
            create_test_tab(4, "chrome://newtab", "New Tab"),
        ]
    }

    fn labels(groups: &[Group]) -> Vec<&str> {
        groups.iter().map(|g| g.label.as_str()).collect()
    }

    #[test]
    fn test_build_groups_excludes_new_tab() {
        let tabs = vec![
            create_test_tab(1, "https://github.com/foo", "GitHub - foo"),
            create_test_tab(2, "chrome://newtab", "New Tab"),
        ];

        let groups = build_groups(&tabs, GroupingMode::TitleAware);

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].label, "GitHub");
        assert_eq!(groups[0].tabs.len(), 1);
        assert_eq!(groups[0].tabs[0].id, Some(1));
    }

    #[test]
    fn test_build_groups_first_appearance_order() {
        let groups = build_groups(&sample_tabs(), GroupingMode::TitleAware);

        assert_eq!(labels(&groups), vec!["GitHub", "BBC", "Wikipedia"]);
        assert_eq!(groups[0].tabs.iter().map(|t| t.id).collect::<Vec<_>>(), vec![Some(3), Some(5)]);
    }

    #[test]
    fn test_build_groups_partition_is_total() {
        let tabs = sample_tabs();
        let placeholders = tabs.iter().filter(|t| t.title == NEW_TAB_TITLE).count();

        let title_aware = build_groups(&tabs, GroupingMode::TitleAware);
        let by_host = build_groups(&tabs, GroupingMode::Hostname);

        let count = |groups: &[Group]| groups.iter().map(|g| g.tabs.len()).sum::<usize>();
        assert_eq!(count(&title_aware), tabs.len() - placeholders);
        assert_eq!(count(&by_host), tabs.len());
    }

    #[test]
    fn test_build_groups_hostname_mode() {
        let groups = build_groups(&sample_tabs(), GroupingMode::Hostname);

        assert_eq!(
            labels(&groups),
            vec!["github.com", "www.bbc.com", "en.wikipedia.org", "newtab"]
        );
    }

    #[test]
    fn test_build_groups_unknown() {
        let tabs = vec![
            TabRecord {
                id: Some(1),
                title: "Settings".to_string(),
                ..TabRecord::default()
            },
            create_test_tab(2, "not a url", "Broken"),
        ];

        let groups = build_groups(&tabs, GroupingMode::TitleAware);

        assert_eq!(labels(&groups), vec![UNKNOWN_GROUP]);
        assert_eq!(groups[0].tabs.len(), 2);
    }

    #[test]
    fn test_filter_empty_search_keeps_everything() {
        let groups = build_groups(&sample_tabs(), GroupingMode::TitleAware);

        let result = filter_and_sort(&groups, "", SortState::default());

        assert_eq!(result.len(), groups.len());
        assert_eq!(matching_tabs(&result).len(), matching_tabs(&groups).len());
    }

    #[test]
    fn test_filter_no_match() {
        let groups = build_groups(&sample_tabs(), GroupingMode::TitleAware);

        let result = filter_and_sort(&groups, "zzz-nothing", SortState::default());

        assert!(result.is_empty());
    }

    #[test]
    fn test_filter_case_insensitive_title_or_url() {
        let groups = build_groups(&sample_tabs(), GroupingMode::TitleAware);
        let sort = SortState::new(SortCriterion::Alphabetical, SortDirection::Ascending);

        let by_title = filter_and_sort(&groups, "YEWSTACK", sort);
        assert_eq!(labels(&by_title), vec!["GitHub"]);
        assert_eq!(by_title[0].tabs.len(), 1);
        assert_eq!(by_title[0].tabs[0].id, Some(5));

        let by_url = filter_and_sort(&groups, "wiki/rust", sort);
        assert_eq!(labels(&by_url), vec!["Wikipedia"]);
    }

    #[test]
    fn test_filter_leaves_input_untouched() {
        let groups = build_groups(&sample_tabs(), GroupingMode::TitleAware);
        let before = groups.clone();

        let _ = filter_and_sort(&groups, "github", SortState::default());

        assert_eq!(groups, before);
    }

    #[test]
    fn test_sort_alphabetical() {
        let groups = build_groups(&sample_tabs(), GroupingMode::TitleAware);

        let asc = filter_and_sort(&groups, "", SortState::new(SortCriterion::Alphabetical, SortDirection::Ascending));
        let desc = filter_and_sort(&groups, "", SortState::new(SortCriterion::Alphabetical, SortDirection::Descending));

        assert_eq!(labels(&asc), vec!["BBC", "GitHub", "Wikipedia"]);
        let mut reversed = asc.clone();
        reversed.reverse();
        assert_eq!(reversed, desc);
    }

    #[test]
    fn test_sort_recency() {
        let groups = build_groups(&sample_tabs(), GroupingMode::TitleAware);

        let asc = filter_and_sort(&groups, "", SortState::new(SortCriterion::Recency, SortDirection::Ascending));
        let desc = filter_and_sort(&groups, "", SortState::new(SortCriterion::Recency, SortDirection::Descending));

        // first tab ids: BBC=1, Wikipedia=2, GitHub=3
        assert_eq!(labels(&asc), vec!["BBC", "Wikipedia", "GitHub"]);
        let mut reversed = asc.clone();
        reversed.reverse();
        assert_eq!(reversed, desc);
    }

    #[test]
    fn test_sort_recency_missing_id_counts_as_zero() {
        let groups = vec![
            Group {
                label: "Later".to_string(),
                tabs: vec![create_test_tab(9, "https://later.io", "Later")],
            },
            Group {
                label: "Special".to_string(),
                tabs: vec![TabRecord {
                    title: "Special".to_string(),
                    url: Some("https://special.io".to_string()),
                    ..TabRecord::default()
                }],
            },
        ];

        let asc = filter_and_sort(&groups, "", SortState::new(SortCriterion::Recency, SortDirection::Ascending));

        assert_eq!(labels(&asc), vec!["Special", "Later"]);
    }

    #[test]
    fn test_sort_descending_reverses_ties() {
        let untitled = |label: &str| Group {
            label: label.to_string(),
            tabs: vec![TabRecord {
                title: label.to_string(),
                url: Some(format!("https://{}.io", label)),
                ..TabRecord::default()
            }],
        };
        let groups = vec![
            untitled("a"),
            untitled("b"),
            Group {
                label: "c".to_string(),
                tabs: vec![create_test_tab(5, "https://c.io", "c")],
            },
        ];

        let asc = filter_and_sort(&groups, "", SortState::new(SortCriterion::Recency, SortDirection::Ascending));
        let desc = filter_and_sort(&groups, "", SortState::new(SortCriterion::Recency, SortDirection::Descending));

        assert_eq!(labels(&asc), vec!["a", "b", "c"]);
        assert_eq!(labels(&desc), vec!["c", "b", "a"]);
    }

    #[test]
    fn test_sort_alphabetical_descending_reverses_duplicate_labels() {
        let groups = vec![
            Group {
                label: "Docs".to_string(),
                tabs: vec![create_test_tab(1, "https://docs.rs/yew", "yew")],
            },
            Group {
                label: "Docs".to_string(),
                tabs: vec![create_test_tab(2, "https://docs.rs/serde", "serde")],
            },
        ];

        let desc = filter_and_sort(&groups, "", SortState::new(SortCriterion::Alphabetical, SortDirection::Descending));

        assert_eq!(desc[0].tabs[0].id, Some(2));
        assert_eq!(desc[1].tabs[0].id, Some(1));
    }

    #[test]
    fn test_sort_relevance_is_pass_through() {
        let groups = build_groups(&sample_tabs(), GroupingMode::TitleAware);

        for direction in [SortDirection::Ascending, SortDirection::Descending] {
            let result = filter_and_sort(&groups, "", SortState::new(SortCriterion::Relevance, direction));
            assert_eq!(result, groups);
        }
    }

    #[test]
    fn test_bucket_tab_ids_by_host() {
        let mut tabs = sample_tabs();
        tabs.push(TabRecord {
            title: "Devtools".to_string(),
            url: Some("https://github.com/settings".to_string()),
            ..TabRecord::default()
        });

        let buckets = bucket_tab_ids_by_host(&tabs);

        assert_eq!(buckets[0].host, "github.com");
        assert_eq!(buckets[0].tab_ids, vec![3, 5]);
        assert_eq!(buckets.last().unwrap().host, "newtab");
    }

    #[test]
    fn test_plan_auto_groups() {
        let buckets = vec![
            HostBucket { host: "a.com".to_string(), tab_ids: vec![1] },
            HostBucket { host: "b.com".to_string(), tab_ids: vec![2, 3] },
            HostBucket { host: "c.com".to_string(), tab_ids: vec![4, 5, 6] },
            HostBucket { host: "d.com".to_string(), tab_ids: vec![7] },
            HostBucket { host: "e.com".to_string(), tab_ids: vec![8, 9] },
        ];

        let requests = plan_auto_groups(&buckets);

        assert_eq!(requests.len(), 3);
        assert_eq!(requests[0].title, "c.com");
        assert_eq!(requests[0].index, 0);
        assert_eq!(requests[1].title, "b.com");
        assert_eq!(requests[1].index, 3);
        assert_eq!(requests[2].title, "e.com");
        assert_eq!(requests[2].index, 5);
        assert!(requests.iter().all(|r| r.collapsed));
    }

    #[test]
    fn test_plan_auto_groups_singletons_reserve_slots() {
        let buckets = vec![
            HostBucket { host: "solo.com".to_string(), tab_ids: vec![1] },
            HostBucket { host: "other.com".to_string(), tab_ids: vec![2] },
        ];

        assert!(plan_auto_groups(&buckets).is_empty());
    }

    #[test]
    fn test_inactive_tab_ids() {
        let mut tabs = sample_tabs();
        tabs[1].active = true;

        assert_eq!(inactive_tab_ids(&tabs), vec![3, 5, 2, 4]);
    }
}
