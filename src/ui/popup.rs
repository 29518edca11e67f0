/// Popup UI for Tabby extension

use crate::actions::{
    auto_group_tabs, close_tab, import_tab_list, load_groups, purge_tabs, save_tab_list,
    switch_to_tab,
};
use crate::host::{read_import_file, ChromeHost, TabWatcher};
use crate::operations::{filter_and_sort, matching_tabs, GroupingMode};
use crate::tab_data::{Group, PopupState, SortCriterion};
use crate::ui::components::{GroupCard, SortButton, TabRow};
use log::{error, info};
use patternfly_yew::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Clone, PartialEq)]
enum AppState {
    Idle,
    Loading(String),
    Error(String),
}

#[function_component(App)]
pub fn app() -> Html {
    let state = use_state(|| AppState::Loading("Loading tabs...".to_string()));
    let groups = use_state(Vec::<Group>::new);
    let view = use_state(PopupState::new);

    // Rebuild every group from a fresh tab snapshot
    let reload = {
        let state = state.clone();
        let groups = groups.clone();

        Callback::from(move |_: ()| {
            let state = state.clone();
            let groups = groups.clone();

            spawn_local(async move {
                match load_groups(&ChromeHost, GroupingMode::TitleAware).await {
                    Ok(loaded) => {
                        groups.set(loaded);
                        state.set(AppState::Idle);
                    }
                    Err(e) => {
                        state.set(AppState::Error(format!("Failed to load tabs: {}", e)));
                    }
                }
            });
        })
    };

    // Load tabs on mount, then follow tab changes made outside the popup
    {
        let reload = reload.clone();
        use_effect_with((), move |_| {
            reload.emit(());
            let subscription = ChromeHost.watch_tabs(Box::new(move || reload.emit(())));
            move || drop(subscription)
        });
    }

    let on_search_input = {
        let view = view.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                let mut next = (*view).clone();
                next.search_term = input.value();
                view.set(next);
            }
        })
    };

    let on_sort = {
        let view = view.clone();
        Callback::from(move |criterion: SortCriterion| {
            let mut next = (*view).clone();
            next.toggle_sort(criterion);
            view.set(next);
        })
    };

    let on_toggle_group = {
        let view = view.clone();
        Callback::from(move |label: String| {
            let mut next = (*view).clone();
            next.toggle_group(&label);
            view.set(next);
        })
    };

    let on_switch = {
        let state = state.clone();
        Callback::from(move |tab_id: Option<i32>| {
            let state = state.clone();
            spawn_local(async move {
                if let Err(e) = switch_to_tab(tab_id, &ChromeHost).await {
                    state.set(AppState::Error(e.to_string()));
                }
            });
        })
    };

    let on_close = {
        let state = state.clone();
        let reload = reload.clone();
        Callback::from(move |tab_id: Option<i32>| {
            let state = state.clone();
            let reload = reload.clone();
            spawn_local(async move {
                match close_tab(tab_id, &ChromeHost).await {
                    Ok(_) => reload.emit(()),
                    Err(e) => state.set(AppState::Error(e.to_string())),
                }
            });
        })
    };

    let on_save = {
        let state = state.clone();
        let groups = groups.clone();
        Callback::from(move |_| {
            let state = state.clone();
            let groups = (*groups).clone();
            spawn_local(async move {
                if let Err(e) = save_tab_list(&groups, &ChromeHost).await {
                    error!("Error saving tabs: {}", e);
                    state.set(AppState::Error(format!("Save failed: {}", e)));
                }
            });
        })
    };

    let on_import = {
        let state = state.clone();
        let reload = reload.clone();
        Callback::from(move |_| {
            let state = state.clone();
            let reload = reload.clone();
            spawn_local(async move {
                let result = match read_import_file().await {
                    Ok(Some(json)) => import_tab_list(&json, &ChromeHost).await,
                    Ok(None) => return,
                    Err(e) => Err(e),
                };

                match result {
                    Ok(count) => {
                        info!("Opened {} imported tabs", count);
                        reload.emit(());
                    }
                    Err(e) => {
                        error!("Error importing tabs: {}", e);
                        state.set(AppState::Error(format!("Import failed: {}", e)));
                    }
                }
            });
        })
    };

    let on_purge = {
        let state = state.clone();
        let reload = reload.clone();
        Callback::from(move |_| {
            let state = state.clone();
            let reload = reload.clone();
            state.set(AppState::Loading("Purging tabs...".to_string()));
            spawn_local(async move {
                match purge_tabs(&ChromeHost, &ChromeHost).await {
                    Ok(_) => reload.emit(()),
                    Err(e) => state.set(AppState::Error(format!("Purge failed: {}", e))),
                }
            });
        })
    };

    let on_auto_group = {
        let state = state.clone();
        let reload = reload.clone();
        Callback::from(move |_| {
            let state = state.clone();
            let reload = reload.clone();
            state.set(AppState::Loading("Grouping tabs...".to_string()));
            spawn_local(async move {
                match auto_group_tabs(&ChromeHost, &ChromeHost).await {
                    Ok(_) => reload.emit(()),
                    Err(e) => state.set(AppState::Error(format!("Grouping failed: {}", e))),
                }
            });
        })
    };

    let is_busy = matches!(*state, AppState::Loading(_));
    let visible = filter_and_sort(&groups, &view.search_term, view.sort);

    html! {
        <div class="padding-20">
            <div class="header">
                <h1 class="popup-title">{"Tabby"}</h1>
                <Button onclick={on_save} disabled={is_busy} variant={ButtonVariant::Secondary}>
                    {"💾"}
                </Button>
                <Button onclick={on_import} disabled={is_busy} variant={ButtonVariant::Secondary}>
                    {"📂"}
                </Button>
            </div>

            // Status display
            {match &*state {
                AppState::Loading(msg) => html! {
                    <div class="loading-text-center">
                        <Spinner />
                        <p class="loading-text">{msg}</p>
                    </div>
                },
                AppState::Error(err) => html! {
                    <div class="message-top-margin">
                        <Alert r#type={AlertType::Danger} title={"Error"} inline={true}>
                            {err.clone()}
                        </Alert>
                    </div>
                },
                AppState::Idle => html! {}
            }}

            <div class="search-container">
                <input
                    type="text"
                    placeholder="Search tabs..."
                    value={view.search_term.clone()}
                    oninput={on_search_input}
                    class="search-input"
                />
            </div>

            <div class="sort-buttons">
                <SortButton criterion={SortCriterion::Alphabetical} current={view.sort} on_sort={on_sort.clone()}>
                    {"A-Z"}
                </SortButton>
                <SortButton criterion={SortCriterion::Recency} current={view.sort} on_sort={on_sort.clone()}>
                    {"Time"}
                </SortButton>
                <SortButton criterion={SortCriterion::Relevance} current={view.sort} on_sort={on_sort}>
                    {"Relevance"}
                </SortButton>
            </div>

            <div class="groups-list">
                if visible.is_empty() {
                    <div class="empty-state">
                        if view.search_term.is_empty() {
                            <p>{"No tabs to show."}</p>
                        } else {
                            <p>{"No tabs match your search."}</p>
                        }
                    </div>
                } else if !view.search_term.is_empty() {
                    // Searching shows a flat list of matching tabs
                    {for matching_tabs(&visible).into_iter().map(|tab| html! {
                        <TabRow
                            tab={tab}
                            on_switch={on_switch.clone()}
                            on_close={on_close.clone()}
                        />
                    })}
                } else {
                    {for visible.iter().map(|group| html! {
                        <GroupCard
                            key={group.label.clone()}
                            label={group.label.clone()}
                            tabs={group.tabs.clone()}
                            expanded={view.is_expanded(&group.label)}
                            on_toggle={on_toggle_group.clone()}
                            on_switch={on_switch.clone()}
                            on_close={on_close.clone()}
                        />
                    })}
                }
            </div>

            <div class="flex-column-gap">
                <Button onclick={on_purge} disabled={is_busy} variant={ButtonVariant::Danger} block={true}>
                    {"🗑️ Purge Tabs"}
                </Button>
                <Button onclick={on_auto_group} disabled={is_busy} variant={ButtonVariant::Secondary} block={true}>
                    {"🗂️ Group by Site"}
                </Button>
            </div>

            <p class="footer-popup">
                {format!("{} groups • {} tabs", groups.len(), groups.iter().map(|g| g.tabs.len()).sum::<usize>())}
            </p>
        </div>
    }
}
