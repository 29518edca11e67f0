/// Reusable UI components

use crate::tab_data::{SortCriterion, SortDirection, SortState, TabRecord};
use patternfly_yew::prelude::*;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct TabRowProps {
    pub tab: TabRecord,
    pub on_switch: Callback<Option<i32>>,
    pub on_close: Callback<Option<i32>>,
}

#[function_component(TabRow)]
pub fn tab_row(props: &TabRowProps) -> Html {
    let tab_id = props.tab.id;

    html! {
        <div class="tab-item">
            if let Some(icon) = &props.tab.fav_icon_url {
                <img src={icon.clone()} alt="" class="tab-favicon" />
            }
            <span
                class="tab-title"
                onclick={props.on_switch.reform(move |_| tab_id)}
            >
                {&props.tab.title}
            </span>
            <Button
                onclick={props.on_close.reform(move |_| tab_id)}
                variant={ButtonVariant::Danger}
                size={ButtonSize::Small}
            >
                {"✗"}
            </Button>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct GroupCardProps {
    pub label: String,
    pub tabs: Vec<TabRecord>,
    pub expanded: bool,
    pub on_toggle: Callback<String>,
    pub on_switch: Callback<Option<i32>>,
    pub on_close: Callback<Option<i32>>,
}

#[function_component(GroupCard)]
pub fn group_card(props: &GroupCardProps) -> Html {
    let label = props.label.clone();

    html! {
        <div class="group-card">
            <button
                class="group-header"
                onclick={props.on_toggle.reform(move |_| label.clone())}
            >
                <span class="group-title">{format!("{} ({})", props.label, props.tabs.len())}</span>
                <span class="group-chevron">{if props.expanded { "▲" } else { "▼" }}</span>
            </button>
            if props.expanded {
                <div class="tabs-list">
                    {for props.tabs.iter().map(|tab| html! {
                        <TabRow
                            tab={tab.clone()}
                            on_switch={props.on_switch.clone()}
                            on_close={props.on_close.clone()}
                        />
                    })}
                </div>
            }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct SortButtonProps {
    pub criterion: SortCriterion,
    pub current: SortState,
    pub on_sort: Callback<SortCriterion>,
    pub children: Children,
}

#[function_component(SortButton)]
pub fn sort_button(props: &SortButtonProps) -> Html {
    let criterion = props.criterion;
    let is_current = props.current.criterion == criterion;

    let variant = if is_current {
        ButtonVariant::Primary
    } else {
        ButtonVariant::Secondary
    };

    let arrow = match (is_current, props.current.direction) {
        (false, _) => "",
        (true, SortDirection::Ascending) => " ↑",
        (true, SortDirection::Descending) => " ↓",
    };

    html! {
        <Button
            onclick={props.on_sort.reform(move |_| criterion)}
            variant={variant}
            size={ButtonSize::Small}
        >
            {props.children.clone()}
            {arrow}
        </Button>
    }
}
