/// Capabilities the popup needs from the browser, and the chrome.* bridge implementing them

use crate::error::TabbyError;
use crate::operations::GroupRequest;
use crate::tab_data::TabRecord;
use wasm_bindgen::prelude::*;

// Import JS bridge functions
#[wasm_bindgen(module = "/popup.js")]
extern "C" {
    #[wasm_bindgen(catch)]
    async fn queryTabs() -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn createTab(url: &str) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    async fn removeTabs(tab_ids: JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    async fn activateTab(tab_id: i32) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    async fn groupTabs(request: JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    async fn downloadFile(data: &str, filename: &str) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    async fn pickImportFile() -> Result<JsValue, JsValue>;

    fn onTabsChanged(callback: &js_sys::Function);

    fn offTabsChanged(callback: &js_sys::Function);
}

/// Supplies snapshots of the open tabs
#[allow(async_fn_in_trait)]
pub trait TabSource {
    async fn query_tabs(&self) -> Result<Vec<TabRecord>, TabbyError>;
}

/// Opens, closes and focuses individual tabs
#[allow(async_fn_in_trait)]
pub trait TabController {
    async fn open_tab(&self, url: &str) -> Result<(), TabbyError>;
    async fn close_tabs(&self, tab_ids: &[i32]) -> Result<(), TabbyError>;
    async fn activate_tab(&self, tab_id: i32) -> Result<(), TabbyError>;
}

/// Creates native tab groups
#[allow(async_fn_in_trait)]
pub trait TabGroupingSink {
    async fn create_group(&self, request: &GroupRequest) -> Result<(), TabbyError>;
}

/// Writes an exported document somewhere the user can keep it
#[allow(async_fn_in_trait)]
pub trait FileExporter {
    async fn save_file(&self, filename: &str, contents: &str) -> Result<(), TabbyError>;
}

/// Keeps a listener registered until dropped
#[must_use = "the listener is removed as soon as the subscription is dropped"]
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(cancel: impl FnOnce() + 'static) -> Subscription {
        Subscription {
            cancel: Some(Box::new(cancel)),
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

/// Notifies when tabs are updated or removed outside the popup
pub trait TabWatcher {
    fn watch_tabs(&self, on_change: Box<dyn Fn()>) -> Subscription;
}

/// The real browser, reached through popup.js
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ChromeHost;

fn host_error(context: &str, e: JsValue) -> TabbyError {
    TabbyError::Host(format!("{}: {:?}", context, e))
}

fn to_js<T: serde::Serialize>(value: &T) -> Result<JsValue, TabbyError> {
    serde_wasm_bindgen::to_value(value)
        .map_err(|e| TabbyError::Host(format!("Failed to serialize: {:?}", e)))
}

impl TabSource for ChromeHost {
    async fn query_tabs(&self) -> Result<Vec<TabRecord>, TabbyError> {
        let tabs_js = queryTabs()
            .await
            .map_err(|e| host_error("Failed to get tabs", e))?;

        serde_wasm_bindgen::from_value(tabs_js)
            .map_err(|e| TabbyError::Host(format!("Failed to parse tabs: {:?}", e)))
    }
}

impl TabController for ChromeHost {
    async fn open_tab(&self, url: &str) -> Result<(), TabbyError> {
        createTab(url)
            .await
            .map_err(|e| host_error("Failed to open tab", e))
    }

    async fn close_tabs(&self, tab_ids: &[i32]) -> Result<(), TabbyError> {
        removeTabs(to_js(&tab_ids)?)
            .await
            .map_err(|e| host_error("Failed to close tabs", e))
    }

    async fn activate_tab(&self, tab_id: i32) -> Result<(), TabbyError> {
        activateTab(tab_id)
            .await
            .map_err(|e| host_error("Failed to switch tab", e))
    }
}

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct JsGroupRequest<'a> {
    title: &'a str,
    tab_ids: &'a [i32],
    index: usize,
    collapsed: bool,
}

impl TabGroupingSink for ChromeHost {
    async fn create_group(&self, request: &GroupRequest) -> Result<(), TabbyError> {
        let request_js = to_js(&JsGroupRequest {
            title: &request.title,
            tab_ids: &request.tab_ids,
            index: request.index,
            collapsed: request.collapsed,
        })?;

        groupTabs(request_js)
            .await
            .map_err(|e| host_error("Failed to group tabs", e))
    }
}

impl FileExporter for ChromeHost {
    async fn save_file(&self, filename: &str, contents: &str) -> Result<(), TabbyError> {
        downloadFile(contents, filename)
            .await
            .map_err(|e| host_error("Failed to save file", e))
    }
}

impl TabWatcher for ChromeHost {
    fn watch_tabs(&self, on_change: Box<dyn Fn()>) -> Subscription {
        let listener = Closure::wrap(on_change);
        onTabsChanged(listener.as_ref().unchecked_ref());

        Subscription::new(move || {
            offTabsChanged(listener.as_ref().unchecked_ref());
        })
    }
}

/// Text of a picked file; anything else (null when the picker was dismissed) is `None`
pub fn imported_text(contents: JsValue) -> Option<String> {
    contents.as_string()
}

/// Ask the user for a saved tab list; `None` when the picker is dismissed
pub async fn read_import_file() -> Result<Option<String>, TabbyError> {
    let contents = pickImportFile()
        .await
        .map_err(|e| host_error("Failed to read file", e))?;

    Ok(imported_text(contents))
}
