/// Bulk tab actions driven from the popup

use crate::error::TabbyError;
use crate::host::{FileExporter, TabController, TabGroupingSink, TabSource};
use crate::operations::{
    build_groups, bucket_tab_ids_by_host, inactive_tab_ids, plan_auto_groups, GroupingMode,
};
use crate::storage::{export_tab_list, parse_tab_list, urls_to_open, EXPORT_FILENAME};
use crate::tab_data::Group;
use log::{debug, info};

/// Take a fresh snapshot of the open tabs and group it
pub async fn load_groups<S: TabSource>(source: &S, mode: GroupingMode) -> Result<Vec<Group>, TabbyError> {
    let tabs = source.query_tabs().await?;
    Ok(build_groups(&tabs, mode))
}

pub async fn save_tab_list<E: FileExporter>(groups: &[Group], exporter: &E) -> Result<(), TabbyError> {
    let json = export_tab_list(groups)?;
    exporter.save_file(EXPORT_FILENAME, &json).await?;

    info!("Saved {} groups to {}", groups.len(), EXPORT_FILENAME);
    Ok(())
}

/// Reopen every tab of a saved list, returning how many were requested
///
/// The document is parsed in full first, so a malformed file opens nothing.
pub async fn import_tab_list<C: TabController>(json: &str, controller: &C) -> Result<usize, TabbyError> {
    let saved = parse_tab_list(json)?;
    let urls = urls_to_open(&saved);

    for url in &urls {
        controller.open_tab(url).await?;
    }

    info!("Imported {} tabs from {} groups", urls.len(), saved.len());
    Ok(urls.len())
}

/// Close every tab except the active one
pub async fn purge_tabs<S, C>(source: &S, controller: &C) -> Result<usize, TabbyError>
where
    S: TabSource,
    C: TabController,
{
    let tabs = source.query_tabs().await?;
    let tab_ids = inactive_tab_ids(&tabs);

    if tab_ids.is_empty() {
        debug!("Nothing to purge");
        return Ok(0);
    }

    controller.close_tabs(&tab_ids).await?;
    info!("Purged {} tabs", tab_ids.len());
    Ok(tab_ids.len())
}

/// Collapse tabs sharing a hostname into native tab groups
pub async fn auto_group_tabs<S, G>(source: &S, sink: &G) -> Result<usize, TabbyError>
where
    S: TabSource,
    G: TabGroupingSink,
{
    let tabs = source.query_tabs().await?;
    let requests = plan_auto_groups(&bucket_tab_ids_by_host(&tabs));

    for request in &requests {
        debug!(
            "Grouping {} tabs for {} at index {}",
            request.tab_ids.len(),
            request.title,
            request.index
        );
        sink.create_group(request).await?;
    }

    info!("Created {} tab groups", requests.len());
    Ok(requests.len())
}

pub async fn close_tab<C: TabController>(tab_id: Option<i32>, controller: &C) -> Result<(), TabbyError> {
    match tab_id {
        Some(id) => controller.close_tabs(&[id]).await,
        None => Ok(()),
    }
}

pub async fn switch_to_tab<C: TabController>(tab_id: Option<i32>, controller: &C) -> Result<(), TabbyError> {
    match tab_id {
        Some(id) => controller.activate_tab(id).await,
        None => Ok(()),
    }
}
