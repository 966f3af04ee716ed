use anyhow::{Result, bail};
use colored::*;

use crate::api::ItemsBackend;
use crate::models::{Item, ItemId};
use crate::search::ItemsTable;
use crate::store::ItemStore;

pub async fn handle<B: ItemsBackend>(store: &ItemStore<B>, ids: &[String], search: Option<&str>) -> Result<()> {
    if ids.is_empty() && search.is_none() {
        bail!("Either provide item ids or use --search to select items");
    }

    let items = super::load_all(store).await?;

    let targets: Vec<Item> = match search {
        Some(search) => {
            let mut table = ItemsTable::with_search(search);
            table.toggle_all(&items);
            table.selected_items(&items).into_iter().cloned().collect()
        }
        None => {
            let mut targets = Vec::new();
            for id in ids.iter().map(|id| ItemId::from(id.as_str())) {
                match items.iter().find(|item| item.id.as_ref() == Some(&id)) {
                    Some(item) => targets.push(item.clone()),
                    None => eprintln!("{} Item {} not found", "warning:".yellow(), id),
                }
            }
            targets
        }
    };

    if targets.is_empty() {
        println!("{}", "Nothing to delete".yellow());
        return Ok(());
    }

    let deleted = store.delete_items(&targets).await;
    let summary = format!("Deleted {} of {} items", deleted, targets.len());
    if deleted == targets.len() {
        println!("{}", summary.green());
    } else {
        println!("{}", summary.yellow());
    }
    Ok(())
}
