use anyhow::Result;
use colored::*;

use crate::api::ItemsBackend;
use crate::cli::output;
use crate::search::ItemsTable;
use crate::store::ItemStore;

pub async fn handle<B: ItemsBackend>(store: &ItemStore<B>, search: &[String], count: bool) -> Result<()> {
    let items = super::load_all(store).await?;
    let table = ItemsTable::with_search(search.join(" "));
    let visible = table.filtered_entities(&items);

    if count {
        println!("{}", visible.len());
        return Ok(());
    }

    if visible.is_empty() {
        println!("{}", "No items found".yellow());
        return Ok(());
    }

    output::print_items(visible.iter().copied());
    if !table.query().is_empty() {
        println!(
            "{}",
            format!("{} of {} items", visible.len(), items.len()).dimmed()
        );
    }
    Ok(())
}
