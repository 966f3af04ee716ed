use anyhow::{Result, bail};
use colored::*;

use crate::api::ItemsBackend;
use crate::cli::output;
use crate::models::{Item, ItemId};
use crate::store::ItemStore;

pub async fn handle<B: ItemsBackend>(store: &ItemStore<B>, id: &str) -> Result<()> {
    let id = ItemId::from(id);

    store.get_item_by_id(&id).await;
    let Some(item) = store.item().await else {
        bail!("Item {} not found", id);
    };

    tokio::join!(
        store.load_parent_items(&id),
        store.load_sub_items(&id),
        store.load_related_items(&id),
    );

    output::print_details(&item);
    print_relation("Parent items", &store.parent_items().await);
    print_relation("Sub items", &store.sub_items().await);
    print_relation("Related items", &store.related_items().await);
    Ok(())
}

fn print_relation(title: &str, items: &[Item]) {
    if items.is_empty() {
        return;
    }
    println!();
    println!("{}", title.bold().underline());
    output::print_items(items);
}
