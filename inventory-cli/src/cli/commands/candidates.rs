use anyhow::Result;
use colored::*;

use crate::api::ItemsBackend;
use crate::cli::output;
use crate::models::{ItemId, RelationType};
use crate::store::ItemStore;

pub async fn handle<B: ItemsBackend>(store: &ItemStore<B>, id: &str, relation: RelationType) -> Result<()> {
    let id = ItemId::from(id);
    store.load_item_candidates(&id, relation).await;
    let candidates = store.item_candidates().await;

    if candidates.is_empty() {
        println!("{}", format!("No {} candidates for item {}", relation, id).yellow());
    } else {
        output::print_items(&candidates);
    }
    Ok(())
}
