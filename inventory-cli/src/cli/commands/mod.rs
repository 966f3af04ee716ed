//! Subcommand handlers

pub mod candidates;
pub mod create;
pub mod delete;
pub mod list;
pub mod show;

use anyhow::{Result, bail};

use crate::api::ItemsBackend;
use crate::models::Item;
use crate::store::ItemStore;

/// Fill the store's item mapping, failing when the server cannot be reached
pub(crate) async fn load_all<B: ItemsBackend>(store: &ItemStore<B>) -> Result<Vec<Item>> {
    if !store.load_items().await {
        bail!("Could not load items from the server (run with -v for details)");
    }
    Ok(store.all_items().await)
}
