//! Client-side item store
//!
//! `ItemStore` owns the in-memory snapshot of the inventory and mediates every
//! read and write against the backend. Actions call the backend, and responses
//! change the state only through [`Mutation`]s. Network failures never escape
//! an action; they turn into an empty slot, an error sync status or a log line.

pub mod events;
pub mod state;

pub use events::StoreEvent;
pub use state::{Mutation, StoreState};

use futures::future::join_all;
use log::{debug, info, warn};
use tokio::sync::{RwLock, broadcast};

use crate::api::{ConcurrencyConfig, ConcurrencyLimiter, ItemsBackend};
use crate::models::{Item, ItemId, RelationType, SyncStatus};

/// State container driving all network calls for items
pub struct ItemStore<B> {
    backend: B,
    state: RwLock<StoreState>,
    concurrency: ConcurrencyConfig,
    events: broadcast::Sender<StoreEvent>,
}

impl<B: ItemsBackend> ItemStore<B> {
    /// Store with the default batch bound of 5 in-flight requests
    pub fn new(backend: B) -> Self {
        Self::with_concurrency(backend, ConcurrencyConfig::default())
    }

    pub fn with_concurrency(backend: B, concurrency: ConcurrencyConfig) -> Self {
        let (events, _) = broadcast::channel(events::EVENT_CHANNEL_CAPACITY);
        Self {
            backend,
            state: RwLock::new(StoreState::default()),
            concurrency,
            events,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Receive a [`StoreEvent`] after every state change
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }

    /// Apply a mutation and notify subscribers
    pub async fn commit(&self, mutation: Mutation) {
        let event = self.state.write().await.apply(mutation);
        if let Some(event) = event {
            // No subscribers is fine
            let _ = self.events.send(event);
        }
    }

    /// Run `f` against the current state
    pub async fn read<R>(&self, f: impl FnOnce(&StoreState) -> R) -> R {
        f(&*self.state.read().await)
    }

    // === Getters ===

    pub async fn all_items(&self) -> Vec<Item> {
        self.read(|s| s.all_items().into_iter().cloned().collect()).await
    }

    pub async fn item_by_id(&self, id: &ItemId) -> Option<Item> {
        self.read(|s| s.item_by_id(id).cloned()).await
    }

    pub async fn loading_items(&self) -> bool {
        self.read(|s| s.loading_items()).await
    }

    pub async fn item(&self) -> Option<Item> {
        self.read(|s| s.item().cloned()).await
    }

    pub async fn sub_items(&self) -> Vec<Item> {
        self.read(|s| s.sub_items().to_vec()).await
    }

    pub async fn parent_items(&self) -> Vec<Item> {
        self.read(|s| s.parent_items().to_vec()).await
    }

    pub async fn related_items(&self) -> Vec<Item> {
        self.read(|s| s.related_items().to_vec()).await
    }

    pub async fn item_candidates(&self) -> Vec<Item> {
        self.read(|s| s.item_candidates().to_vec()).await
    }

    // === Actions ===

    /// Fetch all items and merge them into the mapping.
    ///
    /// Entries the server no longer returns are kept. `loading_items` is set
    /// while the request is outstanding. Returns whether the fetch succeeded.
    pub async fn load_items(&self) -> bool {
        self.commit(Mutation::SetLoadingItems(true)).await;
        let loaded = match self.backend.fetch_items().await {
            Ok(items) => {
                info!("Loaded {} items", items.len());
                self.commit(Mutation::AddItems(items)).await;
                true
            }
            Err(err) => {
                warn!("Loading items failed: {:#}", err);
                false
            }
        };
        self.commit(Mutation::SetLoadingItems(false)).await;
        loaded
    }

    /// Create every item, at most `max_concurrent_requests` at a time.
    ///
    /// Returns the items in input order. Each carries its own sync status:
    /// created items hold the server's representation and were added to the
    /// mapping, failed ones were not.
    pub async fn create_items(&self, items: Vec<Item>) -> Vec<Item> {
        let limiter = ConcurrencyLimiter::new(self.concurrency.clone());
        let tasks = items.into_iter().map(|mut item| {
            let limiter = &limiter;
            async move {
                match limiter.acquire().await {
                    Ok(_permit) => self.create_item(item).await,
                    Err(err) => {
                        warn!("Item creation for '{}' not started: {:#}", item.name, err);
                        item.syncstatus = Some(SyncStatus::error());
                        item
                    }
                }
            }
        });
        let created = join_all(tasks).await;
        log_queue_stats("Create", &limiter);

        let failed = created
            .iter()
            .filter(|item| item.syncstatus.as_ref().is_some_and(SyncStatus::is_error))
            .count();
        info!(
            "Created {} of {} items ({} failed)",
            created.len() - failed,
            created.len(),
            failed
        );
        created
    }

    async fn create_item(&self, mut item: Item) -> Item {
        match self.backend.create_item(&item).await {
            Ok(canonical) => {
                item.apply_response(canonical);
                item.syncstatus = Some(SyncStatus::created());
                self.commit(Mutation::AddItem(item.clone())).await;
            }
            Err(err) => {
                warn!("Item creation failed for '{}': {:#}", item.name, err);
                item.syncstatus = Some(SyncStatus::error());
            }
        }
        item
    }

    /// Fetch one item into the `item` slot, clearing it on failure
    pub async fn get_item_by_id(&self, id: &ItemId) {
        let item = match self.backend.fetch_item(id).await {
            Ok(item) => Some(item),
            Err(err) => {
                warn!("Loading item {} failed: {:#}", id, err);
                None
            }
        };
        self.commit(Mutation::SetItem(item)).await;
    }

    pub async fn load_sub_items(&self, id: &ItemId) {
        let items = self
            .backend
            .fetch_sub_items(id)
            .await
            .unwrap_or_else(|err| empty_on_error("sub items", id, err));
        self.commit(Mutation::SetSubItems(items)).await;
    }

    pub async fn load_parent_items(&self, id: &ItemId) {
        let items = self
            .backend
            .fetch_parent_items(id)
            .await
            .unwrap_or_else(|err| empty_on_error("parent items", id, err));
        self.commit(Mutation::SetParentItems(items)).await;
    }

    pub async fn load_related_items(&self, id: &ItemId) {
        let items = self
            .backend
            .fetch_related_items(id)
            .await
            .unwrap_or_else(|err| empty_on_error("related items", id, err));
        self.commit(Mutation::SetRelatedItems(items)).await;
    }

    pub async fn load_item_candidates(&self, id: &ItemId, relation: RelationType) {
        let items = self
            .backend
            .fetch_item_candidates(id, relation)
            .await
            .unwrap_or_else(|err| empty_on_error("item candidates", id, err));
        self.commit(Mutation::SetItemCandidates(items)).await;
    }

    /// Delete an item on the server, then drop it from the mapping.
    /// Returns whether the server accepted the delete.
    pub async fn delete_item(&self, item: &Item) -> bool {
        let Some(id) = item.id.as_ref() else {
            warn!("Cannot delete item '{}' without an id", item.name);
            return false;
        };

        match self.backend.delete_item(id).await {
            Ok(()) => {
                debug!("Deleted item {}", id);
                self.commit(Mutation::DeleteItem(id.clone())).await;
                true
            }
            Err(err) => {
                warn!("Item deletion failed for {}: {:#}", id, err);
                false
            }
        }
    }

    /// Delete items through the bounded queue. Returns how many succeeded.
    pub async fn delete_items(&self, items: &[Item]) -> usize {
        let limiter = ConcurrencyLimiter::new(self.concurrency.clone());
        let tasks = items.iter().map(|item| {
            let limiter = &limiter;
            async move {
                match limiter.run(self.delete_item(item)).await {
                    Ok(deleted) => deleted,
                    Err(err) => {
                        warn!("Item deletion not started: {:#}", err);
                        false
                    }
                }
            }
        });
        let deleted = join_all(tasks).await.into_iter().filter(|d| *d).count();
        log_queue_stats("Delete", &limiter);
        info!("Deleted {} of {} items", deleted, items.len());
        deleted
    }
}

fn log_queue_stats(batch: &str, limiter: &ConcurrencyLimiter) {
    let stats = limiter.stats();
    debug!(
        "{} queue: peak {}/{} in flight, {:.0}% of requests waited for a slot",
        batch,
        stats.peak_in_use,
        stats.max_concurrent_requests,
        stats.wait_rate() * 100.0
    );
}

fn empty_on_error(what: &str, id: &ItemId, err: anyhow::Error) -> Vec<Item> {
    warn!("Loading {} of {} failed: {:#}", what, id, err);
    Vec::new()
}
