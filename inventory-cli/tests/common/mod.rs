//! In-memory backend double that records request concurrency

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use std::collections::{BTreeMap, HashSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::time::Duration;

use inventory_cli::api::ItemsBackend;
use inventory_cli::models::{Item, ItemId, RelationType};

pub struct MockBackend {
    items: Mutex<BTreeMap<ItemId, Item>>,
    failing_names: Mutex<HashSet<String>>,
    rejected_deletes: Mutex<HashSet<ItemId>>,
    next_id: AtomicI64,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
    requests: AtomicUsize,
    latency: Duration,
}

struct InFlight<'a>(&'a MockBackend);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

impl MockBackend {
    pub fn new() -> Self {
        Self::with_latency(Duration::from_millis(20))
    }

    pub fn with_latency(latency: Duration) -> Self {
        Self {
            items: Mutex::new(BTreeMap::new()),
            failing_names: Mutex::new(HashSet::new()),
            rejected_deletes: Mutex::new(HashSet::new()),
            next_id: AtomicI64::new(1),
            in_flight: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
            requests: AtomicUsize::new(0),
            latency,
        }
    }

    /// Seed the server with items that already have ids
    pub fn seed(&self, items: impl IntoIterator<Item = Item>) {
        let mut stored = self.items.lock().unwrap();
        for item in items {
            let id = item.id.clone().expect("seeded items need an id");
            stored.insert(id, item);
        }
    }

    pub fn fail_creating(&self, name: &str) {
        self.failing_names.lock().unwrap().insert(name.to_string());
    }

    pub fn reject_delete(&self, id: ItemId) {
        self.rejected_deletes.lock().unwrap().insert(id);
    }

    pub fn server_len(&self) -> usize {
        self.items.lock().unwrap().len()
    }

    pub fn peak_in_flight(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    async fn enter(&self) -> InFlight<'_> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        let guard = InFlight(self);
        tokio::time::sleep(self.latency).await;
        guard
    }
}

#[async_trait]
impl ItemsBackend for MockBackend {
    async fn fetch_items(&self) -> Result<Vec<Item>> {
        let _guard = self.enter().await;
        Ok(self.items.lock().unwrap().values().cloned().collect())
    }

    async fn create_item(&self, item: &Item) -> Result<Item> {
        let _guard = self.enter().await;
        if self.failing_names.lock().unwrap().contains(&item.name) {
            return Err(anyhow!("POST item/add failed with status 500"));
        }
        let mut created = item.clone();
        created.id = Some(ItemId::from(self.next_id.fetch_add(1, Ordering::SeqCst) + 1000));
        self.items
            .lock()
            .unwrap()
            .insert(created.id.clone().unwrap(), created.clone());
        Ok(created)
    }

    async fn fetch_item(&self, id: &ItemId) -> Result<Item> {
        let _guard = self.enter().await;
        self.items
            .lock()
            .unwrap()
            .get(id)
            .cloned()
            .ok_or_else(|| anyhow!("GET item/{} failed with status 404", id))
    }

    async fn fetch_sub_items(&self, _id: &ItemId) -> Result<Vec<Item>> {
        Ok(Vec::new())
    }

    async fn fetch_parent_items(&self, _id: &ItemId) -> Result<Vec<Item>> {
        Ok(Vec::new())
    }

    async fn fetch_related_items(&self, _id: &ItemId) -> Result<Vec<Item>> {
        Ok(Vec::new())
    }

    async fn fetch_item_candidates(&self, id: &ItemId, _relation: RelationType) -> Result<Vec<Item>> {
        let _guard = self.enter().await;
        Ok(self
            .items
            .lock()
            .unwrap()
            .values()
            .filter(|item| item.id.as_ref() != Some(id))
            .cloned()
            .collect())
    }

    async fn delete_item(&self, id: &ItemId) -> Result<()> {
        let _guard = self.enter().await;
        if self.rejected_deletes.lock().unwrap().contains(id) {
            return Err(anyhow!("DELETE item/{}/delete failed with status 403", id));
        }
        self.items.lock().unwrap().remove(id);
        Ok(())
    }
}

pub fn item(id: i64, name: &str) -> Item {
    Item {
        id: Some(ItemId::from(id)),
        ..Item::new(name)
    }
}
