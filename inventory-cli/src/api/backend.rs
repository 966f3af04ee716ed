//! Backend abstraction used by the store
//!
//! One async method per endpoint of the inventory app. The HTTP client is the
//! production implementation; tests plug in in-memory doubles.

use anyhow::Result;
use async_trait::async_trait;

use crate::models::{Item, ItemId, RelationType};

#[async_trait]
pub trait ItemsBackend: Send + Sync {
    /// `GET items`
    async fn fetch_items(&self) -> Result<Vec<Item>>;

    /// `POST item/add` with body `{"item": ...}`, returning the created item
    async fn create_item(&self, item: &Item) -> Result<Item>;

    /// `GET item/{id}`
    async fn fetch_item(&self, id: &ItemId) -> Result<Item>;

    /// `GET item/{id}/sub`
    async fn fetch_sub_items(&self, id: &ItemId) -> Result<Vec<Item>>;

    /// `GET item/{id}/parent`
    async fn fetch_parent_items(&self, id: &ItemId) -> Result<Vec<Item>>;

    /// `GET item/{id}/related`
    async fn fetch_related_items(&self, id: &ItemId) -> Result<Vec<Item>>;

    /// `GET item/{id}/candidates/{relation}`
    async fn fetch_item_candidates(
        &self,
        id: &ItemId,
        relation: RelationType,
    ) -> Result<Vec<Item>>;

    /// `DELETE item/{id}/delete`
    async fn delete_item(&self, id: &ItemId) -> Result<()>;
}
