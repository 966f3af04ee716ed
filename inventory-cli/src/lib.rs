//! Client for an inventory management backend
//!
//! The [`store::ItemStore`] keeps a local snapshot of all items in sync with
//! the server through an [`api::ItemsBackend`], running batch creates and
//! deletes with a bounded number of requests in flight. [`search::ItemsTable`]
//! filters that snapshot with a small `field:value` query language and tracks
//! a multi-selection over the visible rows.

pub mod api;
pub mod cli;
pub mod config;
pub mod import;
pub mod models;
pub mod search;
pub mod store;

pub use api::{InventoryClient, ItemsBackend};
pub use models::{Item, ItemId, RelationType, SyncState, SyncStatus};
pub use search::ItemsTable;
pub use store::{ItemStore, StoreEvent};
