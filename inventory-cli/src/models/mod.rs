//! Inventory data model
//!
//! Plain records mirroring the JSON payloads of the inventory backend,
//! plus the local-only synchronization status attached to items.

pub mod id;
pub mod item;
pub mod relation;
pub mod status;

pub use id::{CategoryId, Id, ItemId};
pub use item::{Category, Instance, Item, Place};
pub use relation::RelationType;
pub use status::{SyncState, SyncStatus};
