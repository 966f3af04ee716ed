//! Inventory backend API module
//!
//! The `ItemsBackend` trait describes the CRUD endpoints of the inventory app,
//! `InventoryClient` implements it over HTTP, and `resilience` bounds how many
//! requests a batch call keeps in flight.

pub mod backend;
pub mod client;
pub mod endpoints;
pub mod resilience;

pub use backend::ItemsBackend;
pub use client::InventoryClient;
pub use resilience::{ConcurrencyConfig, ConcurrencyLimiter, ConcurrencyStats, ResilienceConfig};
