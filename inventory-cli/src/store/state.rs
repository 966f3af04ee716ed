//! Store state and its mutation entry points

use log::error;
use std::collections::BTreeMap;

use super::events::StoreEvent;
use crate::models::{Item, ItemId};

/// Every way the store state can change.
///
/// State is only ever written through [`StoreState::apply`].
#[derive(Debug, Clone)]
pub enum Mutation {
    /// Merge items into the mapping, keyed by id. Existing entries are
    /// overwritten, entries missing from the list are kept.
    AddItems(Vec<Item>),
    AddItem(Item),
    DeleteItem(ItemId),
    SetItem(Option<Item>),
    SetSubItems(Vec<Item>),
    SetParentItems(Vec<Item>),
    SetRelatedItems(Vec<Item>),
    SetItemCandidates(Vec<Item>),
    SetLoadingItems(bool),
}

/// Client-visible snapshot of the inventory.
///
/// `items` is the source of truth for list views. The detail slots hold the
/// latest fetch for whichever detail page is active and are not kept in sync
/// with `items`.
#[derive(Debug, Clone, Default)]
pub struct StoreState {
    items: BTreeMap<ItemId, Item>,
    item: Option<Item>,
    loading_items: bool,
    sub_items: Vec<Item>,
    parent_items: Vec<Item>,
    related_items: Vec<Item>,
    item_candidates: Vec<Item>,
}

impl StoreState {
    /// Apply a mutation, returning the event to publish if anything changed
    pub fn apply(&mut self, mutation: Mutation) -> Option<StoreEvent> {
        match mutation {
            Mutation::AddItems(items) => {
                let mut changed = false;
                for item in items {
                    changed |= self.insert(item);
                }
                changed.then_some(StoreEvent::ItemsChanged)
            }
            Mutation::AddItem(item) => self.insert(item).then_some(StoreEvent::ItemsChanged),
            Mutation::DeleteItem(id) => self
                .items
                .remove(&id)
                .map(|_| StoreEvent::ItemsChanged),
            Mutation::SetItem(item) => {
                self.item = item;
                Some(StoreEvent::ItemChanged)
            }
            Mutation::SetSubItems(items) => {
                self.sub_items = items;
                Some(StoreEvent::SubItemsChanged)
            }
            Mutation::SetParentItems(items) => {
                self.parent_items = items;
                Some(StoreEvent::ParentItemsChanged)
            }
            Mutation::SetRelatedItems(items) => {
                self.related_items = items;
                Some(StoreEvent::RelatedItemsChanged)
            }
            Mutation::SetItemCandidates(items) => {
                self.item_candidates = items;
                Some(StoreEvent::ItemCandidatesChanged)
            }
            Mutation::SetLoadingItems(loading) => {
                if self.loading_items == loading {
                    return None;
                }
                self.loading_items = loading;
                Some(StoreEvent::LoadingChanged(loading))
            }
        }
    }

    fn insert(&mut self, item: Item) -> bool {
        match item.id.clone() {
            Some(id) => {
                self.items.insert(id, item);
                true
            }
            None => {
                error!("Refusing to store item '{}' without an id", item.name);
                false
            }
        }
    }

    /// All items of the mapping
    pub fn all_items(&self) -> Vec<&Item> {
        self.items.values().collect()
    }

    pub fn item_by_id(&self, id: &ItemId) -> Option<&Item> {
        self.items.get(id)
    }

    pub fn contains(&self, id: &ItemId) -> bool {
        self.items.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether items are currently being loaded from the server
    pub fn loading_items(&self) -> bool {
        self.loading_items
    }

    pub fn item(&self) -> Option<&Item> {
        self.item.as_ref()
    }

    pub fn sub_items(&self) -> &[Item] {
        &self.sub_items
    }

    pub fn parent_items(&self) -> &[Item] {
        &self.parent_items
    }

    pub fn related_items(&self) -> &[Item] {
        &self.related_items
    }

    pub fn item_candidates(&self) -> &[Item] {
        &self.item_candidates
    }
}
