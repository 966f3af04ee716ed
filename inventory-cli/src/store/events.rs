//! Change notifications published by the store

/// Emitted after a mutation changed the store state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    /// The items mapping changed (items added, replaced or removed)
    ItemsChanged,
    /// The single-item detail slot was replaced
    ItemChanged,
    SubItemsChanged,
    ParentItemsChanged,
    RelatedItemsChanged,
    ItemCandidatesChanged,
    /// The `loading_items` flag flipped to the contained value
    LoadingChanged(bool),
}

/// Capacity of the broadcast channel; slow subscribers lose the oldest events
pub const EVENT_CHANNEL_CAPACITY: usize = 64;
