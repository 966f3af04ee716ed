use std::collections::HashSet;

use crate::models::{Item, ItemId};

/// Set of selected item ids
#[derive(Debug, Clone, Default)]
pub struct Selection {
    selected: HashSet<ItemId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the id if absent, remove it if present.
    /// Returns whether the id is selected afterwards.
    pub fn toggle(&mut self, id: &ItemId) -> bool {
        if self.selected.remove(id) {
            false
        } else {
            self.selected.insert(id.clone());
            true
        }
    }

    pub fn select(&mut self, id: ItemId) {
        self.selected.insert(id);
    }

    pub fn is_selected(&self, id: &ItemId) -> bool {
        self.selected.contains(id)
    }

    /// True when `items` holds at least one item with an id and every such
    /// item is selected. Items without an id are skipped.
    pub fn covers<'a, I>(&self, items: I) -> bool
    where
        I: IntoIterator<Item = &'a Item>,
    {
        let mut any = false;
        for id in items.into_iter().filter_map(|item| item.id.as_ref()) {
            if !self.selected.contains(id) {
                return false;
            }
            any = true;
        }
        any
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &ItemId> {
        self.selected.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_adds_and_removes() {
        let mut selection = Selection::new();
        let id = ItemId::from(1);

        assert!(selection.toggle(&id));
        assert!(selection.is_selected(&id));
        assert!(!selection.toggle(&id));
        assert!(selection.is_empty());
    }

    #[test]
    fn test_covers_requires_non_empty_set() {
        let selection = Selection::new();
        assert!(!selection.covers(std::iter::empty()));
    }

    #[test]
    fn test_drafts_alone_are_never_covered() {
        let mut selection = Selection::new();
        selection.select(ItemId::from(1));
        let items = [Item::new("draft")];
        assert!(!selection.covers(&items));
    }

    #[test]
    fn test_drafts_are_skipped_when_covering() {
        let mut selection = Selection::new();
        selection.select(ItemId::from(1));
        let items = [
            Item {
                id: Some(ItemId::from(1)),
                ..Item::new("Drill")
            },
            Item::new("Drill draft"),
        ];
        assert!(selection.covers(&items));
    }
}
