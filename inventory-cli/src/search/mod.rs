//! Search and multi-select over the item collection
//!
//! `ItemsTable` is the view-model behind an item list: it keeps the current
//! search string and the selection, and derives the visible and selected
//! subsets from whatever collection it is given.

pub mod query;
pub mod selection;

pub use query::{DEFAULT_SEARCH_FIELDS, ItemField, Query, Term};
pub use selection::Selection;

use crate::models::Item;

#[derive(Debug, Clone, Default)]
pub struct ItemsTable {
    search_string: String,
    query: Query,
    selection: Selection,
}

impl ItemsTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(search: impl Into<String>) -> Self {
        let mut table = Self::new();
        table.set_search_string(search);
        table
    }

    pub fn search_string(&self) -> &str {
        &self.search_string
    }

    /// Replace the search string. The selection is kept.
    pub fn set_search_string(&mut self, search: impl Into<String>) {
        self.search_string = search.into();
        self.query = Query::parse(&self.search_string);
    }

    pub fn query(&self) -> &Query {
        &self.query
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Items visible under the current search, in collection order
    pub fn filtered_entities<'a>(&self, items: &'a [Item]) -> Vec<&'a Item> {
        self.query.filter(items)
    }

    /// Toggle one item. Items without an id cannot be selected.
    pub fn toggle_item(&mut self, item: &Item) -> bool {
        match &item.id {
            Some(id) => self.selection.toggle(id),
            None => false,
        }
    }

    /// Select every filtered item, or clear the selection when all of them
    /// are already selected. Drafts without an id take no part in either.
    pub fn toggle_all(&mut self, items: &[Item]) {
        let filtered = self.filtered_entities(items);
        if self.selection.covers(filtered.iter().copied()) {
            self.selection.clear();
        } else {
            for id in filtered.into_iter().filter_map(|item| item.id.clone()) {
                self.selection.select(id);
            }
        }
    }

    /// Whether the filtered set is non-empty and entirely selected
    pub fn all_entities_selected(&self, items: &[Item]) -> bool {
        self.selection.covers(self.filtered_entities(items))
    }

    /// Selected items of `items`, in collection order
    pub fn selected_items<'a>(&self, items: &'a [Item]) -> Vec<&'a Item> {
        items
            .iter()
            .filter(|item| item.id.as_ref().is_some_and(|id| self.selection.is_selected(id)))
            .collect()
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ItemId;

    fn items() -> Vec<Item> {
        (1..=4)
            .map(|n| Item {
                id: Some(ItemId::from(n)),
                ..Item::new(if n % 2 == 0 { "Saw" } else { "Drill" })
            })
            .collect()
    }

    #[test]
    fn test_select_all_is_relative_to_filter() {
        let items = items();
        let mut table = ItemsTable::with_search("drill");

        table.toggle_all(&items);

        assert_eq!(table.selection().len(), 2);
        assert!(table.all_entities_selected(&items));

        table.set_search_string("");
        assert!(!table.all_entities_selected(&items));
        assert_eq!(table.selected_items(&items).len(), 2);
    }

    #[test]
    fn test_select_all_with_empty_filter_result_selects_nothing() {
        let items = items();
        let mut table = ItemsTable::with_search("hammer");

        table.toggle_all(&items);

        assert!(table.selection().is_empty());
        assert!(!table.all_entities_selected(&items));
    }

    #[test]
    fn test_select_all_with_drafts_toggles() {
        let items = vec![
            Item {
                id: Some(ItemId::from(1)),
                ..Item::new("Drill")
            },
            Item::new("Drill draft"),
        ];
        let mut table = ItemsTable::new();

        table.toggle_all(&items);
        assert_eq!(table.selection().len(), 1);
        assert!(table.all_entities_selected(&items));

        table.toggle_all(&items);
        assert!(table.selection().is_empty());
        assert!(!table.all_entities_selected(&items));

        table.toggle_all(&items);
        assert_eq!(table.selection().len(), 1);
    }

    #[test]
    fn test_toggle_item_without_id() {
        let mut table = ItemsTable::new();
        assert!(!table.toggle_item(&Item::new("draft")));
        assert!(table.selection().is_empty());
    }
}
