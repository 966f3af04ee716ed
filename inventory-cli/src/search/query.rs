//! Search query parsing and matching
//!
//! A query is a whitespace-separated list of terms that must all match.
//! `field:value` restricts a term to one field; anything else is matched
//! against the default searchable fields. Matching is a case-insensitive
//! substring test.

use std::fmt;

use crate::models::Item;

/// Item fields addressable in a scoped term
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemField {
    Id,
    Name,
    Maker,
    Description,
    ItemNumber,
    Link,
    Gtin,
    Details,
    Comment,
    Categories,
}

/// Scope names accepted in `field:value` terms (compared lowercased)
const FIELD_NAMES: &[(&str, ItemField)] = &[
    ("id", ItemField::Id),
    ("name", ItemField::Name),
    ("maker", ItemField::Maker),
    ("description", ItemField::Description),
    ("itemnumber", ItemField::ItemNumber),
    ("link", ItemField::Link),
    ("gtin", ItemField::Gtin),
    ("details", ItemField::Details),
    ("comment", ItemField::Comment),
    ("categories", ItemField::Categories),
];

/// Fields searched by a bare term
pub const DEFAULT_SEARCH_FIELDS: &[ItemField] = &[
    ItemField::Name,
    ItemField::Maker,
    ItemField::Description,
    ItemField::ItemNumber,
    ItemField::Link,
    ItemField::Gtin,
    ItemField::Details,
    ItemField::Comment,
    ItemField::Categories,
];

impl ItemField {
    /// Look up a scope name; `None` for unknown fields
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.to_lowercase();
        FIELD_NAMES
            .iter()
            .find(|(candidate, _)| *candidate == name)
            .map(|(_, field)| *field)
    }

    /// Text values of this field on `item`. Absent fields yield nothing,
    /// categories yield one value per category name.
    pub fn values<'a>(&self, item: &'a Item) -> Vec<&'a str> {
        let single =
            |value: &'a Option<String>| -> Vec<&'a str> { value.as_deref().into_iter().collect() };
        match self {
            Self::Id => item.id.iter().map(|id| id.as_str()).collect(),
            Self::Name => vec![item.name.as_str()],
            Self::Maker => single(&item.maker),
            Self::Description => single(&item.description),
            Self::ItemNumber => single(&item.item_number),
            Self::Link => single(&item.link),
            Self::Gtin => single(&item.gtin),
            Self::Details => single(&item.details),
            Self::Comment => single(&item.comment),
            Self::Categories => item.category_names().collect(),
        }
    }

    fn contains(&self, item: &Item, needle: &str) -> bool {
        self.values(item)
            .into_iter()
            .any(|value| value.to_lowercase().contains(needle))
    }
}

/// One parsed search term. Needles are stored lowercased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Term {
    /// Bare term, searched in all default fields
    Any(String),
    /// `field:value` with a recognized field
    Field(ItemField, String),
    /// `field:value` with an unrecognized field; never matches
    UnknownField(String),
}

impl Term {
    pub fn parse(raw: &str) -> Self {
        match raw.split_once(':') {
            Some((field, value)) if !field.is_empty() => match ItemField::from_name(field) {
                Some(field) => Self::Field(field, value.to_lowercase()),
                None => Self::UnknownField(field.to_string()),
            },
            _ => Self::Any(raw.to_lowercase()),
        }
    }

    pub fn matches(&self, item: &Item) -> bool {
        match self {
            Self::Any(needle) => DEFAULT_SEARCH_FIELDS
                .iter()
                .any(|field| field.contains(item, needle)),
            Self::Field(field, needle) => field.contains(item, needle),
            Self::UnknownField(_) => false,
        }
    }
}

/// Parsed search string
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    terms: Vec<Term>,
}

impl Query {
    pub fn parse(search: &str) -> Self {
        Self {
            terms: search.split_whitespace().map(Term::parse).collect(),
        }
    }

    /// True for a query that matches everything
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    pub fn matches(&self, item: &Item) -> bool {
        self.terms.iter().all(|term| term.matches(item))
    }

    /// Items matching the query, in input order
    pub fn filter<'a, I>(&self, items: I) -> Vec<&'a Item>
    where
        I: IntoIterator<Item = &'a Item>,
    {
        items.into_iter().filter(|item| self.matches(item)).collect()
    }
}

impl fmt::Display for ItemField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Id => "id",
            Self::Name => "name",
            Self::Maker => "maker",
            Self::Description => "description",
            Self::ItemNumber => "itemNumber",
            Self::Link => "link",
            Self::Gtin => "gtin",
            Self::Details => "details",
            Self::Comment => "comment",
            Self::Categories => "categories",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ItemId;

    fn drill() -> Item {
        Item {
            id: Some(ItemId::from(1)),
            maker: Some("Bosch".to_string()),
            comment: Some("Lent to Bob".to_string()),
            ..Item::new("Cordless Drill")
        }
        .with_categories(["Tools", "Power"])
    }

    #[test]
    fn test_parse_terms() {
        let query = Query::parse("  drill  maker:BOSCH color:red :odd ");
        assert_eq!(
            query.terms(),
            &[
                Term::Any("drill".to_string()),
                Term::Field(ItemField::Maker, "bosch".to_string()),
                Term::UnknownField("color".to_string()),
                Term::Any(":odd".to_string()),
            ]
        );
    }

    #[test]
    fn test_field_names_are_case_insensitive() {
        assert_eq!(ItemField::from_name("itemNumber"), Some(ItemField::ItemNumber));
        assert_eq!(ItemField::from_name("CATEGORIES"), Some(ItemField::Categories));
        assert_eq!(ItemField::from_name("colour"), None);
    }

    #[test]
    fn test_bare_term_is_case_insensitive_substring() {
        assert!(Query::parse("cordless").matches(&drill()));
        assert!(Query::parse("BOB").matches(&drill()));
        assert!(Query::parse("pow").matches(&drill()));
        assert!(!Query::parse("hammer").matches(&drill()));
    }

    #[test]
    fn test_terms_are_anded() {
        assert!(Query::parse("drill tools").matches(&drill()));
        assert!(!Query::parse("drill garden").matches(&drill()));
    }

    #[test]
    fn test_scoped_term_only_checks_its_field() {
        assert!(Query::parse("comment:bob").matches(&drill()));
        assert!(!Query::parse("maker:bob").matches(&drill()));
        assert!(Query::parse("id:1").matches(&drill()));
    }

    #[test]
    fn test_absent_field_never_matches() {
        assert!(!Query::parse("gtin:").matches(&drill()));
        assert!(Query::parse("comment:").matches(&drill()));
    }

    #[test]
    fn test_category_ids_are_not_searched() {
        let mut item = drill();
        item.categories[0].id = Some(ItemId::from(99));
        assert!(!Query::parse("categories:99").matches(&item));
    }

    #[test]
    fn test_value_may_contain_colons() {
        let item = Item {
            link: Some("https://example.com/drill".to_string()),
            ..drill()
        };
        assert!(Query::parse("link:https://example.com").matches(&item));
    }
}
