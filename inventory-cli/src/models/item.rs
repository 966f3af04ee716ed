//! Item, category and instance records

use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use super::id::{CategoryId, Id, ItemId};
use super::status::SyncStatus;

/// A catalogued inventory entry.
///
/// Field names follow the camelCase wire format of the backend. Fields the
/// client does not know about are kept in `extra` so an item can be sent back
/// unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Server-assigned id; `None` until the item has been created
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ItemId>,
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub maker: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub item_number: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub gtin: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub categories: Vec<Category>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub instances: Vec<Instance>,
    /// Outcome of the last create attempt; local only
    #[serde(skip)]
    pub syncstatus: Option<SyncStatus>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A named tag attached to items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<CategoryId>,
    pub name: String,
}

/// A physical copy of an item
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Instance {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Id>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub count: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub available: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub vendor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place: Option<Place>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Storage location of an instance. The backend sends either a bare name or
/// a `{id, name}` record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawPlace")]
pub struct Place {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Id>,
    pub name: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawPlace {
    Name(String),
    Record {
        #[serde(default)]
        id: Option<Id>,
        #[serde(default)]
        name: String,
    },
}

impl From<RawPlace> for Place {
    fn from(raw: RawPlace) -> Self {
        match raw {
            RawPlace::Name(name) => Self { id: None, name },
            RawPlace::Record { id, name } => Self { id, name },
        }
    }
}

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
        }
    }
}

impl Item {
    /// Create a not-yet-persisted item, as entered in a creation form
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Build an item from a server payload
    pub fn from_payload(payload: Value) -> Result<Self> {
        serde_json::from_value(payload).context("Failed to parse item payload")
    }

    /// Serialize the item into the payload sent to the server
    pub fn to_payload(&self) -> Result<Value> {
        serde_json::to_value(self).context("Failed to serialize item")
    }

    /// Replace every server-owned field with the canonical representation
    /// returned by the backend. The local sync status is kept.
    pub fn apply_response(&mut self, canonical: Item) {
        let syncstatus = self.syncstatus.take();
        *self = canonical;
        self.syncstatus = syncstatus;
    }

    pub fn category_names(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|c| c.name.as_str())
    }

    pub fn with_categories<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = names.into_iter().map(Category::new).collect();
        self
    }
}

/// Accept strings, numbers and booleans for text fields. The backend is not
/// consistent about quoting numeric columns.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Lenient {
        Text(String),
        Int(i64),
        Float(f64),
        Bool(bool),
    }

    Ok(Option::<Lenient>::deserialize(deserializer)?.map(|value| match value {
        Lenient::Text(s) => s,
        Lenient::Int(n) => n.to_string(),
        Lenient::Float(f) => f.to_string(),
        Lenient::Bool(b) => b.to_string(),
    }))
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
