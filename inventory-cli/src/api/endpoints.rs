//! Endpoint paths of the inventory app, relative to the configured server URL

use crate::models::{ItemId, RelationType};

/// Header carrying the per-session anti-forgery token
pub const REQUEST_TOKEN_HEADER: &str = "requesttoken";

pub const ITEMS: &str = "items";
pub const ITEM_ADD: &str = "item/add";

fn segment(id: &ItemId) -> String {
    urlencoding::encode(id.as_str()).into_owned()
}

pub fn item(id: &ItemId) -> String {
    format!("item/{}", segment(id))
}

pub fn sub_items(id: &ItemId) -> String {
    format!("item/{}/sub", segment(id))
}

pub fn parent_items(id: &ItemId) -> String {
    format!("item/{}/parent", segment(id))
}

pub fn related_items(id: &ItemId) -> String {
    format!("item/{}/related", segment(id))
}

pub fn item_candidates(id: &ItemId, relation: RelationType) -> String {
    format!("item/{}/candidates/{}", segment(id), relation.as_str())
}

pub fn delete_item(id: &ItemId) -> String {
    format!("item/{}/delete", segment(id))
}

/// Join a relative endpoint path onto the server base URL
pub fn join(base_url: &str, path: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), path.trim_start_matches('/'))
}
