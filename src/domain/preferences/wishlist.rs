use crate::domain::catalog::ProductLookup;
use crate::storage::{keys, load_json, save_json, KeyValueStore};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::warn;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum WishlistToggle {
    Added,
    Removed,
    UnknownProduct,
}

/// Saved-for-later product ids, in the order they were added.
pub struct Wishlist {
    ids: Vec<String>,
    storage: Arc<dyn KeyValueStore>,
}

impl Wishlist {
    pub fn load(storage: Arc<dyn KeyValueStore>) -> Self {
        let mut ids: Vec<String> = load_json(storage.as_ref(), keys::WISHLIST).unwrap_or_default();
        let mut seen = std::collections::HashSet::new();
        ids.retain(|id| seen.insert(id.clone()));
        Self { ids, storage }
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn contains(&self, product_id: &str) -> bool {
        self.ids.iter().any(|id| id == product_id)
    }

    /// Adds a known product or removes it if already saved.
    pub fn toggle(&mut self, product_id: &str, lookup: &dyn ProductLookup) -> WishlistToggle {
        if !lookup.contains(product_id) {
            return WishlistToggle::UnknownProduct;
        }
        let outcome = if let Some(pos) = self.ids.iter().position(|id| id == product_id) {
            self.ids.remove(pos);
            WishlistToggle::Removed
        } else {
            self.ids.push(product_id.to_string());
            WishlistToggle::Added
        };
        if let Err(e) = save_json(self.storage.as_ref(), keys::WISHLIST, &self.ids) {
            warn!(error = %e, "Wishlist: failed to persist");
        }
        outcome
    }
}
