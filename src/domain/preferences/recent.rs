use crate::storage::{keys, load_json, save_json, KeyValueStore};
use std::sync::Arc;
use tracing::warn;

/// How many product views are remembered.
pub const RECENTLY_VIEWED_CAP: usize = 10;

/// Most-recent-first list of viewed product ids, without duplicates.
pub struct RecentlyViewed {
    ids: Vec<String>,
    storage: Arc<dyn KeyValueStore>,
}

impl RecentlyViewed {
    pub fn load(storage: Arc<dyn KeyValueStore>) -> Self {
        let mut ids: Vec<String> =
            load_json(storage.as_ref(), keys::RECENTLY_VIEWED).unwrap_or_default();
        ids.truncate(RECENTLY_VIEWED_CAP);
        Self { ids, storage }
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn record(&mut self, product_id: &str) {
        self.ids.retain(|id| id != product_id);
        self.ids.insert(0, product_id.to_string());
        self.ids.truncate(RECENTLY_VIEWED_CAP);
        if let Err(e) = save_json(self.storage.as_ref(), keys::RECENTLY_VIEWED, &self.ids) {
            warn!(error = %e, "RecentlyViewed: failed to persist");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn revisits_move_to_front() {
        let mut recent = RecentlyViewed::load(Arc::new(MemoryStore::new()));
        recent.record("a");
        recent.record("b");
        recent.record("a");
        assert_eq!(recent.ids(), ["a", "b"]);
    }

    #[test]
    fn list_is_capped() {
        let storage = Arc::new(MemoryStore::new());
        let mut recent = RecentlyViewed::load(storage.clone());
        for i in 0..15 {
            recent.record(&format!("p{}", i));
        }
        assert_eq!(recent.ids().len(), RECENTLY_VIEWED_CAP);
        assert_eq!(recent.ids()[0], "p14");
        assert_eq!(recent.ids()[9], "p5");
        assert_eq!(RecentlyViewed::load(storage).ids(), recent.ids());
    }
}
