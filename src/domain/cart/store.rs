//! The persisted cart shared by every page of the storefront.

use crate::domain::cart::line::CartLine;
use crate::domain::cart::state::{AddOutcome, Cart, CartTotals, DuplicatePolicy};
use crate::domain::catalog::ProductLookup;
use crate::storage::{keys, load_json, save_json, KeyValueStore};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    #[error("Your cart is empty")]
    Empty,
}

/// What the cart drawer and badge render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CartView {
    pub lines: Vec<CartLine>,
    pub item_count: u64,
    #[schema(value_type = f64)]
    pub subtotal: Decimal,
}

/// Order summary handed to the download step. No payment is taken.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CheckoutSummary {
    pub lines: Vec<CartLine>,
    pub item_count: u64,
    #[schema(value_type = f64)]
    pub subtotal: Decimal,
    pub free_only: bool,
}

/// Cart + duplicate policy + the storage it is written to after every change.
///
/// Storage failures are logged and swallowed: the in-memory cart stays
/// authoritative and the next successful write catches storage up.
pub struct CartStore {
    cart: Cart,
    policy: DuplicatePolicy,
    storage: Arc<dyn KeyValueStore>,
}

impl CartStore {
    /// Loads the cart from storage. Lines under the legacy landing-page key are
    /// merged in once and the key is dropped; anything unreadable is empty.
    pub fn load(storage: Arc<dyn KeyValueStore>, policy: DuplicatePolicy) -> Self {
        let cart = Self::read(storage.as_ref());
        let store = Self {
            cart,
            policy,
            storage,
        };
        info!(
            lines = store.cart.lines().len(),
            policy = ?store.policy,
            "CartStore: loaded cart"
        );
        store
    }

    fn read(storage: &dyn KeyValueStore) -> Cart {
        let mut lines: Vec<CartLine> = load_json(storage, keys::CART).unwrap_or_default();
        if storage.get(keys::LEGACY_CART).is_none() {
            return Cart::from_lines(lines);
        }

        // Landing pages write the legacy key; its lines join the current cart.
        let legacy: Vec<CartLine> = load_json(storage, keys::LEGACY_CART).unwrap_or_default();
        info!(
            current = lines.len(),
            legacy = legacy.len(),
            "CartStore: folding legacy cart key into cart"
        );
        lines.extend(legacy);
        let cart = Cart::from_lines(lines);
        if let Err(e) = save_json(storage, keys::CART, &cart) {
            warn!(error = %e, "CartStore: failed to write migrated cart");
        } else if let Err(e) = storage.remove(keys::LEGACY_CART) {
            warn!(error = %e, "CartStore: failed to drop legacy cart key");
        }
        cart
    }

    fn persist(&self) {
        match save_json(self.storage.as_ref(), keys::CART, &self.cart) {
            Ok(()) => debug!(lines = self.cart.lines().len(), "CartStore: cart persisted"),
            Err(e) => warn!(error = %e, "CartStore: failed to persist cart"),
        }
    }

    pub fn policy(&self) -> DuplicatePolicy {
        self.policy
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn lines(&self) -> &[CartLine] {
        self.cart.lines()
    }

    pub fn add(&mut self, product_id: &str, lookup: &dyn ProductLookup) -> AddOutcome {
        self.add_quantity(product_id, NonZeroU32::MIN, lookup)
    }

    pub fn add_quantity(
        &mut self,
        product_id: &str,
        quantity: NonZeroU32,
        lookup: &dyn ProductLookup,
    ) -> AddOutcome {
        let outcome = self
            .cart
            .add_quantity(product_id, quantity, lookup, self.policy);
        if outcome.changed_cart() {
            self.persist();
        } else {
            debug!(product_id, ?outcome, "CartStore: add left cart unchanged");
        }
        outcome
    }

    /// No-op (and no write) when the id is not in the cart.
    pub fn remove(&mut self, product_id: &str) -> bool {
        let removed = self.cart.remove(product_id);
        if removed {
            self.persist();
        }
        removed
    }

    pub fn set_quantity(&mut self, product_id: &str, quantity: i64) -> bool {
        let changed = self.cart.set_quantity(product_id, quantity);
        if changed {
            self.persist();
        }
        changed
    }

    pub fn totals(&self) -> CartTotals {
        self.cart.totals()
    }

    pub fn view(&self) -> CartView {
        let totals = self.cart.totals();
        CartView {
            lines: self.cart.lines().to_vec(),
            item_count: totals.item_count,
            subtotal: totals.subtotal,
        }
    }

    /// Adopts whatever is in storage now. Another tab or process writing the
    /// same key wins over this one's unsaved view (last writer wins).
    pub fn reload(&mut self) {
        self.cart = Self::read(self.storage.as_ref());
    }

    /// The cart is left as is; the caller decides whether to clear it after delivery.
    pub fn checkout(&self) -> Result<CheckoutSummary, CartError> {
        if self.cart.is_empty() {
            return Err(CartError::Empty);
        }
        let totals = self.cart.totals();
        Ok(CheckoutSummary {
            lines: self.cart.lines().to_vec(),
            item_count: totals.item_count,
            subtotal: totals.subtotal,
            free_only: totals.subtotal.is_zero(),
        })
    }

    pub fn clear(&mut self) {
        if !self.cart.is_empty() {
            self.cart.clear();
            self.persist();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::{Catalog, ProductRegistry, FREE_TEMPLATE_ID};
    use crate::storage::MemoryStore;

    fn setup(policy: DuplicatePolicy) -> (Arc<MemoryStore>, CartStore, ProductRegistry) {
        let storage = Arc::new(MemoryStore::new());
        let store = CartStore::load(storage.clone(), policy);
        (storage, store, ProductRegistry::storefront(&Catalog::builtin()))
    }

    #[test]
    fn every_change_is_written_through() {
        let (storage, mut store, reg) = setup(DuplicatePolicy::Increment);
        store.add("advanced-savings-planner", &reg);

        let stored: Vec<CartLine> = load_json(&*storage, keys::CART).unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].product_id, "advanced-savings-planner");
    }

    #[test]
    fn no_op_remove_does_not_write() {
        let (storage, mut store, _) = setup(DuplicatePolicy::Increment);
        assert!(!store.remove("investment-tracker"));
        assert!(storage.get(keys::CART).is_none());
    }

    #[test]
    fn legacy_cart_is_migrated_once() {
        let storage = Arc::new(MemoryStore::new());
        storage
            .set(
                keys::LEGACY_CART,
                r#"[{"id":"free-budget-template","name":"Budgeting Template","price":0,"type":"template"}]"#
                    .to_string(),
            )
            .unwrap();

        let store = CartStore::load(storage.clone(), DuplicatePolicy::RejectDuplicate);
        assert!(store.cart().contains(FREE_TEMPLATE_ID));
        assert!(storage.get(keys::LEGACY_CART).is_none());
        assert!(storage.get(keys::CART).is_some());
    }

    #[test]
    fn legacy_lines_join_an_existing_cart() {
        let (storage, _, reg) = setup(DuplicatePolicy::Increment);
        let tracker = reg.lookup("expense-tracker").unwrap();
        save_json(&*storage, keys::CART, &vec![CartLine::new("expense-tracker", tracker, 1)])
            .unwrap();
        storage
            .set(
                keys::LEGACY_CART,
                r#"[{"id":"free-budget-template","name":"Budgeting Template","price":0,"type":"template"},
                    {"id":"expense-tracker","name":"Expense Tracker","price":9.99,"type":"premium"}]"#
                    .to_string(),
            )
            .unwrap();

        let store = CartStore::load(storage.clone(), DuplicatePolicy::Increment);
        let ids: Vec<&str> = store.lines().iter().map(|l| l.product_id.as_str()).collect();
        assert_eq!(ids, ["expense-tracker", FREE_TEMPLATE_ID]);
        assert_eq!(store.cart().line("expense-tracker").unwrap().quantity, 2);
        assert!(storage.get(keys::LEGACY_CART).is_none());

        let stored: Vec<CartLine> = load_json(&*storage, keys::CART).unwrap();
        assert_eq!(stored.len(), 2);
    }

    #[test]
    fn malformed_cart_loads_empty() {
        let storage = Arc::new(MemoryStore::new());
        storage.set(keys::CART, "{\"oops\":".to_string()).unwrap();
        let store = CartStore::load(storage, DuplicatePolicy::Increment);
        assert!(store.cart().is_empty());
    }

    #[test]
    fn checkout_refuses_empty_cart() {
        let (_, mut store, reg) = setup(DuplicatePolicy::RejectDuplicate);
        assert_eq!(store.checkout().unwrap_err(), CartError::Empty);
        assert_eq!(CartError::Empty.to_string(), "Your cart is empty");

        store.add(FREE_TEMPLATE_ID, &reg);
        let summary = store.checkout().unwrap();
        assert!(summary.free_only);
        assert_eq!(summary.item_count, 1);
        assert_eq!(store.lines().len(), 1);
    }

    #[test]
    fn reload_adopts_the_last_writer() {
        let (storage, mut store, reg) = setup(DuplicatePolicy::Increment);
        store.add("expense-tracker", &reg);

        let mut other_tab = CartStore::load(storage.clone(), DuplicatePolicy::Increment);
        other_tab.set_quantity("expense-tracker", 5);

        store.reload();
        assert_eq!(store.totals().item_count, 5);
    }
}
