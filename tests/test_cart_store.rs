//! Cart store behaviour through durable storage: write-through persistence,
//! restart round trip, idempotent removal and both duplicate policies.

use rust_decimal::Decimal;
use std::sync::Arc;
use template_storefront::domain::cart::{AddOutcome, CartLine};
use template_storefront::domain::catalog::{ProductInfo, ProductKind, FREE_TEMPLATE_ID};
use template_storefront::storage::{keys, load_json};
use template_storefront::{
    Catalog, CartStore, DuplicatePolicy, JsonFileStore, KeyValueStore, MemoryStore,
    ProductRegistry,
};

fn registry_with_a() -> ProductRegistry {
    let mut reg = ProductRegistry::new();
    reg.register(
        "A".to_string(),
        ProductInfo {
            title: "Template A".to_string(),
            price: Decimal::from(10),
            image_ref: "a-icon".to_string(),
            kind: ProductKind::Premium,
        },
    );
    reg
}

#[test]
fn add_twice_then_zero_quantity_empties_cart() {
    let storage = Arc::new(MemoryStore::new());
    let reg = registry_with_a();
    let mut store = CartStore::load(storage.clone(), DuplicatePolicy::Increment);

    store.add("A", &reg);
    store.add("A", &reg);
    assert_eq!(store.lines().len(), 1);
    assert_eq!(store.lines()[0].quantity, 2);
    assert_eq!(store.totals().subtotal, Decimal::new(2000, 2));

    assert!(store.set_quantity("A", 0));
    assert!(store.cart().is_empty());
    assert_eq!(store.totals().subtotal, Decimal::ZERO);

    let persisted: Vec<CartLine> = load_json(&*storage, keys::CART).unwrap();
    assert!(persisted.is_empty());
}

#[test]
fn remove_is_idempotent() {
    let reg = registry_with_a();
    let mut store = CartStore::load(Arc::new(MemoryStore::new()), DuplicatePolicy::Increment);
    store.add("A", &reg);

    assert!(store.remove("A"));
    let after_first = store.view();
    assert!(!store.remove("A"));
    assert_eq!(store.view(), after_first);
}

#[test]
fn cart_survives_a_restart_through_the_state_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");
    let catalog = Catalog::builtin();
    let reg = ProductRegistry::storefront(&catalog);

    let before = {
        let storage = Arc::new(JsonFileStore::open(&path));
        let mut store = CartStore::load(storage, DuplicatePolicy::Increment);
        store.add("debt-snowball-tracker", &reg);
        store.add("debt-snowball-tracker", &reg);
        store.add(FREE_TEMPLATE_ID, &reg);
        store.set_quantity("debt-snowball-tracker", 3);
        store.view()
    };

    let storage = Arc::new(JsonFileStore::open(&path));
    let store = CartStore::load(storage, DuplicatePolicy::Increment);
    assert_eq!(store.view(), before);
    assert_eq!(store.totals().item_count, 4);
    assert_eq!(store.totals().subtotal, Decimal::new(4797, 2));
}

#[test]
fn reject_policy_reports_duplicates() {
    let catalog = Catalog::builtin();
    let reg = ProductRegistry::storefront(&catalog);
    let mut store = CartStore::load(Arc::new(MemoryStore::new()), DuplicatePolicy::RejectDuplicate);

    let first = store.add(FREE_TEMPLATE_ID, &reg);
    assert_eq!(
        first.message().as_deref(),
        Some("Budgeting Template for Excel & Google Sheets added to cart!")
    );
    let second = store.add(FREE_TEMPLATE_ID, &reg);
    assert!(matches!(second, AddOutcome::AlreadyInCart { .. }));
    assert_eq!(store.totals().item_count, 1);
}

#[test]
fn unknown_ids_never_reach_storage() {
    let storage = Arc::new(MemoryStore::new());
    let mut store = CartStore::load(storage.clone(), DuplicatePolicy::Increment);
    assert_eq!(store.add("ghost", &registry_with_a()), AddOutcome::UnknownProduct);
    assert!(!store.set_quantity("ghost", 2));
    assert!(storage.get(keys::CART).is_none());
}

#[test]
fn legacy_records_without_quantity_load_as_one() {
    let storage = Arc::new(MemoryStore::new());
    storage
        .set(
            keys::CART,
            r#"[{"id":"A","name":"Template A","price":10,"type":"template"}]"#.to_string(),
        )
        .unwrap();
    let store = CartStore::load(storage, DuplicatePolicy::Increment);
    assert_eq!(store.lines()[0].quantity, 1);
    assert_eq!(store.lines()[0].title, "Template A");
    assert_eq!(store.totals().subtotal, Decimal::from(10));
}
