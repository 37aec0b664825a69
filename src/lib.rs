pub mod app;
pub mod domain;
pub mod infra;
pub mod storage;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use app::{SearchDebouncer, Storefront, StorefrontEvent};
pub use domain::cart::{CartStore, DuplicatePolicy};
pub use domain::catalog::{Catalog, ProductLookup, ProductRegistry};
pub use infra::StorefrontSettings;
pub use storage::{JsonFileStore, KeyValueStore, MemoryStore};
