//! Template catalog: products, vocabularies, filter state and the filter/sort/paginate engine.

pub mod data;
pub mod engine;
pub mod filters;
pub mod product;
pub mod registry;
pub mod vocabulary;

pub use data::FREE_TEMPLATE_ID;
pub use engine::{
    active_filters, apply_filters, page_links, FilterChip, FilteredView, PageLink, PageLinks,
    PageOutOfRange,
};
pub use filters::{FilterKey, FilterPreferences, FilterState, FilterUpdate, PAGE_SIZE};
pub use product::{Catalog, CatalogError, Product};
pub use registry::{ProductInfo, ProductKind, ProductLookup, ProductRegistry};
pub use vocabulary::{Badge, Category, Difficulty, Format, PriceRange, SortKey, ViewMode};
