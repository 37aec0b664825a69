//! ProductRegistry mapping product ids to the display metadata the cart snapshots.

use crate::domain::catalog::data::FREE_TEMPLATE_ID;
use crate::domain::catalog::product::{Catalog, Product};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use utoipa::ToSchema;

/// How a product is presented in the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum ProductKind {
    Free,
    Premium,
}

impl ProductKind {
    pub fn for_price(price: Decimal) -> Self {
        if price.is_zero() {
            ProductKind::Free
        } else {
            ProductKind::Premium
        }
    }
}

/// Display data copied into a cart line when the product is added.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductInfo {
    pub title: String,
    #[schema(value_type = f64)]
    pub price: Decimal,
    pub image_ref: String,
    pub kind: ProductKind,
}

impl From<&Product> for ProductInfo {
    fn from(p: &Product) -> Self {
        ProductInfo {
            title: p.title.clone(),
            price: p.price,
            image_ref: format!("{}-icon", p.icon),
            kind: ProductKind::for_price(p.price),
        }
    }
}

/// Trait that defines the contract for resolving a product id at add-to-cart time.
///
/// The cart never owns product data; it asks a lookup and snapshots the answer.
pub trait ProductLookup: Send + Sync {
    /// Returns the display metadata for `id`, or None for an unknown id.
    fn lookup(&self, id: &str) -> Option<ProductInfo>;

    fn contains(&self, id: &str) -> bool {
        self.lookup(id).is_some()
    }
}

impl ProductLookup for Catalog {
    fn lookup(&self, id: &str) -> Option<ProductInfo> {
        self.get(id).map(ProductInfo::from)
    }
}

/// A registry that maps product ids to their cart metadata.
#[derive(Debug, Clone, Default)]
pub struct ProductRegistry {
    products: HashMap<String, ProductInfo>,
}

impl ProductRegistry {
    /// Creates a new empty ProductRegistry.
    pub fn new() -> Self {
        Self {
            products: HashMap::new(),
        }
    }

    /// Registers every catalog product under its id.
    pub fn from_catalog(catalog: &Catalog) -> Self {
        let mut reg = Self::new();
        for p in catalog.products() {
            reg.register(p.id.clone(), ProductInfo::from(p));
        }
        reg
    }

    /// The storefront lookup: the built-in catalog plus the free landing-page template.
    pub fn storefront(catalog: &Catalog) -> Self {
        let mut reg = Self::from_catalog(catalog);
        reg.register(
            FREE_TEMPLATE_ID.to_string(),
            ProductInfo {
                title: "Budgeting Template for Excel & Google Sheets".to_string(),
                price: Decimal::ZERO,
                image_ref: "basic-budget-icon".to_string(),
                kind: ProductKind::Free,
            },
        );
        reg
    }

    /// Registers (or replaces) the metadata for `id`.
    pub fn register(&mut self, id: String, info: ProductInfo) {
        self.products.insert(id, info);
    }

    /// Returns all registered product ids.
    pub fn list_ids(&self) -> Vec<String> {
        self.products.keys().cloned().collect()
    }
}

impl ProductLookup for ProductRegistry {
    fn lookup(&self, id: &str) -> Option<ProductInfo> {
        self.products.get(id).cloned()
    }
}
