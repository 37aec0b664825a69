use crate::domain::catalog::vocabulary::{Badge, Category, Difficulty, Format};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;
use utoipa::ToSchema;

/// A purchasable template. Read-only once the catalog is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: Category,
    /// `0` means free.
    #[schema(value_type = f64)]
    pub price: Decimal,
    /// Former price shown struck through. Always greater than `price`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<f64>)]
    pub original_price: Option<Decimal>,
    pub rating: f64,
    pub downloads: u64,
    pub difficulty: Difficulty,
    pub formats: Vec<Format>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub icon: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badge: Option<Badge>,
    #[serde(default)]
    pub is_popular: bool,
    #[serde(default)]
    pub is_bundle: bool,
}

impl Product {
    pub fn is_free(&self) -> bool {
        self.price.is_zero()
    }

    pub fn has_format(&self, format: Format) -> bool {
        self.formats.contains(&format)
    }

    /// Whole percent saved against `original_price`, if there is one.
    pub fn discount_percent(&self) -> Option<u32> {
        let original = self.original_price?;
        if original <= self.price || original.is_zero() {
            return None;
        }
        let saved = (original - self.price) / original * Decimal::from(100);
        saved.round().to_u32()
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CatalogError {
    #[error("duplicate product id '{0}'")]
    DuplicateId(String),
    #[error("product '{id}' has original price {original} not above price {price}")]
    OriginalPriceNotAbovePrice {
        id: String,
        price: Decimal,
        original: Decimal,
    },
    #[error("product '{0}' has a negative price")]
    NegativePrice(String),
    #[error("product '{id}' has rating {rating} outside 0..=5")]
    RatingOutOfRange { id: String, rating: f64 },
    #[error("product '{0}' lists no formats")]
    NoFormats(String),
}

/// Ordered product list. Order matters: it is the tie-break order of every sort.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Checks every product invariant and returns all violations, not just the first.
    pub fn validate(&self) -> Result<(), Vec<CatalogError>> {
        let mut errors = Vec::new();
        let mut seen = HashSet::new();

        for p in &self.products {
            if !seen.insert(p.id.as_str()) {
                errors.push(CatalogError::DuplicateId(p.id.clone()));
            }
            if p.price.is_sign_negative() && !p.price.is_zero() {
                errors.push(CatalogError::NegativePrice(p.id.clone()));
            }
            if let Some(original) = p.original_price {
                if original <= p.price {
                    errors.push(CatalogError::OriginalPriceNotAbovePrice {
                        id: p.id.clone(),
                        price: p.price,
                        original,
                    });
                }
            }
            if !(0.0..=5.0).contains(&p.rating) {
                errors.push(CatalogError::RatingOutOfRange {
                    id: p.id.clone(),
                    rating: p.rating,
                });
            }
            if p.formats.is_empty() {
                errors.push(CatalogError::NoFormats(p.id.clone()));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
