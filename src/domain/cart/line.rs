use crate::domain::catalog::{ProductInfo, ProductKind};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One cart entry, keyed by product id.
///
/// Persisted as `{ id, title, price, image, type, quantity }`. Older landing
/// pages wrote `{ id, name, price, type }` with no quantity; those records are
/// still readable and come back with quantity 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(from = "StoredCartLine")]
pub struct CartLine {
    #[serde(rename = "id")]
    pub product_id: String,
    pub title: String,
    #[schema(value_type = f64)]
    pub price: Decimal,
    #[serde(rename = "image")]
    pub image_ref: String,
    #[serde(rename = "type")]
    pub kind: ProductKind,
    pub quantity: u32,
}

impl CartLine {
    /// Snapshots `info` as it is right now.
    pub fn new(product_id: impl Into<String>, info: ProductInfo, quantity: u32) -> Self {
        Self {
            product_id: product_id.into(),
            title: info.title,
            price: info.price,
            image_ref: info.image_ref,
            kind: info.kind,
            quantity,
        }
    }

    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// Every record shape that has ever been written under a cart key.
#[derive(Deserialize)]
struct StoredCartLine {
    id: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    name: Option<String>,
    price: Decimal,
    #[serde(default)]
    image: Option<String>,
    #[serde(default, rename = "type")]
    kind: Option<String>,
    #[serde(default)]
    quantity: Option<i64>,
}

impl From<StoredCartLine> for CartLine {
    fn from(raw: StoredCartLine) -> Self {
        let kind = match raw.kind.as_deref().map(str::to_ascii_uppercase).as_deref() {
            Some("FREE") => ProductKind::Free,
            Some("PREMIUM") => ProductKind::Premium,
            _ => ProductKind::for_price(raw.price),
        };
        // Zero or negative quantities are dropped when the cart is rebuilt.
        let quantity = raw
            .quantity
            .map(|q| q.clamp(0, i64::from(u32::MAX)) as u32)
            .unwrap_or(1);

        CartLine {
            product_id: raw.id,
            title: raw.title.or(raw.name).unwrap_or_default(),
            price: raw.price,
            image_ref: raw.image.unwrap_or_default(),
            kind,
            quantity,
        }
    }
}
