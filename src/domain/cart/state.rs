use crate::domain::cart::line::CartLine;
use crate::domain::catalog::ProductLookup;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;
use std::str::FromStr;
use utoipa::ToSchema;

/// What a second add of the same product does. Chosen by the page that owns the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Bump the existing line's quantity.
    #[default]
    Increment,
    /// Leave the cart alone and report `AlreadyInCart`.
    RejectDuplicate,
}

impl FromStr for DuplicatePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "increment" => Ok(DuplicatePolicy::Increment),
            "reject" | "reject_duplicate" | "reject-duplicate" => Ok(DuplicatePolicy::RejectDuplicate),
            other => Err(format!("unknown duplicate policy '{}'", other)),
        }
    }
}

/// Result of an add. Only `Added` and `Incremented` change the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum AddOutcome {
    Added { title: String, quantity: u32 },
    Incremented { title: String, quantity: u32 },
    AlreadyInCart { title: String },
    UnknownProduct,
}

impl AddOutcome {
    pub fn changed_cart(&self) -> bool {
        matches!(self, AddOutcome::Added { .. } | AddOutcome::Incremented { .. })
    }

    /// Notification text for the shopper, if there is anything to say.
    pub fn message(&self) -> Option<String> {
        match self {
            AddOutcome::Added { title, .. } | AddOutcome::Incremented { title, .. } => {
                Some(format!("{} added to cart!", title))
            }
            AddOutcome::AlreadyInCart { .. } => Some("Template already in cart!".to_string()),
            AddOutcome::UnknownProduct => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CartTotals {
    pub item_count: u64,
    #[schema(value_type = f64)]
    pub subtotal: Decimal,
}

/// The cart as a plain value: at most one line per product id, every quantity positive.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a cart from stored lines, dropping empty lines and folding
    /// duplicate ids into the first occurrence.
    pub fn from_lines(lines: Vec<CartLine>) -> Self {
        let mut cart = Cart::new();
        for line in lines.into_iter().filter(|l| l.quantity > 0) {
            match cart.line_mut(&line.product_id) {
                Some(existing) => {
                    existing.quantity = existing.quantity.saturating_add(line.quantity)
                }
                None => cart.lines.push(line),
            }
        }
        cart
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn contains(&self, product_id: &str) -> bool {
        self.line(product_id).is_some()
    }

    pub fn line(&self, product_id: &str) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.product_id == product_id)
    }

    fn line_mut(&mut self, product_id: &str) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|l| l.product_id == product_id)
    }

    pub fn add(
        &mut self,
        product_id: &str,
        lookup: &dyn ProductLookup,
        policy: DuplicatePolicy,
    ) -> AddOutcome {
        self.add_quantity(product_id, NonZeroU32::MIN, lookup, policy)
    }

    /// Adds `quantity` units. Unknown ids are refused without touching the cart.
    pub fn add_quantity(
        &mut self,
        product_id: &str,
        quantity: NonZeroU32,
        lookup: &dyn ProductLookup,
        policy: DuplicatePolicy,
    ) -> AddOutcome {
        if let Some(line) = self.line_mut(product_id) {
            return match policy {
                DuplicatePolicy::RejectDuplicate => AddOutcome::AlreadyInCart {
                    title: line.title.clone(),
                },
                DuplicatePolicy::Increment => {
                    line.quantity = line.quantity.saturating_add(quantity.get());
                    AddOutcome::Incremented {
                        title: line.title.clone(),
                        quantity: line.quantity,
                    }
                }
            };
        }

        let Some(info) = lookup.lookup(product_id) else {
            return AddOutcome::UnknownProduct;
        };
        let line = CartLine::new(product_id, info, quantity.get());
        let outcome = AddOutcome::Added {
            title: line.title.clone(),
            quantity: line.quantity,
        };
        self.lines.push(line);
        outcome
    }

    /// Returns true if a line was removed.
    pub fn remove(&mut self, product_id: &str) -> bool {
        let before = self.lines.len();
        self.lines.retain(|l| l.product_id != product_id);
        self.lines.len() != before
    }

    /// `quantity <= 0` removes the line. Absent ids are ignored.
    /// Returns true if the cart changed.
    pub fn set_quantity(&mut self, product_id: &str, quantity: i64) -> bool {
        if quantity <= 0 {
            return self.remove(product_id);
        }
        let quantity = quantity.min(i64::from(u32::MAX)) as u32;
        match self.line_mut(product_id) {
            Some(line) if line.quantity != quantity => {
                line.quantity = quantity;
                true
            }
            _ => false,
        }
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Recomputed on every call.
    pub fn totals(&self) -> CartTotals {
        CartTotals {
            item_count: self.lines.iter().map(|l| u64::from(l.quantity)).sum(),
            subtotal: self.lines.iter().map(CartLine::line_total).sum(),
        }
    }
}
