use crate::domain::cart::{AddOutcome, CartTotals};
use crate::domain::catalog::{FilterPreferences, SortKey, ViewMode};
use crate::domain::preferences::WishlistToggle;
use rust_decimal::Decimal;
use serde::Serialize;

/// Everything the session announces to observers (render layer, analytics sink).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum StorefrontEvent {
    FiltersApplied {
        filters: FilterPreferences,
        sort: SortKey,
        results_count: usize,
    },
    PageChanged {
        page: usize,
        total_pages: usize,
    },
    ViewModeChanged {
        view_mode: ViewMode,
    },
    AddToCart {
        product_id: String,
        outcome: AddOutcome,
    },
    CartChanged {
        totals: CartTotals,
    },
    ProductViewed {
        product_id: String,
    },
    WishlistChanged {
        product_id: String,
        outcome: WishlistToggle,
    },
    CheckoutStarted {
        item_count: u64,
        subtotal: Decimal,
    },
}

impl StorefrontEvent {
    /// Analytics-style event name.
    pub fn name(&self) -> &'static str {
        match self {
            StorefrontEvent::FiltersApplied { .. } => "filter_applied",
            StorefrontEvent::PageChanged { .. } => "page_changed",
            StorefrontEvent::ViewModeChanged { .. } => "view_mode_changed",
            StorefrontEvent::AddToCart { .. } => "add_to_cart",
            StorefrontEvent::CartChanged { .. } => "cart_changed",
            StorefrontEvent::ProductViewed { .. } => "view_item",
            StorefrontEvent::WishlistChanged { .. } => "wishlist_changed",
            StorefrontEvent::CheckoutStarted { .. } => "begin_checkout",
        }
    }
}
