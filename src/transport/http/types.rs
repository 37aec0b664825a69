use crate::app::{SearchDebouncer, Storefront};
use crate::domain::cart::{AddOutcome, CartView};
use crate::domain::catalog::{
    FilterChip, FilterPreferences, FilteredView, PageLinks, SortKey, ViewMode,
};
use crate::domain::preferences::WishlistToggle;
use crate::storage::KeyValueStore;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use utoipa::{IntoParams, ToSchema};

#[derive(Clone)]
pub struct AppState {
    pub storefront: Arc<Mutex<Storefront>>,
    pub search: Arc<SearchDebouncer>,
    pub storage: Arc<dyn KeyValueStore>,
}

impl AppState {
    pub fn new(
        storefront: Storefront,
        storage: Arc<dyn KeyValueStore>,
        search_debounce: Duration,
    ) -> Self {
        let storefront = Arc::new(Mutex::new(storefront));
        let search = Arc::new(SearchDebouncer::new(storefront.clone(), search_debounce));
        Self {
            storefront,
            search,
            storage,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct ApiResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Object)]
    pub data: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

// ---- requests ----

#[derive(Deserialize, Debug, ToSchema)]
pub struct SearchRequest {
    pub query: String,
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct PageRequest {
    pub page: usize,
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct ViewModeRequest {
    pub view_mode: ViewMode,
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct AddToCartRequest {
    pub product_id: String,
    /// Defaults to 1. Zero is read as 1.
    #[serde(default)]
    pub quantity: Option<u32>,
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct SetQuantityRequest {
    /// Zero or less removes the line.
    pub quantity: i64,
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct ExperimentRequest {
    pub variant: String,
}

#[derive(Deserialize, Debug, Default, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PriceQuery {
    /// ISO code such as `EUR`. Defaults to `USD`.
    #[serde(default)]
    pub currency: Option<String>,
}

// ---- responses ----

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct CatalogResponse {
    pub view: FilteredView,
    pub summary: String,
    pub active_filters: Vec<FilterChip>,
    pub page_links: PageLinks,
    pub filters: FilterPreferences,
    pub sort: SortKey,
    pub view_mode: ViewMode,
}

impl CatalogResponse {
    pub fn from_storefront(storefront: &Storefront) -> Self {
        let view = storefront.view().clone();
        Self {
            summary: view.summary(),
            active_filters: storefront.active_filters(),
            page_links: storefront.page_links(),
            filters: storefront.filters().to_preferences(),
            sort: storefront.filters().sort_key(),
            view_mode: storefront.filters().view_mode(),
            view,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct AddToCartResponse {
    pub outcome: AddOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub cart: CartView,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct SearchAccepted {
    pub query: String,
    pub debounce_ms: u64,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct PriceResponse {
    pub product_id: String,
    pub currency: String,
    #[schema(value_type = f64)]
    pub base_price: Decimal,
    #[schema(value_type = f64)]
    pub price: Decimal,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct ProductViewResponse {
    pub product_id: String,
    pub recently_viewed: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct WishlistResponse {
    pub outcome: WishlistToggle,
    pub wishlist: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct ExperimentResponse {
    pub experiment: String,
    pub variant: String,
}
