use crate::domain::cart::{AddOutcome, CartLine, CartView, CheckoutSummary};
use crate::domain::catalog::{
    Badge, Category, Difficulty, FilterChip, FilterKey, FilterPreferences, FilterUpdate,
    FilteredView, Format, PageLink, PageLinks, Product, ProductKind, SortKey, ViewMode,
};
use crate::domain::preferences::WishlistToggle;
use crate::transport::http::handlers::{cart, catalog, health, preferences, products};
use crate::transport::http::types::{
    AddToCartRequest, AddToCartResponse, ApiResponse, CatalogResponse, ExperimentRequest,
    ExperimentResponse, PageRequest, PriceResponse, ProductViewResponse, SearchAccepted,
    SearchRequest, SetQuantityRequest, ViewModeRequest, WishlistResponse,
};
use axum::routing::{delete, get, post, put};
use axum::Router;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthcheck_handler,
        catalog::get_catalog_handler,
        catalog::update_filters_handler,
        catalog::remove_filter_handler,
        catalog::clear_filters_handler,
        catalog::search_handler,
        catalog::change_page_handler,
        catalog::set_view_mode_handler,
        cart::get_cart_handler,
        cart::add_item_handler,
        cart::set_quantity_handler,
        cart::remove_item_handler,
        cart::checkout_handler,
        products::view_product_handler,
        products::product_price_handler,
        preferences::toggle_wishlist_handler,
        preferences::get_experiment_handler,
        preferences::set_experiment_handler
    ),
    components(schemas(
        ApiResponse,
        CatalogResponse,
        FilteredView,
        FilterChip,
        FilterKey,
        FilterPreferences,
        FilterUpdate,
        PageLink,
        PageLinks,
        Product,
        Category,
        Difficulty,
        Format,
        Badge,
        SortKey,
        ViewMode,
        SearchRequest,
        SearchAccepted,
        PageRequest,
        ViewModeRequest,
        AddToCartRequest,
        AddToCartResponse,
        AddOutcome,
        SetQuantityRequest,
        CartLine,
        CartView,
        CheckoutSummary,
        ProductKind,
        PriceResponse,
        ProductViewResponse,
        WishlistToggle,
        WishlistResponse,
        ExperimentRequest,
        ExperimentResponse
    ))
)]
pub struct ApiDoc;

pub fn create_router(app_state: crate::transport::http::types::AppState) -> Router {
    Router::new()
        .route("/health", get(health::healthcheck_handler))
        .route("/api/catalog", get(catalog::get_catalog_handler))
        .route("/api/catalog/filters", post(catalog::update_filters_handler))
        .route(
            "/api/catalog/filters/clear",
            post(catalog::clear_filters_handler),
        )
        .route(
            "/api/catalog/filters/:key",
            delete(catalog::remove_filter_handler),
        )
        .route("/api/catalog/search", post(catalog::search_handler))
        .route("/api/catalog/page", post(catalog::change_page_handler))
        .route("/api/catalog/view-mode", put(catalog::set_view_mode_handler))
        .route("/api/cart", get(cart::get_cart_handler))
        .route("/api/cart/items", post(cart::add_item_handler))
        .route(
            "/api/cart/items/:id",
            put(cart::set_quantity_handler).delete(cart::remove_item_handler),
        )
        .route("/api/cart/checkout", post(cart::checkout_handler))
        .route("/api/products/:id/view", post(products::view_product_handler))
        .route("/api/products/:id/price", get(products::product_price_handler))
        .route("/api/wishlist/:id", post(preferences::toggle_wishlist_handler))
        .route(
            "/api/experiments/:name",
            get(preferences::get_experiment_handler).put(preferences::set_experiment_handler),
        )
        .with_state(app_state)
}
