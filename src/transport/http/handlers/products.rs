use crate::domain::catalog::ProductLookup;
use crate::domain::pricing;
use crate::transport::http::handlers::common::{ok, unknown_product};
use crate::transport::http::types::{AppState, PriceQuery, PriceResponse, ProductViewResponse};
use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use rust_decimal::Decimal;

#[utoipa::path(
    post,
    path = "/api/products/{id}/view",
    params(
        ("id" = String, Path, description = "Product id")
    ),
    responses(
        (status = 200, description = "View recorded", body = crate::transport::http::types::ApiResponse),
        (status = 404, description = "Unknown product", body = crate::transport::http::types::ApiResponse)
    )
)]
pub async fn view_product_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let mut storefront = state.storefront.lock().await;
    if !storefront.view_product(&id) {
        return unknown_product(&id);
    }
    ok(&ProductViewResponse {
        product_id: id,
        recently_viewed: storefront.recently_viewed().to_vec(),
    })
}

#[utoipa::path(
    get,
    path = "/api/products/{id}/price",
    params(
        ("id" = String, Path, description = "Product id"),
        PriceQuery
    ),
    responses(
        (status = 200, description = "Price in the requested currency", body = crate::transport::http::types::ApiResponse),
        (status = 404, description = "Unknown product", body = crate::transport::http::types::ApiResponse)
    )
)]
pub async fn product_price_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<PriceQuery>,
) -> impl IntoResponse {
    let storefront = state.storefront.lock().await;
    let Some(info) = storefront.registry().lookup(&id) else {
        return unknown_product(&id);
    };
    let currency = query
        .currency
        .map(|c| c.trim().to_ascii_uppercase())
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| "USD".to_string());
    ok(&PriceResponse {
        price: pricing::convert(info.price, &currency, Decimal::ONE),
        base_price: info.price,
        currency,
        product_id: id,
    })
}
