use crate::domain::cart::AddOutcome;
use crate::transport::http::handlers::common::{failure, invalid_body, ok, unknown_product};
use crate::transport::http::types::{
    AddToCartRequest, AddToCartResponse, AppState, SetQuantityRequest,
};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

#[utoipa::path(
    get,
    path = "/api/cart",
    responses(
        (status = 200, description = "Cart lines and totals", body = crate::transport::http::types::ApiResponse)
    )
)]
pub async fn get_cart_handler(State(state): State<AppState>) -> impl IntoResponse {
    let storefront = state.storefront.lock().await;
    ok(&storefront.cart_view())
}

/// Adds a product. With the reject-duplicate policy a second add answers 200
/// with `outcome = already_in_cart` and leaves the cart as it was.
#[utoipa::path(
    post,
    path = "/api/cart/items",
    request_body = AddToCartRequest,
    responses(
        (status = 200, description = "Add processed", body = crate::transport::http::types::ApiResponse),
        (status = 404, description = "Unknown product", body = crate::transport::http::types::ApiResponse),
        (status = 422, description = "Unprocessable entity (invalid JSON body)", body = crate::transport::http::types::ApiResponse)
    )
)]
pub async fn add_item_handler(
    State(state): State<AppState>,
    request: Result<Json<AddToCartRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(request) = match request {
        Ok(v) => v,
        Err(e) => return invalid_body(e, "{\"product_id\": \"...\", \"quantity\": 1}"),
    };
    let mut storefront = state.storefront.lock().await;
    let outcome = match request.quantity {
        Some(quantity) => storefront.add_to_cart_with_quantity(&request.product_id, quantity),
        None => storefront.add_to_cart(&request.product_id),
    };
    if outcome == AddOutcome::UnknownProduct {
        return unknown_product(&request.product_id);
    }
    ok(&AddToCartResponse {
        message: outcome.message(),
        outcome,
        cart: storefront.cart_view(),
    })
}

#[utoipa::path(
    put,
    path = "/api/cart/items/{id}",
    params(
        ("id" = String, Path, description = "Product id")
    ),
    request_body = SetQuantityRequest,
    responses(
        (status = 200, description = "Quantity set (ids not in the cart are ignored)", body = crate::transport::http::types::ApiResponse),
        (status = 422, description = "Unprocessable entity (invalid JSON body)", body = crate::transport::http::types::ApiResponse)
    )
)]
pub async fn set_quantity_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    request: Result<Json<SetQuantityRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(request) = match request {
        Ok(v) => v,
        Err(e) => return invalid_body(e, "{\"quantity\": 2}"),
    };
    let mut storefront = state.storefront.lock().await;
    storefront.set_cart_quantity(&id, request.quantity);
    ok(&storefront.cart_view())
}

#[utoipa::path(
    delete,
    path = "/api/cart/items/{id}",
    params(
        ("id" = String, Path, description = "Product id")
    ),
    responses(
        (status = 200, description = "Line removed (idempotent)", body = crate::transport::http::types::ApiResponse)
    )
)]
pub async fn remove_item_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let mut storefront = state.storefront.lock().await;
    storefront.remove_from_cart(&id);
    ok(&storefront.cart_view())
}

#[utoipa::path(
    post,
    path = "/api/cart/checkout",
    responses(
        (status = 200, description = "Order summary (no payment is taken)", body = crate::transport::http::types::ApiResponse),
        (status = 400, description = "Cart is empty", body = crate::transport::http::types::ApiResponse)
    )
)]
pub async fn checkout_handler(State(state): State<AppState>) -> impl IntoResponse {
    let storefront = state.storefront.lock().await;
    match storefront.checkout() {
        Ok(summary) => ok(&summary),
        Err(e) => failure(StatusCode::BAD_REQUEST, e.to_string()),
    }
}
