use crate::domain::preferences::WishlistToggle;
use crate::transport::http::handlers::common::{invalid_body, ok, unknown_product};
use crate::transport::http::types::{
    AppState, ExperimentRequest, ExperimentResponse, WishlistResponse,
};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;

#[utoipa::path(
    post,
    path = "/api/wishlist/{id}",
    params(
        ("id" = String, Path, description = "Product id")
    ),
    responses(
        (status = 200, description = "Product added to or removed from the wishlist", body = crate::transport::http::types::ApiResponse),
        (status = 404, description = "Unknown product", body = crate::transport::http::types::ApiResponse)
    )
)]
pub async fn toggle_wishlist_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let mut storefront = state.storefront.lock().await;
    let outcome = storefront.toggle_wishlist(&id);
    if outcome == WishlistToggle::UnknownProduct {
        return unknown_product(&id);
    }
    ok(&WishlistResponse {
        outcome,
        wishlist: storefront.wishlist().to_vec(),
    })
}

#[utoipa::path(
    get,
    path = "/api/experiments/{name}",
    params(
        ("name" = String, Path, description = "Experiment name")
    ),
    responses(
        (status = 200, description = "Assigned variant (`control` if never assigned)", body = crate::transport::http::types::ApiResponse)
    )
)]
pub async fn get_experiment_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> impl IntoResponse {
    let storefront = state.storefront.lock().await;
    ok(&ExperimentResponse {
        variant: storefront.experiment_variant(&name),
        experiment: name,
    })
}

#[utoipa::path(
    put,
    path = "/api/experiments/{name}",
    params(
        ("name" = String, Path, description = "Experiment name")
    ),
    request_body = ExperimentRequest,
    responses(
        (status = 200, description = "Variant stored", body = crate::transport::http::types::ApiResponse),
        (status = 422, description = "Unprocessable entity (invalid JSON body)", body = crate::transport::http::types::ApiResponse)
    )
)]
pub async fn set_experiment_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
    request: Result<Json<ExperimentRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(request) = match request {
        Ok(v) => v,
        Err(e) => return invalid_body(e, "{\"variant\": \"...\"}"),
    };
    let mut storefront = state.storefront.lock().await;
    storefront.set_experiment_variant(&name, &request.variant);
    ok(&ExperimentResponse {
        variant: storefront.experiment_variant(&name),
        experiment: name,
    })
}
