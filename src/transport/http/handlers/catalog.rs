use crate::domain::catalog::{FilterKey, FilterUpdate};
use crate::transport::http::handlers::common::{failure, invalid_body, ok, success};
use crate::transport::http::types::{
    AppState, CatalogResponse, PageRequest, SearchAccepted, SearchRequest, ViewModeRequest,
};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

#[utoipa::path(
    get,
    path = "/api/catalog",
    responses(
        (status = 200, description = "Current page, chips and pagination", body = crate::transport::http::types::ApiResponse)
    )
)]
pub async fn get_catalog_handler(State(state): State<AppState>) -> impl IntoResponse {
    let storefront = state.storefront.lock().await;
    ok(&CatalogResponse::from_storefront(&storefront))
}

#[utoipa::path(
    post,
    path = "/api/catalog/filters",
    request_body = FilterUpdate,
    responses(
        (status = 200, description = "Filters applied, back on page 1", body = crate::transport::http::types::ApiResponse),
        (status = 422, description = "Unprocessable entity (invalid JSON body)", body = crate::transport::http::types::ApiResponse)
    )
)]
pub async fn update_filters_handler(
    State(state): State<AppState>,
    request: Result<Json<FilterUpdate>, JsonRejection>,
) -> impl IntoResponse {
    let Json(update) = match request {
        Ok(v) => v,
        Err(e) => {
            return invalid_body(e, "{\"category\": \"budget\", \"sort\": \"price-low\", ...}")
        }
    };
    let mut storefront = state.storefront.lock().await;
    storefront.update_filters(&update);
    ok(&CatalogResponse::from_storefront(&storefront))
}

#[utoipa::path(
    delete,
    path = "/api/catalog/filters/{key}",
    params(
        ("key" = String, Path, description = "category | price | format | difficulty | search")
    ),
    responses(
        (status = 200, description = "Filter removed", body = crate::transport::http::types::ApiResponse),
        (status = 400, description = "Unknown filter key", body = crate::transport::http::types::ApiResponse)
    )
)]
pub async fn remove_filter_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> impl IntoResponse {
    let key: FilterKey = match key.parse() {
        Ok(k) => k,
        Err(e) => return failure(StatusCode::BAD_REQUEST, e.to_string()),
    };
    let mut storefront = state.storefront.lock().await;
    storefront.remove_filter(key);
    ok(&CatalogResponse::from_storefront(&storefront))
}

#[utoipa::path(
    post,
    path = "/api/catalog/filters/clear",
    responses(
        (status = 200, description = "All filters cleared", body = crate::transport::http::types::ApiResponse)
    )
)]
pub async fn clear_filters_handler(State(state): State<AppState>) -> impl IntoResponse {
    let mut storefront = state.storefront.lock().await;
    storefront.clear_filters();
    ok(&CatalogResponse::from_storefront(&storefront))
}

/// Search-as-you-type. Only the last query of a burst is applied, once the
/// debounce window has passed; poll `GET /api/catalog` for the result.
#[utoipa::path(
    post,
    path = "/api/catalog/search",
    request_body = SearchRequest,
    responses(
        (status = 202, description = "Search scheduled", body = crate::transport::http::types::ApiResponse),
        (status = 422, description = "Unprocessable entity (invalid JSON body)", body = crate::transport::http::types::ApiResponse)
    )
)]
pub async fn search_handler(
    State(state): State<AppState>,
    request: Result<Json<SearchRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(request) = match request {
        Ok(v) => v,
        Err(e) => return invalid_body(e, "{\"query\": \"...\"}"),
    };
    let accepted = SearchAccepted {
        query: request.query.clone(),
        debounce_ms: state.search.window().as_millis() as u64,
    };
    state.search.submit(request.query);
    success(StatusCode::ACCEPTED, &accepted)
}

#[utoipa::path(
    post,
    path = "/api/catalog/page",
    request_body = PageRequest,
    responses(
        (status = 200, description = "Page changed", body = crate::transport::http::types::ApiResponse),
        (status = 400, description = "Page out of range (state unchanged)", body = crate::transport::http::types::ApiResponse),
        (status = 422, description = "Unprocessable entity (invalid JSON body)", body = crate::transport::http::types::ApiResponse)
    )
)]
pub async fn change_page_handler(
    State(state): State<AppState>,
    request: Result<Json<PageRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(request) = match request {
        Ok(v) => v,
        Err(e) => return invalid_body(e, "{\"page\": 2}"),
    };
    let mut storefront = state.storefront.lock().await;
    if let Err(e) = storefront.change_page(request.page) {
        return failure(StatusCode::BAD_REQUEST, e.to_string());
    }
    ok(&CatalogResponse::from_storefront(&storefront))
}

#[utoipa::path(
    put,
    path = "/api/catalog/view-mode",
    request_body = ViewModeRequest,
    responses(
        (status = 200, description = "View mode stored", body = crate::transport::http::types::ApiResponse),
        (status = 422, description = "Unprocessable entity (invalid JSON body)", body = crate::transport::http::types::ApiResponse)
    )
)]
pub async fn set_view_mode_handler(
    State(state): State<AppState>,
    request: Result<Json<ViewModeRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(request) = match request {
        Ok(v) => v,
        Err(e) => return invalid_body(e, "{\"view_mode\": \"grid\" | \"list\"}"),
    };
    let mut storefront = state.storefront.lock().await;
    storefront.set_view_mode(request.view_mode);
    ok(&CatalogResponse::from_storefront(&storefront))
}
