// src/bin/api_server.rs

use anyhow::Context;
use std::sync::Arc;
use template_storefront::domain::catalog::{Catalog, ProductRegistry};
use template_storefront::infra::{logging, StorefrontSettings};
use template_storefront::storage::{JsonFileStore, KeyValueStore};
use template_storefront::transport;
use template_storefront::Storefront;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init();
    let settings = StorefrontSettings::from_env();

    // --- Catalog ---
    let catalog = Catalog::builtin();
    if let Err(errors) = catalog.validate() {
        for e in &errors {
            error!(error = %e, "Catalog: invalid product data");
        }
        anyhow::bail!("built-in catalog failed validation ({} problems)", errors.len());
    }
    let registry = Arc::new(ProductRegistry::storefront(&catalog));
    let catalog = Arc::new(catalog);
    info!(products = catalog.len(), "Catalog ready");

    // --- Durable storage + session ---
    let storage: Arc<dyn KeyValueStore> = Arc::new(JsonFileStore::open(&settings.state_file));
    let storefront = Storefront::open(catalog, registry, storage.clone(), &settings);
    info!(
        policy = ?settings.duplicate_policy,
        debounce_ms = settings.search_debounce.as_millis() as u64,
        "Storefront session ready"
    );

    let app_state = transport::http::AppState::new(storefront, storage, settings.search_debounce);

    // --- API Server Initialization ---
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);
    let app = transport::http::create_router(app_state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", transport::http::ApiDoc::openapi()))
        .layer(cors);
    let listener = tokio::net::TcpListener::bind(&settings.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", settings.bind_addr))?;
    info!(addr = %settings.bind_addr, "API server listening");
    info!("Swagger UI available at /swagger-ui");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!(error = %e, "Failed to listen for Ctrl+C");
            }
            info!("Shutdown signal received (Ctrl+C), stopping");
        })
        .await?;

    info!("Graceful shutdown complete");
    Ok(())
}
