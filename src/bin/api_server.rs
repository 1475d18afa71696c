// src/bin/api_server.rs

use anyhow::Context;
use brand_catalog::infra::logging;
use brand_catalog::transport;
use brand_catalog::{initialize, AppConfig, CatalogService};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    logging::init();

    let config = AppConfig::from_env().context("Invalid configuration")?;

    // --- Store Initialization (connect, schema, seed) ---
    info!("Initializing catalog store...");
    let pool = initialize(&config).await?;
    let app_state = transport::http::AppState::new(CatalogService::new(pool));

    // --- API Server Initialization ---
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);
    let app = transport::http::create_router(app_state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", transport::http::ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Could not bind {}", config.bind_addr))?;
    info!("Server running on {}", listener.local_addr()?);
    info!("Swagger UI available at /swagger-ui");

    transport::http::serve_with_grace(
        listener,
        app,
        transport::http::shutdown_signal(),
        config.shutdown_grace,
    )
    .await
}
