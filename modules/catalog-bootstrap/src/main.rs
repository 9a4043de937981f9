use std::net::SocketAddr;
use std::sync::Arc;

use axum::{routing::get, Json, Router};
use billing_api::BillingClient;
use catalog_bootstrap_rs::catalog;
use catalog_bootstrap_rs::config::{BusType, Config};
use catalog_bootstrap_rs::consumer_tasks::start_account_event_consumer;
use catalog_bootstrap_rs::listener::{CatalogBootstrapListener, UploadCredentials};
use ext_bus::{ExtBus, InMemoryBus, NatsBus};
use tower_http::cors::CorsLayer;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::from_env().expect("Invalid configuration");

    // Fail fast: a missing or malformed catalog document is a deployment
    // problem, not something to discover on the first account creation.
    let catalog_xml = catalog::load_catalog(config.catalog_path.as_deref())
        .expect("Catalog document must be readable and well-formed");

    let client =
        Arc::new(BillingClient::from_env().expect("Billing API client configuration"));

    let bus: Arc<dyn ExtBus> = match config.bus_type {
        BusType::Nats => {
            let nats = async_nats::connect(&config.nats_url)
                .await
                .expect("Failed to connect to NATS");
            Arc::new(NatsBus::new(nats))
        }
        BusType::InMemory => Arc::new(InMemoryBus::new()),
    };

    let listener = Arc::new(CatalogBootstrapListener::new(
        client.clone(),
        client.clone(),
        client,
        UploadCredentials {
            username: config.upload_username.clone(),
            password: config.upload_password.clone(),
        },
        catalog_xml,
    ));

    start_account_event_consumer(bus, listener).await;

    let app = Router::new().route("/api/health", get(health)).layer(
        CorsLayer::new()
            .allow_origin(tower_http::cors::Any)
            .allow_methods(tower_http::cors::Any)
            .allow_headers(tower_http::cors::Any),
    );

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .expect("HOST/PORT must form a valid socket address");
    tracing::info!("Catalog bootstrap module listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind");

    axum::serve(listener, app)
        .await
        .expect("Server failed to start");
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "module": "catalog-bootstrap",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
