use anyhow::{Context, Result};
use guestlist_shared::store::dynamo::{create_client, DynamoFamilyStore};
use guestlist_shared::store::memory::InMemoryFamilyStore;
use log::info;
use std::sync::Arc;

mod config;
mod error;
mod handlers;
mod models;
mod routes;

#[cfg(test)]
mod tests;

use config::{ServiceConfig, StoreBackend};
use routes::create_router_with_store;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize env_logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("Starting Guest Service");

    let config = ServiceConfig::from_env().context("failed to load service configuration")?;
    let events = Arc::new(config.events.clone());
    info!(
        "Event catalog: {}",
        events
            .events()
            .iter()
            .map(|e| e.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );

    let app = match config.store_backend {
        StoreBackend::DynamoDb => {
            info!("Creating router with DynamoDB store");
            let client = create_client(config.dynamodb_endpoint.as_deref()).await;
            let store = Arc::new(DynamoFamilyStore::with_client_and_table(
                client,
                config.table_name.clone(),
            ));
            create_router_with_store(store, events, &config.prefix)
        }
        StoreBackend::Memory => {
            info!("Creating router with in-memory store");
            let store = Arc::new(InMemoryFamilyStore::new());
            create_router_with_store(store, events, &config.prefix)
        }
    };

    // Inside Lambda the runtime API variable is always set
    if std::env::var("AWS_LAMBDA_RUNTIME_API").is_ok() {
        info!("Running under AWS Lambda");
        lambda_http::run(app)
            .await
            .map_err(|e| anyhow::anyhow!("lambda runtime error: {}", e))?;
        return Ok(());
    }

    let addr = config.address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind to {}", addr))?;
    info!("Server is running on {}", addr);

    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}
