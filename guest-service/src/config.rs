use anyhow::{bail, Context, Result};
use guestlist_shared::config::EventCatalog;
use guestlist_shared::store::dynamo::DEFAULT_TABLE_NAME;
use std::env;

const DEFAULT_PORT: u16 = 5001;
const DEFAULT_PREFIX: &str = "/api";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Memory,
    DynamoDb,
}

impl StoreBackend {
    fn parse(raw: &str) -> Result<Self> {
        match raw.to_lowercase().as_str() {
            "memory" | "inmemory" => Ok(StoreBackend::Memory),
            "dynamodb" | "dynamo" => Ok(StoreBackend::DynamoDb),
            other => bail!("STORE_BACKEND must be 'memory' or 'dynamodb', got '{}'", other),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub host: String,
    pub port: u16,
    pub prefix: String,
    pub store_backend: StoreBackend,
    pub table_name: String,
    pub dynamodb_endpoint: Option<String>,
    pub events: EventCatalog,
}

impl ServiceConfig {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = match env::var("PORT") {
            Ok(raw) => raw.parse::<u16>().context("PORT must be a valid u16")?,
            Err(_) => DEFAULT_PORT,
        };

        // REMOVE_BASE_PATH=true serves routes at the root (API Gateway strips the stage)
        let remove_base_path = env::var("REMOVE_BASE_PATH")
            .map(|v| v.to_lowercase() == "true")
            .unwrap_or(false);
        let prefix = if remove_base_path {
            String::new()
        } else {
            normalize_prefix(&env::var("API_PREFIX").unwrap_or_else(|_| DEFAULT_PREFIX.into()))
        };

        let store_backend =
            StoreBackend::parse(&env::var("STORE_BACKEND").unwrap_or_else(|_| "memory".into()))?;
        let table_name =
            env::var("FAMILIES_TABLE").unwrap_or_else(|_| DEFAULT_TABLE_NAME.to_string());
        let dynamodb_endpoint = env::var("DYNAMODB_ENDPOINT").ok();
        let events = EventCatalog::from_env().context("invalid event configuration")?;

        Ok(Self {
            host,
            port,
            prefix,
            store_backend,
            table_name,
            dynamodb_endpoint,
            events,
        })
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Ensures a leading slash and no trailing slash; "/" and "" mean no prefix.
fn normalize_prefix(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    }
}
