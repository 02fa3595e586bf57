use axum::Router;
use guestlist_shared::config::EventCatalog;
use guestlist_shared::store::dynamo::DynamoFamilyStore;
use guestlist_shared::store::memory::InMemoryFamilyStore;
use guestlist_shared::store::FamilyStore;
use guestlist_shared::test_utils::dynamo_test_utils::{
    clear_dynamo_table, create_dynamo_client, create_family_table, use_dynamodb,
};
use guestlist_shared::test_utils::test_logging::init_test_logging;
use log::{debug, error, info};
use std::sync::Arc;
use uuid::Uuid;

use crate::routes::create_router_with_store;


pub(crate) enum TestStore {
    Memory(Arc<InMemoryFamilyStore>),
    DynamoDB(Arc<DynamoFamilyStore>),
}

impl TestStore {
    pub(crate) fn store(&self) -> &dyn FamilyStore {
        match self {
            TestStore::Memory(store) => store.as_ref(),
            TestStore::DynamoDB(store) => store.as_ref(),
        }
    }
}

/// Router with an empty store and the default event catalog, mounted
/// without a prefix.
pub(crate) async fn create_test_app() -> (Router, TestStore) {
    create_test_app_with_events(EventCatalog::default()).await
}

pub(crate) async fn create_test_app_with_events(events: EventCatalog) -> (Router, TestStore) {
    init_test_logging();
    let events = Arc::new(events);

    if use_dynamodb() {
        // One table per test so parallel tests never see each other's rows
        let table_name = format!("families-test-{}", Uuid::new_v4());
        info!("Using DynamoDB table '{}' for guest tests", table_name);
        let client = create_dynamo_client().await;

        if let Err(e) = create_family_table(&client, &table_name).await {
            if !e.to_string().contains("ResourceInUseException") {
                error!("Error creating table: {}", e);
            }
        }
        if let Err(e) = clear_dynamo_table(&client, &table_name).await {
            error!("Failed to clear table: {}", e);
        }

        let store = Arc::new(DynamoFamilyStore::with_client_and_table(client, table_name));
        let app = create_router_with_store(store.clone(), events, "");
        (app, TestStore::DynamoDB(store))
    } else {
        debug!("Using in-memory store for guest tests");
        let store = Arc::new(InMemoryFamilyStore::new());
        let app = create_router_with_store(store.clone(), events, "");
        (app, TestStore::Memory(store))
    }
}
