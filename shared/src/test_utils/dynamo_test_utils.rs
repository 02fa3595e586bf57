use aws_sdk_dynamodb::types::{
    AttributeDefinition, AttributeValue, BillingMode, KeySchemaElement, KeyType,
    ScalarAttributeType,
};
use aws_sdk_dynamodb::Client;
use log::debug;
use std::collections::HashMap;
use std::env;

use crate::store::dynamo::create_client;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

const DEFAULT_LOCAL_ENDPOINT: &str = "http://localhost:8000";

// Small pages so clearing a test table walks more than one scan page.
const CLEAR_PAGE_SIZE: i32 = 10;

/// Router tests run against DynamoDB instead of the in-memory store when
/// `USE_DYNAMODB=true`.
pub fn use_dynamodb() -> bool {
    env::var("USE_DYNAMODB")
        .map(|v| v.to_lowercase() == "true")
        .unwrap_or(false)
}

pub async fn create_dynamo_client() -> Client {
    let endpoint =
        env::var("DYNAMODB_ENDPOINT").unwrap_or_else(|_| DEFAULT_LOCAL_ENDPOINT.to_string());
    create_client(Some(&endpoint)).await
}

pub async fn create_family_table(client: &Client, table_name: &str) -> Result<(), BoxError> {
    client
        .create_table()
        .table_name(table_name)
        .key_schema(
            KeySchemaElement::builder()
                .attribute_name("id")
                .key_type(KeyType::Hash)
                .build()?,
        )
        .attribute_definitions(
            AttributeDefinition::builder()
                .attribute_name("id")
                .attribute_type(ScalarAttributeType::S)
                .build()?,
        )
        .billing_mode(BillingMode::PayPerRequest)
        .send()
        .await?;

    Ok(())
}

/// Deletes every item in the table, following scan pages until the last one.
pub async fn clear_dynamo_table(client: &Client, table_name: &str) -> Result<(), BoxError> {
    let mut start_key: Option<HashMap<String, AttributeValue>> = None;
    let mut deleted = 0usize;

    loop {
        let output = client
            .scan()
            .table_name(table_name)
            .limit(CLEAR_PAGE_SIZE)
            .set_exclusive_start_key(start_key.take())
            .send()
            .await?;

        for item in output.items.unwrap_or_default() {
            if let Some(id) = item.get("id") {
                let key = HashMap::from([("id".to_string(), id.clone())]);
                client
                    .delete_item()
                    .table_name(table_name)
                    .set_key(Some(key))
                    .send()
                    .await?;
                deleted += 1;
            }
        }

        match output.last_evaluated_key {
            Some(key) if !key.is_empty() => start_key = Some(key),
            _ => break,
        }
    }

    debug!("Cleared {} items from table '{}'", deleted, table_name);
    Ok(())
}
