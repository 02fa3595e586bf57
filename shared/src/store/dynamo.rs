use async_trait::async_trait;
use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;
use log::{debug, error, info};
use std::collections::HashMap;

use super::FamilyStore;
use crate::error::{Result, StoreError};
use crate::models::Family;

pub const DEFAULT_TABLE_NAME: &str = "wedding-families";

type Item = HashMap<String, AttributeValue>;

/// DynamoDB-backed family store. The table is keyed on the string
/// attribute `id`.
#[derive(Clone)]
pub struct DynamoFamilyStore {
    client: Client,
    table_name: String,
}

/// Builds a client from the default AWS config. `endpoint` overrides the
/// service URL, e.g. for DynamoDB Local.
pub async fn create_client(endpoint: Option<&str>) -> Client {
    let sdk_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    match endpoint {
        Some(url) => {
            info!("Using DynamoDB endpoint override: {}", url);
            let config = aws_sdk_dynamodb::config::Builder::from(&sdk_config)
                .endpoint_url(url)
                .build();
            Client::from_conf(config)
        }
        None => Client::new(&sdk_config),
    }
}

impl DynamoFamilyStore {
    pub fn with_client_and_table(client: Client, table_name: String) -> Self {
        info!("DynamoFamilyStore using table '{}'", table_name);
        Self { client, table_name }
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    fn key(id: &str) -> Item {
        HashMap::from([("id".to_string(), AttributeValue::S(id.to_string()))])
    }

    async fn put_conditional(&self, family: &Family, condition: &str) -> Result<()> {
        let item: Item = serde_dynamo::to_item(family)?;

        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .condition_expression(condition)
            .send()
            .await
            .map_err(|e| {
                if e.as_service_error()
                    .map(|se| se.is_conditional_check_failed_exception())
                    .unwrap_or(false)
                {
                    if condition.starts_with("attribute_not_exists") {
                        StoreError::AlreadyExists(format!("Family {} already exists", family.id))
                    } else {
                        StoreError::NotFound(format!("Family {} not found", family.id))
                    }
                } else {
                    error!("DynamoDB put_item failed: {}", DisplayErrorContext(&e));
                    StoreError::Unavailable(DisplayErrorContext(&e).to_string())
                }
            })?;

        Ok(())
    }
}

#[async_trait]
impl FamilyStore for DynamoFamilyStore {
    async fn list_families(&self) -> Result<Vec<Family>> {
        let mut families: Vec<Family> = Vec::new();
        let mut start_key: Option<Item> = None;

        loop {
            let output = self
                .client
                .scan()
                .table_name(&self.table_name)
                .set_exclusive_start_key(start_key.take())
                .send()
                .await
                .map_err(|e| {
                    error!("DynamoDB scan failed: {}", DisplayErrorContext(&e));
                    StoreError::Unavailable(DisplayErrorContext(&e).to_string())
                })?;

            if let Some(items) = output.items {
                let page: Vec<Family> = serde_dynamo::from_items(items)?;
                families.extend(page);
            }

            match output.last_evaluated_key {
                Some(key) if !key.is_empty() => start_key = Some(key),
                _ => break,
            }
        }

        debug!("Scanned {} families from '{}'", families.len(), self.table_name);
        Ok(families)
    }

    async fn get_family(&self, id: &str) -> Result<Family> {
        let output = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .set_key(Some(Self::key(id)))
            .send()
            .await
            .map_err(|e| {
                error!("DynamoDB get_item failed: {}", DisplayErrorContext(&e));
                StoreError::Unavailable(DisplayErrorContext(&e).to_string())
            })?;

        match output.item {
            Some(item) => Ok(serde_dynamo::from_item(item)?),
            None => Err(StoreError::NotFound(format!("Family {} not found", id))),
        }
    }

    async fn create_family(&self, family: Family) -> Result<Family> {
        self.put_conditional(&family, "attribute_not_exists(id)")
            .await?;
        Ok(family)
    }

    async fn replace_family(&self, family: Family) -> Result<Family> {
        self.put_conditional(&family, "attribute_exists(id)").await?;
        Ok(family)
    }

    async fn delete_family(&self, id: &str) -> Result<()> {
        self.client
            .delete_item()
            .table_name(&self.table_name)
            .set_key(Some(Self::key(id)))
            .condition_expression("attribute_exists(id)")
            .send()
            .await
            .map_err(|e| {
                if e.as_service_error()
                    .map(|se| se.is_conditional_check_failed_exception())
                    .unwrap_or(false)
                {
                    StoreError::NotFound(format!("Family {} not found", id))
                } else {
                    error!("DynamoDB delete_item failed: {}", DisplayErrorContext(&e));
                    StoreError::Unavailable(DisplayErrorContext(&e).to_string())
                }
            })?;

        Ok(())
    }
}
