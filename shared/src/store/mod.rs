use async_trait::async_trait;

use crate::error::Result;
use crate::models::Family;

pub mod dynamo;
pub mod memory;

/// Persistence for family records.
///
/// Implementations decide not-found themselves: `get_family`,
/// `replace_family` and `delete_family` return `StoreError::NotFound` for an
/// absent id and leave the store untouched.
#[async_trait]
pub trait FamilyStore: Send + Sync {
    /// Every stored family, in store order.
    async fn list_families(&self) -> Result<Vec<Family>>;

    async fn get_family(&self, id: &str) -> Result<Family>;

    async fn create_family(&self, family: Family) -> Result<Family>;

    /// Replaces an existing record wholesale.
    async fn replace_family(&self, family: Family) -> Result<Family>;

    async fn delete_family(&self, id: &str) -> Result<()>;
}
