use async_trait::async_trait;
use log::debug;
use tokio::sync::RwLock;

use super::FamilyStore;
use crate::error::{Result, StoreError};
use crate::models::Family;

/// Process-local store used for local runs and router tests.
///
/// Records are kept in insertion order so listings are deterministic.
#[derive(Default)]
pub struct InMemoryFamilyStore {
    families: RwLock<Vec<Family>>,
}

impl InMemoryFamilyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_families(families: Vec<Family>) -> Self {
        Self {
            families: RwLock::new(families),
        }
    }

    pub async fn len(&self) -> usize {
        self.families.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.families.read().await.is_empty()
    }
}

fn not_found(id: &str) -> StoreError {
    StoreError::NotFound(format!("Family {} not found", id))
}

#[async_trait]
impl FamilyStore for InMemoryFamilyStore {
    async fn list_families(&self) -> Result<Vec<Family>> {
        Ok(self.families.read().await.clone())
    }

    async fn get_family(&self, id: &str) -> Result<Family> {
        self.families
            .read()
            .await
            .iter()
            .find(|f| f.id == id)
            .cloned()
            .ok_or_else(|| not_found(id))
    }

    async fn create_family(&self, family: Family) -> Result<Family> {
        let mut families = self.families.write().await;
        if families.iter().any(|f| f.id == family.id) {
            return Err(StoreError::AlreadyExists(format!(
                "Family {} already exists",
                family.id
            )));
        }
        debug!("Storing family {}", family.id);
        families.push(family.clone());
        Ok(family)
    }

    async fn replace_family(&self, family: Family) -> Result<Family> {
        let mut families = self.families.write().await;
        let slot = families
            .iter_mut()
            .find(|f| f.id == family.id)
            .ok_or_else(|| not_found(&family.id))?;
        *slot = family.clone();
        Ok(family)
    }

    async fn delete_family(&self, id: &str) -> Result<()> {
        let mut families = self.families.write().await;
        let index = families
            .iter()
            .position(|f| f.id == id)
            .ok_or_else(|| not_found(id))?;
        families.remove(index);
        Ok(())
    }
}
