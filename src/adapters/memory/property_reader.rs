//! In-memory property reader.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{ActorId, DomainError};
use crate::domain::workflow::PropertySnapshot;
use crate::ports::PropertyReader;

#[derive(Debug, Clone, Default)]
pub struct InMemoryPropertyReader {
    properties: Arc<RwLock<Vec<PropertySnapshot>>>,
}

impl InMemoryPropertyReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, property: PropertySnapshot) {
        let mut properties = self.properties.write().await;
        properties.retain(|p| p.id != property.id);
        properties.push(property);
    }
}

#[async_trait]
impl PropertyReader for InMemoryPropertyReader {
    async fn get_property(
        &self,
        owner_id: &ActorId,
        property_id: &str,
    ) -> Result<Option<PropertySnapshot>, DomainError> {
        Ok(self
            .properties
            .read()
            .await
            .iter()
            .find(|p| p.id == property_id && &p.owner_id == owner_id)
            .cloned())
    }

    async fn list_properties(&self, owner_id: &ActorId) -> Result<Vec<PropertySnapshot>, DomainError> {
        let mut owned: Vec<PropertySnapshot> = self
            .properties
            .read()
            .await
            .iter()
            .filter(|p| &p.owner_id == owner_id)
            .cloned()
            .collect();
        owned.sort_by(|a, b| a.address.cmp(&b.address));
        Ok(owned)
    }
}
