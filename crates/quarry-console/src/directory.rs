//! Schema directory: the entity catalog and per-entity field listings.
//!
//! Entity types are fetched once and cached for the session. Field listings
//! are never cached: they are fetched fresh on each entity selection and
//! replaced wholesale, so stale field names never outlive their entity.

use crate::services::{with_deadline, RecordService};
use parking_lot::RwLock;
use quarry_core::{EntityType, FieldName, ServiceError};
use std::sync::Arc;
use std::time::Duration;

/// Loads and caches the queryable schema.
///
/// ## Thread Safety
///
/// Uses `parking_lot::RwLock` around the cache so all methods take `&self`.
/// A failed load leaves the cache empty; the next call retries.
pub struct SchemaDirectory {
    service: Arc<dyn RecordService>,
    timeout: Duration,
    cache: RwLock<Option<Vec<EntityType>>>,
}

impl SchemaDirectory {
    /// Create a directory over the given service.
    pub fn new(service: Arc<dyn RecordService>, timeout: Duration) -> Self {
        Self {
            service,
            timeout,
            cache: RwLock::new(None),
        }
    }

    /// Fetch the entity listing, or return the session cache.
    ///
    /// Only a successful listing is cached: after a failure the cache stays
    /// empty and a later call fetches again.
    pub async fn load_entities(&self) -> Result<Vec<EntityType>, ServiceError> {
        if let Some(cached) = self.cache.read().clone() {
            return Ok(cached);
        }

        let entities = with_deadline(self.timeout, self.service.list_entity_types()).await?;
        tracing::info!(count = entities.len(), "Loaded entity directory");
        *self.cache.write() = Some(entities.clone());
        Ok(entities)
    }

    /// Case-insensitive substring filter over the cached entity listing.
    ///
    /// Pure: never mutates the cache. An empty term returns the full
    /// listing; an unloaded cache filters to empty.
    pub fn filter(&self, term: &str) -> Vec<EntityType> {
        let cache = self.cache.read();
        let Some(entities) = cache.as_deref() else {
            return Vec::new();
        };

        if term.is_empty() {
            return entities.to_vec();
        }

        let needle = term.to_lowercase();
        entities
            .iter()
            .filter(|entity| entity.as_str().to_lowercase().contains(&needle))
            .cloned()
            .collect()
    }

    /// Whether the entity listing has been fetched this session.
    pub fn is_loaded(&self) -> bool {
        self.cache.read().is_some()
    }

    /// Fetch the field listing for one entity. Never cached.
    pub async fn load_fields(&self, entity: &EntityType) -> Result<Vec<FieldName>, ServiceError> {
        let fields =
            with_deadline(self.timeout, self.service.list_fields(entity.clone())).await?;
        tracing::debug!(entity = %entity, count = fields.len(), "Loaded field listing");
        Ok(fields)
    }
}

// =============================================================================
// Tests
// =============================================================================
