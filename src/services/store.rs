use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use thiserror::Error;

use crate::core::distance::{calculate_bounding_box, calculate_distance, is_within_bounding_box};
use crate::models::{Coordinates, ProviderLocation, ProviderUpdate};

/// Errors that can occur with provider store operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Provider not found: {0}")]
    NotFound(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Keyed collection of provider locations
///
/// Each call is atomic with respect to the others: a scan never observes a
/// half-applied register or update.
pub trait ProviderStore: Send + Sync {
    /// Insert a provider, replacing any record with the same id
    fn register(&self, provider: ProviderLocation) -> Result<(), StoreError>;

    /// Merge `update` into an existing provider and return the stored result
    fn update(&self, provider_id: &str, update: ProviderUpdate) -> Result<ProviderLocation, StoreError>;

    fn get(&self, provider_id: &str) -> Result<Option<ProviderLocation>, StoreError>;

    /// Point-in-time snapshot of every provider
    fn query_all(&self) -> Result<Vec<ProviderLocation>, StoreError>;

    /// Active providers within `radius_km` of `center`
    fn query_within_radius(
        &self,
        center: &Coordinates,
        radius_km: f64,
    ) -> Result<Vec<ProviderLocation>, StoreError> {
        let bbox = calculate_bounding_box(center, radius_km);

        Ok(self
            .query_all()?
            .into_iter()
            .filter(|provider| provider.is_active)
            .filter(|provider| is_within_bounding_box(provider.coordinates(), &bbox))
            .filter(|provider| calculate_distance(center, provider.coordinates()) <= radius_km)
            .collect())
    }
}

/// In-process provider store
#[derive(Debug, Default)]
pub struct InMemoryProviderStore {
    providers: RwLock<HashMap<String, ProviderLocation>>,
}

impl InMemoryProviderStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `providers`
    pub fn with_providers<I>(providers: I) -> Self
    where
        I: IntoIterator<Item = ProviderLocation>,
    {
        let providers = providers
            .into_iter()
            .map(|provider| (provider.provider_id.clone(), provider))
            .collect();

        Self {
            providers: RwLock::new(providers),
        }
    }

    /// Number of stored providers; fails if the lock was poisoned
    pub fn len(&self) -> Result<usize, StoreError> {
        Ok(self.read()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.read()?.is_empty())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<String, ProviderLocation>>, StoreError> {
        self.providers
            .read()
            .map_err(|e| StoreError::Unavailable(e.to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<String, ProviderLocation>>, StoreError> {
        self.providers
            .write()
            .map_err(|e| StoreError::Unavailable(e.to_string()))
    }
}

impl ProviderStore for InMemoryProviderStore {
    fn register(&self, provider: ProviderLocation) -> Result<(), StoreError> {
        let mut providers = self.write()?;
        providers.insert(provider.provider_id.clone(), provider);
        Ok(())
    }

    fn update(&self, provider_id: &str, update: ProviderUpdate) -> Result<ProviderLocation, StoreError> {
        let mut providers = self.write()?;
        let provider = providers
            .get_mut(provider_id)
            .ok_or_else(|| StoreError::NotFound(provider_id.to_string()))?;

        provider.apply(update);
        Ok(provider.clone())
    }

    fn get(&self, provider_id: &str) -> Result<Option<ProviderLocation>, StoreError> {
        Ok(self.read()?.get(provider_id).cloned())
    }

    fn query_all(&self) -> Result<Vec<ProviderLocation>, StoreError> {
        Ok(self.read()?.values().cloned().collect())
    }
}
