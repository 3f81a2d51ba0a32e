use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::countries::models::{Country, CountryFilters, CountrySort, CountryStatus};
use crate::features::countries::services::CountryStore;

/// Read and delete operations over persisted countries
pub struct CountryService {
    store: Arc<dyn CountryStore>,
}

impl CountryService {
    pub fn new(store: Arc<dyn CountryStore>) -> Self {
        Self { store }
    }

    pub async fn list(
        &self,
        filters: &CountryFilters,
        sort: Option<CountrySort>,
    ) -> Result<Vec<Country>> {
        self.store.get_all(filters, sort).await
    }

    /// Case-insensitive lookup
    pub async fn get_by_name(&self, name: &str) -> Result<Country> {
        self.store
            .get_by_name(name)
            .await?
            .ok_or_else(|| AppError::NotFound("Country not found".to_string()))
    }

    pub async fn delete_by_name(&self, name: &str) -> Result<()> {
        let removed = self.store.delete_by_name(name).await?;

        if removed == 0 {
            return Err(AppError::NotFound("Country not found".to_string()));
        }

        tracing::info!("Deleted country {}", name);
        Ok(())
    }

    pub async fn status(&self) -> Result<CountryStatus> {
        self.store.status().await
    }
}
