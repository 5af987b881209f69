use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    models::{CatalogError, Melon},
    repositories::CatalogRepository,
};

#[derive(Error, Debug)]
pub enum CatalogServiceError {
    #[error("Melon not found: {id}")]
    MelonNotFound { id: String },

    #[error("Repository error: {0}")]
    RepositoryError(#[from] CatalogError),
}

pub struct CatalogService {
    catalog_repository: Arc<dyn CatalogRepository>,
}

impl CatalogService {
    pub fn new(catalog_repository: Arc<dyn CatalogRepository>) -> Self {
        Self { catalog_repository }
    }

    /// Every melon, in catalog order
    pub async fn list_melons(&self) -> Result<Vec<Melon>, CatalogServiceError> {
        let melons = self.catalog_repository.find_all().await?;
        debug!("Listing {} melons", melons.len());
        Ok(melons)
    }

    pub async fn count_melons(&self) -> Result<usize, CatalogServiceError> {
        Ok(self.catalog_repository.count().await?)
    }

    pub async fn get_melon(&self, id: &str) -> Result<Melon, CatalogServiceError> {
        self.catalog_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| {
                warn!("Lookup for unknown melon id: {}", id);
                CatalogServiceError::MelonNotFound { id: id.to_string() }
            })
    }
}
