//! Business logic services

pub mod backend;
pub mod catalog;

use std::sync::Arc;

use crate::{config::AppConfig, error::AppResult};

use backend::{HttpBackend, LibraryBackend};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub catalog: catalog::CatalogService,
}

impl Services {
    /// Create all services talking to the configured HTTP backend
    pub fn new(config: &AppConfig) -> AppResult<Self> {
        let backend = HttpBackend::new(&config.backend)?;
        Ok(Self::with_backend(Arc::new(backend), config))
    }

    /// Create all services on top of an arbitrary backend implementation
    pub fn with_backend(backend: Arc<dyn LibraryBackend>, config: &AppConfig) -> Self {
        Self {
            catalog: catalog::CatalogService::new(backend, config.catalog.sort),
        }
    }
}
