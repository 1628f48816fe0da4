use crate::core::parser;
use crate::domain::model::Catalog;
use crate::domain::ports::SourceLoader;
use crate::utils::error::{QuizError, Result};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Holds the active catalog. Readers always see a complete catalog, either
/// the one before a reload or the one after it.
#[derive(Debug, Clone, Default)]
pub struct CatalogStore {
    current: Arc<RwLock<Arc<Catalog>>>,
}

impl CatalogStore {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            current: Arc::new(RwLock::new(Arc::new(catalog))),
        }
    }

    pub async fn snapshot(&self) -> Arc<Catalog> {
        Arc::clone(&*self.current.read().await)
    }

    /// Swaps in `catalog` and returns the previous one.
    pub async fn replace(&self, catalog: Catalog) -> Arc<Catalog> {
        let mut guard = self.current.write().await;
        std::mem::replace(&mut *guard, Arc::new(catalog))
    }
}

/// Reads a source through a [`SourceLoader`] and turns it into a catalog.
pub struct CatalogLoader<S: SourceLoader> {
    source: S,
}

impl<S: SourceLoader> CatalogLoader<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Loads and parses `source_id`.
    ///
    /// Read and decode failures surface as `SourceRead` / `Decode`; a source
    /// that parses to zero points is `EmptyCatalog`.
    pub async fn load(&self, source_id: &str) -> Result<Catalog> {
        tracing::debug!("Loading catalog from {}", source_id);
        let bytes = self.source.load_raw_text(source_id).await?;
        let byte_count = bytes.len();
        let catalog = parser::parse_bytes(source_id, bytes)?;

        if catalog.is_empty() {
            tracing::warn!(
                "Catalog '{}' ({} bytes) has no usable rows; check the header and delimiter",
                source_id,
                byte_count
            );
            return Err(QuizError::EmptyCatalog {
                source_id: source_id.to_string(),
            });
        }

        for name in catalog.duplicate_names() {
            tracing::warn!(
                "Catalog '{}' lists '{}' more than once; the first entry wins ties",
                source_id,
                name
            );
        }

        let authored = catalog.iter().filter(|p| p.has_coordinate()).count();
        tracing::info!(
            "Loaded {} points ({} with coordinates) from {}",
            catalog.len(),
            authored,
            source_id
        );
        Ok(catalog)
    }

    /// Loads `source_id` and, on success, replaces the store's catalog.
    /// On failure the store keeps its current catalog.
    pub async fn reload_into(&self, store: &CatalogStore, source_id: &str) -> Result<Arc<Catalog>> {
        let catalog = self.load(source_id).await?;
        store.replace(catalog).await;
        Ok(store.snapshot().await)
    }
}
