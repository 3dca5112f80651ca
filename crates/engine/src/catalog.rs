use async_trait::async_trait;
use tokio::sync::OnceCell;

use crate::error::{EngineError, Result};
use crate::template::Template;

/// External fetch collaborator: one call returns the provider's full
/// template list, in the order the provider serves it.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch(&self) -> anyhow::Result<Vec<Template>>;
}

/// Process-lifetime cache of the provider catalog.
///
/// Populated lazily on first access. Concurrent first callers await one
/// shared in-flight fetch; a failed fetch leaves the cell empty so a later
/// call can retry. The catalog is never refreshed afterwards — templates
/// rarely change, and staleness is an accepted trade-off.
pub struct TemplateCatalog {
    source: Box<dyn CatalogSource>,
    cell: OnceCell<Vec<Template>>,
}

impl TemplateCatalog {
    pub fn new(source: impl CatalogSource + 'static) -> Self {
        Self {
            source: Box::new(source),
            cell: OnceCell::new(),
        }
    }

    /// Returns the cached catalog, fetching it on first use.
    pub async fn get(&self) -> Result<&[Template]> {
        let templates = self
            .cell
            .get_or_try_init(|| async {
                let templates = self
                    .source
                    .fetch()
                    .await
                    .map_err(EngineError::UpstreamCatalog)?;
                log::info!("catalog populated with {} templates", templates.len());
                Ok(templates)
            })
            .await?;
        Ok(templates.as_slice())
    }
}
