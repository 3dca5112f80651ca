use std::sync::Arc;

use async_trait::async_trait;
use memecp_engine::{CatalogSource, Template};

use crate::error::{ProviderError, Result};
use crate::imgflip::ImgflipClient;
use crate::memegen::MemegenClient;

/// A meme provider: one catalog listing plus one render transport.
#[async_trait]
pub trait MemeProvider: Send + Sync {
    fn name(&self) -> &'static str;

    /// Full template list in the provider's order.
    async fn templates(&self) -> Result<Vec<Template>>;

    /// Render `top`/`bottom` captions onto `template` and return the
    /// finished image.
    async fn render(&self, template: &Template, top: &str, bottom: &str) -> Result<RenderedMeme>;

    /// Fetch an arbitrary provider-hosted image (blank or example).
    async fn fetch_image(&self, url: &str) -> Result<Vec<u8>>;
}

/// A rendered meme: the image bytes plus where they came from.
#[derive(Debug, Clone)]
pub struct RenderedMeme {
    pub image: Vec<u8>,
    pub mime_type: String,
    pub image_url: String,
    /// Human-viewable page, when the provider has one.
    pub page_url: Option<String>,
}

/// Adapter exposing a provider's template listing as the engine's
/// catalog source.
pub struct ProviderCatalog(pub Arc<dyn MemeProvider>);

#[async_trait]
impl CatalogSource for ProviderCatalog {
    async fn fetch(&self) -> anyhow::Result<Vec<Template>> {
        Ok(self.0.templates().await?)
    }
}

/// Select the provider from `MEMECP_PROVIDER` (default: imgflip).
pub fn provider_from_env() -> Result<Arc<dyn MemeProvider>> {
    let selected = std::env::var("MEMECP_PROVIDER").unwrap_or_default();
    match selected.trim().to_lowercase().as_str() {
        "" | "imgflip" => Ok(Arc::new(ImgflipClient::from_env()?)),
        "memegen" => Ok(Arc::new(MemegenClient::from_env()?)),
        other => Err(ProviderError::Config(format!(
            "unknown provider '{other}' (expected 'imgflip' or 'memegen')"
        ))),
    }
}

pub(crate) async fn fetch_bytes(client: &reqwest::Client, url: &str) -> Result<Vec<u8>> {
    log::debug!("GET {url}");
    let bytes = client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .bytes()
        .await?;
    Ok(bytes.to_vec())
}
