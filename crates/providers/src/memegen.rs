//! Memegen client.
//!
//! Catalog via `GET /templates`; rendering is a positional URL — the
//! captions travel as path segments escaped by the engine's caption
//! encoder, and fetching that URL returns the finished image directly.

use async_trait::async_trait;
use memecp_engine::{encode_caption, Template};
use serde::Deserialize;

use crate::error::Result;
use crate::provider::{fetch_bytes, MemeProvider, RenderedMeme};

const DEFAULT_BASE_URL: &str = "https://api.memegen.link";

pub struct MemegenClient {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct MemegenTemplate {
    id: String,
    name: String,
    #[serde(default)]
    lines: Option<u32>,
    #[serde(default)]
    styles: Vec<String>,
    #[serde(default)]
    blank: Option<String>,
    #[serde(default)]
    example: Option<MemegenExample>,
    #[serde(default)]
    keywords: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct MemegenExample {
    #[serde(default)]
    url: Option<String>,
}

impl MemegenTemplate {
    fn into_template(self) -> Template {
        Template {
            id: self.id,
            name: self.name,
            keywords: self.keywords,
            styles: self.styles,
            example_url: self.example.and_then(|e| e.url),
            blank_url: self.blank,
            box_count: self.lines,
        }
    }
}

/// A caption as a URL path segment; memegen renders an empty slot as `_`.
fn segment(text: &str) -> String {
    if text.trim().is_empty() {
        "_".to_string()
    } else {
        encode_caption(text)
    }
}

impl MemegenClient {
    pub fn new() -> Result<Self> {
        Ok(Self {
            client: reqwest::Client::builder().build()?,
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Base URL override from `MEMEGEN_BASE_URL`.
    pub fn from_env() -> Result<Self> {
        let mut client = Self::new()?;
        if let Ok(base_url) = std::env::var("MEMEGEN_BASE_URL") {
            client.base_url = base_url;
        }
        Ok(client)
    }

    fn render_url(&self, template_id: &str, top: &str, bottom: &str) -> String {
        format!(
            "{}/images/{}/{}/{}.png",
            self.base_url,
            template_id,
            segment(top),
            segment(bottom)
        )
    }
}

#[async_trait]
impl MemeProvider for MemegenClient {
    fn name(&self) -> &'static str {
        "memegen"
    }

    async fn templates(&self) -> Result<Vec<Template>> {
        let url = format!("{}/templates", self.base_url);
        log::debug!("GET {url}");
        let templates: Vec<MemegenTemplate> = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(templates
            .into_iter()
            .map(MemegenTemplate::into_template)
            .collect())
    }

    async fn render(&self, template: &Template, top: &str, bottom: &str) -> Result<RenderedMeme> {
        let url = self.render_url(&template.id, top, bottom);
        let image = fetch_bytes(&self.client, &url).await?;
        Ok(RenderedMeme {
            image,
            mime_type: "image/png".to_string(),
            image_url: url.clone(),
            page_url: Some(url),
        })
    }

    async fn fetch_image(&self, url: &str) -> Result<Vec<u8>> {
        fetch_bytes(&self.client, url).await
    }
}
