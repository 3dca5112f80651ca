//! The compose pipeline: resolve a template, place the captions, render.
//!
//! Kept free of protocol types so the whole flow is testable against an
//! in-memory provider.

use std::sync::Arc;

use anyhow::{Context, Result};
use memecp_engine::{split_caption, EngineError, TemplateCatalog, TemplateResolver};
use memecp_providers::MemeProvider;

/// Everything the tool layer needs to answer a compose request.
#[derive(Debug)]
pub struct ComposedMeme {
    pub image: Vec<u8>,
    pub mime_type: String,
    pub caption: String,
    pub template_id: String,
    pub template_name: String,
    pub top_text: String,
    pub bottom_text: String,
}

/// Sequences resolver, splitter, and render call over the shared catalog.
#[derive(Clone)]
pub struct ComposeOrchestrator {
    catalog: Arc<TemplateCatalog>,
    provider: Arc<dyn MemeProvider>,
}

impl ComposeOrchestrator {
    pub fn new(catalog: Arc<TemplateCatalog>, provider: Arc<dyn MemeProvider>) -> Self {
        Self { catalog, provider }
    }

    pub async fn compose(
        &self,
        text: &str,
        template_hint: Option<&str>,
        top_override: Option<&str>,
        bottom_override: Option<&str>,
    ) -> Result<ComposedMeme> {
        if text.trim().is_empty() {
            return Err(EngineError::Validation("text must not be empty".to_string()).into());
        }

        let templates = self.catalog.get().await?;
        let resolver = TemplateResolver::new(templates);
        let resolution = resolver.resolve(text, template_hint)?;
        let template = templates
            .iter()
            .find(|t| t.id == resolution.template_id)
            .ok_or_else(|| {
                EngineError::TemplateNotFound(format!(
                    "resolved template {} missing from catalog",
                    resolution.template_id
                ))
            })?;
        log::debug!(
            "composing on template {} ({:?})",
            template.id,
            resolution.tier
        );

        // Explicit captions win over the splitter.
        let (top, bottom) = if top_override.is_some() || bottom_override.is_some() {
            (
                top_override.unwrap_or_default().to_string(),
                bottom_override.unwrap_or_default().to_string(),
            )
        } else {
            let [top, bottom] = split_caption(text, &template.id);
            (top.text, bottom.text)
        };

        let rendered = self
            .provider
            .render(template, &top, &bottom)
            .await
            .with_context(|| format!("rendering template {}", template.id))?;

        let mut caption = format!(
            "Generated meme using {}\nTop text: \"{}\"\nBottom text: \"{}\"",
            template.name, top, bottom
        );
        if let Some(page_url) = &rendered.page_url {
            caption.push_str(&format!("\nPage URL: {page_url}"));
        }

        Ok(ComposedMeme {
            image: rendered.image,
            mime_type: rendered.mime_type,
            caption,
            template_id: template.id.clone(),
            template_name: template.name.clone(),
            top_text: top,
            bottom_text: bottom,
        })
    }
}
