//! MCP tools for memecp
//!
//! Exposes meme composition to AI agents via the MCP protocol.

use std::sync::Arc;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use memecp_engine::{Template, TemplateCatalog, TemplateResolver};
use memecp_providers::{MemeProvider, ProviderCatalog};
use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo};
use rmcp::schemars;
use rmcp::{tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::{Deserialize, Serialize};

use crate::compose::ComposeOrchestrator;

/// Meme MCP Service
#[derive(Clone)]
pub struct MemeService {
    /// Process-lifetime catalog cache
    catalog: Arc<TemplateCatalog>,
    /// Upstream provider (imgflip or memegen)
    provider: Arc<dyn MemeProvider>,
    /// Tool router
    tool_router: ToolRouter<Self>,
}

impl MemeService {
    pub fn new(provider: Arc<dyn MemeProvider>) -> Self {
        let catalog = Arc::new(TemplateCatalog::new(ProviderCatalog(provider.clone())));
        Self {
            catalog,
            provider,
            tool_router: Self::tool_router(),
        }
    }
}

#[tool_handler]
impl ServerHandler for MemeService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some("memecp generates memes. Use 'compose_meme' to render a meme from free text (optionally naming a template), 'show_all_meme_templates' to browse the provider catalog, and 'show_meme' to preview a single template.".into()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            ..Default::default()
        }
    }
}

// ============================================================================
// Tool Input/Output Schemas
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ComposeMemeRequest {
    #[schemars(
        description = "The text content for the meme (will be split appropriately based on template)"
    )]
    pub text: String,

    #[schemars(
        description = "Optional: specific template name to use. If not provided, an appropriate template will be selected automatically"
    )]
    pub template: Option<String>,

    #[schemars(description = "Optional: specific text for the top of the meme")]
    pub top_text: Option<String>,

    #[schemars(description = "Optional: specific text for the bottom of the meme")]
    pub bottom_text: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ShowAllMemeTemplatesRequest {
    /// 1-based (default: 1)
    #[schemars(description = "The page number to show")]
    pub page: Option<usize>,

    /// Default: 50
    #[schemars(description = "The number of templates to show per page")]
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct TemplatePage {
    pub total: usize,
    pub page: usize,
    pub limit: usize,
    pub templates: Vec<Template>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ShowMemeRequest {
    #[schemars(description = "Name of the meme template to show")]
    pub name: String,
}

// ============================================================================
// Tool Implementations
// ============================================================================

#[tool_router]
impl MemeService {
    /// Compose a meme from free text
    #[tool(
        description = "Generate a meme by selecting an appropriate template and adding text"
    )]
    pub async fn compose_meme(
        &self,
        Parameters(request): Parameters<ComposeMemeRequest>,
    ) -> Result<CallToolResult, McpError> {
        let orchestrator = ComposeOrchestrator::new(self.catalog.clone(), self.provider.clone());
        let composed = match orchestrator
            .compose(
                &request.text,
                request.template.as_deref(),
                request.top_text.as_deref(),
                request.bottom_text.as_deref(),
            )
            .await
        {
            Ok(c) => c,
            Err(e) => {
                return Ok(CallToolResult::error(vec![Content::text(format!(
                    "Error: {e:#}"
                ))]));
            }
        };
        log::info!(
            "composed meme on template {} ({}) top='{}' bottom='{}'",
            composed.template_name,
            composed.template_id,
            composed.top_text,
            composed.bottom_text
        );

        Ok(CallToolResult::success(vec![
            Content::image(BASE64.encode(&composed.image), composed.mime_type.clone()),
            Content::text(composed.caption.clone()),
        ]))
    }

    /// List the provider catalog, paginated
    #[tool(description = "Show all available meme templates")]
    pub async fn show_all_meme_templates(
        &self,
        Parameters(request): Parameters<ShowAllMemeTemplatesRequest>,
    ) -> Result<CallToolResult, McpError> {
        let page = request.page.unwrap_or(1).max(1);
        let limit = request.limit.unwrap_or(50).clamp(1, 100);

        let templates = match self.catalog.get().await {
            Ok(t) => t,
            Err(e) => {
                return Ok(CallToolResult::error(vec![Content::text(format!(
                    "Error: {e}"
                ))]));
            }
        };

        let start = (page - 1).saturating_mul(limit);
        let result = TemplatePage {
            total: templates.len(),
            page,
            limit,
            templates: templates.iter().skip(start).take(limit).cloned().collect(),
        };

        Ok(CallToolResult::success(vec![Content::text(
            serde_json::to_string_pretty(&result).unwrap_or_default(),
        )]))
    }

    /// Preview a single template
    #[tool(description = "Show details for a specific meme template by name")]
    pub async fn show_meme(
        &self,
        Parameters(request): Parameters<ShowMemeRequest>,
    ) -> Result<CallToolResult, McpError> {
        let templates = match self.catalog.get().await {
            Ok(t) => t,
            Err(e) => {
                return Ok(CallToolResult::error(vec![Content::text(format!(
                    "Error: {e}"
                ))]));
            }
        };

        let resolver = TemplateResolver::new(templates);
        let template = match resolver.lookup(&request.name) {
            Ok(t) => t,
            Err(e) => {
                return Ok(CallToolResult::error(vec![Content::text(format!(
                    "Error: {e}"
                ))]));
            }
        };

        // Prefer the blank layout; fall back to the captioned example.
        let image_url = template
            .blank_url
            .as_deref()
            .or(template.example_url.as_deref());
        let Some(image_url) = image_url else {
            return Ok(CallToolResult::error(vec![Content::text(format!(
                "Error: template {} has no preview image",
                template.id
            ))]));
        };

        let image = match self.provider.fetch_image(image_url).await {
            Ok(bytes) => bytes,
            Err(e) => {
                return Ok(CallToolResult::error(vec![Content::text(format!(
                    "Error: failed to download image: {e}"
                ))]));
            }
        };

        Ok(CallToolResult::success(vec![
            Content::image(BASE64.encode(&image), "image/png"),
            Content::text(describe_template(template)),
        ]))
    }
}

fn describe_template(template: &Template) -> String {
    let mut description = format!("**{}** (ID: {})", template.name, template.id);
    if !template.keywords.is_empty() {
        description.push_str(&format!("\nKeywords: {}", template.keywords.join(", ")));
    }
    if !template.styles.is_empty() {
        description.push_str(&format!("\nStyles: {}", template.styles.join(", ")));
    }
    description
}
