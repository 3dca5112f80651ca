//! memecp MCP Server
//!
//! Composes memes from free-form captions via the MCP protocol.
//!
//! ## Tools
//!
//! - `compose_meme` - Render a meme from free text, optionally naming a template
//! - `show_all_meme_templates` - Browse the provider's template catalog
//! - `show_meme` - Preview a single template by name, id, or keyword
//!
//! ## Usage
//!
//! Add to your MCP client configuration:
//! ```json
//! {
//!   "mcpServers": {
//!     "memecp": {
//!       "command": "memecp"
//!     }
//!   }
//! }
//! ```
//!
//! Provider selection via `MEMECP_PROVIDER` (`imgflip` default, or
//! `memegen`); Imgflip credentials via `IMGFLIP_USERNAME`/`IMGFLIP_PASSWORD`.

use anyhow::Result;
use rmcp::transport::stdio;
use rmcp::ServiceExt;

mod compose;
mod tools;

use tools::MemeService;

#[tokio::main]
async fn main() -> Result<()> {
    // Configure logging to stderr only (stdout is for MCP protocol)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Stderr)
        .init();

    let provider = memecp_providers::provider_from_env()?;
    log::info!("Starting memecp MCP server ({} provider)", provider.name());

    let service = MemeService::new(provider);
    let server = service.serve(stdio()).await?;

    // Wait for shutdown
    server.waiting().await?;

    log::info!("memecp MCP server stopped");
    Ok(())
}
