mod error;
mod imgflip;
mod memegen;
mod provider;

pub use error::{ProviderError, Result};
pub use imgflip::ImgflipClient;
pub use memegen::MemegenClient;
pub use provider::{provider_from_env, MemeProvider, ProviderCatalog, RenderedMeme};
