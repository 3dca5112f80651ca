use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProviderError>;

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("catalog fetch failed: {0}")]
    Catalog(String),

    #[error("render failed: {0}")]
    Render(String),

    #[error("provider configuration error: {0}")]
    Config(String),
}
