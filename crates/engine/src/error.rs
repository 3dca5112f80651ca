use thiserror::Error;

pub type Result<T> = std::result::Result<T, EngineError>;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("catalog fetch failed: {0}")]
    UpstreamCatalog(#[source] anyhow::Error),

    #[error("catalog contains no templates")]
    EmptyCatalog,

    #[error("{0}")]
    TemplateNotFound(String),

    #[error("invalid request: {0}")]
    Validation(String),
}
