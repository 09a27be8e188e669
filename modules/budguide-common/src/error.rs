use thiserror::Error;

#[derive(Error, Debug)]
pub enum BudGuideError {
    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("Knowledge base error: {0}")]
    Knowledge(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}
