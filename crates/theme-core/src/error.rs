use thiserror::Error;

#[derive(Error, Debug)]
pub enum ThemeError {
    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),

    #[error("Catalog parse error: {0}")]
    CatalogParse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}
