use products::contract::error::ProductsError;
use thiserror::Error;

/// Failures surfaced by the listing store
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    /// The form failed the pre-flight check; nothing was sent.
    #[error("{0}")]
    InvalidForm(String),

    #[error(transparent)]
    Api(#[from] ProductsError),
}

impl StoreError {
    /// Banner text for the failed operation.
    pub fn banner(&self, fallback: &str) -> String {
        match self {
            Self::InvalidForm(msg) => msg.clone(),
            Self::Api(ProductsError::Validation { message }) => message.clone(),
            Self::Api(ProductsError::NotFound { .. }) => "Product not found".to_owned(),
            Self::Api(_) => fallback.to_owned(),
        }
    }
}
