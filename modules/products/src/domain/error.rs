use thiserror::Error;
use uuid::Uuid;

/// Domain-specific errors using thiserror
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Product not found: {id}")]
    ProductNotFound { id: Uuid },

    #[error("Title and price are required")]
    MissingRequiredFields,

    #[error("Title cannot be empty")]
    EmptyTitle,

    #[error("Price must be greater than 0 (got {price})")]
    InvalidPrice { price: f64 },

    #[error("Invalid {field}: must be a positive integer (got {value})")]
    InvalidPageWindow { field: &'static str, value: i64 },

    #[error("Database error: {message}")]
    Database { message: String },
}

impl DomainError {
    pub fn product_not_found(id: Uuid) -> Self {
        Self::ProductNotFound { id }
    }

    pub fn missing_required_fields() -> Self {
        Self::MissingRequiredFields
    }

    pub fn empty_title() -> Self {
        Self::EmptyTitle
    }

    pub fn invalid_price(price: f64) -> Self {
        Self::InvalidPrice { price }
    }

    pub fn invalid_page_window(field: &'static str, value: i64) -> Self {
        Self::InvalidPageWindow { field, value }
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }

    /// True for the variants the REST layer reports as 400.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::MissingRequiredFields
                | Self::EmptyTitle
                | Self::InvalidPrice { .. }
                | Self::InvalidPageWindow { .. }
        )
    }
}
