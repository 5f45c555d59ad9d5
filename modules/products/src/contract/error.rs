use thiserror::Error;
use uuid::Uuid;

/// Errors that are safe to expose to consumers of the products contract
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProductsError {
    #[error("Product not found: {id}")]
    NotFound { id: Uuid },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Internal error")]
    Internal,

    #[error("Transport error: {message}")]
    Transport { message: String },
}

impl ProductsError {
    pub fn not_found(id: Uuid) -> Self {
        Self::NotFound { id }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn internal() -> Self {
        Self::Internal
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }
}

impl From<crate::domain::error::DomainError> for ProductsError {
    fn from(domain_error: crate::domain::error::DomainError) -> Self {
        use crate::domain::error::DomainError::*;
        match domain_error {
            ProductNotFound { id } => Self::not_found(id),
            MissingRequiredFields | EmptyTitle | InvalidPrice { .. } | InvalidPageWindow { .. } => {
                Self::validation(domain_error.to_string())
            }
            Database { .. } => Self::internal(),
        }
    }
}
