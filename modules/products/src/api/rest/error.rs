use modkit::api::problem::ProblemResponse;

use crate::domain::error::DomainError;
use crate::errors::{
    INTERNAL, NOT_FOUND_DETAIL, PRODUCTS_NOT_FOUND, PRODUCTS_VALIDATION, SERVER_ERROR_DETAIL,
};

/// Map domain error to RFC9457 ProblemResponse
pub fn map_domain_error(e: &DomainError, instance: &str) -> ProblemResponse {
    match e {
        DomainError::ProductNotFound { .. } => PRODUCTS_NOT_FOUND.respond(NOT_FOUND_DETAIL, instance),
        DomainError::MissingRequiredFields
        | DomainError::EmptyTitle
        | DomainError::InvalidPrice { .. }
        | DomainError::InvalidPageWindow { .. } => {
            PRODUCTS_VALIDATION.respond(e.to_string(), instance)
        }
        DomainError::Database { .. } => {
            // Log the internal error details but don't expose them to the client
            tracing::error!(error = ?e, "Database error occurred");
            INTERNAL.respond(SERVER_ERROR_DETAIL, instance)
        }
    }
}
