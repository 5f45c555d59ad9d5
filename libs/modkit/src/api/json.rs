//! JSON body extractor whose rejections render as RFC 9457 problems.

use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    http::StatusCode,
};
use serde::de::DeserializeOwned;

use crate::api::problem::{Problem, ProblemResponse};

/// Drop-in for `axum::Json` in handler arguments.
///
/// Malformed or mistyped bodies come back as `400 application/problem+json`
/// instead of axum's plain-text rejection.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProblemJson<T>(pub T);

impl<S, T> FromRequest<S> for ProblemJson<T>
where
    axum::Json<T>: FromRequest<S, Rejection = JsonRejection>,
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ProblemResponse;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let instance = req.uri().path().to_owned();
        match axum::Json::<T>::from_request(req, state).await {
            Ok(axum::Json(value)) => Ok(Self(value)),
            Err(rejection) => {
                tracing::debug!(error = %rejection, "rejected JSON body");
                Err(Problem::new(
                    StatusCode::BAD_REQUEST,
                    "Malformed request body",
                    rejection.body_text(),
                )
                .with_code("MALFORMED_BODY")
                .with_instance(instance)
                .into())
            }
        }
    }
}
