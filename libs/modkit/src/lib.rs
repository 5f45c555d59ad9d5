//! # ModKit - shared HTTP plumbing
//!
//! Pieces every catalog module needs at its HTTP edges:
//!
//! - **Problem Details**: RFC 9457 error bodies (`Problem`, `ProblemResponse`)
//! - **Responses**: small JSON response helpers and a JSON extractor whose
//!   rejections render as problems
//! - **Outgoing HTTP**: a `reqwest` wrapper that opens a span per request and
//!   forwards the caller's request id

pub use anyhow::Result;

pub mod api;
pub mod http;

pub use api::problem::{
    bad_request, conflict, internal_error, not_found, Problem, ProblemResponse, ValidationError,
};
pub use http::client::TracedClient;
