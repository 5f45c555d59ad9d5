//! Building blocks for REST handlers.

pub mod json;
pub mod problem;
pub mod response;

pub use json::ProblemJson;
pub use problem::{Problem, ProblemResponse, APPLICATION_PROBLEM_JSON};
