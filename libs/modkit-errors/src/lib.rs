//! Static error catalog entries that render into RFC 9457 problems.
//!
//! Modules declare one `ErrDef` const per error kind they expose over HTTP and
//! build responses from it, so status, title, code and type URL never drift
//! between handlers.
use http::StatusCode;
use modkit::api::problem::{Problem, ProblemResponse};

/// Static error definition from catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrDef {
    pub status: u16,
    pub title: &'static str,
    pub code: &'static str,
    pub type_url: &'static str,
}

impl ErrDef {
    /// Convert this error definition into a Problem with the given detail
    #[inline]
    pub fn to_problem(&self, detail: impl Into<String>) -> Problem {
        Problem::new(
            StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            self.title,
            detail.into(),
        )
        .with_code(self.code)
        .with_type(self.type_url)
    }

    /// Problem response for one occurrence at `instance` (usually the request path).
    pub fn respond(&self, detail: impl Into<String>, instance: &str) -> ProblemResponse {
        ProblemResponse(self.to_problem(detail).with_instance(instance))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MISSING: ErrDef = ErrDef {
        status: 404,
        title: "Not Found",
        code: "TEST_NOT_FOUND",
        type_url: "https://errors.example.com/TEST_NOT_FOUND",
    };

    #[test]
    fn err_def_to_problem_works() {
        let problem = MISSING.to_problem("Resource missing");
        assert_eq!(problem.status, 404);
        assert_eq!(problem.title, "Not Found");
        assert_eq!(problem.detail, "Resource missing");
        assert_eq!(problem.code, "TEST_NOT_FOUND");
        assert_eq!(
            problem.type_url,
            "https://errors.example.com/TEST_NOT_FOUND"
        );
    }

    #[test]
    fn respond_sets_instance() {
        let resp = MISSING.respond("gone", "/api/products/42");
        assert_eq!(resp.0.instance, "/api/products/42");
        assert_eq!(resp.0.status, 404);
    }
}
