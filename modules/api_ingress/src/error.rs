use axum::http::Uri;
use modkit::api::problem::ProblemResponse;

/// Fallback for paths no module claimed: a 404 problem naming the path.
pub async fn route_not_found(uri: Uri) -> ProblemResponse {
    tracing::debug!(path = %uri.path(), "no route matched");
    let problem = modkit::not_found(format!("No route for {}", uri.path()))
        .0
        .with_code("ROUTE_NOT_FOUND")
        .with_instance(uri.path());
    ProblemResponse(problem)
}
