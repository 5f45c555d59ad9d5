//! HTTP host for the catalog: owns the middleware stack, the service-level
//! endpoints (`/health`, `/openapi.json`, `/docs`) and the listening socket.
//! Resource modules hand their routers and OpenAPI fragments to it.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use arc_swap::ArcSwap;
use axum::{middleware::from_fn, routing::get, Router};
use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;
use tower_http::{
    cors::CorsLayer,
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
};
use utoipa::openapi::{InfoBuilder, OpenApi, OpenApiBuilder};

mod config;
pub mod error;
pub mod request_id;
mod web;

pub use config::ApiIngressConfig;

/// Default handler timeout when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub struct ApiIngress {
    // Lock-free config using arc-swap for read-mostly access
    config: ArcSwap<ApiIngressConfig>,
    request_timeout: Duration,
    // OpenAPI fragments handed in by resource modules, merged on demand
    docs: Mutex<Vec<OpenApi>>,
}

impl Default for ApiIngress {
    fn default() -> Self {
        Self::new(ApiIngressConfig::default())
    }
}

impl ApiIngress {
    /// Create a new ApiIngress instance with the given configuration
    pub fn new(config: ApiIngressConfig) -> Self {
        Self {
            config: ArcSwap::from_pointee(config),
            request_timeout: DEFAULT_TIMEOUT,
            docs: Mutex::new(Vec::new()),
        }
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Get the current configuration (cheap clone from ArcSwap)
    pub fn get_config(&self) -> ApiIngressConfig {
        (**self.config.load()).clone()
    }

    /// Add one module's OpenAPI fragment to the served document.
    pub fn register_openapi(&self, doc: OpenApi) {
        let paths = doc.paths.paths.len();
        self.docs.lock().push(doc);
        tracing::debug!(paths, "Registered OpenAPI fragment");
    }

    /// Merge every registered fragment into one document.
    pub fn build_openapi(&self) -> OpenApi {
        let mut merged = OpenApiBuilder::new()
            .info(
                InfoBuilder::new()
                    .title("Catalog API")
                    .version(env!("CARGO_PKG_VERSION"))
                    .description(Some("Product catalog service"))
                    .build(),
            )
            .build();
        for doc in self.docs.lock().iter() {
            merged.merge(doc.clone());
        }
        tracing::info!(
            "Building OpenAPI: found {} registered paths",
            merged.paths.paths.len()
        );
        merged
    }

    /// Wrap the module routes with the service endpoints and the middleware stack.
    pub fn build_router(&self, routes: Router) -> Result<Router> {
        let config = self.get_config();
        let mut router = routes
            .route("/health", get(web::health_check))
            .fallback(error::route_not_found);

        if config.enable_docs {
            // Build once, serve as static JSON (no per-request work)
            let openapi_value = Arc::new(
                serde_json::to_value(self.build_openapi())
                    .context("failed to serialize OpenAPI document")?,
            );
            router = router
                .route(
                    "/openapi.json",
                    get({
                        use axum::{http::header, response::IntoResponse};
                        let v = openapi_value.clone();
                        move || async move {
                            let json = axum::Json((*v).clone());
                            ([(header::CACHE_CONTROL, "no-store")], json).into_response()
                        }
                    }),
                )
                .route("/docs", get(web::serve_docs));
        }

        // Layers wrap inside-out: the last one added sees the request first.
        // Request path: PropagateRequestId -> SetRequestId -> push_req_id_to_extensions
        // -> Trace -> Timeout -> CORS -> BodyLimit -> handler
        router = router.layer(RequestBodyLimitLayer::new(config.body_limit_bytes));

        if config.cors_enabled {
            router = router.layer(CorsLayer::permissive());
        }

        router = router.layer(TimeoutLayer::new(self.request_timeout));
        router = router.layer(request_id::create_trace_layer());
        router = router.layer(from_fn(request_id::push_req_id_to_extensions));

        let x_request_id = request_id::header();
        router = router.layer(SetRequestIdLayer::new(
            x_request_id.clone(),
            request_id::MakeReqId,
        ));
        router = router.layer(PropagateRequestIdLayer::new(x_request_id));

        Ok(router)
    }

    /// Bind `addr` and serve `router` until `cancel` fires, then drain gracefully.
    pub async fn serve(
        &self,
        router: Router,
        addr: SocketAddr,
        cancel: CancellationToken,
    ) -> Result<()> {
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .with_context(|| format!("failed to bind {addr}"))?;
        self.serve_on(listener, router, cancel).await
    }

    /// Serve on an already bound listener.
    pub async fn serve_on(
        &self,
        listener: tokio::net::TcpListener,
        router: Router,
        cancel: CancellationToken,
    ) -> Result<()> {
        tracing::info!("HTTP server bound on {}", listener.local_addr()?);

        let shutdown = async move {
            cancel.cancelled().await;
            tracing::info!("HTTP server shutting down gracefully (cancellation)");
        };

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| anyhow::anyhow!(e))
    }
}
