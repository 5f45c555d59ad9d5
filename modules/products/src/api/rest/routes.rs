use std::sync::Arc;

use axum::{routing::get, Extension, Router};

use crate::api::rest::handlers;
use crate::domain::service::Service;

/// Collection path of the products resource.
pub const BASE_PATH: &str = "/api/products";

pub fn register_routes(router: Router, service: Arc<Service>) -> anyhow::Result<Router> {
    let router = router
        // GET /api/products - list one page, POST /api/products - create
        .route(
            BASE_PATH,
            get(handlers::list_products).post(handlers::create_product),
        )
        // GET / PUT / DELETE /api/products/{id}
        .route(
            &format!("{BASE_PATH}/{{id}}"),
            get(handlers::get_product)
                .put(handlers::update_product)
                .delete(handlers::delete_product),
        )
        .layer(Extension(service));

    Ok(router)
}
