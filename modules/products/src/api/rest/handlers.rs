use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    http::{StatusCode, Uri},
    response::Json,
    Extension,
};
use modkit::api::{
    json::ProblemJson,
    problem::ProblemResponse,
    response::{message_json, MessageBody},
};
use tracing::{error, info};
use uuid::Uuid;

use crate::api::rest::dto::{
    CreateProductReq, ListProductsQuery, ProductDto, ProductListDto, UpdateProductReq,
};
use crate::api::rest::error::map_domain_error;
use crate::contract::model::PageRequest;
use crate::domain::pagination::parse_or_default;
use crate::domain::service::Service;
use crate::errors::{NOT_FOUND_DETAIL, PRODUCTS_NOT_FOUND};

/// Message returned by a successful delete.
pub const DELETED_MESSAGE: &str = "Product deleted successfully";

/// List products, one page at a time
#[utoipa::path(
    get,
    path = "/api/products",
    tag = "products",
    operation_id = "products.list_products",
    params(ListProductsQuery),
    responses(
        (status = 200, description = "Page of products", body = ProductListDto),
        (status = 400, description = "Bad Request", body = modkit::Problem, content_type = "application/problem+json"),
        (status = 500, description = "Internal Server Error", body = modkit::Problem, content_type = "application/problem+json"),
    )
)]
pub async fn list_products(
    Extension(svc): Extension<Arc<Service>>,
    Query(query): Query<ListProductsQuery>,
    uri: Uri,
) -> Result<Json<ProductListDto>, ProblemResponse> {
    info!("Listing products with query: {:?}", query);

    let req = PageRequest::new(
        parse_or_default(query.page.as_deref(), 1),
        parse_or_default(
            query.limit.as_deref(),
            i64::from(svc.config().default_page_size),
        ),
    );

    match svc.list_products(req).await {
        Ok(page) => Ok(Json(ProductListDto::from(page))),
        Err(e) => {
            error!("Failed to list products: {}", e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

/// Get a specific product by ID
#[utoipa::path(
    get,
    path = "/api/products/{id}",
    tag = "products",
    operation_id = "products.get_product",
    params(("id" = String, Path, description = "Product UUID")),
    responses(
        (status = 200, description = "Product found", body = ProductDto),
        (status = 404, description = "Not Found", body = modkit::Problem, content_type = "application/problem+json"),
        (status = 500, description = "Internal Server Error", body = modkit::Problem, content_type = "application/problem+json"),
    )
)]
pub async fn get_product(
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<String>,
    uri: Uri,
) -> Result<Json<ProductDto>, ProblemResponse> {
    info!("Getting product with id: {}", id);

    let id = parse_id(&id, uri.path())?;
    match svc.get_product(id).await {
        Ok(product) => Ok(Json(ProductDto::from(product))),
        Err(e) => {
            error!("Failed to get product {}: {}", id, e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

/// Create a new product
#[utoipa::path(
    post,
    path = "/api/products",
    tag = "products",
    operation_id = "products.create_product",
    request_body = CreateProductReq,
    responses(
        (status = 201, description = "Created product", body = ProductDto),
        (status = 400, description = "Bad Request", body = modkit::Problem, content_type = "application/problem+json"),
        (status = 500, description = "Internal Server Error", body = modkit::Problem, content_type = "application/problem+json"),
    )
)]
pub async fn create_product(
    uri: Uri,
    Extension(svc): Extension<Arc<Service>>,
    ProblemJson(req_body): ProblemJson<CreateProductReq>,
) -> Result<(StatusCode, Json<ProductDto>), ProblemResponse> {
    info!("Creating product: {:?}", req_body);

    match svc.create_product(req_body.into()).await {
        Ok(product) => Ok((StatusCode::CREATED, Json(ProductDto::from(product)))),
        Err(e) => {
            error!("Failed to create product: {}", e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

/// Update an existing product
#[utoipa::path(
    put,
    path = "/api/products/{id}",
    tag = "products",
    operation_id = "products.update_product",
    params(("id" = String, Path, description = "Product UUID")),
    request_body = UpdateProductReq,
    responses(
        (status = 200, description = "Updated product", body = ProductDto),
        (status = 400, description = "Bad Request", body = modkit::Problem, content_type = "application/problem+json"),
        (status = 404, description = "Not Found", body = modkit::Problem, content_type = "application/problem+json"),
        (status = 500, description = "Internal Server Error", body = modkit::Problem, content_type = "application/problem+json"),
    )
)]
pub async fn update_product(
    uri: Uri,
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<String>,
    ProblemJson(req_body): ProblemJson<UpdateProductReq>,
) -> Result<Json<ProductDto>, ProblemResponse> {
    info!("Updating product {} with: {:?}", id, req_body);

    let id = parse_id(&id, uri.path())?;
    match svc.update_product(id, req_body.into()).await {
        Ok(product) => Ok(Json(ProductDto::from(product))),
        Err(e) => {
            error!("Failed to update product {}: {}", id, e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

/// Delete a product by ID
#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    tag = "products",
    operation_id = "products.delete_product",
    params(("id" = String, Path, description = "Product UUID")),
    responses(
        (status = 200, description = "Product deleted", body = MessageBody),
        (status = 404, description = "Not Found", body = modkit::Problem, content_type = "application/problem+json"),
        (status = 500, description = "Internal Server Error", body = modkit::Problem, content_type = "application/problem+json"),
    )
)]
pub async fn delete_product(
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<String>,
    uri: Uri,
) -> Result<(StatusCode, Json<MessageBody>), ProblemResponse> {
    info!("Deleting product: {}", id);

    let id = parse_id(&id, uri.path())?;
    match svc.delete_product(id).await {
        Ok(()) => Ok(message_json(DELETED_MESSAGE)),
        Err(e) => {
            error!("Failed to delete product {}: {}", id, e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

// An id that is not a UUID cannot name a stored product.
fn parse_id(raw: &str, instance: &str) -> Result<Uuid, ProblemResponse> {
    Uuid::parse_str(raw).map_err(|_| PRODUCTS_NOT_FOUND.respond(NOT_FOUND_DETAIL, instance))
}
