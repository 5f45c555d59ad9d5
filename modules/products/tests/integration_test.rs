//! Integration-style tests for the products module.
//!
//! - Each test runs on a fresh in-memory SQLite DB and applies migrations.
//! - Service is constructed with the SeaORM-backed repository.
//! - Local client is tested against the same Service.
//! - REST layer is exercised via an Axum Router built from the real routes.

use std::sync::Arc;

use anyhow::Result;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use sea_orm::{Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use products::{
    api::rest::dto::{ProductDto, ProductListDto},
    contract::{
        client::ProductsApi,
        error::ProductsError,
        model::{NewProduct, PageRequest, ProductPatch},
    },
    domain::service::{Service, ServiceConfig},
    gateways::local::ProductsLocalClient,
    infra::storage::{migrations::Migrator, sea_orm_repo::SeaOrmProductsRepository},
};

/// Create a fresh test database for each test (in-memory SQLite) and run migrations.
async fn create_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to connect to test database");
    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");
    db
}

async fn create_test_service_with(config: ServiceConfig) -> Arc<Service> {
    let db = create_test_db().await;
    let repo = SeaOrmProductsRepository::new(db);
    Arc::new(Service::new(Arc::new(repo), config))
}

async fn create_test_service() -> Arc<Service> {
    create_test_service_with(ServiceConfig::default()).await
}

fn create_test_router(service: Arc<Service>) -> Router {
    products::api::rest::routes::register_routes(Router::new(), service)
        .expect("Failed to register routes")
}

fn new_product(title: &str, price: f64) -> NewProduct {
    NewProduct {
        title: Some(title.to_string()),
        price: Some(price),
        ..Default::default()
    }
}

async fn seed(service: &Service, n: usize) -> Result<()> {
    for i in 0..n {
        service
            .create_product(new_product(&format!("Item {i}"), (i + 1) as f64))
            .await?;
    }
    Ok(())
}

async fn body_json(resp: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn test_domain_service_crud() -> Result<()> {
    let service = create_test_service().await;

    // create
    let created = service.create_product(new_product("Pen", 10.0)).await?;
    assert_eq!(created.title, "Pen");
    assert_eq!(created.price, 10.0);
    assert_eq!(created.created_at, created.updated_at);

    // get (round-trip)
    let fetched = service.get_product(created.id).await?;
    assert_eq!(fetched.title, "Pen");
    assert_eq!(fetched.price, 10.0);

    // update
    let patch = ProductPatch {
        price: Some(12.5),
        category: Some("office".to_string()),
        ..Default::default()
    };
    let updated = service.update_product(created.id, patch).await?;
    assert_eq!(updated.title, "Pen");
    assert_eq!(updated.price, 12.5);
    assert_eq!(updated.category.as_deref(), Some("office"));
    assert!(updated.updated_at >= created.updated_at);

    // delete, then get fails
    service.delete_product(created.id).await?;
    let err = service.get_product(created.id).await.unwrap_err();
    assert!(matches!(
        err,
        products::domain::error::DomainError::ProductNotFound { .. }
    ));
    Ok(())
}

#[tokio::test]
async fn test_listing_windows_and_metadata() -> Result<()> {
    let service = create_test_service().await;
    seed(&service, 25).await?;

    let first = service.list_products(PageRequest::new(1, 10)).await?;
    assert_eq!(first.items.len(), 10);
    assert_eq!(first.pagination.total_items, 25);
    assert_eq!(first.pagination.total_pages, 3);
    assert_eq!(first.pagination.current_page, 1);
    assert_eq!(first.pagination.items_per_page, 10);
    assert_eq!(first.items[0].title, "Item 0");

    let last = service.list_products(PageRequest::new(3, 10)).await?;
    assert_eq!(last.items.len(), 5);
    assert_eq!(last.items[0].title, "Item 20");
    assert_eq!(last.pagination.total_items, 25);

    let beyond = service.list_products(PageRequest::new(7, 10)).await?;
    assert!(beyond.items.is_empty());
    assert_eq!(beyond.pagination.current_page, 7);
    Ok(())
}

#[tokio::test]
async fn test_empty_collection_reports_one_page() -> Result<()> {
    let service = create_test_service().await;
    let page = service.list_products(PageRequest::new(1, 10)).await?;
    assert!(page.items.is_empty());
    assert_eq!(page.pagination.total_items, 0);
    assert_eq!(page.pagination.total_pages, 1);
    assert_eq!(page.pagination.current_page, 1);
    Ok(())
}

#[tokio::test]
async fn test_limit_is_clamped_to_max_page_size() -> Result<()> {
    let service = create_test_service_with(ServiceConfig {
        default_page_size: 10,
        max_page_size: 5,
    })
    .await;
    seed(&service, 8).await?;

    let page = service.list_products(PageRequest::new(1, 1000)).await?;
    assert_eq!(page.items.len(), 5);
    assert_eq!(page.pagination.items_per_page, 5);
    assert_eq!(page.pagination.total_pages, 2);
    Ok(())
}

#[tokio::test]
async fn test_huge_page_lists_nothing() -> Result<()> {
    let service = create_test_service().await;
    seed(&service, 3).await?;

    for (page, limit) in [(i64::MAX, 10), (100_000_000_000_000_000, 100)] {
        let listed = service.list_products(PageRequest::new(page, limit)).await?;
        assert!(listed.items.is_empty());
        assert_eq!(listed.pagination.total_items, 3);
        assert_eq!(listed.pagination.total_pages, 1);
        assert_eq!(listed.pagination.current_page, page as u64);
        assert_eq!(listed.pagination.items_per_page, limit as u64);
    }

    let router = create_test_router(service);
    let resp = router
        .oneshot(empty_request(
            "GET",
            "/api/products?page=9223372036854775807&limit=10",
        ))
        .await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let list: ProductListDto = serde_json::from_value(body_json(resp).await)?;
    assert!(list.products.is_empty());
    assert_eq!(list.pagination.current_page, i64::MAX as u64);
    Ok(())
}

#[tokio::test]
async fn test_local_client_maps_errors() -> Result<()> {
    let client: Arc<dyn ProductsApi> = Arc::new(ProductsLocalClient::new(create_test_service().await));

    let missing = Uuid::new_v4();
    assert_eq!(
        client.get_product(missing).await.unwrap_err(),
        ProductsError::not_found(missing)
    );

    let err = client
        .create_product(NewProduct {
            title: Some("Pen".into()),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert_eq!(err, ProductsError::validation("Title and price are required"));

    let err = client
        .list_products(PageRequest::new(0, 10))
        .await
        .unwrap_err();
    assert!(matches!(err, ProductsError::Validation { .. }));

    let created = client.create_product(new_product("Pen", 10.0)).await?;
    client.delete_product(created.id).await?;
    assert_eq!(
        client.delete_product(created.id).await.unwrap_err(),
        ProductsError::not_found(created.id)
    );
    Ok(())
}

#[tokio::test]
async fn test_update_validates_supplied_fields() -> Result<()> {
    let service = create_test_service().await;
    let created = service.create_product(new_product("Pen", 10.0)).await?;

    let err = service
        .update_product(
            created.id,
            ProductPatch {
                price: Some(0.0),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(err.is_validation());

    let err = service
        .update_product(
            created.id,
            ProductPatch {
                title: Some("   ".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(err.is_validation());

    // Empty patch only bumps the timestamp
    let touched = service
        .update_product(created.id, ProductPatch::default())
        .await?;
    assert_eq!(touched.title, "Pen");
    assert_eq!(touched.price, 10.0);

    // Unchanged after the rejected patches
    assert_eq!(service.get_product(created.id).await?.price, 10.0);
    Ok(())
}

#[tokio::test]
async fn test_rest_crud_flow() -> Result<()> {
    let router = create_test_router(create_test_service().await);

    // POST
    let resp = router
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/products",
            json!({"title": "Pen", "price": 10, "category": "office"}),
        ))
        .await?;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: ProductDto = serde_json::from_value(body_json(resp).await)?;
    assert_eq!(created.title, "Pen");

    // GET by id
    let resp = router
        .clone()
        .oneshot(empty_request("GET", &format!("/api/products/{}", created.id)))
        .await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let fetched: ProductDto = serde_json::from_value(body_json(resp).await)?;
    assert_eq!(fetched.id, created.id);
    assert_eq!(fetched.title, "Pen");
    assert_eq!(fetched.price, 10.0);

    // PUT
    let resp = router
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/api/products/{}", created.id),
            json!({"price": 11.5}),
        ))
        .await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: ProductDto = serde_json::from_value(body_json(resp).await)?;
    assert_eq!(updated.price, 11.5);
    assert_eq!(updated.category.as_deref(), Some("office"));

    // DELETE
    let resp = router
        .clone()
        .oneshot(empty_request(
            "DELETE",
            &format!("/api/products/{}", created.id),
        ))
        .await?;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        body_json(resp).await,
        json!({"message": "Product deleted successfully"})
    );

    // GET after delete -> 404
    let resp = router
        .oneshot(empty_request("GET", &format!("/api/products/{}", created.id)))
        .await?;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn test_rest_listing_defaults_and_shape() -> Result<()> {
    let service = create_test_service().await;
    seed(&service, 12).await?;
    let router = create_test_router(service);

    // No params -> page 1, limit 10
    let resp = router
        .clone()
        .oneshot(empty_request("GET", "/api/products"))
        .await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let list: ProductListDto = serde_json::from_value(body_json(resp).await)?;
    assert_eq!(list.products.len(), 10);
    assert_eq!(list.pagination.total_items, 12);
    assert_eq!(list.pagination.total_pages, 2);
    assert_eq!(list.pagination.current_page, 1);
    assert_eq!(list.pagination.items_per_page, 10);

    // Non-numeric values fall back to defaults
    let resp = router
        .clone()
        .oneshot(empty_request("GET", "/api/products?page=abc&limit=xyz"))
        .await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let list: ProductListDto = serde_json::from_value(body_json(resp).await)?;
    assert_eq!(list.pagination.current_page, 1);
    assert_eq!(list.pagination.items_per_page, 10);

    // Leading integer wins: "2.5" is page 2, "5abc" is limit 5
    let resp = router
        .clone()
        .oneshot(empty_request("GET", "/api/products?page=2.5&limit=5abc"))
        .await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let list: ProductListDto = serde_json::from_value(body_json(resp).await)?;
    assert_eq!(list.pagination.current_page, 2);
    assert_eq!(list.pagination.items_per_page, 5);
    assert_eq!(list.pagination.total_pages, 3);
    assert_eq!(list.products[0].title, "Item 5");

    // Explicit window
    let resp = router
        .oneshot(empty_request("GET", "/api/products?page=2&limit=5"))
        .await?;
    let list: ProductListDto = serde_json::from_value(body_json(resp).await)?;
    assert_eq!(list.products.len(), 5);
    assert_eq!(list.products[0].title, "Item 5");
    assert_eq!(list.pagination.total_pages, 3);
    Ok(())
}

#[tokio::test]
async fn test_rest_rejects_non_positive_window() -> Result<()> {
    let router = create_test_router(create_test_service().await);

    for uri in ["/api/products?page=0", "/api/products?limit=0", "/api/products?page=-2"] {
        let resp = router.clone().oneshot(empty_request("GET", uri)).await?;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{uri}");
        let ct = resp
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        assert_eq!(ct, "application/problem+json");
        let body = body_json(resp).await;
        assert_eq!(body["code"], "PRODUCTS_VALIDATION");
    }
    Ok(())
}

#[tokio::test]
async fn test_rest_create_validation() -> Result<()> {
    let router = create_test_router(create_test_service().await);

    let resp = router
        .clone()
        .oneshot(json_request("POST", "/api/products", json!({"title": "Pen"})))
        .await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = body_json(resp).await;
    assert_eq!(body["detail"], "Title and price are required");
    assert_eq!(body["instance"], "/api/products");

    for falsy in [json!({"title": "", "price": 5}), json!({"title": "Pen", "price": 0})] {
        let resp = router
            .clone()
            .oneshot(json_request("POST", "/api/products", falsy))
            .await?;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(resp).await["detail"], "Title and price are required");
    }

    let resp = router
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/products",
            json!({"title": "Pen", "price": -1}),
        ))
        .await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // Body that is not JSON at all
    let resp = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/products")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(resp).await["code"], "MALFORMED_BODY");
    Ok(())
}

#[tokio::test]
async fn test_rest_unknown_ids_are_not_found() -> Result<()> {
    let router = create_test_router(create_test_service().await);
    let id = Uuid::new_v4();

    let resp = router
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/api/products/{id}"),
            json!({"title": "New"}),
        ))
        .await?;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = router
        .clone()
        .oneshot(empty_request("DELETE", &format!("/api/products/{id}")))
        .await?;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body = body_json(resp).await;
    assert_eq!(body["detail"], "Product not found");

    // Not even a UUID
    let resp = router
        .oneshot(empty_request("GET", "/api/products/not-a-uuid"))
        .await?;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    Ok(())
}
