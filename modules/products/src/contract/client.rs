use async_trait::async_trait;
use uuid::Uuid;

use crate::contract::{
    error::ProductsError,
    model::{NewProduct, PageRequest, Product, ProductPage, ProductPatch},
};

/// Public API trait for the products resource.
///
/// Implemented in-process by the local gateway and over HTTP by the REST
/// gateway; the listing store only ever sees this trait.
#[async_trait]
pub trait ProductsApi: Send + Sync {
    /// List one page of products in insertion order
    async fn list_products(&self, req: PageRequest) -> Result<ProductPage, ProductsError>;

    /// Get a product by ID
    async fn get_product(&self, id: Uuid) -> Result<Product, ProductsError>;

    /// Create a new product
    async fn create_product(&self, new_product: NewProduct) -> Result<Product, ProductsError>;

    /// Update a product with partial data
    async fn update_product(&self, id: Uuid, patch: ProductPatch)
        -> Result<Product, ProductsError>;

    /// Delete a product by ID
    async fn delete_product(&self, id: Uuid) -> Result<(), ProductsError>;
}
