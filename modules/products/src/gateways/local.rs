use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::contract::{
    client::ProductsApi,
    error::ProductsError,
    model::{NewProduct, PageRequest, Product, ProductPage, ProductPatch},
};
use crate::domain::service::Service;

/// Local implementation of the ProductsApi trait that delegates to the domain service
pub struct ProductsLocalClient {
    service: Arc<Service>,
}

impl ProductsLocalClient {
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl ProductsApi for ProductsLocalClient {
    async fn list_products(&self, req: PageRequest) -> Result<ProductPage, ProductsError> {
        self.service.list_products(req).await.map_err(Into::into)
    }

    async fn get_product(&self, id: Uuid) -> Result<Product, ProductsError> {
        self.service.get_product(id).await.map_err(Into::into)
    }

    async fn create_product(&self, new_product: NewProduct) -> Result<Product, ProductsError> {
        self.service
            .create_product(new_product)
            .await
            .map_err(Into::into)
    }

    async fn update_product(
        &self,
        id: Uuid,
        patch: ProductPatch,
    ) -> Result<Product, ProductsError> {
        self.service
            .update_product(id, patch)
            .await
            .map_err(Into::into)
    }

    async fn delete_product(&self, id: Uuid) -> Result<(), ProductsError> {
        self.service.delete_product(id).await.map_err(Into::into)
    }
}
