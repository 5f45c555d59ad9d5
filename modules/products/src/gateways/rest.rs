//! `ProductsApi` over HTTP, for clients running outside the server process.

use async_trait::async_trait;
use modkit::{Problem, TracedClient};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;
use uuid::Uuid;

use crate::api::rest::dto::{CreateProductReq, ProductDto, ProductListDto, UpdateProductReq};
use crate::contract::{
    client::ProductsApi,
    error::ProductsError,
    model::{NewProduct, PageRequest, Product, ProductPage, ProductPatch},
};

/// REST gateway rooted at the API base URL (e.g. `http://127.0.0.1:5000/api`).
#[derive(Clone)]
pub struct RestProductsClient {
    client: TracedClient,
    base: Url,
}

impl RestProductsClient {
    /// Build a client for `base_url`. A trailing slash is added when missing so
    /// relative joins keep the last path segment.
    pub fn new(client: TracedClient, base_url: &str) -> Result<Self, url::ParseError> {
        let mut base = Url::parse(base_url)?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(Self { client, base })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn url(&self, tail: &str) -> Result<Url, ProductsError> {
        self.base
            .join(tail)
            .map_err(|e| ProductsError::transport(e.to_string()))
    }

    async fn send(
        &self,
        builder: reqwest::RequestBuilder,
        id: Option<Uuid>,
    ) -> Result<reqwest::Response, ProductsError> {
        let resp = self
            .client
            .send(builder)
            .await
            .map_err(|e| ProductsError::transport(e.to_string()))?;
        if resp.status().is_success() {
            return Ok(resp);
        }
        Err(error_from_response(resp, id).await)
    }
}

async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ProductsError> {
    resp.json::<T>()
        .await
        .map_err(|e| ProductsError::transport(format!("invalid response body: {e}")))
}

/// Translate a non-2xx response back into the contract error.
async fn error_from_response(resp: reqwest::Response, id: Option<Uuid>) -> ProductsError {
    let status = resp.status();
    let problem = resp.json::<Problem>().await.ok();
    debug!(%status, code = ?problem.as_ref().map(|p| p.code.as_str()), "request rejected");

    match status {
        StatusCode::BAD_REQUEST => ProductsError::validation(
            problem
                .map(|p| p.detail)
                .unwrap_or_else(|| "Bad request".to_owned()),
        ),
        StatusCode::NOT_FOUND => ProductsError::not_found(id.unwrap_or_else(Uuid::nil)),
        _ => ProductsError::internal(),
    }
}

#[async_trait]
impl ProductsApi for RestProductsClient {
    #[instrument(name = "products.rest.list_products", skip(self))]
    async fn list_products(&self, req: PageRequest) -> Result<ProductPage, ProductsError> {
        let mut url = self.url("products")?;
        url.query_pairs_mut()
            .append_pair("page", &req.page.to_string())
            .append_pair("limit", &req.limit.to_string());
        let resp = self
            .send(self.client.request(Method::GET, url.as_str()), None)
            .await?;
        decode::<ProductListDto>(resp).await.map(Into::into)
    }

    #[instrument(name = "products.rest.get_product", skip(self))]
    async fn get_product(&self, id: Uuid) -> Result<Product, ProductsError> {
        let url = self.url(&format!("products/{id}"))?;
        let resp = self
            .send(self.client.request(Method::GET, url.as_str()), Some(id))
            .await?;
        decode::<ProductDto>(resp).await.map(Into::into)
    }

    #[instrument(name = "products.rest.create_product", skip(self, new_product))]
    async fn create_product(&self, new_product: NewProduct) -> Result<Product, ProductsError> {
        let url = self.url("products")?;
        let body = CreateProductReq::from(new_product);
        let resp = self
            .send(
                self.client.request(Method::POST, url.as_str()).json(&body),
                None,
            )
            .await?;
        decode::<ProductDto>(resp).await.map(Into::into)
    }

    #[instrument(name = "products.rest.update_product", skip(self, patch))]
    async fn update_product(
        &self,
        id: Uuid,
        patch: ProductPatch,
    ) -> Result<Product, ProductsError> {
        let url = self.url(&format!("products/{id}"))?;
        let body = UpdateProductReq::from(patch);
        let resp = self
            .send(
                self.client.request(Method::PUT, url.as_str()).json(&body),
                Some(id),
            )
            .await?;
        decode::<ProductDto>(resp).await.map(Into::into)
    }

    #[instrument(name = "products.rest.delete_product", skip(self))]
    async fn delete_product(&self, id: Uuid) -> Result<(), ProductsError> {
        let url = self.url(&format!("products/{id}"))?;
        self.send(self.client.request(Method::DELETE, url.as_str()), Some(id))
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_gets_trailing_slash() {
        let c = RestProductsClient::new(TracedClient::default(), "http://localhost:5000/api")
            .unwrap();
        assert_eq!(c.base_url().as_str(), "http://localhost:5000/api/");
        assert_eq!(
            c.url("products").unwrap().as_str(),
            "http://localhost:5000/api/products"
        );
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        assert!(RestProductsClient::new(TracedClient::default(), "not a url").is_err());
    }
}
