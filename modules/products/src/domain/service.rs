use std::sync::Arc;

use crate::contract::model::{NewProduct, PageRequest, Product, ProductPage, ProductPatch};
use crate::domain::error::DomainError;
use crate::domain::pagination::PageWindow;
use crate::domain::repo::ProductsRepository;
use chrono::Utc;
use tracing::{debug, info, instrument};
use uuid::Uuid;

/// Domain service with business rules for the product catalog.
/// Depends only on the repository port, not on infra types.
#[derive(Clone)]
pub struct Service {
    repo: Arc<dyn ProductsRepository>,
    config: ServiceConfig,
}

/// Configuration for the domain service
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub default_page_size: u32,
    pub max_page_size: u32,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            default_page_size: 10,
            max_page_size: 100,
        }
    }
}

impl Service {
    /// Create a service with dependencies.
    pub fn new(repo: Arc<dyn ProductsRepository>, config: ServiceConfig) -> Self {
        Self { repo, config }
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// List one page of products together with collection-wide metadata.
    #[instrument(
        name = "products.service.list_products",
        skip(self),
        fields(page = req.page, limit = req.limit)
    )]
    pub async fn list_products(&self, req: PageRequest) -> Result<ProductPage, DomainError> {
        debug!("Listing products");

        let window = PageWindow::resolve(req, u64::from(self.config.max_page_size))?;

        let total_items = self
            .repo
            .count()
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;
        let items = match window.offset() {
            Some(offset) => self
                .repo
                .list_window(offset, window.limit)
                .await
                .map_err(|e| DomainError::database(e.to_string()))?,
            // Far past the last page; nothing can be there
            None => Vec::new(),
        };

        debug!(
            returned = items.len(),
            total_items, "Successfully listed products page"
        );
        Ok(ProductPage {
            items,
            pagination: window.meta(total_items),
        })
    }

    #[instrument(name = "products.service.get_product", skip(self), fields(product_id = %id))]
    pub async fn get_product(&self, id: Uuid) -> Result<Product, DomainError> {
        debug!("Getting product by id");

        let product = self
            .repo
            .find_by_id(id)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?
            .ok_or_else(|| DomainError::product_not_found(id))?;
        debug!("Successfully retrieved product");
        Ok(product)
    }

    #[instrument(
        name = "products.service.create_product",
        skip(self, new_product),
        fields(title = new_product.title.as_deref().unwrap_or_default())
    )]
    pub async fn create_product(&self, new_product: NewProduct) -> Result<Product, DomainError> {
        info!("Creating new product");

        // Blank titles and zero/NaN prices count as not supplied
        let (title, price) = match (new_product.title, new_product.price) {
            (Some(title), Some(price))
                if !title.trim().is_empty() && price != 0.0 && !price.is_nan() =>
            {
                (title, price)
            }
            _ => return Err(DomainError::missing_required_fields()),
        };
        validate_price(price)?;

        let now = Utc::now();
        let product = Product {
            id: Uuid::new_v4(),
            title,
            description: new_product.description,
            price,
            category: new_product.category,
            image: new_product.image,
            created_at: now,
            updated_at: now,
        };

        self.repo
            .insert(product.clone())
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;

        info!("Successfully created product with id={}", product.id);
        Ok(product)
    }

    #[instrument(
        name = "products.service.update_product",
        skip(self, patch),
        fields(product_id = %id)
    )]
    pub async fn update_product(
        &self,
        id: Uuid,
        patch: ProductPatch,
    ) -> Result<Product, DomainError> {
        info!("Updating product");

        // Supplied fields must satisfy the same rules as on create
        if let Some(ref title) = patch.title {
            validate_title(title)?;
        }
        if let Some(price) = patch.price {
            validate_price(price)?;
        }

        let mut current = self
            .repo
            .find_by_id(id)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?
            .ok_or_else(|| DomainError::product_not_found(id))?;

        if let Some(title) = patch.title {
            current.title = title;
        }
        if let Some(description) = patch.description {
            current.description = Some(description);
        }
        if let Some(price) = patch.price {
            current.price = price;
        }
        if let Some(category) = patch.category {
            current.category = Some(category);
        }
        if let Some(image) = patch.image {
            current.image = Some(image);
        }
        current.updated_at = Utc::now();

        self.repo
            .update(current.clone())
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;

        info!("Successfully updated product");
        Ok(current)
    }

    #[instrument(
        name = "products.service.delete_product",
        skip(self),
        fields(product_id = %id)
    )]
    pub async fn delete_product(&self, id: Uuid) -> Result<(), DomainError> {
        info!("Deleting product");

        let deleted = self
            .repo
            .delete(id)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;

        if !deleted {
            return Err(DomainError::product_not_found(id));
        }

        info!("Successfully deleted product");
        Ok(())
    }
}

// --- validation helpers ---

fn validate_title(title: &str) -> Result<(), DomainError> {
    if title.trim().is_empty() {
        return Err(DomainError::empty_title());
    }
    Ok(())
}

fn validate_price(price: f64) -> Result<(), DomainError> {
    if !price.is_finite() || price <= 0.0 {
        return Err(DomainError::invalid_price(price));
    }
    Ok(())
}
