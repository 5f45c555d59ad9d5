use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::contract::model::{
    NewProduct, PaginationMeta, Product, ProductPage, ProductPatch,
};

/// REST DTO for product representation with serde/utoipa
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    pub id: Uuid,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// REST DTO for creating a new product.
///
/// Required fields are optional at the transport level so that a missing
/// field surfaces as a 400 problem from the service, not a body rejection.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct CreateProductReq {
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// REST DTO for updating a product (any subset of fields)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Default)]
pub struct UpdateProductReq {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaginationDto {
    pub total_items: u64,
    pub total_pages: u64,
    pub current_page: u64,
    pub items_per_page: u64,
}

/// REST DTO for the listing response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductListDto {
    pub products: Vec<ProductDto>,
    pub pagination: PaginationDto,
}

/// Raw listing query. Values stay strings so that non-numeric input can fall
/// back to defaults instead of failing extraction.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListProductsQuery {
    /// 1-based page number (default 1)
    pub page: Option<String>,
    /// Page size (default 10, capped by configuration)
    pub limit: Option<String>,
}

// Conversion implementations between REST DTOs and contract models

impl From<Product> for ProductDto {
    fn from(p: Product) -> Self {
        Self {
            id: p.id,
            title: p.title,
            description: p.description,
            price: p.price,
            category: p.category,
            image: p.image,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

impl From<ProductDto> for Product {
    fn from(d: ProductDto) -> Self {
        Self {
            id: d.id,
            title: d.title,
            description: d.description,
            price: d.price,
            category: d.category,
            image: d.image,
            created_at: d.created_at,
            updated_at: d.updated_at,
        }
    }
}

impl From<PaginationMeta> for PaginationDto {
    fn from(m: PaginationMeta) -> Self {
        Self {
            total_items: m.total_items,
            total_pages: m.total_pages,
            current_page: m.current_page,
            items_per_page: m.items_per_page,
        }
    }
}

impl From<PaginationDto> for PaginationMeta {
    fn from(d: PaginationDto) -> Self {
        Self {
            total_items: d.total_items,
            total_pages: d.total_pages,
            current_page: d.current_page,
            items_per_page: d.items_per_page,
        }
    }
}

impl From<ProductPage> for ProductListDto {
    fn from(page: ProductPage) -> Self {
        Self {
            products: page.items.into_iter().map(ProductDto::from).collect(),
            pagination: page.pagination.into(),
        }
    }
}

impl From<ProductListDto> for ProductPage {
    fn from(dto: ProductListDto) -> Self {
        Self {
            items: dto.products.into_iter().map(Product::from).collect(),
            pagination: dto.pagination.into(),
        }
    }
}

impl From<CreateProductReq> for NewProduct {
    fn from(req: CreateProductReq) -> Self {
        Self {
            title: req.title,
            description: req.description,
            price: req.price,
            category: req.category,
            image: req.image,
        }
    }
}

impl From<NewProduct> for CreateProductReq {
    fn from(p: NewProduct) -> Self {
        Self {
            title: p.title,
            description: p.description,
            price: p.price,
            category: p.category,
            image: p.image,
        }
    }
}

impl From<UpdateProductReq> for ProductPatch {
    fn from(req: UpdateProductReq) -> Self {
        Self {
            title: req.title,
            description: req.description,
            price: req.price,
            category: req.category,
            image: req.image,
        }
    }
}

impl From<ProductPatch> for UpdateProductReq {
    fn from(p: ProductPatch) -> Self {
        Self {
            title: p.title,
            description: p.description,
            price: p.price,
            category: p.category,
            image: p.image,
        }
    }
}
