use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Pure domain model for a catalog entry (no serde).
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub price: f64,
    pub category: Option<String>,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data for creating a new product.
///
/// `title` and `price` are optional here so that "missing" can be told apart
/// from "present but invalid" when reporting validation failures.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewProduct {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub category: Option<String>,
    pub image: Option<String>,
}

/// Partial update; `None` leaves the stored field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub category: Option<String>,
    pub image: Option<String>,
}

impl ProductPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.category.is_none()
            && self.image.is_none()
    }
}

/// Requested page window. Both values are 1-based counts; the service
/// rejects anything below 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub limit: i64,
}

impl PageRequest {
    pub fn new(page: i64, limit: i64) -> Self {
        Self { page, limit }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PaginationMeta {
    pub total_items: u64,
    pub total_pages: u64,
    pub current_page: u64,
    pub items_per_page: u64,
}

impl PaginationMeta {
    /// Pages needed for `total_items` at `items_per_page`, never less than one.
    pub fn page_count(total_items: u64, items_per_page: u64) -> u64 {
        if items_per_page == 0 {
            return 1;
        }
        total_items.div_ceil(items_per_page).max(1)
    }

    /// Copy with `total_items` replaced and `total_pages` recomputed.
    pub fn with_total(self, total_items: u64) -> Self {
        Self {
            total_items,
            total_pages: Self::page_count(total_items, self.items_per_page),
            ..self
        }
    }
}

/// One page of the listing plus its metadata.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProductPage {
    pub items: Vec<Product>,
    pub pagination: PaginationMeta,
}
