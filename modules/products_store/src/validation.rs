//! Pre-flight check run on the product form before anything is sent.

use products::contract::model::{NewProduct, ProductPatch};

use crate::error::StoreError;

pub const FORM_ERROR: &str = "Title is required and price must be greater than 0";

/// Raw form input. Empty optional fields mean "not set".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductForm {
    pub title: String,
    pub description: String,
    pub price: Option<f64>,
    pub category: String,
    pub image: String,
}

/// Title must be non-blank and price a positive number.
pub fn validate_form(form: &ProductForm) -> Result<(), StoreError> {
    let price_ok = form.price.is_some_and(|p| p.is_finite() && p > 0.0);
    if form.title.trim().is_empty() || !price_ok {
        return Err(StoreError::InvalidForm(FORM_ERROR.to_owned()));
    }
    Ok(())
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}

impl From<ProductForm> for NewProduct {
    fn from(form: ProductForm) -> Self {
        Self {
            title: Some(form.title),
            description: non_empty(form.description),
            price: form.price,
            category: non_empty(form.category),
            image: non_empty(form.image),
        }
    }
}

// Every field is sent on edit so a blanked field overwrites the stored one.
impl From<ProductForm> for ProductPatch {
    fn from(form: ProductForm) -> Self {
        Self {
            title: Some(form.title),
            description: Some(form.description),
            price: form.price,
            category: Some(form.category),
            image: Some(form.image),
        }
    }
}
