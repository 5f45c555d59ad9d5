//! Shared test doubles for the products tests.

#![allow(dead_code)]

use std::sync::Mutex;

use anyhow::Result;
use chrono::Utc;
use uuid::Uuid;

use products::contract::model::Product;
use products::domain::repo::ProductsRepository;

pub const KNOWN_ID: &str = "550e8400-e29b-41d4-a716-446655440000";

pub fn product(title: &str, price: f64) -> Product {
    let now = Utc::now();
    Product {
        id: Uuid::new_v4(),
        title: title.to_string(),
        description: None,
        price,
        category: None,
        image: None,
        created_at: now,
        updated_at: now,
    }
}

/// In-memory repository that keeps insertion order and records list windows.
#[derive(Default)]
pub struct MockProductsRepository {
    pub products: Mutex<Vec<Product>>,
    pub windows: Mutex<Vec<(u64, u64)>>,
    pub fail: bool,
}

impl MockProductsRepository {
    pub fn with_known_product() -> Self {
        let mut p = product("Test Product", 9.99);
        p.id = Uuid::parse_str(KNOWN_ID).unwrap();
        Self {
            products: Mutex::new(vec![p]),
            ..Default::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    fn check(&self) -> Result<()> {
        if self.fail {
            anyhow::bail!("connection refused");
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl ProductsRepository for MockProductsRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>> {
        self.check()?;
        Ok(self
            .products
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == id)
            .cloned())
    }

    async fn insert(&self, p: Product) -> Result<()> {
        self.check()?;
        self.products.lock().unwrap().push(p);
        Ok(())
    }

    async fn update(&self, p: Product) -> Result<()> {
        self.check()?;
        let mut all = self.products.lock().unwrap();
        if let Some(slot) = all.iter_mut().find(|x| x.id == p.id) {
            *slot = p;
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        self.check()?;
        let mut all = self.products.lock().unwrap();
        let before = all.len();
        all.retain(|p| p.id != id);
        Ok(all.len() < before)
    }

    async fn count(&self) -> Result<u64> {
        self.check()?;
        Ok(self.products.lock().unwrap().len() as u64)
    }

    async fn list_window(&self, offset: u64, limit: u64) -> Result<Vec<Product>> {
        self.check()?;
        self.windows.lock().unwrap().push((offset, limit));
        Ok(self
            .products
            .lock()
            .unwrap()
            .iter()
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }
}
