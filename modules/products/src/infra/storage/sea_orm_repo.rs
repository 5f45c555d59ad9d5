//! SeaORM-backed repository implementation for the domain port.
//!
//! Generic over `C: ConnectionTrait`, so it can be built from a
//! `DatabaseConnection` or from a transaction.

use anyhow::Context;
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryOrder, QuerySelect,
};
use uuid::Uuid;

use crate::contract::model::Product;
use crate::domain::repo::ProductsRepository;
use crate::infra::storage::entity::{Column, Entity as ProductEntity};
use crate::infra::storage::mapper::to_active_model;

/// SeaORM repository impl.
/// Holds a connection object; its lifetime/ownership is up to the caller.
pub struct SeaOrmProductsRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    conn: C,
}

impl<C> SeaOrmProductsRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    pub fn new(conn: C) -> Self {
        Self { conn }
    }
}

#[async_trait::async_trait]
impl<C> ProductsRepository for SeaOrmProductsRepository<C>
where
    C: ConnectionTrait + Send + Sync + 'static,
{
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Product>> {
        let found = ProductEntity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("find_by_id failed")?;
        Ok(found.map(Into::into))
    }

    async fn insert(&self, p: Product) -> anyhow::Result<()> {
        let _ = to_active_model(p)
            .insert(&self.conn)
            .await
            .context("insert failed")?;
        Ok(())
    }

    async fn update(&self, p: Product) -> anyhow::Result<()> {
        let _ = to_active_model(p)
            .update(&self.conn)
            .await
            .context("update failed")?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let res = ProductEntity::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("delete failed")?;
        Ok(res.rows_affected > 0)
    }

    async fn count(&self) -> anyhow::Result<u64> {
        ProductEntity::find()
            .count(&self.conn)
            .await
            .context("count failed")
    }

    async fn list_window(&self, offset: u64, limit: u64) -> anyhow::Result<Vec<Product>> {
        let rows = ProductEntity::find()
            .order_by_asc(Column::CreatedAt)
            .order_by_asc(Column::Id)
            .offset(offset)
            .limit(limit)
            .all(&self.conn)
            .await
            .context("list_window failed")?;
        Ok(rows.into_iter().map(Into::into).collect())
    }
}
