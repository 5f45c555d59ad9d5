use sea_orm::Set;

use crate::contract::model::Product;
use crate::infra::storage::entity::{ActiveModel, Model};

impl From<Model> for Product {
    fn from(m: Model) -> Self {
        Self {
            id: m.id,
            title: m.title,
            description: m.description,
            price: m.price,
            category: m.category,
            image: m.image,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

/// Every column set, for inserts and full-row updates.
pub fn to_active_model(p: Product) -> ActiveModel {
    ActiveModel {
        id: Set(p.id),
        title: Set(p.title),
        description: Set(p.description),
        price: Set(p.price),
        category: Set(p.category),
        image: Set(p.image),
        created_at: Set(p.created_at),
        updated_at: Set(p.updated_at),
    }
}
