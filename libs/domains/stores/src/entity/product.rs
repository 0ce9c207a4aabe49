use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::models::{Product, ProductRequest};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub store_id: Uuid,
    pub name: String,
    #[sea_orm(unique)]
    pub slug: String,
    #[sea_orm(column_type = "Double")]
    pub price: f64,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::store::Entity",
        from = "Column::StoreId",
        to = "super::store::Column::Id"
    )]
    Store,
}

impl Related<super::store::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Store.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// The joined store is attached by the service, never loaded here.
impl From<Model> for Product {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            store_id: model.store_id,
            name: model.name,
            slug: model.slug,
            price: model.price,
            description: model.description,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.map(Into::into),
            store: None,
        }
    }
}

impl From<Product> for ActiveModel {
    fn from(product: Product) -> Self {
        ActiveModel {
            id: Set(product.id),
            store_id: Set(product.store_id),
            name: Set(product.name),
            slug: Set(product.slug),
            price: Set(product.price),
            description: Set(product.description),
            created_at: Set(product.created_at.into()),
            updated_at: Set(product.updated_at.map(Into::into)),
        }
    }
}

impl ActiveModel {
    /// Partial model for an update. `slug` is left unset so the stored value survives.
    pub fn for_update(id: Uuid, input: ProductRequest) -> Self {
        ActiveModel {
            id: Set(id),
            store_id: Set(input.store_id),
            name: Set(input.name),
            price: Set(input.price),
            description: Set(input.description),
            updated_at: Set(Some(chrono::Utc::now().into())),
            ..Default::default()
        }
    }
}
