use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::models::{Store, StoreRequest};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "stores")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    #[sea_orm(column_type = "Text")]
    pub address: String,
    pub phone: String,
    pub operational_time_start: i32,
    pub operational_time_end: i32,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::product::Entity")]
    Products,
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Products.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Store {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            slug: model.slug,
            address: model.address,
            phone: model.phone,
            operational_time_start: model.operational_time_start,
            operational_time_end: model.operational_time_end,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.map(Into::into),
        }
    }
}

impl From<Store> for ActiveModel {
    fn from(store: Store) -> Self {
        ActiveModel {
            id: Set(store.id),
            name: Set(store.name),
            slug: Set(store.slug),
            address: Set(store.address),
            phone: Set(store.phone),
            operational_time_start: Set(store.operational_time_start),
            operational_time_end: Set(store.operational_time_end),
            created_at: Set(store.created_at.into()),
            updated_at: Set(store.updated_at.map(Into::into)),
        }
    }
}

impl ActiveModel {
    /// Partial model for `UPDATE stores ... WHERE id = $id`; `created_at` is untouched.
    pub fn for_update(id: Uuid, input: StoreRequest) -> Self {
        ActiveModel {
            id: Set(id),
            name: Set(input.name),
            slug: Set(input.slug),
            address: Set(input.address),
            phone: Set(input.phone),
            operational_time_start: Set(input.operational_time_start),
            operational_time_end: Set(input.operational_time_end),
            updated_at: Set(Some(chrono::Utc::now().into())),
            ..Default::default()
        }
    }
}
