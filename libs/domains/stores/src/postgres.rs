use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbBackend, DbErr, EntityTrait,
    FromQueryResult, QueryFilter, Statement,
};
use uuid::Uuid;

use crate::{
    entity::{product, store},
    error::StoreResult,
    models::{Product, ProductRequest, Store, StoreRequest},
    query::SearchFilterPagination,
    repository::StoreRepository,
};

const COUNT_PRODUCTS_SQL: &str = "SELECT count(*) AS count FROM products";
const LIST_PRODUCTS_SQL: &str = "SELECT id, store_id, name, slug, price, description, created_at, updated_at FROM products";

#[derive(Debug, FromQueryResult)]
struct CountRow {
    count: i64,
}

pub struct PgStoreRepository {
    db: DatabaseConnection,
}

impl PgStoreRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn statement(sql: String, values: Vec<sea_orm::Value>) -> Statement {
        Statement::from_sql_and_values(DbBackend::Postgres, sql, values)
    }
}

/// `RecordNotUpdated` means the id matched no row.
fn rows_updated<T>(result: Result<T, DbErr>) -> StoreResult<u64> {
    match result {
        Ok(_) => Ok(1),
        Err(DbErr::RecordNotUpdated) => Ok(0),
        Err(e) => Err(e.into()),
    }
}

#[async_trait]
impl StoreRepository for PgStoreRepository {
    async fn create_store(&self, input: StoreRequest) -> StoreResult<Store> {
        let active: store::ActiveModel = Store::new(input).into();
        let model = active.insert(&self.db).await?;

        tracing::info!(store_id = %model.id, "Created store");
        Ok(model.into())
    }

    async fn get_store_by_id(&self, id: Uuid) -> StoreResult<Option<Store>> {
        let model = store::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Into::into))
    }

    async fn update_store(&self, id: Uuid, input: StoreRequest) -> StoreResult<u64> {
        let result = store::ActiveModel::for_update(id, input)
            .update(&self.db)
            .await;
        let rows = rows_updated(result)?;

        if rows > 0 {
            tracing::info!(store_id = %id, "Updated store");
        }
        Ok(rows)
    }

    async fn count_products(
        &self,
        filter: SearchFilterPagination,
        store_id: Option<Uuid>,
    ) -> StoreResult<u64> {
        let (sql, values) = filter.build_where(COUNT_PRODUCTS_SQL, false, store_id);

        let row = CountRow::find_by_statement(Self::statement(sql, values))
            .one(&self.db)
            .await?;

        Ok(row.map_or(0, |r| r.count.max(0) as u64))
    }

    async fn list_products(
        &self,
        filter: SearchFilterPagination,
        store_id: Option<Uuid>,
    ) -> StoreResult<Vec<Product>> {
        let (sql, values) = filter.build_where(LIST_PRODUCTS_SQL, true, store_id);

        let models = product::Entity::find()
            .from_raw_sql(Self::statement(sql, values))
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn create_product(&self, input: ProductRequest) -> StoreResult<Product> {
        let active: product::ActiveModel = Product::new(input).into();
        let model = active.insert(&self.db).await?;

        tracing::info!(product_id = %model.id, "Created product");
        Ok(model.into())
    }

    async fn get_product_by_id(&self, id: Uuid) -> StoreResult<Option<Product>> {
        let model = product::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Into::into))
    }

    async fn get_product_by_slug(&self, slug: &str) -> StoreResult<Option<Product>> {
        let model = product::Entity::find()
            .filter(product::Column::Slug.eq(slug))
            .one(&self.db)
            .await?;
        Ok(model.map(Into::into))
    }

    async fn update_product(&self, id: Uuid, input: ProductRequest) -> StoreResult<u64> {
        let result = product::ActiveModel::for_update(id, input)
            .update(&self.db)
            .await;
        let rows = rows_updated(result)?;

        if rows > 0 {
            tracing::info!(product_id = %id, "Updated product");
        }
        Ok(rows)
    }

    async fn delete_product(&self, id: Uuid) -> StoreResult<u64> {
        let result = product::Entity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected > 0 {
            tracing::info!(product_id = %id, "Deleted product");
        }
        Ok(result.rows_affected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{SortBy, SortDirection};
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, Transaction, Value};
    use std::collections::BTreeMap;

    fn filter() -> SearchFilterPagination {
        SearchFilterPagination {
            limit: 10,
            offset: 0,
            search: Some("wid".into()),
            sort_by: SortBy::Price,
            sort_direction: SortDirection::Asc,
        }
    }

    fn product_model(store_id: Uuid, price: f64) -> product::Model {
        product::Model {
            id: Uuid::now_v7(),
            store_id,
            name: "Widget".into(),
            slug: format!("widget-{}", Utc::now().timestamp()),
            price,
            description: "desc".into(),
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn test_list_products_runs_scoped_parameterized_sql() {
        let store_id = Uuid::now_v7();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![product_model(store_id, 1.0), product_model(store_id, 3.0)]])
            .into_connection();
        let repo = PgStoreRepository::new(db);

        let rows = repo.list_products(filter(), Some(store_id)).await.unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|p| p.store.is_none()));

        let log = repo.db.into_transaction_log();
        assert_eq!(
            log,
            vec![Transaction::from_sql_and_values(
                DatabaseBackend::Postgres,
                "SELECT id, store_id, name, slug, price, description, created_at, updated_at FROM products WHERE 1=1 AND store_id = $1 AND (name ILIKE $2) ORDER BY price ASC LIMIT $3 OFFSET $4",
                [
                    store_id.into(),
                    "%wid%".into(),
                    10i64.into(),
                    0i64.into()
                ]
            )]
        );
    }

    #[tokio::test]
    async fn test_count_products_reads_count_column() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[BTreeMap::from([("count", Value::from(7i64))])]])
            .into_connection();
        let repo = PgStoreRepository::new(db);

        assert_eq!(repo.count_products(filter(), None).await.unwrap(), 7);
    }

    #[tokio::test]
    async fn test_storage_error_becomes_internal() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Custom("connection reset".into())])
            .into_connection();
        let repo = PgStoreRepository::new(db);

        let err = repo.get_store_by_id(Uuid::now_v7()).await.unwrap_err();
        assert!(matches!(err, crate::StoreError::Internal(msg) if msg.contains("connection reset")));
    }

    #[tokio::test]
    async fn test_delete_reports_rows_affected() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                },
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 0,
                },
            ])
            .into_connection();
        let repo = PgStoreRepository::new(db);
        let id = Uuid::now_v7();

        assert_eq!(repo.delete_product(id).await.unwrap(), 1);
        assert_eq!(repo.delete_product(id).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_get_product_by_slug_maps_model() {
        let store_id = Uuid::now_v7();
        let model = product_model(store_id, 4.5);
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![model.clone()]])
            .into_connection();
        let repo = PgStoreRepository::new(db);

        let product = repo.get_product_by_slug(&model.slug).await.unwrap().unwrap();
        assert_eq!(product.id, model.id);
        assert_eq!(product.store_id, store_id);
        assert_eq!(product.price, 4.5);
    }
}
