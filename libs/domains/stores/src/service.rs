use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};
use crate::models::{Product, ProductRequest, Store, StoreRequest};
use crate::pagination::{Paginated, Pagination};
use crate::query::{ProductQuery, SearchFilterPagination};
use crate::repository::StoreRepository;

/// Service layer for store and product business logic
#[derive(Clone)]
pub struct StoreService<R: StoreRepository> {
    repository: Arc<R>,
}

impl<R: StoreRepository> StoreService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create_store(&self, mut input: StoreRequest) -> StoreResult<Store> {
        input.prepare()?;
        self.repository.create_store(input).await
    }

    #[instrument(skip(self))]
    pub async fn get_store(&self, id: Uuid) -> StoreResult<Store> {
        self.repository
            .get_store_by_id(id)
            .await?
            .ok_or_else(StoreError::store_not_found)
    }

    #[instrument(skip(self, input))]
    pub async fn update_store(&self, id: Uuid, mut input: StoreRequest) -> StoreResult<()> {
        input.prepare()?;

        let rows = self.repository.update_store(id, input).await?;
        if rows == 0 {
            return Err(StoreError::store_not_found());
        }
        Ok(())
    }

    /// Products of one store. The store must exist before any product query runs.
    #[instrument(skip(self, query))]
    pub async fn list_store_products(
        &self,
        store_id: Uuid,
        query: ProductQuery,
    ) -> StoreResult<Paginated<Product>> {
        let store = self.get_store(store_id).await?;

        let (pagination, filter) = Self::window(query)?;
        let (rows, total) = self.fetch_page(filter, Some(store_id)).await?;

        let data = rows
            .into_iter()
            .map(|product| product.with_store(store.clone()))
            .collect();

        Ok(pagination.set_data(data, total))
    }

    /// All products, each joined with its store.
    ///
    /// Rows whose store cannot be resolved are left out of `data`; `totalData`
    /// still counts them.
    #[instrument(skip(self, query))]
    pub async fn list_products(&self, query: ProductQuery) -> StoreResult<Paginated<Product>> {
        let (pagination, filter) = Self::window(query)?;
        let (rows, total) = self.fetch_page(filter, None).await?;

        let mut data = Vec::with_capacity(rows.len());
        for product in rows {
            match self.repository.get_store_by_id(product.store_id).await {
                Ok(Some(store)) => data.push(product.with_store(store)),
                Ok(None) => {
                    tracing::warn!(product_id = %product.id, store_id = %product.store_id, "Dropping product with missing store");
                }
                Err(e) => {
                    tracing::warn!(product_id = %product.id, error = %e, "Dropping product, store lookup failed");
                }
            }
        }

        Ok(pagination.set_data(data, total))
    }

    #[instrument(skip(self, input), fields(name = %input.name, store_id = %input.store_id))]
    pub async fn create_product(&self, mut input: ProductRequest) -> StoreResult<Product> {
        input.prepare()?;

        let store = self.get_store(input.store_id).await?;
        let product = self.repository.create_product(input).await?;

        Ok(product.with_store(store))
    }

    #[instrument(skip(self))]
    pub async fn get_product_by_slug(&self, slug: &str) -> StoreResult<Product> {
        let product = self
            .repository
            .get_product_by_slug(slug)
            .await?
            .ok_or_else(StoreError::product_not_found)?;

        let store = self.get_store(product.store_id).await?;
        Ok(product.with_store(store))
    }

    /// The product keeps the slug it was created with.
    #[instrument(skip(self, input))]
    pub async fn update_product(&self, id: Uuid, mut input: ProductRequest) -> StoreResult<()> {
        input.prepare()?;

        self.repository
            .get_product_by_id(id)
            .await?
            .ok_or_else(StoreError::product_not_found)?;
        self.get_store(input.store_id).await?;

        let rows = self.repository.update_product(id, input).await?;
        if rows == 0 {
            return Err(StoreError::product_not_found());
        }
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: Uuid) -> StoreResult<()> {
        self.repository
            .get_product_by_id(id)
            .await?
            .ok_or_else(StoreError::product_not_found)?;

        self.repository.delete_product(id).await?;
        Ok(())
    }

    fn window(query: ProductQuery) -> StoreResult<(Pagination, SearchFilterPagination)> {
        let params = query.normalize();
        let pagination = Pagination::new(params.limit, params.page)?;
        let filter = SearchFilterPagination::new(&params, &pagination);
        Ok((pagination, filter))
    }

    /// Runs the list and count queries concurrently; either failing fails both.
    async fn fetch_page(
        &self,
        filter: SearchFilterPagination,
        store_id: Option<Uuid>,
    ) -> StoreResult<(Vec<Product>, u64)> {
        let list = self.repository.list_products(filter.clone(), store_id);
        let count = self.repository.count_products(filter, store_id);

        let (rows, total) = tokio::try_join!(list, count)?;
        Ok((rows, total))
    }
}
