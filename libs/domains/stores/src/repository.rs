use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::StoreResult;
use crate::models::{Product, ProductRequest, Store, StoreRequest};
use crate::query::{SearchFilterPagination, SortBy, SortDirection};

/// Repository trait for store and product persistence
///
/// Requests reaching the repository have already been through `prepare`, so
/// their slugs are filled in. Product reads never attach the store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StoreRepository: Send + Sync {
    async fn create_store(&self, input: StoreRequest) -> StoreResult<Store>;

    async fn get_store_by_id(&self, id: Uuid) -> StoreResult<Option<Store>>;

    /// Returns the number of rows written
    async fn update_store(&self, id: Uuid, input: StoreRequest) -> StoreResult<u64>;

    /// Count products matching the filter, optionally scoped to one store
    async fn count_products(
        &self,
        filter: SearchFilterPagination,
        store_id: Option<Uuid>,
    ) -> StoreResult<u64>;

    /// One page of products matching the filter, optionally scoped to one store
    async fn list_products(
        &self,
        filter: SearchFilterPagination,
        store_id: Option<Uuid>,
    ) -> StoreResult<Vec<Product>>;

    async fn create_product(&self, input: ProductRequest) -> StoreResult<Product>;

    async fn get_product_by_id(&self, id: Uuid) -> StoreResult<Option<Product>>;

    async fn get_product_by_slug(&self, slug: &str) -> StoreResult<Option<Product>>;

    /// Overwrites everything but the slug; returns the number of rows written
    async fn update_product(&self, id: Uuid, input: ProductRequest) -> StoreResult<u64>;

    /// Returns the number of rows removed
    async fn delete_product(&self, id: Uuid) -> StoreResult<u64>;
}

/// In-memory implementation of StoreRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryStoreRepository {
    stores: Arc<RwLock<HashMap<Uuid, Store>>>,
    products: Arc<RwLock<HashMap<Uuid, Product>>>,
}

impl InMemoryStoreRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a product row as-is, bypassing the request path.
    ///
    /// Lets tests plant rows whose store does not exist.
    pub async fn insert_product(&self, product: Product) {
        self.products.write().await.insert(product.id, product);
    }

    /// Literal, case-insensitive substring match, as `ILIKE` on the escaped term.
    fn matches(product: &Product, filter: &SearchFilterPagination, store_id: Option<Uuid>) -> bool {
        if store_id.is_some_and(|id| product.store_id != id) {
            return false;
        }
        match filter.search.as_deref() {
            Some(term) => product.name.to_lowercase().contains(&term.to_lowercase()),
            None => true,
        }
    }
}

#[async_trait]
impl StoreRepository for InMemoryStoreRepository {
    async fn create_store(&self, input: StoreRequest) -> StoreResult<Store> {
        let store = Store::new(input);
        self.stores.write().await.insert(store.id, store.clone());

        tracing::info!(store_id = %store.id, "Created store");
        Ok(store)
    }

    async fn get_store_by_id(&self, id: Uuid) -> StoreResult<Option<Store>> {
        Ok(self.stores.read().await.get(&id).cloned())
    }

    async fn update_store(&self, id: Uuid, input: StoreRequest) -> StoreResult<u64> {
        let mut stores = self.stores.write().await;
        let Some(store) = stores.get_mut(&id) else {
            return Ok(0);
        };

        store.apply_update(input);
        tracing::info!(store_id = %id, "Updated store");
        Ok(1)
    }

    async fn count_products(
        &self,
        filter: SearchFilterPagination,
        store_id: Option<Uuid>,
    ) -> StoreResult<u64> {
        let products = self.products.read().await;
        let count = products
            .values()
            .filter(|p| Self::matches(p, &filter, store_id))
            .count();
        Ok(count as u64)
    }

    async fn list_products(
        &self,
        filter: SearchFilterPagination,
        store_id: Option<Uuid>,
    ) -> StoreResult<Vec<Product>> {
        let products = self.products.read().await;

        let mut result: Vec<Product> = products
            .values()
            .filter(|p| Self::matches(p, &filter, store_id))
            .cloned()
            .collect();

        result.sort_by(|a, b| {
            let ordering = match filter.sort_by {
                SortBy::Price => a.price.total_cmp(&b.price),
                SortBy::Name => a.name.cmp(&b.name),
                SortBy::CreatedAt => a.created_at.cmp(&b.created_at),
            };
            match filter.sort_direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });

        let take = match filter.limit {
            0 => usize::MAX,
            limit => usize::try_from(limit).unwrap_or(usize::MAX),
        };
        let skip = usize::try_from(filter.offset).unwrap_or(usize::MAX);

        Ok(result
            .into_iter()
            .skip(skip)
            .take(take)
            .collect())
    }

    async fn create_product(&self, input: ProductRequest) -> StoreResult<Product> {
        let product = Product::new(input);
        self.products
            .write()
            .await
            .insert(product.id, product.clone());

        tracing::info!(product_id = %product.id, "Created product");
        Ok(product)
    }

    async fn get_product_by_id(&self, id: Uuid) -> StoreResult<Option<Product>> {
        Ok(self.products.read().await.get(&id).cloned())
    }

    async fn get_product_by_slug(&self, slug: &str) -> StoreResult<Option<Product>> {
        let products = self.products.read().await;
        Ok(products.values().find(|p| p.slug == slug).cloned())
    }

    async fn update_product(&self, id: Uuid, input: ProductRequest) -> StoreResult<u64> {
        let mut products = self.products.write().await;
        let Some(product) = products.get_mut(&id) else {
            return Ok(0);
        };

        product.apply_update(input);
        tracing::info!(product_id = %id, "Updated product");
        Ok(1)
    }

    async fn delete_product(&self, id: Uuid) -> StoreResult<u64> {
        let mut products = self.products.write().await;

        if products.remove(&id).is_some() {
            tracing::info!(product_id = %id, "Deleted product");
            Ok(1)
        } else {
            Ok(0)
        }
    }
}
