use axum::Router;
use domain_stores::{PgStoreRepository, StoreService, handlers};

/// Serves `/stores/...` and `/products/...` from PostgreSQL.
pub fn router(state: &crate::state::AppState) -> Router {
    let repository = PgStoreRepository::new(state.db.clone());
    let service = StoreService::new(repository);
    handlers::router(service)
}
