use axum::Router;

pub mod health;
pub mod stores;

/// API routes without the `/api` prefix; `create_router` adds it.
///
/// The returned router is stateless: the domain router applies its own state.
pub fn routes(state: &crate::state::AppState) -> Router {
    Router::new().merge(stores::router(state))
}

/// `/ready`, probing the database. Merged next to the stateless app router.
pub fn ready_router(state: crate::state::AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}
