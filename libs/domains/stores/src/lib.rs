//! Stores Domain
//!
//! Stores and the products they sell, served over HTTP with a uniform
//! `{code, message, data}` envelope.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints under /stores and /products
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Validation, product → store joins, list+count fan-out
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Trait + in-memory and Postgres implementations
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entities, requests, query and pagination types
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_stores::{handlers, InMemoryStoreRepository, StoreService};
//!
//! let repository = InMemoryStoreRepository::new();
//! let service = StoreService::new(repository);
//!
//! // Serves /stores/... and /products/...
//! let router = handlers::router(service);
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod pagination;
pub mod postgres;
pub mod query;
pub mod repository;
pub mod service;
pub mod slug;

pub use error::{StoreError, StoreResult};
pub use handlers::{ProductsApiDoc, StoresApiDoc};
pub use models::{Product, ProductRequest, Store, StoreRequest};
pub use pagination::{Paginated, Pagination};
pub use postgres::PgStoreRepository;
pub use query::{ProductQuery, SearchFilterPagination, SortBy, SortDirection};
pub use repository::{InMemoryStoreRepository, StoreRepository};
pub use service::StoreService;
