//! Sea-ORM entities for the `stores` and `products` tables.

pub mod product;
pub mod store;
