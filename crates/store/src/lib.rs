//! Storage for the fruit catalog and the order ledger.
//!
//! Both live behind the [`Store`] trait so the workflow and reporting
//! layers can be handed a single storage handle at start-up. Two
//! implementations are provided:
//! - [`InMemoryStore`] for tests and local runs
//! - [`PostgresStore`] backed by a `sqlx` connection pool

pub mod error;
pub mod memory;
pub mod model;
pub mod postgres;
pub mod store;

pub use common::{FruitId, Money, OrderId};
pub use error::{Result, StoreError};
pub use memory::InMemoryStore;
pub use model::{
    Fruit, NewFruit, NewOrder, NewOrderLine, Order, OrderItem, OrderStatus, seed_catalog,
};
pub use postgres::PostgresStore;
pub use store::{Store, StoreExt, check_stock, validate_new_order};
