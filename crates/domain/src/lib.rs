//! Domain layer for the fruit storefront.
//!
//! This crate provides:
//! - [`OrderService`], the order placement workflow
//! - [`CatalogService`] for listing fruits and admin stock edits
//! - [`Cart`], the customer's basket before checkout

pub mod cart;
pub mod catalog;
pub mod error;
pub mod order;

pub use cart::{Cart, CartError, CartLine};
pub use catalog::{CatalogError, CatalogService, CreateFruit, SetFruitStock};
pub use common::{FruitId, Money, OrderId};
pub use error::DomainError;
pub use order::{OrderError, OrderLine, OrderService, PlaceOrder};
pub use store::{Fruit, Order, OrderItem, OrderStatus};
