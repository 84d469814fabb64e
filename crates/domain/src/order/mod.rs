//! Order placement.

mod commands;
mod service;

pub use commands::{OrderLine, PlaceOrder};
pub use service::OrderService;

use common::{FruitId, Money};
use thiserror::Error;

/// Errors that reject an order request before it reaches the store.
#[derive(Debug, Error)]
pub enum OrderError {
    /// Customer name is required.
    #[error("Customer name is required")]
    CustomerNameRequired,

    /// Order has no items.
    #[error("Order has no items")]
    NoItems,

    /// Invalid quantity.
    #[error("Invalid quantity for fruit {fruit_id}: {quantity} (must be greater than 0)")]
    InvalidQuantity { fruit_id: FruitId, quantity: i64 },

    /// Invalid unit price.
    #[error("Invalid price for fruit {fruit_id}: {price} (must not be negative)")]
    InvalidPrice { fruit_id: FruitId, price: Money },

    /// Invalid order total.
    #[error("Invalid total amount: {0} (must not be negative)")]
    InvalidTotal(Money),

    /// The store refused the order as malformed.
    #[error("{0}")]
    Rejected(String),
}
