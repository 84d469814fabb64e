//! Catalog administration.

mod commands;
mod service;

pub use commands::{CreateFruit, SetFruitStock};
pub use service::CatalogService;

use common::Money;
use thiserror::Error;

/// Errors that reject a catalog request before it reaches the store.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Fruit name is required.
    #[error("Fruit name is required")]
    NameRequired,

    /// Invalid price.
    #[error("Invalid price: {0} (must not be negative)")]
    InvalidPrice(Money),

    /// Invalid stock count.
    #[error("Invalid stock: {0} (must not be negative)")]
    InvalidStock(i64),
}
