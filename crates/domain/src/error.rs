//! Domain error types.

use store::StoreError;
use thiserror::Error;

use crate::catalog::CatalogError;
use crate::order::OrderError;

/// Errors that can occur during domain operations.
#[derive(Debug, Error)]
pub enum DomainError {
    /// An order request was rejected before touching storage.
    #[error("Order error: {0}")]
    Order(#[from] OrderError),

    /// A catalog request was rejected before touching storage.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// A referenced entity does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// A line asked for more units than are in stock.
    #[error("Insufficient stock for {fruit_name}: requested {requested}, available {available}")]
    InsufficientStock {
        fruit_name: String,
        requested: i64,
        available: i64,
    },

    /// Unexpected storage failure.
    #[error("Store error: {0}")]
    Store(StoreError),
}

impl DomainError {
    /// Short machine-readable reason, used as a metrics label.
    pub fn reason(&self) -> &'static str {
        match self {
            DomainError::Order(_) | DomainError::Catalog(_) => "validation",
            DomainError::NotFound { .. } => "not_found",
            DomainError::InsufficientStock { .. } => "insufficient_stock",
            DomainError::Store(_) => "internal",
        }
    }
}

impl From<StoreError> for DomainError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::FruitNotFound(id) => DomainError::NotFound {
                entity: "Fruit",
                id: id.to_string(),
            },
            StoreError::InsufficientStock {
                fruit_name,
                requested,
                available,
                ..
            } => DomainError::InsufficientStock {
                fruit_name,
                requested,
                available,
            },
            StoreError::InvalidOrder(reason) => DomainError::Order(OrderError::Rejected(reason)),
            other => DomainError::Store(other),
        }
    }
}
