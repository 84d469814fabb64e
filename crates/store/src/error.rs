use common::FruitId;
use thiserror::Error;

/// Errors that can occur when interacting with the store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No fruit exists with the given id.
    #[error("Fruit not found: {0}")]
    FruitNotFound(FruitId),

    /// A line asked for more units than the fruit has in stock.
    #[error(
        "Insufficient stock for {fruit_name}: requested {requested}, available {available}"
    )]
    InsufficientStock {
        fruit_id: FruitId,
        fruit_name: String,
        requested: i64,
        available: i64,
    },

    /// The order handed to the store is structurally invalid.
    #[error("Invalid order: {0}")]
    InvalidOrder(String),

    /// A stored row could not be mapped back into the model.
    #[error("Invalid stored data: {0}")]
    InvalidData(String),

    /// The backend refused the operation.
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// A database error occurred.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A database migration error occurred.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
