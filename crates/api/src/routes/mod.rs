//! Route handlers and the state they share.

pub mod analytics;
pub mod fruits;
pub mod health;
pub mod metrics;
pub mod orders;

use domain::{CatalogService, OrderService};
use reporting::AnalyticsService;
use store::Store;

use crate::error::ApiError;

/// Shared application state accessible from all handlers.
///
/// Every service wraps a clone of the same store handle.
pub struct AppState<S: Store> {
    pub order_service: OrderService<S>,
    pub catalog_service: CatalogService<S>,
    pub analytics_service: AnalyticsService<S>,
}

/// Fallback for unknown routes.
pub async fn not_found() -> ApiError {
    ApiError::NotFound("Route not found".to_string())
}
