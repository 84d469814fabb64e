//! HTTP API server for the fruit storefront.
//!
//! Provides REST endpoints for the catalog, order placement and sales
//! analytics, with structured logging (tracing) and Prometheus metrics.

pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, put};
use domain::{CatalogService, OrderService};
use metrics_exporter_prometheus::PrometheusHandle;
use reporting::AnalyticsService;
use store::Store;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use routes::AppState;

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<S: Store + Clone + 'static>(
    state: Arc<AppState<S>>,
    metrics_handle: PrometheusHandle,
) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check))
        .route(
            "/fruits",
            get(routes::fruits::list::<S>)
                .post(routes::fruits::create::<S>)
                .put(routes::fruits::update::<S>),
        )
        .route("/fruits/{id}", get(routes::fruits::get::<S>))
        .route(
            "/fruits/{id}/stock",
            put(routes::fruits::set_stock::<S>),
        )
        .route(
            "/orders",
            get(routes::orders::list::<S>).post(routes::orders::create::<S>),
        )
        .route("/orders/{id}", get(routes::orders::get::<S>))
        .route("/analytics", get(routes::analytics::get::<S>))
        .with_state(state)
        .merge(metrics_router)
        .fallback(routes::not_found)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Creates the application state, with every service sharing `store`.
pub fn create_default_state<S: Store + Clone + 'static>(store: S) -> Arc<AppState<S>> {
    Arc::new(AppState {
        order_service: OrderService::new(store.clone()),
        catalog_service: CatalogService::new(store.clone()),
        analytics_service: AnalyticsService::new(store),
    })
}
