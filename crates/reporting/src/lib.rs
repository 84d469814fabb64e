//! Read-only sales analytics.
//!
//! - [`AnalyticsService`] loads the ledger and catalog from the shared store
//! - [`daily_sales`] and [`fruit_sales`] are the pure aggregations behind it

pub mod error;
pub mod sales;
pub mod service;

pub use error::{ReportingError, Result};
pub use sales::{
    DailySales, FruitSales, SalesGranularity, SalesPeriod, SalesReport, daily_sales, fruit_sales,
};
pub use service::AnalyticsService;
