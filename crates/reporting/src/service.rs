//! Analytics service over the shared store.

use std::time::Instant;

use store::Store;

use crate::Result;
use crate::sales::{DailySales, FruitSales, SalesGranularity, SalesReport, daily_sales, fruit_sales};

/// Builds sales reports from the order ledger and the current catalog.
///
/// Reads never mutate the store, so calling the same report twice with no
/// writes in between returns the same result.
pub struct AnalyticsService<S: Store> {
    store: S,
}

impl<S: Store> AnalyticsService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Order totals grouped by period, newest first.
    #[tracing::instrument(skip(self))]
    pub async fn daily_sales(&self, granularity: SalesGranularity) -> Result<Vec<DailySales>> {
        let orders = self.store.list_orders().await?;
        Ok(daily_sales(&orders, granularity))
    }

    /// Per-fruit quantities and prices, joined with current fruit names.
    #[tracing::instrument(skip(self))]
    pub async fn fruit_sales(&self) -> Result<Vec<FruitSales>> {
        let orders = self.store.list_orders().await?;
        let fruits = self.store.list_fruits().await?;
        Ok(fruit_sales(&orders, &fruits))
    }

    /// Both aggregations computed from a single read of the ledger.
    #[tracing::instrument(skip(self))]
    pub async fn report(&self, granularity: SalesGranularity) -> Result<SalesReport> {
        let start = Instant::now();
        let orders = self.store.list_orders().await?;
        let fruits = self.store.list_fruits().await?;

        let report = SalesReport {
            daily_sales: daily_sales(&orders, granularity),
            fruit_sales: fruit_sales(&orders, &fruits),
        };

        metrics::histogram!("analytics_report_duration_seconds")
            .record(start.elapsed().as_secs_f64());
        tracing::debug!(
            orders = orders.len(),
            periods = report.daily_sales.len(),
            fruits = report.fruit_sales.len(),
            "analytics report built"
        );
        Ok(report)
    }
}
