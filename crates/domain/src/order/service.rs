//! Order service providing the placement workflow and ledger reads.

use common::OrderId;
use store::{Order, Store};

use crate::error::DomainError;

use super::PlaceOrder;

/// Service for placing and reading orders.
///
/// Wraps the shared store handle. Placement runs as a single atomic store
/// operation, so a rejected request never leaves an order or a stock
/// change behind.
pub struct OrderService<S: Store> {
    store: S,
}

impl<S: Store> OrderService<S> {
    /// Creates a new order service over the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns a reference to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Places an order.
    ///
    /// Validates the request shape, then validates stock, creates the order
    /// with its items and decrements stock in one atomic store call.
    #[tracing::instrument(skip(self, cmd), fields(customer = %cmd.customer_name, lines = cmd.lines.len()))]
    pub async fn place_order(&self, cmd: PlaceOrder) -> Result<Order, DomainError> {
        let started = std::time::Instant::now();

        let result = self.try_place_order(cmd).await;

        metrics::histogram!("order_placement_duration_seconds")
            .record(started.elapsed().as_secs_f64());
        match &result {
            Ok(order) => {
                metrics::counter!("orders_placed_total").increment(1);
                tracing::info!(order_id = %order.id, total = %order.total_amount, "order placed");
            }
            Err(err) => {
                metrics::counter!("orders_rejected_total", "reason" => err.reason()).increment(1);
                match err {
                    DomainError::Store(_) => tracing::error!(error = %err, "order placement failed"),
                    _ => tracing::warn!(error = %err, "order rejected"),
                }
            }
        }

        result
    }

    async fn try_place_order(&self, cmd: PlaceOrder) -> Result<Order, DomainError> {
        cmd.validate()?;

        match cmd.computed_total() {
            Some(computed) if computed != cmd.total_amount => tracing::warn!(
                submitted = %cmd.total_amount,
                %computed,
                "submitted total differs from line items"
            ),
            Some(_) => {}
            None => tracing::warn!(
                submitted = %cmd.total_amount,
                "line item totals overflow, leaving the decision to the stock check"
            ),
        }

        Ok(self.store.place_order(cmd.into_new_order()).await?)
    }

    /// Lists every order, newest first.
    #[tracing::instrument(skip(self))]
    pub async fn list_orders(&self) -> Result<Vec<Order>, DomainError> {
        Ok(self.store.list_orders().await?)
    }

    /// Loads a single order.
    #[tracing::instrument(skip(self))]
    pub async fn get_order(&self, id: OrderId) -> Result<Order, DomainError> {
        self.store
            .get_order(id)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                entity: "Order",
                id: id.to_string(),
            })
    }
}
