//! Rows held by the catalog store and the order ledger.

use chrono::{DateTime, Utc};
use common::{FruitId, Money, OrderId};
use serde::{Deserialize, Serialize};

/// A purchasable fruit with its current price and stock count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fruit {
    pub id: FruitId,
    pub name: String,
    pub price: Money,
    pub stock: i64,
}

/// A fruit that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFruit {
    pub name: String,
    pub price: Money,
    pub stock: i64,
}

impl NewFruit {
    pub fn new(name: impl Into<String>, price: Money, stock: i64) -> Self {
        Self {
            name: name.into(),
            price,
            stock,
        }
    }
}

/// Catalog used to seed an empty store.
pub fn seed_catalog() -> Vec<NewFruit> {
    vec![
        NewFruit::new("Apple", Money::from_cents(100), 30),
        NewFruit::new("Orange", Money::from_cents(150), 25),
        NewFruit::new("Banana", Money::from_cents(200), 40),
    ]
}

/// Lifecycle status of an order.
///
/// Every order starts as `Pending`. `Completed` is a recognized terminal
/// state that nothing transitions into yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Completed,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Completed => "completed",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(OrderStatus::Pending),
            "completed" => Ok(OrderStatus::Completed),
            other => Err(format!("unknown order status '{other}'")),
        }
    }
}

/// One line of a placed order.
///
/// `price_at_purchase` is captured when the order is accepted and is never
/// recomputed from the catalog. `fruit_name` is resolved against the
/// current catalog when the order is read back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub fruit_id: FruitId,
    pub fruit_name: Option<String>,
    pub quantity: i64,
    pub price_at_purchase: Money,
}

impl OrderItem {
    /// Returns `quantity * price_at_purchase`.
    pub fn line_total(&self) -> Money {
        self.price_at_purchase.multiply(self.quantity)
    }
}

/// A placed order with its line items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub customer_name: String,
    pub total_amount: Money,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub items: Vec<OrderItem>,
}

/// A requested order line: which fruit, how many, and at what unit price.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrderLine {
    pub fruit_id: FruitId,
    pub quantity: i64,
    pub unit_price: Money,
}

impl NewOrderLine {
    pub fn new(fruit_id: FruitId, quantity: i64, unit_price: Money) -> Self {
        Self {
            fruit_id,
            quantity,
            unit_price,
        }
    }
}

/// An order ready to be placed atomically by [`crate::Store::place_order`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub customer_name: String,
    pub total_amount: Money,
    pub lines: Vec<NewOrderLine>,
}
