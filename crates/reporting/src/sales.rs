//! Sales aggregations over placed orders.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, NaiveDate, Utc};
use common::{FruitId, Money};
use serde::{Deserialize, Serialize};
use store::{Fruit, Order};

use crate::ReportingError;

/// How order timestamps are bucketed for the daily sales series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SalesGranularity {
    /// One bucket per calendar day (UTC).
    #[default]
    Day,
    /// One bucket per distinct creation timestamp.
    Timestamp,
}

impl std::str::FromStr for SalesGranularity {
    type Err = ReportingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "day" => Ok(SalesGranularity::Day),
            "timestamp" => Ok(SalesGranularity::Timestamp),
            other => Err(ReportingError::InvalidParameter(format!(
                "unknown granularity '{other}', expected 'day' or 'timestamp'"
            ))),
        }
    }
}

/// The bucket a daily sales total belongs to.
///
/// Serializes as `"2024-05-01"` for days and as an RFC 3339 timestamp
/// otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(untagged)]
pub enum SalesPeriod {
    Day(NaiveDate),
    Instant(DateTime<Utc>),
}

impl SalesPeriod {
    fn of(created_at: DateTime<Utc>, granularity: SalesGranularity) -> Self {
        match granularity {
            SalesGranularity::Day => SalesPeriod::Day(created_at.date_naive()),
            SalesGranularity::Timestamp => SalesPeriod::Instant(created_at),
        }
    }
}

/// Total order amount within one period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailySales {
    pub date: SalesPeriod,
    pub total: Money,
}

/// Sales summary for one fruit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FruitSales {
    pub fruit_id: FruitId,
    /// Current catalog name; absent if the fruit is no longer listed.
    pub fruit_name: Option<String>,
    pub total_quantity: i64,
    /// Sum of the unit prices paid across all lines for this fruit.
    pub total_sales: Money,
    /// Sum of quantity times unit price across all lines for this fruit.
    pub total_revenue: Money,
}

/// Combined analytics payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesReport {
    pub daily_sales: Vec<DailySales>,
    pub fruit_sales: Vec<FruitSales>,
}

/// Sums order totals per period, newest period first.
pub fn daily_sales(orders: &[Order], granularity: SalesGranularity) -> Vec<DailySales> {
    let mut totals: BTreeMap<SalesPeriod, Money> = BTreeMap::new();
    for order in orders {
        *totals
            .entry(SalesPeriod::of(order.created_at, granularity))
            .or_default() += order.total_amount;
    }

    totals
        .into_iter()
        .rev()
        .map(|(date, total)| DailySales { date, total })
        .collect()
}

/// Sums quantities and prices per fruit, ordered by fruit id.
pub fn fruit_sales(orders: &[Order], fruits: &[Fruit]) -> Vec<FruitSales> {
    let names: HashMap<FruitId, &str> = fruits.iter().map(|f| (f.id, f.name.as_str())).collect();

    let mut per_fruit: BTreeMap<FruitId, FruitSales> = BTreeMap::new();
    for item in orders.iter().flat_map(|o| &o.items) {
        let entry = per_fruit.entry(item.fruit_id).or_insert_with(|| FruitSales {
            fruit_id: item.fruit_id,
            fruit_name: names.get(&item.fruit_id).map(|n| n.to_string()),
            total_quantity: 0,
            total_sales: Money::zero(),
            total_revenue: Money::zero(),
        });
        entry.total_quantity += item.quantity;
        entry.total_sales += item.price_at_purchase;
        entry.total_revenue += item.line_total();
    }

    per_fruit.into_values().collect()
}
