//! Order commands.

use common::{FruitId, Money};
use store::{NewOrder, NewOrderLine};

use super::OrderError;

/// One requested line of an order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderLine {
    /// The fruit being bought.
    pub fruit_id: FruitId,

    /// Quantity ordered.
    pub quantity: i64,

    /// Unit price shown to the customer; stored as the price at purchase.
    pub unit_price: Money,
}

impl OrderLine {
    /// Creates a new order line.
    pub fn new(fruit_id: FruitId, quantity: i64, unit_price: Money) -> Self {
        Self {
            fruit_id,
            quantity,
            unit_price,
        }
    }

    /// Returns the total price for this line (quantity * unit_price), or
    /// `None` if it does not fit in a `Money`.
    pub fn total_price(&self) -> Option<Money> {
        self.unit_price.checked_multiply(self.quantity)
    }
}

/// Command to place an order.
///
/// The total is computed by the caller from its cart and stored as
/// submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceOrder {
    /// Free-text name of the customer.
    pub customer_name: String,

    /// Requested lines, in submission order.
    pub lines: Vec<OrderLine>,

    /// Caller-computed order total.
    pub total_amount: Money,
}

impl PlaceOrder {
    /// Creates a new PlaceOrder command.
    pub fn new(customer_name: impl Into<String>, lines: Vec<OrderLine>, total_amount: Money) -> Self {
        Self {
            customer_name: customer_name.into(),
            lines,
            total_amount,
        }
    }

    /// Creates a PlaceOrder command whose total is the sum of its lines.
    ///
    /// A sum that overflows saturates at the largest amount; the stock
    /// check still decides whether such an order can be placed.
    pub fn with_computed_total(customer_name: impl Into<String>, lines: Vec<OrderLine>) -> Self {
        let total_amount = sum_lines(&lines).unwrap_or(Money::from_cents(i64::MAX));
        Self::new(customer_name, lines, total_amount)
    }

    /// Sum of every line's quantity times unit price, or `None` on overflow.
    pub fn computed_total(&self) -> Option<Money> {
        sum_lines(&self.lines)
    }

    /// Checks the request shape without looking at the catalog.
    pub fn validate(&self) -> Result<(), OrderError> {
        if self.customer_name.trim().is_empty() {
            return Err(OrderError::CustomerNameRequired);
        }
        if self.lines.is_empty() {
            return Err(OrderError::NoItems);
        }
        for line in &self.lines {
            if line.quantity <= 0 {
                return Err(OrderError::InvalidQuantity {
                    fruit_id: line.fruit_id,
                    quantity: line.quantity,
                });
            }
            if line.unit_price.is_negative() {
                return Err(OrderError::InvalidPrice {
                    fruit_id: line.fruit_id,
                    price: line.unit_price,
                });
            }
        }
        if self.total_amount.is_negative() {
            return Err(OrderError::InvalidTotal(self.total_amount));
        }
        Ok(())
    }

    pub(crate) fn into_new_order(self) -> NewOrder {
        NewOrder {
            customer_name: self.customer_name.trim().to_string(),
            total_amount: self.total_amount,
            lines: self
                .lines
                .into_iter()
                .map(|l| NewOrderLine::new(l.fruit_id, l.quantity, l.unit_price))
                .collect(),
        }
    }
}

fn sum_lines(lines: &[OrderLine]) -> Option<Money> {
    lines
        .iter()
        .try_fold(Money::zero(), |acc, line| acc.checked_add(line.total_price()?))
}
