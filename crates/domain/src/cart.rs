//! The customer's cart before checkout.

use common::{FruitId, Money};
use store::Fruit;
use thiserror::Error;

use crate::order::{OrderError, OrderLine, PlaceOrder};

/// Errors raised while editing a cart.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    #[error("{0} is out of stock")]
    OutOfStock(String),

    #[error("Only {available} of {fruit_name} in stock")]
    StockLimit { fruit_name: String, available: i64 },
}

/// A fruit in the cart together with the chosen quantity.
///
/// The fruit is a snapshot taken when it was added; its price becomes the
/// unit price of the order line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    pub fruit: Fruit,
    pub quantity: i64,
}

impl CartLine {
    pub fn line_total(&self) -> Money {
        self.fruit.price.multiply(self.quantity)
    }
}

/// Shopping cart.
///
/// Quantities are kept between 1 and the fruit's stock at the time it was
/// added. The numeric total is the only total; formatting is left to the
/// presentation layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Quantity of `fruit_id` currently in the cart.
    pub fn quantity_of(&self, fruit_id: FruitId) -> i64 {
        self.lines
            .iter()
            .find(|l| l.fruit.id == fruit_id)
            .map_or(0, |l| l.quantity)
    }

    /// Adds one unit of `fruit`.
    pub fn add(&mut self, fruit: &Fruit) -> Result<(), CartError> {
        if fruit.stock <= 0 {
            return Err(CartError::OutOfStock(fruit.name.clone()));
        }

        match self.lines.iter_mut().find(|l| l.fruit.id == fruit.id) {
            Some(line) if line.quantity >= fruit.stock => Err(CartError::StockLimit {
                fruit_name: fruit.name.clone(),
                available: fruit.stock,
            }),
            Some(line) => {
                line.quantity += 1;
                line.fruit = fruit.clone();
                Ok(())
            }
            None => {
                self.lines.push(CartLine {
                    fruit: fruit.clone(),
                    quantity: 1,
                });
                Ok(())
            }
        }
    }

    /// Sets the quantity of a line, clamped to the fruit's stock.
    ///
    /// A quantity of zero or less removes the line. Returns false if the
    /// fruit is not in the cart.
    pub fn set_quantity(&mut self, fruit_id: FruitId, quantity: i64) -> bool {
        let Some(index) = self.lines.iter().position(|l| l.fruit.id == fruit_id) else {
            return false;
        };

        if quantity <= 0 {
            self.lines.remove(index);
        } else {
            let line = &mut self.lines[index];
            line.quantity = quantity.min(line.fruit.stock);
        }
        true
    }

    /// Removes a fruit from the cart. Returns false if it was absent.
    pub fn remove(&mut self, fruit_id: FruitId) -> bool {
        self.set_quantity(fruit_id, 0)
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Sum of every line's price times quantity.
    pub fn total(&self) -> Money {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Builds the order command for this cart.
    pub fn checkout(&self, customer_name: &str) -> Result<PlaceOrder, OrderError> {
        let lines = self
            .lines
            .iter()
            .map(|l| OrderLine::new(l.fruit.id, l.quantity, l.fruit.price))
            .collect();
        let cmd = PlaceOrder::new(customer_name, lines, self.total());
        cmd.validate()?;
        Ok(cmd)
    }
}
