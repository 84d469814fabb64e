//! Catalog commands.

use common::{FruitId, Money};
use store::NewFruit;

use super::CatalogError;

/// Command to add a fruit to the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateFruit {
    pub name: String,
    pub price: Money,
    pub stock: i64,
}

impl CreateFruit {
    /// Creates a new CreateFruit command.
    pub fn new(name: impl Into<String>, price: Money, stock: i64) -> Self {
        Self {
            name: name.into(),
            price,
            stock,
        }
    }

    /// Checks that every field holds an acceptable value.
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.name.trim().is_empty() {
            return Err(CatalogError::NameRequired);
        }
        if self.price.is_negative() {
            return Err(CatalogError::InvalidPrice(self.price));
        }
        if self.stock < 0 {
            return Err(CatalogError::InvalidStock(self.stock));
        }
        Ok(())
    }

    pub(crate) fn into_new_fruit(self) -> NewFruit {
        NewFruit::new(self.name.trim(), self.price, self.stock)
    }
}

/// Command to overwrite a fruit's stock with an absolute value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetFruitStock {
    pub fruit_id: FruitId,
    pub stock: i64,
}

impl SetFruitStock {
    /// Creates a new SetFruitStock command.
    pub fn new(fruit_id: FruitId, stock: i64) -> Self {
        Self { fruit_id, stock }
    }

    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.stock < 0 {
            return Err(CatalogError::InvalidStock(self.stock));
        }
        Ok(())
    }
}
