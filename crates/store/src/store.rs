use std::collections::HashMap;

use async_trait::async_trait;
use common::{FruitId, OrderId};

use crate::{Fruit, NewFruit, NewOrder, Order, Result, StoreError};

/// Core trait for catalog and ledger storage.
///
/// One implementation is constructed at process start and shared by every
/// request. All implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait Store: Send + Sync {
    /// Lists every fruit in the catalog, ordered by id.
    async fn list_fruits(&self) -> Result<Vec<Fruit>>;

    /// Retrieves a single fruit.
    ///
    /// Returns None if the fruit doesn't exist.
    async fn get_fruit(&self, id: FruitId) -> Result<Option<Fruit>>;

    /// Adds a fruit to the catalog and returns it with its assigned id.
    async fn create_fruit(&self, fruit: NewFruit) -> Result<Fruit>;

    /// Overwrites a fruit's stock with an absolute value.
    ///
    /// Fails with `FruitNotFound` if the id is unknown.
    async fn set_fruit_stock(&self, id: FruitId, stock: i64) -> Result<Fruit>;

    /// Lists every order with its items, newest first.
    async fn list_orders(&self) -> Result<Vec<Order>>;

    /// Retrieves a single order with its items.
    async fn get_order(&self, id: OrderId) -> Result<Option<Order>>;

    /// Places an order.
    ///
    /// Stock validation, creation of the order and its items, and the stock
    /// decrements happen as one atomic unit: either all of them take
    /// effect or none do. Concurrent calls can never drive stock below
    /// zero.
    async fn place_order(&self, order: NewOrder) -> Result<Order>;
}

/// Extension trait providing convenience methods for stores.
#[async_trait]
pub trait StoreExt: Store {
    /// Retrieves a fruit, failing with `FruitNotFound` if it is absent.
    async fn require_fruit(&self, id: FruitId) -> Result<Fruit> {
        self.get_fruit(id)
            .await?
            .ok_or(StoreError::FruitNotFound(id))
    }

    /// Inserts every fruit of `fruits` into the catalog.
    async fn seed(&self, fruits: Vec<NewFruit>) -> Result<Vec<Fruit>> {
        let mut created = Vec::with_capacity(fruits.len());
        for fruit in fruits {
            created.push(self.create_fruit(fruit).await?);
        }
        Ok(created)
    }
}

// Blanket implementation for all Store implementations
impl<T: Store + ?Sized> StoreExt for T {}

/// Structural checks applied before an order touches storage.
pub fn validate_new_order(order: &NewOrder) -> Result<()> {
    if order.lines.is_empty() {
        return Err(StoreError::InvalidOrder(
            "an order needs at least one line".to_string(),
        ));
    }

    if let Some(line) = order.lines.iter().find(|l| l.quantity <= 0) {
        return Err(StoreError::InvalidOrder(format!(
            "quantity for fruit {} must be positive, got {}",
            line.fruit_id, line.quantity
        )));
    }

    Ok(())
}

/// Checks every line of `order` against current stock, in line order.
///
/// Lines naming the same fruit are checked against their cumulative
/// demand. The first failing line decides the error.
pub fn check_stock<'a, F>(order: &NewOrder, lookup: F) -> Result<()>
where
    F: Fn(FruitId) -> Option<&'a Fruit>,
{
    let mut demanded: HashMap<FruitId, i64> = HashMap::new();

    for line in &order.lines {
        let fruit = lookup(line.fruit_id).ok_or(StoreError::FruitNotFound(line.fruit_id))?;

        let requested = demanded.entry(line.fruit_id).or_insert(0);
        // Demand past i64::MAX exceeds any stock; report it saturated.
        match requested.checked_add(line.quantity) {
            Some(total) if total <= fruit.stock => *requested = total,
            total => {
                return Err(StoreError::InsufficientStock {
                    fruit_id: fruit.id,
                    fruit_name: fruit.name.clone(),
                    requested: total.unwrap_or(i64::MAX),
                    available: fruit.stock,
                });
            }
        }
    }

    Ok(())
}
