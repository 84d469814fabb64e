use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use common::{FruitId, OrderId};
use tokio::sync::RwLock;

use crate::{
    Fruit, NewFruit, NewOrder, Order, OrderItem, OrderStatus, Result, StoreError,
    store::{Store, check_stock, validate_new_order},
};

#[derive(Debug, Default)]
struct MemoryState {
    fruits: BTreeMap<FruitId, Fruit>,
    /// Orders in placement order; ids are ascending.
    orders: Vec<Order>,
    last_fruit_id: i64,
    last_order_id: i64,
    fail_on_place_order: bool,
}

impl MemoryState {
    fn with_current_names(&self, mut order: Order) -> Order {
        for item in &mut order.items {
            item.fruit_name = self.fruits.get(&item.fruit_id).map(|f| f.name.clone());
        }
        order
    }
}

/// In-memory store implementation.
///
/// Provides the same interface as the PostgreSQL implementation. Every
/// write takes the single state lock, so an order placement observes and
/// mutates stock without interleaving with other writers.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    state: Arc<RwLock<MemoryState>>,
}

impl InMemoryStore {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of orders in the ledger.
    pub async fn order_count(&self) -> usize {
        self.state.read().await.orders.len()
    }

    /// Configures the store to fail every subsequent `place_order` call.
    pub async fn set_fail_on_place_order(&self, fail: bool) {
        self.state.write().await.fail_on_place_order = fail;
    }
}

#[async_trait]
impl Store for InMemoryStore {
    async fn list_fruits(&self) -> Result<Vec<Fruit>> {
        Ok(self.state.read().await.fruits.values().cloned().collect())
    }

    async fn get_fruit(&self, id: FruitId) -> Result<Option<Fruit>> {
        Ok(self.state.read().await.fruits.get(&id).cloned())
    }

    async fn create_fruit(&self, fruit: NewFruit) -> Result<Fruit> {
        let mut state = self.state.write().await;
        state.last_fruit_id += 1;

        let fruit = Fruit {
            id: FruitId::new(state.last_fruit_id),
            name: fruit.name,
            price: fruit.price,
            stock: fruit.stock,
        };
        state.fruits.insert(fruit.id, fruit.clone());
        Ok(fruit)
    }

    async fn set_fruit_stock(&self, id: FruitId, stock: i64) -> Result<Fruit> {
        let mut state = self.state.write().await;
        let fruit = state
            .fruits
            .get_mut(&id)
            .ok_or(StoreError::FruitNotFound(id))?;
        fruit.stock = stock;
        Ok(fruit.clone())
    }

    async fn list_orders(&self) -> Result<Vec<Order>> {
        let state = self.state.read().await;
        Ok(state
            .orders
            .iter()
            .rev()
            .map(|o| state.with_current_names(o.clone()))
            .collect())
    }

    async fn get_order(&self, id: OrderId) -> Result<Option<Order>> {
        let state = self.state.read().await;
        Ok(state
            .orders
            .iter()
            .find(|o| o.id == id)
            .map(|o| state.with_current_names(o.clone())))
    }

    async fn place_order(&self, order: NewOrder) -> Result<Order> {
        validate_new_order(&order)?;

        let mut state = self.state.write().await;

        if state.fail_on_place_order {
            return Err(StoreError::Unavailable(
                "order ledger is not accepting writes".to_string(),
            ));
        }

        check_stock(&order, |id| state.fruits.get(&id))?;

        state.last_order_id += 1;
        let items = order
            .lines
            .iter()
            .map(|line| OrderItem {
                fruit_id: line.fruit_id,
                fruit_name: state.fruits.get(&line.fruit_id).map(|f| f.name.clone()),
                quantity: line.quantity,
                price_at_purchase: line.unit_price,
            })
            .collect();
        let placed = Order {
            id: OrderId::new(state.last_order_id),
            customer_name: order.customer_name,
            total_amount: order.total_amount,
            status: OrderStatus::Pending,
            created_at: Utc::now(),
            items,
        };

        for line in &order.lines {
            if let Some(fruit) = state.fruits.get_mut(&line.fruit_id) {
                fruit.stock -= line.quantity;
            }
        }
        state.orders.push(placed.clone());

        tracing::debug!(order_id = %placed.id, "order stored in memory");
        Ok(placed)
    }
}
