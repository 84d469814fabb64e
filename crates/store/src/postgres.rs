use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use common::{FruitId, Money, OrderId};
use sqlx::{PgPool, Row, postgres::PgRow};

use crate::{
    Fruit, NewFruit, NewOrder, Order, OrderItem, OrderStatus, Result, StoreError,
    store::{Store, check_stock, validate_new_order},
};

/// PostgreSQL-backed store implementation.
#[derive(Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Creates a new PostgreSQL store.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Gets a reference to the underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Runs the database migrations.
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("../../migrations").run(&self.pool).await?;
        Ok(())
    }

    fn row_to_fruit(row: PgRow) -> Result<Fruit> {
        Ok(Fruit {
            id: FruitId::new(row.try_get("id")?),
            name: row.try_get("name")?,
            price: Money::from_cents(row.try_get("price_cents")?),
            stock: row.try_get("stock")?,
        })
    }

    fn row_to_item(row: &PgRow) -> Result<OrderItem> {
        Ok(OrderItem {
            fruit_id: FruitId::new(row.try_get("fruit_id")?),
            fruit_name: row.try_get("fruit_name")?,
            quantity: row.try_get("quantity")?,
            price_at_purchase: Money::from_cents(row.try_get("price_at_purchase_cents")?),
        })
    }

    fn row_to_order(row: PgRow, items: Vec<OrderItem>) -> Result<Order> {
        let status: String = row.try_get("status")?;

        Ok(Order {
            id: OrderId::new(row.try_get("id")?),
            customer_name: row.try_get("customer_name")?,
            total_amount: Money::from_cents(row.try_get("total_amount_cents")?),
            status: status.parse().map_err(StoreError::InvalidData)?,
            created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
            items,
        })
    }

    async fn items_by_order(&self, order_ids: &[i64]) -> Result<HashMap<i64, Vec<OrderItem>>> {
        let rows = sqlx::query(
            r#"
            SELECT oi.order_id, oi.fruit_id, f.name AS fruit_name, oi.quantity, oi.price_at_purchase_cents
            FROM order_items oi
            LEFT JOIN fruits f ON f.id = oi.fruit_id
            WHERE oi.order_id = ANY($1)
            ORDER BY oi.order_id ASC, oi.position ASC
            "#,
        )
        .bind(order_ids)
        .fetch_all(&self.pool)
        .await?;

        let mut grouped: HashMap<i64, Vec<OrderItem>> = HashMap::new();
        for row in &rows {
            let order_id: i64 = row.try_get("order_id")?;
            grouped
                .entry(order_id)
                .or_default()
                .push(Self::row_to_item(row)?);
        }
        Ok(grouped)
    }
}

/// Converts a line index into the `INT` stored in `order_items.position`.
fn line_position(index: usize) -> Result<i32> {
    i32::try_from(index).map_err(|_| {
        StoreError::InvalidOrder(format!("an order cannot have more than {} lines", i32::MAX))
    })
}

#[async_trait]
impl Store for PostgresStore {
    async fn list_fruits(&self) -> Result<Vec<Fruit>> {
        let rows = sqlx::query("SELECT id, name, price_cents, stock FROM fruits ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(Self::row_to_fruit).collect()
    }

    async fn get_fruit(&self, id: FruitId) -> Result<Option<Fruit>> {
        let row = sqlx::query("SELECT id, name, price_cents, stock FROM fruits WHERE id = $1")
            .bind(id.as_i64())
            .fetch_optional(&self.pool)
            .await?;

        row.map(Self::row_to_fruit).transpose()
    }

    async fn create_fruit(&self, fruit: NewFruit) -> Result<Fruit> {
        let row = sqlx::query(
            r#"
            INSERT INTO fruits (name, price_cents, stock)
            VALUES ($1, $2, $3)
            RETURNING id, name, price_cents, stock
            "#,
        )
        .bind(&fruit.name)
        .bind(fruit.price.cents())
        .bind(fruit.stock)
        .fetch_one(&self.pool)
        .await?;

        Self::row_to_fruit(row)
    }

    async fn set_fruit_stock(&self, id: FruitId, stock: i64) -> Result<Fruit> {
        let row = sqlx::query(
            r#"
            UPDATE fruits SET stock = $1
            WHERE id = $2
            RETURNING id, name, price_cents, stock
            "#,
        )
        .bind(stock)
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Self::row_to_fruit(row),
            None => Err(StoreError::FruitNotFound(id)),
        }
    }

    async fn list_orders(&self) -> Result<Vec<Order>> {
        let rows = sqlx::query(
            r#"
            SELECT id, customer_name, total_amount_cents, status, created_at
            FROM orders
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let ids: Vec<i64> = rows
            .iter()
            .map(|row| row.try_get::<i64, _>("id"))
            .collect::<std::result::Result<_, _>>()?;
        let mut items = self.items_by_order(&ids).await?;

        rows.into_iter()
            .zip(ids)
            .map(|(row, id)| Self::row_to_order(row, items.remove(&id).unwrap_or_default()))
            .collect()
    }

    async fn get_order(&self, id: OrderId) -> Result<Option<Order>> {
        let row = sqlx::query(
            r#"
            SELECT id, customer_name, total_amount_cents, status, created_at
            FROM orders
            WHERE id = $1
            "#,
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };
        let mut items = self.items_by_order(&[id.as_i64()]).await?;
        Self::row_to_order(row, items.remove(&id.as_i64()).unwrap_or_default()).map(Some)
    }

    async fn place_order(&self, order: NewOrder) -> Result<Order> {
        validate_new_order(&order)?;

        let mut fruit_ids: Vec<i64> = order.lines.iter().map(|l| l.fruit_id.as_i64()).collect();
        fruit_ids.sort_unstable();
        fruit_ids.dedup();

        // Start a transaction
        let mut tx = self.pool.begin().await?;

        // Lock the referenced rows in id order so concurrent placements
        // serialize on stock instead of deadlocking.
        let rows = sqlx::query(
            r#"
            SELECT id, name, price_cents, stock
            FROM fruits
            WHERE id = ANY($1)
            ORDER BY id ASC
            FOR UPDATE
            "#,
        )
        .bind(&fruit_ids)
        .fetch_all(&mut *tx)
        .await?;

        let fruits: HashMap<FruitId, Fruit> = rows
            .into_iter()
            .map(|row| Self::row_to_fruit(row).map(|f| (f.id, f)))
            .collect::<Result<_>>()?;

        // Dropping `tx` on the error path rolls the transaction back.
        check_stock(&order, |id| fruits.get(&id))?;

        let order_row = sqlx::query(
            r#"
            INSERT INTO orders (customer_name, total_amount_cents, status)
            VALUES ($1, $2, $3)
            RETURNING id, created_at
            "#,
        )
        .bind(&order.customer_name)
        .bind(order.total_amount.cents())
        .bind(OrderStatus::Pending.as_str())
        .fetch_one(&mut *tx)
        .await?;

        let order_id: i64 = order_row.try_get("id")?;
        let created_at: DateTime<Utc> = order_row.try_get("created_at")?;

        let mut items = Vec::with_capacity(order.lines.len());
        for (position, line) in order.lines.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO order_items (order_id, fruit_id, position, quantity, price_at_purchase_cents)
                VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(order_id)
            .bind(line.fruit_id.as_i64())
            .bind(line_position(position)?)
            .bind(line.quantity)
            .bind(line.unit_price.cents())
            .execute(&mut *tx)
            .await?;

            sqlx::query("UPDATE fruits SET stock = stock - $1 WHERE id = $2")
                .bind(line.quantity)
                .bind(line.fruit_id.as_i64())
                .execute(&mut *tx)
                .await?;

            items.push(OrderItem {
                fruit_id: line.fruit_id,
                fruit_name: fruits.get(&line.fruit_id).map(|f| f.name.clone()),
                quantity: line.quantity,
                price_at_purchase: line.unit_price,
            });
        }

        tx.commit().await?;

        Ok(Order {
            id: OrderId::new(order_id),
            customer_name: order.customer_name,
            total_amount: order.total_amount,
            status: OrderStatus::Pending,
            created_at,
            items,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_position_fits_int_column() {
        assert_eq!(line_position(0).unwrap(), 0);
        assert_eq!(line_position(i32::MAX as usize).unwrap(), i32::MAX);
        assert!(matches!(
            line_position(i32::MAX as usize + 1),
            Err(StoreError::InvalidOrder(_))
        ));
    }
}
