//! Order placement and ledger endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use domain::{
    FruitId, Money, Order, OrderId, OrderItem, OrderLine, OrderStatus, PlaceOrder,
};
use serde::{Deserialize, Serialize};
use store::Store;

use super::AppState;
use crate::error::ApiError;

// -- Request types --

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderRequest {
    pub customer_name: String,
    pub items: Vec<OrderItemRequest>,
    /// Caller-computed total; derived from the items when absent.
    pub total_amount: Option<Money>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemRequest {
    pub fruit_id: FruitId,
    pub quantity: i64,
    #[serde(alias = "unitPrice")]
    pub price: Money,
}

impl PlaceOrderRequest {
    fn into_command(self) -> PlaceOrder {
        let lines = self
            .items
            .into_iter()
            .map(|item| OrderLine::new(item.fruit_id, item.quantity, item.price))
            .collect();
        match self.total_amount {
            Some(total) => PlaceOrder::new(self.customer_name, lines, total),
            None => PlaceOrder::with_computed_total(self.customer_name, lines),
        }
    }
}

// -- Response types --

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub id: OrderId,
    pub customer_name: String,
    pub total_amount: Money,
    pub total_display: String,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub items: Vec<OrderItemResponse>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemResponse {
    pub fruit_id: FruitId,
    pub fruit_name: Option<String>,
    pub quantity: i64,
    pub price_at_purchase: Money,
    pub line_total: Money,
}

impl From<OrderItem> for OrderItemResponse {
    fn from(item: OrderItem) -> Self {
        Self {
            line_total: item.line_total(),
            fruit_id: item.fruit_id,
            fruit_name: item.fruit_name,
            quantity: item.quantity,
            price_at_purchase: item.price_at_purchase,
        }
    }
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            id: order.id,
            customer_name: order.customer_name,
            total_amount: order.total_amount,
            total_display: order.total_amount.to_string(),
            status: order.status,
            created_at: order.created_at,
            items: order.items.into_iter().map(OrderItemResponse::from).collect(),
        }
    }
}

// -- Handlers --

/// POST /orders: place an order and decrement stock atomically.
#[tracing::instrument(skip(state, payload))]
pub async fn create<S: Store + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    payload: Result<Json<PlaceOrderRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<OrderResponse>), ApiError> {
    let Json(req) = payload?;
    let order = state.order_service.place_order(req.into_command()).await?;
    Ok((StatusCode::CREATED, Json(order.into())))
}

/// GET /orders: every order with its items, newest first.
#[tracing::instrument(skip(state))]
pub async fn list<S: Store + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<Vec<OrderResponse>>, ApiError> {
    let orders = state.order_service.list_orders().await?;
    Ok(Json(orders.into_iter().map(OrderResponse::from).collect()))
}

/// GET /orders/{id}: load one order.
#[tracing::instrument(skip(state, id))]
pub async fn get<S: Store + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<OrderResponse>, ApiError> {
    let Path(id) = id?;
    let order = state.order_service.get_order(OrderId::new(id)).await?;
    Ok(Json(order.into()))
}
