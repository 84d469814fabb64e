//! Catalog endpoints: list, create and admin stock edits.

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use domain::{CreateFruit, Fruit, FruitId, Money, SetFruitStock};
use serde::{Deserialize, Deserializer};
use store::Store;

use super::AppState;
use crate::error::ApiError;

// -- Request types --

#[derive(Debug, Deserialize)]
pub struct CreateFruitRequest {
    pub name: String,
    pub price: Money,
    #[serde(deserialize_with = "deserialize_stock")]
    pub stock: i64,
}

/// Body of `PUT /fruits`.
#[derive(Debug, Deserialize)]
pub struct UpdateFruitRequest {
    pub id: FruitId,
    #[serde(deserialize_with = "deserialize_stock")]
    pub stock: i64,
}

/// Body of `PUT /fruits/{id}/stock`.
#[derive(Debug, Deserialize)]
pub struct SetStockRequest {
    #[serde(deserialize_with = "deserialize_stock")]
    pub stock: i64,
}

/// Accepts a stock count as a JSON integer or as numeric text.
fn deserialize_stock<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawStock {
        Number(i64),
        Text(String),
    }

    match RawStock::deserialize(deserializer)? {
        RawStock::Number(n) => Ok(n),
        RawStock::Text(text) => text
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid stock value '{text}'"))),
    }
}

// -- Handlers --

/// GET /fruits: list the catalog.
#[tracing::instrument(skip(state))]
pub async fn list<S: Store + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<Vec<Fruit>>, ApiError> {
    Ok(Json(state.catalog_service.list_fruits().await?))
}

/// GET /fruits/{id}: load a single fruit.
#[tracing::instrument(skip(state, id))]
pub async fn get<S: Store + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Fruit>, ApiError> {
    let Path(id) = id?;
    Ok(Json(state.catalog_service.get_fruit(FruitId::new(id)).await?))
}

/// POST /fruits: add a fruit to the catalog.
#[tracing::instrument(skip(state, payload))]
pub async fn create<S: Store + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    payload: Result<Json<CreateFruitRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Fruit>), ApiError> {
    let Json(req) = payload?;
    let fruit = state
        .catalog_service
        .create_fruit(CreateFruit::new(req.name, req.price, req.stock))
        .await?;
    Ok((StatusCode::CREATED, Json(fruit)))
}

/// PUT /fruits: set the stock of the fruit named in the body.
#[tracing::instrument(skip(state, payload))]
pub async fn update<S: Store + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    payload: Result<Json<UpdateFruitRequest>, JsonRejection>,
) -> Result<Json<Fruit>, ApiError> {
    let Json(req) = payload?;
    let fruit = state
        .catalog_service
        .set_fruit_stock(SetFruitStock::new(req.id, req.stock))
        .await?;
    Ok(Json(fruit))
}

/// PUT /fruits/{id}/stock: set the stock of one fruit.
#[tracing::instrument(skip(state, id, payload))]
pub async fn set_stock<S: Store + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<SetStockRequest>, JsonRejection>,
) -> Result<Json<Fruit>, ApiError> {
    let Path(id) = id?;
    let Json(req) = payload?;
    let fruit = state
        .catalog_service
        .set_fruit_stock(SetFruitStock::new(FruitId::new(id), req.stock))
        .await?;
    Ok(Json(fruit))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stock_accepts_numbers_and_numeric_text() {
        let req: SetStockRequest = serde_json::from_str(r#"{"stock": 12}"#).unwrap();
        assert_eq!(req.stock, 12);

        let req: SetStockRequest = serde_json::from_str(r#"{"stock": " 7 "}"#).unwrap();
        assert_eq!(req.stock, 7);

        assert!(serde_json::from_str::<SetStockRequest>(r#"{"stock": "lots"}"#).is_err());
    }

    #[test]
    fn create_request_reads_decimal_price() {
        let req: CreateFruitRequest =
            serde_json::from_str(r#"{"name": "Kiwi", "price": 0.75, "stock": "10"}"#).unwrap();
        assert_eq!(req.price, Money::from_cents(75));
        assert_eq!(req.stock, 10);
    }
}
