//! Sales analytics endpoint.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use reporting::{SalesGranularity, SalesReport};
use serde::Deserialize;
use store::Store;

use super::AppState;
use crate::error::ApiError;

#[derive(Debug, Default, Deserialize)]
pub struct AnalyticsQuery {
    /// `day` (default) or `timestamp`.
    pub granularity: Option<String>,
}

/// GET /analytics: daily sales and per-fruit sales.
#[tracing::instrument(skip(state))]
pub async fn get<S: Store + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Query(query): Query<AnalyticsQuery>,
) -> Result<Json<SalesReport>, ApiError> {
    let granularity = match query.granularity.as_deref() {
        Some(raw) => raw.parse::<SalesGranularity>()?,
        None => SalesGranularity::default(),
    };
    Ok(Json(state.analytics_service.report(granularity).await?))
}
