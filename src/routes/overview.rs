use axum::{
    Json,
    extract::{Query, State},
};
use sea_orm::{EntityTrait, QuerySelect};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::common::AppState;
use crate::entity::{measures, metrics, sensors, units};
use crate::error::{AppError, AppResult};

/// The overview page never returns more than this many rows per table.
const MAX_LIMIT: u64 = 3;

#[derive(Debug, Deserialize, IntoParams)]
pub struct OverviewQuery {
    /// Rows to skip in each table listing
    #[serde(default)]
    pub offset: u64,
    /// Rows to return per table (max 3)
    pub limit: Option<u64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OverviewResponse {
    pub measures: Vec<measures::Model>,
    pub metrics: Vec<metrics::Model>,
    pub sensors: Vec<sensors::Model>,
    pub units: Vec<units::Model>,
}

/// Sample rows from every table
///
/// Returns the first `limit` rows (after `offset`) of the measures,
/// metrics, sensors, and units tables.
#[utoipa::path(
    get,
    path = "/",
    params(OverviewQuery),
    responses(
        (status = 200, description = "Overview retrieved successfully", body = OverviewResponse),
        (status = 400, description = "Limit above the allowed maximum"),
    ),
    tag = "overview"
)]
pub async fn overview(
    State(state): State<AppState>,
    Query(query): Query<OverviewQuery>,
) -> AppResult<Json<OverviewResponse>> {
    let limit = query.limit.unwrap_or(MAX_LIMIT);
    if limit > MAX_LIMIT {
        return Err(AppError::BadRequest(format!(
            "limit must be less than or equal to {MAX_LIMIT}"
        )));
    }

    let measures_list = measures::Entity::find()
        .offset(query.offset)
        .limit(limit)
        .all(&state.db)
        .await?;
    let metrics_list = metrics::Entity::find()
        .offset(query.offset)
        .limit(limit)
        .all(&state.db)
        .await?;
    let sensors_list = sensors::Entity::find()
        .offset(query.offset)
        .limit(limit)
        .all(&state.db)
        .await?;
    let units_list = units::Entity::find()
        .offset(query.offset)
        .limit(limit)
        .all(&state.db)
        .await?;

    Ok(Json(OverviewResponse {
        measures: measures_list,
        metrics: metrics_list,
        sensors: sensors_list,
        units: units_list,
    }))
}
