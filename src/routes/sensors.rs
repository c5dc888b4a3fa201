use axum::{Json, extract::State};

use crate::common::AppState;
use crate::error::AppResult;
use crate::services::latest::{self, SensorWithLatest};

/// List all sensors with their most recent measure
///
/// Sensors that have never reported appear with `latest_measure: null`.
#[utoipa::path(
    get,
    path = "/sensorList",
    responses(
        (status = 200, description = "Sensors retrieved successfully", body = Vec<SensorWithLatest>),
    ),
    tag = "sensors"
)]
pub async fn sensor_list(State(state): State<AppState>) -> AppResult<Json<Vec<SensorWithLatest>>> {
    let sensors = latest::latest_measure_per_sensor(&state.db).await?;
    Ok(Json(sensors))
}
