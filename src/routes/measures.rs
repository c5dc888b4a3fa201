use axum::{
    Json,
    extract::{Query, State},
};
use chrono::{NaiveDate, NaiveDateTime, Utc};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::auth::{AdminUser, AuthenticatedUser};
use crate::common::AppState;
use crate::entity::measures;
use crate::error::{AppError, AppResult};
use crate::services::daily::{self, SensorDailyMinMax};
use crate::services::query::{self, MeasureFilter};

#[derive(Debug, Deserialize, IntoParams)]
pub struct SensorMinMaxQuery {
    /// Target calendar day (YYYY-MM-DD). Defaults to the current UTC date.
    pub target_date: Option<String>,
}

/// Daily min/max per sensor and metric
///
/// Requires any authenticated caller. Metrics with no readings on the
/// target day are omitted from each sensor's list.
#[utoipa::path(
    get,
    path = "/sensorMinMax",
    params(SensorMinMaxQuery),
    responses(
        (status = 200, description = "Aggregates retrieved successfully", body = Vec<SensorDailyMinMax>),
        (status = 400, description = "Malformed target_date"),
        (status = 401, description = "Missing or invalid bearer token"),
    ),
    security(("bearer_token" = [])),
    tag = "measures"
)]
pub async fn sensor_min_max(
    State(state): State<AppState>,
    AuthenticatedUser(identity): AuthenticatedUser,
    Query(query): Query<SensorMinMaxQuery>,
) -> AppResult<Json<Vec<SensorDailyMinMax>>> {
    // Resolved once here; the aggregation below sees a single fixed date.
    let target_date = match query.target_date.as_deref() {
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
            AppError::BadRequest(format!("target_date '{raw}' is not a YYYY-MM-DD date"))
        })?,
        None => Utc::now().date_naive(),
    };

    tracing::debug!(user = %identity.username, date = %target_date, "daily min/max requested");

    let aggregates = daily::daily_min_max(&state.db, target_date).await?;
    Ok(Json(aggregates))
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct MeasureFilterQuery {
    /// Restrict to one sensor
    pub target_sensor_id: Option<i32>,
    /// Restrict to one metric
    pub target_metric_id: Option<i32>,
    /// Inclusive lower bound on reading time
    pub time_from: Option<String>,
    /// Inclusive upper bound on reading time
    pub time_to: Option<String>,
    /// Inclusive lower bound on reading value
    pub value_from: Option<f64>,
    /// Inclusive upper bound on reading value
    pub value_to: Option<f64>,
}

/// Filter raw measures
///
/// Requires an admin caller. All predicates are optional and AND-composed;
/// with none set this returns the entire measures table.
#[utoipa::path(
    get,
    path = "/measureFilter",
    params(MeasureFilterQuery),
    responses(
        (status = 200, description = "Measures retrieved successfully", body = Vec<measures::Model>),
        (status = 400, description = "Malformed timestamp parameter"),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 403, description = "Caller is not an admin"),
    ),
    security(("bearer_token" = [])),
    tag = "measures"
)]
pub async fn measure_filter(
    State(state): State<AppState>,
    AdminUser(identity): AdminUser,
    Query(params): Query<MeasureFilterQuery>,
) -> AppResult<Json<Vec<measures::Model>>> {
    let filter = MeasureFilter {
        sensor_id: params.target_sensor_id,
        metric_id: params.target_metric_id,
        time_from: params
            .time_from
            .as_deref()
            .map(|raw| parse_timestamp("time_from", raw))
            .transpose()?,
        time_to: params
            .time_to
            .as_deref()
            .map(|raw| parse_timestamp("time_to", raw))
            .transpose()?,
        value_from: params.value_from,
        value_to: params.value_to,
    };

    if filter == MeasureFilter::default() {
        tracing::warn!(user = %identity.username, "unfiltered measure scan requested");
    }

    let measures_list = query::filter_measures(&state.db, &filter).await?;
    Ok(Json(measures_list))
}

/// Accepts `YYYY-MM-DD HH:MM:SS` as the original service did, plus the
/// ISO-8601 `T` separator form.
fn parse_timestamp(field: &str, raw: &str) -> Result<NaiveDateTime, AppError> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S"))
        .map_err(|_| {
            AppError::BadRequest(format!(
                "{field} '{raw}' is not a YYYY-MM-DD HH:MM:SS timestamp"
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::parse_timestamp;

    #[test]
    fn accepts_space_and_t_separators() {
        let a = parse_timestamp("time_from", "2019-07-02 01:00:00").unwrap();
        let b = parse_timestamp("time_from", "2019-07-02T01:00:00").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn rejects_bare_dates_and_garbage() {
        assert!(parse_timestamp("time_to", "2019-07-02").is_err());
        assert!(parse_timestamp("time_to", "not-a-time").is_err());
    }
}
