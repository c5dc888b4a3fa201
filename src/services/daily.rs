use chrono::NaiveDate;
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QuerySelect};
use serde::Serialize;
use utoipa::ToSchema;

use crate::entity::{measures, metrics, sensors};

/// Min/max of one metric's readings for one sensor on the target day.
/// Emitted only when at least one matching row exists.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MetricMinMax {
    pub metric: String,
    pub min_value: f64,
    pub max_value: f64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SensorDailyMinMax {
    pub sensor: sensors::Model,
    pub date: NaiveDate,
    pub metrics: Vec<MetricMinMax>,
}

/// Per-sensor, per-metric min/max of readings recorded on `target_date`.
///
/// A measure belongs to the day iff its stored timestamp text starts with
/// the `YYYY-MM-DD` form of the date. This is a prefix match (SQL `LIKE`),
/// not a calendar-range comparison; it is equivalent to a half-open day
/// range only because timestamps land in SQLite as zero-padded sortable
/// text.
///
/// The full sensor x metric cross product is probed with independent MIN
/// queries; the MAX query runs only when the MIN found a row. Pairs with no
/// data on the day emit no entry at all, while sensors whose metric list
/// comes out empty are still returned with `metrics: []`. Everything is
/// recomputed from scratch on each call, so cost grows as
/// sensors x metrics — a known scaling limit, acceptable for the small
/// entity counts this serves.
///
/// Values carry full stored precision; `Unit.precision` is not applied.
pub async fn daily_min_max(
    db: &DatabaseConnection,
    target_date: NaiveDate,
) -> Result<Vec<SensorDailyMinMax>, DbErr> {
    let sensor_rows = sensors::Entity::find().all(db).await?;
    let metric_rows = metrics::Entity::find().all(db).await?;

    let day_prefix = format!("{}%", target_date.format("%Y-%m-%d"));

    let mut result = Vec::with_capacity(sensor_rows.len());
    for sensor in sensor_rows {
        let mut entries = Vec::new();

        for metric in &metric_rows {
            let min_value = aggregate_rvalue(
                db,
                sensor.sensor_id,
                metric.metric_id,
                &day_prefix,
                measures::Column::Rvalue.min(),
            )
            .await?;

            let Some(min_value) = min_value else {
                continue;
            };

            let max_value = aggregate_rvalue(
                db,
                sensor.sensor_id,
                metric.metric_id,
                &day_prefix,
                measures::Column::Rvalue.max(),
            )
            .await?
            // The predicate set is identical and rows are append-only, so a
            // max exists whenever the min did.
            .unwrap_or(min_value);

            entries.push(MetricMinMax {
                metric: metric.metric_name.clone(),
                min_value,
                max_value,
            });
        }

        result.push(SensorDailyMinMax {
            sensor,
            date: target_date,
            metrics: entries,
        });
    }

    Ok(result)
}

async fn aggregate_rvalue(
    db: &DatabaseConnection,
    sensor_id: i32,
    metric_id: i32,
    day_prefix: &str,
    aggregate: sea_orm::sea_query::SimpleExpr,
) -> Result<Option<f64>, DbErr> {
    let value = measures::Entity::find()
        .select_only()
        .column_as(aggregate, "value")
        .filter(measures::Column::SensorId.eq(sensor_id))
        .filter(measures::Column::MetricId.eq(metric_id))
        .filter(measures::Column::Rtime.like(day_prefix))
        .into_tuple::<Option<f64>>()
        .one(db)
        .await?;

    // Aggregates over an empty set come back as a single NULL row.
    Ok(value.flatten())
}
