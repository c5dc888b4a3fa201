use chrono::NaiveDateTime;
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder};
use serde::Serialize;
use utoipa::ToSchema;

use crate::entity::{measures, sensors};

/// A measure embedded under its sensor. The measure's own `sensor_id` is
/// projected out: it is redundant with the enclosing record.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LatestMeasure {
    pub reading_id: i32,
    pub metric_id: i32,
    pub rtime: NaiveDateTime,
    pub rvalue: f64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SensorWithLatest {
    pub sensor_id: i32,
    pub serial_code: String,
    pub name: String,
    pub latest_measure: Option<LatestMeasure>,
}

/// For every known sensor, its chronologically newest measure.
///
/// Ties on `rtime` resolve to the row with the lowest `reading_id`, so
/// repeated calls over unchanged data return the same row. Sensors with no
/// measures appear with `latest_measure: None`.
pub async fn latest_measure_per_sensor(
    db: &DatabaseConnection,
) -> Result<Vec<SensorWithLatest>, DbErr> {
    let sensor_rows = sensors::Entity::find().all(db).await?;

    let mut result = Vec::with_capacity(sensor_rows.len());
    for sensor in sensor_rows {
        let latest = measures::Entity::find()
            .filter(measures::Column::SensorId.eq(sensor.sensor_id))
            .order_by_desc(measures::Column::Rtime)
            .order_by_asc(measures::Column::ReadingId)
            .one(db)
            .await?;

        result.push(SensorWithLatest {
            sensor_id: sensor.sensor_id,
            serial_code: sensor.serial_code,
            name: sensor.name,
            latest_measure: latest.map(|m| LatestMeasure {
                reading_id: m.reading_id,
                metric_id: m.metric_id,
                rtime: m.rtime,
                rvalue: m.rvalue,
            }),
        });
    }

    Ok(result)
}
