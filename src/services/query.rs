use chrono::NaiveDateTime;
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter};

use crate::entity::measures;

/// Conjunction of optional predicates over the measures table. Absent
/// fields do not constrain the result; all bounds are inclusive.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeasureFilter {
    pub sensor_id: Option<i32>,
    pub metric_id: Option<i32>,
    pub time_from: Option<NaiveDateTime>,
    pub time_to: Option<NaiveDateTime>,
    pub value_from: Option<f64>,
    pub value_to: Option<f64>,
}

/// Return every measure satisfying all present predicates of `filter`.
///
/// With an empty filter this is an unbounded scan of the whole table; there
/// is no implicit limit or pagination, and the result order is unspecified.
pub async fn filter_measures(
    db: &DatabaseConnection,
    filter: &MeasureFilter,
) -> Result<Vec<measures::Model>, DbErr> {
    let mut query = measures::Entity::find();

    if let Some(sensor_id) = filter.sensor_id {
        query = query.filter(measures::Column::SensorId.eq(sensor_id));
    }

    if let Some(metric_id) = filter.metric_id {
        query = query.filter(measures::Column::MetricId.eq(metric_id));
    }

    if let Some(time_from) = filter.time_from {
        query = query.filter(measures::Column::Rtime.gte(time_from));
    }

    if let Some(time_to) = filter.time_to {
        query = query.filter(measures::Column::Rtime.lte(time_to));
    }

    if let Some(value_from) = filter.value_from {
        query = query.filter(measures::Column::Rvalue.gte(value_from));
    }

    if let Some(value_to) = filter.value_to {
        query = query.filter(measures::Column::Rvalue.lte(value_to));
    }

    query.all(db).await
}
