//! Integration tests for the query engine and aggregation services against
//! in-memory SQLite.

mod common;

use chrono::NaiveDate;
use common::{measure, seed, setup_db, ts};
use sea_orm::EntityTrait;

use enviro_db::entity::measures;
use enviro_db::services::daily::daily_min_max;
use enviro_db::services::latest::latest_measure_per_sensor;
use enviro_db::services::query::{MeasureFilter, filter_measures};

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("test date")
}

#[tokio::test]
async fn sensor_id_filter_returns_exactly_that_sensors_measures() {
    let db = setup_db().await;
    seed(&db).await;

    let filter = MeasureFilter {
        sensor_id: Some(22),
        ..Default::default()
    };
    let rows = filter_measures(&db, &filter).await.unwrap();

    let mut ids: Vec<i32> = rows.iter().map(|m| m.reading_id).collect();
    ids.sort_unstable();
    assert_eq!(ids, vec![101, 102, 104, 105]);
    assert!(rows.iter().all(|m| m.sensor_id == 22));
}

#[tokio::test]
async fn empty_filter_scans_every_measure_once() {
    let db = setup_db().await;
    seed(&db).await;

    let rows = filter_measures(&db, &MeasureFilter::default()).await.unwrap();

    let mut ids: Vec<i32> = rows.iter().map(|m| m.reading_id).collect();
    ids.sort_unstable();
    assert_eq!(ids, vec![101, 102, 103, 104, 105, 106, 107]);
}

#[tokio::test]
async fn six_predicate_conjunction_keeps_both_matching_rows() {
    let db = setup_db().await;
    seed(&db).await;

    let filter = MeasureFilter {
        sensor_id: Some(22),
        metric_id: Some(1),
        time_from: Some(ts("2019-07-02 01:00:00")),
        time_to: Some(ts("2019-07-02 07:00:00")),
        value_from: Some(24.0),
        value_to: Some(26.0),
    };
    let rows = filter_measures(&db, &filter).await.unwrap();

    let mut ids: Vec<i32> = rows.iter().map(|m| m.reading_id).collect();
    ids.sort_unstable();
    assert_eq!(ids, vec![101, 102]);
}

#[tokio::test]
async fn range_bounds_are_inclusive() {
    let db = setup_db().await;
    seed(&db).await;

    // Bounds sit exactly on the stored values
    let filter = MeasureFilter {
        sensor_id: Some(22),
        metric_id: Some(1),
        value_from: Some(24.5),
        value_to: Some(25.0),
        ..Default::default()
    };
    let rows = filter_measures(&db, &filter).await.unwrap();
    assert_eq!(rows.len(), 2);

    let filter = MeasureFilter {
        sensor_id: Some(22),
        metric_id: Some(1),
        time_from: Some(ts("2019-07-02 03:00:00")),
        time_to: Some(ts("2019-07-02 06:00:00")),
        ..Default::default()
    };
    let rows = filter_measures(&db, &filter).await.unwrap();
    assert_eq!(rows.len(), 2);
}

#[tokio::test]
async fn sensor_without_measures_yields_absent_latest() {
    let db = setup_db().await;
    seed(&db).await;

    let list = latest_measure_per_sensor(&db).await.unwrap();
    let attic = list.iter().find(|s| s.sensor_id == 31).unwrap();

    assert_eq!(attic.serial_code, "AR-031");
    assert!(attic.latest_measure.is_none());
}

#[tokio::test]
async fn latest_measure_picks_the_newest_timestamp() {
    let db = setup_db().await;
    seed(&db).await;

    let list = latest_measure_per_sensor(&db).await.unwrap();
    let greenhouse = list.iter().find(|s| s.sensor_id == 22).unwrap();

    let latest = greenhouse.latest_measure.as_ref().unwrap();
    assert_eq!(latest.reading_id, 105);
    assert_eq!(latest.rtime, ts("2019-07-28 21:30:00"));
}

#[tokio::test]
async fn latest_measure_tie_break_is_deterministic() {
    let db = setup_db().await;
    seed(&db).await;

    // Readings 106 and 107 share sensor 7's max rtime; the lowest
    // reading_id wins, every time.
    for _ in 0..3 {
        let list = latest_measure_per_sensor(&db).await.unwrap();
        let cellar = list.iter().find(|s| s.sensor_id == 7).unwrap();
        assert_eq!(cellar.latest_measure.as_ref().unwrap().reading_id, 106);
    }
}

#[tokio::test]
async fn daily_min_max_reports_only_metrics_with_data() {
    let db = setup_db().await;
    seed(&db).await;

    let aggregates = daily_min_max(&db, date("2019-07-28")).await.unwrap();

    // Every sensor appears, even with nothing to report
    assert_eq!(aggregates.len(), 3);

    let greenhouse = aggregates
        .iter()
        .find(|a| a.sensor.sensor_id == 22)
        .unwrap();
    assert_eq!(greenhouse.metrics.len(), 1);
    assert_eq!(greenhouse.metrics[0].metric, "humidity");
    assert_eq!(greenhouse.metrics[0].min_value, 40.0);
    assert_eq!(greenhouse.metrics[0].max_value, 55.0);

    // Sensor 7 only has readings on the 27th: empty list, no null entries
    let cellar = aggregates.iter().find(|a| a.sensor.sensor_id == 7).unwrap();
    assert!(cellar.metrics.is_empty());

    let attic = aggregates.iter().find(|a| a.sensor.sensor_id == 31).unwrap();
    assert!(attic.metrics.is_empty());
}

#[tokio::test]
async fn daily_min_max_orders_min_below_max() {
    let db = setup_db().await;
    seed(&db).await;

    for day in ["2019-07-02", "2019-07-27", "2019-07-28"] {
        let aggregates = daily_min_max(&db, date(day)).await.unwrap();
        for sensor in &aggregates {
            for entry in &sensor.metrics {
                assert!(entry.min_value <= entry.max_value, "{day}: {entry:?}");
            }
        }
    }
}

#[tokio::test]
async fn daily_min_max_single_reading_collapses_to_itself() {
    let db = setup_db().await;
    seed(&db).await;

    let aggregates = daily_min_max(&db, date("2019-07-02")).await.unwrap();
    let greenhouse = aggregates
        .iter()
        .find(|a| a.sensor.sensor_id == 22)
        .unwrap();

    assert_eq!(greenhouse.metrics.len(), 1);
    assert_eq!(greenhouse.metrics[0].metric, "temperature");
    assert_eq!(greenhouse.metrics[0].min_value, 24.5);
    assert_eq!(greenhouse.metrics[0].max_value, 25.0);
}

#[tokio::test]
async fn day_membership_is_a_prefix_match() {
    let db = setup_db().await;
    seed(&db).await;

    // One second before midnight belongs to the 27th; midnight itself to
    // the 28th.
    measures::Entity::insert_many([
        measure(201, 31, 1, "2019-07-27 23:59:59", 1.0),
        measure(202, 31, 1, "2019-07-28 00:00:00", 2.0),
    ])
    .exec(&db)
    .await
    .unwrap();

    let aggregates = daily_min_max(&db, date("2019-07-28")).await.unwrap();
    let attic = aggregates.iter().find(|a| a.sensor.sensor_id == 31).unwrap();

    assert_eq!(attic.metrics.len(), 1);
    assert_eq!(attic.metrics[0].min_value, 2.0);
    assert_eq!(attic.metrics[0].max_value, 2.0);
}
