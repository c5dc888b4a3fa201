//! Shared fixtures: in-memory SQLite with the real migrations applied, plus
//! a small seeded dataset exercised by the query and HTTP tests.

#![allow(dead_code)]

use chrono::NaiveDateTime;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, EntityTrait, Set};
use sea_orm_migration::MigratorTrait;

use enviro_db::common::AppState;
use enviro_db::config::{Config, Deployment, UserRecord};
use enviro_db::entity::{measures, metrics, sensors, units};

pub fn ts(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").expect("test timestamp")
}

/// Fresh in-memory database with the schema applied. A single pooled
/// connection keeps every query on the same SQLite memory instance.
pub async fn setup_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1);

    let db = Database::connect(options).await.expect("connect sqlite");
    migration::Migrator::up(&db, None).await.expect("migrate");
    db
}

/// Seeds:
/// - sensors 22 (greenhouse), 7 (cellar), 31 (attic, zero measures)
/// - metrics 1 (temperature), 2 (humidity)
/// - sensor 22: temperature on 2019-07-02, humidity on 2019-07-28
/// - sensor 7: readings only on 2019-07-27, with a tie at its max rtime
pub async fn seed(db: &DatabaseConnection) {
    units::Entity::insert_many([
        units::ActiveModel {
            unit_id: Set(1),
            unit_name: Set("celsius".to_string()),
            precision: Set(1),
        },
        units::ActiveModel {
            unit_id: Set(2),
            unit_name: Set("percent".to_string()),
            precision: Set(0),
        },
    ])
    .exec(db)
    .await
    .expect("seed units");

    sensors::Entity::insert_many([
        sensors::ActiveModel {
            sensor_id: Set(22),
            serial_code: Set("AR-022".to_string()),
            name: Set("greenhouse".to_string()),
        },
        sensors::ActiveModel {
            sensor_id: Set(7),
            serial_code: Set("AR-007".to_string()),
            name: Set("cellar".to_string()),
        },
        sensors::ActiveModel {
            sensor_id: Set(31),
            serial_code: Set("AR-031".to_string()),
            name: Set("attic".to_string()),
        },
    ])
    .exec(db)
    .await
    .expect("seed sensors");

    metrics::Entity::insert_many([
        metrics::ActiveModel {
            metric_id: Set(1),
            metric_name: Set("temperature".to_string()),
            unit_id: Set(1),
        },
        metrics::ActiveModel {
            metric_id: Set(2),
            metric_name: Set("humidity".to_string()),
            unit_id: Set(2),
        },
    ])
    .exec(db)
    .await
    .expect("seed metrics");

    measures::Entity::insert_many([
        measure(101, 22, 1, "2019-07-02 03:00:00", 25.0),
        measure(102, 22, 1, "2019-07-02 06:00:00", 24.5),
        measure(103, 7, 1, "2019-07-27 10:00:00", 18.0),
        measure(104, 22, 2, "2019-07-28 09:00:00", 55.0),
        measure(105, 22, 2, "2019-07-28 21:30:00", 40.0),
        // Identical max rtime for sensor 7: the tie-break must be stable
        measure(106, 7, 2, "2019-07-27 12:00:00", 60.0),
        measure(107, 7, 2, "2019-07-27 12:00:00", 61.0),
    ])
    .exec(db)
    .await
    .expect("seed measures");
}

pub fn measure(
    reading_id: i32,
    sensor_id: i32,
    metric_id: i32,
    rtime: &str,
    rvalue: f64,
) -> measures::ActiveModel {
    measures::ActiveModel {
        reading_id: Set(reading_id),
        sensor_id: Set(sensor_id),
        metric_id: Set(metric_id),
        rtime: Set(ts(rtime)),
        rvalue: Set(rvalue),
    }
}

pub fn test_config() -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        api_host: "127.0.0.1".to_string(),
        api_port: 0,
        auth_users: vec![
            UserRecord {
                username: "alvin_admin".to_string(),
                password: "password123".to_string(),
                role: "admin".to_string(),
            },
            UserRecord {
                username: "dana".to_string(),
                password: "plainpass".to_string(),
                role: "user".to_string(),
            },
        ],
        deployment: Deployment::Local,
    }
}

pub async fn setup_state() -> AppState {
    let db = setup_db().await;
    seed(&db).await;
    AppState::new(db, test_config())
}
