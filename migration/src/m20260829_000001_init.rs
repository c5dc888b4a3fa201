use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ========== UNITS ==========
        manager
            .create_table(
                Table::create()
                    .table(Units::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Units::UnitId)
                            .integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Units::UnitName).string_len(64).not_null())
                    .col(ColumnDef::new(Units::Precision).integer().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("units_unit_name_idx")
                    .table(Units::Table)
                    .col(Units::UnitName)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("units_precision_idx")
                    .table(Units::Table)
                    .col(Units::Precision)
                    .to_owned(),
            )
            .await?;

        // ========== SENSORS ==========
        manager
            .create_table(
                Table::create()
                    .table(Sensors::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Sensors::SensorId)
                            .integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Sensors::SerialCode)
                            .string_len(64)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Sensors::Name).string_len(64).not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("sensors_serial_code_idx")
                    .table(Sensors::Table)
                    .col(Sensors::SerialCode)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("sensors_name_idx")
                    .table(Sensors::Table)
                    .col(Sensors::Name)
                    .to_owned(),
            )
            .await?;

        // ========== METRICS ==========
        manager
            .create_table(
                Table::create()
                    .table(Metrics::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Metrics::MetricId)
                            .integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Metrics::MetricName)
                            .string_len(64)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Metrics::UnitId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_metrics_unit")
                            .from(Metrics::Table, Metrics::UnitId)
                            .to(Units::Table, Units::UnitId),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("metrics_metric_name_idx")
                    .table(Metrics::Table)
                    .col(Metrics::MetricName)
                    .to_owned(),
            )
            .await?;

        // ========== MEASURES ==========
        manager
            .create_table(
                Table::create()
                    .table(Measures::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Measures::ReadingId)
                            .integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Measures::SensorId).integer().not_null())
                    .col(ColumnDef::new(Measures::MetricId).integer().not_null())
                    .col(ColumnDef::new(Measures::Rtime).date_time().not_null())
                    .col(ColumnDef::new(Measures::Rvalue).double().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_measures_sensor")
                            .from(Measures::Table, Measures::SensorId)
                            .to(Sensors::Table, Sensors::SensorId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_measures_metric")
                            .from(Measures::Table, Measures::MetricId)
                            .to(Metrics::Table, Metrics::MetricId),
                    )
                    .to_owned(),
            )
            .await?;

        // Latest-per-sensor and daily min/max both scan by sensor and time
        manager
            .create_index(
                Index::create()
                    .name("measures_sensor_rtime_idx")
                    .table(Measures::Table)
                    .col(Measures::SensorId)
                    .col(Measures::Rtime)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("measures_metric_idx")
                    .table(Measures::Table)
                    .col(Measures::MetricId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("measures_rvalue_idx")
                    .table(Measures::Table)
                    .col(Measures::Rvalue)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Measures::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Metrics::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Sensors::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Units::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Units {
    Table,
    UnitId,
    UnitName,
    Precision,
}

#[derive(DeriveIden)]
enum Sensors {
    Table,
    SensorId,
    SerialCode,
    Name,
}

#[derive(DeriveIden)]
enum Metrics {
    Table,
    MetricId,
    MetricName,
    UnitId,
}

#[derive(DeriveIden)]
enum Measures {
    Table,
    ReadingId,
    SensorId,
    MetricId,
    Rtime,
    Rvalue,
}
