use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A named measured quantity (e.g. temperature) tied to a display unit.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[schema(as = Metric)]
#[sea_orm(table_name = "metrics")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub metric_id: i32,
    pub metric_name: String,
    pub unit_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::units::Entity",
        from = "Column::UnitId",
        to = "super::units::Column::UnitId"
    )]
    Unit,
    #[sea_orm(has_many = "super::measures::Entity")]
    Measures,
}

impl Related<super::units::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Unit.def()
    }
}

impl Related<super::measures::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Measures.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
