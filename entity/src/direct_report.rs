use sea_orm::entity::prelude::*;

/// Ordered manager → report edge. `report_id` carries no foreign key so that
/// an edge survives while its target is deleted and re-inserted.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "direct_report")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub manager_id: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub ordinal: i32,
    #[sea_orm(indexed)]
    pub report_id: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::employee::Entity",
        from = "Column::ManagerId",
        to = "super::employee::Column::Id",
        on_delete = "Cascade"
    )]
    Manager,
    #[sea_orm(
        belongs_to = "super::employee::Entity",
        from = "Column::ReportId",
        to = "super::employee::Column::Id"
    )]
    Report,
}

impl Related<super::employee::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Manager.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
