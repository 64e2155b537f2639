use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "employee")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub position: Option<String>,
    pub department: Option<String>,
    /// False when the employee was stored without any report list, as
    /// opposed to an empty one.
    pub reports_supplied: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::direct_report::Entity")]
    DirectReport,
}

impl Related<super::direct_report::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DirectReport.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
