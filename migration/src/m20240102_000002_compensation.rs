use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
enum Compensation {
    Table,
    Id,
    EmployeeId,
    Employee,
    Salary,
    EffectiveDate,
    CreatedAt,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Compensation::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Compensation::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Compensation::EmployeeId).string())
                    .col(ColumnDef::new(Compensation::Employee).json_binary().not_null())
                    .col(ColumnDef::new(Compensation::Salary).double().not_null())
                    .col(
                        ColumnDef::new(Compensation::EffectiveDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Compensation::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_compensation_employee_id")
                    .table(Compensation::Table)
                    .col(Compensation::EmployeeId)
                    .col(Compensation::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Compensation::Table).if_exists().to_owned())
            .await
    }
}
