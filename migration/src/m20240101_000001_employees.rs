use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
enum Employee {
    Table,
    Id,
    FirstName,
    LastName,
    Position,
    Department,
    ReportsSupplied,
}

#[derive(DeriveIden)]
enum DirectReport {
    Table,
    ManagerId,
    Ordinal,
    ReportId,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Employee::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Employee::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Employee::FirstName).string())
                    .col(ColumnDef::new(Employee::LastName).string())
                    .col(ColumnDef::new(Employee::Position).string())
                    .col(ColumnDef::new(Employee::Department).string())
                    .col(
                        ColumnDef::new(Employee::ReportsSupplied)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .to_owned(),
            )
            .await?;

        // No foreign key on report_id: edges outlive a delete-then-insert of
        // their target.
        manager
            .create_table(
                Table::create()
                    .table(DirectReport::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(DirectReport::ManagerId).string().not_null())
                    .col(ColumnDef::new(DirectReport::Ordinal).integer().not_null())
                    .col(ColumnDef::new(DirectReport::ReportId).string().not_null())
                    .primary_key(
                        Index::create()
                            .col(DirectReport::ManagerId)
                            .col(DirectReport::Ordinal),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_direct_report_manager")
                            .from(DirectReport::Table, DirectReport::ManagerId)
                            .to(Employee::Table, Employee::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_direct_report_report_id")
                    .table(DirectReport::Table)
                    .col(DirectReport::ReportId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(DirectReport::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Employee::Table).if_exists().to_owned())
            .await
    }
}
