use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // No uniqueness on message: every attempt is recorded, repeats included
        manager
            .create_table(
                Table::create()
                    .table(LogMessage::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(LogMessage::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(LogMessage::Message).text().not_null())
                    .col(
                        ColumnDef::new(LogMessage::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(LogMessage::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum LogMessage {
    Table,
    Id,
    Message,
    CreatedAt,
}
