use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Stores::Table)
                    .if_not_exists()
                    .col(pk_uuid(Stores::Id))
                    .col(string(Stores::Name))
                    .col(string(Stores::Slug))
                    .col(text(Stores::Address))
                    .col(string(Stores::Phone))
                    .col(integer(Stores::OperationalTimeStart))
                    .col(integer(Stores::OperationalTimeEnd))
                    .col(
                        timestamp_with_time_zone(Stores::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(timestamp_with_time_zone_null(Stores::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        // Slugs are derived from names and may repeat, so this is not unique.
        manager
            .create_index(
                Index::create()
                    .name("idx_stores_slug")
                    .table(Stores::Table)
                    .col(Stores::Slug)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Stores::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub(crate) enum Stores {
    Table,
    Id,
    Name,
    Slug,
    Address,
    Phone,
    OperationalTimeStart,
    OperationalTimeEnd,
    CreatedAt,
    UpdatedAt,
}
