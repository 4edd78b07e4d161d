//! Create slots table
//!
//! Composite primary key (station_id, number). Booking commits race on
//! the status column with a conditional update.

use sea_orm_migration::prelude::*;

use super::m20250301_000002_create_stations::Stations;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Slots::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Slots::StationId).string().not_null())
                    .col(ColumnDef::new(Slots::Number).integer().not_null())
                    .col(
                        ColumnDef::new(Slots::Status)
                            .string()
                            .not_null()
                            .default("available"),
                    )
                    .col(ColumnDef::new(Slots::ChargerType).string().not_null())
                    .primary_key(
                        Index::create()
                            .col(Slots::StationId)
                            .col(Slots::Number),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_slots_station")
                            .from(Slots::Table, Slots::StationId)
                            .to(Stations::Table, Stations::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_slots_status")
                    .table(Slots::Table)
                    .col(Slots::Status)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Slots::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Slots {
    Table,
    StationId,
    Number,
    Status,
    ChargerType,
}
