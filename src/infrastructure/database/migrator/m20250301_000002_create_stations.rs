//! Create stations table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Stations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Stations::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Stations::Name).string().not_null())
                    .col(ColumnDef::new(Stations::Address).string().not_null())
                    .col(ColumnDef::new(Stations::City).string().not_null())
                    .col(ColumnDef::new(Stations::State).string().not_null())
                    .col(ColumnDef::new(Stations::ZipCode).string().not_null())
                    .col(ColumnDef::new(Stations::Phone).string())
                    .col(ColumnDef::new(Stations::Latitude).double())
                    .col(ColumnDef::new(Stations::Longitude).double())
                    .col(
                        ColumnDef::new(Stations::OperatingHours)
                            .string()
                            .not_null()
                            .default("24/7"),
                    )
                    .col(ColumnDef::new(Stations::Pricing).string())
                    .col(
                        ColumnDef::new(Stations::Amenities)
                            .string()
                            .not_null()
                            .default("[]"),
                    )
                    .col(ColumnDef::new(Stations::OwnerName).string().not_null())
                    .col(ColumnDef::new(Stations::OwnerEmail).string().not_null())
                    .col(ColumnDef::new(Stations::OwnerPhone).string().not_null())
                    .col(
                        ColumnDef::new(Stations::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Stations::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_stations_city")
                    .table(Stations::Table)
                    .col(Stations::City)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_stations_is_active")
                    .table(Stations::Table)
                    .col(Stations::IsActive)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Stations::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Stations {
    Table,
    Id,
    Name,
    Address,
    City,
    State,
    ZipCode,
    Phone,
    Latitude,
    Longitude,
    OperatingHours,
    Pricing,
    Amenities,
    OwnerName,
    OwnerEmail,
    OwnerPhone,
    IsActive,
    CreatedAt,
}
