//! Create registrations table
//!
//! Station registration requests awaiting admin review.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Registrations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Registrations::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Registrations::Name).string().not_null())
                    .col(ColumnDef::new(Registrations::Address).string().not_null())
                    .col(ColumnDef::new(Registrations::City).string().not_null())
                    .col(ColumnDef::new(Registrations::State).string().not_null())
                    .col(ColumnDef::new(Registrations::ZipCode).string().not_null())
                    .col(ColumnDef::new(Registrations::Phone).string())
                    .col(ColumnDef::new(Registrations::Latitude).double())
                    .col(ColumnDef::new(Registrations::Longitude).double())
                    .col(ColumnDef::new(Registrations::OwnerName).string().not_null())
                    .col(
                        ColumnDef::new(Registrations::OwnerEmail)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Registrations::OwnerPhone)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Registrations::TotalSlots)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Registrations::SlotTypes).string().not_null())
                    .col(
                        ColumnDef::new(Registrations::Amenities)
                            .string()
                            .not_null()
                            .default("[]"),
                    )
                    .col(
                        ColumnDef::new(Registrations::OperatingHours)
                            .string()
                            .not_null()
                            .default("24/7"),
                    )
                    .col(ColumnDef::new(Registrations::Pricing).string())
                    .col(
                        ColumnDef::new(Registrations::Status)
                            .string()
                            .not_null()
                            .default("pending"),
                    )
                    .col(
                        ColumnDef::new(Registrations::SubmittedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Registrations::ReviewedBy).string())
                    .col(ColumnDef::new(Registrations::ReviewedAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(Registrations::RejectionReason).string())
                    .col(ColumnDef::new(Registrations::StationId).string())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_registrations_status")
                    .table(Registrations::Table)
                    .col(Registrations::Status)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Registrations::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Registrations {
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
    OwnerName,
    OwnerEmail,
    OwnerPhone,
    TotalSlots,
    SlotTypes,
    Amenities,
    OperatingHours,
    Pricing,
    Status,
    SubmittedAt,
    ReviewedBy,
    ReviewedAt,
    RejectionReason,
    StationId,
}
