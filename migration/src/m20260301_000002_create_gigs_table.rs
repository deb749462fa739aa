use sea_orm_migration::prelude::*;

use crate::m20260301_000001_create_users_table::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Identifiers for the `gigs` table and its columns.
#[derive(DeriveIden)]
pub enum Gigs {
    Table,
    Id,
    FreelancerId,
    Title,
    Description,
    Category,
    Price,
    DeliveryTime,
    Tags,
    Images,
    IsActive,
    Views,
    AverageRating,
    TotalRatings,
    CreatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Gigs::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Gigs::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Gigs::FreelancerId).uuid().not_null())
                    .col(ColumnDef::new(Gigs::Title).string().not_null())
                    .col(ColumnDef::new(Gigs::Description).text().not_null())
                    .col(ColumnDef::new(Gigs::Category).string().not_null())
                    .col(ColumnDef::new(Gigs::Price).double().not_null())
                    .col(ColumnDef::new(Gigs::DeliveryTime).integer().not_null())
                    .col(ColumnDef::new(Gigs::Tags).json_binary().not_null())
                    .col(ColumnDef::new(Gigs::Images).json_binary().not_null())
                    .col(
                        ColumnDef::new(Gigs::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Gigs::Views).integer().not_null().default(0))
                    .col(
                        ColumnDef::new(Gigs::AverageRating)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(Gigs::TotalRatings)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Gigs::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_gigs_freelancer")
                            .from(Gigs::Table, Gigs::FreelancerId)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_gigs_freelancer_id")
                    .table(Gigs::Table)
                    .col(Gigs::FreelancerId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Gigs::Table).to_owned())
            .await
    }
}
