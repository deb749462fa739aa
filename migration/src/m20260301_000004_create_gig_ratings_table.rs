use sea_orm_migration::prelude::*;

use crate::m20260301_000001_create_users_table::Users;
use crate::m20260301_000002_create_gigs_table::Gigs;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Identifiers for the `gig_ratings` table and its columns.
#[derive(DeriveIden)]
pub enum GigRatings {
    Table,
    Id,
    GigId,
    ClientId,
    FreelancerId,
    Rating,
    Comment,
    CreatedAt,
}

/// Ratings exist only to feed the gig's aggregate, so they go with the gig:
/// the gig FK cascades on delete.
fn table_statement() -> TableCreateStatement {
    Table::create()
        .table(GigRatings::Table)
        .if_not_exists()
        .col(
            ColumnDef::new(GigRatings::Id)
                .uuid()
                .not_null()
                .primary_key(),
        )
        .col(ColumnDef::new(GigRatings::GigId).uuid().not_null())
        .col(ColumnDef::new(GigRatings::ClientId).uuid().not_null())
        .col(ColumnDef::new(GigRatings::FreelancerId).uuid().not_null())
        .col(
            ColumnDef::new(GigRatings::Rating)
                .small_integer()
                .not_null(),
        )
        .col(ColumnDef::new(GigRatings::Comment).text())
        .col(
            ColumnDef::new(GigRatings::CreatedAt)
                .timestamp_with_time_zone()
                .not_null(),
        )
        .foreign_key(
            ForeignKey::create()
                .name("fk_gig_ratings_gig")
                .from(GigRatings::Table, GigRatings::GigId)
                .to(Gigs::Table, Gigs::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .foreign_key(
            ForeignKey::create()
                .name("fk_gig_ratings_client")
                .from(GigRatings::Table, GigRatings::ClientId)
                .to(Users::Table, Users::Id),
        )
        .to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.create_table(table_statement()).await?;

        // One rating per client per gig.
        manager
            .create_index(
                Index::create()
                    .name("idx_gig_ratings_gig_client_unique")
                    .table(GigRatings::Table)
                    .col(GigRatings::GigId)
                    .col(GigRatings::ClientId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_gig_ratings_freelancer_id")
                    .table(GigRatings::Table)
                    .col(GigRatings::FreelancerId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(GigRatings::Table).to_owned())
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratings_cascade_with_their_gig() {
        let sql = table_statement().to_string(PostgresQueryBuilder);
        let gig_fk = sql
            .split("CONSTRAINT")
            .find(|part| part.contains("fk_gig_ratings_gig"))
            .expect("gig FK present");
        assert!(gig_fk.contains("ON DELETE CASCADE"));
    }
}
