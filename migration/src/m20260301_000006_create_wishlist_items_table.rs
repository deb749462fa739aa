use sea_orm_migration::prelude::*;

use crate::m20260301_000001_create_users_table::Users;
use crate::m20260301_000002_create_gigs_table::Gigs;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Identifiers for the `wishlist_items` table and its columns.
#[derive(DeriveIden)]
pub enum WishlistItems {
    Table,
    UserId,
    GigId,
    CreatedAt,
}

/// A wishlist entry is a pointer to a live gig; when the gig goes, the
/// entry goes with it (cascade on the gig FK).
fn table_statement() -> TableCreateStatement {
    Table::create()
        .table(WishlistItems::Table)
        .if_not_exists()
        .col(ColumnDef::new(WishlistItems::UserId).uuid().not_null())
        .col(ColumnDef::new(WishlistItems::GigId).uuid().not_null())
        .col(
            ColumnDef::new(WishlistItems::CreatedAt)
                .timestamp_with_time_zone()
                .not_null(),
        )
        // Composite key gives the wishlist its set semantics.
        .primary_key(
            Index::create()
                .col(WishlistItems::UserId)
                .col(WishlistItems::GigId),
        )
        .foreign_key(
            ForeignKey::create()
                .name("fk_wishlist_items_user")
                .from(WishlistItems::Table, WishlistItems::UserId)
                .to(Users::Table, Users::Id),
        )
        .foreign_key(
            ForeignKey::create()
                .name("fk_wishlist_items_gig")
                .from(WishlistItems::Table, WishlistItems::GigId)
                .to(Gigs::Table, Gigs::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.create_table(table_statement()).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(WishlistItems::Table).to_owned())
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wishlist_entries_cascade_with_their_gig() {
        let sql = table_statement().to_string(PostgresQueryBuilder);
        let gig_fk = sql
            .split("CONSTRAINT")
            .find(|part| part.contains("fk_wishlist_items_gig"))
            .expect("gig FK present");
        assert!(gig_fk.contains("ON DELETE CASCADE"));
    }
}
