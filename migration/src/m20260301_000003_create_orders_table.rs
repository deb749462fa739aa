use sea_orm_migration::prelude::*;

use crate::m20260301_000001_create_users_table::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Identifiers for the `orders` table and its columns.
#[derive(DeriveIden)]
pub enum Orders {
    Table,
    Id,
    GigId,
    ClientId,
    FreelancerId,
    Price,
    DeliveryTime,
    Status,
    PaymentRef,
    CreatedAt,
    UpdatedAt,
}

/// Orders snapshot the gig's terms and must outlive the gig itself, so
/// `gig_id` deliberately carries no foreign key: deleting a gig keeps its
/// orders intact, and order resolution tolerates the missing gig.
fn table_statement() -> TableCreateStatement {
    Table::create()
        .table(Orders::Table)
        .if_not_exists()
        .col(ColumnDef::new(Orders::Id).uuid().not_null().primary_key())
        .col(ColumnDef::new(Orders::GigId).uuid().not_null())
        .col(ColumnDef::new(Orders::ClientId).uuid().not_null())
        .col(ColumnDef::new(Orders::FreelancerId).uuid().not_null())
        .col(ColumnDef::new(Orders::Price).double().not_null())
        .col(ColumnDef::new(Orders::DeliveryTime).integer().not_null())
        .col(ColumnDef::new(Orders::Status).string().not_null())
        .col(ColumnDef::new(Orders::PaymentRef).string().not_null())
        .col(
            ColumnDef::new(Orders::CreatedAt)
                .timestamp_with_time_zone()
                .not_null(),
        )
        .col(
            ColumnDef::new(Orders::UpdatedAt)
                .timestamp_with_time_zone()
                .not_null(),
        )
        .foreign_key(
            ForeignKey::create()
                .name("fk_orders_client")
                .from(Orders::Table, Orders::ClientId)
                .to(Users::Table, Users::Id),
        )
        .foreign_key(
            ForeignKey::create()
                .name("fk_orders_freelancer")
                .from(Orders::Table, Orders::FreelancerId)
                .to(Users::Table, Users::Id),
        )
        .to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.create_table(table_statement()).await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_orders_client_id")
                    .table(Orders::Table)
                    .col(Orders::ClientId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_orders_freelancer_id")
                    .table(Orders::Table)
                    .col(Orders::FreelancerId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Orders::Table).to_owned())
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orders_do_not_reference_gigs() {
        let sql = table_statement().to_string(PostgresQueryBuilder);
        assert!(!sql.contains("fk_orders_gig"));
        assert!(!sql.contains("REFERENCES \"gigs\""));
    }
}
