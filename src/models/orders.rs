use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::users::PublicUser;

/// Order status stored as a lowercase string in the database.
///
/// Both transitions between the two states are accepted; a freelancer may
/// move a delivered order back to pending (e.g. a mistaken delivery mark).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "delivered")]
    Delivered,
}

/// SeaORM entity for the `orders` table.
///
/// `price` and `delivery_time` are snapshots of the gig at order-creation
/// time; later gig edits never touch them.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "orders")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub gig_id: Uuid,
    pub client_id: Uuid,
    pub freelancer_id: Uuid,
    #[sea_orm(column_type = "Double")]
    pub price: f64,
    pub delivery_time: i32,
    pub status: Status,
    pub payment_ref: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::gigs::Entity",
        from = "Column::GigId",
        to = "super::gigs::Column::Id"
    )]
    Gig,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::ClientId",
        to = "super::users::Column::Id"
    )]
    Client,
}

impl Related<super::gigs::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Gig.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Client.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub gig_id: Uuid,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateOrderStatus {
    pub status: Status,
}

/// An order resolved with its gig and the counterparty's display data, as
/// returned by the role-scoped order list.
#[derive(Debug, Clone, Serialize)]
pub struct OrderWithDetails {
    #[serde(flatten)]
    pub order: Model,
    pub gig: Option<super::gigs::Model>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client: Option<PublicUser>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub freelancer: Option<PublicUser>,
}
