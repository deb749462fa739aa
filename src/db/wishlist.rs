use sea_orm::*;
use uuid::Uuid;

use crate::models::wishlist;

/// All wishlist entries for a user.
pub async fn get_wishlist(
    db: &DatabaseConnection,
    user_id: Uuid,
) -> Result<Vec<wishlist::Model>, DbErr> {
    wishlist::Entity::find()
        .filter(wishlist::Column::UserId.eq(user_id))
        .all(db)
        .await
}

/// Whether a gig is already in the user's wishlist.
pub async fn contains(
    db: &DatabaseConnection,
    user_id: Uuid,
    gig_id: Uuid,
) -> Result<bool, DbErr> {
    let count = wishlist::Entity::find()
        .filter(wishlist::Column::UserId.eq(user_id))
        .filter(wishlist::Column::GigId.eq(gig_id))
        .count(db)
        .await?;
    Ok(count > 0)
}

/// Add a gig to the user's wishlist. Duplicate adds are rejected by the
/// composite primary key; the handler pre-checks for a clean Conflict.
pub async fn add(
    db: &DatabaseConnection,
    user_id: Uuid,
    gig_id: Uuid,
) -> Result<wishlist::Model, DbErr> {
    let item = wishlist::ActiveModel {
        user_id: Set(user_id),
        gig_id: Set(gig_id),
        created_at: Set(chrono::Utc::now()),
    };
    item.insert(db).await
}

/// Remove a gig from the user's wishlist. Removing an absent entry deletes
/// zero rows, which callers treat as success (idempotent delete).
pub async fn remove(
    db: &DatabaseConnection,
    user_id: Uuid,
    gig_id: Uuid,
) -> Result<DeleteResult, DbErr> {
    wishlist::Entity::delete_many()
        .filter(wishlist::Column::UserId.eq(user_id))
        .filter(wishlist::Column::GigId.eq(gig_id))
        .exec(db)
        .await
}
