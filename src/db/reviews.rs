use sea_orm::*;
use uuid::Uuid;

use crate::models::orders;
use crate::models::reviews::{self, CreateReview};

/// Find the review for an order, if one exists.
pub async fn find_by_order(
    db: &DatabaseConnection,
    order_id: Uuid,
) -> Result<Option<reviews::Model>, DbErr> {
    reviews::Entity::find()
        .filter(reviews::Column::OrderId.eq(order_id))
        .one(db)
        .await
}

/// Insert a review for an order, denormalizing the freelancer from it.
pub async fn insert_review(
    db: &DatabaseConnection,
    order: &orders::Model,
    client_id: Uuid,
    input: CreateReview,
) -> Result<reviews::Model, DbErr> {
    let new_review = reviews::ActiveModel {
        id: Set(Uuid::new_v4()),
        order_id: Set(order.id),
        client_id: Set(client_id),
        freelancer_id: Set(order.freelancer_id),
        rating: Set(input.rating),
        comment: Set(input.comment),
        created_at: Set(chrono::Utc::now()),
    };

    new_review.insert(db).await
}

/// All reviews received by a freelancer, newest first.
pub async fn get_reviews_for_freelancer(
    db: &DatabaseConnection,
    freelancer_id: Uuid,
) -> Result<Vec<reviews::Model>, DbErr> {
    reviews::Entity::find()
        .filter(reviews::Column::FreelancerId.eq(freelancer_id))
        .order_by_desc(reviews::Column::CreatedAt)
        .all(db)
        .await
}
