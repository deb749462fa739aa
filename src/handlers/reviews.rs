use std::collections::HashMap;

use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::auth::middleware::Client;
use crate::db::orders as order_db;
use crate::db::reviews as review_db;
use crate::db::users as user_db;
use crate::error::ApiError;
use crate::models::reviews::{CreateReview, ReviewWithClient};
use crate::models::users::PublicUser;

/// POST /api/reviews — the ordering client reviews a completed order, once.
pub async fn create_review(
    user: Client,
    db: web::Data<DatabaseConnection>,
    body: web::Json<CreateReview>,
) -> Result<HttpResponse, ApiError> {
    let input = body.into_inner();
    input.validate()?;

    let order = order_db::get_order_by_id(db.get_ref(), input.order_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Order not found".to_string()))?;

    if order.client_id != user.0.id {
        return Err(ApiError::Forbidden);
    }

    if review_db::find_by_order(db.get_ref(), input.order_id)
        .await?
        .is_some()
    {
        return Err(ApiError::Conflict(
            "Review already exists for this order".to_string(),
        ));
    }

    let review = review_db::insert_review(db.get_ref(), &order, user.0.id, input).await?;
    Ok(HttpResponse::Created().json(review))
}

/// GET /api/reviews/freelancer/{id} — a freelancer's reviews, newest first,
/// with author names (public).
pub async fn get_freelancer_reviews(
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let freelancer_id = path.into_inner();

    let reviews = review_db::get_reviews_for_freelancer(db.get_ref(), freelancer_id).await?;

    let mut client_ids: Vec<Uuid> = reviews.iter().map(|r| r.client_id).collect();
    client_ids.sort_unstable();
    client_ids.dedup();

    let clients: HashMap<Uuid, PublicUser> = user_db::get_users_by_ids(db.get_ref(), client_ids)
        .await?
        .iter()
        .map(|u| (u.id, PublicUser::from(u)))
        .collect();

    let enriched: Vec<ReviewWithClient> = reviews
        .into_iter()
        .map(|review| {
            let client = clients.get(&review.client_id).cloned();
            ReviewWithClient { review, client }
        })
        .collect();

    Ok(HttpResponse::Ok().json(enriched))
}
