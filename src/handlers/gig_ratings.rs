use std::collections::HashMap;

use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::auth::middleware::{AuthenticatedUser, Client};
use crate::db::gig_ratings as rating_db;
use crate::db::gigs as gig_db;
use crate::db::users as user_db;
use crate::error::ApiError;
use crate::models::gig_ratings::{RatingInput, RatingResponse, RatingWithClient};
use crate::models::users::PublicUser;

/// POST /api/gig-ratings/{gig_id} — a client rates a gig once. The gig's
/// aggregate is recomputed from all of its ratings before responding.
pub async fn add_rating(
    user: Client,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
    body: web::Json<RatingInput>,
) -> Result<HttpResponse, ApiError> {
    let gig_id = path.into_inner();
    let input = body.into_inner();
    input.validate()?;

    let gig = gig_db::get_gig_by_id(db.get_ref(), gig_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Gig not found".to_string()))?;

    if rating_db::find_by_gig_and_client(db.get_ref(), gig_id, user.0.id)
        .await?
        .is_some()
    {
        return Err(ApiError::Conflict(
            "You have already rated this gig".to_string(),
        ));
    }

    let rating = rating_db::insert_rating(db.get_ref(), &gig, user.0.id, input).await?;
    let (average_rating, total_ratings) =
        rating_db::recompute_gig_aggregate(db.get_ref(), gig_id).await?;

    Ok(HttpResponse::Created().json(RatingResponse {
        message: "Rating added successfully".to_string(),
        rating,
        average_rating,
        total_ratings,
    }))
}

/// PUT /api/gig-ratings/{gig_id} — a client edits their existing rating;
/// same full recompute as add.
pub async fn update_rating(
    user: Client,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
    body: web::Json<RatingInput>,
) -> Result<HttpResponse, ApiError> {
    let gig_id = path.into_inner();
    let input = body.into_inner();
    input.validate()?;

    let existing = rating_db::find_by_gig_and_client(db.get_ref(), gig_id, user.0.id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Rating not found".to_string()))?;

    let rating = rating_db::update_rating(db.get_ref(), existing, input).await?;
    let (average_rating, total_ratings) =
        rating_db::recompute_gig_aggregate(db.get_ref(), gig_id).await?;

    Ok(HttpResponse::Ok().json(RatingResponse {
        message: "Rating updated successfully".to_string(),
        rating,
        average_rating,
        total_ratings,
    }))
}

/// GET /api/gig-ratings/{gig_id} — all ratings for a gig, newest first, with
/// author names (public).
pub async fn get_ratings(
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let gig_id = path.into_inner();

    let ratings = rating_db::get_ratings_for_gig(db.get_ref(), gig_id).await?;

    let mut client_ids: Vec<Uuid> = ratings.iter().map(|r| r.client_id).collect();
    client_ids.sort_unstable();
    client_ids.dedup();

    let clients: HashMap<Uuid, PublicUser> = user_db::get_users_by_ids(db.get_ref(), client_ids)
        .await?
        .iter()
        .map(|u| (u.id, PublicUser::from(u)))
        .collect();

    let enriched: Vec<RatingWithClient> = ratings
        .into_iter()
        .map(|rating| {
            let client = clients.get(&rating.client_id).cloned();
            RatingWithClient { rating, client }
        })
        .collect();

    Ok(HttpResponse::Ok().json(enriched))
}

/// GET /api/gig-ratings/{gig_id}/user-rating — the caller's own rating for a
/// gig, or JSON null if they have not rated it yet.
pub async fn get_user_rating(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let gig_id = path.into_inner();

    let rating = rating_db::find_by_gig_and_client(db.get_ref(), gig_id, user.0.id).await?;
    Ok(HttpResponse::Ok().json(rating))
}
