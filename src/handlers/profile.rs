use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::auth::middleware::AuthenticatedUser;
use crate::db::gig_ratings as rating_db;
use crate::db::gigs as gig_db;
use crate::db::orders as order_db;
use crate::db::users as user_db;
use crate::error::ApiError;
use crate::models::users::{ProfileResponse, Roles, UpdateProfile, UserResponse};

/// GET /api/profile — the caller's own profile.
pub async fn get_profile(user: AuthenticatedUser) -> Result<HttpResponse, ApiError> {
    Ok(HttpResponse::Ok().json(UserResponse::from(user.0)))
}

/// PUT /api/profile — whitelisted update of the caller's own profile. Role,
/// email and password cannot be changed through this route.
pub async fn update_profile(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    body: web::Json<UpdateProfile>,
) -> Result<HttpResponse, ApiError> {
    let updated = user_db::update_profile(db.get_ref(), user.0, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(UserResponse::from(updated)))
}

/// GET /api/profile/{id} — a public profile. Freelancer profiles carry
/// derived stats; client profiles report zeros.
pub async fn get_public_profile(
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();

    let user = user_db::get_user_by_id(db.get_ref(), id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    let (total_gigs, completed_orders, average_rating, total_ratings) = match user.role {
        Roles::Freelancer => {
            let total_gigs = gig_db::count_by_freelancer(db.get_ref(), user.id).await?;
            let completed_orders =
                order_db::count_delivered_by_freelancer(db.get_ref(), user.id).await?;

            let ratings = rating_db::get_ratings_by_freelancer(db.get_ref(), user.id).await?;
            let total_ratings = ratings.len() as u64;
            let average_rating = if ratings.is_empty() {
                0.0
            } else {
                let sum: i64 = ratings.iter().map(|r| i64::from(r.rating)).sum();
                rating_db::round_one_decimal(sum as f64 / total_ratings as f64)
            };

            (total_gigs, completed_orders, average_rating, total_ratings)
        }
        Roles::Client => (0, 0, 0.0, 0),
    };

    Ok(HttpResponse::Ok().json(ProfileResponse {
        user: UserResponse::from(user),
        total_gigs,
        completed_orders,
        average_rating,
        total_ratings,
    }))
}
