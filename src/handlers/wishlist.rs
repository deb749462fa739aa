use std::collections::HashMap;

use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::auth::middleware::Client;
use crate::db::gigs as gig_db;
use crate::db::users as user_db;
use crate::db::wishlist as wishlist_db;
use crate::error::ApiError;
use crate::models::gigs::GigWithFreelancer;
use crate::models::users::FreelancerSummary;

/// GET /api/wishlist — the caller's saved gigs, resolved to full gig + owner
/// data (client only).
pub async fn get_wishlist(
    user: Client,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, ApiError> {
    let items = wishlist_db::get_wishlist(db.get_ref(), user.0.id).await?;
    let gig_ids: Vec<Uuid> = items.iter().map(|i| i.gig_id).collect();

    let gigs = gig_db::get_gigs_by_ids(db.get_ref(), gig_ids).await?;

    let mut owner_ids: Vec<Uuid> = gigs.iter().map(|g| g.freelancer_id).collect();
    owner_ids.sort_unstable();
    owner_ids.dedup();

    let owners: HashMap<Uuid, FreelancerSummary> =
        user_db::get_users_by_ids(db.get_ref(), owner_ids)
            .await?
            .iter()
            .map(|u| (u.id, FreelancerSummary::from(u)))
            .collect();

    let enriched: Vec<GigWithFreelancer> = gigs
        .into_iter()
        .map(|gig| {
            let freelancer = owners.get(&gig.freelancer_id).cloned();
            GigWithFreelancer { gig, freelancer }
        })
        .collect();

    Ok(HttpResponse::Ok().json(enriched))
}

/// POST /api/wishlist/{gig_id} — save a gig. Saving one that is already
/// present is a conflict; the wishlist is a set.
pub async fn add_to_wishlist(
    user: Client,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let gig_id = path.into_inner();

    gig_db::get_gig_by_id(db.get_ref(), gig_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Gig not found".to_string()))?;

    if wishlist_db::contains(db.get_ref(), user.0.id, gig_id).await? {
        return Err(ApiError::Conflict("Gig already in wishlist".to_string()));
    }

    wishlist_db::add(db.get_ref(), user.0.id, gig_id).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Gig added to wishlist",
    })))
}

/// DELETE /api/wishlist/{gig_id} — remove a gig. Removing an absent entry is
/// a silent no-op.
pub async fn remove_from_wishlist(
    user: Client,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let gig_id = path.into_inner();

    wishlist_db::remove(db.get_ref(), user.0.id, gig_id).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Gig removed from wishlist",
    })))
}
