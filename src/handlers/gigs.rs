use std::collections::HashMap;

use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::auth::middleware::Freelancer;
use crate::db::gigs as gig_db;
use crate::db::users as user_db;
use crate::error::ApiError;
use crate::models::gigs::{self, CreateGig, GigWithFreelancer, UpdateGig};
use crate::models::users::FreelancerSummary;

/// Resolve gig owners in one query and pair each gig with its owner's
/// public profile.
async fn with_freelancers(
    db: &DatabaseConnection,
    gigs: Vec<gigs::Model>,
) -> Result<Vec<GigWithFreelancer>, ApiError> {
    let mut owner_ids: Vec<Uuid> = gigs.iter().map(|g| g.freelancer_id).collect();
    owner_ids.sort_unstable();
    owner_ids.dedup();

    let owners: HashMap<Uuid, FreelancerSummary> = user_db::get_users_by_ids(db, owner_ids)
        .await?
        .iter()
        .map(|u| (u.id, FreelancerSummary::from(u)))
        .collect();

    Ok(gigs
        .into_iter()
        .map(|gig| {
            let freelancer = owners.get(&gig.freelancer_id).cloned();
            GigWithFreelancer { gig, freelancer }
        })
        .collect())
}

/// POST /api/gigs — create a gig (freelancer only).
pub async fn create_gig(
    user: Freelancer,
    db: web::Data<DatabaseConnection>,
    body: web::Json<CreateGig>,
) -> Result<HttpResponse, ApiError> {
    let input = body.into_inner();
    input.validate()?;

    let gig = gig_db::insert_gig(db.get_ref(), input, user.0.id).await?;
    Ok(HttpResponse::Created().json(gig))
}

/// GET /api/gigs — all active gigs with owner profiles (public).
pub async fn get_gigs(db: web::Data<DatabaseConnection>) -> Result<HttpResponse, ApiError> {
    let gigs = gig_db::get_active_gigs(db.get_ref()).await?;
    let enriched = with_freelancers(db.get_ref(), gigs).await?;
    Ok(HttpResponse::Ok().json(enriched))
}

/// GET /api/gigs/freelancer — the caller's own gigs, active and inactive.
pub async fn get_my_gigs(
    user: Freelancer,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, ApiError> {
    let gigs = gig_db::get_gigs_by_freelancer(db.get_ref(), user.0.id).await?;
    Ok(HttpResponse::Ok().json(gigs))
}

/// GET /api/gigs/{id} — one gig (public). Inactive gigs are invisible here
/// even by direct id.
pub async fn get_gig(
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();

    let gig = gig_db::get_gig_by_id(db.get_ref(), id)
        .await?
        .filter(|g| g.is_active)
        .ok_or_else(|| ApiError::NotFound("Gig not found".to_string()))?;

    let freelancer = user_db::get_user_by_id(db.get_ref(), gig.freelancer_id)
        .await?
        .as_ref()
        .map(FreelancerSummary::from);

    Ok(HttpResponse::Ok().json(GigWithFreelancer { gig, freelancer }))
}

/// POST /api/gigs/{id}/view — increment the view counter (public). Counts
/// views on inactive gigs too; deduplication is the caller's concern.
pub async fn track_view(
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();

    let touched = gig_db::increment_views(db.get_ref(), id).await?;
    if touched == 0 {
        return Err(ApiError::NotFound("Gig not found".to_string()));
    }

    let gig = gig_db::get_gig_by_id(db.get_ref(), id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Gig not found".to_string()))?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "View tracked successfully",
        "views": gig.views,
    })))
}

/// PUT /api/gigs/{id} — update a gig (freelancer owner only). A non-owner
/// gets the same 404 as a nonexistent id.
pub async fn update_gig(
    user: Freelancer,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateGig>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let input = body.into_inner();
    input.validate()?;

    let gig = gig_db::find_owned(db.get_ref(), id, user.0.id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Gig not found or not authorized".to_string()))?;

    let updated = gig_db::update_gig(db.get_ref(), gig, input).await?;
    Ok(HttpResponse::Ok().json(updated))
}

/// DELETE /api/gigs/{id} — permanently remove a gig (freelancer owner only).
pub async fn delete_gig(
    user: Freelancer,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();

    let result = gig_db::delete_owned(db.get_ref(), id, user.0.id).await?;
    if result.rows_affected == 0 {
        return Err(ApiError::NotFound(
            "Gig not found or not authorized".to_string(),
        ));
    }

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Gig deleted successfully",
    })))
}

/// PATCH /api/gigs/{id}/toggle-status — flip the active flag (owner only).
pub async fn toggle_status(
    user: Freelancer,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();

    let gig = gig_db::find_owned(db.get_ref(), id, user.0.id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Gig not found or not authorized".to_string()))?;

    let gig = gig_db::toggle_active(db.get_ref(), gig).await?;
    let verb = if gig.is_active { "activated" } else { "deactivated" };

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": format!("Gig {verb} successfully"),
        "gig": gig,
    })))
}
