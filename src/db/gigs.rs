use sea_orm::sea_query::Expr;
use sea_orm::*;
use uuid::Uuid;

use crate::models::StringList;
use crate::models::gigs::{self, CreateGig, UpdateGig};

/// Insert a new gig owned by the given freelancer. Counters start at zero
/// and the gig is active.
pub async fn insert_gig(
    db: &DatabaseConnection,
    input: CreateGig,
    freelancer_id: Uuid,
) -> Result<gigs::Model, DbErr> {
    let new_gig = gigs::ActiveModel {
        id: Set(Uuid::new_v4()),
        freelancer_id: Set(freelancer_id),
        title: Set(input.title),
        description: Set(input.description),
        category: Set(input.category),
        price: Set(input.price),
        delivery_time: Set(input.delivery_time),
        tags: Set(StringList(input.tags)),
        images: Set(StringList(input.images)),
        is_active: Set(true),
        views: Set(0),
        average_rating: Set(0.0),
        total_ratings: Set(0),
        created_at: Set(chrono::Utc::now()),
    };

    new_gig.insert(db).await
}

/// Fetch all active gigs (the public catalogue).
pub async fn get_active_gigs(db: &DatabaseConnection) -> Result<Vec<gigs::Model>, DbErr> {
    gigs::Entity::find()
        .filter(gigs::Column::IsActive.eq(true))
        .all(db)
        .await
}

/// Fetch every gig owned by a freelancer, active and inactive, for the
/// management view.
pub async fn get_gigs_by_freelancer(
    db: &DatabaseConnection,
    freelancer_id: Uuid,
) -> Result<Vec<gigs::Model>, DbErr> {
    gigs::Entity::find()
        .filter(gigs::Column::FreelancerId.eq(freelancer_id))
        .all(db)
        .await
}

/// Fetch a single gig by ID regardless of active flag.
pub async fn get_gig_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<gigs::Model>, DbErr> {
    gigs::Entity::find_by_id(id).one(db).await
}

fn owned_query(id: Uuid, freelancer_id: Uuid) -> Select<gigs::Entity> {
    gigs::Entity::find_by_id(id).filter(gigs::Column::FreelancerId.eq(freelancer_id))
}

fn delete_owned_query(id: Uuid, freelancer_id: Uuid) -> DeleteMany<gigs::Entity> {
    gigs::Entity::delete_many()
        .filter(gigs::Column::Id.eq(id))
        .filter(gigs::Column::FreelancerId.eq(freelancer_id))
}

/// Fetch a gig only if it is owned by the given freelancer. Existence and
/// ownership are checked together so a non-owner sees the same absence as a
/// missing id.
pub async fn find_owned(
    db: &DatabaseConnection,
    id: Uuid,
    freelancer_id: Uuid,
) -> Result<Option<gigs::Model>, DbErr> {
    owned_query(id, freelancer_id).one(db).await
}

/// Update an already-ownership-checked gig with the fields present.
pub async fn update_gig(
    db: &DatabaseConnection,
    gig: gigs::Model,
    input: UpdateGig,
) -> Result<gigs::Model, DbErr> {
    let mut active: gigs::ActiveModel = gig.into();

    if let Some(title) = input.title {
        active.title = Set(title);
    }
    if let Some(description) = input.description {
        active.description = Set(description);
    }
    if let Some(category) = input.category {
        active.category = Set(category);
    }
    if let Some(price) = input.price {
        active.price = Set(price);
    }
    if let Some(delivery_time) = input.delivery_time {
        active.delivery_time = Set(delivery_time);
    }
    if let Some(tags) = input.tags {
        active.tags = Set(StringList(tags));
    }
    if let Some(images) = input.images {
        active.images = Set(StringList(images));
    }

    active.update(db).await
}

/// Delete a gig, but only if owned by the given freelancer. Returns the
/// delete result so the caller can distinguish not-found-or-not-owned.
pub async fn delete_owned(
    db: &DatabaseConnection,
    id: Uuid,
    freelancer_id: Uuid,
) -> Result<DeleteResult, DbErr> {
    delete_owned_query(id, freelancer_id).exec(db).await
}

/// Flip the active flag of an already-ownership-checked gig.
pub async fn toggle_active(
    db: &DatabaseConnection,
    gig: gigs::Model,
) -> Result<gigs::Model, DbErr> {
    let is_active = gig.is_active;
    let mut active: gigs::ActiveModel = gig.into();
    active.is_active = Set(!is_active);
    active.update(db).await
}

/// Atomically increment the view counter, even for inactive gigs. Returns
/// the number of rows touched (zero means no such gig).
pub async fn increment_views(db: &DatabaseConnection, id: Uuid) -> Result<u64, DbErr> {
    let result = gigs::Entity::update_many()
        .col_expr(gigs::Column::Views, Expr::col(gigs::Column::Views).add(1))
        .filter(gigs::Column::Id.eq(id))
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}

/// Write the derived rating aggregate back onto a gig.
pub async fn set_rating_aggregate(
    db: &DatabaseConnection,
    id: Uuid,
    average_rating: f64,
    total_ratings: i32,
) -> Result<(), DbErr> {
    gigs::Entity::update_many()
        .col_expr(gigs::Column::AverageRating, Expr::value(average_rating))
        .col_expr(gigs::Column::TotalRatings, Expr::value(total_ratings))
        .filter(gigs::Column::Id.eq(id))
        .exec(db)
        .await?;
    Ok(())
}

/// Count all gigs owned by a freelancer (profile stats).
pub async fn count_by_freelancer(db: &DatabaseConnection, freelancer_id: Uuid) -> Result<u64, DbErr> {
    gigs::Entity::find()
        .filter(gigs::Column::FreelancerId.eq(freelancer_id))
        .count(db)
        .await
}

/// Fetch a set of gigs by ID (wishlist resolution).
pub async fn get_gigs_by_ids(
    db: &DatabaseConnection,
    ids: Vec<Uuid>,
) -> Result<Vec<gigs::Model>, DbErr> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    gigs::Entity::find()
        .filter(gigs::Column::Id.is_in(ids))
        .all(db)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    // Ownership lives in the query itself, not in a later check: both the
    // lookup and the delete must constrain id and owner together.

    #[test]
    fn owned_lookup_filters_on_both_id_and_owner() {
        let id = Uuid::new_v4();
        let owner = Uuid::new_v4();

        let sql = owned_query(id, owner).build(DbBackend::Postgres).to_string();
        assert!(sql.contains(&id.to_string()));
        assert!(sql.contains("\"freelancer_id\""));
        assert!(sql.contains(&owner.to_string()));
    }

    #[test]
    fn owned_delete_filters_on_both_id_and_owner() {
        let id = Uuid::new_v4();
        let owner = Uuid::new_v4();

        let sql = delete_owned_query(id, owner)
            .build(DbBackend::Postgres)
            .to_string();
        assert!(sql.starts_with("DELETE"));
        assert!(sql.contains(&id.to_string()));
        assert!(sql.contains("\"freelancer_id\""));
        assert!(sql.contains(&owner.to_string()));
    }
}
