use sea_orm::*;
use uuid::Uuid;

use crate::db::gigs as gig_db;
use crate::models::gig_ratings::{self, RatingInput};
use crate::models::gigs;

/// Find a client's rating for a gig, if any.
pub async fn find_by_gig_and_client(
    db: &DatabaseConnection,
    gig_id: Uuid,
    client_id: Uuid,
) -> Result<Option<gig_ratings::Model>, DbErr> {
    gig_ratings::Entity::find()
        .filter(gig_ratings::Column::GigId.eq(gig_id))
        .filter(gig_ratings::Column::ClientId.eq(client_id))
        .one(db)
        .await
}

/// Insert a new rating, denormalizing the freelancer from the gig.
pub async fn insert_rating(
    db: &DatabaseConnection,
    gig: &gigs::Model,
    client_id: Uuid,
    input: RatingInput,
) -> Result<gig_ratings::Model, DbErr> {
    let new_rating = gig_ratings::ActiveModel {
        id: Set(Uuid::new_v4()),
        gig_id: Set(gig.id),
        client_id: Set(client_id),
        freelancer_id: Set(gig.freelancer_id),
        rating: Set(input.rating),
        comment: Set(input.comment),
        created_at: Set(chrono::Utc::now()),
    };

    new_rating.insert(db).await
}

/// Mutate an existing rating's value and comment in place.
pub async fn update_rating(
    db: &DatabaseConnection,
    existing: gig_ratings::Model,
    input: RatingInput,
) -> Result<gig_ratings::Model, DbErr> {
    let mut active: gig_ratings::ActiveModel = existing.into();
    active.rating = Set(input.rating);
    active.comment = Set(input.comment);
    active.update(db).await
}

/// All ratings for a gig, newest first.
pub async fn get_ratings_for_gig(
    db: &DatabaseConnection,
    gig_id: Uuid,
) -> Result<Vec<gig_ratings::Model>, DbErr> {
    gig_ratings::Entity::find()
        .filter(gig_ratings::Column::GigId.eq(gig_id))
        .order_by_desc(gig_ratings::Column::CreatedAt)
        .all(db)
        .await
}

/// All ratings across a freelancer's gigs (profile stats).
pub async fn get_ratings_by_freelancer(
    db: &DatabaseConnection,
    freelancer_id: Uuid,
) -> Result<Vec<gig_ratings::Model>, DbErr> {
    gig_ratings::Entity::find()
        .filter(gig_ratings::Column::FreelancerId.eq(freelancer_id))
        .all(db)
        .await
}

/// Recompute a gig's rating aggregate from scratch: read every rating for
/// the gig, average, round to one decimal, write back. O(n) per write, which
/// is fine at per-gig rating volumes, and correct under edits.
///
/// Not transactionally isolated from concurrent submissions for the same
/// gig; last writer wins on the aggregate columns.
pub async fn recompute_gig_aggregate(
    db: &DatabaseConnection,
    gig_id: Uuid,
) -> Result<(f64, i32), DbErr> {
    let ratings = gig_ratings::Entity::find()
        .filter(gig_ratings::Column::GigId.eq(gig_id))
        .all(db)
        .await?;

    let count = ratings.len() as i32;
    let average = if count == 0 {
        0.0
    } else {
        let sum: i64 = ratings.iter().map(|r| i64::from(r.rating)).sum();
        round_one_decimal(sum as f64 / f64::from(count))
    };

    gig_db::set_rating_aggregate(db, gig_id, average, count).await?;
    Ok((average, count))
}

/// Round to one decimal place, matching the stored aggregate precision.
pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::round_one_decimal;

    #[test]
    fn rounds_to_one_decimal() {
        assert_eq!(round_one_decimal(4.0), 4.0);
        assert_eq!(round_one_decimal(3.666_666), 3.7);
        assert_eq!(round_one_decimal(3.25), 3.3);
        assert_eq!(round_one_decimal(2.349_999), 2.3);
        assert_eq!(round_one_decimal(0.0), 0.0);
    }

    #[test]
    fn mean_of_two_ratings() {
        // 4 and 2 average to exactly 3.0
        let avg = round_one_decimal((4.0 + 2.0) / 2.0);
        assert_eq!(avg, 3.0);
        // 5, 4, 4 average to 4.333... -> 4.3
        let avg = round_one_decimal((5.0 + 4.0 + 4.0) / 3.0);
        assert_eq!(avg, 4.3);
    }
}
