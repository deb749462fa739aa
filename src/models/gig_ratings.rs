use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::users::PublicUser;
use crate::error::ApiError;

/// SeaORM entity for the `gig_ratings` table.
///
/// One rating per (gig, client), enforced by a unique index. The freelancer
/// is denormalized from the gig at creation so profile stats can query
/// ratings by freelancer directly.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "gig_ratings")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub gig_id: Uuid,
    pub client_id: Uuid,
    pub freelancer_id: Uuid,
    pub rating: i16,
    #[sea_orm(column_type = "Text", nullable)]
    pub comment: Option<String>,
    pub created_at: DateTimeUtc,
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

/// Body for both adding and updating a rating.
#[derive(Debug, Clone, Deserialize)]
pub struct RatingInput {
    pub rating: i16,
    pub comment: Option<String>,
}

impl RatingInput {
    pub fn validate(&self) -> Result<(), ApiError> {
        if !(1..=5).contains(&self.rating) {
            return Err(ApiError::Validation(
                "Rating must be between 1 and 5".to_string(),
            ));
        }
        if let Some(comment) = &self.comment {
            if comment.chars().count() > 500 {
                return Err(ApiError::Validation(
                    "Comment must be at most 500 characters".to_string(),
                ));
            }
        }
        Ok(())
    }
}

/// A rating with its author's public display data.
#[derive(Debug, Clone, Serialize)]
pub struct RatingWithClient {
    #[serde(flatten)]
    pub rating: Model,
    pub client: Option<PublicUser>,
}

/// Response for add/update rating: the record plus the freshly recomputed
/// gig aggregate.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingResponse {
    pub message: String,
    pub rating: Model,
    pub average_rating: f64,
    pub total_ratings: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_ratings_in_range() {
        for rating in 1..=5 {
            let input = RatingInput {
                rating,
                comment: None,
            };
            assert!(input.validate().is_ok());
        }
    }

    #[test]
    fn rejects_ratings_out_of_range() {
        for rating in [0, 6, -1] {
            let input = RatingInput {
                rating,
                comment: None,
            };
            assert!(input.validate().is_err());
        }
    }

    #[test]
    fn rejects_overlong_comment() {
        let input = RatingInput {
            rating: 4,
            comment: Some("x".repeat(501)),
        };
        assert!(input.validate().is_err());

        let input = RatingInput {
            rating: 4,
            comment: Some("x".repeat(500)),
        };
        assert!(input.validate().is_ok());
    }
}
