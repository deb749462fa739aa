use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::StringList;
use super::users::FreelancerSummary;
use crate::error::ApiError;

/// SeaORM entity for the `gigs` table.
///
/// `average_rating` and `total_ratings` are derived columns maintained by the
/// rating aggregation in `db::gig_ratings`; nothing else writes them.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "gigs")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub freelancer_id: Uuid,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub category: String,
    #[sea_orm(column_type = "Double")]
    pub price: f64,
    /// Delivery time in days.
    pub delivery_time: i32,
    #[sea_orm(column_type = "JsonBinary")]
    pub tags: StringList,
    #[sea_orm(column_type = "JsonBinary")]
    pub images: StringList,
    pub is_active: bool,
    pub views: i32,
    #[sea_orm(column_type = "Double")]
    pub average_rating: f64,
    pub total_ratings: i32,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::FreelancerId",
        to = "super::users::Column::Id"
    )]
    Freelancer,
    #[sea_orm(has_many = "super::orders::Entity")]
    Orders,
    #[sea_orm(has_many = "super::gig_ratings::Entity")]
    Ratings,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Freelancer.def()
    }
}

impl Related<super::orders::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Orders.def()
    }
}

impl Related<super::gig_ratings::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Ratings.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// ── Validation bounds shared by create and update ──

fn validate_title(title: &str) -> Result<(), ApiError> {
    let len = title.trim().chars().count();
    if !(10..=100).contains(&len) {
        return Err(ApiError::Validation(
            "Title must be between 10 and 100 characters".to_string(),
        ));
    }
    Ok(())
}

fn validate_description(description: &str) -> Result<(), ApiError> {
    let len = description.trim().chars().count();
    if !(50..=2000).contains(&len) {
        return Err(ApiError::Validation(
            "Description must be between 50 and 2000 characters".to_string(),
        ));
    }
    Ok(())
}

fn validate_price(price: f64) -> Result<(), ApiError> {
    if price <= 0.0 || price > 10_000.0 {
        return Err(ApiError::Validation(
            "Price must be between $1 and $10,000".to_string(),
        ));
    }
    Ok(())
}

fn validate_delivery_time(days: i32) -> Result<(), ApiError> {
    if days <= 0 || days > 365 {
        return Err(ApiError::Validation(
            "Delivery time must be between 1 and 365 days".to_string(),
        ));
    }
    Ok(())
}

// ── DTOs ──

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGig {
    pub title: String,
    pub description: String,
    pub category: String,
    pub price: f64,
    pub delivery_time: i32,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub images: Vec<String>,
}

impl CreateGig {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.category.trim().is_empty() {
            return Err(ApiError::Validation(
                "All required fields must be provided".to_string(),
            ));
        }
        validate_title(&self.title)?;
        validate_description(&self.description)?;
        validate_price(self.price)?;
        validate_delivery_time(self.delivery_time)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGig {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub price: Option<f64>,
    pub delivery_time: Option<i32>,
    pub tags: Option<Vec<String>>,
    pub images: Option<Vec<String>>,
}

impl UpdateGig {
    /// Re-validates only the fields present, with the same bounds as create.
    pub fn validate(&self) -> Result<(), ApiError> {
        if let Some(title) = &self.title {
            validate_title(title)?;
        }
        if let Some(description) = &self.description {
            validate_description(description)?;
        }
        if let Some(price) = self.price {
            validate_price(price)?;
        }
        if let Some(days) = self.delivery_time {
            validate_delivery_time(days)?;
        }
        Ok(())
    }
}

/// A gig enriched with its owner's public profile, as returned by the public
/// listing endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct GigWithFreelancer {
    #[serde(flatten)]
    pub gig: Model,
    pub freelancer: Option<FreelancerSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_create() -> CreateGig {
        CreateGig {
            title: "Logo design pack".to_string(),
            description: "I will design a modern, minimal logo for your business \
                          with unlimited revisions until you are happy."
                .to_string(),
            category: "design".to_string(),
            price: 50.0,
            delivery_time: 3,
            tags: vec![],
            images: vec![],
        }
    }

    #[test]
    fn accepts_valid_gig() {
        assert!(valid_create().validate().is_ok());
    }

    #[test]
    fn rejects_short_title() {
        let mut gig = valid_create();
        gig.title = "Too short".to_string(); // 9 chars
        assert!(gig.validate().is_err());
    }

    #[test]
    fn accepts_title_at_bounds() {
        let mut gig = valid_create();
        gig.title = "a".repeat(10);
        assert!(gig.validate().is_ok());
        gig.title = "a".repeat(100);
        assert!(gig.validate().is_ok());
        gig.title = "a".repeat(101);
        assert!(gig.validate().is_err());
    }

    #[test]
    fn rejects_short_description() {
        let mut gig = valid_create();
        gig.description = "a".repeat(49);
        assert!(gig.validate().is_err());
    }

    #[test]
    fn rejects_out_of_range_price() {
        let mut gig = valid_create();
        gig.price = 0.0;
        assert!(gig.validate().is_err());
        gig.price = 10_000.5;
        assert!(gig.validate().is_err());
        gig.price = 10_000.0;
        assert!(gig.validate().is_ok());
    }

    #[test]
    fn rejects_out_of_range_delivery_time() {
        let mut gig = valid_create();
        gig.delivery_time = 0;
        assert!(gig.validate().is_err());
        gig.delivery_time = 366;
        assert!(gig.validate().is_err());
        gig.delivery_time = 365;
        assert!(gig.validate().is_ok());
    }

    #[test]
    fn rejects_missing_category() {
        let mut gig = valid_create();
        gig.category = "  ".to_string();
        assert!(gig.validate().is_err());
    }

    #[test]
    fn update_validates_only_present_fields() {
        let update = UpdateGig {
            title: None,
            description: None,
            category: None,
            price: Some(25.0),
            delivery_time: None,
            tags: None,
            images: None,
        };
        assert!(update.validate().is_ok());

        let update = UpdateGig {
            title: Some("short".to_string()),
            description: None,
            category: None,
            price: None,
            delivery_time: None,
            tags: None,
            images: None,
        };
        assert!(update.validate().is_err());
    }
}
