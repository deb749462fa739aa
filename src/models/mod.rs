pub mod gig_ratings;
pub mod gigs;
pub mod orders;
pub mod reviews;
pub mod users;
pub mod wishlist;

use sea_orm::FromJsonQueryResult;
use serde::{Deserialize, Serialize};

/// A JSON-backed list of strings (tags, image URLs, skills, portfolio links).
#[derive(
    Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult,
)]
pub struct StringList(pub Vec<String>);
