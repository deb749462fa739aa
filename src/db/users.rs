use sea_orm::*;
use uuid::Uuid;

use crate::models::StringList;
use crate::models::users::{self, Roles, UpdateProfile};

/// Insert a new user at signup. The password must already be hashed.
pub async fn insert_user(
    db: &DatabaseConnection,
    name: String,
    email: String,
    password_hash: String,
    role: Roles,
) -> Result<users::Model, DbErr> {
    let new_user = users::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name),
        email: Set(email),
        password_hash: Set(password_hash),
        role: Set(role),
        bio: Set(None),
        location: Set(None),
        skills: Set(StringList::default()),
        portfolio: Set(StringList::default()),
        created_at: Set(chrono::Utc::now()),
        updated_at: Set(None),
    };

    new_user.insert(db).await
}

/// Look up a user by email (unique).
pub async fn find_by_email(
    db: &DatabaseConnection,
    email: &str,
) -> Result<Option<users::Model>, DbErr> {
    users::Entity::find()
        .filter(users::Column::Email.eq(email))
        .one(db)
        .await
}

/// Fetch a single user by ID.
pub async fn get_user_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<users::Model>, DbErr> {
    users::Entity::find_by_id(id).one(db).await
}

/// Fetch users by ID in one query, for resolving owners/authors in lists.
pub async fn get_users_by_ids(
    db: &DatabaseConnection,
    ids: Vec<Uuid>,
) -> Result<Vec<users::Model>, DbErr> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    users::Entity::find()
        .filter(users::Column::Id.is_in(ids))
        .all(db)
        .await
}

/// Apply a whitelisted profile update. Role, email and password are never
/// touched here.
pub async fn update_profile(
    db: &DatabaseConnection,
    user: users::Model,
    input: UpdateProfile,
) -> Result<users::Model, DbErr> {
    let mut active: users::ActiveModel = user.into();

    if let Some(name) = input.name {
        active.name = Set(name);
    }
    if let Some(bio) = input.bio {
        active.bio = Set(Some(bio));
    }
    if let Some(location) = input.location {
        active.location = Set(Some(location));
    }
    if let Some(skills) = input.skills {
        active.skills = Set(StringList(skills));
    }
    if let Some(portfolio) = input.portfolio {
        active.portfolio = Set(StringList(portfolio));
    }
    active.updated_at = Set(Some(chrono::Utc::now()));

    active.update(db).await
}
