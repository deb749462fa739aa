use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;

use crate::auth::middleware::JwtSecret;
use crate::auth::{jwt, password};
use crate::db::users as user_db;
use crate::error::ApiError;
use crate::models::users::{LoginRequest, SignupRequest, UserResponse};

/// POST /api/auth/signup — create an account and return a bearer token.
pub async fn signup(
    db: web::Data<DatabaseConnection>,
    secret: web::Data<JwtSecret>,
    body: web::Json<SignupRequest>,
) -> Result<HttpResponse, ApiError> {
    let input = body.into_inner();

    if user_db::find_by_email(db.get_ref(), &input.email)
        .await?
        .is_some()
    {
        return Err(ApiError::Conflict("User already exists".to_string()));
    }

    let password_hash = password::hash_password(&input.password)
        .map_err(|e| ApiError::Internal(format!("password hashing failed: {e}")))?;

    let user = user_db::insert_user(
        db.get_ref(),
        input.name,
        input.email,
        password_hash,
        input.role,
    )
    .await?;

    let token = jwt::issue_token(user.id, &user.role, &secret.0)
        .map_err(|e| ApiError::Internal(format!("token signing failed: {e}")))?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "token": token,
        "user": UserResponse::from(user),
    })))
}

/// POST /api/auth/login — verify credentials and return a bearer token.
///
/// The error is the same whether the email is unknown or the password is
/// wrong.
pub async fn login(
    db: web::Data<DatabaseConnection>,
    secret: web::Data<JwtSecret>,
    body: web::Json<LoginRequest>,
) -> Result<HttpResponse, ApiError> {
    let input = body.into_inner();

    let user = user_db::find_by_email(db.get_ref(), &input.email)
        .await?
        .ok_or(ApiError::InvalidCredentials)?;

    let matches = password::verify_password(&input.password, &user.password_hash)
        .map_err(|e| ApiError::Internal(format!("password verification failed: {e}")))?;
    if !matches {
        return Err(ApiError::InvalidCredentials);
    }

    let token = jwt::issue_token(user.id, &user.role, &secret.0)
        .map_err(|e| ApiError::Internal(format!("token signing failed: {e}")))?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "token": token,
        "user": UserResponse::from(user),
    })))
}
