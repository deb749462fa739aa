use actix_web::FromRequest;
use actix_web::{HttpRequest, dev::Payload, web};
use sea_orm::DatabaseConnection;
use std::future::Future;
use std::pin::Pin;

use crate::auth::jwt;
use crate::db::users::get_user_by_id;
use crate::error::ApiError;
use crate::models::users::{self, Roles};

/// Wrapper type to store the JWT secret in Actix app data.
#[derive(Clone)]
pub struct JwtSecret(pub String);

/// The authenticated caller, resolved from the bearer token and the
/// database. Handlers take this as a typed argument, so caller identity is
/// explicit context rather than ambient state.
///
/// Every failure mode (missing/malformed header, bad signature, expired
/// token, account no longer existing) surfaces as the same uniform 401.
pub struct AuthenticatedUser(pub users::Model);

impl FromRequest for AuthenticatedUser {
    type Error = ApiError;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();

        Box::pin(async move {
            let auth_header = req
                .headers()
                .get("Authorization")
                .and_then(|v| v.to_str().ok())
                .ok_or(ApiError::Unauthorized)?;

            let token = auth_header
                .strip_prefix("Bearer ")
                .ok_or(ApiError::Unauthorized)?;

            let secret = req
                .app_data::<web::Data<JwtSecret>>()
                .ok_or_else(|| ApiError::Internal("JWT secret not configured".to_string()))?;

            let claims =
                jwt::validate_token(token, &secret.0).map_err(|_| ApiError::Unauthorized)?;

            let user_id = claims.user_id().map_err(|_| ApiError::Unauthorized)?;

            let db = req
                .app_data::<web::Data<DatabaseConnection>>()
                .ok_or_else(|| ApiError::Internal("Database not configured".to_string()))?;

            // The token may outlive the account; treat a dangling id as the
            // same uniform 401.
            let user = get_user_by_id(db.get_ref(), user_id)
                .await?
                .ok_or(ApiError::Unauthorized)?;

            Ok(AuthenticatedUser(user))
        })
    }
}

/// An authenticated caller proven to hold the client role. Building the role
/// check into the extractor makes "authenticate before role-check" a
/// compile-time property of every handler that takes one.
pub struct Client(pub users::Model);

impl FromRequest for Client {
    type Error = ApiError;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = AuthenticatedUser::from_request(req, payload);
        Box::pin(async move {
            let user = fut.await?;
            if user.0.role != Roles::Client {
                return Err(ApiError::Forbidden);
            }
            Ok(Client(user.0))
        })
    }
}

/// An authenticated caller proven to hold the freelancer role.
pub struct Freelancer(pub users::Model);

impl FromRequest for Freelancer {
    type Error = ApiError;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = AuthenticatedUser::from_request(req, payload);
        Box::pin(async move {
            let user = fut.await?;
            if user.0.role != Roles::Freelancer {
                return Err(ApiError::Forbidden);
            }
            Ok(Freelancer(user.0))
        })
    }
}
