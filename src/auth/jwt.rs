use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::users::Roles;

/// Token lifetime: one day.
const TOKEN_TTL_SECS: usize = 24 * 60 * 60;

/// Claims carried by the bearer token: the account id, its role, and the
/// standard expiry/issued-at pair. Signed HS256 with the server secret.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// The account UUID.
    pub sub: String,
    /// The account role at issue time ("client" or "freelancer").
    pub role: String,
    /// Token expiration (Unix timestamp).
    pub exp: usize,
    /// Token issued-at (Unix timestamp).
    pub iat: usize,
}

impl Claims {
    /// Extract the account UUID from the `sub` claim.
    pub fn user_id(&self) -> Result<Uuid, String> {
        Uuid::parse_str(&self.sub).map_err(|e| format!("Invalid UUID in sub claim: {e}"))
    }
}

/// Issue a signed token for an account, expiring in one day.
pub fn issue_token(
    user_id: Uuid,
    role: &Roles,
    secret: &str,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = Utc::now().timestamp() as usize;
    let role = match role {
        Roles::Client => "client",
        Roles::Freelancer => "freelancer",
    };

    let claims = Claims {
        sub: user_id.to_string(),
        role: role.to_string(),
        exp: now + TOKEN_TTL_SECS,
        iat: now,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

/// Validate a token's signature and expiry and return the decoded claims.
pub fn validate_token(token: &str, secret: &str) -> Result<Claims, String> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )
    .map(|data| data.claims)
    .map_err(|e| format!("{:?}", e.kind()))
}
