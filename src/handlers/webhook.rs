use actix_web::{HttpRequest, HttpResponse, web};
use sea_orm::DatabaseConnection;
use serde::Deserialize;

use crate::db::orders as order_db;
use crate::error::ApiError;

/// Shared secret the payment provider signs deliveries with. Loaded once at
/// startup into app data, same as `JwtSecret`.
#[derive(Clone)]
pub struct WebhookSecret(pub String);

impl WebhookSecret {
    pub fn from_env() -> Self {
        let secret =
            std::env::var("PAYMENT_WEBHOOK_SECRET").expect("PAYMENT_WEBHOOK_SECRET must be set");
        Self(secret)
    }
}

/// Compare in time independent of where the first mismatch sits, so the
/// check leaks nothing about the secret's contents.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

/// Payment-provider event envelope. Only `payment.succeeded` carries any
/// behavior today; every other type is acknowledged and dropped.
#[derive(Debug, Deserialize)]
pub struct PaymentEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    pub data: PaymentEventData,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentEventData {
    pub payment_ref: String,
}

/// POST /api/webhook/payment — external payment-event intake. No bearer
/// auth; the provider signs each delivery with a shared secret instead.
pub async fn payment(
    req: HttpRequest,
    db: web::Data<DatabaseConnection>,
    secret: web::Data<WebhookSecret>,
    body: web::Json<PaymentEvent>,
) -> Result<HttpResponse, ApiError> {
    let signature = req
        .headers()
        .get("X-Webhook-Signature")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    if !constant_time_eq(signature.as_bytes(), secret.0.as_bytes()) {
        return Err(ApiError::Validation(
            "Webhook signature verification failed".to_string(),
        ));
    }

    let event = body.into_inner();
    if event.event_type == "payment.succeeded" {
        match order_db::find_by_payment_ref(db.get_ref(), &event.data.payment_ref).await? {
            Some(order) => {
                let order = order_db::mark_payment_received(db.get_ref(), order).await?;
                tracing::info!(order_id = %order.id, "payment confirmed");
            }
            // Unknown references are acknowledged so the provider stops
            // retrying; there is nothing to repair on our side.
            None => {
                tracing::warn!(
                    payment_ref = %event.data.payment_ref,
                    "payment event for unknown order"
                );
            }
        }
    }

    Ok(HttpResponse::Ok().json(serde_json::json!({ "received": true })))
}

#[cfg(test)]
mod tests {
    use super::constant_time_eq;

    #[test]
    fn equal_inputs_match() {
        assert!(constant_time_eq(b"whsec_abc123", b"whsec_abc123"));
    }

    #[test]
    fn differing_inputs_do_not_match() {
        assert!(!constant_time_eq(b"whsec_abc123", b"whsec_abc124"));
        assert!(!constant_time_eq(b"whsec_abc123", b"whsec_abc"));
        assert!(!constant_time_eq(b"", b"whsec_abc123"));
        assert!(constant_time_eq(b"", b""));
    }
}
