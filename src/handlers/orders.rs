use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::auth::middleware::{AuthenticatedUser, Client, Freelancer};
use crate::db::gigs as gig_db;
use crate::db::orders as order_db;
use crate::db::users as user_db;
use crate::error::ApiError;
use crate::models::orders::{self, CreateOrderRequest, OrderWithDetails, UpdateOrderStatus};
use crate::models::users::{PublicUser, Roles};

/// POST /api/orders — a client orders a gig. Price and delivery time are
/// snapshotted from the gig as it stands now. The active flag is not
/// checked, so deactivated gigs remain orderable.
pub async fn create_order(
    user: Client,
    db: web::Data<DatabaseConnection>,
    body: web::Json<CreateOrderRequest>,
) -> Result<HttpResponse, ApiError> {
    let gig_id = body.gig_id;

    let gig = gig_db::get_gig_by_id(db.get_ref(), gig_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Gig not found".to_string()))?;

    let order = order_db::insert_order(db.get_ref(), &gig, user.0.id).await?;
    tracing::info!(order_id = %order.id, gig_id = %gig.id, "order created");

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "orderId": order.id,
        "message": "Order created successfully!",
    })))
}

/// Resolve each order with its gig and the counterparty's display data.
async fn with_details(
    db: &DatabaseConnection,
    orders: Vec<orders::Model>,
    caller_role: &Roles,
) -> Result<Vec<OrderWithDetails>, ApiError> {
    let mut details = Vec::with_capacity(orders.len());

    for order in orders {
        let gig = gig_db::get_gig_by_id(db, order.gig_id).await?;

        // A client sees the freelancer side, a freelancer the client side.
        let counterparty_id = match caller_role {
            Roles::Client => order.freelancer_id,
            Roles::Freelancer => order.client_id,
        };
        let counterparty = user_db::get_user_by_id(db, counterparty_id)
            .await?
            .as_ref()
            .map(PublicUser::from);

        let (client, freelancer) = match caller_role {
            Roles::Client => (None, counterparty),
            Roles::Freelancer => (counterparty, None),
        };

        details.push(OrderWithDetails {
            order,
            gig,
            client,
            freelancer,
        });
    }

    Ok(details)
}

/// GET /api/orders — the caller's orders, role-scoped, newest first.
pub async fn get_orders(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, ApiError> {
    let orders = match user.0.role {
        Roles::Client => order_db::get_orders_by_client(db.get_ref(), user.0.id).await?,
        Roles::Freelancer => order_db::get_orders_by_freelancer(db.get_ref(), user.0.id).await?,
    };

    let orders = with_details(db.get_ref(), orders, &user.0.role).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "orders": orders })))
}

/// PATCH /api/orders/{id}/status — the owning freelancer sets the status.
/// Both directions between pending and delivered are accepted.
pub async fn update_status(
    user: Freelancer,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateOrderStatus>,
) -> Result<HttpResponse, ApiError> {
    let order_id = path.into_inner();

    let order = order_db::find_owned(db.get_ref(), order_id, user.0.id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Order not found or not authorized".to_string()))?;

    let order = order_db::update_status(db.get_ref(), order, body.status).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Order status updated successfully",
        "order": order,
    })))
}
