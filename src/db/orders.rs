use sea_orm::*;
use uuid::Uuid;

use crate::models::gigs;
use crate::models::orders::{self, Status};

/// Build the row for a fresh order, snapshotting price and delivery time
/// from the gig as it stands right now. Later gig edits do not track back
/// into the order.
fn order_from_gig(gig: &gigs::Model, client_id: Uuid) -> orders::ActiveModel {
    let now = chrono::Utc::now();
    orders::ActiveModel {
        id: Set(Uuid::new_v4()),
        gig_id: Set(gig.id),
        client_id: Set(client_id),
        freelancer_id: Set(gig.freelancer_id),
        price: Set(gig.price),
        delivery_time: Set(gig.delivery_time),
        status: Set(Status::Pending),
        // Placeholder until the payment webhook supplies a real reference.
        payment_ref: Set(format!("temp_{}", now.timestamp_millis())),
        created_at: Set(now),
        updated_at: Set(now),
    }
}

/// Insert a new order for the given gig and client.
pub async fn insert_order(
    db: &DatabaseConnection,
    gig: &gigs::Model,
    client_id: Uuid,
) -> Result<orders::Model, DbErr> {
    order_from_gig(gig, client_id).insert(db).await
}

/// Fetch a client's orders, newest first.
pub async fn get_orders_by_client(
    db: &DatabaseConnection,
    client_id: Uuid,
) -> Result<Vec<orders::Model>, DbErr> {
    orders::Entity::find()
        .filter(orders::Column::ClientId.eq(client_id))
        .order_by_desc(orders::Column::CreatedAt)
        .all(db)
        .await
}

/// Fetch a freelancer's orders, newest first.
pub async fn get_orders_by_freelancer(
    db: &DatabaseConnection,
    freelancer_id: Uuid,
) -> Result<Vec<orders::Model>, DbErr> {
    orders::Entity::find()
        .filter(orders::Column::FreelancerId.eq(freelancer_id))
        .order_by_desc(orders::Column::CreatedAt)
        .all(db)
        .await
}

/// Fetch a single order by ID.
pub async fn get_order_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<orders::Model>, DbErr> {
    orders::Entity::find_by_id(id).one(db).await
}

/// Fetch an order only if the given freelancer owns it. Existence and
/// ownership are checked together, same as gigs.
pub async fn find_owned(
    db: &DatabaseConnection,
    id: Uuid,
    freelancer_id: Uuid,
) -> Result<Option<orders::Model>, DbErr> {
    orders::Entity::find_by_id(id)
        .filter(orders::Column::FreelancerId.eq(freelancer_id))
        .one(db)
        .await
}

/// Overwrite the status of an already-ownership-checked order and bump its
/// update timestamp. Both transition directions are accepted.
pub async fn update_status(
    db: &DatabaseConnection,
    order: orders::Model,
    status: Status,
) -> Result<orders::Model, DbErr> {
    let mut active: orders::ActiveModel = order.into();
    active.status = Set(status);
    active.updated_at = Set(chrono::Utc::now());
    active.update(db).await
}

/// Look up an order by its payment reference (webhook intake).
pub async fn find_by_payment_ref(
    db: &DatabaseConnection,
    payment_ref: &str,
) -> Result<Option<orders::Model>, DbErr> {
    orders::Entity::find()
        .filter(orders::Column::PaymentRef.eq(payment_ref))
        .one(db)
        .await
}

/// Record a payment confirmation on an order by bumping its update
/// timestamp. The two-state status model stays untouched.
pub async fn mark_payment_received(
    db: &DatabaseConnection,
    order: orders::Model,
) -> Result<orders::Model, DbErr> {
    let mut active: orders::ActiveModel = order.into();
    active.updated_at = Set(chrono::Utc::now());
    active.update(db).await
}

/// Count a freelancer's delivered orders (profile stats).
pub async fn count_delivered_by_freelancer(
    db: &DatabaseConnection,
    freelancer_id: Uuid,
) -> Result<u64, DbErr> {
    orders::Entity::find()
        .filter(orders::Column::FreelancerId.eq(freelancer_id))
        .filter(orders::Column::Status.eq(Status::Delivered))
        .count(db)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::StringList;

    fn gig(price: f64, delivery_time: i32) -> gigs::Model {
        gigs::Model {
            id: Uuid::new_v4(),
            freelancer_id: Uuid::new_v4(),
            title: "Logo design with three revisions".to_string(),
            description: String::new(),
            category: "design".to_string(),
            price,
            delivery_time,
            tags: StringList(Vec::new()),
            images: StringList(Vec::new()),
            is_active: true,
            views: 0,
            average_rating: 0.0,
            total_ratings: 0,
            created_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn new_order_snapshots_the_gig_terms() {
        let gig = gig(120.0, 7);
        let client_id = Uuid::new_v4();

        let order = order_from_gig(&gig, client_id);

        // The order carries copies of the gig's terms, so editing the gig
        // afterwards cannot change what the client agreed to pay.
        assert_eq!(order.price.unwrap(), 120.0);
        assert_eq!(order.delivery_time.unwrap(), 7);
        assert_eq!(order.gig_id.unwrap(), gig.id);
        assert_eq!(order.client_id.unwrap(), client_id);
        assert_eq!(order.freelancer_id.unwrap(), gig.freelancer_id);
        assert_eq!(order.status.unwrap(), Status::Pending);
    }

    #[test]
    fn new_order_starts_with_placeholder_payment_ref() {
        let order = order_from_gig(&gig(50.0, 3), Uuid::new_v4());
        assert!(order.payment_ref.unwrap().starts_with("temp_"));
    }
}
