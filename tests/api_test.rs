//! Behavior tests for the HTTP surface and the query layer, backed by
//! SeaORM's `MockDatabase`. No running Postgres is needed: each test seeds
//! the result sets the handler will consume, in call order, and asserts on
//! the response (and, where it matters, on the statements actually issued).
//!
//! Run with: `cargo test --test api_test`
use std::collections::BTreeMap;

use actix_web::{App, http::StatusCode, test, web};
use chrono::Utc;
use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
use uuid::Uuid;

use gigmarket_backend::auth::jwt::issue_token;
use gigmarket_backend::auth::middleware::JwtSecret;
use gigmarket_backend::db::gig_ratings as rating_db;
use gigmarket_backend::handlers;
use gigmarket_backend::handlers::upload::UploadConfig;
use gigmarket_backend::models::StringList;
use gigmarket_backend::models::users::{self, Roles};
use gigmarket_backend::models::{gig_ratings, gigs};

const TEST_SECRET: &str = "test-secret-at-least-256-bits-long-for-hs256-xxxxxxx";

fn user(role: Roles) -> users::Model {
    users::Model {
        id: Uuid::new_v4(),
        name: "Sam Doe".to_string(),
        email: format!("{}@example.com", Uuid::new_v4()),
        password_hash: "$2b$10$irrelevant".to_string(),
        role,
        bio: None,
        location: None,
        skills: StringList(Vec::new()),
        portfolio: StringList(Vec::new()),
        created_at: Utc::now(),
        updated_at: None,
    }
}

fn gig(freelancer_id: Uuid) -> gigs::Model {
    gigs::Model {
        id: Uuid::new_v4(),
        freelancer_id,
        title: "Logo design with three revisions".to_string(),
        description: "a".repeat(60),
        category: "design".to_string(),
        price: 50.0,
        delivery_time: 3,
        tags: StringList(Vec::new()),
        images: StringList(Vec::new()),
        is_active: true,
        views: 0,
        average_rating: 0.0,
        total_ratings: 0,
        created_at: Utc::now(),
    }
}

fn rating(gig: &gigs::Model, client_id: Uuid, value: i16) -> gig_ratings::Model {
    gig_ratings::Model {
        id: Uuid::new_v4(),
        gig_id: gig.id,
        client_id,
        freelancer_id: gig.freelancer_id,
        rating: value,
        comment: None,
        created_at: Utc::now(),
    }
}

fn bearer(user: &users::Model) -> (&'static str, String) {
    let token = issue_token(user.id, &user.role, TEST_SECRET).unwrap();
    ("Authorization", format!("Bearer {token}"))
}

/// One `SELECT COUNT(*)` result row, the shape SeaORM's paginator reads.
fn count_row(n: i64) -> BTreeMap<&'static str, sea_orm::Value> {
    BTreeMap::from([("num_items", sea_orm::Value::BigInt(Some(n)))])
}

#[actix_web::test]
async fn second_rating_for_same_gig_conflicts() {
    let client = user(Roles::Client);
    let gig = gig(Uuid::new_v4());
    let existing = rating(&gig, client.id, 4);

    // Call order: caller lookup, gig lookup, then the per-client rating
    // lookup that finds the earlier submission.
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![client.clone()]])
        .append_query_results([vec![gig.clone()]])
        .append_query_results([vec![existing]])
        .into_connection();

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(db))
            .app_data(web::Data::new(JwtSecret(TEST_SECRET.to_string())))
            .service(web::scope("/api").configure(handlers::init_routes)),
    )
    .await;

    let req = test::TestRequest::post()
        .uri(&format!("/api/gig-ratings/{}", gig.id))
        .insert_header(bearer(&client))
        .set_json(serde_json::json!({ "rating": 5 }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::CONFLICT);
}

#[actix_web::test]
async fn non_owner_gig_update_is_not_found_and_writes_nothing() {
    let intruder = user(Roles::Freelancer);

    // The ownership-filtered lookup comes back empty for a non-owner, the
    // same as for a missing id.
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![intruder.clone()]])
        .append_query_results([Vec::<gigs::Model>::new()])
        .into_connection();
    let db_handle = db.clone();

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(db))
            .app_data(web::Data::new(JwtSecret(TEST_SECRET.to_string())))
            .service(web::scope("/api").configure(handlers::init_routes)),
    )
    .await;

    let req = test::TestRequest::put()
        .uri(&format!("/api/gigs/{}", Uuid::new_v4()))
        .insert_header(bearer(&intruder))
        .set_json(serde_json::json!({ "price": 25.0 }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // The lookup itself constrained on the owner, and no mutation was ever
    // issued.
    let log = format!("{:?}", db_handle.into_transaction_log());
    assert!(log.contains("freelancer_id"));
    assert!(!log.contains("UPDATE"));
}

#[actix_web::test]
async fn removing_absent_wishlist_entry_is_ok() {
    let client = user(Roles::Client);

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![client.clone()]])
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 0,
        }])
        .into_connection();

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(db))
            .app_data(web::Data::new(JwtSecret(TEST_SECRET.to_string())))
            .service(web::scope("/api").configure(handlers::init_routes)),
    )
    .await;

    let req = test::TestRequest::delete()
        .uri(&format!("/api/wishlist/{}", Uuid::new_v4()))
        .insert_header(bearer(&client))
        .to_request();
    let resp = test::call_service(&app, req).await;

    // Deleting nothing is still success; the wishlist is a set.
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn saving_an_already_saved_gig_conflicts() {
    let client = user(Roles::Client);
    let gig = gig(Uuid::new_v4());

    // Caller lookup, gig lookup, then the membership count that finds the
    // gig already saved.
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![client.clone()]])
        .append_query_results([vec![gig.clone()]])
        .append_query_results([vec![count_row(1)]])
        .into_connection();

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(db))
            .app_data(web::Data::new(JwtSecret(TEST_SECRET.to_string())))
            .service(web::scope("/api").configure(handlers::init_routes)),
    )
    .await;

    let req = test::TestRequest::post()
        .uri(&format!("/api/wishlist/{}", gig.id))
        .insert_header(bearer(&client))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::CONFLICT);
}

#[actix_web::test]
async fn rating_aggregate_is_mean_of_all_ratings() {
    let gig = gig(Uuid::new_v4());

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![
            rating(&gig, Uuid::new_v4(), 4),
            rating(&gig, Uuid::new_v4(), 2),
        ]])
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        }])
        .into_connection();

    let (average, total) = rating_db::recompute_gig_aggregate(&db, gig.id)
        .await
        .unwrap();

    assert_eq!(average, 3.0);
    assert_eq!(total, 2);
}

fn multipart_body(boundary: &str, files: usize) -> Vec<u8> {
    let mut body = Vec::new();
    for i in 0..files {
        body.extend_from_slice(
            format!(
                "--{boundary}\r\n\
                 Content-Disposition: form-data; name=\"images\"; filename=\"img{i}.png\"\r\n\
                 Content-Type: image/png\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(b"not-really-a-png");
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());
    body
}

#[actix_web::test]
async fn upload_stores_at_most_five_files_and_ignores_extras() {
    let caller = user(Roles::Freelancer);
    let upload_dir = std::env::temp_dir().join(format!("gigmarket-test-{}", Uuid::new_v4()));

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![caller.clone()]])
        .into_connection();

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(db))
            .app_data(web::Data::new(JwtSecret(TEST_SECRET.to_string())))
            .app_data(web::Data::new(UploadConfig {
                dir: upload_dir.clone(),
            }))
            .service(web::scope("/api").configure(handlers::init_routes)),
    )
    .await;

    let boundary = "----gigmarket-test-boundary";
    let req = test::TestRequest::post()
        .uri("/api/upload/multiple")
        .insert_header(bearer(&caller))
        .insert_header((
            "Content-Type",
            format!("multipart/form-data; boundary={boundary}"),
        ))
        .set_payload(multipart_body(boundary, 6))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["imagePaths"].as_array().unwrap().len(), 5);

    // Exactly five files on disk: the sixth was never written, and nothing
    // was left behind by a mid-request failure.
    let stored = std::fs::read_dir(upload_dir.join("gigs")).unwrap().count();
    assert_eq!(stored, 5);

    std::fs::remove_dir_all(&upload_dir).unwrap();
}
