use actix_cors::Cors;
use actix_files::Files;
use actix_web::{App, HttpServer, web};
use dotenv::dotenv;
use gigmarket_backend::auth::middleware::JwtSecret;
use gigmarket_backend::create_pool;
use gigmarket_backend::handlers;
use gigmarket_backend::handlers::upload::UploadConfig;
use gigmarket_backend::handlers::webhook::WebhookSecret;
use migration::{Migrator, MigratorTrait};
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let db = create_pool().await;
    Migrator::up(&db, None).await.expect("Migrations failed");
    let db_data = web::Data::new(db);

    let jwt_secret = std::env::var("JWT_SECRET").expect("JWT_SECRET must be set");
    let jwt_data = web::Data::new(JwtSecret(jwt_secret));
    let webhook_data = web::Data::new(WebhookSecret::from_env());

    let upload_config = UploadConfig::from_env();
    let upload_dir = upload_config.dir.clone();
    std::fs::create_dir_all(upload_dir.join("gigs"))?;
    let upload_data = web::Data::new(upload_config);

    let port = std::env::var("PORT").unwrap_or_else(|_| "8080".to_string());
    let bind_addr = format!("0.0.0.0:{port}");
    tracing::info!("Server running at http://{bind_addr}");

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allowed_methods(vec!["GET", "POST", "PUT", "PATCH", "DELETE", "OPTIONS"])
            .allowed_headers(vec![
                actix_web::http::header::AUTHORIZATION,
                actix_web::http::header::CONTENT_TYPE,
                actix_web::http::header::ACCEPT,
            ])
            .max_age(3600);

        App::new()
            .wrap(cors)
            .app_data(db_data.clone())
            .app_data(jwt_data.clone())
            .app_data(webhook_data.clone())
            .app_data(upload_data.clone())
            .service(web::scope("/api").configure(handlers::init_routes))
            .service(Files::new("/uploads", upload_dir.clone()))
    })
    .bind(&bind_addr)?
    .run()
    .await
}
