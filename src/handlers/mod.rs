pub mod auth;
pub mod gig_ratings;
pub mod gigs;
pub mod orders;
pub mod profile;
pub mod reviews;
pub mod upload;
pub mod webhook;
pub mod wishlist;

use actix_web::web;

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    // ── Payment webhook (signature-verified, no bearer auth) ──
    cfg.service(
        web::scope("/webhook").route("/payment", web::post().to(webhook::payment)),
    );

    // ── Auth routes (public) ──
    cfg.service(
        web::scope("/auth")
            .route("/signup", web::post().to(auth::signup))
            .route("/login", web::post().to(auth::login)),
    );

    // ── Gig routes. "/freelancer" must be registered before "/{id}". ──
    cfg.service(
        web::scope("/gigs")
            .route("", web::get().to(gigs::get_gigs))
            .route("", web::post().to(gigs::create_gig))
            .route("/freelancer", web::get().to(gigs::get_my_gigs))
            .route("/{id}", web::get().to(gigs::get_gig))
            .route("/{id}", web::put().to(gigs::update_gig))
            .route("/{id}", web::delete().to(gigs::delete_gig))
            .route("/{id}/view", web::post().to(gigs::track_view))
            .route("/{id}/toggle-status", web::patch().to(gigs::toggle_status)),
    );

    // ── Order routes ──
    cfg.service(
        web::scope("/orders")
            .route("", web::post().to(orders::create_order))
            .route("", web::get().to(orders::get_orders))
            .route("/{id}/status", web::patch().to(orders::update_status)),
    );

    // ── Gig rating routes ──
    cfg.service(
        web::scope("/gig-ratings")
            .route("/{gig_id}", web::post().to(gig_ratings::add_rating))
            .route("/{gig_id}", web::get().to(gig_ratings::get_ratings))
            .route("/{gig_id}", web::put().to(gig_ratings::update_rating))
            .route(
                "/{gig_id}/user-rating",
                web::get().to(gig_ratings::get_user_rating),
            ),
    );

    // ── Review routes ──
    cfg.service(
        web::scope("/reviews")
            .route("", web::post().to(reviews::create_review))
            .route(
                "/freelancer/{freelancer_id}",
                web::get().to(reviews::get_freelancer_reviews),
            ),
    );

    // ── Profile routes ──
    cfg.service(
        web::scope("/profile")
            .route("", web::get().to(profile::get_profile))
            .route("", web::put().to(profile::update_profile))
            .route("/{id}", web::get().to(profile::get_public_profile)),
    );

    // ── Wishlist routes (client only) ──
    cfg.service(
        web::scope("/wishlist")
            .route("", web::get().to(wishlist::get_wishlist))
            .route("/{gig_id}", web::post().to(wishlist::add_to_wishlist))
            .route("/{gig_id}", web::delete().to(wishlist::remove_from_wishlist)),
    );

    // ── Image upload routes ──
    cfg.service(
        web::scope("/upload")
            .route("/single", web::post().to(upload::upload_single))
            .route("/multiple", web::post().to(upload::upload_multiple)),
    );
}
