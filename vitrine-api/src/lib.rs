pub mod config;
pub mod routes;
pub mod state;

use std::sync::Arc;

use axum::middleware;
use axum::routing::{get, post, put};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use vitrine_shared::middleware::metrics_middleware;

pub use state::AppState;

pub fn build_router(state: Arc<AppState>) -> Router {
    use routes::admin;

    let admin_routes = Router::new()
        .route("/stats", get(admin::get_stats))
        .route("/reset", post(admin::reset))
        .route("/profiles", get(admin::list_profiles).post(admin::create_profile))
        .route(
            "/profiles/panel",
            get(admin::get_profile_panel)
                .put(admin::set_profile_panel)
                .delete(admin::reset_profile_panel),
        )
        .route("/profiles/select-all", post(admin::toggle_all_profiles))
        .route("/profiles/bulk", post(admin::bulk_profiles))
        .route("/profiles/:id/select", post(admin::toggle_profile_selection))
        .route("/profiles/:id/verify", post(admin::verify_profile))
        .route("/profiles/:id/feature", post(admin::toggle_featured))
        .route("/profiles/:id/vip", post(admin::toggle_vip))
        .route("/profiles/:id/membership", put(admin::set_membership))
        .route("/profiles/:id/reject", post(admin::reject_profile))
        .route("/reviews", get(admin::list_reviews))
        .route("/reviews/:id/approve", post(admin::approve_review))
        .route("/reviews/:id/reject", post(admin::reject_review))
        .route("/events", get(admin::list_events).post(admin::create_event))
        .route("/events/:id", put(admin::update_event).delete(admin::delete_event))
        .route("/events/:id/publish", post(admin::publish_event))
        .route("/events/:id/end", post(admin::end_event))
        .route("/ads", get(admin::list_ads).post(admin::create_ad))
        .route("/ads/:id", put(admin::update_ad).delete(admin::delete_ad))
        .route("/ads/:id/activate", post(admin::activate_ad))
        .route("/ads/:id/end", post(admin::end_ad))
        .route("/members", get(admin::list_members))
        .route("/members/:id/activate", post(admin::activate_member))
        .route("/members/:id/deactivate", post(admin::deactivate_member))
        .route(
            "/members/:id/blacklist",
            post(admin::blacklist_member).delete(admin::unblacklist_member),
        )
        .route("/notifications", get(admin::list_notifications).delete(admin::clear_notifications))
        .route("/notifications/read-all", post(admin::mark_all_read))
        .route("/notifications/:id/read", post(admin::mark_notification_read));

    let api_routes = Router::new()
        .route("/auth/login", post(routes::auth::login))
        .route("/auth/register", post(routes::auth::register))
        .route("/auth/me", get(routes::auth::me))
        .route("/profiles", get(routes::profiles::list_profiles))
        .route("/profiles/feed", get(routes::profiles::profile_feed))
        .route("/profiles/:id", get(routes::profiles::get_profile))
        .route("/profiles/:id/unlock", post(routes::profiles::unlock_profile))
        .route("/reviews", get(routes::reviews::list_reviews))
        .route("/reviews/:id/vote", post(routes::reviews::vote_review))
        .route("/events", get(routes::events::list_events))
        .nest("/admin", admin_routes);

    Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/metrics", get(routes::health::metrics))
        .nest("/api", api_routes)
        .layer(middleware::from_fn(metrics_middleware))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
