//! Application setup and router.

use axum::{
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        Method,
    },
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::kernel::ServerDeps;
use crate::server::routes::{admin, auth, chat, health};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub deps: ServerDeps,
}

/// Build the Axum application router
pub fn build_app(db_pool: PgPool, deps: ServerDeps) -> Router {
    let state = AppState { db_pool, deps };

    // CORS: the frontend runs on another origin
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE]);

    Router::new()
        // Auth
        .route("/api/register", post(auth::register_handler))
        .route("/api/login", post(auth::login_handler))
        .route("/api/verify-otp", post(auth::verify_otp_handler))
        .route("/api/resend-otp", post(auth::resend_otp_handler))
        .route("/api/forgot-password", post(auth::forgot_password_handler))
        .route("/api/reset-password", post(auth::reset_password_handler))
        // Chat
        .route("/api/chat/", post(chat::chat_handler))
        .route("/api/chat/history/", get(chat::history_handler))
        // Admin content
        .route(
            "/api/admin/content",
            post(admin::create_content_handler).get(admin::list_content_handler),
        )
        .route(
            "/api/admin/content/:id",
            get(admin::get_content_handler)
                .put(admin::update_content_handler)
                .delete(admin::delete_content_handler),
        )
        // Events
        .route("/events/", get(admin::list_events_handler))
        .route("/add-event/", post(admin::create_event_handler))
        .route(
            "/events/:id",
            get(admin::get_event_handler)
                .put(admin::update_event_handler)
                .delete(admin::delete_event_handler),
        )
        // Liveness probes
        .route("/api/hello", get(health::hello_handler))
        .route("/api/status", get(health::status_handler))
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
