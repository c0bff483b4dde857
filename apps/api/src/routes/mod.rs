pub mod health;

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::enhance::handlers::handle_enhance;
use crate::export::handlers::handle_export;
use crate::state::AppState;
use crate::wizard::handlers;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/templates", get(handlers::handle_list_templates))
        // Session lifecycle
        .route("/api/v1/sessions", post(handlers::handle_create_session))
        .route(
            "/api/v1/sessions/:id",
            get(handlers::handle_get_session).delete(handlers::handle_delete_session),
        )
        .route("/api/v1/sessions/:id/reset", post(handlers::handle_reset))
        // Navigation
        .route("/api/v1/sessions/:id/advance", post(handlers::handle_advance))
        .route("/api/v1/sessions/:id/retreat", post(handlers::handle_retreat))
        .route(
            "/api/v1/sessions/:id/steps/:index",
            post(handlers::handle_go_to_step),
        )
        .route(
            "/api/v1/sessions/:id/navigate",
            post(handlers::handle_navigate),
        )
        // Draft editing
        .route(
            "/api/v1/sessions/:id/draft",
            put(handlers::handle_replace_draft),
        )
        .route(
            "/api/v1/sessions/:id/draft/items",
            post(handlers::handle_add_item),
        )
        .route(
            "/api/v1/sessions/:id/draft/items/:item_id",
            delete(handlers::handle_remove_item),
        )
        .route(
            "/api/v1/sessions/:id/draft/items/:item_id/move",
            post(handlers::handle_move_item),
        )
        .route("/api/v1/sessions/:id/submit", post(handlers::handle_submit))
        // Document, template, preview
        .route(
            "/api/v1/sessions/:id/sections/languages",
            put(handlers::handle_update_languages),
        )
        .route(
            "/api/v1/sessions/:id/template",
            put(handlers::handle_set_template),
        )
        .route(
            "/api/v1/sessions/:id/preview/toggle",
            post(handlers::handle_toggle_preview),
        )
        .route(
            "/api/v1/sessions/:id/progress",
            get(handlers::handle_progress),
        )
        .route("/api/v1/sessions/:id/preview", get(handlers::handle_preview))
        .route(
            "/api/v1/sessions/:id/preview/all",
            get(handlers::handle_preview_all),
        )
        .route(
            "/api/v1/sessions/:id/notifications",
            get(handlers::handle_drain_notifications),
        )
        // Background work
        .route("/api/v1/sessions/:id/export", post(handle_export))
        .route("/api/v1/sessions/:id/enhance", post(handle_enhance))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()) // TODO: restrict origins once the web client has a fixed host
}
