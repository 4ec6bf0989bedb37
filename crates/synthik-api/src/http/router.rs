//! Axum router configuration with middleware.
//!
//! All routes are under `/api/`.
//! Middleware: CORS, tracing.
//!
//! In production, the built web SPA is served from the configured web
//! directory. API routes take priority; unknown paths fall through to the
//! SPA's `index.html` for client-side routing. If no directory is
//! configured or it does not exist, only the API is served.

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState, web_dir: Option<&str>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // Chat streaming
        .route("/chat", post(handlers::chat::stream_turn))
        // Chat CRUD
        .route(
            "/chats",
            get(handlers::chats::list_chats)
                .post(handlers::chats::create_chat)
                .delete(handlers::chats::delete_chat),
        )
        // Chat history
        .route(
            "/chats/{id}/messages",
            get(handlers::messages::list_messages),
        );

    let mut router = Router::new()
        .nest("/api", api_routes)
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Serve the built SPA from disk if the directory exists. API routes
    // and /health take priority; unknown paths fall through to index.html
    // for client-side routing.
    if let Some(web_dir) = web_dir {
        if std::path::Path::new(web_dir).exists() {
            let index_path = format!("{}/index.html", web_dir);
            let serve_dir = ServeDir::new(web_dir).fallback(ServeFile::new(index_path));
            router = router.fallback_service(serve_dir);
            tracing::info!(path = %web_dir, "SPA static file serving enabled");
        }
    }

    router
}

/// GET /health - Simple health check endpoint (no auth required).
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
