//! HTTP surface
//!
//! | Route | Purpose |
//! |-------|---------|
//! | `POST /create-session` | New session id |
//! | `POST /clear-backend-history` | Empty a session's transcript |
//! | `POST /chat` | One streamed chat turn (SSE) |
//! | `GET /health` | Liveness |
//! | `GET /` | `index.html` from the static directory, when configured |

pub mod error;
pub mod handlers;
pub mod sse;

use axum::Router;
use axum::routing::{get, post};
use relay_application::{ManageSessionUseCase, StreamChatUseCase};
use std::path::PathBuf;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};

pub use error::ApiError;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub chat: StreamChatUseCase,
    pub sessions: ManageSessionUseCase,
}

/// Build the application router.
pub fn router(state: AppState, static_dir: Option<PathBuf>) -> Router {
    let mut router = Router::new()
        .route("/create-session", post(handlers::create_session))
        .route("/clear-backend-history", post(handlers::clear_history))
        .route("/chat", post(handlers::chat))
        .route("/health", get(handlers::health));

    if let Some(dir) = static_dir {
        router = router
            .route_service("/", ServeFile::new(dir.join("index.html")))
            .fallback_service(ServeDir::new(dir));
    }

    router.layer(CorsLayer::permissive()).with_state(state)
}
