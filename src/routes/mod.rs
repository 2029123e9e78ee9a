pub mod auth;
pub mod designs;
pub mod health;
pub mod state;

pub use auth::{index, login, logout, signup};
pub use designs::{create_design, delete_design, get_design, list_designs};
pub use health::health_check;
pub use state::{get_state, save_state};

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::constants::MAX_PAYLOAD_BYTES;
use crate::AppState;

/// Build the application router
///
/// Cross-cutting layers that depend on deployment (CORS, request tracing)
/// are added by the caller.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health_check))
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/logout", get(logout))
        .route("/api/state", get(get_state).post(save_state))
        .route("/api/designs", get(list_designs).post(create_design))
        .route("/api/designs/:id", get(get_design).delete(delete_design))
        .layer(DefaultBodyLimit::max(MAX_PAYLOAD_BYTES))
        .with_state(state)
}
