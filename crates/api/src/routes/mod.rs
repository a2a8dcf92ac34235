pub mod health;
pub mod permission;
pub mod role;

use axum::Router;

use crate::state::AppState;

/// Build the resource route tree (everything except `/health`).
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(role::router())
        .merge(permission::router())
}
