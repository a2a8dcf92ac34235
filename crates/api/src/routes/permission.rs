//! Route definitions for the `/permissions` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::permission;
use crate::state::AppState;

/// Routes for permissions.
///
/// ```text
/// GET    /permissions             -> list
/// POST   /permissions             -> create
/// GET    /permissions/{id}        -> get_by_id
/// PUT    /permissions/{id}        -> update
/// DELETE /permissions/{id}        -> delete
/// GET    /permissions/{id}/roles  -> list_roles
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/permissions",
            get(permission::list).post(permission::create),
        )
        .route(
            "/permissions/",
            get(permission::list).post(permission::create),
        )
        .route(
            "/permissions/{id}",
            get(permission::get_by_id)
                .put(permission::update)
                .delete(permission::delete),
        )
        .route("/permissions/{id}/roles", get(permission::list_roles))
}
