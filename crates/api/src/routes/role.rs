//! Route definitions for the `/roles` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::role;
use crate::state::AppState;

/// Routes for roles and their granted permissions.
///
/// ```text
/// GET    /roles                                  -> list
/// POST   /roles                                  -> create
/// GET    /roles/{id}                             -> get_by_id
/// PUT    /roles/{id}                             -> update
/// DELETE /roles/{id}                             -> delete
///
/// GET    /roles/{id}/permissions                 -> list_permissions
/// PUT    /roles/{id}/permissions/{permission_id} -> grant_permission
/// DELETE /roles/{id}/permissions/{permission_id} -> revoke_permission
/// ```
///
/// `/roles/` is accepted as an alias of `/roles`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/roles", get(role::list).post(role::create))
        .route("/roles/", get(role::list).post(role::create))
        .route(
            "/roles/{id}",
            get(role::get_by_id).put(role::update).delete(role::delete),
        )
        .route("/roles/{id}/permissions", get(role::list_permissions))
        .route(
            "/roles/{id}/permissions/{permission_id}",
            put(role::grant_permission).delete(role::revoke_permission),
        )
}
