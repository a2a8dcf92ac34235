//! Handlers for the `/roles` resource.
//!
//! Writes run inside one transaction per request: the repository call
//! receives `&mut tx`, and any early return drops `tx`, rolling it back.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use rbac_core::error::CoreError;
use rbac_core::pagination::ListQuery;
use rbac_core::types::DbId;
use rbac_db::models::permission::Permission;
use rbac_db::models::role::{CreateRole, Role, RoleList, UpdateRole};
use rbac_db::repositories::{RolePermissionRepo, RoleRepo};

use crate::error::AppResult;
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::state::AppState;

/// POST /roles
pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateRole>,
) -> AppResult<(StatusCode, Json<Role>)> {
    let input = input.normalized()?;

    let mut tx = state.pool.begin().await?;
    let role = RoleRepo::create(&mut tx, &input).await?;
    tx.commit().await?;

    tracing::info!(role_id = role.id, name = %role.name, "Role created");
    Ok((StatusCode::CREATED, Json(role)))
}

/// GET /roles?page=&limit=&name=
pub async fn list(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<ListQuery>,
) -> AppResult<Json<RoleList>> {
    let params = params.validated()?;

    let mut conn = state.pool.acquire().await?;
    let roles = RoleRepo::list(&mut conn, &params).await?;
    Ok(Json(roles))
}

/// GET /roles/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<Role>> {
    let mut conn = state.pool.acquire().await?;
    let role = RoleRepo::get(&mut conn, id).await?;
    Ok(Json(role))
}

/// PUT /roles/{id}
pub async fn update(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateRole>,
) -> AppResult<Json<Role>> {
    let input = input.normalized()?;

    let mut tx = state.pool.begin().await?;
    let role = RoleRepo::update(&mut tx, id, &input).await?;
    tx.commit().await?;

    tracing::info!(role_id = role.id, name = %role.name, "Role updated");
    Ok(Json(role))
}

/// DELETE /roles/{id}
pub async fn delete(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<StatusCode> {
    let mut tx = state.pool.begin().await?;
    RoleRepo::delete(&mut tx, id).await?;
    tx.commit().await?;

    tracing::info!(role_id = id, "Role deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /roles/{id}/permissions
pub async fn list_permissions(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<Vec<Permission>>> {
    let mut conn = state.pool.acquire().await?;
    let permissions = RolePermissionRepo::permissions_for_role(&mut conn, id).await?;
    Ok(Json(permissions))
}

/// PUT /roles/{id}/permissions/{permission_id}
///
/// Idempotent: granting an already-held permission is still 204.
pub async fn grant_permission(
    State(state): State<AppState>,
    AppPath((id, permission_id)): AppPath<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    let mut tx = state.pool.begin().await?;
    let added = RolePermissionRepo::grant(&mut tx, id, permission_id).await?;
    tx.commit().await?;

    if added {
        tracing::info!(role_id = id, permission_id, "Permission granted to role");
    }
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /roles/{id}/permissions/{permission_id}
pub async fn revoke_permission(
    State(state): State<AppState>,
    AppPath((id, permission_id)): AppPath<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    let mut tx = state.pool.begin().await?;
    let removed = RolePermissionRepo::revoke(&mut tx, id, permission_id).await?;
    if !removed {
        return Err(CoreError::NotFound {
            entity: "RolePermission",
            id: permission_id,
        }
        .into());
    }
    tx.commit().await?;

    tracing::info!(role_id = id, permission_id, "Permission revoked from role");
    Ok(StatusCode::NO_CONTENT)
}
