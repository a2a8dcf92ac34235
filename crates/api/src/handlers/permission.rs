//! Handlers for the `/permissions` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use rbac_core::pagination::ListQuery;
use rbac_core::types::DbId;
use rbac_db::models::permission::{
    CreatePermission, Permission, PermissionList, UpdatePermission,
};
use rbac_db::models::role::Role;
use rbac_db::repositories::{PermissionRepo, RolePermissionRepo};

use crate::error::AppResult;
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::state::AppState;

/// POST /permissions
pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreatePermission>,
) -> AppResult<(StatusCode, Json<Permission>)> {
    let input = input.normalized()?;

    let mut tx = state.pool.begin().await?;
    let permission = PermissionRepo::create(&mut tx, &input).await?;
    tx.commit().await?;

    tracing::info!(
        permission_id = permission.id,
        name = %permission.name,
        "Permission created",
    );
    Ok((StatusCode::CREATED, Json(permission)))
}

/// GET /permissions?page=&limit=&name=
pub async fn list(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<ListQuery>,
) -> AppResult<Json<PermissionList>> {
    let params = params.validated()?;

    let mut conn = state.pool.acquire().await?;
    let permissions = PermissionRepo::list(&mut conn, &params).await?;
    Ok(Json(permissions))
}

/// GET /permissions/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<Permission>> {
    let mut conn = state.pool.acquire().await?;
    let permission = PermissionRepo::get(&mut conn, id).await?;
    Ok(Json(permission))
}

/// PUT /permissions/{id}
///
/// Accepts a partial body; omitted fields keep their stored value.
pub async fn update(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdatePermission>,
) -> AppResult<Json<Permission>> {
    let input = input.normalized()?;

    let mut tx = state.pool.begin().await?;
    let permission = PermissionRepo::update(&mut tx, id, &input).await?;
    tx.commit().await?;

    tracing::info!(
        permission_id = permission.id,
        name = %permission.name,
        "Permission updated",
    );
    Ok(Json(permission))
}

/// DELETE /permissions/{id}
pub async fn delete(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<StatusCode> {
    let mut tx = state.pool.begin().await?;
    PermissionRepo::delete(&mut tx, id).await?;
    tx.commit().await?;

    tracing::info!(permission_id = id, "Permission deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /permissions/{id}/roles
pub async fn list_roles(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<Vec<Role>>> {
    let mut conn = state.pool.acquire().await?;
    let roles = RolePermissionRepo::roles_for_permission(&mut conn, id).await?;
    Ok(Json(roles))
}
