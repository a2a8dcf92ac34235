//! Repository for the `permissions` table.

use rbac_core::error::CoreError;
use rbac_core::names::escape_like;
use rbac_core::pagination::{ListQuery, PageMeta};
use rbac_core::types::DbId;
use sqlx::PgConnection;

use crate::constraint::{delete_error, internal, name_write_error};
use crate::models::permission::{CreatePermission, Permission, PermissionList, UpdatePermission};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, created_at, updated_at";

const ENTITY: &str = "Permission";

/// Provides CRUD operations for permissions.
///
/// Every method takes the connection of the caller's unit of work, normally
/// `&mut tx` for an open transaction. Names must already be normalized.
pub struct PermissionRepo;

impl PermissionRepo {
    /// Insert a new permission, returning the created row.
    pub async fn create(
        conn: &mut PgConnection,
        input: &CreatePermission,
    ) -> Result<Permission, CoreError> {
        let query = format!("INSERT INTO permissions (name) VALUES ($1) RETURNING {COLUMNS}");
        sqlx::query_as::<_, Permission>(&query)
            .bind(&input.name)
            .fetch_one(&mut *conn)
            .await
            .map_err(|err| name_write_error(ENTITY, "create", &input.name, err))
    }

    /// Find a permission by its internal ID.
    pub async fn find_by_id(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<Permission>, CoreError> {
        let query = format!("SELECT {COLUMNS} FROM permissions WHERE id = $1");
        sqlx::query_as::<_, Permission>(&query)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
            .map_err(|err| internal(ENTITY, "load", err))
    }

    /// Fetch a permission by ID, failing with `NotFound` if it does not exist.
    pub async fn get(conn: &mut PgConnection, id: DbId) -> Result<Permission, CoreError> {
        Self::find_by_id(conn, id)
            .await?
            .ok_or(CoreError::NotFound { entity: ENTITY, id })
    }

    /// List one page of permissions, newest first, optionally filtered by a
    /// case-insensitive substring of the name.
    pub async fn list(
        conn: &mut PgConnection,
        params: &ListQuery,
    ) -> Result<PermissionList, CoreError> {
        let pattern = params
            .name
            .as_deref()
            .map(|needle| format!("%{}%", escape_like(needle)));

        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM permissions WHERE ($1::text IS NULL OR name ILIKE $1)",
        )
        .bind(pattern.as_deref())
        .fetch_one(&mut *conn)
        .await
        .map_err(|err| internal(ENTITY, "count", err))?;

        let query = format!(
            "SELECT {COLUMNS} FROM permissions \
             WHERE ($1::text IS NULL OR name ILIKE $1) \
             ORDER BY created_at DESC, id DESC \
             LIMIT $2 OFFSET $3"
        );
        let permissions = sqlx::query_as::<_, Permission>(&query)
            .bind(pattern.as_deref())
            .bind(params.limit)
            .bind(params.offset())
            .fetch_all(&mut *conn)
            .await
            .map_err(|err| internal(ENTITY, "list", err))?;

        Ok(PermissionList {
            meta: PageMeta::new(params, total),
            permissions,
        })
    }

    /// Update a permission. Only non-`None` fields in `input` are applied;
    /// `updated_at` is refreshed by the table trigger either way.
    pub async fn update(
        conn: &mut PgConnection,
        id: DbId,
        input: &UpdatePermission,
    ) -> Result<Permission, CoreError> {
        let query = format!(
            "UPDATE permissions SET name = COALESCE($2, name) WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Permission>(&query)
            .bind(id)
            .bind(&input.name)
            .fetch_optional(&mut *conn)
            .await
            .map_err(|err| {
                name_write_error(ENTITY, "update", input.name.as_deref().unwrap_or_default(), err)
            })?
            .ok_or(CoreError::NotFound { entity: ENTITY, id })
    }

    /// Delete a permission by ID.
    ///
    /// Fails with `InUse` while any role still holds it.
    pub async fn delete(conn: &mut PgConnection, id: DbId) -> Result<(), CoreError> {
        let result = sqlx::query("DELETE FROM permissions WHERE id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await
            .map_err(|err| delete_error(ENTITY, id, err))?;

        if result.rows_affected() == 0 {
            return Err(CoreError::NotFound { entity: ENTITY, id });
        }
        Ok(())
    }
}
