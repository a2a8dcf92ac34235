//! Repository for the `roles` table.

use rbac_core::error::CoreError;
use rbac_core::names::escape_like;
use rbac_core::pagination::{ListQuery, PageMeta};
use rbac_core::types::DbId;
use sqlx::PgConnection;

use crate::constraint::{delete_error, internal, name_write_error};
use crate::models::role::{CreateRole, Role, RoleList, UpdateRole};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, created_at, updated_at";

const ENTITY: &str = "Role";

/// Provides CRUD operations for roles.
///
/// Every method takes the connection of the caller's unit of work, normally
/// `&mut tx` for an open transaction. Names must already be normalized.
pub struct RoleRepo;

impl RoleRepo {
    /// Insert a new role, returning the created row.
    pub async fn create(conn: &mut PgConnection, input: &CreateRole) -> Result<Role, CoreError> {
        let query = format!("INSERT INTO roles (name) VALUES ($1) RETURNING {COLUMNS}");
        sqlx::query_as::<_, Role>(&query)
            .bind(&input.name)
            .fetch_one(&mut *conn)
            .await
            .map_err(|err| name_write_error(ENTITY, "create", &input.name, err))
    }

    /// Find a role by its internal ID.
    pub async fn find_by_id(conn: &mut PgConnection, id: DbId) -> Result<Option<Role>, CoreError> {
        let query = format!("SELECT {COLUMNS} FROM roles WHERE id = $1");
        sqlx::query_as::<_, Role>(&query)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
            .map_err(|err| internal(ENTITY, "load", err))
    }

    /// Fetch a role by ID, failing with `NotFound` if it does not exist.
    pub async fn get(conn: &mut PgConnection, id: DbId) -> Result<Role, CoreError> {
        Self::find_by_id(conn, id)
            .await?
            .ok_or(CoreError::NotFound { entity: ENTITY, id })
    }

    /// List one page of roles, newest first, optionally filtered by a
    /// case-insensitive substring of the name.
    pub async fn list(conn: &mut PgConnection, params: &ListQuery) -> Result<RoleList, CoreError> {
        let pattern = params
            .name
            .as_deref()
            .map(|needle| format!("%{}%", escape_like(needle)));

        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM roles WHERE ($1::text IS NULL OR name ILIKE $1)",
        )
        .bind(pattern.as_deref())
        .fetch_one(&mut *conn)
        .await
        .map_err(|err| internal(ENTITY, "count", err))?;

        let query = format!(
            "SELECT {COLUMNS} FROM roles \
             WHERE ($1::text IS NULL OR name ILIKE $1) \
             ORDER BY created_at DESC, id DESC \
             LIMIT $2 OFFSET $3"
        );
        let roles = sqlx::query_as::<_, Role>(&query)
            .bind(pattern.as_deref())
            .bind(params.limit)
            .bind(params.offset())
            .fetch_all(&mut *conn)
            .await
            .map_err(|err| internal(ENTITY, "list", err))?;

        Ok(RoleList {
            meta: PageMeta::new(params, total),
            roles,
        })
    }

    /// Update a role. Only non-`None` fields in `input` are applied;
    /// `updated_at` is refreshed by the table trigger either way.
    pub async fn update(
        conn: &mut PgConnection,
        id: DbId,
        input: &UpdateRole,
    ) -> Result<Role, CoreError> {
        let query = format!(
            "UPDATE roles SET name = COALESCE($2, name) WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Role>(&query)
            .bind(id)
            .bind(&input.name)
            .fetch_optional(&mut *conn)
            .await
            .map_err(|err| {
                name_write_error(ENTITY, "update", input.name.as_deref().unwrap_or_default(), err)
            })?
            .ok_or(CoreError::NotFound { entity: ENTITY, id })
    }

    /// Delete a role by ID.
    ///
    /// Fails with `InUse` while `role_permission` or `user_role` rows still
    /// reference it.
    pub async fn delete(conn: &mut PgConnection, id: DbId) -> Result<(), CoreError> {
        let result = sqlx::query("DELETE FROM roles WHERE id = $1")
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
