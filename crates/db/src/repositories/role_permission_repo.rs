//! Repository for the `role_permission` association table.

use rbac_core::error::CoreError;
use rbac_core::types::DbId;
use sqlx::PgConnection;

use crate::constraint::{internal, is_foreign_key_violation, violated_constraint};
use crate::models::permission::Permission;
use crate::models::role::Role;
use crate::repositories::{PermissionRepo, RoleRepo};

const ENTITY: &str = "RolePermission";

const PERMISSION_FK: &str = "fk_role_permission_permission";

/// Manages which permissions a role holds.
pub struct RolePermissionRepo;

impl RolePermissionRepo {
    /// Attach a permission to a role. Idempotent: returns `false` if the link
    /// already existed.
    ///
    /// Both sides must exist; a missing one is reported as `NotFound`.
    pub async fn grant(
        conn: &mut PgConnection,
        role_id: DbId,
        permission_id: DbId,
    ) -> Result<bool, CoreError> {
        RoleRepo::get(conn, role_id).await?;
        PermissionRepo::get(conn, permission_id).await?;

        let result = sqlx::query(
            "INSERT INTO role_permission (role_id, permission_id) \
             VALUES ($1, $2) \
             ON CONFLICT (role_id, permission_id) DO NOTHING",
        )
        .bind(role_id)
        .bind(permission_id)
        .execute(&mut *conn)
        .await
        .map_err(|err| grant_error(role_id, permission_id, err))?;

        Ok(result.rows_affected() > 0)
    }

    /// Detach a permission from a role. Returns `true` if a link was removed.
    pub async fn revoke(
        conn: &mut PgConnection,
        role_id: DbId,
        permission_id: DbId,
    ) -> Result<bool, CoreError> {
        let result =
            sqlx::query("DELETE FROM role_permission WHERE role_id = $1 AND permission_id = $2")
                .bind(role_id)
                .bind(permission_id)
                .execute(&mut *conn)
                .await
                .map_err(|err| internal(ENTITY, "delete", err))?;

        Ok(result.rows_affected() > 0)
    }

    /// All permissions held by a role, ordered by name.
    pub async fn permissions_for_role(
        conn: &mut PgConnection,
        role_id: DbId,
    ) -> Result<Vec<Permission>, CoreError> {
        RoleRepo::get(conn, role_id).await?;

        sqlx::query_as::<_, Permission>(
            "SELECT p.id, p.name, p.created_at, p.updated_at \
             FROM role_permission rp \
             JOIN permissions p ON p.id = rp.permission_id \
             WHERE rp.role_id = $1 \
             ORDER BY p.name",
        )
        .bind(role_id)
        .fetch_all(&mut *conn)
        .await
        .map_err(|err| internal(ENTITY, "list", err))
    }

    /// All roles holding a permission, ordered by name.
    pub async fn roles_for_permission(
        conn: &mut PgConnection,
        permission_id: DbId,
    ) -> Result<Vec<Role>, CoreError> {
        PermissionRepo::get(conn, permission_id).await?;

        sqlx::query_as::<_, Role>(
            "SELECT r.id, r.name, r.created_at, r.updated_at \
             FROM role_permission rp \
             JOIN roles r ON r.id = rp.role_id \
             WHERE rp.permission_id = $1 \
             ORDER BY r.name",
        )
        .bind(permission_id)
        .fetch_all(&mut *conn)
        .await
        .map_err(|err| internal(ENTITY, "list", err))
    }
}

/// A side deleted between the existence checks and the insert surfaces as a
/// foreign-key violation; report it as the missing entity.
fn grant_error(role_id: DbId, permission_id: DbId, err: sqlx::Error) -> CoreError {
    if !is_foreign_key_violation(&err) {
        return internal(ENTITY, "create", err);
    }
    tracing::debug!(role_id, permission_id, "Grant lost a race with a delete");
    if violated_constraint(&err) == Some(PERMISSION_FK) {
        CoreError::NotFound {
            entity: "Permission",
            id: permission_id,
        }
    } else {
        CoreError::NotFound {
            entity: "Role",
            id: role_id,
        }
    }
}
