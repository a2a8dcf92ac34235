//! Classification of PostgreSQL errors raised by repository writes.

use rbac_core::error::CoreError;
use rbac_core::types::DbId;

/// PostgreSQL SQLSTATE for `unique_violation`.
pub const UNIQUE_VIOLATION: &str = "23505";

/// PostgreSQL SQLSTATE for `foreign_key_violation`.
pub const FOREIGN_KEY_VIOLATION: &str = "23503";

fn sqlstate(err: &sqlx::Error) -> Option<String> {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().map(|c| c.into_owned()),
        _ => None,
    }
}

/// True when the error is a unique-constraint violation.
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    sqlstate(err).as_deref() == Some(UNIQUE_VIOLATION)
}

/// True when the error is a foreign-key violation (insert of a dangling
/// reference, or delete of a still-referenced row).
pub fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    sqlstate(err).as_deref() == Some(FOREIGN_KEY_VIOLATION)
}

/// Name of the constraint a database error reports, if any.
pub fn violated_constraint(err: &sqlx::Error) -> Option<&str> {
    match err {
        sqlx::Error::Database(db_err) => db_err.constraint(),
        _ => None,
    }
}

/// Log an unexpected storage failure and wrap it as [`CoreError::Internal`].
///
/// The returned message names the operation only; the driver error stays in
/// the log.
pub fn internal(entity: &'static str, operation: &'static str, err: sqlx::Error) -> CoreError {
    tracing::error!(error = %err, entity, operation, "Database operation failed");
    CoreError::Internal(format!("failed to {operation} {entity}"))
}

/// Map a failed insert/update of a named entity.
///
/// A unique violation on `name` becomes [`CoreError::DuplicateName`];
/// anything else goes through [`internal`].
pub fn name_write_error(
    entity: &'static str,
    operation: &'static str,
    name: &str,
    err: sqlx::Error,
) -> CoreError {
    if is_unique_violation(&err) {
        tracing::debug!(entity, name, "Rejected duplicate name");
        return CoreError::DuplicateName {
            entity,
            name: name.to_string(),
        };
    }
    internal(entity, operation, err)
}

/// Map a failed delete. A foreign-key violation means association rows
/// still reference the entity.
pub fn delete_error(entity: &'static str, id: DbId, err: sqlx::Error) -> CoreError {
    if is_foreign_key_violation(&err) {
        tracing::debug!(entity, id, "Rejected delete of referenced row");
        return CoreError::InUse { entity, id };
    }
    internal(entity, "delete", err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_database_errors_are_not_violations() {
        let err = sqlx::Error::RowNotFound;
        assert!(!is_unique_violation(&err));
        assert!(!is_foreign_key_violation(&err));
    }

    #[test]
    fn internal_hides_driver_detail() {
        let err = internal("Role", "load", sqlx::Error::PoolTimedOut);
        assert_eq!(err.to_string(), "Internal error: failed to load Role");
    }
}
