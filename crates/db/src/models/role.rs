//! Role entity model and DTOs.

use rbac_core::error::CoreError;
use rbac_core::names::normalize_name;
use rbac_core::pagination::PageMeta;
use rbac_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A role row from the `roles` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Role {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new role.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateRole {
    pub name: String,
}

impl CreateRole {
    /// Return a copy with the name trimmed and lowercased.
    pub fn normalized(&self) -> Result<Self, CoreError> {
        Ok(Self {
            name: normalize_name(&self.name)?,
        })
    }
}

/// DTO for updating an existing role. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateRole {
    pub name: Option<String>,
}

impl UpdateRole {
    /// Normalize every field that is present.
    pub fn normalized(&self) -> Result<Self, CoreError> {
        Ok(Self {
            name: self.name.as_deref().map(normalize_name).transpose()?,
        })
    }
}

/// One page of roles.
#[derive(Debug, Clone, Serialize)]
pub struct RoleList {
    #[serde(flatten)]
    pub meta: PageMeta,
    pub roles: Vec<Role>,
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn create_normalizes_name() {
        let input = CreateRole {
            name: "  Admin  ".to_string(),
        };
        assert_eq!(input.normalized().unwrap().name, "admin");
    }

    #[test]
    fn create_rejects_blank_name() {
        let input = CreateRole {
            name: " ".to_string(),
        };
        assert_matches!(input.normalized(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn update_leaves_absent_fields_absent() {
        assert_eq!(UpdateRole::default().normalized().unwrap().name, None);

        let patch = UpdateRole {
            name: Some(" Editor".to_string()),
        };
        assert_eq!(patch.normalized().unwrap().name.as_deref(), Some("editor"));
    }

    #[test]
    fn list_serializes_flat() {
        let list = RoleList {
            meta: PageMeta {
                page: 1,
                limit: 10,
                total: 0,
                total_pages: 0,
            },
            roles: Vec::new(),
        };
        let json = serde_json::to_value(&list).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "page": 1,
                "limit": 10,
                "total": 0,
                "total_pages": 0,
                "roles": [],
            })
        );
    }
}
