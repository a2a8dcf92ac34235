//! Permission entity model and DTOs.

use rbac_core::error::CoreError;
use rbac_core::names::normalize_name;
use rbac_core::pagination::PageMeta;
use rbac_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A permission row from the `permissions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Permission {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new permission.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePermission {
    pub name: String,
}

impl CreatePermission {
    /// Return a copy with the name trimmed and lowercased.
    pub fn normalized(&self) -> Result<Self, CoreError> {
        Ok(Self {
            name: normalize_name(&self.name)?,
        })
    }
}

/// DTO for updating an existing permission. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePermission {
    pub name: Option<String>,
}

impl UpdatePermission {
    /// Normalize every field that is present.
    pub fn normalized(&self) -> Result<Self, CoreError> {
        Ok(Self {
            name: self.name.as_deref().map(normalize_name).transpose()?,
        })
    }
}

/// One page of permissions.
#[derive(Debug, Clone, Serialize)]
pub struct PermissionList {
    #[serde(flatten)]
    pub meta: PageMeta,
    pub permissions: Vec<Permission>,
}
