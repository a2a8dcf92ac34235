//! Entity structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches
//! - A list response pairing [`PageMeta`](rbac_core::pagination::PageMeta) with the rows

pub mod permission;
pub mod role;
