//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&mut PgConnection` as the first argument, so the caller
//! owns the transaction boundary.

pub mod permission_repo;
pub mod role_permission_repo;
pub mod role_repo;

pub use permission_repo::PermissionRepo;
pub use role_permission_repo::RolePermissionRepo;
pub use role_repo::RoleRepo;
