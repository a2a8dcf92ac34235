pub mod permission;
pub mod role;
