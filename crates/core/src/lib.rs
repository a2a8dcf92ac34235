//! Domain layer for the role/permission service.
//!
//! Holds everything that does not touch I/O: shared type aliases, the
//! domain error enum, name normalization and pagination arithmetic.

pub mod error;
pub mod names;
pub mod pagination;
pub mod types;
