use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("{entity} with name '{name}' already exists")]
    DuplicateName { entity: &'static str, name: String },

    #[error("{entity} with id {id} is still in use")]
    InUse { entity: &'static str, id: DbId },

    #[error("Internal error: {0}")]
    Internal(String),
}
