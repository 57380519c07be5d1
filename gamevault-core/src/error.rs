use thiserror::Error;

/// Failure taxonomy shared by every catalog operation.
///
/// The `Display` text of each variant is the message returned to callers.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    InvalidIdentifier(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    ExternalService(String),

    #[error("Storage error: {0}")]
    Store(String),
}

impl CatalogError {
    pub fn missing_fields() -> Self {
        Self::Validation("Name and platform are required.".to_string())
    }

    pub fn invalid_id() -> Self {
        Self::InvalidIdentifier("Invalid game ID.".to_string())
    }

    pub fn duplicate() -> Self {
        Self::Conflict("Game already exists for this platform.".to_string())
    }

    pub fn not_found() -> Self {
        Self::NotFound("Game not found.".to_string())
    }

    pub fn bad_deletion_code() -> Self {
        Self::Forbidden("Invalid deletion code.".to_string())
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;
