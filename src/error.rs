use thiserror::Error;

/// Error surface of every store operation. All variants are recoverable:
/// the caller reports them and the interface stays usable.
#[derive(Debug, Error)]
pub enum EmsError {
    #[error("{0}")]
    Validation(String),

    #[error("employee id `{0}` already exists")]
    DuplicateId(String),

    #[error("{0}")]
    NotFound(String),

    #[error("invalid credentials or role")]
    AuthFailure,

    /// Restore refuses to touch anything until every store file is present.
    #[error("backup is missing required files: {}", .missing.join(", "))]
    MissingFiles { missing: Vec<String> },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, EmsError>;
