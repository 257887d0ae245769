use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProjectionError {
    #[error("Invalid {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    #[error("Invalid duration {0}: years must be >= 1")]
    InvalidDuration(i64),
}

pub type Result<T> = std::result::Result<T, ProjectionError>;
