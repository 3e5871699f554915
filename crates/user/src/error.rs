use thiserror::Error;

/// Domain-specific errors for user operations
///
/// These errors represent business logic failures that should be
/// handled explicitly in the application layer (e.g., showing specific
/// error messages to users).
#[derive(Debug, Error)]
pub enum UserError {
    #[error("Email already exists")]
    EmailAlreadyExists,

    #[error("Password hashing failed: {0}")]
    HashingError(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User not found")]
    NotFound,

    #[error("Token error: {0}")]
    TokenError(String),

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

/// Result type for user operations that may fail with UserError
pub type UserResult<T> = Result<T, UserError>;
