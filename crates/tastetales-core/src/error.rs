//! Error types for tastetales.

use thiserror::Error;

/// Result type alias using tastetales' Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for tastetales operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Recipe not found
    #[error("Recipe not found: {0}")]
    RecipeNotFound(i64),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Authentication failed (deliberately does not say why)
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Username already registered
    #[error("Username already exists: {0}")]
    UsernameTaken(String),

    /// Session names an account absent from the user store
    #[error("User record missing: {0}")]
    AccountMissing(String),

    /// Authentication required
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Authenticated but not allowed (e.g. deleting someone else's recipe)
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// A persisted document exists but is not valid JSON. Fatal for the
    /// request; there is no safe default to substitute.
    #[error("Malformed store {path}: {source}")]
    MalformedStore {
        path: String,
        source: serde_json::Error,
    },

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Password hashing or verification failed
    #[error("Password hash error: {0}")]
    PasswordHash(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_not_found() {
        let err = Error::NotFound("test resource".to_string());
        assert_eq!(err.to_string(), "Not found: test resource");
    }

    #[test]
    fn test_error_display_recipe_not_found() {
        let err = Error::RecipeNotFound(42);
        assert_eq!(err.to_string(), "Recipe not found: 42");
    }

    #[test]
    fn test_error_display_invalid_input() {
        let err = Error::InvalidInput("title is required".to_string());
        assert_eq!(err.to_string(), "Invalid input: title is required");
    }

    #[test]
    fn test_invalid_credentials_reveals_nothing() {
        // The same message must cover unknown-user and wrong-password.
        let err = Error::InvalidCredentials;
        assert_eq!(err.to_string(), "Invalid credentials");
        assert!(!err.to_string().to_lowercase().contains("user"));
        assert!(!err.to_string().to_lowercase().contains("password"));
    }

    #[test]
    fn test_error_display_username_taken() {
        let err = Error::UsernameTaken("alice".to_string());
        assert_eq!(err.to_string(), "Username already exists: alice");
    }

    #[test]
    fn test_error_display_account_missing() {
        let err = Error::AccountMissing("ghost".to_string());
        assert_eq!(err.to_string(), "User record missing: ghost");
    }

    #[test]
    fn test_error_display_unauthorized() {
        let err = Error::Unauthorized("authentication required".to_string());
        assert_eq!(err.to_string(), "Unauthorized: authentication required");
    }

    #[test]
    fn test_error_display_forbidden() {
        let err = Error::Forbidden("not the owner".to_string());
        assert_eq!(err.to_string(), "Forbidden: not the owner");
    }

    #[test]
    fn test_error_display_malformed_store() {
        let source = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err = Error::MalformedStore {
            path: "data/recipes.json".to_string(),
            source,
        };
        assert!(err.to_string().starts_with("Malformed store data/recipes.json:"));
    }

    #[test]
    fn test_error_display_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = Error::Io(io_err);
        assert!(err.to_string().contains("I/O error:"));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<i32>("not a number");
        assert!(json_err.is_err());

        let err: Error = json_err.unwrap_err().into();
        match err {
            Error::Serialization(msg) => {
                assert!(!msg.is_empty());
            }
            _ => panic!("Expected Serialization error"),
        }
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err: Error = io_err.into();
        match err {
            Error::Io(_) => {}
            _ => panic!("Expected Io error"),
        }
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<Error>();
        assert_sync::<Error>();
    }

    #[test]
    fn test_result_type_ok() {
        fn get_result() -> Result<i32> {
            Ok(42)
        }
        let result = get_result();
        assert!(result.is_ok());
        assert_eq!(result.unwrap(), 42);
    }
}
