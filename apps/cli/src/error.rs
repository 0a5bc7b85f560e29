//! # CLI Error Type
//!
//! Unified error type for menu actions.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Shell                              │
//! │                                                                         │
//! │  Menu action (vender)                                                   │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Result<(), CliError>                                            │  │
//! │  │         │                                                        │  │
//! │  │  Store error? ──── StoreError::Io / Json ───────┐                │  │
//! │  │         │                                       │                │  │
//! │  │  Rule violated? ── CoreError::InsufficientStock ┼──► CliError    │  │
//! │  │         │                                       │                │  │
//! │  │  Bad answer? ───── ValidationError ─────────────┘                │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  Menu prints "✗ <message>" and shows the menu again.                   │
//! │  Nothing is retried and nothing is rolled back.                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use posada_core::{CoreError, ValidationError};
use posada_store::StoreError;
use thiserror::Error;

/// Error returned from menu actions.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct CliError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Message shown to the innkeeper
    pub message: String,
}

/// Error codes for menu actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Unknown ID
    NotFound,

    /// ID already in use
    Duplicate,

    /// Input failed validation
    ValidationError,

    /// Operation never allowed (editing the ledger)
    Forbidden,

    /// Not enough units in stock
    InsufficientStock,

    /// Not enough cash in the till
    InsufficientCash,

    /// Returning goods that weren't exchanged with that party
    ReturnNotAllowed,

    /// Data files could not be read or written
    StorageError,

    /// Terminal read/write failed
    IoError,

    /// Input ended (Ctrl-D or end of a piped script)
    Cancelled,
}

impl CliError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        CliError {
            code,
            message: message.into(),
        }
    }

    /// Input ended before the question was answered.
    pub fn cancelled() -> Self {
        CliError::new(ErrorCode::Cancelled, "Entrada finalizada")
    }

    pub fn is_cancelled(&self) -> bool {
        self.code == ErrorCode::Cancelled
    }
}

/// Converts store errors to CLI errors.
impl From<StoreError> for CliError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Core(e) => e.into(),
            StoreError::Io { .. } | StoreError::Json { .. } => {
                tracing::error!(error = %err, "Data file operation failed");
                CliError::new(ErrorCode::StorageError, err.to_string())
            }
        }
    }
}

/// Converts core errors to CLI errors.
impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        let code = match &err {
            CoreError::NotFound { .. } => ErrorCode::NotFound,
            CoreError::AlreadyExists { .. } => ErrorCode::Duplicate,
            CoreError::Forbidden(_) => ErrorCode::Forbidden,
            CoreError::InsufficientStock { .. } => ErrorCode::InsufficientStock,
            CoreError::InsufficientCash { .. } => ErrorCode::InsufficientCash,
            CoreError::ReturnExceeded { .. } => ErrorCode::ReturnNotAllowed,
            CoreError::EmptyTransaction | CoreError::Validation(_) => ErrorCode::ValidationError,
        };
        CliError::new(code, err.to_string())
    }
}

/// Converts validation errors to CLI errors.
impl From<ValidationError> for CliError {
    fn from(err: ValidationError) -> Self {
        CliError::new(ErrorCode::ValidationError, err.to_string())
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::new(ErrorCode::IoError, err.to_string())
    }
}

/// Result type for menu actions.
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;
    use posada_core::Entidad;

    #[test]
    fn test_store_errors_map_to_codes() {
        let err: CliError = StoreError::from(CoreError::AlreadyExists { id: 3 }).into();
        assert_eq!(err.code, ErrorCode::Duplicate);
        assert_eq!(err.message, "Error, ID 3 ya está en uso");

        let err: CliError = CoreError::not_found(Entidad::Mercader, 4).into();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.to_string(), "Mercader con ID 4 no encontrado.");
    }

    #[test]
    fn test_validation_errors_keep_message() {
        let err: CliError = ValidationError::InvalidWeight.into();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "El peso debe ser un valor positivo.");
    }

    #[test]
    fn test_cancelled() {
        assert!(CliError::cancelled().is_cancelled());
        let err: CliError = CoreError::EmptyTransaction.into();
        assert!(!err.is_cancelled());
    }
}
