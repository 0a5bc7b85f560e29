//! # Store Error Types
//!
//! Error types for snapshot persistence and manager operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  std::io::Error / serde_json::Error                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds the file path                         │
//! │       │                                                                 │
//! │       │   CoreError (rule violations) ──► StoreError::Core             │
//! │       ▼                                                                 │
//! │  CliError (in apps/cli) ← Code + message for the console               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Menu prints the message and returns to the previous screen            │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use posada_core::CoreError;
use thiserror::Error;

/// Persistence and manager errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A data file could not be read or written.
    ///
    /// ## When This Occurs
    /// - Data directory can't be created
    /// - File permissions issue
    /// - Disk full
    #[error("Error de E/S en {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A data file holds something that isn't a valid record array.
    ///
    /// ## When This Occurs
    /// - File edited by hand and left malformed
    /// - A record fails validation on read (negative price, empty name)
    #[error("Fichero de datos inválido {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A business rule rejected the operation. The map was not changed.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        StoreError::Json {
            path: path.into(),
            source,
        }
    }

    /// The rule violation behind this error, if any.
    pub fn as_core(&self) -> Option<&CoreError> {
        match self {
            StoreError::Core(err) => Some(err),
            _ => None,
        }
    }
}

impl From<posada_core::ValidationError> for StoreError {
    fn from(err: posada_core::ValidationError) -> Self {
        StoreError::Core(err.into())
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;
    use posada_core::{Entidad, ValidationError};

    #[test]
    fn test_core_errors_keep_their_message() {
        let err: StoreError = CoreError::not_found(Entidad::Cliente, 7).into();
        assert_eq!(err.to_string(), "Cliente con ID 7 no encontrado.");
        assert!(matches!(err.as_core(), Some(CoreError::NotFound { id: 7, .. })));

        let err: StoreError = ValidationError::NegativePrice.into();
        assert_eq!(err.to_string(), "El precio no puede ser negativo.");
    }

    #[test]
    fn test_io_error_names_the_file() {
        let err = StoreError::io(
            "/no/existe/Clientes.json",
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        );
        assert!(err.to_string().contains("/no/existe/Clientes.json"));
        assert!(err.as_core().is_none());
    }
}
