//! # Validation Module
//!
//! Input validation utilities for the Posada.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Prompt (apps/cli)                                            │
//! │  ├── parse_id / parse_peso / parse_cantidad on raw answers             │
//! │  └── Immediate feedback, the question is asked again                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Entity constructors and setters (this crate)                 │
//! │  └── THIS MODULE: peso > 0, precio >= 0, non-empty text                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Managers (posada-store)                                      │
//! │  └── Unique IDs, stock levels, till balance                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use posada_core::validation::{parse_cantidad, validate_peso};
//!
//! assert!(validate_peso(2.5).is_ok());
//! assert!(validate_peso(0.0).is_err());
//! assert_eq!(parse_cantidad(" 10 ").unwrap(), 10);
//! assert!(parse_cantidad("-1").is_err());
//! ```

use crate::error::{Campo, ValidationError};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a required text field.
///
/// ## Rules
/// - Must not be empty after trimming
pub fn validate_required(field: Campo, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required { field });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates an entity ID.
///
/// ## Rules
/// - Must be greater than zero
pub fn validate_id(id: u32) -> ValidationResult<()> {
    if id == 0 {
        return Err(ValidationError::InvalidId);
    }

    Ok(())
}

/// Validates a weight.
///
/// ## Rules
/// - Must be a finite number strictly greater than zero
pub fn validate_peso(peso: f64) -> ValidationResult<()> {
    if !peso.is_finite() || peso <= 0.0 {
        return Err(ValidationError::InvalidWeight);
    }

    Ok(())
}

/// Validates a unit price.
///
/// ## Rules
/// - Must be finite and non-negative
/// - Zero is allowed (gifts, samples)
pub fn validate_precio(precio: f64) -> ValidationResult<()> {
    if !precio.is_finite() || precio < 0.0 {
        return Err(ValidationError::NegativePrice);
    }

    Ok(())
}

// =============================================================================
// Answer Parsers
// =============================================================================
// The prompt layer hands over raw strings. These turn them into typed
// values with the same messages the setters produce.

/// Parses an ID answer.
///
/// ## Example
/// ```rust
/// use posada_core::validation::parse_id;
///
/// assert_eq!(parse_id("42").unwrap(), 42);
/// assert!(parse_id("0").is_err());
/// assert!(parse_id("no es un número").is_err());
/// ```
pub fn parse_id(raw: &str) -> ValidationResult<u32> {
    let raw = raw.trim();
    validate_required(Campo::Id, raw)?;

    // Negative and non-numeric answers get the same message as zero
    let id = raw.parse::<u32>().map_err(|_| ValidationError::InvalidId)?;
    validate_id(id)?;

    Ok(id)
}

/// Parses a weight answer (kg).
pub fn parse_peso(raw: &str) -> ValidationResult<f64> {
    let peso = parse_number(Campo::Peso, raw)?;
    validate_peso(peso)?;
    Ok(peso)
}

/// Parses a price answer.
pub fn parse_precio(raw: &str) -> ValidationResult<f64> {
    let precio = parse_number(Campo::Precio, raw)?;
    validate_precio(precio)?;
    Ok(precio)
}

/// Parses a quantity answer.
///
/// ## Rules
/// - Must be an integer
/// - Must be zero or greater
pub fn parse_cantidad(raw: &str) -> ValidationResult<u32> {
    let raw = raw.trim();
    validate_required(Campo::Cantidad, raw)?;

    raw.parse::<u32>()
        .map_err(|_| ValidationError::InvalidQuantity)
}

/// Parses a quantity that must also be at least one (sale and purchase lines).
pub fn parse_cantidad_positiva(raw: &str) -> ValidationResult<u32> {
    match parse_cantidad(raw)? {
        0 => Err(ValidationError::InvalidQuantity),
        n => Ok(n),
    }
}

fn parse_number(field: Campo, raw: &str) -> ValidationResult<f64> {
    let raw = raw.trim();
    validate_required(field, raw)?;

    raw.parse::<f64>()
        .map_err(|_| ValidationError::InvalidNumber {
            field,
            value: raw.to_string(),
        })
}

// =============================================================================
// Unit Tests
// =============================================================================
