//! # Error Types
//!
//! Domain-specific error types for posada-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  posada-core errors (this file)                                        │
//! │  ├── CoreError        - Business rule violations                       │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  posada-store errors (separate crate)                                  │
//! │  └── StoreError       - File read/write failures                       │
//! │                                                                         │
//! │  CLI errors (in app)                                                   │
//! │  └── CliError         - What the menu prints                           │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → StoreError → CliError → Console   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Messages
//! The inn is run in Spanish, so every message is the exact text the
//! innkeeper sees on screen. Tests assert on these strings.

use std::fmt;

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// Raised synchronously at the point of violation. A manager never mutates
/// its map before the check that produces one of these has passed.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Unknown ID on get / remove / update.
    #[error("{entidad} con ID {id} no encontrado.")]
    NotFound { entidad: Entidad, id: u32 },

    /// Duplicate ID on add.
    #[error("Error, ID {id} ya está en uso")]
    AlreadyExists { id: u32 },

    /// The operation is never allowed for this kind of record.
    ///
    /// ## When This Occurs
    /// - Trying to update a transaction already written to the ledger
    #[error("{0}")]
    Forbidden(String),

    /// Not enough units in an inventory slot.
    ///
    /// ## User Workflow
    /// ```text
    /// Vender (qty: 5)
    ///      │
    ///      ▼
    /// Check slot: available=3
    ///      │
    ///      ▼
    /// InsufficientStock { id: 7, disponible: 3, solicitado: 5 }
    ///      │
    ///      ▼
    /// Menu shows: "No hay suficiente stock del bien 7: ..."
    /// ```
    #[error("No hay suficiente stock del bien {id}: disponible {disponible}, solicitado {solicitado}")]
    InsufficientStock {
        id: u32,
        disponible: u32,
        solicitado: u32,
    },

    /// More units returned than were exchanged with that party.
    ///
    /// ## When This Occurs
    /// - Returning a good the party never bought or sold
    /// - Returning more units than are still pending return
    #[error("El bien {id} no se puede devolver: pendientes {pendiente}, solicitado {solicitado}")]
    ReturnExceeded {
        id: u32,
        pendiente: u32,
        solicitado: u32,
    },

    /// A sale, purchase or return with no goods in it.
    #[error("La transacción debe incluir al menos un bien.")]
    EmptyTransaction,

    /// The till cannot cover a purchase or a refund.
    #[error("No hay suficiente efectivo: disponible {disponible:.2}, requerido {requerido:.2}")]
    InsufficientCash { disponible: f64, requerido: f64 },

    /// Validation error (wraps ValidationError).
    #[error("{0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Creates a NotFound error for a given entity kind and ID.
    pub fn not_found(entidad: Entidad, id: u32) -> Self {
        CoreError::NotFound { entidad, id }
    }
}

/// The kinds of record kept by the inn, used to label errors and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entidad {
    Bien,
    Cliente,
    Mercader,
    Transaccion,
}

impl fmt::Display for Entidad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Entidad::Bien => "Bien",
            Entidad::Cliente => "Cliente",
            Entidad::Mercader => "Mercader",
            Entidad::Transaccion => "Transacción",
        };
        f.write_str(name)
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur when user input doesn't meet requirements. Used both by
/// entity setters and by the prompt layer when parsing answers.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A required text field is empty.
    #[error("{}", .field.required_message())]
    Required { field: Campo },

    /// ID must be a positive integer.
    #[error("El ID debe ser un número mayor a 0")]
    InvalidId,

    /// Weight must be strictly positive.
    #[error("El peso debe ser un valor positivo.")]
    InvalidWeight,

    /// Price cannot be negative.
    #[error("El precio no puede ser negativo.")]
    NegativePrice,

    /// Quantity must be a non-negative integer.
    #[error("La cantidad debe ser un número entero no negativo.")]
    InvalidQuantity,

    /// A numeric answer could not be parsed.
    #[error("{field} debe ser un número: '{value}'")]
    InvalidNumber { field: Campo, value: String },

    /// Value is not in the allowed set (search filters, sort criteria).
    #[error("{field} no válido: '{value}'. Opciones: {}", .allowed.join(", "))]
    NotAllowed {
        field: &'static str,
        value: String,
        allowed: Vec<&'static str>,
    },
}

/// Named input fields, so messages stay consistent between setters and prompts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Campo {
    Id,
    Nombre,
    Descripcion,
    Material,
    Peso,
    Precio,
    Cantidad,
    Raza,
    Tipo,
    Ubicacion,
}

impl Campo {
    fn required_message(&self) -> &'static str {
        match self {
            Campo::Id => "El ID no puede estar vacío",
            Campo::Nombre => "El nombre no puede estar vacío",
            Campo::Descripcion => "La descripción no puede estar vacía",
            Campo::Material => "El material no puede estar vacío",
            Campo::Peso => "El peso no puede estar vacío",
            Campo::Precio => "El precio no puede estar vacío",
            Campo::Cantidad => "La cantidad no puede estar vacía",
            Campo::Raza => "La raza no puede estar vacía",
            Campo::Tipo => "El tipo no puede estar vacío",
            Campo::Ubicacion => "La ubicación no puede estar vacía",
        }
    }
}

impl fmt::Display for Campo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Campo::Id => "ID",
            Campo::Nombre => "Nombre",
            Campo::Descripcion => "Descripción",
            Campo::Material => "Material",
            Campo::Peso => "Peso",
            Campo::Precio => "Precio",
            Campo::Cantidad => "Cantidad",
            Campo::Raza => "Raza",
            Campo::Tipo => "Tipo",
            Campo::Ubicacion => "Ubicación",
        };
        f.write_str(name)
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
