//! # posada-core: Pure Bookkeeping Model for the Posada del Lobo Blanco
//!
//! This crate holds the records the inn keeps and the rules they obey.
//! Nothing in here touches the file system or the console.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Posada del Lobo Blanco                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    posada-cli (apps/cli)                        │   │
//! │  │    Vender ──► Comprar ──► Devolver ──► Gestionar ──► Informes   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 posada-store (JSON snapshots)                   │   │
//! │  │    Gestor<T>, Inventario, GestorTransacciones, Posada handle    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ posada-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │transaccion│  │ validation│  │   │
//! │  │   │   Bien    │  │  Coronas  │  │Transaccion│  │  filters  │  │   │
//! │  │   │  Persona  │  │           │  │   tipo    │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO FILES • NO CONSOLE • NO GLOBAL STATE                      │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Bien, Cliente, Mercader, Persona, ElementoAlmacen
//! - [`transaccion`] - The immutable ledger entry
//! - [`money`] - The `Coronas` currency type
//! - [`filters`] - Search fields and sort criteria
//! - [`error`] - Domain error types
//! - [`validation`] - Field rules and answer parsers
//!
//! ## Example Usage
//!
//! ```rust
//! use posada_core::{Bien, ElementoAlmacen};
//!
//! let espada = Bien::new(1, "Espada", "Espada legendaria", "Acero", 3.0, 1500.0, 0).unwrap();
//! let linea = ElementoAlmacen::new(espada, 2);
//! assert_eq!(linea.subtotal().value(), 3000.0);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod filters;
pub mod money;
pub mod transaccion;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{Campo, CoreError, CoreResult, Entidad, ValidationError};
pub use filters::{CriterioOrden, FiltroBien, FiltroCliente, FiltroMercader};
pub use money::Coronas;
pub use transaccion::{TipoTransaccion, Transaccion};
pub use types::*;
