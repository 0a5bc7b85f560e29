//! # posada-store: Persistence Layer for the Posada del Lobo Blanco
//!
//! Keeps the inn's books in flat JSON files and runs the operations that
//! change them.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Posada Data Flow                                    │
//! │                                                                         │
//! │  Menu action (Vender)                                                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 posada-store (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │    Posada     │    │   Managers    │    │  JsonStore   │  │   │
//! │  │   │  (posada.rs)  │    │ (repository/) │    │  (store.rs)  │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ vender        │───►│ Inventario    │───►│ whole-file   │  │   │
//! │  │   │ comprar       │    │ Clientes      │    │ snapshots    │  │   │
//! │  │   │ devolver      │    │ Transacciones │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  <data_dir>/Inventario.json, Clientes.json, Mercaderes.json, ...       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`posada`] - The handle that owns every manager
//! - [`operations`] - Sale, purchase and return flows
//! - [`repository`] - The managers
//! - [`store`] - JSON files and bootstrap modes
//! - [`error`] - Store error types
//!
//! ## Usage
//!
//! ```rust,no_run
//! use posada_store::{Posada, PosadaConfig};
//!
//! # fn main() -> Result<(), posada_store::StoreError> {
//! let mut posada = Posada::open(PosadaConfig::new("./BaseDeDatos"))?;
//! let venta = posada.vender(1, &[(101, 2)])?;
//! println!("{}", venta.dinero());
//! # Ok(())
//! # }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod operations;
pub mod posada;
pub mod repository;
pub mod store;

#[cfg(test)]
pub(crate) mod test_support;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StoreError, StoreResult};
pub use operations::Linea;
pub use posada::{Posada, PosadaConfig};
pub use store::{BootstrapMode, JsonStore, Semilla};

pub use repository::{
    DuplicatePolicy, Gestor, GestorClientes, GestorMercaderes, GestorTransacciones, Inventario,
    MasVendidos,
};
