//! # Repository Module
//!
//! Record managers for the Posada.
//!
//! ## Manager Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Menu                                                                   │
//! │       │                                                                 │
//! │       │  posada.clientes_mut().add(cliente)                             │
//! │       ▼                                                                 │
//! │  GestorClientes ─┐                                                      │
//! │  GestorMercaderes├──► Gestor<T> ──► BTreeMap<u32, T> ──► JsonStore      │
//! │  Inventario     ─┤    (get, add, remove, update,           (whole-file  │
//! │  GestorTransacc.─┘     get_array, length)                   snapshot)   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Managers
//!
//! - [`Gestor`] - The shared contract
//! - [`Inventario`] - Stock slots, merge-on-duplicate, search and sort
//! - [`GestorClientes`] / [`GestorMercaderes`] - People, with search
//! - [`GestorTransacciones`] - Append-only ledger and its reports

pub mod clientes;
pub mod gestor;
pub mod inventario;
pub mod mercaderes;
pub mod transacciones;

pub use clientes::GestorClientes;
pub use gestor::Gestor;
pub use inventario::{DuplicatePolicy, Inventario};
pub use mercaderes::GestorMercaderes;
pub use transacciones::{GestorTransacciones, MasVendidos};
