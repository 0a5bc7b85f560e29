//! # JSON Snapshot Store
//!
//! One pretty-printed JSON array per record kind, rewritten whole on every
//! change.
//!
//! ## File Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  <data_dir>/                                                            │
//! │  ├── Inventario.json         ┐                                          │
//! │  ├── Clientes.json           │  BootstrapMode::Production               │
//! │  ├── Mercaderes.json         │  (read on open, rewritten on change)     │
//! │  ├── Transacciones.json      ┘                                          │
//! │  │                                                                      │
//! │  ├── DummyInventario.json    ┐                                          │
//! │  ├── DummyClientes.json      │  BootstrapMode::SeededTest               │
//! │  ├── DummyMercaderes.json    │  (overwritten with the seed on open)     │
//! │  └── DummyTransacciones.json ┘                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Seeded runs never touch the production files, so tests and demos can
//! share a data directory with real books.

use std::fs;
use std::path::{Path, PathBuf};

use posada_core::{Cliente, ElementoAlmacen, Mercader, Transaccion};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{StoreError, StoreResult};

// =============================================================================
// Bootstrap Mode
// =============================================================================

/// Where a manager's initial records come from.
#[derive(Debug, Clone, Default)]
pub enum BootstrapMode {
    /// Load the production file (`Clientes.json`, ...).
    #[default]
    Production,
    /// Persist the given seed to the side file (`DummyClientes.json`, ...)
    /// and start from it.
    SeededTest(Semilla),
}

impl BootstrapMode {
    /// Seeded mode with no records at all.
    pub fn seeded_empty() -> Self {
        BootstrapMode::SeededTest(Semilla::default())
    }

    pub fn is_seeded(&self) -> bool {
        matches!(self, BootstrapMode::SeededTest(_))
    }

    /// Name of the data file for a collection under this mode.
    pub fn file_name(&self, coleccion: &str) -> String {
        match self {
            BootstrapMode::Production => format!("{coleccion}.json"),
            BootstrapMode::SeededTest(_) => format!("Dummy{coleccion}.json"),
        }
    }
}

/// Seed records for [`BootstrapMode::SeededTest`].
#[derive(Debug, Clone, Default)]
pub struct Semilla {
    pub inventario: Vec<ElementoAlmacen>,
    pub clientes: Vec<Cliente>,
    pub mercaderes: Vec<Mercader>,
    pub transacciones: Vec<Transaccion>,
}

impl Semilla {
    pub fn inventario(mut self, elementos: Vec<ElementoAlmacen>) -> Self {
        self.inventario = elementos;
        self
    }

    pub fn clientes(mut self, clientes: Vec<Cliente>) -> Self {
        self.clientes = clientes;
        self
    }

    pub fn mercaderes(mut self, mercaderes: Vec<Mercader>) -> Self {
        self.mercaderes = mercaderes;
        self
    }

    pub fn transacciones(mut self, transacciones: Vec<Transaccion>) -> Self {
        self.transacciones = transacciones;
        self
    }
}

// =============================================================================
// Json Store
// =============================================================================

/// A single JSON array file.
#[derive(Debug, Clone)]
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonStore { path: path.into() }
    }

    /// The file for `coleccion` inside `data_dir` under the given mode.
    pub fn for_collection(data_dir: &Path, coleccion: &str, mode: &BootstrapMode) -> Self {
        JsonStore::new(data_dir.join(mode.file_name(coleccion)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads every record in the file.
    ///
    /// A missing or empty file reads as no records. A malformed file is an
    /// error rather than an empty collection, so it never gets overwritten
    /// by the next save.
    pub fn load<T: DeserializeOwned>(&self) -> StoreResult<Vec<T>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                warn!(path = %self.path.display(), "Data file not found, starting empty");
                return Ok(Vec::new());
            }
            Err(err) => return Err(StoreError::io(&self.path, err)),
        };

        if raw.trim().is_empty() {
            warn!(path = %self.path.display(), "Data file is empty, starting empty");
            return Ok(Vec::new());
        }

        let records: Vec<T> =
            serde_json::from_str(&raw).map_err(|e| StoreError::json(&self.path, e))?;

        debug!(path = %self.path.display(), count = records.len(), "Loaded records");
        Ok(records)
    }

    /// Overwrites the file with `records`.
    ///
    /// Writes to a sibling temp file first and renames it into place, so a
    /// crash mid-write leaves the previous snapshot intact.
    pub fn save<'a, T, I>(&self, records: I) -> StoreResult<()>
    where
        T: Serialize + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir).map_err(|e| StoreError::io(dir, e))?;
            }
        }

        let records: Vec<&T> = records.into_iter().collect();
        let json =
            serde_json::to_string_pretty(&records).map_err(|e| StoreError::json(&self.path, e))?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|e| StoreError::io(&tmp, e))?;
        fs::rename(&tmp, &self.path).map_err(|e| StoreError::io(&self.path, e))?;

        debug!(path = %self.path.display(), count = records.len(), "Snapshot written");
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TempDir;
    use posada_core::Cliente;

    #[test]
    fn test_file_names_by_mode() {
        assert_eq!(BootstrapMode::Production.file_name("Clientes"), "Clientes.json");
        assert_eq!(
            BootstrapMode::seeded_empty().file_name("Clientes"),
            "DummyClientes.json"
        );
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = TempDir::new();
        let store = JsonStore::new(dir.path().join("Nada.json"));
        let records: Vec<Cliente> = store.load().unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new();
        let store = JsonStore::new(dir.path().join("sub").join("Clientes.json"));
        let clientes = vec![
            Cliente::new(1, "Geralt", "Brujo", "Rivia").unwrap(),
            Cliente::new(2, "Yennefer", "Hechicera", "Vengerberg").unwrap(),
        ];

        store.save(&clientes).unwrap();
        let raw = std::fs::read_to_string(store.path()).unwrap();
        assert!(raw.trim_start().starts_with('['));
        assert!(raw.contains('\n'));

        let back: Vec<Cliente> = store.load().unwrap();
        assert_eq!(back, clientes);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = TempDir::new();
        let path = dir.path().join("Clientes.json");
        std::fs::write(&path, "{ no es json").unwrap();

        let err = JsonStore::new(&path).load::<Cliente>().unwrap_err();
        assert!(matches!(err, StoreError::Json { .. }));
    }
}
