//! # Posada Handle
//!
//! Owns every manager for one data directory.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  PosadaConfig::new(data_dir) ← data dir, bootstrap mode, opening cash   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Posada::open(config)                                                   │
//! │       │                                                                 │
//! │       ├── Inventario            (Inventario.json)                       │
//! │       ├── GestorClientes        (Clientes.json)                         │
//! │       ├── GestorMercaderes      (Mercaderes.json)                       │
//! │       └── GestorTransacciones   (Transacciones.json)                    │
//! │                                                                         │
//! │  posada.clientes() always hands out the same manager. A second          │
//! │  Posada::open builds a fresh set, which is how tests isolate state.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::{Path, PathBuf};

use posada_core::Coronas;
use tracing::info;

use crate::error::StoreResult;
use crate::repository::{GestorClientes, GestorMercaderes, GestorTransacciones, Inventario};
use crate::store::BootstrapMode;

// =============================================================================
// Configuration
// =============================================================================

/// Store configuration.
///
/// ## Example
/// ```rust,no_run
/// use posada_store::{BootstrapMode, PosadaConfig};
///
/// let config = PosadaConfig::new("./BaseDeDatos")
///     .bootstrap(BootstrapMode::seeded_empty())
///     .caja_inicial(500.0);
/// ```
#[derive(Debug, Clone)]
pub struct PosadaConfig {
    /// Directory holding the JSON files. Created on first write.
    pub data_dir: PathBuf,

    /// Production files or a seeded side set.
    /// Default: Production
    pub bootstrap: BootstrapMode,

    /// Cash in the till before any recorded transaction.
    /// Default: 0
    pub caja_inicial: Coronas,
}

impl PosadaConfig {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        PosadaConfig {
            data_dir: data_dir.into(),
            bootstrap: BootstrapMode::Production,
            caja_inicial: Coronas::zero(),
        }
    }

    pub fn bootstrap(mut self, mode: BootstrapMode) -> Self {
        self.bootstrap = mode;
        self
    }

    pub fn caja_inicial(mut self, caja: f64) -> Self {
        self.caja_inicial = Coronas::new(caja);
        self
    }
}

// =============================================================================
// Posada
// =============================================================================

/// Handle to the inn's books.
#[derive(Debug)]
pub struct Posada {
    data_dir: PathBuf,
    caja_inicial: Coronas,
    pub(crate) inventario: Inventario,
    pub(crate) clientes: GestorClientes,
    pub(crate) mercaderes: GestorMercaderes,
    pub(crate) transacciones: GestorTransacciones,
}

impl Posada {
    /// Opens (or seeds) every collection.
    pub fn open(config: PosadaConfig) -> StoreResult<Self> {
        info!(
            path = %config.data_dir.display(),
            seeded = config.bootstrap.is_seeded(),
            "Opening posada"
        );

        let dir = config.data_dir.as_path();
        let posada = Posada {
            inventario: Inventario::open(dir, &config.bootstrap)?,
            clientes: GestorClientes::open(dir, &config.bootstrap)?,
            mercaderes: GestorMercaderes::open(dir, &config.bootstrap)?,
            transacciones: GestorTransacciones::open(dir, &config.bootstrap)?,
            data_dir: config.data_dir,
            caja_inicial: config.caja_inicial,
        };

        info!(
            bienes = posada.inventario.length(),
            clientes = posada.clientes.length(),
            mercaderes = posada.mercaderes.length(),
            transacciones = posada.transacciones.length(),
            "Posada ready"
        );

        Ok(posada)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn inventario(&self) -> &Inventario {
        &self.inventario
    }

    pub fn inventario_mut(&mut self) -> &mut Inventario {
        &mut self.inventario
    }

    pub fn clientes(&self) -> &GestorClientes {
        &self.clientes
    }

    pub fn clientes_mut(&mut self) -> &mut GestorClientes {
        &mut self.clientes
    }

    pub fn mercaderes(&self) -> &GestorMercaderes {
        &self.mercaderes
    }

    pub fn mercaderes_mut(&mut self) -> &mut GestorMercaderes {
        &mut self.mercaderes
    }

    pub fn transacciones(&self) -> &GestorTransacciones {
        &self.transacciones
    }

    pub fn transacciones_mut(&mut self) -> &mut GestorTransacciones {
        &mut self.transacciones
    }

    /// Cash in the till: opening cash plus the ledger balance.
    pub fn caja(&self) -> Coronas {
        self.caja_inicial + self.transacciones.balance()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Semilla;
    use crate::test_support::TempDir;
    use posada_core::Cliente;

    #[test]
    fn test_same_manager_on_repeated_access() {
        let dir = TempDir::new();
        let posada = Posada::open(PosadaConfig::new(dir.path())).unwrap();

        assert!(std::ptr::eq(posada.clientes(), posada.clientes()));
        assert!(std::ptr::eq(posada.inventario(), posada.inventario()));
        assert!(std::ptr::eq(posada.transacciones(), posada.transacciones()));
    }

    #[test]
    fn test_new_handle_gets_distinct_managers() {
        let dir = TempDir::new();
        let primera = Posada::open(PosadaConfig::new(dir.path())).unwrap();
        let segunda = Posada::open(PosadaConfig::new(dir.path())).unwrap();

        assert!(!std::ptr::eq(primera.clientes(), segunda.clientes()));
    }

    #[test]
    fn test_changes_through_the_handle_are_seen_by_later_access() {
        let dir = TempDir::new();
        let mut posada = Posada::open(PosadaConfig::new(dir.path())).unwrap();

        posada
            .clientes_mut()
            .add(Cliente::new(1, "Geralt", "Brujo", "Rivia").unwrap())
            .unwrap();
        assert_eq!(posada.clientes().length(), 1);

        let reabierta = Posada::open(PosadaConfig::new(dir.path())).unwrap();
        assert_eq!(reabierta.clientes().get(1).unwrap().nombre(), "Geralt");
    }

    #[test]
    fn test_seeded_handle_leaves_production_files_alone() {
        let dir = TempDir::new();
        let semilla =
            Semilla::default().clientes(vec![Cliente::new(1, "Ciri", "Humana", "Cintra").unwrap()]);
        let posada = Posada::open(
            PosadaConfig::new(dir.path()).bootstrap(BootstrapMode::SeededTest(semilla)),
        )
        .unwrap();

        assert_eq!(posada.clientes().length(), 1);
        assert!(dir.path().join("DummyClientes.json").exists());
        assert!(dir.path().join("DummyTransacciones.json").exists());
        assert!(!dir.path().join("Clientes.json").exists());
    }

    #[test]
    fn test_caja_starts_at_opening_cash() {
        let dir = TempDir::new();
        let posada =
            Posada::open(PosadaConfig::new(dir.path()).caja_inicial(250.0)).unwrap();
        assert_eq!(posada.caja(), Coronas::new(250.0));
    }
}
