//! # Clientes Repository
//!
//! The inn's customers.

use std::path::Path;

use posada_core::{Cliente, CoreResult, FiltroCliente};

use crate::error::StoreResult;
use crate::repository::gestor::Gestor;
use crate::store::{BootstrapMode, JsonStore};

/// Collection name, used for the data file.
pub const COLECCION: &str = "Clientes";

/// Manager for [`Cliente`] records.
#[derive(Debug)]
pub struct GestorClientes {
    gestor: Gestor<Cliente>,
}

impl GestorClientes {
    /// Opens the customer book under `data_dir`.
    ///
    /// ## Modes
    /// - `Production` reads `Clientes.json`
    /// - `SeededTest` writes the seed's customers to `DummyClientes.json`
    ///   and starts from them
    pub fn open(data_dir: &Path, mode: &BootstrapMode) -> StoreResult<Self> {
        let store = JsonStore::for_collection(data_dir, COLECCION, mode);
        let gestor = match mode {
            BootstrapMode::Production => Gestor::open(store)?,
            BootstrapMode::SeededTest(semilla) => Gestor::seeded(store, semilla.clientes.clone())?,
        };
        Ok(GestorClientes { gestor })
    }

    pub fn get(&self, id: u32) -> CoreResult<&Cliente> {
        self.gestor.get(id)
    }

    pub fn add(&mut self, cliente: Cliente) -> StoreResult<()> {
        self.gestor.add(cliente)
    }

    pub fn remove(&mut self, id: u32) -> StoreResult<Cliente> {
        self.gestor.remove(id)
    }

    pub fn update(&mut self, cliente: Cliente) -> StoreResult<()> {
        self.gestor.update(cliente)
    }

    pub fn get_array(&self) -> Vec<&Cliente> {
        self.gestor.get_array()
    }

    pub fn length(&self) -> usize {
        self.gestor.length()
    }

    pub fn contains(&self, id: u32) -> bool {
        self.gestor.contains(id)
    }

    /// Customers whose `filtro` field equals `valor` exactly.
    ///
    /// Accepted filters: `Nombre`, `Raza`, `Ubicacion`.
    pub fn buscar(&self, filtro: &str, valor: &str) -> CoreResult<Vec<&Cliente>> {
        let filtro: FiltroCliente = filtro.parse()?;
        Ok(self
            .gestor
            .iter()
            .filter(|c| filtro.matches(c, valor))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Semilla;
    use crate::test_support::TempDir;

    fn seeded(dir: &TempDir) -> GestorClientes {
        let semilla = Semilla::default().clientes(vec![
            Cliente::new(1, "Aragorn", "Humano", "Rohan").unwrap(),
            Cliente::new(2, "Legolas", "Elfo", "Bosque Negro").unwrap(),
            Cliente::new(3, "Eowyn", "Humano", "Rohan").unwrap(),
        ]);
        GestorClientes::open(dir.path(), &BootstrapMode::SeededTest(semilla)).unwrap()
    }

    #[test]
    fn test_seeded_mode_uses_side_file() {
        let dir = TempDir::new();
        let gestor = seeded(&dir);

        assert_eq!(gestor.length(), 3);
        assert!(dir.path().join("DummyClientes.json").exists());
        assert!(!dir.path().join("Clientes.json").exists());
    }

    #[test]
    fn test_production_mode_reads_real_file() {
        let dir = TempDir::new();
        {
            let mut gestor = GestorClientes::open(dir.path(), &BootstrapMode::Production).unwrap();
            gestor.add(Cliente::new(5, "Gimli", "Enano", "Erebor").unwrap()).unwrap();
        }

        let gestor = GestorClientes::open(dir.path(), &BootstrapMode::Production).unwrap();
        assert_eq!(gestor.get(5).unwrap().raza(), "Enano");
    }

    #[test]
    fn test_buscar_by_raza_and_ubicacion() {
        let dir = TempDir::new();
        let gestor = seeded(&dir);

        let humanos = gestor.buscar("Raza", "Humano").unwrap();
        assert_eq!(humanos.len(), 2);

        let rohan: Vec<&str> = gestor
            .buscar("Ubicacion", "Rohan")
            .unwrap()
            .into_iter()
            .map(Cliente::nombre)
            .collect();
        assert_eq!(rohan, vec!["Aragorn", "Eowyn"]);

        assert!(gestor.buscar("Nombre", "Frodo").unwrap().is_empty());
    }

    #[test]
    fn test_buscar_unknown_filter_fails() {
        let dir = TempDir::new();
        let gestor = seeded(&dir);
        let err = gestor.buscar("Tipo", "Herrero").unwrap_err();
        assert!(err.to_string().starts_with("Filtro no válido: 'Tipo'"));
    }

    #[test]
    fn test_update_and_remove() {
        let dir = TempDir::new();
        let mut gestor = seeded(&dir);

        let mut aragorn = gestor.get(1).unwrap().clone();
        aragorn.set_ubicacion("Gondor").unwrap();
        gestor.update(aragorn).unwrap();
        assert_eq!(gestor.get(1).unwrap().ubicacion(), "Gondor");

        gestor.remove(2).unwrap();
        assert_eq!(gestor.length(), 2);
        assert_eq!(
            gestor.get(2).unwrap_err().to_string(),
            "Cliente con ID 2 no encontrado."
        );
    }
}
