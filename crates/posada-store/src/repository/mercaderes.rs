//! # Mercaderes Repository
//!
//! Merchants the inn buys from.

use std::path::Path;

use posada_core::{CoreResult, FiltroMercader, Mercader};

use crate::error::StoreResult;
use crate::repository::gestor::Gestor;
use crate::store::{BootstrapMode, JsonStore};

/// Collection name, used for the data file.
pub const COLECCION: &str = "Mercaderes";

/// Manager for [`Mercader`] records.
#[derive(Debug)]
pub struct GestorMercaderes {
    gestor: Gestor<Mercader>,
}

impl GestorMercaderes {
    /// Opens the merchant book under `data_dir` (`Mercaderes.json`, or
    /// `DummyMercaderes.json` when seeded).
    pub fn open(data_dir: &Path, mode: &BootstrapMode) -> StoreResult<Self> {
        let store = JsonStore::for_collection(data_dir, COLECCION, mode);
        let gestor = match mode {
            BootstrapMode::Production => Gestor::open(store)?,
            BootstrapMode::SeededTest(semilla) => {
                Gestor::seeded(store, semilla.mercaderes.clone())?
            }
        };
        Ok(GestorMercaderes { gestor })
    }

    pub fn get(&self, id: u32) -> CoreResult<&Mercader> {
        self.gestor.get(id)
    }

    pub fn add(&mut self, mercader: Mercader) -> StoreResult<()> {
        self.gestor.add(mercader)
    }

    pub fn remove(&mut self, id: u32) -> StoreResult<Mercader> {
        self.gestor.remove(id)
    }

    pub fn update(&mut self, mercader: Mercader) -> StoreResult<()> {
        self.gestor.update(mercader)
    }

    pub fn get_array(&self) -> Vec<&Mercader> {
        self.gestor.get_array()
    }

    pub fn length(&self) -> usize {
        self.gestor.length()
    }

    pub fn contains(&self, id: u32) -> bool {
        self.gestor.contains(id)
    }

    /// Merchants whose `filtro` field equals `valor` exactly.
    ///
    /// Accepted filters: `Nombre`, `Tipo`, `Ubicacion`.
    pub fn buscar(&self, filtro: &str, valor: &str) -> CoreResult<Vec<&Mercader>> {
        let filtro: FiltroMercader = filtro.parse()?;
        Ok(self
            .gestor
            .iter()
            .filter(|m| filtro.matches(m, valor))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Semilla;
    use crate::test_support::TempDir;

    fn seeded(dir: &TempDir) -> GestorMercaderes {
        let semilla = Semilla::default().mercaderes(vec![
            Mercader::new(1, "Hattori", "Herrero", "Novigrado").unwrap(),
            Mercader::new(2, "Fergus", "Herrero", "Toussaint").unwrap(),
            Mercader::new(3, "Keira", "Alquimista", "Velen").unwrap(),
        ]);
        GestorMercaderes::open(dir.path(), &BootstrapMode::SeededTest(semilla)).unwrap()
    }

    #[test]
    fn test_buscar_by_tipo() {
        let dir = TempDir::new();
        let gestor = seeded(&dir);

        assert_eq!(gestor.buscar("Tipo", "Herrero").unwrap().len(), 2);
        assert_eq!(gestor.buscar("Ubicacion", "Velen").unwrap()[0].nombre(), "Keira");
        assert!(gestor.buscar("Raza", "Humano").is_err());
    }

    #[test]
    fn test_duplicate_add_message() {
        let dir = TempDir::new();
        let mut gestor = seeded(&dir);
        let err = gestor
            .add(Mercader::new(2, "Otro", "Sastre", "Oxenfurt").unwrap())
            .unwrap_err();
        assert_eq!(err.to_string(), "Error, ID 2 ya está en uso");
    }

    #[test]
    fn test_seed_is_written_to_side_file() {
        let dir = TempDir::new();
        seeded(&dir);

        let raw = std::fs::read_to_string(dir.path().join("DummyMercaderes.json")).unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(json.as_array().unwrap().len(), 3);
        assert_eq!(json[0]["tipo"], "Herrero");
    }
}
