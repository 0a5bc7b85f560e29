//! # Gestor
//!
//! The generic record manager every collection is built on.
//!
//! ## Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  get(id)        → &T            or NotFound                             │
//! │  add(t)         → insert + save or AlreadyExists ("Error, ID n ...")    │
//! │  remove(id)     → delete + save or NotFound                             │
//! │  update(t)      → replace + save or NotFound                            │
//! │  get_array()    → every record, ascending ID                            │
//! │  length()       → number of records                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The existence check always runs before the map is touched, and a change
//! whose save fails is rolled back, so a failed call leaves both the map and
//! the file as they were. Every successful mutation rewrites the whole file.

use std::collections::BTreeMap;
use std::path::Path;

use posada_core::{CoreError, CoreResult, Identificable};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info};

use crate::error::StoreResult;
use crate::store::JsonStore;

/// A map of records keyed by ID, mirrored to one JSON file.
#[derive(Debug)]
pub struct Gestor<T> {
    items: BTreeMap<u32, T>,
    store: JsonStore,
}

impl<T> Gestor<T>
where
    T: Identificable + Serialize + DeserializeOwned,
{
    /// Loads every record from `store`.
    pub fn open(store: JsonStore) -> StoreResult<Self> {
        let records: Vec<T> = store.load()?;
        let items = Self::index(records);

        info!(
            entidad = %T::KIND,
            path = %store.path().display(),
            count = items.len(),
            "Collection loaded"
        );

        Ok(Gestor { items, store })
    }

    /// Starts from `seed` and writes it to `store`, replacing whatever the
    /// file held.
    pub fn seeded(store: JsonStore, seed: Vec<T>) -> StoreResult<Self> {
        let gestor = Gestor {
            items: Self::index(seed),
            store,
        };
        gestor.persist()?;

        info!(
            entidad = %T::KIND,
            path = %gestor.store.path().display(),
            count = gestor.items.len(),
            "Collection seeded"
        );

        Ok(gestor)
    }

    fn index(records: Vec<T>) -> BTreeMap<u32, T> {
        records.into_iter().map(|r| (r.id(), r)).collect()
    }

    /// Returns the record with `id`.
    pub fn get(&self, id: u32) -> CoreResult<&T> {
        self.items
            .get(&id)
            .ok_or_else(|| CoreError::not_found(T::KIND, id))
    }

    pub fn contains(&self, id: u32) -> bool {
        self.items.contains_key(&id)
    }

    /// Inserts a new record. The ID must not be in use.
    pub fn add(&mut self, entidad: T) -> StoreResult<()> {
        let id = entidad.id();
        if self.items.contains_key(&id) {
            return Err(CoreError::AlreadyExists { id }.into());
        }

        debug!(entidad = %T::KIND, id, "Adding record");
        self.items.insert(id, entidad);
        if let Err(e) = self.persist() {
            self.items.remove(&id);
            return Err(e);
        }
        Ok(())
    }

    /// Deletes the record with `id` and returns it.
    pub fn remove(&mut self, id: u32) -> StoreResult<T> {
        let removed = self
            .items
            .remove(&id)
            .ok_or_else(|| CoreError::not_found(T::KIND, id))?;

        debug!(entidad = %T::KIND, id, "Removed record");
        if let Err(e) = self.persist() {
            self.items.insert(id, removed);
            return Err(e);
        }
        Ok(removed)
    }

    /// Replaces the record that has the same ID.
    pub fn update(&mut self, entidad: T) -> StoreResult<()> {
        let id = entidad.id();
        let slot = self
            .items
            .get_mut(&id)
            .ok_or_else(|| CoreError::not_found(T::KIND, id))?;

        debug!(entidad = %T::KIND, id, "Updating record");
        let previous = std::mem::replace(slot, entidad);
        if let Err(e) = self.persist() {
            self.items.insert(id, previous);
            return Err(e);
        }
        Ok(())
    }

    /// Applies `f` to the record with `id` and saves.
    ///
    /// `f` must leave the record untouched when it returns an error. If the
    /// save fails the record goes back to its previous value.
    pub(crate) fn modify<F>(&mut self, id: u32, f: F) -> StoreResult<()>
    where
        T: Clone,
        F: FnOnce(&mut T) -> CoreResult<()>,
    {
        let slot = self
            .items
            .get_mut(&id)
            .ok_or_else(|| CoreError::not_found(T::KIND, id))?;

        let previous = slot.clone();
        f(slot)?;
        if let Err(e) = self.persist() {
            self.items.insert(id, previous);
            return Err(e);
        }
        Ok(())
    }

    /// Replaces every record with `records` and saves.
    ///
    /// The map holds `records` even when the save fails.
    pub(crate) fn restore(&mut self, records: Vec<T>) -> StoreResult<()> {
        self.items = Self::index(records);
        self.persist()
    }

    /// Every record, ascending ID.
    pub fn get_array(&self) -> Vec<&T> {
        self.items.values().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.values()
    }

    pub fn length(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The file this manager writes to.
    pub fn path(&self) -> &Path {
        self.store.path()
    }

    fn persist(&self) -> StoreResult<()> {
        self.store.save(self.items.values())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::test_support::TempDir;
    use posada_core::{Bien, Entidad};

    fn gestor(dir: &TempDir) -> Gestor<Bien> {
        Gestor::open(JsonStore::new(dir.path().join("Bienes.json"))).unwrap()
    }

    fn bien(id: u32, nombre: &str) -> Bien {
        Bien::new(id, nombre, "Pieza de prueba", "Acero", 1.0, 10.0, 0).unwrap()
    }

    #[test]
    fn test_add_then_get_returns_same_record() {
        let dir = TempDir::new();
        let mut g = gestor(&dir);
        let espada = bien(20, "Espada");

        g.add(espada.clone()).unwrap();
        assert_eq!(g.get(20).unwrap(), &espada);
        assert_eq!(g.length(), 1);
    }

    #[test]
    fn test_duplicate_add_is_rejected() {
        let dir = TempDir::new();
        let mut g = gestor(&dir);
        g.add(bien(20, "Espada")).unwrap();

        let err = g.add(bien(20, "Otra")).unwrap_err();
        assert_eq!(err.to_string(), "Error, ID 20 ya está en uso");
        assert_eq!(g.get(20).unwrap().nombre(), "Espada");
        assert_eq!(g.length(), 1);
    }

    #[test]
    fn test_remove_then_get_is_not_found() {
        let dir = TempDir::new();
        let mut g = gestor(&dir);
        g.add(bien(1, "Espada")).unwrap();
        g.add(bien(2, "Escudo")).unwrap();

        let removed = g.remove(1).unwrap();
        assert_eq!(removed.nombre(), "Espada");
        assert_eq!(g.length(), 1);

        let err = g.get(1).unwrap_err();
        assert!(matches!(
            err,
            CoreError::NotFound {
                entidad: Entidad::Bien,
                id: 1
            }
        ));
        assert_eq!(err.to_string(), "Bien con ID 1 no encontrado.");
    }

    #[test]
    fn test_remove_unknown_is_not_found() {
        let dir = TempDir::new();
        let mut g = gestor(&dir);
        let err = g.remove(99).unwrap_err();
        assert!(matches!(err, StoreError::Core(CoreError::NotFound { id: 99, .. })));
    }

    #[test]
    fn test_update_replaces_existing_only() {
        let dir = TempDir::new();
        let mut g = gestor(&dir);
        g.add(bien(1, "Espada")).unwrap();

        g.update(bien(1, "Espada de plata")).unwrap();
        assert_eq!(g.get(1).unwrap().nombre(), "Espada de plata");

        let err = g.update(bien(2, "Escudo")).unwrap_err();
        assert!(matches!(err, StoreError::Core(CoreError::NotFound { id: 2, .. })));
        assert_eq!(g.length(), 1);
    }

    #[test]
    fn test_get_array_is_ordered_by_id() {
        let dir = TempDir::new();
        let mut g = gestor(&dir);
        g.add(bien(3, "C")).unwrap();
        g.add(bien(1, "A")).unwrap();
        g.add(bien(2, "B")).unwrap();

        let ids: Vec<u32> = g.get_array().iter().map(|b| b.id()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_mutations_survive_reopen() {
        let dir = TempDir::new();
        {
            let mut g = gestor(&dir);
            g.add(bien(1, "Espada")).unwrap();
            g.add(bien(2, "Escudo")).unwrap();
            g.remove(1).unwrap();
        }

        let g = gestor(&dir);
        assert_eq!(g.length(), 1);
        assert_eq!(g.get(2).unwrap().nombre(), "Escudo");
    }

    /// Opens a manager under `datos/`, then turns `datos` into a plain file
    /// so every later save fails.
    fn unwritable(dir: &TempDir, seed: &[Bien]) -> Gestor<Bien> {
        let datos = dir.path().join("datos");
        let mut g = Gestor::open(JsonStore::new(datos.join("Bienes.json"))).unwrap();
        for b in seed {
            g.add(b.clone()).unwrap();
        }
        std::fs::create_dir_all(&datos).unwrap();
        std::fs::remove_dir_all(&datos).unwrap();
        std::fs::write(&datos, "no soy un directorio").unwrap();
        g
    }

    #[test]
    fn test_failed_save_rolls_back_add() {
        let dir = TempDir::new();
        let mut g = unwritable(&dir, &[]);

        let err = g.add(bien(1, "Espada")).unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }));
        assert_eq!(g.length(), 0);
        assert!(g.get(1).is_err());
    }

    #[test]
    fn test_failed_save_rolls_back_remove_and_update() {
        let dir = TempDir::new();
        let mut g = unwritable(&dir, &[bien(1, "Espada")]);

        assert!(g.remove(1).is_err());
        assert_eq!(g.get(1).unwrap().nombre(), "Espada");

        assert!(g.update(bien(1, "Espada de plata")).is_err());
        assert_eq!(g.get(1).unwrap().nombre(), "Espada");
        assert_eq!(g.length(), 1);
    }

    #[test]
    fn test_failed_save_rolls_back_modify() {
        let dir = TempDir::new();
        let mut g = unwritable(&dir, &[bien(1, "Espada")]);

        let result = g.modify(1, |b| b.set_nombre("Oxidada").map_err(CoreError::from));
        assert!(result.is_err());
        assert_eq!(g.get(1).unwrap().nombre(), "Espada");
    }

    #[test]
    fn test_seeded_overwrites_file() {
        let dir = TempDir::new();
        let store = JsonStore::new(dir.path().join("Bienes.json"));
        {
            let mut g = Gestor::open(store.clone()).unwrap();
            g.add(bien(9, "Viejo")).unwrap();
        }

        let g = Gestor::seeded(store.clone(), vec![bien(1, "Nuevo")]).unwrap();
        assert_eq!(g.length(), 1);

        let reopened: Gestor<Bien> = Gestor::open(store).unwrap();
        assert!(reopened.contains(1));
        assert!(!reopened.contains(9));
    }
}
