//! # Inventario
//!
//! Stock slots of the inn, one [`ElementoAlmacen`] per good.
//!
//! ## Adding a Good That Is Already Stocked
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  slot 101: Espada × 1                                                   │
//! │                                                                         │
//! │  add(Espada × 2)                                                        │
//! │       │                                                                 │
//! │       ├── MergeOnDuplicate (default) ──► slot 101: Espada × 3           │
//! │       │                                                                 │
//! │       └── Reject ──────────────────────► "Error, ID 101 ya está en uso" │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Merging is where this manager departs from [`Gestor::add`]. It is a
//! named policy so callers that want the strict behaviour can ask for it.
//!
//! The slot quantity is the stock level. `Bien::cantidad` is never read for
//! stock decisions.

use std::cmp::Ordering;
use std::path::Path;

use posada_core::{
    CoreError, CoreResult, CriterioOrden, ElementoAlmacen, FiltroBien, Identificable,
    ValidationError,
};
use tracing::debug;

use crate::error::StoreResult;
use crate::repository::gestor::Gestor;
use crate::store::{BootstrapMode, JsonStore};

/// Collection name, used for the data file.
pub const COLECCION: &str = "Inventario";

/// What `add` does when the good already has a slot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// The existing slot absorbs the incoming quantity.
    #[default]
    MergeOnDuplicate,
    /// Same as the base manager: duplicate IDs are an error.
    Reject,
}

/// The inn's stock.
#[derive(Debug)]
pub struct Inventario {
    gestor: Gestor<ElementoAlmacen>,
    policy: DuplicatePolicy,
}

impl Inventario {
    /// Opens the inventory under `data_dir` for the given mode.
    pub fn open(data_dir: &Path, mode: &BootstrapMode) -> StoreResult<Self> {
        let store = JsonStore::for_collection(data_dir, COLECCION, mode);
        let gestor = match mode {
            BootstrapMode::Production => Gestor::open(store)?,
            BootstrapMode::SeededTest(semilla) => Gestor::seeded(store, semilla.inventario.clone())?,
        };

        Ok(Inventario {
            gestor,
            policy: DuplicatePolicy::default(),
        })
    }

    pub fn with_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> DuplicatePolicy {
        self.policy
    }

    // =========================================================================
    // Base Contract
    // =========================================================================

    pub fn get(&self, id: u32) -> CoreResult<&ElementoAlmacen> {
        self.gestor.get(id)
    }

    /// Adds a slot, or merges into the existing one (see [`DuplicatePolicy`]).
    ///
    /// A merge keeps the stored good's data and only adds the quantity.
    pub fn add(&mut self, elemento: ElementoAlmacen) -> StoreResult<()> {
        let id = elemento.id();
        if self.policy == DuplicatePolicy::Reject || !self.gestor.contains(id) {
            return self.gestor.add(elemento);
        }

        debug!(id, cantidad = elemento.cantidad(), "Merging into existing slot");
        self.add_bien(id, elemento.cantidad())
    }

    pub fn remove(&mut self, id: u32) -> StoreResult<ElementoAlmacen> {
        self.gestor.remove(id)
    }

    pub fn update(&mut self, elemento: ElementoAlmacen) -> StoreResult<()> {
        self.gestor.update(elemento)
    }

    pub fn get_array(&self) -> Vec<&ElementoAlmacen> {
        self.gestor.get_array()
    }

    pub fn length(&self) -> usize {
        self.gestor.length()
    }

    pub fn contains(&self, id: u32) -> bool {
        self.gestor.contains(id)
    }

    pub fn path(&self) -> &Path {
        self.gestor.path()
    }

    // =========================================================================
    // Stock
    // =========================================================================

    /// Units currently held of good `id`. Unknown goods hold zero.
    pub fn stock(&self, id: u32) -> u32 {
        self.gestor.get(id).map(ElementoAlmacen::cantidad).unwrap_or(0)
    }

    /// Takes `cantidad` units out of slot `id`.
    pub fn remove_bien(&mut self, id: u32, cantidad: u32) -> StoreResult<()> {
        debug!(id, cantidad, "Removing stock");
        self.gestor.modify(id, |slot| {
            let disponible = slot.cantidad();
            let restante = disponible
                .checked_sub(cantidad)
                .ok_or(CoreError::InsufficientStock {
                    id,
                    disponible,
                    solicitado: cantidad,
                })?;
            slot.set_cantidad(restante);
            Ok(())
        })
    }

    /// Puts `cantidad` units into slot `id`.
    pub fn add_bien(&mut self, id: u32, cantidad: u32) -> StoreResult<()> {
        debug!(id, cantidad, "Adding stock");
        self.gestor.modify(id, |slot| {
            let total = slot
                .cantidad()
                .checked_add(cantidad)
                .ok_or(ValidationError::InvalidQuantity)?;
            slot.set_cantidad(total);
            Ok(())
        })
    }

    /// A copy of every slot, to hand back to [`Inventario::restore`].
    pub(crate) fn snapshot(&self) -> Vec<ElementoAlmacen> {
        self.gestor.iter().cloned().collect()
    }

    /// Puts the slots back to a previous [`Inventario::snapshot`].
    pub(crate) fn restore(&mut self, slots: Vec<ElementoAlmacen>) -> StoreResult<()> {
        debug!(count = slots.len(), "Restoring stock");
        self.gestor.restore(slots)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Slots whose good matches `valor` exactly on the named field.
    ///
    /// ## Errors
    /// Unknown filter names are rejected, they never yield an empty list.
    pub fn buscar(&self, filtro: &str, valor: &str) -> CoreResult<Vec<&ElementoAlmacen>> {
        let filtro: FiltroBien = filtro.parse()?;
        Ok(self.filtrar(filtro, valor))
    }

    pub fn filtrar(&self, filtro: FiltroBien, valor: &str) -> Vec<&ElementoAlmacen> {
        self.gestor
            .iter()
            .filter(|e| filtro.matches(e.bien(), valor))
            .collect()
    }

    /// A sorted copy of the slots. The map itself keeps its order.
    pub fn ordenar(&self, criterio: &str, ascendente: bool) -> CoreResult<Vec<&ElementoAlmacen>> {
        let criterio: CriterioOrden = criterio.parse()?;
        Ok(self.ordenar_por(criterio, ascendente))
    }

    pub fn ordenar_por(&self, criterio: CriterioOrden, ascendente: bool) -> Vec<&ElementoAlmacen> {
        let mut elementos = self.gestor.get_array();
        let cmp = |a: &&ElementoAlmacen, b: &&ElementoAlmacen| -> Ordering {
            match criterio {
                CriterioOrden::Nombre => a.bien().nombre().cmp(b.bien().nombre()),
                CriterioOrden::Precio => a.bien().precio().cmp(&b.bien().precio()),
            }
        };

        if ascendente {
            elementos.sort_by(cmp);
        } else {
            elementos.sort_by(|a, b| cmp(b, a));
        }
        elementos
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
