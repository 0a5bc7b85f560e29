//! # Transacciones Repository
//!
//! The inn's ledger. Entries can be added and removed but never edited.
//!
//! ## Reports
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Ledger Reports (full scans)                        │
//! │                                                                         │
//! │  bienes_mas_vendidos()  Σ cantidad per good over sales to customers,    │
//! │                         every good tied at the maximum                  │
//! │  total_ingresos()       Σ dinero of sales + returns to merchants        │
//! │  total_gastos()         Σ dinero of purchases + customer returns        │
//! │  get_clientes()         distinct "ID - nombre", ledger order            │
//! │  get_mercaderes()       distinct "ID - nombre", ledger order            │
//! │  get_bienes(persona)    distinct goods exchanged with one party         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Ledger order is ascending transaction ID.

use std::collections::BTreeMap;
use std::path::Path;

use posada_core::{
    Bien, Coronas, CoreError, CoreResult, Identificable, Persona, TipoTransaccion, Transaccion,
};
use tracing::warn;

use crate::error::StoreResult;
use crate::repository::gestor::Gestor;
use crate::store::{BootstrapMode, JsonStore};

/// Collection name, used for the data file.
pub const COLECCION: &str = "Transacciones";

/// Message for any attempt to edit a stored transaction.
pub const MENSAJE_INMUTABLE: &str = "No se pueden modificar las transacciones ya creadas.";

/// Result of [`GestorTransacciones::bienes_mas_vendidos`].
#[derive(Debug, Clone, PartialEq)]
pub struct MasVendidos {
    /// Units sold of each of the top goods. Zero when nothing was sold.
    pub cantidad: u64,
    /// The goods tied at `cantidad`, ascending ID.
    pub bienes: Vec<Bien>,
}

impl MasVendidos {
    /// `"ID - nombre"` of each top good.
    pub fn etiquetas(&self) -> Vec<String> {
        self.bienes.iter().map(Bien::etiqueta).collect()
    }
}

/// Manager for [`Transaccion`] records.
#[derive(Debug)]
pub struct GestorTransacciones {
    gestor: Gestor<Transaccion>,
}

impl GestorTransacciones {
    /// Opens the ledger under `data_dir` (`Transacciones.json`, or
    /// `DummyTransacciones.json` when seeded).
    pub fn open(data_dir: &Path, mode: &BootstrapMode) -> StoreResult<Self> {
        let store = JsonStore::for_collection(data_dir, COLECCION, mode);
        let gestor = match mode {
            BootstrapMode::Production => Gestor::open(store)?,
            BootstrapMode::SeededTest(semilla) => {
                Gestor::seeded(store, semilla.transacciones.clone())?
            }
        };
        Ok(GestorTransacciones { gestor })
    }

    // =========================================================================
    // Base Contract
    // =========================================================================

    pub fn get(&self, id: u32) -> CoreResult<&Transaccion> {
        self.gestor.get(id)
    }

    pub fn add(&mut self, transaccion: Transaccion) -> StoreResult<()> {
        self.gestor.add(transaccion)
    }

    pub fn remove(&mut self, id: u32) -> StoreResult<Transaccion> {
        self.gestor.remove(id)
    }

    /// Always fails: stored transactions are immutable.
    pub fn update(&mut self, transaccion: Transaccion) -> StoreResult<()> {
        warn!(id = transaccion.id(), "Rejected attempt to edit a transaction");
        Err(CoreError::Forbidden(MENSAJE_INMUTABLE.to_string()).into())
    }

    pub fn get_array(&self) -> Vec<&Transaccion> {
        self.gestor.get_array()
    }

    pub fn length(&self) -> usize {
        self.gestor.length()
    }

    /// Smallest positive ID not in use. IDs freed by `remove` are reused.
    ///
    /// ## Example
    /// ```text
    /// ledger IDs {1, 2, 4} → 3
    /// empty ledger        → 1
    /// ```
    pub fn get_transaccion_id(&self) -> u32 {
        let mut id = 1;
        while self.gestor.contains(id) {
            id += 1;
        }
        id
    }

    // =========================================================================
    // Ledger Views
    // =========================================================================

    fn por_tipo(&self, tipos: &[TipoTransaccion]) -> Vec<&Transaccion> {
        self.gestor
            .iter()
            .filter(|t| tipos.contains(&t.tipo()))
            .collect()
    }

    /// Sales to customers.
    pub fn ventas(&self) -> Vec<&Transaccion> {
        self.por_tipo(&[TipoTransaccion::Venta])
    }

    /// Purchases from merchants.
    pub fn compras(&self) -> Vec<&Transaccion> {
        self.por_tipo(&[TipoTransaccion::Compra])
    }

    /// Returns in either direction.
    pub fn devoluciones(&self) -> Vec<&Transaccion> {
        self.por_tipo(&[
            TipoTransaccion::DevolucionCliente,
            TipoTransaccion::DevolucionMercader,
        ])
    }

    /// Every transaction with one party.
    pub fn historial(&self, persona: &Persona) -> Vec<&Transaccion> {
        self.gestor
            .iter()
            .filter(|t| t.persona().es_misma(persona))
            .collect()
    }

    // =========================================================================
    // Reports
    // =========================================================================

    /// Goods sold the most to customers, returns excluded.
    pub fn bienes_mas_vendidos(&self) -> MasVendidos {
        let mut vendidos: BTreeMap<u32, (u64, &Bien)> = BTreeMap::new();

        for transaccion in self.gestor.iter() {
            if transaccion.tipo() != TipoTransaccion::Venta {
                continue;
            }
            for linea in transaccion.elementos() {
                let entry = vendidos.entry(linea.id()).or_insert((0, linea.bien()));
                entry.0 += u64::from(linea.cantidad());
            }
        }

        let cantidad = vendidos.values().map(|(n, _)| *n).max().unwrap_or(0);
        let bienes = vendidos
            .values()
            .filter(|(n, _)| cantidad > 0 && *n == cantidad)
            .map(|(_, bien)| (*bien).clone())
            .collect();

        MasVendidos { cantidad, bienes }
    }

    /// Money in: sales to customers and returns to merchants.
    pub fn total_ingresos(&self) -> Coronas {
        self.gestor
            .iter()
            .filter(|t| t.tipo().es_ingreso())
            .map(Transaccion::dinero)
            .sum()
    }

    /// Money out: purchases from merchants and refunds to customers.
    pub fn total_gastos(&self) -> Coronas {
        self.gestor
            .iter()
            .filter(|t| !t.tipo().es_ingreso())
            .map(Transaccion::dinero)
            .sum()
    }

    /// `total_ingresos - total_gastos`.
    pub fn balance(&self) -> Coronas {
        self.total_ingresos() - self.total_gastos()
    }

    /// Distinct merchants in the ledger, first appearance first.
    pub fn get_mercaderes(&self) -> Vec<String> {
        self.personas(Persona::es_mercader)
    }

    /// Distinct customers in the ledger, first appearance first.
    pub fn get_clientes(&self) -> Vec<String> {
        self.personas(Persona::es_cliente)
    }

    fn personas(&self, rol: fn(&Persona) -> bool) -> Vec<String> {
        let mut etiquetas: Vec<String> = Vec::new();
        for persona in self.gestor.iter().map(Transaccion::persona) {
            if !rol(persona) {
                continue;
            }
            let etiqueta = persona.etiqueta();
            if !etiquetas.contains(&etiqueta) {
                etiquetas.push(etiqueta);
            }
        }
        etiquetas
    }

    /// Distinct goods exchanged with `persona`, as `"ID - nombre"`.
    pub fn get_bienes(&self, persona: &Persona) -> Vec<String> {
        let mut etiquetas: Vec<String> = Vec::new();
        for transaccion in self.historial(persona) {
            for linea in transaccion.elementos() {
                let etiqueta = linea.etiqueta();
                if !etiquetas.contains(&etiqueta) {
                    etiquetas.push(etiqueta);
                }
            }
        }
        etiquetas
    }

    /// Whether good `bien_id` was ever exchanged with `persona`.
    pub fn intercambiado_con(&self, persona: &Persona, bien_id: u32) -> bool {
        self.historial(persona)
            .iter()
            .any(|t| t.cantidad_de(bien_id) > 0)
    }

    /// Units of `bien_id` that `persona` can still return: what changed hands
    /// in their sales or purchases minus what they already returned.
    pub fn pendiente_devolucion(&self, persona: &Persona, bien_id: u32) -> u32 {
        let (entregado, devuelto) = self.historial(persona).iter().fold(
            (0u64, 0u64),
            |(entregado, devuelto), t| {
                let n = t.cantidad_de(bien_id);
                if t.devolucion() {
                    (entregado, devuelto + n)
                } else {
                    (entregado + n, devuelto)
                }
            },
        );
        u32::try_from(entregado.saturating_sub(devuelto)).unwrap_or(u32::MAX)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
