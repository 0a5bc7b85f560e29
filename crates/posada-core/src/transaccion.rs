//! # Transaccion
//!
//! An immutable ledger entry for one exchange with a customer or a merchant.
//!
//! ## Classification
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  persona     devolucion    tipo                  caja                   │
//! │  ───────────────────────────────────────────────────────────────────    │
//! │  Cliente     false         Venta                 ingreso                │
//! │  Mercader    false         Compra                gasto                  │
//! │  Cliente     true          DevolucionCliente     gasto                  │
//! │  Mercader    true          DevolucionMercader    ingreso                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Immutability
//! `dinero` is computed once in [`Transaccion::new`] and never again. The
//! line items are cloned into the record; nothing in here touches the
//! quantities of the caller's slots.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Entidad;
use crate::money::Coronas;
use crate::types::{ElementoAlmacen, Identificable, Persona};

/// One exchange: sale, purchase, or a return of either.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaccion {
    #[serde(rename = "ID")]
    id: u32,
    fecha: DateTime<Utc>,
    elementos: Vec<ElementoAlmacen>,
    persona: Persona,
    devolucion: bool,
    dinero: Coronas,
}

/// What kind of exchange a transaction records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TipoTransaccion {
    /// Goods sold to a customer.
    Venta,
    /// Goods bought from a merchant.
    Compra,
    /// A customer brought goods back.
    DevolucionCliente,
    /// Goods sent back to a merchant.
    DevolucionMercader,
}

impl TipoTransaccion {
    /// Whether money comes into the till.
    pub fn es_ingreso(&self) -> bool {
        matches!(
            self,
            TipoTransaccion::Venta | TipoTransaccion::DevolucionMercader
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TipoTransaccion::Venta => "Venta",
            TipoTransaccion::Compra => "Compra",
            TipoTransaccion::DevolucionCliente => "Devolución de cliente",
            TipoTransaccion::DevolucionMercader => "Devolución a mercader",
        }
    }
}

impl Transaccion {
    /// Creates a transaction and computes its total.
    ///
    /// ## Example
    /// ```rust
    /// use chrono::Utc;
    /// use posada_core::{Bien, Cliente, ElementoAlmacen, Transaccion};
    ///
    /// let espada = Bien::new(1, "Espada", "Espada legendaria", "Acero", 3.0, 1500.0, 0).unwrap();
    /// let escudo = Bien::new(2, "Escudo", "Escudo de roble", "Roble", 4.0, 800.0, 0).unwrap();
    /// let cliente = Cliente::new(1, "Geralt", "Brujo", "Rivia").unwrap();
    ///
    /// let tx = Transaccion::new(
    ///     1,
    ///     Utc::now(),
    ///     vec![ElementoAlmacen::new(espada, 2), ElementoAlmacen::new(escudo, 1)],
    ///     cliente.into(),
    ///     false,
    /// );
    /// assert_eq!(tx.dinero().value(), 3800.0);
    /// ```
    pub fn new(
        id: u32,
        fecha: DateTime<Utc>,
        elementos: Vec<ElementoAlmacen>,
        persona: Persona,
        devolucion: bool,
    ) -> Self {
        let dinero: Coronas = elementos.iter().map(ElementoAlmacen::subtotal).sum();

        Transaccion {
            id,
            fecha,
            elementos,
            persona,
            devolucion,
            dinero,
        }
    }

    pub fn fecha(&self) -> DateTime<Utc> {
        self.fecha
    }

    pub fn elementos(&self) -> &[ElementoAlmacen] {
        &self.elementos
    }

    pub fn persona(&self) -> &Persona {
        &self.persona
    }

    pub fn devolucion(&self) -> bool {
        self.devolucion
    }

    /// Total computed when the transaction was created.
    pub fn dinero(&self) -> Coronas {
        self.dinero
    }

    pub fn tipo(&self) -> TipoTransaccion {
        match (&self.persona, self.devolucion) {
            (Persona::Cliente(_), false) => TipoTransaccion::Venta,
            (Persona::Mercader(_), false) => TipoTransaccion::Compra,
            (Persona::Cliente(_), true) => TipoTransaccion::DevolucionCliente,
            (Persona::Mercader(_), true) => TipoTransaccion::DevolucionMercader,
        }
    }

    /// Units of one good in this transaction, over every line.
    pub fn cantidad_de(&self, bien_id: u32) -> u64 {
        self.elementos
            .iter()
            .filter(|e| e.id() == bien_id)
            .map(|e| u64::from(e.cantidad()))
            .sum()
    }
}

impl Identificable for Transaccion {
    const KIND: Entidad = Entidad::Transaccion;

    fn id(&self) -> u32 {
        self.id
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
