//! # Business Operations
//!
//! Sales, purchases and returns. Each one checks everything first, then
//! moves stock, then appends one transaction to the ledger. If moving stock
//! or recording fails, the inventory is put back as it was.
//!
//! ## Sale Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  vender(cliente_id, [(bien_id, cantidad), ...])                         │
//! │       │                                                                 │
//! │       ├── 1. customer exists?                    NotFound               │
//! │       ├── 2. lines present, quantities > 0?      EmptyTransaction /     │
//! │       │                                          InvalidQuantity        │
//! │       ├── 3. stock covers every good?            InsufficientStock      │
//! │       │      (repeated lines are summed first)                          │
//! │       ├── 4. remove_bien for each good                                  │
//! │       └── 5. ledger.add(Transaccion { ID: get_transaccion_id() })       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Cash
//! The till holds `caja_inicial + ingresos - gastos`. Purchases and
//! customer refunds must fit in it.

use std::collections::BTreeMap;

use chrono::Utc;
use posada_core::{
    Bien, Coronas, CoreError, ElementoAlmacen, Identificable, Persona, Transaccion,
    ValidationError,
};
use tracing::{error, info, warn};

use crate::error::StoreResult;
use crate::posada::Posada;

/// One requested line: good ID and units.
pub type Linea = (u32, u32);

/// Sums repeated goods and rejects empty requests and zero quantities.
fn agrupar(lineas: &[Linea]) -> StoreResult<BTreeMap<u32, u32>> {
    if lineas.is_empty() {
        return Err(CoreError::EmptyTransaction.into());
    }

    let mut total: BTreeMap<u32, u32> = BTreeMap::new();
    for &(id, cantidad) in lineas {
        if cantidad == 0 {
            return Err(ValidationError::InvalidQuantity.into());
        }
        let slot = total.entry(id).or_insert(0);
        *slot = slot
            .checked_add(cantidad)
            .ok_or(ValidationError::InvalidQuantity)?;
    }
    Ok(total)
}

impl Posada {
    /// Sells goods from stock to a customer.
    ///
    /// ## Errors
    /// - `NotFound` for an unknown customer or good
    /// - `InsufficientStock` when a good doesn't have enough units
    ///
    /// Nothing changes unless every check passes.
    pub fn vender(&mut self, cliente_id: u32, lineas: &[Linea]) -> StoreResult<Transaccion> {
        let cliente = self.clientes.get(cliente_id)?.clone();
        let pedido = agrupar(lineas)?;

        for (&id, &solicitado) in &pedido {
            let disponible = self.inventario.get(id)?.cantidad();
            if disponible < solicitado {
                return Err(CoreError::InsufficientStock {
                    id,
                    disponible,
                    solicitado,
                }
                .into());
            }
        }

        let mut elementos = Vec::with_capacity(pedido.len());
        for (&id, &cantidad) in &pedido {
            let bien = self.inventario.get(id)?.bien().clone();
            elementos.push(ElementoAlmacen::new(bien, cantidad));
        }

        self.con_stock_reversible(|posada| {
            for (&id, &cantidad) in &pedido {
                posada.inventario.remove_bien(id, cantidad)?;
            }
            posada.registrar(elementos, cliente.into(), false)
        })
    }

    /// Buys goods from a merchant into stock.
    ///
    /// Goods not yet stocked get a new slot; stocked ones are merged. A
    /// merged line is recorded with the stored good, so the ledger shows the
    /// same name and price as the inventory.
    ///
    /// ## Errors
    /// - `NotFound` for an unknown merchant
    /// - `InsufficientCash` when the total exceeds the till
    pub fn comprar(
        &mut self,
        mercader_id: u32,
        elementos: Vec<ElementoAlmacen>,
    ) -> StoreResult<Transaccion> {
        let mercader = self.mercaderes.get(mercader_id)?.clone();
        if elementos.is_empty() {
            return Err(CoreError::EmptyTransaction.into());
        }
        if elementos.iter().any(|e| e.cantidad() == 0) {
            return Err(ValidationError::InvalidQuantity.into());
        }

        let mut nuevos: BTreeMap<u32, Bien> = BTreeMap::new();
        let elementos: Vec<ElementoAlmacen> = elementos
            .into_iter()
            .map(|e| {
                let bien = match self.inventario.get(e.id()) {
                    Ok(slot) => slot.bien().clone(),
                    Err(_) => nuevos
                        .entry(e.id())
                        .or_insert_with(|| e.bien().clone())
                        .clone(),
                };
                ElementoAlmacen::new(bien, e.cantidad())
            })
            .collect();

        let total: Coronas = elementos.iter().map(ElementoAlmacen::subtotal).sum();
        self.comprobar_caja(total)?;

        self.con_stock_reversible(|posada| {
            for elemento in &elementos {
                posada.inventario.add(elemento.clone())?;
            }
            posada.registrar(elementos, mercader.into(), false)
        })
    }

    /// Takes goods back from a customer or sends them back to a merchant.
    ///
    /// Only goods exchanged with that party can be returned, and never more
    /// units than are still pending. The line keeps the price of the original
    /// exchange.
    ///
    /// ## Errors
    /// - `NotFound` when the party is not on the books
    /// - `ReturnExceeded` for goods never exchanged, or too many units
    /// - `InsufficientCash` when a customer refund exceeds the till
    /// - `InsufficientStock` when sending back more than is in stock
    pub fn devolver(&mut self, persona: &Persona, lineas: &[Linea]) -> StoreResult<Transaccion> {
        let persona = match persona {
            Persona::Cliente(c) => Persona::from(self.clientes.get(c.id())?.clone()),
            Persona::Mercader(m) => Persona::from(self.mercaderes.get(m.id())?.clone()),
        };
        let pedido = agrupar(lineas)?;

        let mut elementos = Vec::with_capacity(pedido.len());
        for (&id, &solicitado) in &pedido {
            let pendiente = self.transacciones.pendiente_devolucion(&persona, id);
            if solicitado > pendiente {
                return Err(CoreError::ReturnExceeded {
                    id,
                    pendiente,
                    solicitado,
                }
                .into());
            }
            let bien = self
                .bien_intercambiado(&persona, id)
                .ok_or(CoreError::ReturnExceeded {
                    id,
                    pendiente,
                    solicitado,
                })?;
            elementos.push(ElementoAlmacen::new(bien, solicitado));
        }

        match &persona {
            Persona::Cliente(_) => {
                let total: Coronas = elementos.iter().map(ElementoAlmacen::subtotal).sum();
                self.comprobar_caja(total)?;
            }
            Persona::Mercader(_) => {
                for (&id, &solicitado) in &pedido {
                    let disponible = self.inventario.stock(id);
                    if disponible < solicitado {
                        return Err(CoreError::InsufficientStock {
                            id,
                            disponible,
                            solicitado,
                        }
                        .into());
                    }
                }
            }
        }

        self.con_stock_reversible(|posada| {
            match &persona {
                Persona::Cliente(_) => {
                    for elemento in &elementos {
                        posada.inventario.add(elemento.clone())?;
                    }
                }
                Persona::Mercader(_) => {
                    for (&id, &cantidad) in &pedido {
                        posada.inventario.remove_bien(id, cantidad)?;
                    }
                }
            }
            posada.registrar(elementos, persona, true)
        })
    }

    /// Stock report: every slot, ascending good ID.
    pub fn estado_stock(&self) -> Vec<&ElementoAlmacen> {
        self.inventario.get_array()
    }

    /// The good as it was last exchanged with `persona`.
    fn bien_intercambiado(&self, persona: &Persona, bien_id: u32) -> Option<Bien> {
        self.transacciones
            .historial(persona)
            .into_iter()
            .rev()
            .flat_map(|t| t.elementos())
            .find(|e| e.id() == bien_id)
            .map(|e| e.bien().clone())
    }

    /// Runs `mover`, which moves stock and records the transaction. If it
    /// fails the inventory goes back to how it was before.
    fn con_stock_reversible<F>(&mut self, mover: F) -> StoreResult<Transaccion>
    where
        F: FnOnce(&mut Self) -> StoreResult<Transaccion>,
    {
        let previo = self.inventario.snapshot();
        match mover(self) {
            Ok(transaccion) => Ok(transaccion),
            Err(e) => {
                warn!(error = %e, "Operation failed, restoring stock");
                if let Err(restaurar) = self.inventario.restore(previo) {
                    error!(error = %restaurar, "Stock file could not be restored");
                }
                Err(e)
            }
        }
    }

    fn comprobar_caja(&self, requerido: Coronas) -> StoreResult<()> {
        let disponible = self.caja();
        if requerido > disponible {
            return Err(CoreError::InsufficientCash {
                disponible: disponible.value(),
                requerido: requerido.value(),
            }
            .into());
        }
        Ok(())
    }

    fn registrar(
        &mut self,
        elementos: Vec<ElementoAlmacen>,
        persona: Persona,
        devolucion: bool,
    ) -> StoreResult<Transaccion> {
        let id = self.transacciones.get_transaccion_id();
        let transaccion = Transaccion::new(id, Utc::now(), elementos, persona, devolucion);

        info!(
            id,
            tipo = transaccion.tipo().as_str(),
            persona = %transaccion.persona().etiqueta(),
            dinero = transaccion.dinero().value(),
            "Transaction recorded"
        );

        self.transacciones.add(transaccion.clone())?;
        Ok(transaccion)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
