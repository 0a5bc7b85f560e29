//! # Console Formatting
//!
//! Fixed-width rows for the listings and reports.

use posada_core::{Cliente, ElementoAlmacen, Identificable, Mercader, Transaccion};

/// Header matching [`fila_bien`].
pub const CABECERA_BIENES: &str =
    "  ID  Nombre                     Material     Peso (kg)        Precio  Stock";

pub const CABECERA_CLIENTES: &str = "  ID  Nombre               Raza             Ubicación";

pub const CABECERA_MERCADERES: &str = "  ID  Nombre               Tipo             Ubicación";

pub const CABECERA_TRANSACCIONES: &str =
    "  ID  Fecha             Tipo                  Persona                      Importe";

pub fn fila_bien(elemento: &ElementoAlmacen) -> String {
    let bien = elemento.bien();
    format!(
        "{:>4}  {:<25}  {:<11}  {:>9.2}  {:>12.2}  {:>5}",
        bien.id(),
        bien.nombre(),
        bien.material(),
        bien.peso(),
        bien.precio().value(),
        elemento.cantidad()
    )
}

pub fn fila_cliente(cliente: &Cliente) -> String {
    format!(
        "{:>4}  {:<19}  {:<15}  {}",
        cliente.id(),
        cliente.nombre(),
        cliente.raza(),
        cliente.ubicacion()
    )
}

pub fn fila_mercader(mercader: &Mercader) -> String {
    format!(
        "{:>4}  {:<19}  {:<15}  {}",
        mercader.id(),
        mercader.nombre(),
        mercader.tipo(),
        mercader.ubicacion()
    )
}

pub fn fila_transaccion(transaccion: &Transaccion) -> String {
    format!(
        "{:>4}  {}  {:<20}  {:<25}  {:>12.2}",
        transaccion.id(),
        transaccion.fecha().format("%Y-%m-%d %H:%M"),
        transaccion.tipo().as_str(),
        transaccion.persona().etiqueta(),
        transaccion.dinero().value()
    )
}

/// Receipt lines for one transaction: one row per good, then the total.
pub fn detalle_transaccion(transaccion: &Transaccion) -> Vec<String> {
    let mut lineas = vec![format!(
        "Transacción {} ({}) con {}",
        transaccion.id(),
        transaccion.tipo().as_str(),
        transaccion.persona().etiqueta()
    )];

    for elemento in transaccion.elementos() {
        lineas.push(format!(
            "  {} x{} a {:.2} = {}",
            elemento.bien().etiqueta(),
            elemento.cantidad(),
            elemento.bien().precio().value(),
            elemento.subtotal()
        ));
    }

    lineas.push(format!("  Total: {}", transaccion.dinero()));
    lineas
}

// =============================================================================
// Unit Tests
// =============================================================================
