//! Sale, purchase and return dialogs.
//!
//! The dialogs only collect lines. Every rule (stock, cash, what can be
//! returned) is checked by the store when the operation runs.

use std::collections::BTreeSet;
use std::io::{BufRead, Write};

use posada_core::validation::{parse_cantidad_positiva, parse_id, parse_peso, parse_precio};
use posada_core::{Bien, Campo, CoreError, ElementoAlmacen, Identificable, Persona};
use posada_store::{Linea, Posada};

use crate::error::CliResult;
use crate::format::detalle_transaccion;
use crate::menu::{elegir_cliente, elegir_mercader, elegir_persona};
use crate::prompt::Prompter;

/// Sells goods from stock to a customer.
pub fn vender<R: BufRead, W: Write>(p: &mut Prompter<R, W>, posada: &mut Posada) -> CliResult<()> {
    let Some(cliente) = elegir_cliente(p, posada)? else {
        return Ok(());
    };

    let mut lineas: Vec<Linea> = Vec::new();
    loop {
        let disponibles: Vec<(u32, String)> = posada
            .estado_stock()
            .into_iter()
            .filter(|e| e.cantidad() > 0)
            .map(|e| (e.id(), format!("{} ({} en stock)", e.etiqueta(), e.cantidad())))
            .collect();
        if disponibles.is_empty() {
            p.say("No hay bienes en stock.")?;
            break;
        }

        let etiquetas: Vec<&str> = disponibles.iter().map(|(_, e)| e.as_str()).collect();
        let idx = p.select("Bien", &etiquetas)?;
        let cantidad = p.input_with("Cantidad", parse_cantidad_positiva)?;
        lineas.push((disponibles[idx].0, cantidad));

        if !p.confirm("¿Añadir otro bien?")? {
            break;
        }
    }

    if lineas.is_empty() {
        return Ok(());
    }

    let venta = posada.vender(cliente.id(), &lineas)?;
    for linea in detalle_transaccion(&venta) {
        p.say(linea)?;
    }
    p.say("✓ Venta registrada")
}

/// Buys goods from a merchant, either restocking known goods or adding new ones.
pub fn comprar<R: BufRead, W: Write>(p: &mut Prompter<R, W>, posada: &mut Posada) -> CliResult<()> {
    let Some(mercader) = elegir_mercader(p, posada)? else {
        return Ok(());
    };

    let mut elementos: Vec<ElementoAlmacen> = Vec::new();
    loop {
        let bien = match p.select("¿Qué bien?", &["Bien del inventario", "Bien nuevo"])? {
            0 => match elegir_bien(p, posada)? {
                Some(bien) => bien,
                None => continue,
            },
            _ => nuevo_bien(p, posada, &elementos)?,
        };

        let cantidad = p.input_with("Cantidad", parse_cantidad_positiva)?;
        elementos.push(ElementoAlmacen::new(bien, cantidad));

        if !p.confirm("¿Añadir otro bien?")? {
            break;
        }
    }

    let compra = posada.comprar(mercader.id(), elementos)?;
    for linea in detalle_transaccion(&compra) {
        p.say(linea)?;
    }
    p.say(format_args!("✓ Compra registrada. Caja: {}", posada.caja()))
}

/// Takes goods back from a customer or sends them back to a merchant.
pub fn devolver<R: BufRead, W: Write>(
    p: &mut Prompter<R, W>,
    posada: &mut Posada,
) -> CliResult<()> {
    let Some(persona) = elegir_persona(p, posada)? else {
        return Ok(());
    };

    let candidatos = pendientes(posada, &persona);
    if candidatos.is_empty() {
        p.say(format_args!(
            "No hay bienes que devolver con {}.",
            persona.etiqueta()
        ))?;
        return Ok(());
    }

    let etiquetas: Vec<String> = candidatos
        .iter()
        .map(|(_, etiqueta, pendiente)| format!("{} ({} pendientes)", etiqueta, pendiente))
        .collect();

    let mut lineas: Vec<Linea> = Vec::new();
    loop {
        let idx = p.select("Bien", &etiquetas)?;
        let cantidad = p.input_with("Cantidad", parse_cantidad_positiva)?;
        lineas.push((candidatos[idx].0, cantidad));

        if !p.confirm("¿Devolver otro bien?")? {
            break;
        }
    }

    let devolucion = posada.devolver(&persona, &lineas)?;
    for linea in detalle_transaccion(&devolucion) {
        p.say(linea)?;
    }
    p.say("✓ Devolución registrada")
}

// =============================================================================
// Helpers
// =============================================================================

/// Goods exchanged with `persona` that still have units to return:
/// (good ID, label, pending units), in ledger order.
fn pendientes(posada: &Posada, persona: &Persona) -> Vec<(u32, String, u32)> {
    let ledger = posada.transacciones();
    let mut vistos = BTreeSet::new();
    let mut candidatos = Vec::new();

    for transaccion in ledger.historial(persona) {
        for elemento in transaccion.elementos() {
            if !vistos.insert(elemento.id()) {
                continue;
            }
            let pendiente = ledger.pendiente_devolucion(persona, elemento.id());
            if pendiente > 0 {
                candidatos.push((elemento.id(), elemento.etiqueta(), pendiente));
            }
        }
    }

    candidatos
}

/// Picks a stocked good. `None` when the inventory is empty.
fn elegir_bien<R: BufRead, W: Write>(
    p: &mut Prompter<R, W>,
    posada: &Posada,
) -> CliResult<Option<Bien>> {
    let elementos = posada.inventario().get_array();
    if elementos.is_empty() {
        p.say("El inventario está vacío.")?;
        return Ok(None);
    }

    let etiquetas: Vec<String> = elementos.iter().map(|e| e.etiqueta()).collect();
    let idx = p.select("Bien", &etiquetas)?;
    Ok(Some(elementos[idx].bien().clone()))
}

/// Asks for every field of a good not yet in stock.
///
/// The ID must be free in the inventory and in the lines already collected.
fn nuevo_bien<R: BufRead, W: Write>(
    p: &mut Prompter<R, W>,
    posada: &Posada,
    elementos: &[ElementoAlmacen],
) -> CliResult<Bien> {
    let inventario = posada.inventario();
    let id = p.input_with("ID", |raw| {
        let id = parse_id(raw).map_err(CoreError::from)?;
        if inventario.contains(id) || elementos.iter().any(|e| e.id() == id) {
            return Err(CoreError::AlreadyExists { id });
        }
        Ok(id)
    })?;

    let nombre = p.input_text("Nombre", Campo::Nombre)?;
    let descripcion = p.input_text("Descripción", Campo::Descripcion)?;
    let material = p.input_text("Material", Campo::Material)?;
    let peso = p.input_with("Peso (kg)", parse_peso)?;
    let precio = p.input_with("Precio", parse_precio)?;

    Ok(Bien::new(id, nombre, descripcion, material, peso, precio, 0)?)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::testing::{posada, salida, script};
    use crate::test_support::TempDir;
    use posada_core::TipoTransaccion;

    #[test]
    fn test_vender_two_lines() {
        let dir = TempDir::new();
        let mut posada = posada(&dir);
        // cliente 1; espada x2; otro; escudo x1; fin
        let mut p = script(&["1", "1", "2", "s", "2", "1", "n"]);

        vender(&mut p, &mut posada).unwrap();

        assert_eq!(posada.inventario().stock(1), 3);
        assert_eq!(posada.inventario().stock(2), 1);
        let venta = posada.transacciones().get(1).unwrap();
        assert_eq!(venta.tipo(), TipoTransaccion::Venta);
        assert_eq!(venta.dinero().value(), 3800.0);

        let out = salida(p);
        assert!(out.contains("1 - Espada (5 en stock)"));
        assert!(out.contains("Total: 3800.00 coronas"));
    }

    #[test]
    fn test_vender_skips_goods_out_of_stock() {
        let dir = TempDir::new();
        let mut posada = posada(&dir);
        posada.inventario_mut().remove_bien(2, 2).unwrap();

        let mut p = script(&["1", "1", "1", "n"]);
        vender(&mut p, &mut posada).unwrap();

        let out = salida(p);
        assert!(!out.contains("2 - Escudo"));
        assert_eq!(posada.inventario().stock(1), 4);
    }

    #[test]
    fn test_comprar_existing_and_new_good() {
        let dir = TempDir::new();
        let mut posada = posada(&dir);
        let mut p = script(&[
            "1", // mercader
            "1", "2", "3", "s", // escudo x3
            "2", "1", "9", "Ballesta", "Ballesta de mano", "Madera", "1.5", "650", "2", "n",
        ]);

        comprar(&mut p, &mut posada).unwrap();

        assert_eq!(posada.inventario().stock(2), 5);
        assert_eq!(posada.inventario().stock(9), 2);
        assert_eq!(posada.inventario().get(9).unwrap().bien().nombre(), "Ballesta");

        // 800×3 + 650×2 out of 5000
        assert_eq!(posada.caja().value(), 1300.0);
        let out = salida(p);
        assert!(out.contains("✗ Error, ID 1 ya está en uso"));
        assert!(out.contains("✓ Compra registrada. Caja: 1300.00 coronas"));
    }

    #[test]
    fn test_comprar_without_cash_changes_nothing() {
        let dir = TempDir::new();
        let mut posada = posada(&dir);
        let mut p = script(&["1", "1", "1", "10", "n"]);

        let err = comprar(&mut p, &mut posada).unwrap_err();

        assert!(err.message.starts_with("No hay suficiente efectivo"));
        assert_eq!(posada.inventario().stock(1), 5);
        assert_eq!(posada.transacciones().length(), 0);
    }

    #[test]
    fn test_devolver_lists_only_pending_goods() {
        let dir = TempDir::new();
        let mut posada = posada(&dir);
        posada.vender(1, &[(1, 2)]).unwrap();

        // cliente; Geralt; espada x1; fin
        let mut p = script(&["1", "1", "1", "1", "n"]);
        devolver(&mut p, &mut posada).unwrap();

        assert_eq!(posada.inventario().stock(1), 4);
        let devolucion = posada.transacciones().get(2).unwrap();
        assert_eq!(devolucion.tipo(), TipoTransaccion::DevolucionCliente);

        let out = salida(p);
        assert!(out.contains("1 - Espada (2 pendientes)"));
        assert!(!out.contains("2 - Escudo"));
    }

    #[test]
    fn test_devolver_with_nothing_exchanged() {
        let dir = TempDir::new();
        let mut posada = posada(&dir);
        let mut p = script(&["2", "1"]);

        devolver(&mut p, &mut posada).unwrap();
        assert!(salida(p).contains("No hay bienes que devolver con 1 - Hattori."));
    }
}
