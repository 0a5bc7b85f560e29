//! Reports submenu. Read-only.

use std::io::{BufRead, Write};

use posada_core::Transaccion;
use posada_store::Posada;

use crate::error::CliResult;
use crate::format::{
    detalle_transaccion, fila_bien, fila_transaccion, CABECERA_BIENES, CABECERA_TRANSACCIONES,
};
use crate::menu::{accion, elegir_persona};
use crate::prompt::Prompter;

const OPCIONES: [&str; 7] = [
    "Estado del stock",
    "Bienes más vendidos",
    "Ingresos y gastos",
    "Historial de un cliente o mercader",
    "Transacciones por tipo",
    "Clientes y mercaderes con transacciones",
    "Volver",
];

const TIPOS: [&str; 4] = ["Todas", "Ventas", "Compras", "Devoluciones"];

pub fn menu<R: BufRead, W: Write>(p: &mut Prompter<R, W>, posada: &Posada) -> CliResult<()> {
    loop {
        p.say("")?;
        let resultado = match p.select("Informes", &OPCIONES)? {
            0 => estado_stock(p, posada),
            1 => mas_vendidos(p, posada),
            2 => ingresos_y_gastos(p, posada),
            3 => historial(p, posada),
            4 => por_tipo(p, posada),
            5 => participantes(p, posada),
            _ => return Ok(()),
        };
        accion(p, resultado)?;
    }
}

fn estado_stock<R: BufRead, W: Write>(p: &mut Prompter<R, W>, posada: &Posada) -> CliResult<()> {
    let elementos = posada.estado_stock();
    if elementos.is_empty() {
        return p.say("El inventario está vacío.");
    }

    p.say(CABECERA_BIENES)?;
    for elemento in &elementos {
        p.say(fila_bien(elemento))?;
    }

    let unidades: u64 = elementos.iter().map(|e| u64::from(e.cantidad())).sum();
    p.say(format_args!(
        "{} bienes, {} unidades en total",
        elementos.len(),
        unidades
    ))
}

fn mas_vendidos<R: BufRead, W: Write>(p: &mut Prompter<R, W>, posada: &Posada) -> CliResult<()> {
    let top = posada.transacciones().bienes_mas_vendidos();
    if top.bienes.is_empty() {
        return p.say("Todavía no se ha vendido nada.");
    }

    p.say(format_args!("Bienes más vendidos ({} unidades):", top.cantidad))?;
    for etiqueta in top.etiquetas() {
        p.say(format_args!("  {}", etiqueta))?;
    }
    Ok(())
}

fn ingresos_y_gastos<R: BufRead, W: Write>(
    p: &mut Prompter<R, W>,
    posada: &Posada,
) -> CliResult<()> {
    let ledger = posada.transacciones();
    p.say(format_args!("Ingresos: {}", ledger.total_ingresos()))?;
    p.say(format_args!("Gastos:   {}", ledger.total_gastos()))?;
    p.say(format_args!("Balance:  {}", ledger.balance()))?;
    p.say(format_args!("Caja:     {}", posada.caja()))
}

fn historial<R: BufRead, W: Write>(p: &mut Prompter<R, W>, posada: &Posada) -> CliResult<()> {
    let Some(persona) = elegir_persona(p, posada)? else {
        return Ok(());
    };

    let ledger = posada.transacciones();
    let transacciones = ledger.historial(&persona);
    if transacciones.is_empty() {
        return p.say(format_args!("{} no tiene transacciones.", persona.etiqueta()));
    }

    for transaccion in transacciones {
        p.say("")?;
        for linea in detalle_transaccion(transaccion) {
            p.say(linea)?;
        }
    }

    p.say("")?;
    p.say("Bienes intercambiados:")?;
    for etiqueta in ledger.get_bienes(&persona) {
        p.say(format_args!("  {}", etiqueta))?;
    }
    Ok(())
}

fn por_tipo<R: BufRead, W: Write>(p: &mut Prompter<R, W>, posada: &Posada) -> CliResult<()> {
    let ledger = posada.transacciones();
    let transacciones: Vec<&Transaccion> = match p.select("¿Qué transacciones?", &TIPOS)? {
        0 => ledger.get_array(),
        1 => ledger.ventas(),
        2 => ledger.compras(),
        _ => ledger.devoluciones(),
    };

    if transacciones.is_empty() {
        return p.say("Sin resultados.");
    }
    p.say(CABECERA_TRANSACCIONES)?;
    for transaccion in transacciones {
        p.say(fila_transaccion(transaccion))?;
    }
    Ok(())
}

fn participantes<R: BufRead, W: Write>(p: &mut Prompter<R, W>, posada: &Posada) -> CliResult<()> {
    let ledger = posada.transacciones();

    p.say("Clientes:")?;
    for etiqueta in ledger.get_clientes() {
        p.say(format_args!("  {}", etiqueta))?;
    }
    p.say("Mercaderes:")?;
    for etiqueta in ledger.get_mercaderes() {
        p.say(format_args!("  {}", etiqueta))?;
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
