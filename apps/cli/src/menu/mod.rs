//! # Menus
//!
//! The interactive shell.
//!
//! ```text
//! Menú principal
//! ├── Vender                  ventas::vender
//! ├── Comprar                 ventas::comprar
//! ├── Devolver                ventas::devolver
//! ├── Gestionar base de datos
//! │   ├── Bienes              bienes::menu      (nuevo, modificar, eliminar,
//! │   ├── Clientes            clientes::menu     buscar, listar; bienes
//! │   └── Mercaderes          mercaderes::menu   también ordenar)
//! ├── Informes                informes::menu
//! └── Salir
//! ```
//!
//! A failed action prints its message and shows the menu again. End of
//! input leaves the shell from any depth.

pub mod bienes;
pub mod clientes;
pub mod informes;
pub mod mercaderes;
pub mod ventas;

use std::io::{BufRead, Write};

use posada_core::validation::validate_required;
use posada_core::{Campo, Identificable, Persona, ValidationError};
use posada_store::Posada;
use tracing::debug;

use crate::error::{CliResult, ErrorCode};
use crate::prompt::Prompter;

const PRINCIPAL: [&str; 6] = [
    "Vender",
    "Comprar",
    "Devolver",
    "Gestionar base de datos",
    "Informes",
    "Salir",
];

const GESTIONAR: [&str; 4] = ["Bienes", "Clientes", "Mercaderes", "Volver"];

/// Runs the main menu until "Salir" or end of input.
pub fn run<R: BufRead, W: Write>(
    p: &mut Prompter<R, W>,
    posada: &mut Posada,
    nombre: &str,
) -> CliResult<()> {
    p.say(format_args!("=== {} ===", nombre))?;

    loop {
        p.say("")?;
        let resultado = match p.select("Menú principal", &PRINCIPAL) {
            Ok(0) => ventas::vender(p, posada),
            Ok(1) => ventas::comprar(p, posada),
            Ok(2) => ventas::devolver(p, posada),
            Ok(3) => gestionar(p, posada),
            Ok(4) => informes::menu(p, posada),
            Ok(_) => break,
            Err(e) => Err(e),
        };

        match resultado {
            Ok(()) => {}
            Err(e) if e.is_cancelled() => {
                debug!("Input closed, leaving the shell");
                p.say("")?;
                break;
            }
            Err(e) => informar(p, e)?,
        }
    }

    p.say("¡Hasta la próxima, viajero!")
}

fn gestionar<R: BufRead, W: Write>(p: &mut Prompter<R, W>, posada: &mut Posada) -> CliResult<()> {
    match p.select("Gestionar base de datos", &GESTIONAR)? {
        0 => bienes::menu(p, posada),
        1 => clientes::menu(p, posada),
        2 => mercaderes::menu(p, posada),
        _ => Ok(()),
    }
}

/// Runs one submenu action, printing its error instead of leaving the submenu.
///
/// End of input and terminal failures still propagate.
pub(crate) fn accion<R: BufRead, W: Write>(
    p: &mut Prompter<R, W>,
    resultado: CliResult<()>,
) -> CliResult<()> {
    match resultado {
        Ok(()) => Ok(()),
        Err(e) => informar(p, e),
    }
}

fn informar<R: BufRead, W: Write>(
    p: &mut Prompter<R, W>,
    e: crate::error::CliError,
) -> CliResult<()> {
    if e.is_cancelled() || e.code == ErrorCode::IoError {
        return Err(e);
    }
    debug!(code = ?e.code, message = %e.message, "Action failed");
    p.error(&e)
}

// =============================================================================
// Shared Pickers
// =============================================================================

/// Parser for a required text answer, for use with `input_or_keep`.
pub(crate) fn texto(campo: Campo) -> impl Fn(&str) -> Result<String, ValidationError> {
    move |raw| validate_required(campo, raw).map(|_| raw.to_string())
}

/// Picks a registered customer. `None` when there are none.
pub(crate) fn elegir_cliente<R: BufRead, W: Write>(
    p: &mut Prompter<R, W>,
    posada: &Posada,
) -> CliResult<Option<Persona>> {
    let clientes = posada.clientes().get_array();
    if clientes.is_empty() {
        p.say("No hay clientes registrados.")?;
        return Ok(None);
    }

    let etiquetas: Vec<String> = clientes
        .iter()
        .map(|c| format!("{} - {}", c.id(), c.nombre()))
        .collect();
    let idx = p.select("Cliente", &etiquetas)?;
    Ok(Some(Persona::from(clientes[idx].clone())))
}

/// Picks a registered merchant. `None` when there are none.
pub(crate) fn elegir_mercader<R: BufRead, W: Write>(
    p: &mut Prompter<R, W>,
    posada: &Posada,
) -> CliResult<Option<Persona>> {
    let mercaderes = posada.mercaderes().get_array();
    if mercaderes.is_empty() {
        p.say("No hay mercaderes registrados.")?;
        return Ok(None);
    }

    let etiquetas: Vec<String> = mercaderes
        .iter()
        .map(|m| format!("{} - {}", m.id(), m.nombre()))
        .collect();
    let idx = p.select("Mercader", &etiquetas)?;
    Ok(Some(Persona::from(mercaderes[idx].clone())))
}

/// Picks either a customer or a merchant.
pub(crate) fn elegir_persona<R: BufRead, W: Write>(
    p: &mut Prompter<R, W>,
    posada: &Posada,
) -> CliResult<Option<Persona>> {
    match p.select("¿Con quién?", &["Cliente", "Mercader"])? {
        0 => elegir_cliente(p, posada),
        _ => elegir_mercader(p, posada),
    }
}

// =============================================================================
// Test Helpers
// =============================================================================

#[cfg(test)]
pub(crate) mod testing {
    use std::io::Cursor;

    use posada_core::{Bien, Cliente, ElementoAlmacen, Mercader};
    use posada_store::{Posada, PosadaConfig};

    use crate::prompt::Prompter;
    use crate::test_support::TempDir;

    pub type ScriptPrompter = Prompter<Cursor<Vec<u8>>, Vec<u8>>;

    /// One answer per line.
    pub fn script(lineas: &[&str]) -> ScriptPrompter {
        let mut texto = lineas.join("\n");
        texto.push('\n');
        Prompter::new(Cursor::new(texto.into_bytes()), Vec::new())
    }

    pub fn salida(p: ScriptPrompter) -> String {
        String::from_utf8(p.into_output()).unwrap()
    }

    /// Books with two goods, one customer, one merchant and 5000 in the till.
    pub fn posada(dir: &TempDir) -> Posada {
        let mut posada =
            Posada::open(PosadaConfig::new(dir.path()).caja_inicial(5000.0)).unwrap();

        let espada = Bien::new(1, "Espada", "Espada legendaria", "Acero", 3.0, 1500.0, 0).unwrap();
        let escudo = Bien::new(2, "Escudo", "Escudo de roble", "Roble", 4.0, 800.0, 0).unwrap();
        posada
            .inventario_mut()
            .add(ElementoAlmacen::new(espada, 5))
            .unwrap();
        posada
            .inventario_mut()
            .add(ElementoAlmacen::new(escudo, 2))
            .unwrap();
        posada
            .clientes_mut()
            .add(Cliente::new(1, "Geralt", "Brujo", "Rivia").unwrap())
            .unwrap();
        posada
            .mercaderes_mut()
            .add(Mercader::new(1, "Hattori", "Herrero", "Novigrado").unwrap())
            .unwrap();

        posada
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::testing::{posada, salida, script};
    use super::*;
    use crate::test_support::TempDir;

    #[test]
    fn test_salir() {
        let dir = TempDir::new();
        let mut posada = posada(&dir);
        let mut p = script(&["6"]);

        run(&mut p, &mut posada, "Posada del Lobo Blanco").unwrap();

        let out = salida(p);
        assert!(out.starts_with("=== Posada del Lobo Blanco ==="));
        assert!(out.contains("  4. Gestionar base de datos"));
        assert!(out.ends_with("¡Hasta la próxima, viajero!\n"));
    }

    #[test]
    fn test_end_of_input_leaves_cleanly() {
        let dir = TempDir::new();
        let mut posada = posada(&dir);
        let mut p = script(&["1"]);

        run(&mut p, &mut posada, "Posada").unwrap();
        assert!(salida(p).ends_with("¡Hasta la próxima, viajero!\n"));
    }

    #[test]
    fn test_failed_action_returns_to_menu() {
        let dir = TempDir::new();
        let mut posada = posada(&dir);
        // Sell 9 swords with only 5 in stock, then leave.
        let mut p = script(&["1", "1", "1", "9", "n", "6"]);

        run(&mut p, &mut posada, "Posada").unwrap();

        let out = salida(p);
        assert!(out.contains("✗ No hay suficiente stock del bien 1"), "{out}");
        assert_eq!(out.matches("Menú principal").count(), 2);
        assert_eq!(posada.inventario().stock(1), 5);
    }

    #[test]
    fn test_gestionar_volver() {
        let dir = TempDir::new();
        let mut posada = posada(&dir);
        let mut p = script(&["4", "4", "6"]);

        run(&mut p, &mut posada, "Posada").unwrap();
        assert!(salida(p).contains("  3. Mercaderes"));
    }
}
