//! Customers submenu.

use std::io::{BufRead, Write};

use posada_core::validation::parse_id;
use posada_core::{Campo, Cliente, CoreError, FiltroCliente};
use posada_store::Posada;

use crate::error::CliResult;
use crate::format::{fila_cliente, CABECERA_CLIENTES};
use crate::menu::{accion, texto};
use crate::prompt::Prompter;

const OPCIONES: [&str; 6] = ["Nuevo", "Modificar", "Eliminar", "Buscar", "Listar", "Volver"];

pub fn menu<R: BufRead, W: Write>(p: &mut Prompter<R, W>, posada: &mut Posada) -> CliResult<()> {
    loop {
        p.say("")?;
        let resultado = match p.select("Clientes", &OPCIONES)? {
            0 => nuevo(p, posada),
            1 => modificar(p, posada),
            2 => eliminar(p, posada),
            3 => buscar(p, posada),
            4 => {
                let clientes = posada.clientes().get_array();
                tabla(p, &clientes)
            }
            _ => return Ok(()),
        };
        accion(p, resultado)?;
    }
}

fn nuevo<R: BufRead, W: Write>(p: &mut Prompter<R, W>, posada: &mut Posada) -> CliResult<()> {
    let clientes = posada.clientes();
    let id = p.input_with("ID", |raw| {
        let id = parse_id(raw).map_err(CoreError::from)?;
        if clientes.contains(id) {
            return Err(CoreError::AlreadyExists { id });
        }
        Ok(id)
    })?;

    let nombre = p.input_text("Nombre", Campo::Nombre)?;
    let raza = p.input_text("Raza", Campo::Raza)?;
    let ubicacion = p.input_text("Ubicación", Campo::Ubicacion)?;

    posada
        .clientes_mut()
        .add(Cliente::new(id, nombre, raza, ubicacion)?)?;
    p.say(format_args!("✓ Cliente {} añadido", id))
}

fn modificar<R: BufRead, W: Write>(p: &mut Prompter<R, W>, posada: &mut Posada) -> CliResult<()> {
    let id = p.input_with("ID del cliente", parse_id)?;
    let mut cliente = posada.clientes().get(id)?.clone();

    p.say("Deja la respuesta vacía para mantener el valor actual.")?;
    let nombre = p.input_or_keep("Nombre", cliente.nombre().to_string(), texto(Campo::Nombre))?;
    let raza = p.input_or_keep("Raza", cliente.raza().to_string(), texto(Campo::Raza))?;
    let ubicacion = p.input_or_keep(
        "Ubicación",
        cliente.ubicacion().to_string(),
        texto(Campo::Ubicacion),
    )?;

    cliente.set_nombre(nombre)?;
    cliente.set_raza(raza)?;
    cliente.set_ubicacion(ubicacion)?;

    posada.clientes_mut().update(cliente)?;
    p.say(format_args!("✓ Cliente {} actualizado", id))
}

fn eliminar<R: BufRead, W: Write>(p: &mut Prompter<R, W>, posada: &mut Posada) -> CliResult<()> {
    let id = p.input_with("ID del cliente", parse_id)?;
    let nombre = posada.clientes().get(id)?.nombre().to_string();

    if p.confirm(&format!("¿Eliminar a {}?", nombre))? {
        posada.clientes_mut().remove(id)?;
        p.say(format_args!("✓ {} eliminado", nombre))?;
    }
    Ok(())
}

fn buscar<R: BufRead, W: Write>(p: &mut Prompter<R, W>, posada: &Posada) -> CliResult<()> {
    let idx = p.select("Buscar por", &FiltroCliente::ALL.map(|f| f.as_str()))?;
    let valor = p.input("Valor")?;

    let resultados = posada
        .clientes()
        .buscar(FiltroCliente::ALL[idx].as_str(), &valor)?;
    tabla(p, &resultados)
}

fn tabla<R: BufRead, W: Write>(p: &mut Prompter<R, W>, clientes: &[&Cliente]) -> CliResult<()> {
    if clientes.is_empty() {
        return p.say("Sin resultados.");
    }
    p.say(CABECERA_CLIENTES)?;
    for cliente in clientes {
        p.say(fila_cliente(cliente))?;
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::testing::{posada, salida, script};
    use crate::test_support::TempDir;

    #[test]
    fn test_nuevo_and_listar() {
        let dir = TempDir::new();
        let mut posada = posada(&dir);
        let mut p = script(&["1", "2", "Ciri", "", "Humana", "Cintra", "5", "6"]);

        menu(&mut p, &mut posada).unwrap();

        assert_eq!(posada.clientes().length(), 2);
        let out = salida(p);
        assert!(out.contains("✗ La raza no puede estar vacía"));
        assert!(out.contains("   2  Ciri"));
    }

    #[test]
    fn test_modificar() {
        let dir = TempDir::new();
        let mut posada = posada(&dir);
        let mut p = script(&["2", "1", "", "", "Kaer Morhen", "6"]);

        menu(&mut p, &mut posada).unwrap();

        let geralt = posada.clientes().get(1).unwrap();
        assert_eq!(geralt.raza(), "Brujo");
        assert_eq!(geralt.ubicacion(), "Kaer Morhen");
    }

    #[test]
    fn test_buscar_by_raza() {
        let dir = TempDir::new();
        let mut posada = posada(&dir);
        let mut p = script(&["4", "2", "Brujo", "6"]);

        menu(&mut p, &mut posada).unwrap();
        assert!(salida(p).contains("   1  Geralt"));
    }

    #[test]
    fn test_eliminar() {
        let dir = TempDir::new();
        let mut posada = posada(&dir);
        let mut p = script(&["3", "1", "s", "6"]);

        menu(&mut p, &mut posada).unwrap();
        assert_eq!(posada.clientes().length(), 0);
    }
}
