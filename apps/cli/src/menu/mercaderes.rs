//! Merchants submenu.

use std::io::{BufRead, Write};

use posada_core::validation::parse_id;
use posada_core::{Campo, CoreError, FiltroMercader, Mercader};
use posada_store::Posada;

use crate::error::CliResult;
use crate::format::{fila_mercader, CABECERA_MERCADERES};
use crate::menu::{accion, texto};
use crate::prompt::Prompter;

const OPCIONES: [&str; 6] = ["Nuevo", "Modificar", "Eliminar", "Buscar", "Listar", "Volver"];

pub fn menu<R: BufRead, W: Write>(p: &mut Prompter<R, W>, posada: &mut Posada) -> CliResult<()> {
    loop {
        p.say("")?;
        let resultado = match p.select("Mercaderes", &OPCIONES)? {
            0 => nuevo(p, posada),
            1 => modificar(p, posada),
            2 => eliminar(p, posada),
            3 => buscar(p, posada),
            4 => {
                let mercaderes = posada.mercaderes().get_array();
                tabla(p, &mercaderes)
            }
            _ => return Ok(()),
        };
        accion(p, resultado)?;
    }
}

fn nuevo<R: BufRead, W: Write>(p: &mut Prompter<R, W>, posada: &mut Posada) -> CliResult<()> {
    let mercaderes = posada.mercaderes();
    let id = p.input_with("ID", |raw| {
        let id = parse_id(raw).map_err(CoreError::from)?;
        if mercaderes.contains(id) {
            return Err(CoreError::AlreadyExists { id });
        }
        Ok(id)
    })?;

    let nombre = p.input_text("Nombre", Campo::Nombre)?;
    let tipo = p.input_text("Tipo", Campo::Tipo)?;
    let ubicacion = p.input_text("Ubicación", Campo::Ubicacion)?;

    posada
        .mercaderes_mut()
        .add(Mercader::new(id, nombre, tipo, ubicacion)?)?;
    p.say(format_args!("✓ Mercader {} añadido", id))
}

fn modificar<R: BufRead, W: Write>(p: &mut Prompter<R, W>, posada: &mut Posada) -> CliResult<()> {
    let id = p.input_with("ID del mercader", parse_id)?;
    let mut mercader = posada.mercaderes().get(id)?.clone();

    p.say("Deja la respuesta vacía para mantener el valor actual.")?;
    let nombre = p.input_or_keep("Nombre", mercader.nombre().to_string(), texto(Campo::Nombre))?;
    let tipo = p.input_or_keep("Tipo", mercader.tipo().to_string(), texto(Campo::Tipo))?;
    let ubicacion = p.input_or_keep(
        "Ubicación",
        mercader.ubicacion().to_string(),
        texto(Campo::Ubicacion),
    )?;

    mercader.set_nombre(nombre)?;
    mercader.set_tipo(tipo)?;
    mercader.set_ubicacion(ubicacion)?;

    posada.mercaderes_mut().update(mercader)?;
    p.say(format_args!("✓ Mercader {} actualizado", id))
}

fn eliminar<R: BufRead, W: Write>(p: &mut Prompter<R, W>, posada: &mut Posada) -> CliResult<()> {
    let id = p.input_with("ID del mercader", parse_id)?;
    let nombre = posada.mercaderes().get(id)?.nombre().to_string();

    if p.confirm(&format!("¿Eliminar a {}?", nombre))? {
        posada.mercaderes_mut().remove(id)?;
        p.say(format_args!("✓ {} eliminado", nombre))?;
    }
    Ok(())
}

fn buscar<R: BufRead, W: Write>(p: &mut Prompter<R, W>, posada: &Posada) -> CliResult<()> {
    let idx = p.select("Buscar por", &FiltroMercader::ALL.map(|f| f.as_str()))?;
    let valor = p.input("Valor")?;

    let resultados = posada
        .mercaderes()
        .buscar(FiltroMercader::ALL[idx].as_str(), &valor)?;
    tabla(p, &resultados)
}

fn tabla<R: BufRead, W: Write>(
    p: &mut Prompter<R, W>,
    mercaderes: &[&Mercader],
) -> CliResult<()> {
    if mercaderes.is_empty() {
        return p.say("Sin resultados.");
    }
    p.say(CABECERA_MERCADERES)?;
    for mercader in mercaderes {
        p.say(fila_mercader(mercader))?;
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
    fn test_nuevo_duplicate_id_asks_again() {
        let dir = TempDir::new();
        let mut posada = posada(&dir);
        let mut p = script(&["1", "1", "2", "Keira", "Alquimista", "Velen", "6"]);

        menu(&mut p, &mut posada).unwrap();

        assert_eq!(posada.mercaderes().get(2).unwrap().tipo(), "Alquimista");
        assert!(salida(p).contains("✗ Error, ID 1 ya está en uso"));
    }

    #[test]
    fn test_buscar_by_ubicacion() {
        let dir = TempDir::new();
        let mut posada = posada(&dir);
        let mut p = script(&["4", "3", "Novigrado", "4", "3", "Toussaint", "6"]);

        menu(&mut p, &mut posada).unwrap();

        let out = salida(p);
        assert!(out.contains("   1  Hattori"));
        assert!(out.contains("Sin resultados."));
    }

    #[test]
    fn test_modificar_tipo() {
        let dir = TempDir::new();
        let mut posada = posada(&dir);
        let mut p = script(&["2", "1", "", "Armero", "", "6"]);

        menu(&mut p, &mut posada).unwrap();
        assert_eq!(posada.mercaderes().get(1).unwrap().tipo(), "Armero");
    }
}
