//! Goods submenu: direct edits to the inventory.

use std::io::{BufRead, Write};

use posada_core::validation::{parse_cantidad, parse_id, parse_peso, parse_precio};
use posada_core::{Bien, Campo, CoreError, CriterioOrden, ElementoAlmacen, FiltroBien};
use posada_store::Posada;

use crate::error::CliResult;
use crate::format::{fila_bien, CABECERA_BIENES};
use crate::menu::{accion, texto};
use crate::prompt::Prompter;

const OPCIONES: [&str; 7] = [
    "Nuevo",
    "Modificar",
    "Eliminar",
    "Buscar",
    "Ordenar",
    "Listar",
    "Volver",
];

pub fn menu<R: BufRead, W: Write>(p: &mut Prompter<R, W>, posada: &mut Posada) -> CliResult<()> {
    loop {
        p.say("")?;
        let resultado = match p.select("Bienes", &OPCIONES)? {
            0 => nuevo(p, posada),
            1 => modificar(p, posada),
            2 => eliminar(p, posada),
            3 => buscar(p, posada),
            4 => ordenar(p, posada),
            5 => {
                let elementos = posada.inventario().get_array();
                tabla(p, &elementos)
            }
            _ => return Ok(()),
        };
        accion(p, resultado)?;
    }
}

fn nuevo<R: BufRead, W: Write>(p: &mut Prompter<R, W>, posada: &mut Posada) -> CliResult<()> {
    let inventario = posada.inventario();
    let id = p.input_with("ID", |raw| {
        let id = parse_id(raw).map_err(CoreError::from)?;
        if inventario.contains(id) {
            return Err(CoreError::AlreadyExists { id });
        }
        Ok(id)
    })?;

    let nombre = p.input_text("Nombre", Campo::Nombre)?;
    let descripcion = p.input_text("Descripción", Campo::Descripcion)?;
    let material = p.input_text("Material", Campo::Material)?;
    let peso = p.input_with("Peso (kg)", parse_peso)?;
    let precio = p.input_with("Precio", parse_precio)?;
    let stock = p.input_with("Stock", parse_cantidad)?;

    let bien = Bien::new(id, nombre, descripcion, material, peso, precio, 0)?;
    posada
        .inventario_mut()
        .add(ElementoAlmacen::new(bien, stock))?;
    p.say(format_args!("✓ Bien {} añadido", id))
}

fn modificar<R: BufRead, W: Write>(p: &mut Prompter<R, W>, posada: &mut Posada) -> CliResult<()> {
    let id = p.input_with("ID del bien", parse_id)?;
    let mut elemento = posada.inventario().get(id)?.clone();

    p.say("Deja la respuesta vacía para mantener el valor actual.")?;
    let actual = elemento.bien().clone();
    let nombre = p.input_or_keep("Nombre", actual.nombre().to_string(), texto(Campo::Nombre))?;
    let descripcion = p.input_or_keep(
        "Descripción",
        actual.descripcion().to_string(),
        texto(Campo::Descripcion),
    )?;
    let material =
        p.input_or_keep("Material", actual.material().to_string(), texto(Campo::Material))?;
    let peso = p.input_or_keep("Peso (kg)", actual.peso(), parse_peso)?;
    let precio = p.input_or_keep("Precio", actual.precio().value(), parse_precio)?;
    let stock = p.input_or_keep("Stock", elemento.cantidad(), parse_cantidad)?;

    let bien = elemento.bien_mut();
    bien.set_nombre(nombre)?;
    bien.set_descripcion(descripcion)?;
    bien.set_material(material)?;
    bien.set_peso(peso)?;
    bien.set_precio(precio)?;
    elemento.set_cantidad(stock);

    posada.inventario_mut().update(elemento)?;
    p.say(format_args!("✓ Bien {} actualizado", id))
}

fn eliminar<R: BufRead, W: Write>(p: &mut Prompter<R, W>, posada: &mut Posada) -> CliResult<()> {
    let id = p.input_with("ID del bien", parse_id)?;
    let etiqueta = posada.inventario().get(id)?.etiqueta();

    if p.confirm(&format!("¿Eliminar {}?", etiqueta))? {
        posada.inventario_mut().remove(id)?;
        p.say(format_args!("✓ {} eliminado", etiqueta))?;
    }
    Ok(())
}

fn buscar<R: BufRead, W: Write>(p: &mut Prompter<R, W>, posada: &Posada) -> CliResult<()> {
    let idx = p.select("Buscar por", &FiltroBien::ALL.map(|f| f.as_str()))?;
    let valor = p.input("Valor")?;

    let resultados = posada
        .inventario()
        .buscar(FiltroBien::ALL[idx].as_str(), &valor)?;
    tabla(p, &resultados)
}

fn ordenar<R: BufRead, W: Write>(p: &mut Prompter<R, W>, posada: &Posada) -> CliResult<()> {
    let idx = p.select("Ordenar por", &CriterioOrden::ALL.map(|c| c.as_str()))?;
    let ascendente = p.select("Sentido", &["Ascendente", "Descendente"])? == 0;

    let ordenados = posada
        .inventario()
        .ordenar(CriterioOrden::ALL[idx].as_str(), ascendente)?;
    tabla(p, &ordenados)
}

fn tabla<R: BufRead, W: Write>(
    p: &mut Prompter<R, W>,
    elementos: &[&ElementoAlmacen],
) -> CliResult<()> {
    if elementos.is_empty() {
        return p.say("Sin resultados.");
    }
    p.say(CABECERA_BIENES)?;
    for elemento in elementos {
        p.say(fila_bien(elemento))?;
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
