//! # Seed Data Generator
//!
//! Fills an empty data directory with demo records.
//!
//! ## Usage
//! ```bash
//! # Seed ./BaseDeDatos
//! cargo run -p posada-store --bin seed
//!
//! # Seed another directory
//! cargo run -p posada-store --bin seed -- --dir ./demo
//! ```
//!
//! ## Generated Records
//! - Goods across weapons, armour, potions and trinkets, with stock
//! - A handful of customers and merchants
//! - A few sales so the reports have something to show

use std::path::PathBuf;

use clap::Parser;

use posada_core::{Bien, Cliente, ElementoAlmacen, Mercader};
use posada_store::{Posada, PosadaConfig};

/// (nombre, descripcion, material, peso, precio, stock)
const BIENES: &[(&str, &str, &str, f64, f64, u32)] = &[
    ("Espada de acero", "Espada para humanos", "Acero", 3.0, 1500.0, 5),
    ("Espada de plata", "Espada para monstruos", "Plata", 2.5, 1800.0, 3),
    ("Escudo de roble", "Escudo redondo", "Roble", 4.0, 800.0, 4),
    ("Ballesta", "Ballesta de mano", "Madera", 1.5, 650.0, 2),
    ("Armadura de cuero", "Armadura ligera", "Cuero", 6.0, 1200.0, 2),
    ("Golondrina", "Poción curativa", "Vidrio", 0.2, 90.0, 20),
    ("Gato", "Poción de visión nocturna", "Vidrio", 0.2, 75.0, 15),
    ("Aceite contra necrófagos", "Aceite para hojas", "Vidrio", 0.3, 60.0, 10),
    ("Anillo de oro", "Anillo con grabado élfico", "Oro", 0.05, 400.0, 1),
    ("Capa de lana", "Capa para el invierno", "Lana", 1.0, 120.0, 6),
];

const CLIENTES: &[(&str, &str, &str)] = &[
    ("Geralt", "Brujo", "Rivia"),
    ("Ciri", "Humana", "Cintra"),
    ("Jaskier", "Humano", "Oxenfurt"),
    ("Zoltan", "Enano", "Mahakam"),
    ("Yennefer", "Hechicera", "Vengerberg"),
];

const MERCADERES: &[(&str, &str, &str)] = &[
    ("Hattori", "Herrero", "Novigrado"),
    ("Fergus", "Herrero", "Toussaint"),
    ("Keira", "Alquimista", "Velen"),
    ("Bram", "Sastre", "Oxenfurt"),
];

/// (cliente_id, [(bien_id, cantidad)])
const VENTAS: &[(u32, &[(u32, u32)])] = &[
    (1, &[(2, 1), (6, 3)]),
    (2, &[(4, 1)]),
    (3, &[(6, 2), (10, 1)]),
    (1, &[(8, 2)]),
];

/// Posada del Lobo Blanco - Seed Data Generator
#[derive(Debug, Parser)]
#[command(name = "seed", about)]
struct Args {
    /// Data directory
    #[arg(short, long, default_value = "./BaseDeDatos")]
    dir: PathBuf,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let Args { dir: data_dir } = Args::parse();

    println!("🌱 Posada del Lobo Blanco Seed Data Generator");
    println!("=============================================");
    println!("Directorio: {}", data_dir.display());
    println!();

    let mut posada = Posada::open(PosadaConfig::new(&data_dir))?;

    let existing = posada.inventario().length() + posada.clientes().length();
    if existing > 0 {
        println!("⚠ El directorio ya tiene {} registros", existing);
        println!("  Se omite la carga para no duplicar datos.");
        println!("  Borra los ficheros JSON para regenerarlos.");
        return Ok(());
    }

    for (n, &(nombre, descripcion, material, peso, precio, stock)) in BIENES.iter().enumerate() {
        let id = n as u32 + 1;
        let bien = Bien::new(id, nombre, descripcion, material, peso, precio, 0)?;
        posada.inventario_mut().add(ElementoAlmacen::new(bien, stock))?;
    }
    println!("✓ {} bienes", BIENES.len());

    for (n, &(nombre, raza, ubicacion)) in CLIENTES.iter().enumerate() {
        posada
            .clientes_mut()
            .add(Cliente::new(n as u32 + 1, nombre, raza, ubicacion)?)?;
    }
    println!("✓ {} clientes", CLIENTES.len());

    for (n, &(nombre, tipo, ubicacion)) in MERCADERES.iter().enumerate() {
        posada
            .mercaderes_mut()
            .add(Mercader::new(n as u32 + 1, nombre, tipo, ubicacion)?)?;
    }
    println!("✓ {} mercaderes", MERCADERES.len());

    for &(cliente_id, lineas) in VENTAS {
        posada.vender(cliente_id, lineas)?;
    }
    println!("✓ {} ventas", VENTAS.len());

    println!();
    println!("Caja: {}", posada.caja());
    println!("Listo.");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dir_defaults_to_base_de_datos() {
        let args = Args::parse_from(["seed"]);
        assert_eq!(args.dir, PathBuf::from("./BaseDeDatos"));
    }

    #[test]
    fn test_dir_flag_long_and_short() {
        assert_eq!(Args::parse_from(["seed", "--dir", "./demo"]).dir, PathBuf::from("./demo"));
        assert_eq!(Args::parse_from(["seed", "-d", "/tmp/x"]).dir, PathBuf::from("/tmp/x"));
    }

    #[test]
    fn test_unknown_flag_is_rejected() {
        assert!(Args::try_parse_from(["seed", "--bogus"]).is_err());
    }
}
