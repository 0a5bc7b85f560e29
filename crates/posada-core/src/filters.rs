//! # Search Filters and Sort Criteria
//!
//! Named fields the managers can search and sort by.
//!
//! Filter names arrive as text from the menu, so every enum here parses
//! from its display name and rejects anything else with
//! [`ValidationError::NotAllowed`]. An unknown filter is a hard error, never
//! an empty result.
//!
//! ```rust
//! use posada_core::filters::FiltroBien;
//!
//! assert_eq!("Material".parse::<FiltroBien>().unwrap(), FiltroBien::Material);
//! assert!("Color".parse::<FiltroBien>().is_err());
//! ```

use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::types::{Bien, Cliente, Mercader};

/// Parses `raw` against a list of `(name, value)` pairs, case-insensitively.
fn parse_named<T: Copy>(
    field: &'static str,
    raw: &str,
    options: &[(&'static str, T)],
) -> Result<T, ValidationError> {
    let raw = raw.trim();
    options
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(raw))
        .map(|(_, value)| *value)
        .ok_or_else(|| ValidationError::NotAllowed {
            field,
            value: raw.to_string(),
            allowed: options.iter().map(|(name, _)| *name).collect(),
        })
}

// =============================================================================
// Bien
// =============================================================================

/// Searchable fields of a [`Bien`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FiltroBien {
    Nombre,
    Material,
    Descripcion,
}

impl FiltroBien {
    pub const ALL: [FiltroBien; 3] = [
        FiltroBien::Nombre,
        FiltroBien::Material,
        FiltroBien::Descripcion,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FiltroBien::Nombre => "Nombre",
            FiltroBien::Material => "Material",
            FiltroBien::Descripcion => "Descripcion",
        }
    }

    /// Exact, case-sensitive match on the selected field.
    pub fn matches(&self, bien: &Bien, valor: &str) -> bool {
        match self {
            FiltroBien::Nombre => bien.nombre() == valor,
            FiltroBien::Material => bien.material() == valor,
            FiltroBien::Descripcion => bien.descripcion() == valor,
        }
    }
}

impl FromStr for FiltroBien {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let options = FiltroBien::ALL.map(|f| (f.as_str(), f));
        parse_named("Filtro", s, &options)
    }
}

impl fmt::Display for FiltroBien {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sort keys for the inventory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CriterioOrden {
    /// Lexicographic on `nombre`.
    Nombre,
    /// Numeric on `precio`.
    Precio,
}

impl CriterioOrden {
    pub const ALL: [CriterioOrden; 2] = [CriterioOrden::Nombre, CriterioOrden::Precio];

    pub fn as_str(&self) -> &'static str {
        match self {
            CriterioOrden::Nombre => "Nombre",
            CriterioOrden::Precio => "Precio",
        }
    }
}

impl FromStr for CriterioOrden {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let options = CriterioOrden::ALL.map(|c| (c.as_str(), c));
        parse_named("Criterio", s, &options)
    }
}

impl fmt::Display for CriterioOrden {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Cliente
// =============================================================================

/// Searchable fields of a [`Cliente`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FiltroCliente {
    Nombre,
    Raza,
    Ubicacion,
}

impl FiltroCliente {
    pub const ALL: [FiltroCliente; 3] = [
        FiltroCliente::Nombre,
        FiltroCliente::Raza,
        FiltroCliente::Ubicacion,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FiltroCliente::Nombre => "Nombre",
            FiltroCliente::Raza => "Raza",
            FiltroCliente::Ubicacion => "Ubicacion",
        }
    }

    pub fn matches(&self, cliente: &Cliente, valor: &str) -> bool {
        match self {
            FiltroCliente::Nombre => cliente.nombre() == valor,
            FiltroCliente::Raza => cliente.raza() == valor,
            FiltroCliente::Ubicacion => cliente.ubicacion() == valor,
        }
    }
}

impl FromStr for FiltroCliente {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let options = FiltroCliente::ALL.map(|f| (f.as_str(), f));
        parse_named("Filtro", s, &options)
    }
}

impl fmt::Display for FiltroCliente {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Mercader
// =============================================================================

/// Searchable fields of a [`Mercader`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FiltroMercader {
    Nombre,
    Tipo,
    Ubicacion,
}

impl FiltroMercader {
    pub const ALL: [FiltroMercader; 3] = [
        FiltroMercader::Nombre,
        FiltroMercader::Tipo,
        FiltroMercader::Ubicacion,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FiltroMercader::Nombre => "Nombre",
            FiltroMercader::Tipo => "Tipo",
            FiltroMercader::Ubicacion => "Ubicacion",
        }
    }

    pub fn matches(&self, mercader: &Mercader, valor: &str) -> bool {
        match self {
            FiltroMercader::Nombre => mercader.nombre() == valor,
            FiltroMercader::Tipo => mercader.tipo() == valor,
            FiltroMercader::Ubicacion => mercader.ubicacion() == valor,
        }
    }
}

impl FromStr for FiltroMercader {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let options = FiltroMercader::ALL.map(|f| (f.as_str(), f));
        parse_named("Filtro", s, &options)
    }
}

impl fmt::Display for FiltroMercader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
