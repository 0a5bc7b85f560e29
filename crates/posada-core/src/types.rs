//! # Domain Types
//!
//! Core records kept by the Posada.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      Bien       │   │    Cliente      │   │    Mercader     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  ID             │   │  ID             │   │  ID             │       │
//! │  │  nombre         │   │  nombre         │   │  nombre         │       │
//! │  │  material, peso │   │  raza           │   │  tipo           │       │
//! │  │  precio         │   │  ubicacion      │   │  ubicacion      │       │
//! │  └────────┬────────┘   └────────┬────────┘   └────────┬────────┘       │
//! │           │                     └──────────┬──────────┘                │
//! │           ▼                                ▼                            │
//! │  ┌─────────────────┐              ┌─────────────────┐                   │
//! │  │ ElementoAlmacen │              │     Persona     │                   │
//! │  │  bien + cantidad│              │ Cliente|Mercader│                   │
//! │  └─────────────────┘              └─────────────────┘                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Persisted Shape
//! Field names on disk keep the inn's historical spelling (`ID`, `nombre`,
//! ...). Every record goes back through its validating constructor when it
//! is read, so a hand-edited file cannot smuggle in a negative price.

use serde::{Deserialize, Serialize};

use crate::error::{Campo, Entidad, ValidationError};
use crate::money::Coronas;
use crate::validation::{
    validate_id, validate_peso, validate_precio, validate_required, ValidationResult,
};

// =============================================================================
// Identificable
// =============================================================================

/// A record stored by ID in one of the managers.
pub trait Identificable {
    /// Kind of record, used for error messages and logs.
    const KIND: Entidad;

    /// Unique ID within the record's manager.
    fn id(&self) -> u32;
}

// =============================================================================
// Bien
// =============================================================================

/// A tradeable good.
///
/// ## Invariants
/// - `ID > 0`
/// - `peso > 0`, `precio >= 0`
/// - `nombre`, `descripcion`, `material` are non-empty
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BienRecord", into = "BienRecord")]
pub struct Bien {
    id: u32,
    nombre: String,
    descripcion: String,
    material: String,
    peso: f64,
    precio: Coronas,
    cantidad: u32,
}

impl Bien {
    /// Creates a validated good.
    ///
    /// ## Example
    /// ```rust
    /// use posada_core::Bien;
    ///
    /// let espada = Bien::new(1, "Espada de Acero", "Espada forjada en acero", "Acero", 3.5, 100.0, 0).unwrap();
    /// assert_eq!(espada.nombre(), "Espada de Acero");
    ///
    /// assert!(Bien::new(2, "Capa", "Capa", "Tela", 0.0, 10.0, 0).is_err());
    /// ```
    pub fn new(
        id: u32,
        nombre: impl Into<String>,
        descripcion: impl Into<String>,
        material: impl Into<String>,
        peso: f64,
        precio: f64,
        cantidad: u32,
    ) -> ValidationResult<Self> {
        let nombre = nombre.into();
        let descripcion = descripcion.into();
        let material = material.into();

        validate_id(id)?;
        validate_required(Campo::Nombre, &nombre)?;
        validate_required(Campo::Descripcion, &descripcion)?;
        validate_required(Campo::Material, &material)?;
        validate_peso(peso)?;
        validate_precio(precio)?;

        Ok(Bien {
            id,
            nombre,
            descripcion,
            material,
            peso,
            precio: Coronas::new(precio),
            cantidad,
        })
    }

    pub fn nombre(&self) -> &str {
        &self.nombre
    }

    pub fn descripcion(&self) -> &str {
        &self.descripcion
    }

    pub fn material(&self) -> &str {
        &self.material
    }

    pub fn peso(&self) -> f64 {
        self.peso
    }

    pub fn precio(&self) -> Coronas {
        self.precio
    }

    /// Units declared on the good itself. Stock levels live in
    /// [`ElementoAlmacen::cantidad`], not here.
    pub fn cantidad(&self) -> u32 {
        self.cantidad
    }

    pub fn set_nombre(&mut self, nombre: impl Into<String>) -> ValidationResult<()> {
        let nombre = nombre.into();
        validate_required(Campo::Nombre, &nombre)?;
        self.nombre = nombre;
        Ok(())
    }

    pub fn set_descripcion(&mut self, descripcion: impl Into<String>) -> ValidationResult<()> {
        let descripcion = descripcion.into();
        validate_required(Campo::Descripcion, &descripcion)?;
        self.descripcion = descripcion;
        Ok(())
    }

    pub fn set_material(&mut self, material: impl Into<String>) -> ValidationResult<()> {
        let material = material.into();
        validate_required(Campo::Material, &material)?;
        self.material = material;
        Ok(())
    }

    /// Sets the weight. Rejects `peso <= 0` and leaves the good unchanged.
    pub fn set_peso(&mut self, peso: f64) -> ValidationResult<()> {
        validate_peso(peso)?;
        self.peso = peso;
        Ok(())
    }

    /// Sets the unit price. Rejects negative prices and leaves the good unchanged.
    pub fn set_precio(&mut self, precio: f64) -> ValidationResult<()> {
        validate_precio(precio)?;
        self.precio = Coronas::new(precio);
        Ok(())
    }

    /// Sets the declared units.
    ///
    /// Takes a signed value so callers holding arithmetic results get the
    /// validation message instead of an overflow.
    pub fn set_cantidad(&mut self, cantidad: i64) -> ValidationResult<()> {
        self.cantidad = u32::try_from(cantidad).map_err(|_| ValidationError::InvalidQuantity)?;
        Ok(())
    }

    /// `"ID - nombre"`, the label used by reports and menus.
    pub fn etiqueta(&self) -> String {
        format!("{} - {}", self.id, self.nombre)
    }
}

impl Identificable for Bien {
    const KIND: Entidad = Entidad::Bien;

    fn id(&self) -> u32 {
        self.id
    }
}

/// On-disk shape of a [`Bien`].
#[derive(Debug, Clone, Serialize, Deserialize)]
struct BienRecord {
    #[serde(rename = "ID")]
    id: u32,
    nombre: String,
    descripcion: String,
    material: String,
    peso: f64,
    precio: f64,
    #[serde(default)]
    cantidad: u32,
}

impl TryFrom<BienRecord> for Bien {
    type Error = ValidationError;

    fn try_from(r: BienRecord) -> Result<Self, Self::Error> {
        Bien::new(
            r.id,
            r.nombre,
            r.descripcion,
            r.material,
            r.peso,
            r.precio,
            r.cantidad,
        )
    }
}

impl From<Bien> for BienRecord {
    fn from(b: Bien) -> Self {
        BienRecord {
            id: b.id,
            nombre: b.nombre,
            descripcion: b.descripcion,
            material: b.material,
            peso: b.peso,
            precio: b.precio.value(),
            cantidad: b.cantidad,
        }
    }
}

// =============================================================================
// Cliente
// =============================================================================

/// A customer who buys goods or returns what they bought.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ClienteRecord", into = "ClienteRecord")]
pub struct Cliente {
    id: u32,
    nombre: String,
    raza: String,
    ubicacion: String,
}

impl Cliente {
    /// Creates a validated customer.
    pub fn new(
        id: u32,
        nombre: impl Into<String>,
        raza: impl Into<String>,
        ubicacion: impl Into<String>,
    ) -> ValidationResult<Self> {
        let nombre = nombre.into();
        let raza = raza.into();
        let ubicacion = ubicacion.into();

        validate_id(id)?;
        validate_required(Campo::Nombre, &nombre)?;
        validate_required(Campo::Raza, &raza)?;
        validate_required(Campo::Ubicacion, &ubicacion)?;

        Ok(Cliente {
            id,
            nombre,
            raza,
            ubicacion,
        })
    }

    pub fn nombre(&self) -> &str {
        &self.nombre
    }

    pub fn raza(&self) -> &str {
        &self.raza
    }

    pub fn ubicacion(&self) -> &str {
        &self.ubicacion
    }

    pub fn set_nombre(&mut self, nombre: impl Into<String>) -> ValidationResult<()> {
        let nombre = nombre.into();
        validate_required(Campo::Nombre, &nombre)?;
        self.nombre = nombre;
        Ok(())
    }

    pub fn set_raza(&mut self, raza: impl Into<String>) -> ValidationResult<()> {
        let raza = raza.into();
        validate_required(Campo::Raza, &raza)?;
        self.raza = raza;
        Ok(())
    }

    pub fn set_ubicacion(&mut self, ubicacion: impl Into<String>) -> ValidationResult<()> {
        let ubicacion = ubicacion.into();
        validate_required(Campo::Ubicacion, &ubicacion)?;
        self.ubicacion = ubicacion;
        Ok(())
    }
}

impl Identificable for Cliente {
    const KIND: Entidad = Entidad::Cliente;

    fn id(&self) -> u32 {
        self.id
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ClienteRecord {
    #[serde(rename = "ID")]
    id: u32,
    nombre: String,
    raza: String,
    ubicacion: String,
}

impl TryFrom<ClienteRecord> for Cliente {
    type Error = ValidationError;

    fn try_from(r: ClienteRecord) -> Result<Self, Self::Error> {
        Cliente::new(r.id, r.nombre, r.raza, r.ubicacion)
    }
}

impl From<Cliente> for ClienteRecord {
    fn from(c: Cliente) -> Self {
        ClienteRecord {
            id: c.id,
            nombre: c.nombre,
            raza: c.raza,
            ubicacion: c.ubicacion,
        }
    }
}

// =============================================================================
// Mercader
// =============================================================================

/// A merchant the inn buys from (and returns goods to).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MercaderRecord", into = "MercaderRecord")]
pub struct Mercader {
    id: u32,
    nombre: String,
    tipo: String,
    ubicacion: String,
}

impl Mercader {
    /// Creates a validated merchant.
    pub fn new(
        id: u32,
        nombre: impl Into<String>,
        tipo: impl Into<String>,
        ubicacion: impl Into<String>,
    ) -> ValidationResult<Self> {
        let nombre = nombre.into();
        let tipo = tipo.into();
        let ubicacion = ubicacion.into();

        validate_id(id)?;
        validate_required(Campo::Nombre, &nombre)?;
        validate_required(Campo::Tipo, &tipo)?;
        validate_required(Campo::Ubicacion, &ubicacion)?;

        Ok(Mercader {
            id,
            nombre,
            tipo,
            ubicacion,
        })
    }

    pub fn nombre(&self) -> &str {
        &self.nombre
    }

    pub fn tipo(&self) -> &str {
        &self.tipo
    }

    pub fn ubicacion(&self) -> &str {
        &self.ubicacion
    }

    pub fn set_nombre(&mut self, nombre: impl Into<String>) -> ValidationResult<()> {
        let nombre = nombre.into();
        validate_required(Campo::Nombre, &nombre)?;
        self.nombre = nombre;
        Ok(())
    }

    pub fn set_tipo(&mut self, tipo: impl Into<String>) -> ValidationResult<()> {
        let tipo = tipo.into();
        validate_required(Campo::Tipo, &tipo)?;
        self.tipo = tipo;
        Ok(())
    }

    pub fn set_ubicacion(&mut self, ubicacion: impl Into<String>) -> ValidationResult<()> {
        let ubicacion = ubicacion.into();
        validate_required(Campo::Ubicacion, &ubicacion)?;
        self.ubicacion = ubicacion;
        Ok(())
    }
}

impl Identificable for Mercader {
    const KIND: Entidad = Entidad::Mercader;

    fn id(&self) -> u32 {
        self.id
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct MercaderRecord {
    #[serde(rename = "ID")]
    id: u32,
    nombre: String,
    tipo: String,
    ubicacion: String,
}

impl TryFrom<MercaderRecord> for Mercader {
    type Error = ValidationError;

    fn try_from(r: MercaderRecord) -> Result<Self, Self::Error> {
        Mercader::new(r.id, r.nombre, r.tipo, r.ubicacion)
    }
}

impl From<Mercader> for MercaderRecord {
    fn from(m: Mercader) -> Self {
        MercaderRecord {
            id: m.id,
            nombre: m.nombre,
            tipo: m.tipo,
            ubicacion: m.ubicacion,
        }
    }
}

// =============================================================================
// Persona
// =============================================================================

/// The other party of a transaction.
///
/// Serialized with an explicit `rol` tag:
/// ```json
/// { "rol": "cliente", "ID": 1, "nombre": "Geralt", "raza": "Brujo", "ubicacion": "Rivia" }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "rol", rename_all = "lowercase")]
pub enum Persona {
    Cliente(Cliente),
    Mercader(Mercader),
}

impl Persona {
    pub fn id(&self) -> u32 {
        match self {
            Persona::Cliente(c) => c.id(),
            Persona::Mercader(m) => m.id(),
        }
    }

    pub fn nombre(&self) -> &str {
        match self {
            Persona::Cliente(c) => c.nombre(),
            Persona::Mercader(m) => m.nombre(),
        }
    }

    #[inline]
    pub fn es_cliente(&self) -> bool {
        matches!(self, Persona::Cliente(_))
    }

    #[inline]
    pub fn es_mercader(&self) -> bool {
        matches!(self, Persona::Mercader(_))
    }

    /// Same party: same role and same ID.
    pub fn es_misma(&self, other: &Persona) -> bool {
        self.es_cliente() == other.es_cliente() && self.id() == other.id()
    }

    /// `"ID - nombre"`.
    pub fn etiqueta(&self) -> String {
        format!("{} - {}", self.id(), self.nombre())
    }
}

impl From<Cliente> for Persona {
    fn from(c: Cliente) -> Self {
        Persona::Cliente(c)
    }
}

impl From<Mercader> for Persona {
    fn from(m: Mercader) -> Self {
        Persona::Mercader(m)
    }
}

// =============================================================================
// Elemento Almacen
// =============================================================================

/// An inventory slot: a good plus the units held (or exchanged, inside a
/// transaction line).
///
/// The slot's ID is always the good's ID.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ElementoRecord", into = "ElementoRecord")]
pub struct ElementoAlmacen {
    bien: Bien,
    cantidad: u32,
}

impl ElementoAlmacen {
    pub fn new(bien: Bien, cantidad: u32) -> Self {
        ElementoAlmacen { bien, cantidad }
    }

    pub fn bien(&self) -> &Bien {
        &self.bien
    }

    pub fn bien_mut(&mut self) -> &mut Bien {
        &mut self.bien
    }

    pub fn cantidad(&self) -> u32 {
        self.cantidad
    }

    pub fn set_cantidad(&mut self, cantidad: u32) {
        self.cantidad = cantidad;
    }

    /// Unit price × quantity.
    pub fn subtotal(&self) -> Coronas {
        self.bien.precio() * self.cantidad
    }

    /// `"ID - nombre"` of the good.
    pub fn etiqueta(&self) -> String {
        self.bien.etiqueta()
    }
}

impl Identificable for ElementoAlmacen {
    const KIND: Entidad = Entidad::Bien;

    fn id(&self) -> u32 {
        self.bien.id()
    }
}

/// On-disk shape of an [`ElementoAlmacen`]: `{ID, bien, cantidad}`.
///
/// Older inventory files stored `bien` as a string holding JSON; both forms
/// are accepted, the object form is written.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ElementoRecord {
    #[serde(rename = "ID")]
    id: u32,
    bien: BienField,
    cantidad: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum BienField {
    Objeto(Bien),
    Texto(String),
}

impl TryFrom<ElementoRecord> for ElementoAlmacen {
    type Error = serde_json::Error;

    fn try_from(r: ElementoRecord) -> Result<Self, Self::Error> {
        use serde::de::Error as _;

        let bien = match r.bien {
            BienField::Objeto(bien) => bien,
            BienField::Texto(raw) => serde_json::from_str::<Bien>(&raw)?,
        };

        if bien.id() != r.id {
            return Err(serde_json::Error::custom(format!(
                "elemento con ID {} contiene el bien {}",
                r.id,
                bien.id()
            )));
        }

        Ok(ElementoAlmacen::new(bien, r.cantidad))
    }
}

impl From<ElementoAlmacen> for ElementoRecord {
    fn from(e: ElementoAlmacen) -> Self {
        ElementoRecord {
            id: e.bien.id(),
            bien: BienField::Objeto(e.bien),
            cantidad: e.cantidad,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn espada() -> Bien {
        Bien::new(
            1,
            "Espada de Acero",
            "Espada forjada en acero",
            "Acero",
            3.5,
            100.0,
            0,
        )
        .unwrap()
    }

    #[test]
    fn test_bien_getters() {
        let bien = espada();
        assert_eq!(bien.id(), 1);
        assert_eq!(bien.nombre(), "Espada de Acero");
        assert_eq!(bien.descripcion(), "Espada forjada en acero");
        assert_eq!(bien.material(), "Acero");
        assert_eq!(bien.peso(), 3.5);
        assert_eq!(bien.precio(), Coronas::new(100.0));
    }

    #[test]
    fn test_bien_setters_accept_valid_values() {
        let mut bien = espada();
        bien.set_nombre("Espada de Plata").unwrap();
        bien.set_peso(1.2).unwrap();
        bien.set_precio(0.0).unwrap();
        bien.set_cantidad(4).unwrap();
        assert_eq!(bien.nombre(), "Espada de Plata");
        assert_eq!(bien.peso(), 1.2);
        assert_eq!(bien.precio().value(), 0.0);
        assert_eq!(bien.cantidad(), 4);
    }

    #[test]
    fn test_bien_setters_reject_invalid_values() {
        let mut bien = espada();

        let err = bien.set_peso(0.0).unwrap_err();
        assert_eq!(err.to_string(), "El peso debe ser un valor positivo.");
        assert!(bien.set_peso(-1.0).is_err());
        assert_eq!(bien.peso(), 3.5);

        let err = bien.set_precio(-100.0).unwrap_err();
        assert_eq!(err.to_string(), "El precio no puede ser negativo.");
        assert_eq!(bien.precio().value(), 100.0);

        let err = bien.set_cantidad(-5).unwrap_err();
        assert_eq!(
            err.to_string(),
            "La cantidad debe ser un número entero no negativo."
        );

        assert!(bien.set_nombre("  ").is_err());
        assert_eq!(bien.nombre(), "Espada de Acero");
    }

    #[test]
    fn test_bien_constructor_validation() {
        assert_eq!(
            Bien::new(0, "Casco", "Casco", "Hierro", 1.5, 300.0, 0).unwrap_err(),
            ValidationError::InvalidId
        );
        assert_eq!(
            Bien::new(4, "Casco", "", "Hierro", 1.5, 300.0, 0).unwrap_err(),
            ValidationError::Required {
                field: Campo::Descripcion
            }
        );
        assert!(Bien::new(4, "Casco", "Casco", "Hierro", 1.5, -1.0, 0).is_err());
    }

    #[test]
    fn test_bien_json_uses_original_field_names() {
        let json = serde_json::to_value(espada()).unwrap();
        assert_eq!(json["ID"], 1);
        assert_eq!(json["nombre"], "Espada de Acero");
        assert_eq!(json["precio"], 100.0);
    }

    #[test]
    fn test_bien_json_is_validated_on_read() {
        let raw = r#"{"ID":3,"nombre":"Anillo","descripcion":"Anillo","material":"Oro","peso":0.1,"precio":-5}"#;
        assert!(serde_json::from_str::<Bien>(raw).is_err());
    }

    #[test]
    fn test_cliente_and_mercader() {
        let mut cliente = Cliente::new(1, "Aragorn", "Humano", "Rohan").unwrap();
        cliente.set_ubicacion("Novigrado").unwrap();
        assert_eq!(cliente.ubicacion(), "Novigrado");
        assert_eq!(
            cliente.set_raza("").unwrap_err().to_string(),
            "La raza no puede estar vacía"
        );

        let mercader = Mercader::new(2, "Hattori", "Herrero", "Novigrado").unwrap();
        assert_eq!(mercader.tipo(), "Herrero");
        assert!(Mercader::new(3, "Fergus", " ", "Velen").is_err());
    }

    #[test]
    fn test_persona_is_tagged() {
        let persona = Persona::from(Mercader::new(2, "Hattori", "Herrero", "Novigrado").unwrap());
        let json = serde_json::to_value(&persona).unwrap();
        assert_eq!(json["rol"], "mercader");
        assert_eq!(json["tipo"], "Herrero");

        let back: Persona = serde_json::from_value(json).unwrap();
        assert!(back.es_mercader());
        assert_eq!(back.etiqueta(), "2 - Hattori");
    }

    #[test]
    fn test_persona_same_id_different_role_is_not_same_party() {
        let cliente = Persona::from(Cliente::new(5, "Eskel", "Brujo", "Kaer Morhen").unwrap());
        let mercader = Persona::from(Mercader::new(5, "Eskel", "Herrero", "Vizima").unwrap());
        assert!(!cliente.es_misma(&mercader));
        assert!(cliente.es_misma(&cliente.clone()));
    }

    #[test]
    fn test_elemento_id_delegates_to_bien() {
        let bien = Bien::new(101, "Espada de plata", "Espada para monstruos", "Acero", 2.5, 100.0, 0).unwrap();
        let mut elemento = ElementoAlmacen::new(bien, 10);
        assert_eq!(elemento.id(), 101);
        assert_eq!(elemento.subtotal(), Coronas::new(1000.0));

        elemento.set_cantidad(20);
        assert_eq!(elemento.cantidad(), 20);
        // The good's own units are independent of the slot's
        assert_eq!(elemento.bien().cantidad(), 0);
    }

    #[test]
    fn test_elemento_reads_bien_stored_as_string() {
        let raw = r#"{
            "ID": 7,
            "bien": "{\"ID\":7,\"nombre\":\"Capa\",\"descripcion\":\"Capa de lana\",\"material\":\"Lana\",\"peso\":0.5,\"precio\":20,\"cantidad\":0}",
            "cantidad": 4
        }"#;
        let elemento: ElementoAlmacen = serde_json::from_str(raw).unwrap();
        assert_eq!(elemento.id(), 7);
        assert_eq!(elemento.bien().nombre(), "Capa");
        assert_eq!(elemento.cantidad(), 4);

        let written = serde_json::to_value(&elemento).unwrap();
        assert!(written["bien"].is_object());
    }

    #[test]
    fn test_elemento_rejects_mismatched_ids() {
        let raw = r#"{
            "ID": 8,
            "bien": {"ID":7,"nombre":"Capa","descripcion":"Capa","material":"Lana","peso":0.5,"precio":20},
            "cantidad": 1
        }"#;
        assert!(serde_json::from_str::<ElementoAlmacen>(raw).is_err());
    }
}
