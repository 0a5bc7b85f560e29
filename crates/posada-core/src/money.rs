//! # Money Module
//!
//! Provides the `Coronas` type, the currency every price and total of the
//! Posada is expressed in.
//!
//! ## Why Integer Céntimos?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │    0.1 + 0.2 = 0.30000000000000004                                      │
//! │    caja 0.3 − compra 0.1 = 0.19999999999999998 < 0.2  → rejected!       │
//! │                                                                         │
//! │  Coronas keep an i64 of céntimos: 10 + 20 = 30, compared exactly.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Where Coronas Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Bien.precio ──► ElementoAlmacen.subtotal() ──► Transaccion.dinero      │
//! │                     (precio × cantidad)            (Σ subtotales)       │
//! │                                                                         │
//! │  Transaccion.dinero ──► total_ingresos / total_gastos ──► caja          │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use posada_core::money::Coronas;
//!
//! let precio = Coronas::new(1500.0);
//! let total = precio * 2 + Coronas::new(800.0);
//! assert_eq!(total.centimos(), 380_000);
//! assert_eq!(total.to_string(), "3800.00 coronas");
//! ```
//!
//! Prices are entered and stored as decimal numbers. They are rounded to the
//! céntimo once, at the boundary, and all arithmetic after that is integer.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub};

// =============================================================================
// Coronas Type
// =============================================================================

/// A monetary amount, held as céntimos of a corona.
///
/// Serialized as a decimal JSON number (`1500.0`, `0.3`) so data files stay
/// plain and readable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Coronas(i64);

impl Coronas {
    /// Creates an amount from a decimal value, rounded to the nearest céntimo.
    #[inline]
    pub fn new(value: f64) -> Self {
        Coronas((value * 100.0).round() as i64)
    }

    /// Creates an amount from céntimos.
    #[inline]
    pub const fn from_centimos(centimos: i64) -> Self {
        Coronas(centimos)
    }

    /// Returns zero coronas.
    #[inline]
    pub const fn zero() -> Self {
        Coronas(0)
    }

    /// Returns the amount in céntimos.
    #[inline]
    pub const fn centimos(&self) -> i64 {
        self.0
    }

    /// Returns the amount as a decimal value, for display and serialization.
    #[inline]
    pub fn value(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the larger of two amounts.
    #[inline]
    pub fn max(self, other: Coronas) -> Coronas {
        Ord::max(self, other)
    }
}

// =============================================================================
// Arithmetic Operations
// =============================================================================

impl Add for Coronas {
    type Output = Coronas;

    #[inline]
    fn add(self, rhs: Coronas) -> Coronas {
        Coronas(self.0 + rhs.0)
    }
}

impl AddAssign for Coronas {
    #[inline]
    fn add_assign(&mut self, rhs: Coronas) {
        self.0 += rhs.0;
    }
}

impl Sub for Coronas {
    type Output = Coronas;

    #[inline]
    fn sub(self, rhs: Coronas) -> Coronas {
        Coronas(self.0 - rhs.0)
    }
}

/// Unit price × quantity.
impl Mul<u32> for Coronas {
    type Output = Coronas;

    #[inline]
    fn mul(self, quantity: u32) -> Coronas {
        Coronas(self.0 * i64::from(quantity))
    }
}

impl Sum for Coronas {
    fn sum<I: Iterator<Item = Coronas>>(iter: I) -> Coronas {
        iter.fold(Coronas::zero(), |acc, c| acc + c)
    }
}

impl<'a> Sum<&'a Coronas> for Coronas {
    fn sum<I: Iterator<Item = &'a Coronas>>(iter: I) -> Coronas {
        iter.copied().sum()
    }
}

impl From<f64> for Coronas {
    fn from(value: f64) -> Self {
        Coronas::new(value)
    }
}

// =============================================================================
// Serialization
// =============================================================================

impl Serialize for Coronas {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.value())
    }
}

impl<'de> Deserialize<'de> for Coronas {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        f64::deserialize(deserializer).map(Coronas::new)
    }
}

// =============================================================================
// Display
// =============================================================================

impl fmt::Display for Coronas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}{}.{:02} coronas", sign, abs / 100, abs % 100)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_arithmetic() {
        let espada = Coronas::new(1500.0) * 2;
        let escudo = Coronas::new(800.0) * 1;
        assert_eq!((espada + escudo).value(), 3800.0);
    }

    #[test]
    fn test_decimal_amounts_add_up_exactly() {
        let total = Coronas::new(0.1) + Coronas::new(0.2);
        assert_eq!(total, Coronas::new(0.3));
        assert_eq!(total.centimos(), 30);

        let resto = Coronas::new(0.3) - Coronas::new(0.1);
        assert_eq!(resto, Coronas::new(0.2));
        assert!(resto >= Coronas::new(0.2));
    }

    #[test]
    fn test_new_rounds_to_centimo() {
        assert_eq!(Coronas::new(10.999).centimos(), 1100);
        assert_eq!(Coronas::new(10.994).centimos(), 1099);
        assert_eq!(Coronas::from_centimos(1099).value(), 10.99);
    }

    #[test]
    fn test_sum() {
        let lines = vec![Coronas::new(10.5), Coronas::new(4.5), Coronas::new(5.0)];
        let total: Coronas = lines.iter().sum();
        assert_eq!(total.value(), 20.0);

        let empty: Vec<Coronas> = Vec::new();
        assert_eq!(empty.into_iter().sum::<Coronas>(), Coronas::zero());
    }

    #[test]
    fn test_subtraction_can_go_negative() {
        let balance = Coronas::new(100.0) - Coronas::new(250.0);
        assert!(balance.is_negative());
        assert_eq!(balance.max(Coronas::zero()), Coronas::zero());
    }

    #[test]
    fn test_display() {
        assert_eq!(Coronas::new(3.5).to_string(), "3.50 coronas");
        assert_eq!(Coronas::zero().to_string(), "0.00 coronas");
        assert_eq!(Coronas::from_centimos(-5).to_string(), "-0.05 coronas");
        assert_eq!(Coronas::new(-150.25).to_string(), "-150.25 coronas");
    }

    #[test]
    fn test_serializes_as_decimal_number() {
        let json = serde_json::to_string(&Coronas::new(80.0)).unwrap();
        assert_eq!(json, "80.0");
        assert_eq!(serde_json::to_string(&Coronas::new(0.3)).unwrap(), "0.3");

        let back: Coronas = serde_json::from_str("1500").unwrap();
        assert_eq!(back.value(), 1500.0);
        let back: Coronas = serde_json::from_str("0.1").unwrap();
        assert_eq!(back.centimos(), 10);
    }
}
