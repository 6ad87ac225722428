//! Base units and dimension vectors.
//!
//! A [`BaseUnit`] is one independent physical dimension (length, time, …). A [`Dimension`] is a product of base
//! units raised to integer powers, stored as an ordered map from base unit to nonzero exponent. The empty map is the
//! dimensionless dimension.
//!
//! ```rust
//! use unitkit_core::{BaseUnit, Dimension};
//!
//! let length = Dimension::of(BaseUnit::METER);
//! let time = Dimension::of(BaseUnit::SECOND);
//! let velocity = length.div(&time).unwrap();
//! assert_eq!(velocity.exponent(&BaseUnit::METER), 1);
//! assert_eq!(velocity.exponent(&BaseUnit::SECOND), -1);
//! assert_eq!(velocity.to_string(), "m.s-1");
//! ```

use alloc::borrow::Cow;
use alloc::collections::BTreeMap;
use alloc::format;
use core::cmp::Ordering;
use core::fmt::{Display, Formatter, Result as FmtResult};
use core::hash::{Hash, Hasher};
use core::sync::atomic::{AtomicU32, Ordering as AtomicOrdering};

use crate::error::UnitResult;
use crate::float;

// ─────────────────────────────────────────────────────────────────────────────
// Base units
// ─────────────────────────────────────────────────────────────────────────────

/// Identity of a base unit.
///
/// Two base units are the same dimension iff their identities are equal; names play no part in equality.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BaseId(u32);

impl BaseId {
    /// Returns the raw numeric identity.
    #[inline]
    pub const fn get(self) -> u32 {
        self.0
    }
}

/// Identities below this value are reserved for the predefined base units.
const FIRST_RUNTIME_ID: u32 = 64;

static NEXT_BASE_ID: AtomicU32 = AtomicU32::new(FIRST_RUNTIME_ID);

/// One independent physical dimension.
///
/// The SI base units and the radian are predefined with fixed identities. Additional base units created with
/// [`BaseUnit::new`] receive a fresh identity, so two runtime base units never compare equal even if they share a
/// name.
#[derive(Clone, Debug)]
pub struct BaseUnit {
    id: BaseId,
    quantity: Cow<'static, str>,
    symbol: Cow<'static, str>,
}

impl BaseUnit {
    /// Metre, the SI unit of length.
    pub const METER: BaseUnit = BaseUnit::builtin(0, "length", "m");
    /// Kilogram, the SI unit of mass.
    pub const KILOGRAM: BaseUnit = BaseUnit::builtin(1, "mass", "kg");
    /// Second, the SI unit of time.
    pub const SECOND: BaseUnit = BaseUnit::builtin(2, "time", "s");
    /// Ampere, the SI unit of electric current.
    pub const AMPERE: BaseUnit = BaseUnit::builtin(3, "electric current", "A");
    /// Kelvin, the SI unit of thermodynamic temperature.
    pub const KELVIN: BaseUnit = BaseUnit::builtin(4, "temperature", "K");
    /// Mole, the SI unit of amount of substance.
    pub const MOLE: BaseUnit = BaseUnit::builtin(5, "amount of substance", "mol");
    /// Candela, the SI unit of luminous intensity.
    pub const CANDELA: BaseUnit = BaseUnit::builtin(6, "luminous intensity", "cd");
    /// Radian, treated as an independent dimension for plane angle.
    pub const RADIAN: BaseUnit = BaseUnit::builtin(7, "plane angle", "rad");

    /// The predefined base units, in identity order.
    pub const SI: [BaseUnit; 8] = [
        Self::METER,
        Self::KILOGRAM,
        Self::SECOND,
        Self::AMPERE,
        Self::KELVIN,
        Self::MOLE,
        Self::CANDELA,
        Self::RADIAN,
    ];

    const fn builtin(id: u32, quantity: &'static str, symbol: &'static str) -> Self {
        Self {
            id: BaseId(id),
            quantity: Cow::Borrowed(quantity),
            symbol: Cow::Borrowed(symbol),
        }
    }

    /// Creates a new, distinct base dimension.
    ///
    /// ```rust
    /// use unitkit_core::BaseUnit;
    ///
    /// let a = BaseUnit::new("currency", "USD");
    /// let b = BaseUnit::new("currency", "USD");
    /// assert_ne!(a, b);
    /// assert_eq!(a, a.clone());
    /// ```
    pub fn new(quantity: impl Into<Cow<'static, str>>, symbol: impl Into<Cow<'static, str>>) -> Self {
        let id = NEXT_BASE_ID.fetch_add(1, AtomicOrdering::Relaxed);
        Self {
            id: BaseId(id),
            quantity: quantity.into(),
            symbol: symbol.into(),
        }
    }

    /// Identity used for equality.
    #[inline]
    pub fn id(&self) -> BaseId {
        self.id
    }

    /// Name of the physical quantity, e.g. `"length"`.
    #[inline]
    pub fn quantity(&self) -> &str {
        &self.quantity
    }

    /// Printable symbol, e.g. `"m"`.
    #[inline]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Whether this is one of the predefined [`BaseUnit::SI`] units.
    #[inline]
    pub fn is_predefined(&self) -> bool {
        self.id.0 < FIRST_RUNTIME_ID
    }
}

impl PartialEq for BaseUnit {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for BaseUnit {}

impl PartialOrd for BaseUnit {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BaseUnit {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

impl Hash for BaseUnit {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl Display for BaseUnit {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.symbol)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Dimension vectors
// ─────────────────────────────────────────────────────────────────────────────

/// A product of base units raised to integer powers.
///
/// Zero exponents are never stored, so two dimensions with the same nonzero exponents are equal regardless of how
/// they were built.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Dimension {
    exponents: BTreeMap<BaseUnit, i32>,
}

impl Dimension {
    /// The dimensionless dimension (no base units).
    #[inline]
    pub const fn dimensionless() -> Self {
        Self {
            exponents: BTreeMap::new(),
        }
    }

    /// A single base unit with exponent 1.
    pub fn of(base: BaseUnit) -> Self {
        let mut exponents = BTreeMap::new();
        exponents.insert(base, 1);
        Self { exponents }
    }

    /// Builds a dimension from `(base, exponent)` pairs.
    ///
    /// Repeated base units accumulate and zero exponents are dropped.
    ///
    /// # Errors
    ///
    /// [`UnitError::MalformedUnit`](crate::UnitError::MalformedUnit) if an accumulated exponent overflows `i32`.
    pub fn from_exponents<I>(pairs: I) -> UnitResult<Self>
    where
        I: IntoIterator<Item = (BaseUnit, i32)>,
    {
        let mut exponents: BTreeMap<BaseUnit, i32> = BTreeMap::new();
        for (base, exponent) in pairs {
            let current = exponents.get(&base).copied().unwrap_or(0);
            let sum = current
                .checked_add(exponent)
                .ok_or_else(|| format!("exponent overflow on base unit {}", base))?;
            exponents.insert(base, sum);
        }
        exponents.retain(|_, e| *e != 0);
        Ok(Self { exponents })
    }

    /// Exponent of `base` in this dimension (0 when absent).
    #[inline]
    pub fn exponent(&self, base: &BaseUnit) -> i32 {
        self.exponents.get(base).copied().unwrap_or(0)
    }

    /// Whether all exponents are zero.
    #[inline]
    pub fn is_dimensionless(&self) -> bool {
        self.exponents.is_empty()
    }

    /// Number of base units with a nonzero exponent.
    #[inline]
    pub fn len(&self) -> usize {
        self.exponents.len()
    }

    /// Same as [`Dimension::is_dimensionless`].
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.exponents.is_empty()
    }

    /// Iterates over `(base, exponent)` pairs in base-identity order.
    pub fn iter(&self) -> impl Iterator<Item = (&BaseUnit, i32)> + '_ {
        self.exponents.iter().map(|(b, e)| (b, *e))
    }

    /// Returns the base unit if this dimension is exactly one base unit with exponent 1.
    pub fn single_base(&self) -> Option<&BaseUnit> {
        match self.exponents.iter().next() {
            Some((base, &1)) if self.exponents.len() == 1 => Some(base),
            _ => None,
        }
    }

    /// Multiplies two dimensions (adds exponents).
    ///
    /// # Errors
    ///
    /// [`UnitError::MalformedUnit`](crate::UnitError::MalformedUnit) on exponent overflow.
    pub fn mul(&self, other: &Dimension) -> UnitResult<Dimension> {
        Self::from_exponents(self.iter().chain(other.iter()).map(|(b, e)| (b.clone(), e)))
    }

    /// Divides two dimensions (subtracts exponents).
    ///
    /// # Errors
    ///
    /// [`UnitError::MalformedUnit`](crate::UnitError::MalformedUnit) on exponent overflow.
    pub fn div(&self, other: &Dimension) -> UnitResult<Dimension> {
        self.mul(&other.recip()?)
    }

    /// Reciprocal (negates all exponents).
    ///
    /// # Errors
    ///
    /// [`UnitError::MalformedUnit`](crate::UnitError::MalformedUnit) if an exponent is `i32::MIN`.
    pub fn recip(&self) -> UnitResult<Dimension> {
        self.powi(-1)
    }

    /// Raises the dimension to an integer power.
    ///
    /// # Errors
    ///
    /// [`UnitError::MalformedUnit`](crate::UnitError::MalformedUnit) on exponent overflow.
    pub fn powi(&self, power: i32) -> UnitResult<Dimension> {
        let mut exponents = BTreeMap::new();
        if power == 0 {
            return Ok(Self { exponents });
        }
        for (base, exponent) in self.iter() {
            let raised = exponent
                .checked_mul(power)
                .ok_or_else(|| format!("exponent overflow raising {} to the power {}", base, power))?;
            exponents.insert(base.clone(), raised);
        }
        Ok(Self { exponents })
    }

    /// Raises the dimension to a real power.
    ///
    /// Returns `None` unless every resulting exponent is an integer, e.g. `m^2` to the power `0.5` is `m` but `m` to
    /// the power `0.5` has no integer representation.
    pub fn pow_real(&self, power: f64) -> Option<Dimension> {
        if !power.is_finite() {
            return None;
        }
        let mut exponents = BTreeMap::new();
        for (base, exponent) in self.iter() {
            let raised = float::as_exact_i32(exponent as f64 * power)?;
            if raised != 0 {
                exponents.insert(base.clone(), raised);
            }
        }
        Some(Self { exponents })
    }
}

impl From<BaseUnit> for Dimension {
    fn from(base: BaseUnit) -> Self {
        Self::of(base)
    }
}

/// Formats as dot-separated factors, e.g. `kg.m2.s-2`. The dimensionless dimension formats as an empty string.
impl Display for Dimension {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        for (i, (base, exponent)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            if exponent == 1 {
                write!(f, "{}", base)?;
            } else {
                write!(f, "{}{}", base, exponent)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::UnitError;
    use proptest::prelude::*;

    #[test]
    fn base_units_compare_by_identity() {
        let custom = BaseUnit::new("length", "m");
        assert_ne!(custom, BaseUnit::METER);
        assert_eq!(BaseUnit::METER, BaseUnit::SI[0]);
        assert!(BaseUnit::METER.is_predefined());
        assert!(!custom.is_predefined());
    }

    #[test]
    fn runtime_base_units_are_distinct() {
        let a = BaseUnit::new("currency", "USD");
        let b = BaseUnit::new("currency", "USD");
        assert_ne!(a.id(), b.id());
        assert!(a.id().get() >= FIRST_RUNTIME_ID);
    }

    #[test]
    fn zero_exponents_are_dropped() {
        let d = Dimension::from_exponents([
            (BaseUnit::METER, 1),
            (BaseUnit::SECOND, 2),
            (BaseUnit::SECOND, -2),
        ])
        .unwrap();
        assert_eq!(d, Dimension::of(BaseUnit::METER));
        assert_eq!(d.exponent(&BaseUnit::SECOND), 0);
    }

    #[test]
    fn construction_order_does_not_matter() {
        let a = Dimension::from_exponents([(BaseUnit::METER, 1), (BaseUnit::SECOND, -1)]).unwrap();
        let b = Dimension::from_exponents([(BaseUnit::SECOND, -1), (BaseUnit::METER, 1)]).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn mul_and_div_add_and_subtract() {
        let m = Dimension::of(BaseUnit::METER);
        let s = Dimension::of(BaseUnit::SECOND);
        let area = m.mul(&m).unwrap();
        assert_eq!(area.exponent(&BaseUnit::METER), 2);
        let v = m.div(&s).unwrap();
        assert_eq!(v.exponent(&BaseUnit::SECOND), -1);
        assert!(v.div(&v).unwrap().is_dimensionless());
    }

    #[test]
    fn single_base_detection() {
        assert_eq!(Dimension::of(BaseUnit::KELVIN).single_base(), Some(&BaseUnit::KELVIN));
        let area = Dimension::from_exponents([(BaseUnit::METER, 2)]).unwrap();
        assert_eq!(area.single_base(), None);
        assert_eq!(Dimension::dimensionless().single_base(), None);
    }

    #[test]
    fn pow_real_requires_integer_exponents() {
        let area = Dimension::from_exponents([(BaseUnit::METER, 2)]).unwrap();
        assert_eq!(area.pow_real(0.5), Some(Dimension::of(BaseUnit::METER)));
        assert_eq!(Dimension::of(BaseUnit::METER).pow_real(0.5), None);
        assert_eq!(area.pow_real(f64::NAN), None);
        assert_eq!(Dimension::dimensionless().pow_real(0.3), Some(Dimension::dimensionless()));
    }

    #[test]
    fn exponent_overflow_is_malformed() {
        let big = Dimension::from_exponents([(BaseUnit::METER, i32::MAX)]).unwrap();
        assert!(matches!(big.mul(&Dimension::of(BaseUnit::METER)), Err(UnitError::MalformedUnit(_))));
        assert!(matches!(big.powi(2), Err(UnitError::MalformedUnit(_))));
    }

    #[test]
    fn display_format() {
        let force = Dimension::from_exponents([
            (BaseUnit::KILOGRAM, 1),
            (BaseUnit::METER, 1),
            (BaseUnit::SECOND, -2),
        ])
        .unwrap();
        assert_eq!(force.to_string(), "m.kg.s-2");
        assert_eq!(Dimension::dimensionless().to_string(), "");
    }

    fn exponents() -> impl Strategy<Value = Vec<(usize, i32)>> {
        proptest::collection::vec((0usize..8, -4i32..=4), 0..6)
    }

    fn build(pairs: &[(usize, i32)]) -> Dimension {
        Dimension::from_exponents(pairs.iter().map(|(i, e)| (BaseUnit::SI[*i].clone(), *e))).unwrap()
    }

    proptest! {
        #[test]
        fn prop_mul_is_commutative(a in exponents(), b in exponents()) {
            let (a, b) = (build(&a), build(&b));
            prop_assert_eq!(a.mul(&b).unwrap(), b.mul(&a).unwrap());
        }

        #[test]
        fn prop_mul_is_associative(a in exponents(), b in exponents(), c in exponents()) {
            let (a, b, c) = (build(&a), build(&b), build(&c));
            let left = a.mul(&b).unwrap().mul(&c).unwrap();
            let right = a.mul(&b.mul(&c).unwrap()).unwrap();
            prop_assert_eq!(left, right);
        }

        #[test]
        fn prop_div_self_is_dimensionless(a in exponents()) {
            let a = build(&a);
            prop_assert!(a.div(&a).unwrap().is_dimensionless());
        }
    }
}
