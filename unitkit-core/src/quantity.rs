//! A numeric value tagged with its unit.

use core::fmt::{Display, Formatter, Result as FmtResult};
use core::ops::{Div, Mul, Neg};

use crate::convert::convert_value;
use crate::error::UnitResult;
use crate::unit::Unit;

/// A value together with the unit it is expressed in.
///
/// Unlike a bare `f64`, arithmetic between quantities checks and reconciles units at run time.
///
/// ```rust
/// use unitkit_core::{BaseUnit, Quantity, Unit};
///
/// let meter = Unit::base(BaseUnit::METER);
/// let km = meter.scale(1000.0).unwrap().clone_with_identifier("km").unwrap();
///
/// let total = Quantity::new(1.0, km).checked_add(&Quantity::new(250.0, meter)).unwrap();
/// assert_eq!(total.value(), 1.25);
/// assert_eq!(total.to_string(), "1.25 km");
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Quantity {
    value: f64,
    unit: Unit,
}

impl Quantity {
    /// Creates a quantity.
    #[inline]
    pub fn new(value: f64, unit: Unit) -> Self {
        Self { value, unit }
    }

    /// The raw numeric value.
    #[inline]
    pub fn value(&self) -> f64 {
        self.value
    }

    /// The unit of the value.
    #[inline]
    pub fn unit(&self) -> &Unit {
        &self.unit
    }

    /// Splits the quantity into its value and unit.
    #[inline]
    pub fn into_parts(self) -> (f64, Unit) {
        (self.value, self.unit)
    }

    /// The absolute value in the same unit.
    #[inline]
    pub fn abs(&self) -> Self {
        Self::new(self.value.abs(), self.unit.clone())
    }

    /// Re-expresses the quantity in `unit`.
    ///
    /// # Errors
    ///
    /// [`UnitError::IncompatibleUnit`](crate::UnitError::IncompatibleUnit) if the dimensions differ.
    pub fn to(&self, unit: &Unit) -> UnitResult<Quantity> {
        Ok(Self::new(convert_value(self.value, &self.unit, unit)?, unit.clone()))
    }

    /// Adds `rhs` after converting it into this quantity's unit.
    ///
    /// A promiscuous left operand takes the unit of `rhs`.
    ///
    /// # Errors
    ///
    /// [`UnitError::IncompatibleUnit`](crate::UnitError::IncompatibleUnit) if the dimensions differ.
    pub fn checked_add(&self, rhs: &Quantity) -> UnitResult<Quantity> {
        self.combine(rhs, |a, b| a + b)
    }

    /// Subtracts `rhs` after converting it into this quantity's unit.
    ///
    /// # Errors
    ///
    /// [`UnitError::IncompatibleUnit`](crate::UnitError::IncompatibleUnit) if the dimensions differ.
    pub fn checked_sub(&self, rhs: &Quantity) -> UnitResult<Quantity> {
        self.combine(rhs, |a, b| a - b)
    }

    fn combine(&self, rhs: &Quantity, op: impl Fn(f64, f64) -> f64) -> UnitResult<Quantity> {
        if self.unit.is_promiscuous() {
            return Ok(Self::new(op(self.value, rhs.value), rhs.unit.clone()));
        }
        let rhs = convert_value(rhs.value, &rhs.unit, &self.unit)?;
        Ok(Self::new(op(self.value, rhs), self.unit.clone()))
    }

    /// Multiplies two quantities, composing their units.
    ///
    /// Offset units are first converted to their non-offset form.
    ///
    /// # Errors
    ///
    /// Any error of [`Unit::multiply`].
    pub fn multiply(&self, rhs: &Quantity) -> UnitResult<Quantity> {
        let (a, b) = (self.without_offset()?, rhs.without_offset()?);
        Ok(Self::new(a.value * b.value, a.unit.multiply(&b.unit)?))
    }

    /// Divides two quantities, composing their units.
    ///
    /// Offset units are first converted to their non-offset form.
    ///
    /// # Errors
    ///
    /// Any error of [`Unit::divide`].
    pub fn divide(&self, rhs: &Quantity) -> UnitResult<Quantity> {
        let (a, b) = (self.without_offset()?, rhs.without_offset()?);
        Ok(Self::new(a.value / b.value, a.unit.divide(&b.unit)?))
    }

    fn without_offset(&self) -> UnitResult<Quantity> {
        self.to(&self.unit.without_offset())
    }
}

impl Neg for Quantity {
    type Output = Quantity;

    #[inline]
    fn neg(self) -> Self::Output {
        Self::new(-self.value, self.unit)
    }
}

impl Mul<f64> for Quantity {
    type Output = Quantity;

    #[inline]
    fn mul(self, rhs: f64) -> Self::Output {
        Self::new(self.value * rhs, self.unit)
    }
}

impl Div<f64> for Quantity {
    type Output = Quantity;

    #[inline]
    fn div(self, rhs: f64) -> Self::Output {
        Self::new(self.value / rhs, self.unit)
    }
}

impl Display for Quantity {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(&self.value, f)?;
        if self.unit.identifier().is_none() && self.unit == Unit::dimensionless() {
            return Ok(());
        }
        write!(f, " {}", self.unit)
    }
}
