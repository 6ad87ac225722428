//! Unit composition: multiplication, division, powers, scaling and shifting.
//!
//! Every operation is a single match over the variants of its operands:
//!
//! - The promiscuous unit is the identity for multiplication, `P / P` is `P`, `X / P` treats `P` as dimensionless
//!   and `P / X` is `dimensionless / X`. Powers of `P` are `P`.
//! - The dimensionless unit is the identity for multiplication and division.
//! - Offset units lose their offset when composed (the product of affine maps is not affine); only the scale takes
//!   part in the result. This holds for the identity cases too, so `celsius * dimensionless`, `celsius / P` and
//!   `celsius.pow(1)` are all kelvin.
//! - Results with a combined factor of exactly 1 are plain base or derived units, otherwise a scaled unit over the
//!   combined dimension.
//!
//! ```rust
//! use unitkit_core::{BaseUnit, Unit};
//!
//! let meter = Unit::base(BaseUnit::METER);
//! let second = Unit::base(BaseUnit::SECOND);
//! let km = meter.scale(1000.0).unwrap();
//! let hour = second.scale(3600.0).unwrap();
//!
//! let kmh = km.divide(&hour).unwrap();
//! assert!(kmh.is_convertible(&meter.divide(&second).unwrap()));
//! assert_eq!(meter.multiply(&Unit::dimensionless()).unwrap(), meter);
//!
//! let kelvin = Unit::base(BaseUnit::KELVIN);
//! let celsius = kelvin.shift(273.15).unwrap();
//! assert_eq!(celsius.multiply(&Unit::dimensionless()).unwrap(), kelvin);
//! ```

use alloc::format;

use crate::dimension::Dimension;
use crate::error::{UnitError, UnitResult};
use crate::float;
use crate::unit::{Unit, UnitKind};

/// Dimension and combined factor of a non-promiscuous unit, offset dropped.
struct Parts {
    dimension: Dimension,
    factor: f64,
}

impl Parts {
    fn one() -> Self {
        Parts {
            dimension: Dimension::dimensionless(),
            factor: 1.0,
        }
    }
}

impl Unit {
    /// `None` only for the promiscuous unit.
    fn parts(&self, operation: &str) -> Option<Parts> {
        match self.kind() {
            UnitKind::Base(_) | UnitKind::Derived(_) => Some(Parts {
                dimension: self.dimension()?,
                factor: 1.0,
            }),
            UnitKind::Scaled(s) => Some(Parts {
                dimension: s.underlying().dimension()?,
                factor: s.factor(),
            }),
            UnitKind::Offset(o) => {
                log::debug!(
                    "dropping offset {} of unit \"{}\" in {}",
                    o.offset(),
                    self,
                    operation
                );
                o.underlying().parts(operation)
            }
            UnitKind::Promiscuous => None,
        }
    }

    fn is_dimensionless_identity(&self) -> bool {
        matches!(self.kind(), UnitKind::Derived(d) if d.is_dimensionless())
    }

    /// Multiplies two units.
    ///
    /// # Errors
    ///
    /// [`UnitError::MalformedUnit`] if an exponent overflows or the combined factor is not finite and nonzero.
    pub fn multiply(&self, other: &Unit) -> UnitResult<Unit> {
        let (a, b) = match (self.parts("multiply"), other.parts("multiply")) {
            (None, None) => return Ok(self.clone()),
            (None, Some(_)) => return Ok(other.without_offset()),
            (Some(_), None) => return Ok(self.without_offset()),
            (Some(_), Some(_)) if self.is_dimensionless_identity() => return Ok(other.without_offset()),
            (Some(_), Some(_)) if other.is_dimensionless_identity() => return Ok(self.without_offset()),
            (Some(a), Some(b)) => (a, b),
        };
        let dimension = a.dimension.mul(&b.dimension)?;
        let factor = checked_factor(a.factor * b.factor)?;
        Ok(Unit::from_parts(dimension, factor))
    }

    /// Divides this unit by another.
    ///
    /// # Errors
    ///
    /// [`UnitError::MalformedUnit`] if an exponent overflows or the combined factor is not finite and nonzero.
    pub fn divide(&self, other: &Unit) -> UnitResult<Unit> {
        let (a, b) = match (self.parts("divide"), other.parts("divide")) {
            (None, None) => return Ok(self.clone()),
            (Some(_), None) => return Ok(self.without_offset()),
            (None, Some(b)) => (Parts::one(), b),
            (Some(_), Some(_)) if other.is_dimensionless_identity() => return Ok(self.without_offset()),
            (Some(a), Some(b)) => (a, b),
        };
        let dimension = a.dimension.div(&b.dimension)?;
        let factor = checked_factor(a.factor / b.factor)?;
        Ok(Unit::from_parts(dimension, factor))
    }

    /// Raises this unit to an integer power.
    ///
    /// `pow(0)` is the dimensionless unit and `pow(1)` the unit itself without its offset.
    ///
    /// # Errors
    ///
    /// [`UnitError::MalformedUnit`] if an exponent overflows or the factor overflows.
    pub fn pow(&self, power: i32) -> UnitResult<Unit> {
        match self.parts("pow") {
            None => Ok(self.clone()),
            Some(parts) => self.pow_parts(parts, power),
        }
    }

    fn pow_parts(&self, parts: Parts, power: i32) -> UnitResult<Unit> {
        match power {
            0 => Ok(Unit::dimensionless()),
            1 => Ok(self.without_offset()),
            _ => {
                let dimension = parts.dimension.powi(power)?;
                let factor = checked_factor(float::powi(parts.factor, power))?;
                Ok(Unit::from_parts(dimension, factor))
            }
        }
    }

    /// Raises this unit to a real power.
    ///
    /// Integral powers behave like [`Unit::pow`]. Other powers are accepted only when every resulting exponent is an
    /// integer.
    ///
    /// # Errors
    ///
    /// [`UnitError::InvalidPower`] if the power is not finite, an exponent would become fractional, or the factor
    /// would not stay finite and nonzero.
    ///
    /// ```rust
    /// use unitkit_core::{BaseUnit, Unit, UnitError};
    ///
    /// let meter = Unit::base(BaseUnit::METER);
    /// let area = meter.pow(2).unwrap();
    /// assert_eq!(area.pow_real(0.5).unwrap(), meter);
    /// assert!(matches!(meter.pow_real(0.5), Err(UnitError::InvalidPower { .. })));
    /// ```
    pub fn pow_real(&self, power: f64) -> UnitResult<Unit> {
        let parts = match self.parts("pow") {
            Some(parts) => parts,
            None => return Ok(self.clone()),
        };
        if !power.is_finite() {
            return Err(UnitError::invalid_power(self, power));
        }
        if let Some(integral) = float::as_exact_i32(power) {
            return self.pow_parts(parts, integral);
        }
        let dimension = parts
            .dimension
            .pow_real(power)
            .ok_or_else(|| UnitError::invalid_power(self, power))?;
        let factor = float::powf(parts.factor, power);
        if !factor.is_finite() || factor == 0.0 {
            return Err(UnitError::invalid_power(self, power));
        }
        Ok(Unit::from_parts(dimension, factor))
    }

    /// Square root of this unit; see [`Unit::pow_real`].
    ///
    /// # Errors
    ///
    /// [`UnitError::InvalidPower`] if any exponent is odd.
    pub fn sqrt(&self) -> UnitResult<Unit> {
        self.pow_real(0.5)
    }

    /// Returns a unit `amount` times as large as this one (`1 new = amount old`).
    ///
    /// Scaling a scaled unit combines the factors; scaling an offset unit scales its underlying unit and keeps the
    /// offset. The promiscuous unit is returned unchanged.
    ///
    /// # Errors
    ///
    /// [`UnitError::MalformedUnit`] if `amount` or the combined factor is not finite and nonzero.
    pub fn scale(&self, amount: f64) -> UnitResult<Unit> {
        checked_factor(amount)?;
        match self.kind() {
            UnitKind::Base(_) | UnitKind::Derived(_) => Ok(Unit::scaled(amount, self.clone())),
            UnitKind::Scaled(s) => Ok(Unit::scaled(
                checked_factor(s.factor() * amount)?,
                s.underlying().clone(),
            )),
            UnitKind::Offset(o) => Ok(Unit::offset(o.offset(), o.underlying().scale(amount)?)),
            UnitKind::Promiscuous => Ok(self.clone()),
        }
    }

    /// Returns this unit shifted by `offset` canonical units (`canonical = value * factor + offset`).
    ///
    /// Shifting an offset unit adds to its offset. The promiscuous unit is returned unchanged.
    ///
    /// # Errors
    ///
    /// [`UnitError::MalformedUnit`] if `offset` or the combined offset is not finite.
    ///
    /// ```rust
    /// use unitkit_core::{BaseUnit, Unit};
    ///
    /// let kelvin = Unit::base(BaseUnit::KELVIN);
    /// let celsius = kelvin.shift(273.15).unwrap();
    /// assert_eq!(celsius.to_that(&[0.0], &kelvin).unwrap(), vec![273.15]);
    /// ```
    pub fn shift(&self, offset: f64) -> UnitResult<Unit> {
        checked_offset(offset)?;
        match self.kind() {
            UnitKind::Base(_) | UnitKind::Derived(_) | UnitKind::Scaled(_) => Ok(Unit::offset(offset, self.clone())),
            UnitKind::Offset(o) => Ok(Unit::offset(
                checked_offset(o.offset() + offset)?,
                o.underlying().clone(),
            )),
            UnitKind::Promiscuous => Ok(self.clone()),
        }
    }
}

fn checked_factor(factor: f64) -> UnitResult<f64> {
    if factor.is_finite() && factor != 0.0 {
        Ok(factor)
    } else {
        Err(UnitError::MalformedUnit(format!(
            "scale factor must be finite and nonzero, got {}",
            factor
        )))
    }
}

fn checked_offset(offset: f64) -> UnitResult<f64> {
    if offset.is_finite() {
        Ok(offset)
    } else {
        Err(UnitError::MalformedUnit(format!("offset must be finite, got {}", offset)))
    }
}
