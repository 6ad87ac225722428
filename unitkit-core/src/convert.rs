//! Compatibility checks and numeric value conversion between units.
//!
//! Values are converted in two steps through the canonical unit of their dimension:
//!
//! ```text
//! canonical = value * from_scale + from_offset
//! result    = (canonical - to_offset) / to_scale
//! ```
//!
//! Steps that would multiply by 1 or add 0 are skipped, so converting between units that share a canonical form
//! returns the input bit for bit.
//!
//! ```rust
//! use core::f64::consts::PI;
//! use unitkit_core::{convert_value, BaseUnit, Unit};
//!
//! let radian = Unit::base(BaseUnit::RADIAN);
//! let degree = radian.scale(PI / 180.0).unwrap();
//! let r = convert_value(180.0, &degree, &radian).unwrap();
//! assert!((r - PI).abs() < 1e-12);
//! ```

use alloc::vec::Vec;

use crate::error::{UnitError, UnitResult};
use crate::unit::{Affine, Unit};

mod sealed {
    pub trait Sealed {}
    impl Sealed for f64 {}
    impl Sealed for f32 {}
}

/// A floating-point sample type that can be converted between units.
///
/// Implemented for `f64` and `f32`; arithmetic is carried out in the precision of the implementing type.
pub trait Sample: Copy + sealed::Sealed {
    /// Maps a value into canonical units: `self * scale + offset`.
    fn to_canonical(self, scale: f64, offset: f64) -> Self;

    /// Maps a canonical value back out: `(self - offset) / scale`.
    fn from_canonical(self, scale: f64, offset: f64) -> Self;
}

macro_rules! impl_sample {
    ($t:ty) => {
        impl Sample for $t {
            #[inline]
            fn to_canonical(self, scale: f64, offset: f64) -> Self {
                let mut v = self;
                if scale != 1.0 {
                    v *= scale as $t;
                }
                if offset != 0.0 {
                    v += offset as $t;
                }
                v
            }

            #[inline]
            fn from_canonical(self, scale: f64, offset: f64) -> Self {
                let mut v = self;
                if offset != 0.0 {
                    v -= offset as $t;
                }
                if scale != 1.0 {
                    v /= scale as $t;
                }
                v
            }
        }
    };
}

impl_sample!(f64);
impl_sample!(f32);

// ─────────────────────────────────────────────────────────────────────────────
// Compatibility
// ─────────────────────────────────────────────────────────────────────────────

/// Whether values in `a` can be converted to `b`.
///
/// True when either unit is promiscuous or both reduce to the same dimension.
pub fn can_convert(a: &Unit, b: &Unit) -> bool {
    match (a.core(), b.core()) {
        (Some(a), Some(b)) => a.same_dimension(&b),
        _ => true,
    }
}

/// Null-aware [`can_convert`]: two absent units are compatible, an absent unit is compatible with nothing else.
///
/// ```rust
/// use unitkit_core::{can_convert_optional, Unit};
///
/// assert!(can_convert_optional(None, None));
/// assert!(!can_convert_optional(None, Some(&Unit::promiscuous())));
/// ```
pub fn can_convert_optional(a: Option<&Unit>, b: Option<&Unit>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => can_convert(a, b),
        _ => false,
    }
}

impl Unit {
    /// Whether values in this unit can be converted to `other`; see [`can_convert`].
    #[inline]
    pub fn is_convertible(&self, other: &Unit) -> bool {
        can_convert(self, other)
    }

    /// Converts `values` expressed in `from` into this unit.
    ///
    /// # Errors
    ///
    /// [`UnitError::IncompatibleUnit`] if the dimensions differ.
    pub fn to_this<T: Sample>(&self, values: &[T], from: &Unit) -> UnitResult<Vec<T>> {
        transform(values, from, self)
    }

    /// Converts `values` expressed in this unit into `to`.
    ///
    /// # Errors
    ///
    /// [`UnitError::IncompatibleUnit`] if the dimensions differ.
    pub fn to_that<T: Sample>(&self, values: &[T], to: &Unit) -> UnitResult<Vec<T>> {
        transform(values, self, to)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Transforms
// ─────────────────────────────────────────────────────────────────────────────

/// The pair of canonical maps for a conversion, or `None` when values pass through unchanged.
fn plan(from: &Unit, to: &Unit) -> UnitResult<Option<(Affine, Affine)>> {
    if from.is_promiscuous() || to.is_promiscuous() || from == to {
        return Ok(None);
    }
    if !can_convert(from, to) {
        return Err(UnitError::incompatible(Some(from), Some(to)));
    }
    let (f, t) = (from.canonical_map(), to.canonical_map());
    if f == t {
        return Ok(None);
    }
    Ok(Some((f, t)))
}

/// Converts `values` from one unit to another, returning a new vector.
///
/// Identical units and a promiscuous unit on either side return the values unchanged.
///
/// # Errors
///
/// [`UnitError::IncompatibleUnit`] if the dimensions differ.
///
/// ```rust
/// use unitkit_core::{transform, BaseUnit, Unit};
///
/// let meter = Unit::base(BaseUnit::METER);
/// let km = meter.scale(1000.0).unwrap();
/// assert_eq!(transform(&[1.5_f32, 2.0], &km, &meter).unwrap(), vec![1500.0, 2000.0]);
/// ```
pub fn transform<T: Sample>(values: &[T], from: &Unit, to: &Unit) -> UnitResult<Vec<T>> {
    let mut out = values.to_vec();
    transform_in_place(&mut out, from, to)?;
    Ok(out)
}

/// Converts `values` from one unit to another in place.
///
/// On error the values are left untouched.
///
/// # Errors
///
/// [`UnitError::IncompatibleUnit`] if the dimensions differ.
pub fn transform_in_place<T: Sample>(values: &mut [T], from: &Unit, to: &Unit) -> UnitResult<()> {
    let (f, t) = match plan(from, to)? {
        Some(maps) => maps,
        None => return Ok(()),
    };
    log::trace!("transforming {} values from \"{}\" to \"{}\"", values.len(), from, to);
    for v in values.iter_mut() {
        *v = v.to_canonical(f.scale, f.offset).from_canonical(t.scale, t.offset);
    }
    Ok(())
}

/// Null-aware [`transform`]: values without a unit may only be "converted" to no unit.
///
/// # Errors
///
/// [`UnitError::IncompatibleUnit`] if exactly one unit is absent or the dimensions differ.
pub fn transform_optional<T: Sample>(values: &[T], from: Option<&Unit>, to: Option<&Unit>) -> UnitResult<Vec<T>> {
    match (from, to) {
        (None, None) => Ok(values.to_vec()),
        (Some(from), Some(to)) => transform(values, from, to),
        _ => Err(UnitError::incompatible(from, to)),
    }
}

/// Converts a single value.
///
/// # Errors
///
/// [`UnitError::IncompatibleUnit`] if the dimensions differ.
pub fn convert_value<T: Sample>(value: T, from: &Unit, to: &Unit) -> UnitResult<T> {
    Ok(match plan(from, to)? {
        Some((f, t)) => value.to_canonical(f.scale, f.offset).from_canonical(t.scale, t.offset),
        None => value,
    })
}

/// Converts each row of a tuple of value arrays from its source unit to its target unit.
///
/// Row `i` is converted from `from[i]` to `to[i]` with the null rule of [`transform_optional`].
///
/// # Errors
///
/// [`UnitError::TupleArity`] if `from` or `to` does not have one unit per row, otherwise the first row error.
///
/// ```rust
/// use unitkit_core::{convert_tuple, BaseUnit, Unit};
///
/// let meter = Unit::base(BaseUnit::METER);
/// let km = meter.scale(1000.0).unwrap();
/// let rows = vec![vec![1.0, 2.0], vec![7.0]];
/// let out = convert_tuple(&rows, &[Some(&km), None], &[Some(&meter), None]).unwrap();
/// assert_eq!(out, vec![vec![1000.0, 2000.0], vec![7.0]]);
/// ```
pub fn convert_tuple<T: Sample>(
    rows: &[Vec<T>],
    from: &[Option<&Unit>],
    to: &[Option<&Unit>],
) -> UnitResult<Vec<Vec<T>>> {
    for units in [from.len(), to.len()] {
        if units != rows.len() {
            return Err(UnitError::TupleArity {
                values: rows.len(),
                units,
            });
        }
    }
    rows.iter()
        .zip(from.iter().zip(to))
        .map(|(row, (from, to))| transform_optional(row, *from, *to))
        .collect()
}
