//! Macros for building dimensions and units.

/// Builds a [`Dimension`](crate::Dimension) from `base => exponent` pairs.
///
/// Expands to a [`UnitResult<Dimension>`](crate::UnitResult) because accumulated exponents may overflow.
///
/// ```rust
/// use unitkit_core::{dimension, BaseUnit};
///
/// let velocity = dimension![BaseUnit::METER => 1, BaseUnit::SECOND => -1].unwrap();
/// assert_eq!(velocity.to_string(), "m.s-1");
/// assert!(dimension![].unwrap().is_dimensionless());
/// ```
#[macro_export]
macro_rules! dimension {
    () => {
        ::core::result::Result::<$crate::Dimension, $crate::UnitError>::Ok($crate::Dimension::dimensionless())
    };

    ($($base:expr => $exp:expr),+ $(,)?) => {
        $crate::Dimension::from_exponents([$(($base, $exp)),+])
    };
}

/// Builds a derived [`Unit`](crate::Unit) from `base => exponent` pairs.
///
/// A single base unit with exponent 1 yields the base unit itself.
///
/// ```rust
/// use unitkit_core::{derived_unit, BaseUnit, Unit};
///
/// let mps = derived_unit![BaseUnit::METER => 1, BaseUnit::SECOND => -1].unwrap();
/// assert_eq!(mps.to_string(), "m.s-1");
/// assert_eq!(derived_unit![BaseUnit::METER => 1].unwrap(), Unit::base(BaseUnit::METER));
/// ```
#[macro_export]
macro_rules! derived_unit {
    ($($base:expr => $exp:expr),* $(,)?) => {
        $crate::dimension!($($base => $exp),*).map($crate::Unit::derived)
    };
}
