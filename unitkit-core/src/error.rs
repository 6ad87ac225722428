//! Error type shared by unit composition and conversion.

use alloc::string::{String, ToString};

use crate::unit::Unit;

/// Result type for unit operations.
pub type UnitResult<T> = Result<T, UnitError>;

/// Error type for unit composition and value conversion.
///
/// Every variant carries the display names of the units involved so that callers can report the offending pair
/// without holding on to the units themselves.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum UnitError {
    /// The two units describe different physical dimensions and neither is promiscuous.
    #[error("incompatible units: cannot convert \"{from}\" to \"{to}\"")]
    IncompatibleUnit {
        /// Display name of the source unit (`null` for an absent unit).
        from: String,
        /// Display name of the target unit (`null` for an absent unit).
        to: String,
    },

    /// A power would produce non-integer exponents or a non-finite scale factor.
    #[error("invalid power {power} for unit \"{unit}\"")]
    InvalidPower {
        /// Display name of the unit being raised.
        unit: String,
        /// The rejected power.
        power: f64,
    },

    /// The promiscuous unit exists once and cannot be cloned or renamed.
    #[error("unit \"{unit}\" is an immutable singleton and cannot be {operation}")]
    ImmutableSingleton {
        /// Display name of the singleton.
        unit: String,
        /// What was attempted, e.g. `"cloned"`.
        operation: &'static str,
    },

    /// A unit description is not well formed (unknown base unit, bad factor or offset, exponent overflow).
    #[error("malformed unit: {0}")]
    MalformedUnit(String),

    /// The number of value rows in a tuple conversion does not match the number of units.
    #[error("tuple arity mismatch: {values} value rows but {units} units")]
    TupleArity {
        /// Number of value rows.
        values: usize,
        /// Number of units supplied for one side of the conversion.
        units: usize,
    },
}

impl UnitError {
    pub(crate) fn incompatible(from: Option<&Unit>, to: Option<&Unit>) -> Self {
        UnitError::IncompatibleUnit {
            from: describe(from),
            to: describe(to),
        }
    }

    pub(crate) fn invalid_power(unit: &Unit, power: f64) -> Self {
        UnitError::InvalidPower {
            unit: unit.to_string(),
            power,
        }
    }
}

fn describe(unit: Option<&Unit>) -> String {
    match unit {
        Some(unit) => unit.to_string(),
        None => "null".to_string(),
    }
}

impl From<String> for UnitError {
    fn from(s: String) -> Self {
        UnitError::MalformedUnit(s)
    }
}

impl From<&str> for UnitError {
    fn from(s: &str) -> Self {
        UnitError::MalformedUnit(s.to_string())
    }
}
