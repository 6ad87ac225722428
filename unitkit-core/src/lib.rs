//! Core unit algebra: run-time units, their composition, and numeric conversion between them.
//!
//! `unitkit-core` models units as immutable values:
//!
//! - A [`BaseUnit`] names one independent physical dimension (meter, second, radian, ...).
//! - A [`Dimension`] is a product of base units raised to integer powers.
//! - A [`Unit`] is a base, derived, scaled, offset or promiscuous unit, see [`UnitKind`].
//! - Units compose with [`Unit::multiply`], [`Unit::divide`], [`Unit::pow`] and [`Unit::pow_real`].
//! - Values convert between compatible units with [`transform`] and friends.
//!
//! Most users should depend on `unitkit` (the facade crate), which adds the registry of common units, configuration
//! and timestamp encoding.
//!
//! # Quick start
//!
//! ```rust
//! use unitkit_core::{transform, BaseUnit, Unit};
//!
//! let meter = Unit::base(BaseUnit::METER);
//! let second = Unit::base(BaseUnit::SECOND);
//! let kmh = meter
//!     .scale(1000.0)?
//!     .divide(&second.scale(3600.0)?)?;
//! let mps = meter.divide(&second)?;
//!
//! let out = transform(&[36.0_f64], &kmh, &mps)?;
//! assert!((out[0] - 10.0).abs() < 1e-12);
//! # Ok::<(), unitkit_core::UnitError>(())
//! ```
//!
//! # The promiscuous unit
//!
//! [`Unit::promiscuous`] is convertible with every unit and leaves values unchanged. It stands for "whatever unit the
//! other side has" and is the identity for multiplication. It cannot be renamed.
//!
//! # `no_std`
//!
//! Disable default features to build without `std`; an allocator is still required. Float functions missing from
//! `core` come from `libm`.
//!
//! # Feature flags
//!
//! - `std` (default): enables `std` support.
//!
//! # Errors
//!
//! Fallible operations return [`UnitResult`]; see [`UnitError`] for the failure modes. Nothing in this crate panics
//! on bad input.

#![deny(missing_docs)]
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(not(feature = "std"))]
extern crate libm;

// ─────────────────────────────────────────────────────────────────────────────
// Core modules
// ─────────────────────────────────────────────────────────────────────────────

mod algebra;
mod convert;
mod dimension;
mod error;
mod float;
mod macros;
mod quantity;
mod unit;

// ─────────────────────────────────────────────────────────────────────────────
// Public re-exports
// ─────────────────────────────────────────────────────────────────────────────

pub use convert::{
    can_convert, can_convert_optional, convert_tuple, convert_value, transform, transform_in_place,
    transform_optional, Sample,
};
pub use dimension::{BaseId, BaseUnit, Dimension};
pub use error::{UnitError, UnitResult};
pub use quantity::Quantity;
pub use unit::{OffsetUnit, ScaledUnit, Unit, UnitKind, PROMISCUOUS_IDENTIFIER};
