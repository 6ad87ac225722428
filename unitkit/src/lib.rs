//! Run-time unit algebra, a registry of common units, and unit conversion for scientific data.
//!
//! `unitkit` is the user-facing crate in this workspace. It re-exports the full API from `unitkit-core` and adds:
//!
//! - [`CommonUnits`]: the well-known units (radian, degree, second, meter, meter per second, seconds since the
//!   epoch, dimensionless, promiscuous), built from a [`UnitsConfig`] or shared process-wide through
//!   [`CommonUnits::global`].
//! - [`UnitsConfig`]: TOML configuration of the time origin, extra base units and named units.
//! - [`time`]: encoding of instants as seconds since a configurable origin.
//!
//! # Quick start
//!
//! Convert degrees to radians:
//!
//! ```rust
//! use unitkit::CommonUnits;
//!
//! let units = CommonUnits::global()?;
//! let r = units.radian().to_this(&[180.0], units.degree())?;
//! assert!((r[0] - core::f64::consts::PI).abs() < 1e-12);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Compose units and check compatibility:
//!
//! ```rust
//! use unitkit::{transform, CommonUnits};
//!
//! let units = CommonUnits::global()?;
//! let speed = units.meter().divide(units.second())?;
//! assert!(speed.is_convertible(units.meter_per_second()));
//! assert_eq!(transform(&[10.0], &speed, units.meter_per_second())?, vec![10.0]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Modules
//!
//! - `unitkit::common` (the registry)
//! - `unitkit::config` (TOML configuration)
//! - `unitkit::time` (timestamp encoding)
//!
//! # Logging
//!
//! The crate logs through the `log` facade and installs no logger: `info` when a registry is built, `debug` for
//! configured units and for offsets dropped during composition, `trace` for each array transform.
//!
//! # SemVer and stability
//!
//! This workspace is currently `0.x`. Expect breaking changes between minor versions until `1.0`.
#![deny(missing_docs)]
#![forbid(unsafe_code)]

pub use unitkit_core::*;

pub mod common;
pub mod config;
pub mod error;
pub mod time;

pub use common::CommonUnits;
pub use config::{BaseUnitSettings, TimeSettings, UnitSettings, UnitsConfig};
pub use error::{ConfigError, ConfigResult};
