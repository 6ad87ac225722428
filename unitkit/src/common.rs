//! Registry of commonly used units.

use std::collections::BTreeMap;
use std::f64::consts::PI;

use chrono::{DateTime, Utc};
use once_cell::sync::OnceCell;
use unitkit_core::{BaseUnit, Dimension, Unit, UnitError, UnitResult};

use crate::config::{UnitSettings, UnitsConfig};
use crate::error::{ConfigError, ConfigResult};
use crate::time;

static COMMON_UNITS: OnceCell<CommonUnits> = OnceCell::new();

const WELL_KNOWN: [&str; 8] = [
    "radian",
    "degree",
    "second",
    "meter",
    "meter_per_second",
    "seconds_since_the_epoch",
    "dimensionless",
    "promiscuous",
];

/// The well-known units, plus any base units and named units from a [`UnitsConfig`].
///
/// Build one explicitly with [`CommonUnits::from_config`], or share a single instance per process through
/// [`CommonUnits::global`].
///
/// ```rust
/// use unitkit::{CommonUnits, UnitsConfig};
///
/// let config: UnitsConfig = r#"
///     [[unit]]
///     name = "km"
///     dimension = { m = 1 }
///     scale = 1000.0
/// "#.parse()?;
/// let units = CommonUnits::from_config(&config)?;
///
/// let km = units.get("km").unwrap();
/// assert_eq!(units.meter().to_this(&[2.0], km)?, vec![2000.0]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct CommonUnits {
    radian: Unit,
    degree: Unit,
    second: Unit,
    meter: Unit,
    meter_per_second: Unit,
    seconds_since_the_epoch: Unit,
    dimensionless: Unit,
    promiscuous: Unit,
    origin: DateTime<Utc>,
    bases: BTreeMap<String, BaseUnit>,
    named: BTreeMap<String, Unit>,
}

impl CommonUnits {
    /// Builds the registry with the default configuration.
    pub fn new() -> ConfigResult<Self> {
        Self::from_config(&UnitsConfig::default())
    }

    /// Builds the registry from `config`.
    ///
    /// # Errors
    ///
    /// * `ConfigError::DuplicateName` if a base symbol or unit name is defined twice
    /// * `ConfigError::Unit` if a configured unit refers to an unknown base symbol or has an invalid scale or offset
    pub fn from_config(config: &UnitsConfig) -> ConfigResult<Self> {
        let mut bases: BTreeMap<String, BaseUnit> = BaseUnit::SI
            .iter()
            .map(|base| (base.symbol().to_string(), base.clone()))
            .collect();
        for settings in &config.base_units {
            if bases.contains_key(&settings.symbol) {
                return Err(ConfigError::DuplicateName(settings.symbol.clone()));
            }
            let base = BaseUnit::new(settings.quantity.clone(), settings.symbol.clone());
            bases.insert(settings.symbol.clone(), base);
        }

        let radian = Unit::base(BaseUnit::RADIAN);
        let degree = radian.scale(PI / 180.0)?.clone_with_identifier("deg")?;
        let meter = Unit::base(BaseUnit::METER);
        let second = Unit::base(BaseUnit::SECOND);
        let meter_per_second = Unit::derived(Dimension::from_exponents([
            (BaseUnit::METER, 1),
            (BaseUnit::SECOND, -1),
        ])?);
        let seconds_since_the_epoch = time::seconds_since(config.time.epoch, config.time.origin)?;

        let mut units = Self {
            radian,
            degree,
            second,
            meter,
            meter_per_second,
            seconds_since_the_epoch,
            dimensionless: Unit::dimensionless(),
            promiscuous: Unit::promiscuous(),
            origin: config.time.origin,
            bases,
            named: BTreeMap::new(),
        };

        for settings in &config.units {
            if WELL_KNOWN.contains(&settings.name.as_str()) || units.named.contains_key(&settings.name) {
                return Err(ConfigError::DuplicateName(settings.name.clone()));
            }
            let unit = units.define(settings)?;
            log::debug!("defined unit \"{}\" as {}", settings.name, unit.definition());
            units.named.insert(settings.name.clone(), unit);
        }

        log::info!(
            "built common unit registry with {} base units and {} configured units",
            units.bases.len(),
            units.named.len()
        );
        Ok(units)
    }

    fn define(&self, settings: &UnitSettings) -> UnitResult<Unit> {
        let exponents: Vec<(&str, i32)> = settings
            .dimension
            .iter()
            .map(|(symbol, exponent)| (symbol.as_str(), *exponent))
            .collect();
        let mut unit = self.derive(&exponents)?;
        if settings.scale != 1.0 {
            unit = unit.scale(settings.scale)?;
        }
        if settings.offset != 0.0 {
            unit = unit.shift(settings.offset)?;
        }
        unit.clone_with_identifier(&settings.name)
    }

    /// The process-wide registry, built from the default configuration on first access.
    ///
    /// Concurrent first calls build it once; every caller receives the same instance.
    pub fn global() -> ConfigResult<&'static CommonUnits> {
        COMMON_UNITS.get_or_try_init(CommonUnits::new)
    }

    /// Builds the process-wide registry from `config`.
    ///
    /// # Errors
    ///
    /// * `ConfigError::AlreadyInitialized` if the registry was already built, by this function or by
    ///   [`CommonUnits::global`]
    /// * any error of [`CommonUnits::from_config`]
    pub fn install(config: &UnitsConfig) -> ConfigResult<&'static CommonUnits> {
        let mut built = false;
        let units = COMMON_UNITS.get_or_try_init(|| {
            built = true;
            CommonUnits::from_config(config)
        })?;
        if built {
            Ok(units)
        } else {
            Err(ConfigError::AlreadyInitialized)
        }
    }

    /// Radian, the base unit of plane angle.
    pub fn radian(&self) -> &Unit {
        &self.radian
    }

    /// Degree, `π/180` radian, identified as `"deg"`.
    pub fn degree(&self) -> &Unit {
        &self.degree
    }

    /// Second, the base unit of time.
    pub fn second(&self) -> &Unit {
        &self.second
    }

    /// Meter, the base unit of length.
    pub fn meter(&self) -> &Unit {
        &self.meter
    }

    /// Meter per second.
    pub fn meter_per_second(&self) -> &Unit {
        &self.meter_per_second
    }

    /// Seconds since the configured epoch, as an offset unit over the second relative to the time origin.
    pub fn seconds_since_the_epoch(&self) -> &Unit {
        &self.seconds_since_the_epoch
    }

    /// The dimensionless unit.
    pub fn dimensionless(&self) -> &Unit {
        &self.dimensionless
    }

    /// The promiscuous unit.
    pub fn promiscuous(&self) -> &Unit {
        &self.promiscuous
    }

    /// The instant encoded as 0 seconds.
    pub fn time_origin(&self) -> DateTime<Utc> {
        self.origin
    }

    /// Looks up a unit by name: a well-known name such as `"meter_per_second"`, or a configured unit name.
    pub fn get(&self, name: &str) -> Option<&Unit> {
        match name {
            "radian" => Some(&self.radian),
            "degree" => Some(&self.degree),
            "second" => Some(&self.second),
            "meter" => Some(&self.meter),
            "meter_per_second" => Some(&self.meter_per_second),
            "seconds_since_the_epoch" => Some(&self.seconds_since_the_epoch),
            "dimensionless" => Some(&self.dimensionless),
            "promiscuous" => Some(&self.promiscuous),
            _ => self.named.get(name),
        }
    }

    /// Names of the configured units, in sorted order.
    pub fn configured_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.named.keys().map(String::as_str)
    }

    /// The base unit registered under `symbol`.
    ///
    /// # Errors
    ///
    /// `UnitError::MalformedUnit` if no base unit has that symbol.
    pub fn base(&self, symbol: &str) -> UnitResult<Unit> {
        self.base_unit(symbol).map(|base| Unit::base(base.clone()))
    }

    fn base_unit(&self, symbol: &str) -> UnitResult<&BaseUnit> {
        self.bases
            .get(symbol)
            .ok_or_else(|| UnitError::MalformedUnit(format!("unknown base unit symbol \"{}\"", symbol)))
    }

    /// A derived unit from `(symbol, exponent)` pairs over the registered base units.
    ///
    /// # Errors
    ///
    /// `UnitError::MalformedUnit` for an unknown symbol or an exponent overflow.
    pub fn derive(&self, exponents: &[(&str, i32)]) -> UnitResult<Unit> {
        let pairs = exponents
            .iter()
            .map(|(symbol, exponent)| Ok((self.base_unit(symbol)?.clone(), *exponent)))
            .collect::<UnitResult<Vec<_>>>()?;
        Ok(Unit::derived(Dimension::from_exponents(pairs)?))
    }
}
