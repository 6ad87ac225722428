//! Units configuration file support.
//!
//! This module reads the registry configuration (time origin, extra base units and named units) from TOML files.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};
use crate::time;

/// Units configuration from file.
///
/// ```toml
/// [time]
/// origin = "2001-01-01T00:00:00Z"
/// epoch = "1970-01-01T00:00:00Z"
///
/// [[base]]
/// quantity = "currency"
/// symbol = "USD"
///
/// [[unit]]
/// name = "km"
/// dimension = { m = 1 }
/// scale = 1000.0
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UnitsConfig {
    /// Time origin and epoch settings.
    #[serde(default)]
    pub time: TimeSettings,
    /// Additional base units, one per `[[base]]` table.
    #[serde(default, rename = "base")]
    pub base_units: Vec<BaseUnitSettings>,
    /// Named units, one per `[[unit]]` table.
    #[serde(default, rename = "unit")]
    pub units: Vec<UnitSettings>,
}

/// Time encoding settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeSettings {
    /// The instant encoded as 0 seconds.
    #[serde(default = "time::default_origin")]
    pub origin: DateTime<Utc>,
    /// The zero of the `seconds_since_the_epoch` unit.
    #[serde(default = "time::unix_epoch")]
    pub epoch: DateTime<Utc>,
}

impl Default for TimeSettings {
    fn default() -> Self {
        Self {
            origin: time::default_origin(),
            epoch: time::unix_epoch(),
        }
    }
}

/// An additional base unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BaseUnitSettings {
    /// Name of the physical quantity, e.g. `"currency"`.
    pub quantity: String,
    /// Symbol used in definitions and in `dimension` tables, e.g. `"USD"`.
    pub symbol: String,
}

/// A named unit: `scale` times the product of base units in `dimension`, shifted by `offset`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitSettings {
    /// Name and identifier of the unit.
    pub name: String,
    /// Base unit symbol to exponent; empty for a dimensionless unit.
    #[serde(default)]
    pub dimension: BTreeMap<String, i32>,
    /// Factor relative to the canonical unit.
    #[serde(default = "default_scale")]
    pub scale: f64,
    /// Offset in canonical units.
    #[serde(default)]
    pub offset: f64,
}

fn default_scale() -> f64 {
    1.0
}

impl UnitsConfig {
    /// Load units configuration from a TOML file.
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    /// * `Ok(UnitsConfig)` if successful
    /// * `Err(ConfigError)` if the file cannot be read or parsed
    pub fn from_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("loading units configuration from {}", path.display());
        content.parse()
    }

    /// Load units configuration from the default location.
    ///
    /// Searches for `units.toml` in:
    /// 1. Current directory
    /// 2. `config/` directory
    /// 3. Parent directory
    ///
    /// # Returns
    /// * `Ok(UnitsConfig)` if found and parsed successfully
    /// * `Err(ConfigError::NotFound)` if no config file was found
    pub fn from_default_location() -> ConfigResult<Self> {
        let search_paths = [
            PathBuf::from("units.toml"),
            PathBuf::from("config/units.toml"),
            PathBuf::from("../units.toml"),
        ];

        for path in search_paths {
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        Err(ConfigError::NotFound)
    }
}

impl FromStr for UnitsConfig {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(toml::from_str(s)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_empty_config() {
        let config: UnitsConfig = "".parse().unwrap();
        assert_eq!(config.time.origin, time::default_origin());
        assert_eq!(config.time.epoch, time::unix_epoch());
        assert!(config.base_units.is_empty());
        assert!(config.units.is_empty());
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[time]
origin = "1970-01-01T00:00:00Z"
epoch = "2000-01-01T12:00:00Z"

[[base]]
quantity = "currency"
symbol = "USD"

[[unit]]
name = "km"
dimension = { m = 1 }
scale = 1000.0

[[unit]]
name = "celsius"
dimension = { K = 1 }
offset = 273.15

[[unit]]
name = "percent"
scale = 0.01
"#;

        let config: UnitsConfig = toml.parse().unwrap();
        assert_eq!(config.time.origin, time::unix_epoch());
        assert_eq!(config.time.epoch.to_rfc3339(), "2000-01-01T12:00:00+00:00");
        assert_eq!(config.base_units[0].symbol, "USD");
        assert_eq!(config.units.len(), 3);

        let km = &config.units[0];
        assert_eq!(km.dimension.get("m"), Some(&1));
        assert_eq!(km.scale, 1000.0);
        assert_eq!(km.offset, 0.0);

        let celsius = &config.units[1];
        assert_eq!(celsius.scale, 1.0);
        assert_eq!(celsius.offset, 273.15);

        assert!(config.units[2].dimension.is_empty());
    }

    #[test]
    fn test_parse_error() {
        let result: ConfigResult<UnitsConfig> = "[[unit]]\nscale = 2.0\n".parse();
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[[unit]]\nname = \"ms\"\ndimension = {{ s = 1 }}\nscale = 0.001").unwrap();

        let config = UnitsConfig::from_file(file.path()).unwrap();
        assert_eq!(config.units[0].name, "ms");
        assert_eq!(config.units[0].scale, 0.001);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = UnitsConfig::from_file(dir.path().join("absent.toml"));
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }
}
