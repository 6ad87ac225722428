//! Integration-level tests for the `unitkit` facade crate.

use std::thread;

use unitkit::time::{default_origin, encode_timestamp, unix_epoch};
use unitkit::*;

use approx::{assert_abs_diff_eq, assert_relative_eq};
use chrono::{TimeZone, Utc};

fn units() -> &'static CommonUnits {
    CommonUnits::global().unwrap()
}

#[test]
fn smoke_test_degrees() {
    let r = units().radian().to_this(&[180.0], units().degree()).unwrap();
    assert_relative_eq!(r[0], std::f64::consts::PI, max_relative = 1e-9);
}

#[test]
fn smoke_test_epoch() {
    let encoded = units()
        .seconds_since_the_epoch()
        .to_that(&[0.0], units().second())
        .unwrap();
    assert_eq!(encoded[0], encode_timestamp(unix_epoch(), default_origin()));
    assert_eq!(encoded[0], -978_307_200.0);
}

#[test]
fn smoke_test_epoch_f32() {
    let day: Vec<f32> = units()
        .second()
        .to_this(&[86_400.0_f32], units().seconds_since_the_epoch())
        .unwrap();
    assert_relative_eq!(day[0], -978_220_800.0_f32, max_relative = 1e-6);
}

#[test]
fn smoke_test_velocity() {
    let speed = units().meter().divide(units().second()).unwrap();
    assert!(can_convert(&speed, units().meter_per_second()));
    assert_eq!(
        transform(&[10.0], &speed, units().meter_per_second()).unwrap(),
        vec![10.0]
    );
}

#[test]
fn smoke_test_promiscuous_clone_fails() {
    let err = units().promiscuous().clone_with_identifier("anything").unwrap_err();
    assert!(matches!(err, UnitError::ImmutableSingleton { .. }));
}

#[test]
fn smoke_test_dimensionless_is_not_promiscuous() {
    assert!(!can_convert(units().dimensionless(), units().meter()));
    assert!(can_convert(units().promiscuous(), units().meter()));
    assert!(can_convert(units().meter(), units().promiscuous()));
}

#[test]
fn smoke_test_multiply_by_dimensionless() {
    for unit in [units().radian(), units().second(), units().meter()] {
        assert_eq!(&unit.multiply(units().dimensionless()).unwrap(), unit);
    }
}

#[test]
fn smoke_test_timestamp_round_trip() {
    let t = Utc.with_ymd_and_hms(1999, 12, 31, 23, 59, 59).unwrap();
    let in_epoch_seconds = units()
        .seconds_since_the_epoch()
        .to_this(&[encode_timestamp(t, default_origin())], units().second())
        .unwrap();
    assert_eq!(in_epoch_seconds[0], t.timestamp() as f64);
}

#[test]
fn smoke_test_tuple_conversion() {
    let km = units().meter().scale(1000.0).unwrap();
    let rows = vec![vec![1.0, 2.0], vec![90.0], vec![3.0]];
    let out = convert_tuple(
        &rows,
        &[Some(&km), Some(units().degree()), None],
        &[Some(units().meter()), Some(units().radian()), None],
    )
    .unwrap();
    assert_eq!(out[0], vec![1000.0, 2000.0]);
    assert_abs_diff_eq!(out[1][0], std::f64::consts::FRAC_PI_2, epsilon = 1e-12);
    assert_eq!(out[2], vec![3.0]);
}

#[test]
fn smoke_test_quantities() {
    let d = Quantity::new(100.0, units().meter().clone());
    let t = Quantity::new(20.0, units().second().clone());
    let v = d.divide(&t).unwrap();
    assert_eq!(v.value(), 5.0);
    assert!(v.unit().is_convertible(units().meter_per_second()));
}

#[test]
fn global_registry_is_shared_across_threads() {
    let handles: Vec<_> = (0..8)
        .map(|_| thread::spawn(|| CommonUnits::global().unwrap() as *const CommonUnits as usize))
        .collect();
    let addresses: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert!(addresses.windows(2).all(|w| w[0] == w[1]));
    assert_eq!(addresses[0], units() as *const CommonUnits as usize);
}

#[test]
fn install_after_first_use_fails() {
    units();
    let result = CommonUnits::install(&UnitsConfig::default());
    assert!(matches!(result, Err(ConfigError::AlreadyInitialized)));
}

#[test]
fn registry_from_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("units.toml");
    std::fs::write(
        &path,
        r#"
[time]
origin = "1970-01-01T00:00:00Z"

[[unit]]
name = "km/h"
dimension = { m = 1, s = -1 }
scale = 0.2777777777777778
"#,
    )
    .unwrap();

    let config = UnitsConfig::from_file(&path).unwrap();
    let units = CommonUnits::from_config(&config).unwrap();

    let epoch = units
        .seconds_since_the_epoch()
        .to_that(&[0.0], units.second())
        .unwrap();
    assert_eq!(epoch, vec![0.0]);

    let kmh = units.get("km/h").unwrap();
    let mps = units.meter_per_second().to_this(&[36.0], kmh).unwrap();
    assert_relative_eq!(mps[0], 10.0, max_relative = 1e-12);
}
