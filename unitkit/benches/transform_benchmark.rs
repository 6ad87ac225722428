use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use unitkit::{transform, transform_in_place, CommonUnits, Unit};

fn bench_array_transforms(c: &mut Criterion) {
    let mut group = c.benchmark_group("array_transforms");
    let units = CommonUnits::new().unwrap();

    for len in [16usize, 1024, 65_536] {
        let values: Vec<f64> = (0..len).map(|i| i as f64 * 0.5).collect();

        group.bench_with_input(BenchmarkId::new("degree_to_radian", len), &values, |b, input| {
            b.iter(|| transform(black_box(input.as_slice()), units.degree(), units.radian()));
        });

        group.bench_with_input(BenchmarkId::new("epoch_to_second", len), &values, |b, input| {
            b.iter(|| transform(black_box(input.as_slice()), units.seconds_since_the_epoch(), units.second()));
        });

        group.bench_with_input(BenchmarkId::new("promiscuous", len), &values, |b, input| {
            b.iter(|| transform(black_box(input.as_slice()), units.promiscuous(), units.meter()));
        });
    }

    group.finish();
}

fn bench_in_place_f32(c: &mut Criterion) {
    let mut group = c.benchmark_group("in_place");
    let units = CommonUnits::new().unwrap();
    let km = units.meter().scale(1000.0).unwrap();

    let mut values: Vec<f32> = (0..4096).map(|i| i as f32).collect();
    group.bench_function("km_m_round_trip_f32", |b| {
        b.iter(|| {
            transform_in_place(black_box(values.as_mut_slice()), &km, units.meter()).unwrap();
            transform_in_place(black_box(values.as_mut_slice()), units.meter(), &km).unwrap();
        });
    });

    group.finish();
}

fn bench_composition(c: &mut Criterion) {
    let mut group = c.benchmark_group("composition");
    let units = CommonUnits::new().unwrap();
    let hour = units.second().scale(3600.0).unwrap();

    group.bench_function("divide_scaled", |b| {
        b.iter(|| black_box(units.meter()).divide(black_box(&hour)));
    });

    group.bench_function("pow_derived", |b| {
        b.iter(|| black_box(units.meter_per_second()).pow(black_box(3)));
    });

    group.bench_function("can_convert", |b| {
        let kmh = units.meter().scale(1000.0).unwrap().divide(&hour).unwrap();
        b.iter(|| black_box(&kmh).is_convertible(black_box(units.meter_per_second())));
    });

    group.bench_function("derive_from_symbols", |b| {
        b.iter(|| units.derive(black_box(&[("m", 1), ("kg", 1), ("s", -2)])));
    });

    group.finish();
}

fn bench_registry(c: &mut Criterion) {
    c.bench_function("registry_lookup", |b| {
        let units = CommonUnits::global().unwrap();
        b.iter(|| units.get(black_box("meter_per_second")).map(Unit::is_promiscuous));
    });
}

criterion_group!(
    benches,
    bench_array_transforms,
    bench_in_place_f32,
    bench_composition,
    bench_registry
);
criterion_main!(benches);
