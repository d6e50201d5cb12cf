//! Performance benchmarks for the Family Benefit Engine.
//!
//! This benchmark suite checks that the engines stay cheap enough to run in
//! bulk:
//! - Single Benefit A calculation: < 20μs mean
//! - Single combined entitlement: < 50μs mean
//! - Threshold solve for a family: < 10μs mean
//! - Batch of 1000 households: < 50ms mean
//! - Income sweep of 100 points: < 5ms mean
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rust_decimal::Decimal;

use family_benefit_engine::calculation::{
    CalculationOptions, calculate_benefit_a, calculate_benefit_b, calculate_family_entitlement,
    income_sweep, solve_benefit_a_thresholds, solve_benefit_b_thresholds,
};
use family_benefit_engine::config::{ConfigLoader, RateTable};
use family_benefit_engine::models::{Child, Household};

/// Loads the current rate table from the bundled configuration.
fn load_table() -> RateTable {
    let loader = ConfigLoader::load("./config/ftb").expect("Failed to load config");
    loader
        .latest_rate_table()
        .expect("No rate tables configured")
        .clone()
}

/// Creates a couple with three children and income in the taper range.
fn create_household() -> Household {
    Household::couple(
        Decimal::from(85_000),
        Decimal::from(18_000),
        vec![
            Child::new(2).unwrap(),
            Child::new(9).unwrap(),
            Child::new(14).unwrap().with_immunisation(false),
        ],
    )
    .expect("Failed to create household")
}

/// Creates `count` households spread across income levels and family sizes.
fn create_households(count: usize) -> Vec<Household> {
    (0..count)
        .map(|i| {
            let primary = Decimal::from(20_000 + (i % 40) * 4_000);
            let secondary = Decimal::from((i % 7) * 5_000);
            let children = (0..(i % 4) + 1)
                .map(|c| Child::new(((i + c * 5) % 20) as u8).unwrap())
                .collect();
            Household::new(i % 3 != 0, primary, secondary, children)
                .expect("Failed to create household")
        })
        .collect()
}

/// Benchmark: Single Benefit A calculation.
///
/// Target: < 20μs mean
fn bench_single_benefit_a(c: &mut Criterion) {
    let table = load_table();
    let household = create_household();

    c.bench_function("single_benefit_a", |b| {
        b.iter(|| black_box(calculate_benefit_a(black_box(&household), &table)))
    });
}

/// Benchmark: Single Benefit B calculation.
fn bench_single_benefit_b(c: &mut Criterion) {
    let table = load_table();
    let household = create_household();

    c.bench_function("single_benefit_b", |b| {
        b.iter(|| black_box(calculate_benefit_b(black_box(&household), &table, true)))
    });
}

/// Benchmark: Combined family entitlement.
///
/// Target: < 50μs mean
fn bench_family_entitlement(c: &mut Criterion) {
    let table = load_table();
    let household = create_household()
        .with_fortnightly_rent(Decimal::from(420))
        .expect("Failed to set rent");
    let options = CalculationOptions {
        include_energy_supplement: true,
    };

    c.bench_function("family_entitlement", |b| {
        b.iter(|| {
            black_box(calculate_family_entitlement(
                black_box(&household),
                &table,
                options,
            ))
        })
    });
}

/// Benchmark: Threshold solves for both benefits.
///
/// Target: < 10μs mean
fn bench_thresholds(c: &mut Criterion) {
    let table = load_table();
    let household = create_household();

    c.bench_function("solve_thresholds", |b| {
        b.iter(|| {
            let benefit_a = solve_benefit_a_thresholds(black_box(household.children()), &table);
            let benefit_b = solve_benefit_b_thresholds(black_box(household.children()), &table);
            black_box((benefit_a, benefit_b))
        })
    });
}

/// Benchmark: Batch entitlement calculations.
///
/// Target for 1000 households: < 50ms mean
fn bench_batch(c: &mut Criterion) {
    let table = load_table();
    let mut group = c.benchmark_group("batch_households");

    for size in [100usize, 1000] {
        let households = create_households(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &households, |b, hs| {
            b.iter(|| {
                let results: Vec<_> = hs
                    .iter()
                    .map(|h| {
                        calculate_family_entitlement(h, &table, CalculationOptions::default())
                    })
                    .collect();
                black_box(results)
            })
        });
    }

    group.finish();
}

/// Benchmark: Income sweep across the taper range.
///
/// Target: < 5ms mean
fn bench_income_sweep(c: &mut Criterion) {
    let table = load_table();
    let household = create_household();

    c.bench_function("income_sweep_100_points", |b| {
        b.iter(|| {
            black_box(
                income_sweep(
                    black_box(&household),
                    &table,
                    Decimal::ZERO,
                    Decimal::from(198_000),
                    Decimal::from(2_000),
                    CalculationOptions::default(),
                )
                .expect("Sweep failed"),
            )
        })
    });
}

criterion_group!(
    benches,
    bench_single_benefit_a,
    bench_single_benefit_b,
    bench_family_entitlement,
    bench_thresholds,
    bench_batch,
    bench_income_sweep,
);
criterion_main!(benches);
