use criterion::{Criterion, black_box, criterion_group, criterion_main};
use kundali_core::AnalyticEphemeris;
use kundali_search::{ReturnConfig, TransitConfig, TransitScanner, lunar_return, solar_return};
use kundali_time::{GeoLocation, Instant};
use kundali_vedic_base::{AspectTable, ChartBuilder, ChartConfig, Graha};

const BIRTH: Instant = Instant::from_jd_ut(2_448_057.875);

fn returns_bench(c: &mut Criterion) {
    let eph = AnalyticEphemeris::default();
    let loc = GeoLocation::new(19.076, 72.877, 5.5);
    let chart = ChartBuilder::new(&eph, ChartConfig::default())
        .build(BIRTH, &loc)
        .unwrap();
    let from = BIRTH.add_days(100.0);

    let mut group = c.benchmark_group("returns");
    group.bench_function("solar", |b| {
        b.iter(|| solar_return(&eph, &chart, black_box(from), ReturnConfig::default()))
    });
    group.bench_function("lunar", |b| {
        b.iter(|| lunar_return(&eph, &chart, black_box(from), ReturnConfig::default()))
    });
    group.finish();
}

fn transit_bench(c: &mut Criterion) {
    let eph = AnalyticEphemeris::default();
    let loc = GeoLocation::new(19.076, 72.877, 5.5);
    let chart = ChartBuilder::new(&eph, ChartConfig::default())
        .build(BIRTH, &loc)
        .unwrap();
    let scanner =
        TransitScanner::new(&eph, AspectTable::default(), TransitConfig::default()).unwrap();
    let from = Instant::from_jd_ut(2_458_849.5);

    let mut group = c.benchmark_group("transits");
    group.sample_size(20);
    group.bench_function("slow_grahas_one_year", |b| {
        b.iter(|| {
            scanner.scan(
                &chart,
                &[Graha::Guru, Graha::Shani, Graha::Rahu],
                black_box(from),
                from.add_days(365.0),
            )
        })
    });
    group.finish();
}

criterion_group!(benches, returns_bench, transit_bench);
criterion_main!(benches);
