//! End-to-end chart tests against the analytic ephemeris.
//!
//! No kernel files are needed: every test builds charts from
//! `AnalyticEphemeris`.

use std::sync::Arc;
use std::thread;

use approx::{assert_abs_diff_eq, assert_relative_eq};

use kundali_core::{AnalyticEphemeris, Ephemeris};
use kundali_time::{GeoLocation, ResolverConfig, TimePrecision, resolve_birth_moment};
use kundali_vedic_base::dasha::PARTITION_EPSILON_DAYS;
use kundali_vedic_base::shadbala::{COMPONENT_WEIGHTS, TemporalContext};
use kundali_vedic_base::{
    BhavaSystem, Chart, ChartBuilder, ChartConfig, DashaTreeBuilder, Graha, Rashi,
    SAPTA_GRAHAS, ShadbalaScorer, SynastryComposer, VedicError, circular_mean, muhurta_for_date,
};

fn mumbai() -> GeoLocation {
    GeoLocation::new(19.076, 72.877, 5.5)
}

fn mumbai_chart(eph: &dyn Ephemeris) -> Chart {
    let birth =
        resolve_birth_moment("15/06/1990", Some("14:30"), &mumbai(), &ResolverConfig::default())
            .unwrap();
    ChartBuilder::new(eph, ChartConfig::default())
        .build_for_birth(&birth)
        .unwrap()
}

fn chart_at(eph: &dyn Ephemeris, time: &str, house_system: BhavaSystem) -> Chart {
    let birth =
        resolve_birth_moment("15/06/1990", Some(time), &mumbai(), &ResolverConfig::default())
            .unwrap();
    let config = ChartConfig {
        house_system,
        ..ChartConfig::default()
    };
    ChartBuilder::new(eph, config).build_for_birth(&birth).unwrap()
}

#[test]
fn mumbai_chart_and_dasha_are_byte_identical_across_runs() {
    let eph = AnalyticEphemeris::default();
    let run = || {
        let chart = mumbai_chart(&eph);
        let tree = DashaTreeBuilder::new(3)
            .unwrap()
            .build(chart.longitude(Graha::Chandra), chart.instant)
            .unwrap();
        (
            serde_json::to_string(&chart).unwrap(),
            serde_json::to_string(&tree).unwrap(),
        )
    };
    let (chart, tree) = run();
    for _ in 0..9 {
        let (chart_again, tree_again) = run();
        assert_eq!(chart, chart_again);
        assert_eq!(tree, tree_again);
    }
}

#[test]
fn day_and_night_do_not_depend_on_house_system() {
    let eph = AnalyticEphemeris::default();
    // Sunrise in Mumbai is about 06:01 IST on 15 June 1990.
    for (time, daytime) in [("07:45", true), ("14:30", true), ("22:00", false), ("04:30", false)] {
        let sripati = chart_at(&eph, time, BhavaSystem::Sripati);
        let whole = chart_at(&eph, time, BhavaSystem::WholeSign);
        let a = TemporalContext::from_chart(&sripati);
        let b = TemporalContext::from_chart(&whole);
        assert_eq!(a.is_daytime, daytime, "{time}");
        assert_eq!(a.is_daytime, b.is_daytime, "{time}");
        assert_eq!(a.hora_index, b.hora_index, "{time}");
        assert_eq!(a.weekday, b.weekday, "{time}");
        assert_abs_diff_eq!(a.fraction, b.fraction, epsilon = 1e-12);

        let scorer = ShadbalaScorer::default();
        for (x, y) in scorer.score(&sripati).iter().zip(scorer.score(&whole).iter()) {
            assert_abs_diff_eq!(x.components.temporal, y.components.temporal, epsilon = 1e-9);
        }
    }

    // Shortly after sunrise the day has barely begun.
    let early = TemporalContext::from_chart(&chart_at(&eph, "07:45", BhavaSystem::WholeSign));
    assert!((0.05..0.25).contains(&early.fraction), "{}", early.fraction);
    assert!(early.hora_index <= 2);
}

#[test]
fn mumbai_chart_placements() {
    let eph = AnalyticEphemeris::default();
    let chart = mumbai_chart(&eph);

    assert_eq!(chart.time_precision, TimePrecision::Exact);
    assert_abs_diff_eq!(chart.instant.jd_ut(), 2_448_057.875, epsilon = 1e-9);
    assert_eq!(chart.lagna.rashi, Rashi::Kanya);
    assert_eq!(chart.placement(Graha::Surya).rashi.rashi, Rashi::Mithuna);
    assert!((chart.ayanamsha_deg - 23.72).abs() < 0.02, "{}", chart.ayanamsha_deg);

    // The lagna opens house 1, and every graha lands in exactly one house.
    assert!((chart.cusps()[0] - chart.lagna_deg()).abs() < 1e-9);
    for p in &chart.grahas {
        assert!((1..=12).contains(&p.house), "{}: {}", p.graha, p.house);
        assert_eq!(p.retrograde, p.position.speed_deg_per_day < 0.0);
    }
    assert!(chart.placement(Graha::Rahu).retrograde);
}

#[test]
fn every_house_system_builds() {
    let eph = AnalyticEphemeris::default();
    let birth =
        resolve_birth_moment("15/06/1990", Some("14:30"), &mumbai(), &ResolverConfig::default())
            .unwrap();
    for system in [
        BhavaSystem::Sripati,
        BhavaSystem::Equal,
        BhavaSystem::WholeSign,
        BhavaSystem::Placidus,
    ] {
        let config = ChartConfig {
            house_system: system,
            ..ChartConfig::default()
        };
        let chart = ChartBuilder::new(&eph, config).build_for_birth(&birth).unwrap();
        assert_eq!(chart.houses.system, system);
    }
}

#[test]
fn placidus_rejected_in_polar_circle() {
    let eph = AnalyticEphemeris::default();
    let tromso = GeoLocation::new(69.65, 18.96, 1.0);
    let birth =
        resolve_birth_moment("1990-06-15", Some("12:00"), &tromso, &ResolverConfig::default())
            .unwrap();
    let config = ChartConfig {
        house_system: BhavaSystem::Placidus,
        ..ChartConfig::default()
    };
    let err = ChartBuilder::new(&eph, config).build_for_birth(&birth).unwrap_err();
    assert!(matches!(err, VedicError::InvalidLocation(_)));
}

#[test]
fn missing_time_is_flagged_approximate() {
    let eph = AnalyticEphemeris::default();
    let birth = resolve_birth_moment("15/06/1990", None, &mumbai(), &ResolverConfig::default())
        .unwrap();
    let chart = ChartBuilder::new(&eph, ChartConfig::default())
        .build_for_birth(&birth)
        .unwrap();
    assert_eq!(chart.time_precision, TimePrecision::Approximate);
    assert_eq!(chart.instant.to_local(5.5).hour, 12);
}

#[test]
fn out_of_range_propagates() {
    let eph = AnalyticEphemeris::default();
    let birth = resolve_birth_moment("01/01/1700", Some("12:00"), &mumbai(), &ResolverConfig::default())
        .unwrap();
    let err = ChartBuilder::new(&eph, ChartConfig::default())
        .build_for_birth(&birth)
        .unwrap_err();
    assert!(matches!(err, VedicError::Ephemeris(_)), "{err:?}");
}

#[test]
fn mumbai_dasha_partitions_and_closes() {
    let eph = AnalyticEphemeris::default();
    let chart = mumbai_chart(&eph);
    let tree = DashaTreeBuilder::new(3)
        .unwrap()
        .build(chart.longitude(Graha::Chandra), chart.instant)
        .unwrap();
    tree.verify_partition(PARTITION_EPSILON_DAYS).unwrap();
    let span = tree.end().unwrap().days_since(tree.adjusted_anchor);
    assert_relative_eq!(span, 120.0 * 365.25, epsilon = 1e-6);
    assert_eq!(tree.mahadashas[0].start, chart.instant);
}

#[test]
fn shadbala_composite_is_the_weighted_sum() {
    let eph = AnalyticEphemeris::default();
    let chart = mumbai_chart(&eph);
    let scores = ShadbalaScorer::default().score(&chart);
    assert_eq!(scores.len(), 7);
    for (score, graha) in scores.iter().zip(SAPTA_GRAHAS) {
        assert_eq!(score.graha, graha);
        let expected: f64 = score
            .components
            .as_array()
            .iter()
            .zip(COMPONENT_WEIGHTS)
            .map(|(c, w)| c * w)
            .sum();
        assert_abs_diff_eq!(score.composite, expected, epsilon = 1e-9);
        assert!((score.percentage - score.composite / score.maximum * 100.0).abs() < 1e-9);
        for c in score.components.as_array() {
            assert!(c >= 0.0, "{graha}: negative component {c}");
        }
        assert!(score.composite <= score.maximum);
    }
}

#[test]
fn synastry_with_itself_is_all_conjunctions_on_the_diagonal() {
    let eph = AnalyticEphemeris::default();
    let chart = mumbai_chart(&eph);
    let report = SynastryComposer::default().compare(&chart, &chart);
    for graha in [Graha::Surya, Graha::Chandra, Graha::Shani] {
        assert!(
            report
                .cross_aspects
                .iter()
                .any(|a| a.first == graha && a.second == graha && a.aspect == "conjunction")
        );
        assert!((report.composite.longitude(graha) - chart.longitude(graha)).abs() < 1e-9);
    }
    // Rahu and Ketu are always opposite.
    assert!(report.cross_aspects.iter().any(|a| {
        a.first == Graha::Rahu && a.second == Graha::Ketu && a.aspect == "opposition"
    }));
}

#[test]
fn composite_antipodal_pair_is_stable() {
    let a = circular_mean(10.0, 190.0);
    for _ in 0..10 {
        assert_eq!(circular_mean(10.0, 190.0), a);
    }
    assert_eq!(a, 100.0);
}

#[test]
fn mumbai_muhurta_windows() {
    let eph = AnalyticEphemeris::default();
    let w = muhurta_for_date(&eph, &mumbai(), 1990, 6, 15).unwrap();
    // Friday.
    assert_eq!(w.weekday, 5);
    let hours = |t: kundali_time::Instant| {
        let c = t.to_local(5.5);
        f64::from(c.hour) + f64::from(c.minute) / 60.0 + c.second / 3600.0
    };
    // Mumbai in mid-June: sunrise about 06:00, sunset about 19:17 IST.
    assert!((hours(w.sunrise) - 6.0).abs() < 0.2, "{}", hours(w.sunrise));
    assert!((hours(w.sunset) - 19.28).abs() < 0.2, "{}", hours(w.sunset));
    assert!(w.abhijit.is_some());
    assert!(w.rahukalam.start > w.sunrise && w.rahukalam.end < w.sunset);
}

#[test]
fn polar_summer_has_no_sunset() {
    let eph = AnalyticEphemeris::default();
    let svalbard = GeoLocation::new(78.22, 15.65, 1.0);
    let err = muhurta_for_date(&eph, &svalbard, 1990, 6, 15).unwrap_err();
    assert!(matches!(err, VedicError::NoSunrise(_)));
}

#[test]
fn identical_results_across_threads() {
    let eph: Arc<dyn Ephemeris> = Arc::new(AnalyticEphemeris::default());
    let reference = {
        let chart = mumbai_chart(eph.as_ref());
        let tree = DashaTreeBuilder::default()
            .build(chart.longitude(Graha::Chandra), chart.instant)
            .unwrap();
        (
            serde_json::to_string(&chart).unwrap(),
            serde_json::to_string(&tree).unwrap(),
        )
    };

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let eph = Arc::clone(&eph);
            thread::spawn(move || {
                let chart = mumbai_chart(eph.as_ref());
                let tree = DashaTreeBuilder::default()
                    .build(chart.longitude(Graha::Chandra), chart.instant)
                    .unwrap();
                (
                    serde_json::to_string(&chart).unwrap(),
                    serde_json::to_string(&tree).unwrap(),
                )
            })
        })
        .collect();

    for h in handles {
        assert_eq!(h.join().unwrap(), reference);
    }
}
