//! Transit scans against the Mumbai reference chart.

use kundali_core::{AnalyticEphemeris, Ephemeris};
use kundali_search::{
    ReturnConfig, SearchError, TransitConfig, TransitEvent, TransitScanner, solar_return,
};
use kundali_time::{GeoLocation, Instant, ResolverConfig, resolve_birth_moment};
use kundali_vedic_base::{AspectTable, Chart, ChartBuilder, ChartConfig, Graha};

// 2020-01-01 00:00 UT and 2021-01-01 00:00 UT.
const FROM: Instant = Instant::from_jd_ut(2_458_849.5);
const TO: Instant = Instant::from_jd_ut(2_459_215.5);

fn mumbai_chart(eph: &dyn Ephemeris) -> Chart {
    let loc = GeoLocation::new(19.076, 72.877, 5.5);
    let birth =
        resolve_birth_moment("15/06/1990", Some("14:30"), &loc, &ResolverConfig::default())
            .unwrap();
    ChartBuilder::new(eph, ChartConfig::default())
        .build_for_birth(&birth)
        .unwrap()
}

#[test]
fn sun_year_events_are_well_formed() {
    let eph = AnalyticEphemeris::default();
    let chart = mumbai_chart(&eph);
    let table = AspectTable::default();
    let scanner = TransitScanner::new(&eph, table.clone(), TransitConfig::default()).unwrap();
    let events = scanner.scan(&chart, &[Graha::Surya], FROM, TO).unwrap();

    assert!(!events.is_empty());
    for pair in events.windows(2) {
        assert!(pair[0].peak.jd_ut() <= pair[1].peak.jd_ut());
    }
    for event in &events {
        let orb = table
            .aspects()
            .iter()
            .find(|a| a.name == event.aspect)
            .map(|a| a.orb_deg)
            .unwrap();
        assert_eq!(event.transiting, Graha::Surya);
        assert!(event.peak >= FROM && event.peak <= TO, "{event:?}");
        assert!(event.orb_at_peak_deg <= orb + 1.0e-9, "{event:?}");
        assert!(event.orb_at_peak_deg <= event.orb_at_detection_deg + 1.0e-9, "{event:?}");
        if event.perfected {
            assert!(event.orb_at_peak_deg < 1.0e-3, "{event:?}");
        }
        if let Some(entry) = event.entry {
            assert!(entry < event.peak, "{event:?}");
        }
        if let Some(exit) = event.exit {
            assert!(exit > event.peak, "{event:?}");
        }
    }
}

#[test]
fn sun_conjunct_natal_sun_matches_solar_return() {
    let eph = AnalyticEphemeris::default();
    let chart = mumbai_chart(&eph);
    let scanner =
        TransitScanner::new(&eph, AspectTable::default(), TransitConfig::default()).unwrap();
    let events = scanner.scan(&chart, &[Graha::Surya], FROM, TO).unwrap();

    let conj: Vec<_> = events
        .iter()
        .filter(|e| e.natal == Graha::Surya && e.aspect == "conjunction")
        .collect();
    assert_eq!(conj.len(), 1, "{conj:?}");
    assert!(conj[0].perfected);

    let ret = solar_return(&eph, &chart, FROM, ReturnConfig::default()).unwrap();
    let instant = ret.outcome.instant().unwrap();
    assert!(conj[0].peak.days_since(instant).abs() < 0.01);

    // The Sun moves about a degree a day: an 8° orb lasts about 16 days.
    let span = conj[0].exit.unwrap().days_since(conj[0].entry.unwrap());
    assert!((14.0..18.5).contains(&span), "span {span}");
}

#[test]
fn moon_scan_with_fine_step() {
    let eph = AnalyticEphemeris::default();
    let chart = mumbai_chart(&eph);
    let config = TransitConfig {
        step_days: 0.25,
        ..Default::default()
    };
    let scanner = TransitScanner::new(&eph, AspectTable::default(), config).unwrap();
    let to = FROM.add_days(30.0);
    let events = scanner.scan(&chart, &[Graha::Chandra], FROM, to).unwrap();

    // The Moon conjoins every natal point once a sidereal month.
    let conj = events
        .iter()
        .filter(|e| e.aspect == "conjunction" && e.perfected)
        .count();
    assert!(conj >= 9, "{conj} perfected conjunctions");
}

fn moon_events(eph: &AnalyticEphemeris, config: TransitConfig) -> Vec<TransitEvent> {
    let chart = mumbai_chart(eph);
    let scanner = TransitScanner::new(eph, AspectTable::default(), config).unwrap();
    scanner
        .scan(&chart, &[Graha::Chandra], FROM, FROM.add_days(60.0))
        .unwrap()
}

fn passes(events: &[TransitEvent]) -> Vec<(Graha, String)> {
    let mut keys: Vec<_> = events.iter().map(|e| (e.natal, e.aspect.clone())).collect();
    keys.sort();
    keys
}

#[test]
fn default_step_finds_every_moon_pass() {
    let eph = AnalyticEphemeris::default();
    let coarse = moon_events(&eph, TransitConfig::default());
    let fine = moon_events(
        &eph,
        TransitConfig {
            step_days: 0.05,
            ..Default::default()
        },
    );
    assert_eq!(coarse.len(), fine.len());
    assert_eq!(passes(&coarse), passes(&fine));
    let sextiles = coarse.iter().filter(|e| e.aspect == "sextile").count();
    assert!(sextiles >= 40, "{sextiles} sextiles");
}

#[test]
fn capped_sampling_still_finds_perfected_moon_passes() {
    let eph = AnalyticEphemeris::default();
    // 40 samples over 60 days: the Moon moves ~20° between samples.
    let sparse = moon_events(
        &eph,
        TransitConfig {
            max_samples: 40,
            ..Default::default()
        },
    );
    let fine = moon_events(
        &eph,
        TransitConfig {
            step_days: 0.05,
            ..Default::default()
        },
    );
    let perfected = |events: &[TransitEvent]| -> Vec<TransitEvent> {
        events.iter().filter(|e| e.perfected).cloned().collect()
    };
    let (sparse, fine) = (perfected(&sparse), perfected(&fine));
    assert_eq!(passes(&sparse), passes(&fine));
    for event in &sparse {
        assert!(event.orb_at_peak_deg < 1.0e-3, "{event:?}");
        let (Some(entry), Some(exit)) = (event.entry, event.exit) else {
            continue;
        };
        assert!(entry < event.peak && event.peak < exit, "{event:?}");
    }
}

#[test]
fn reversed_range_is_rejected() {
    let eph = AnalyticEphemeris::default();
    let chart = mumbai_chart(&eph);
    let scanner =
        TransitScanner::new(&eph, AspectTable::default(), TransitConfig::default()).unwrap();
    let err = scanner.scan(&chart, &[Graha::Surya], TO, FROM).unwrap_err();
    assert!(matches!(err, SearchError::InvalidInput(_)));
}

#[test]
fn range_outside_ephemeris_is_rejected() {
    let eph = AnalyticEphemeris::default();
    let chart = mumbai_chart(&eph);
    let scanner =
        TransitScanner::new(&eph, AspectTable::default(), TransitConfig::default()).unwrap();
    let far = Instant::from_jd_ut(2_488_000.0);
    let err = scanner.scan(&chart, &[Graha::Surya], FROM, far).unwrap_err();
    assert!(matches!(err, SearchError::Ephemeris(_)));
}
