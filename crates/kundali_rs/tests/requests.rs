//! Request contract end to end against the analytic ephemeris.

use kundali_rs::*;

const MUMBAI: &str = r#"
    "birthDate": "15/06/1990",
    "birthTime": "14:30",
    "geoLocation": { "latitudeDeg": 19.076, "longitudeDeg": 72.877, "utcOffsetHours": 5.5 }
"#;

fn request(kind_and_params: &str) -> String {
    format!("{{{MUMBAI}, {kind_and_params}}}")
}

fn run(kind_and_params: &str) -> Result<CalculationResult, KundaliError> {
    let req: CalculationRequest = serde_json::from_str(&request(kind_and_params))?;
    calculate(&AnalyticEphemeris::default(), &KundaliConfig::default(), &req)
}

#[test]
fn chart_json_is_tagged_and_stable() {
    let eph = AnalyticEphemeris::default();
    let config = KundaliConfig::default();
    let req = request(r#""calculationKind": "chart", "parameters": {}"#);
    let first = calculate_json(&eph, &config, &req).unwrap();
    assert!(first.starts_with(r#"{"kind":"chart","result":"#), "{first}");
    for _ in 0..9 {
        assert_eq!(calculate_json(&eph, &config, &req).unwrap(), first);
    }
}

#[test]
fn every_kind_dispatches_to_its_result() {
    let cases = [
        (r#""calculationKind": "chart", "parameters": {}"#, "chart"),
        (r#""calculationKind": "dasha", "parameters": { "depth": 3 }"#, "dashaTree"),
        (r#""calculationKind": "shadbala", "parameters": {}"#, "strengthScores"),
        (
            r#""calculationKind": "return", "parameters": { "graha": "Chandra" }"#,
            "returnEvent",
        ),
        (
            r#""calculationKind": "transit",
               "parameters": { "fromDate": "01/01/2020", "toDate": "01/03/2020",
                               "grahas": ["Surya", "Shani"] }"#,
            "transitEvents",
        ),
        (
            r#""calculationKind": "synastry",
               "parameters": { "partner": {
                   "birthDate": "1992-02-29",
                   "birthTime": "06:15",
                   "geoLocation": { "latitudeDeg": 28.61, "longitudeDeg": 77.21, "utcOffsetHours": 5.5 } } }"#,
            "compositeChart",
        ),
        (r#""calculationKind": "muhurta", "parameters": {}"#, "muhurtaWindows"),
    ];
    for (body, tag) in cases {
        let result = run(body).unwrap_or_else(|e| panic!("{tag}: {e}"));
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["kind"], tag);
    }
}

#[test]
fn dasha_depth_parameter_is_honoured() {
    let CalculationResult::DashaTree(tree) =
        run(r#""calculationKind": "dasha", "parameters": { "depth": 3 }"#).unwrap()
    else {
        panic!("expected a dasha tree");
    };
    assert_eq!(tree.depth, 3);
    assert_eq!(tree.mahadashas.len(), 9);
}

#[test]
fn default_return_is_the_next_solar_return() {
    let CalculationResult::ReturnEvent(event) =
        run(r#""calculationKind": "return", "parameters": {}"#).unwrap()
    else {
        panic!("expected a return event");
    };
    assert_eq!(event.body, Body::Sun);
    let ReturnOutcome::Found { instant, .. } = event.outcome else {
        panic!("expected a found return");
    };
    let after = instant.days_since(event.search_start);
    assert!((360.0..366.0).contains(&after), "{after}");
}

#[test]
fn muhurta_for_birth_date_is_a_friday() {
    let CalculationResult::MuhurtaWindows(w) =
        run(r#""calculationKind": "muhurta", "parameters": {}"#).unwrap()
    else {
        panic!("expected muhurta windows");
    };
    assert_eq!(w.weekday, 5);
    assert!(w.abhijit.is_some());
}

#[test]
fn errors_carry_their_category() {
    let cases = [
        (
            r#"{ "birthDate": "31/02/1990", "geoLocation": { "latitudeDeg": 0.0, "longitudeDeg": 0.0 },
                 "calculationKind": "chart", "parameters": {} }"#,
            ErrorCategory::InputValidation,
        ),
        (
            r#"{ "birthDate": "15/06/1700", "birthTime": "12:00",
                 "geoLocation": { "latitudeDeg": 0.0, "longitudeDeg": 0.0 },
                 "calculationKind": "chart", "parameters": {} }"#,
            ErrorCategory::EphemerisRange,
        ),
        (
            r#"{ "birthDate": "15/06/1990", "birthTime": "12:00",
                 "geoLocation": { "latitudeDeg": 0.0, "longitudeDeg": 0.0 },
                 "calculationKind": "dasha", "parameters": { "depth": 9 } }"#,
            ErrorCategory::InputValidation,
        ),
        (
            r#"{ "birthDate": "21/06/1990", "birthTime": "12:00",
                 "geoLocation": { "latitudeDeg": 78.2, "longitudeDeg": 15.6, "utcOffsetHours": 2.0 },
                 "calculationKind": "muhurta", "parameters": {} }"#,
            ErrorCategory::InputValidation,
        ),
        (r#"{ "calculationKind": "chart" }"#, ErrorCategory::InputValidation),
    ];
    let eph = AnalyticEphemeris::default();
    let config = KundaliConfig::default();
    for (json, category) in cases {
        let err = calculate_json(&eph, &config, json).unwrap_err();
        assert_eq!(err.category(), category, "{json}: {err}");
    }
}

#[test]
fn bad_transit_step_is_a_configuration_error() {
    let err = run(
        r#""calculationKind": "transit",
           "parameters": { "fromDate": "01/01/2020", "toDate": "01/02/2020", "stepDays": -1.0 }"#,
    )
    .unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Configuration);
}
