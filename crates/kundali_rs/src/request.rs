//! The calculation-request contract.
//!
//! A request names the birth data once and selects the calculation with a
//! `calculationKind` tag; kind-specific options travel in `parameters`:
//!
//! ```json
//! {
//!   "birthDate": "15/06/1990",
//!   "birthTime": "14:30",
//!   "geoLocation": { "latitudeDeg": 19.076, "longitudeDeg": 72.877, "utcOffsetHours": 5.5 },
//!   "calculationKind": "dasha",
//!   "parameters": { "depth": 3 }
//! }
//! ```
//!
//! `parameters` may be `{}`; every field in it is optional unless noted.

use kundali_search::{ReturnEvent, TransitEvent};
use kundali_time::GeoLocation;
use kundali_vedic_base::{
    AyanamshaSystem, BhavaSystem, Chart, DashaTree, Graha, MuhurtaWindows, StrengthScore,
    SynastryReport,
};
use serde::{Deserialize, Serialize};

/// Birth data: date, optional time and place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BirthData {
    /// `DD/MM/YYYY` or `YYYY-MM-DD`.
    pub birth_date: String,
    /// `HH:MM[:SS]` local time. Absent means the configured default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_time: Option<String>,
    pub geo_location: GeoLocation,
}

/// One calculation over one birth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationRequest {
    #[serde(flatten)]
    pub birth: BirthData,
    #[serde(flatten)]
    pub calculation: Calculation,
}

/// Per-request overrides of the configured frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChartParameters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ayanamsha: Option<AyanamshaSystem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub house_system: Option<BhavaSystem>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashaParameters {
    #[serde(flatten)]
    pub chart: ChartParameters,
    /// Levels to generate, 1 to 5.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depth: Option<u8>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReturnParameters {
    #[serde(flatten)]
    pub chart: ChartParameters,
    /// Returning graha; the Sun when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub graha: Option<Graha>,
    /// Local date (at the birth location's offset) to search from, at
    /// midnight. Absent means one day after birth.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitParameters {
    #[serde(flatten)]
    pub chart: ChartParameters,
    /// Required. Local date at the birth location's offset, from midnight.
    pub from_date: String,
    /// Required. Local date at the birth location's offset, to midnight.
    pub to_date: String,
    /// Moving grahas to scan; all nine when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grahas: Option<Vec<Graha>>,
    /// Overrides the configured sampling step, days.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step_days: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SynastryParameters {
    #[serde(flatten)]
    pub chart: ChartParameters,
    /// Required. The second person.
    pub partner: BirthData,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MuhurtaParameters {
    /// Civil date to compute; the birth date when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

/// The selected calculation and its parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "calculationKind",
    content = "parameters",
    rename_all = "camelCase"
)]
pub enum Calculation {
    Chart(ChartParameters),
    Dasha(DashaParameters),
    Shadbala(ChartParameters),
    Return(ReturnParameters),
    Transit(TransitParameters),
    Synastry(SynastryParameters),
    Muhurta(MuhurtaParameters),
}

impl Calculation {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Chart(_) => "chart",
            Self::Dasha(_) => "dasha",
            Self::Shadbala(_) => "shadbala",
            Self::Return(_) => "return",
            Self::Transit(_) => "transit",
            Self::Synastry(_) => "synastry",
            Self::Muhurta(_) => "muhurta",
        }
    }
}

/// Result of one calculation, tagged with its kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "result", rename_all = "camelCase")]
pub enum CalculationResult {
    Chart(Box<Chart>),
    DashaTree(DashaTree),
    StrengthScores(Vec<StrengthScore>),
    ReturnEvent(ReturnEvent),
    TransitEvents(Vec<TransitEvent>),
    CompositeChart(SynastryReport),
    MuhurtaWindows(MuhurtaWindows),
}

#[cfg(test)]
mod tests {
    use super::*;

    const MUMBAI: &str = r#"
        "birthDate": "15/06/1990",
        "birthTime": "14:30",
        "geoLocation": { "latitudeDeg": 19.076, "longitudeDeg": 72.877, "utcOffsetHours": 5.5 }
    "#;

    fn parse(tail: &str) -> CalculationRequest {
        serde_json::from_str(&format!("{{{MUMBAI}, {tail}}}")).unwrap()
    }

    #[test]
    fn chart_request_with_empty_parameters() {
        let req = parse(r#""calculationKind": "chart", "parameters": {}"#);
        assert_eq!(req.birth.birth_time.as_deref(), Some("14:30"));
        assert_eq!(req.calculation, Calculation::Chart(ChartParameters::default()));
    }

    #[test]
    fn dasha_request_reads_depth_and_overrides() {
        let req = parse(
            r#""calculationKind": "dasha", "parameters": { "depth": 3, "ayanamsha": "raman" }"#,
        );
        let Calculation::Dasha(p) = req.calculation else {
            panic!("expected dasha");
        };
        assert_eq!(p.depth, Some(3));
        assert_eq!(p.chart.ayanamsha, Some(AyanamshaSystem::Raman));
    }

    #[test]
    fn transit_request_requires_range() {
        let tail = r#""calculationKind": "transit", "parameters": { "fromDate": "01/01/2020" }"#;
        let err = serde_json::from_str::<CalculationRequest>(&format!("{{{MUMBAI}, {tail}}}"));
        assert!(err.is_err());
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let tail = r#""calculationKind": "horoscope", "parameters": {}"#;
        let err = serde_json::from_str::<CalculationRequest>(&format!("{{{MUMBAI}, {tail}}}"));
        assert!(err.is_err());
    }

    #[test]
    fn request_serializes_with_tag() {
        let req = parse(r#""calculationKind": "muhurta", "parameters": {}"#);
        let json = serde_json::to_string(&req).unwrap();
        assert!(json.contains("\"calculationKind\":\"muhurta\""), "{json}");
        assert_eq!(req.calculation.kind(), "muhurta");
    }
}
