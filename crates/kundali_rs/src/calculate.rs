//! Request dispatch: turn a [`CalculationRequest`] into a
//! [`CalculationResult`] using one ephemeris and one configuration.

use chrono::Datelike;
use kundali_core::Ephemeris;
use kundali_search::{TransitScanner, planetary_return};
use kundali_time::{
    BirthMoment, GeoLocation, Instant, ResolverConfig, parse_date, resolve_birth_moment,
};
use kundali_vedic_base::{
    ALL_GRAHAS, Chart, ChartBuilder, ChartConfig, DashaTreeBuilder, Graha, ShadbalaScorer,
    SynastryComposer, muhurta_for_date,
};
use tracing::debug;

use crate::config::KundaliConfig;
use crate::error::KundaliError;
use crate::request::{
    BirthData, Calculation, CalculationRequest, CalculationResult, ChartParameters,
    DashaParameters, MuhurtaParameters, ReturnParameters, SynastryParameters, TransitParameters,
};

/// Resolve birth data with the configured default time.
pub fn resolve_birth(
    birth: &BirthData,
    config: &KundaliConfig,
) -> Result<BirthMoment, KundaliError> {
    Ok(resolve_birth_moment(
        &birth.birth_date,
        birth.birth_time.as_deref(),
        &birth.geo_location,
        &config.resolver_config()?,
    )?)
}

/// Build the chart for birth data, applying per-request overrides.
pub fn build_chart(
    ephemeris: &dyn Ephemeris,
    birth: &BirthData,
    config: &KundaliConfig,
    overrides: &ChartParameters,
) -> Result<Chart, KundaliError> {
    let moment = resolve_birth(birth, config)?;
    let chart_config = ChartConfig {
        ayanamsha: overrides.ayanamsha.unwrap_or(config.ayanamsha),
        house_system: overrides.house_system.unwrap_or(config.house_system),
    };
    Ok(ChartBuilder::new(ephemeris, chart_config).build_for_birth(&moment)?)
}

/// Local midnight of a civil date at a location's UTC offset.
fn local_midnight(date: &str, location: &GeoLocation) -> Result<Instant, KundaliError> {
    let moment = resolve_birth_moment(date, Some("00:00"), location, &ResolverConfig::default())?;
    Ok(moment.instant)
}

/// Run one request.
pub fn calculate(
    ephemeris: &dyn Ephemeris,
    config: &KundaliConfig,
    request: &CalculationRequest,
) -> Result<CalculationResult, KundaliError> {
    debug!(kind = request.calculation.kind(), "calculation request");
    let birth = &request.birth;
    let result = match &request.calculation {
        Calculation::Chart(p) => {
            CalculationResult::Chart(Box::new(build_chart(ephemeris, birth, config, p)?))
        }
        Calculation::Dasha(p) => dasha(ephemeris, birth, config, p)?,
        Calculation::Shadbala(p) => {
            let chart = build_chart(ephemeris, birth, config, p)?;
            CalculationResult::StrengthScores(ShadbalaScorer::default().score(&chart))
        }
        Calculation::Return(p) => planetary(ephemeris, birth, config, p)?,
        Calculation::Transit(p) => transits(ephemeris, birth, config, p)?,
        Calculation::Synastry(p) => synastry(ephemeris, birth, config, p)?,
        Calculation::Muhurta(p) => muhurta(ephemeris, birth, p)?,
    };
    Ok(result)
}

/// Parse a JSON request, run it and serialize the result.
pub fn calculate_json(
    ephemeris: &dyn Ephemeris,
    config: &KundaliConfig,
    request: &str,
) -> Result<String, KundaliError> {
    let request: CalculationRequest = serde_json::from_str(request)?;
    let result = calculate(ephemeris, config, &request)?;
    serde_json::to_string(&result).map_err(|e| KundaliError::Request(e.to_string()))
}

fn dasha(
    ephemeris: &dyn Ephemeris,
    birth: &BirthData,
    config: &KundaliConfig,
    p: &DashaParameters,
) -> Result<CalculationResult, KundaliError> {
    let chart = build_chart(ephemeris, birth, config, &p.chart)?;
    let builder = DashaTreeBuilder::new(p.depth.unwrap_or(config.dasha_depth))?;
    let tree = builder.build(chart.longitude(Graha::Chandra), chart.instant)?;
    Ok(CalculationResult::DashaTree(tree))
}

fn planetary(
    ephemeris: &dyn Ephemeris,
    birth: &BirthData,
    config: &KundaliConfig,
    p: &ReturnParameters,
) -> Result<CalculationResult, KundaliError> {
    let chart = build_chart(ephemeris, birth, config, &p.chart)?;
    let from = match &p.from_date {
        Some(date) => local_midnight(date, &birth.geo_location)?,
        None => chart.instant.add_days(1.0),
    };
    let graha = p.graha.unwrap_or(Graha::Surya);
    let event = planetary_return(ephemeris, &chart, graha, from, config.return_config())?;
    Ok(CalculationResult::ReturnEvent(event))
}

fn transits(
    ephemeris: &dyn Ephemeris,
    birth: &BirthData,
    config: &KundaliConfig,
    p: &TransitParameters,
) -> Result<CalculationResult, KundaliError> {
    let chart = build_chart(ephemeris, birth, config, &p.chart)?;
    let from = local_midnight(&p.from_date, &birth.geo_location)?;
    let to = local_midnight(&p.to_date, &birth.geo_location)?;
    let mut transit_config = config.transit_config();
    if let Some(step) = p.step_days {
        transit_config.step_days = step;
    }
    let grahas = p.grahas.clone().unwrap_or_else(|| ALL_GRAHAS.to_vec());
    let scanner = TransitScanner::new(ephemeris, config.aspect_table()?, transit_config)?;
    Ok(CalculationResult::TransitEvents(
        scanner.scan(&chart, &grahas, from, to)?,
    ))
}

fn synastry(
    ephemeris: &dyn Ephemeris,
    birth: &BirthData,
    config: &KundaliConfig,
    p: &SynastryParameters,
) -> Result<CalculationResult, KundaliError> {
    let first = build_chart(ephemeris, birth, config, &p.chart)?;
    let second = build_chart(ephemeris, &p.partner, config, &p.chart)?;
    let composer = SynastryComposer::new(config.aspect_table()?);
    Ok(CalculationResult::CompositeChart(
        composer.compare(&first, &second),
    ))
}

fn muhurta(
    ephemeris: &dyn Ephemeris,
    birth: &BirthData,
    p: &MuhurtaParameters,
) -> Result<CalculationResult, KundaliError> {
    birth.geo_location.validate()?;
    let date = parse_date(p.date.as_deref().unwrap_or(&birth.birth_date))?;
    let windows = muhurta_for_date(
        ephemeris,
        &birth.geo_location,
        date.year(),
        date.month(),
        date.day(),
    )?;
    Ok(CalculationResult::MuhurtaWindows(windows))
}
