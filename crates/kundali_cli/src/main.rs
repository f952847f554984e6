use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use kundali_rs::{
    ALL_GRAHAS, AnalyticEphemeris, AyanamshaSystem, BhavaSystem, BirthData, Calculation,
    CalculationRequest, CalculationResult, ChartParameters, DashaNode, DashaParameters,
    GeoLocation, Graha, Instant, KundaliConfig, MuhurtaParameters, ReturnOutcome,
    ReturnParameters, SynastryParameters, TimePrecision, TransitParameters, calculate,
    deg_to_dms,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "kundali", about = "Sidereal chart, dasha and muhurta calculator")]
struct Cli {
    /// Configuration file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Print the result as JSON
    #[arg(long, global = true)]
    json: bool,
    /// Log more: -v debug, -vv trace (RUST_LOG overrides)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Clone)]
struct BirthArgs {
    /// Date (DD/MM/YYYY or YYYY-MM-DD)
    #[arg(long)]
    date: String,
    /// Local time (HH:MM[:SS]); the configured default when omitted
    #[arg(long)]
    time: Option<String>,
    /// Latitude in degrees, north positive
    #[arg(long, allow_hyphen_values = true)]
    lat: f64,
    /// Longitude in degrees, east positive
    #[arg(long, allow_hyphen_values = true)]
    lon: f64,
    /// UTC offset in hours
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    tz: f64,
}

impl BirthArgs {
    fn birth_data(&self) -> BirthData {
        BirthData {
            birth_date: self.date.clone(),
            birth_time: self.time.clone(),
            geo_location: GeoLocation::new(self.lat, self.lon, self.tz),
        }
    }
}

#[derive(Args, Clone, Copy)]
struct FrameArgs {
    /// Ayanamsha (lahiri, raman, kp, fagan-bradley, yukteshwar)
    #[arg(long)]
    ayanamsha: Option<AyanamshaSystem>,
    /// House system (sripati, equal, whole-sign, placidus)
    #[arg(long)]
    houses: Option<BhavaSystem>,
}

impl FrameArgs {
    fn parameters(self) -> ChartParameters {
        ChartParameters {
            ayanamsha: self.ayanamsha,
            house_system: self.houses,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Sidereal birth chart
    Chart {
        #[command(flatten)]
        birth: BirthArgs,
        #[command(flatten)]
        frame: FrameArgs,
    },
    /// Vimshottari dasha periods
    Dasha {
        #[command(flatten)]
        birth: BirthArgs,
        /// Levels, 1 (Mahadasha) to 5
        #[arg(long)]
        depth: Option<u8>,
    },
    /// Shadbala strength of the seven grahas
    Shadbala {
        #[command(flatten)]
        birth: BirthArgs,
        #[command(flatten)]
        frame: FrameArgs,
    },
    /// Next return of a graha to its natal longitude
    Return {
        #[command(flatten)]
        birth: BirthArgs,
        /// Graha (Surya/Sun, Chandra/Moon, ...)
        #[arg(long, default_value = "Surya", value_parser = parse_graha)]
        graha: Graha,
        /// Search from this local date; one day after birth when omitted
        #[arg(long)]
        from: Option<String>,
    },
    /// Transit aspects to the natal chart over a date range
    Transit {
        #[command(flatten)]
        birth: BirthArgs,
        /// First local date of the range
        #[arg(long)]
        from: String,
        /// Last local date of the range
        #[arg(long)]
        to: String,
        /// Moving grahas, comma separated; all nine when omitted
        #[arg(long, value_delimiter = ',', value_parser = parse_graha)]
        grahas: Vec<Graha>,
        /// Sampling step in days
        #[arg(long)]
        step: Option<f64>,
    },
    /// Cross aspects and composite chart of two births
    Synastry {
        #[command(flatten)]
        birth: BirthArgs,
        /// Partner's date
        #[arg(long)]
        partner_date: String,
        /// Partner's local time
        #[arg(long)]
        partner_time: Option<String>,
        #[arg(long, allow_hyphen_values = true)]
        partner_lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        partner_lon: f64,
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        partner_tz: f64,
    },
    /// Rahukalam, Gulikakalam, Yamagandam and Abhijit for a date
    Muhurta {
        #[command(flatten)]
        birth: BirthArgs,
    },
    /// Run a JSON calculation request from a file
    Request {
        /// Path to the request document
        file: PathBuf,
    },
}

fn parse_graha(s: &str) -> Result<Graha, String> {
    ALL_GRAHAS
        .into_iter()
        .find(|g| g.name().eq_ignore_ascii_case(s) || g.english_name().eq_ignore_ascii_case(s))
        .ok_or_else(|| {
            format!("unknown graha '{s}' (Surya, Chandra, Mangal, Buddh, Guru, Shukra, Shani, Rahu, Ketu)")
        })
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn build_request(command: Commands) -> Result<CalculationRequest> {
    let (birth, calculation) = match command {
        Commands::Chart { birth, frame } => {
            (birth.birth_data(), Calculation::Chart(frame.parameters()))
        }
        Commands::Dasha { birth, depth } => (
            birth.birth_data(),
            Calculation::Dasha(DashaParameters {
                depth,
                ..Default::default()
            }),
        ),
        Commands::Shadbala { birth, frame } => {
            (birth.birth_data(), Calculation::Shadbala(frame.parameters()))
        }
        Commands::Return { birth, graha, from } => (
            birth.birth_data(),
            Calculation::Return(ReturnParameters {
                graha: Some(graha),
                from_date: from,
                ..Default::default()
            }),
        ),
        Commands::Transit {
            birth,
            from,
            to,
            grahas,
            step,
        } => (
            birth.birth_data(),
            Calculation::Transit(TransitParameters {
                chart: ChartParameters::default(),
                from_date: from,
                to_date: to,
                grahas: (!grahas.is_empty()).then_some(grahas),
                step_days: step,
            }),
        ),
        Commands::Synastry {
            birth,
            partner_date,
            partner_time,
            partner_lat,
            partner_lon,
            partner_tz,
        } => (
            birth.birth_data(),
            Calculation::Synastry(SynastryParameters {
                chart: ChartParameters::default(),
                partner: BirthData {
                    birth_date: partner_date,
                    birth_time: partner_time,
                    geo_location: GeoLocation::new(partner_lat, partner_lon, partner_tz),
                },
            }),
        ),
        Commands::Muhurta { birth } => (
            birth.birth_data(),
            Calculation::Muhurta(MuhurtaParameters::default()),
        ),
        Commands::Request { file } => {
            let text = std::fs::read_to_string(&file)
                .with_context(|| format!("reading {}", file.display()))?;
            return serde_json::from_str(&text)
                .with_context(|| format!("parsing request {}", file.display()));
        }
    };
    Ok(CalculationRequest { birth, calculation })
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match &cli.config {
        Some(path) => KundaliConfig::load(path)
            .with_context(|| format!("loading configuration {}", path.display()))?,
        None => KundaliConfig::default(),
    };
    let request = build_request(cli.command)?;
    let tz = request.birth.geo_location.utc_offset_hours;

    let eph = AnalyticEphemeris::default();
    let result = calculate(&eph, &config, &request).map_err(|e| {
        let category = e.category();
        anyhow::Error::new(e).context(format!("{category:?}"))
    })?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_result(&result, tz);
    }
    Ok(())
}

fn fmt_local(t: Instant, tz: f64) -> String {
    let c = t.to_local(tz);
    format!(
        "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
        c.year,
        c.month,
        c.day,
        c.hour,
        c.minute,
        c.second.floor() as u32
    )
}

/// Position within the sign as D°MM'SS.S".
fn fmt_dms(lon: f64) -> String {
    // Round to the printed tenth of an arcsecond first so 59.96" carries.
    let in_sign = (lon.rem_euclid(30.0) * 36_000.0).round() / 36_000.0;
    let dms = deg_to_dms(in_sign);
    format!("{:2}°{:02}'{:04.1}\"", dms.degrees, dms.minutes, dms.seconds)
}

fn print_result(result: &CalculationResult, tz: f64) {
    match result {
        CalculationResult::Chart(chart) => {
            println!("Instant:   {} (local)", fmt_local(chart.instant, tz));
            if chart.time_precision == TimePrecision::Approximate {
                println!("           birth time approximate");
            }
            println!("Ayanamsha: {} {:.4} deg", chart.ayanamsha, chart.ayanamsha_deg);
            println!("Houses:    {}", chart.houses.system);
            println!(
                "Lagna:     {} {}",
                chart.lagna.rashi.name(),
                fmt_dms(chart.lagna_deg())
            );
            println!();
            for p in &chart.grahas {
                println!(
                    "{:<8} {:<10} {}  {:<18} pada {}  house {:>2}{}",
                    p.graha.name(),
                    p.rashi.rashi.name(),
                    fmt_dms(p.sidereal_longitude_deg),
                    p.nakshatra.nakshatra.name(),
                    p.nakshatra.pada,
                    p.house,
                    if p.retrograde { "  (R)" } else { "" }
                );
            }
        }
        CalculationResult::DashaTree(tree) => {
            println!(
                "Moon nakshatra {} ({:.1}% elapsed)",
                tree.moon_nakshatra.name(),
                tree.elapsed_fraction * 100.0
            );
            for node in &tree.mahadashas {
                print_dasha_node(node, 0, tz);
            }
        }
        CalculationResult::StrengthScores(scores) => {
            println!(
                "{:<8} {:>8} {:>8} {:>8} {:>8} {:>8} {:>8} {:>9} {:>6}  class",
                "graha", "sthana", "dig", "kala", "cheshta", "naisarg", "drik", "total", "%"
            );
            for s in scores {
                let c = &s.components;
                println!(
                    "{:<8} {:>8.2} {:>8.2} {:>8.2} {:>8.2} {:>8.2} {:>8.2} {:>9.2} {:>6.1}  {:?}",
                    s.graha.name(),
                    c.positional,
                    c.directional,
                    c.temporal,
                    c.motional,
                    c.natural,
                    c.aspectual,
                    s.composite,
                    s.percentage,
                    s.class
                );
            }
        }
        CalculationResult::ReturnEvent(event) => match event.outcome {
            ReturnOutcome::Found {
                instant,
                delta_deg,
                iterations,
            } => println!(
                "{} returns to {:.4} deg at {} (delta {:.2e} deg, {} iterations)",
                event.body,
                event.target_longitude_deg,
                fmt_local(instant, tz),
                delta_deg,
                iterations
            ),
            ReturnOutcome::NotFound { reason, iterations } => println!(
                "{} return not found: {:?} after {} iterations",
                event.body, reason, iterations
            ),
        },
        CalculationResult::TransitEvents(events) => {
            if events.is_empty() {
                println!("No transit aspects in range");
            }
            for e in events {
                let window = match (e.entry, e.exit) {
                    (Some(a), Some(b)) => format!("{} .. {}", fmt_local(a, tz), fmt_local(b, tz)),
                    (Some(a), None) => format!("{} .. (open)", fmt_local(a, tz)),
                    (None, Some(b)) => format!("(open) .. {}", fmt_local(b, tz)),
                    (None, None) => "(whole range)".to_string(),
                };
                println!(
                    "{}  {:<8} {:<12} natal {:<8} orb {:.3}{}  [{}]",
                    fmt_local(e.peak, tz),
                    e.transiting.name(),
                    e.aspect,
                    e.natal.name(),
                    e.orb_at_peak_deg,
                    if e.perfected { " exact" } else { "" },
                    window
                );
            }
        }
        CalculationResult::CompositeChart(report) => {
            let c = &report.composite;
            println!(
                "Composite lagna: {} {}",
                c.lagna.rashi.name(),
                fmt_dms(c.lagna_deg)
            );
            for p in &c.grahas {
                println!(
                    "{:<8} {:<10} {}",
                    p.graha.name(),
                    p.rashi.rashi.name(),
                    fmt_dms(p.longitude_deg)
                );
            }
            println!();
            println!("Cross aspects:");
            for a in &report.cross_aspects {
                println!(
                    "{:<8} {:<12} {:<8} orb {:.2}",
                    a.first.name(),
                    a.aspect,
                    a.second.name(),
                    a.orb_deg
                );
            }
        }
        CalculationResult::MuhurtaWindows(w) => {
            println!("Sunrise:    {}", fmt_local(w.sunrise, tz));
            println!("Sunset:     {}", fmt_local(w.sunset, tz));
            println!("Solar noon: {}", fmt_local(w.solar_noon, tz));
            for win in w.windows() {
                println!(
                    "{:<16} {} .. {}{}",
                    win.kind.name(),
                    fmt_local(win.start, tz),
                    fmt_local(win.end, tz),
                    if win.kind.is_auspicious() { "  (auspicious)" } else { "" }
                );
            }
            if w.abhijit.is_none() {
                println!("Abhijit Muhurta is not observed on Wednesday");
            }
        }
    }
}

fn print_dasha_node(node: &DashaNode, indent: usize, tz: f64) {
    println!(
        "{:indent$}{:<8} {} .. {}",
        "",
        node.lord.name(),
        fmt_local(node.start, tz),
        fmt_local(node.end, tz),
        indent = indent * 2
    );
    for child in &node.children {
        print_dasha_node(child, indent + 1, tz);
    }
}
