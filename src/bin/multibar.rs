//! multibar - progress panel model inspector.
//!
//! Evaluates a panel-options document against sample series values and
//! prints the derived presentation state as JSON. Useful for checking what
//! a panel config does to real numbers without standing up the dashboard
//! host.
//!
//! Usage:
//!   multibar -c panel.json -s cpu=42 -s mem=17
//!   multibar -c panel.json -s cpu=42 --title "Load" --max-value 200
//!   multibar -c panel.json -s cpu=42 -v     # debug logging

use clap::Parser;
use serde::Serialize;
use tracing::{Level, debug};
use tracing_subscriber::EnvFilter;

use multibar::config::PanelConfig;
use multibar::model::{Bar, ProgressModel, TitleParams};

/// Progress panel model inspector.
#[derive(Parser)]
#[command(name = "multibar", about = "Progress panel model inspector", version)]
struct Args {
    /// Path to the panel-options JSON document.
    #[arg(short, long, value_name = "FILE")]
    config: String,

    /// Series item as NAME=VALUE. Repeat for multiple segments.
    #[arg(short, long = "series", value_name = "NAME=VALUE")]
    series: Vec<String>,

    /// Panel title.
    #[arg(long, default_value = "")]
    title: String,

    /// Upper bound for aggregate progress.
    #[arg(long, default_value = "100", value_name = "VALUE")]
    max_value: f64,

    /// Increase log verbosity (-v: debug, -vv: trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors.
    #[arg(short, long)]
    quiet: bool,
}

/// The derived state exactly as the rendering layer would consume it,
/// one self-contained document per run.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DerivedState<'a> {
    title: &'a str,
    bars: &'a [Bar],
    sum_of_values: f64,
    percent_values: Vec<f64>,
    aggregated_progress: f64,
    formatted_value: String,
    title_params: TitleParams,
    opacity: &'a str,
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose, args.quiet);

    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let document = std::fs::read_to_string(&args.config)?;
    let config = PanelConfig::from_json(&document)?;

    let mut names = Vec::with_capacity(args.series.len());
    let mut values = Vec::with_capacity(args.series.len());
    for item in &args.series {
        let (name, value) = parse_series(item)?;
        names.push(name);
        values.push(value);
    }
    debug!(series = names.len(), max_value = args.max_value, "building model");

    let model = ProgressModel::new(config, args.title.clone(), names, values, args.max_value)?;

    let state = DerivedState {
        title: model.title(),
        bars: model.bars(),
        sum_of_values: model.sum_of_values(),
        percent_values: model.percent_values(),
        aggregated_progress: model.aggregated_progress(),
        formatted_value: model.formatted_value(),
        title_params: model.title_params(),
        opacity: model.opacity(),
    };
    println!("{}", serde_json::to_string_pretty(&state)?);
    Ok(())
}

/// Parses one `NAME=VALUE` series argument.
fn parse_series(raw: &str) -> Result<(String, f64), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("bad series '{}': expected NAME=VALUE", raw))?;
    let value: f64 = value
        .trim()
        .parse()
        .map_err(|_| format!("bad series '{}': value is not a number", raw))?;
    Ok((name.trim().to_string(), value))
}

/// Initializes the tracing subscriber. Default level is WARN so the JSON
/// output stays clean; -v raises to DEBUG, -vv to TRACE, -q drops to
/// errors only.
fn init_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        Level::ERROR
    } else {
        match verbose {
            0 => Level::WARN,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    };

    let filter = EnvFilter::from_default_env()
        .add_directive(format!("multibar={}", level).parse().unwrap());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
