//! Quanta command line
//!
//! Examples:
//! - `quanta "10 ohm" S` prints `0.1 S`
//! - `quanta "24.5 m/s" km/h --decimals 1` prints `88.2 km/h`
//! - `quanta "32 tempF" tempC --json`
//!
//! Environment:
//! - `RUST_LOG`: log level written to stderr (default `warn`)
//! - `QUANTA_DECIMALS`: default for `--decimals`

use std::env;
use std::process::ExitCode;

use clap::Parser;
use quanta_core::Result;
use quanta_units::Quantity;
use serde_json::json;
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Debug, Parser)]
#[command(name = "quanta")]
#[command(about = "Convert and render physical quantities", long_about = None)]
struct Cli {
    /// Quantity text (e.g., "24.5 m/s")
    #[arg(allow_hyphen_values = true)]
    quantity: String,

    /// Target units (e.g., "km/h")
    target: Option<String>,

    /// Round the scalar half-up to this many decimals
    #[arg(short, long, env = "QUANTA_DECIMALS")]
    decimals: Option<u32>,

    /// Print scalar, units, kind and base scalar as JSON
    #[arg(long)]
    json: bool,
}

fn run(cli: &Cli) -> Result<String> {
    let quantity = Quantity::parse(&cli.quantity)?;
    let converted = match &cli.target {
        Some(target) => quantity.to(target)?.into_owned(),
        None => quantity,
    };
    let rounded = match cli.decimals {
        Some(decimals) => converted.rounded(decimals)?,
        None => converted,
    };

    if cli.json {
        let report = json!({
            "scalar": rounded.scalar(),
            "units": rounded.units(),
            "kind": rounded.kind(),
            "base_scalar": rounded.base_scalar(),
        });
        return Ok(report.to_string());
    }
    Ok(rounded.format())
}

fn init_logging() {
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::WARN),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    init_logging();

    let cli = Cli::parse();
    debug!(?cli, "running");

    match run(&cli) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error[{}]: {}", e.code(), e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("quanta").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_command_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_args() {
        let parsed = cli(&["10 ohm", "S", "--decimals", "2", "--json"]);
        assert_eq!(parsed.quantity, "10 ohm");
        assert_eq!(parsed.target.as_deref(), Some("S"));
        assert_eq!(parsed.decimals, Some(2));
        assert!(parsed.json);

        let parsed = cli(&["-40 tempC", "tempF", "-d", "1"]);
        assert_eq!(parsed.quantity, "-40 tempC");
        assert_eq!(parsed.decimals, Some(1));
        assert!(!parsed.json);
    }

    #[test]
    fn test_parse_args_errors() {
        let attempts: [&[&str]; 4] = [
            &["quanta"],
            &["quanta", "1 m", "ft", "extra"],
            &["quanta", "1 m", "--decimals"],
            &["quanta", "1 m", "--decimals", "x"],
        ];
        for args in attempts {
            assert!(Cli::try_parse_from(args).is_err(), "{:?}", args);
        }
    }

    #[test]
    fn test_run() {
        assert_eq!(run(&cli(&["10 ohm", "S"])).unwrap(), "0.1 S");
        assert_eq!(run(&cli(&["24.5 m/s", "km/h", "--decimals", "1"])).unwrap(), "88.2 km/h");
    }

    #[test]
    fn test_run_json() {
        let output = run(&cli(&["32 tempF", "tempC", "--json", "--decimals", "2"])).unwrap();
        let report: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(report["scalar"], 0.0);
        assert_eq!(report["units"], "tempC");
        assert_eq!(report["kind"], "temperature");
        assert_eq!(report["base_scalar"], 273.15);
    }

    #[test]
    fn test_run_errors() {
        assert_eq!(run(&cli(&["1 m", "s"])).unwrap_err().code(), "INCOMPATIBLE_UNITS");
        assert_eq!(run(&cli(&["1 zz"])).unwrap_err().code(), "UNIT_NOT_RECOGNIZED");
    }
}
