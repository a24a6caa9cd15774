//! xform CLI - apply 3D affine transforms from the terminal
//!
//! Reads a transform request (a point plus an ordered list of translate,
//! rotate and scale operations) from a JSON file, stdin, or inline flags, and
//! prints the transformed point with its composite 4x4 matrix.
//!
//! ```sh
//! xform apply --point 1,0,0 --op translate:1,2,3 --op rotate:z:90
//! xform apply --request request.json --format text
//! echo '{"point":[1,2,3],"transformations":[]}' | xform apply -r -
//! ```

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, error};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;
use xform_ir::HealthStatus;

mod config;
mod handler;
mod render;
mod request;

use config::{Config, OutputFormat, MAX_PRECISION};

/// Exit status for a request the engine rejected.
const EXIT_REJECTED: u8 = 1;
/// Exit status for IO, config, or malformed JSON failures.
const EXIT_FAILURE: u8 = 2;

#[derive(Parser)]
#[command(name = "xform")]
#[command(about = "Compose 3D affine transforms and apply them to a point", long_about = None)]
#[command(version)]
struct Cli {
    /// TOML config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
    /// Log filter (overrides RUST_LOG), e.g. `debug` or `xform=info`
    #[arg(long, global = true)]
    log_level: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply a list of operations to a point
    Apply {
        #[command(flatten)]
        input: RequestArgs,
        /// Output format (overrides config)
        #[arg(short, long)]
        format: Option<OutputFormat>,
        /// Decimals in text output (overrides config)
        #[arg(long)]
        precision: Option<usize>,
        /// Print JSON on a single line
        #[arg(long)]
        compact: bool,
    },
    /// Check a request without applying it
    Validate {
        #[command(flatten)]
        input: RequestArgs,
    },
    /// Report that the tool is able to answer requests
    Health,
}

#[derive(Args)]
struct RequestArgs {
    /// JSON request file, or `-` for stdin
    #[arg(short, long, conflicts_with_all = ["point", "ops"])]
    request: Option<PathBuf>,
    /// Point as `x,y,z`
    #[arg(short, long, allow_hyphen_values = true)]
    point: Option<String>,
    /// Operation (repeatable, applied in order):
    /// `translate:dx,dy,dz`, `rotate:x|y|z:degrees`, `scale:sx,sy,sz`
    #[arg(short = 'o', long = "op", allow_hyphen_values = true)]
    ops: Vec<String>,
}

impl RequestArgs {
    fn load(&self) -> Result<xform_ir::TransformRequest> {
        match &self.request {
            Some(path) => request::read_request(path),
            None => Ok(request::build_request(self.point.as_deref(), &self.ops)),
        }
    }
}

fn init_logging(level: Option<&str>) {
    let filter = match level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.log_level.as_deref());

    match run(cli) {
        Ok(outcome) => outcome.exit_code(),
        Err(err) => {
            error!("{err:#}");
            eprintln!("error: {err:#}");
            ExitCode::from(EXIT_FAILURE)
        }
    }
}

/// Whether a command's input was accepted. IO and config failures are errors
/// from [`run`] instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Accepted,
    Rejected,
}

impl Outcome {
    fn from_accepted(accepted: bool) -> Self {
        if accepted {
            Self::Accepted
        } else {
            Self::Rejected
        }
    }

    fn exit_code(self) -> ExitCode {
        match self {
            Self::Accepted => ExitCode::SUCCESS,
            Self::Rejected => ExitCode::from(EXIT_REJECTED),
        }
    }
}

fn run(cli: Cli) -> Result<Outcome> {
    let mut config = match &cli.config {
        Some(path) => {
            let config = Config::load(path)?;
            debug!(path = %path.display(), "loaded config file");
            config
        }
        None => Config::default(),
    };

    match cli.command {
        Commands::Apply {
            input,
            format,
            precision,
            compact,
        } => {
            if let Some(format) = format {
                config.output.format = format;
            }
            if let Some(precision) = precision {
                config.output.precision = precision;
            }
            if compact {
                config.output.pretty = false;
            }
            config
                .check()
                .with_context(|| format!("--precision must be at most {MAX_PRECISION}"))?;

            let request = input.load()?;
            let outcome = handler::handle(&request, &config.engine);
            let rendered =
                render::render(&outcome, &config.output).context("failed to encode response")?;
            println!("{rendered}");
            Ok(Outcome::from_accepted(outcome.is_ok()))
        }
        Commands::Validate { input } => {
            let request = input.load()?;
            let checked = xform_engine::validate::point_from_value(&request.point)
                .and_then(|_| xform_engine::validate::parse_operations(&request.transformations));
            match checked {
                Ok(operations) => {
                    println!("ok: {} operation(s)", operations.len());
                    Ok(Outcome::Accepted)
                }
                Err(err) => {
                    println!("error: {err}");
                    Ok(Outcome::Rejected)
                }
            }
        }
        Commands::Health => {
            let status = serde_json::to_string_pretty(&HealthStatus::healthy())?;
            println!("{status}");
            Ok(Outcome::Accepted)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_args(args: &[&str]) -> Result<Outcome> {
        let cli = Cli::try_parse_from(std::iter::once("xform").chain(args.iter().copied()))
            .expect("arguments parse");
        run(cli)
    }

    #[test]
    fn apply_accepts_valid_input() {
        let outcome = run_args(&["apply", "--point", "1,0,0", "--op", "rotate:z:90"]).unwrap();
        assert_eq!(outcome, Outcome::Accepted);

        let outcome = run_args(&[
            "apply",
            "-p",
            "-1,2,3",
            "-o",
            "scale:0,1,1",
            "--format",
            "text",
            "--precision",
            "2",
        ])
        .unwrap();
        assert_eq!(outcome, Outcome::Accepted);
    }

    #[test]
    fn apply_rejects_invalid_operation() {
        let outcome = run_args(&["apply", "--point", "0,0,0", "--op", "shear:1,0,0"]).unwrap();
        assert_eq!(outcome, Outcome::Rejected);

        let outcome = run_args(&["apply", "--op", "translate:1,0,0"]).unwrap();
        assert_eq!(outcome, Outcome::Rejected);
    }

    #[test]
    fn unreadable_input_is_an_error() {
        let err = run_args(&["apply", "--request", "/nonexistent/xform/request.json"]).unwrap_err();
        assert!(format!("{err:#}").contains("failed to read request"));

        let err = run_args(&["validate", "-r", "/nonexistent/xform/request.json"]).unwrap_err();
        assert!(format!("{err:#}").contains("failed to read request"));
    }

    #[test]
    fn out_of_range_precision_is_an_error() {
        let err = run_args(&["apply", "-p", "0,0,0", "--precision", "40"]).unwrap_err();
        assert!(format!("{err:#}").contains("--precision must be at most 17"));
    }

    #[test]
    fn missing_config_is_an_error() {
        let err = run_args(&["health", "--config", "/nonexistent/xform.toml"]).unwrap_err();
        assert!(format!("{err:#}").contains("failed to read config file"));
    }

    #[test]
    fn validate_reports_without_applying() {
        let outcome = run_args(&["validate", "-p", "1,2,3", "-o", "scale:2,2,2"]).unwrap();
        assert_eq!(outcome, Outcome::Accepted);

        let outcome = run_args(&["validate", "-p", "1,2,3", "-o", "rotate:Z:90"]).unwrap();
        assert_eq!(outcome, Outcome::Rejected);
    }

    #[test]
    fn health_is_accepted() {
        assert_eq!(run_args(&["health"]).unwrap(), Outcome::Accepted);
    }

    #[test]
    fn outcome_follows_engine_result() {
        assert_eq!(Outcome::from_accepted(true), Outcome::Accepted);
        assert_eq!(Outcome::from_accepted(false), Outcome::Rejected);
    }
}
