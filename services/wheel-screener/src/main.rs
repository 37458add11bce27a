#![warn(clippy::all)]
#![allow(clippy::pedantic)]

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::{error, info};
use wheel_common::logging::init_logging;
use wheel_common::{Config, Error, Result, Validate};
use wheel_screener::{load_metrics, ReportView, ScoringConfig, ScoringEngine, ScreenReport};

/// Rule-based quality screener for wheel-strategy candidates.
#[derive(Parser, Debug)]
#[command(name = "wheel-screener")]
#[command(version)]
#[command(about = "Score equities for a conservative options-selling strategy", long_about = None)]
struct Cli {
    /// Configuration file (default: ~/.wheel-screener/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Score a JSON file of metric records
    Score {
        /// JSON array of metric records
        #[arg(short, long)]
        input: PathBuf,

        /// Pass threshold (-3 to 16)
        #[arg(short, long)]
        threshold: Option<f64>,

        /// Price ceiling for the budget view
        #[arg(long)]
        budget: Option<f64>,

        /// View to print (all, passing, budget, sector)
        #[arg(long, default_value = "all", value_parser = parse_view)]
        view: ReportView,

        /// Cap the number of rows printed (default: every row)
        #[arg(long)]
        top: Option<usize>,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Print the effective configuration
    Config,
}

fn parse_view(s: &str) -> std::result::Result<ReportView, String> {
    s.parse()
}

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "Run failed");
            eprintln!("Error: {err}");
            ExitCode::from(u8::try_from(err.exit_code()).unwrap_or(1))
        }
    }
}

fn config_error(err: anyhow::Error) -> Error {
    Error::Config(format!("{err:#}"))
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => {
            let mut config = Config::load_from(path).map_err(config_error)?;
            config.apply_env_overrides().map_err(config_error)?;
            Ok(config)
        }
        None => Config::load_with_env().map_err(config_error),
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Score {
            input,
            threshold,
            budget,
            view,
            top,
            pretty,
        } => {
            if let Some(threshold) = threshold {
                config.scoring.pass_threshold = threshold;
            }
            if let Some(budget) = budget {
                config.report.budget_price_limit = budget;
            }
            config.validate()?;
            init_logging(&config.observability);

            let engine = ScoringEngine::new(ScoringConfig::from(&config.scoring))?;
            let records = load_metrics(&input)?;
            let report = ScreenReport::new(engine.score_batch(&records), engine.threshold());

            let summary = report.summary(config.report.budget_price_limit);
            info!(run_id = %report.id, %summary, "Screening complete");
            for result in report.top(config.report.top_n) {
                info!(
                    ticker = result.ticker(),
                    total = result.total_score(),
                    passing = result.is_passing(),
                    "Top candidate"
                );
            }

            let output = report.render(view, top, config.report.budget_price_limit)?;
            print_json(&output, pretty)
        }
        Commands::Config => {
            config.validate()?;
            print_json(&serde_json::to_value(&config)?, true)
        }
    }
}

fn print_json(value: &serde_json::Value, pretty: bool) -> Result<()> {
    let text = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{text}");
    Ok(())
}
