//! Swipe - headless driver for the bottom sheet core
//!
//! - `swipe run` replays a JSON scenario against a model page and reports
//! - `swipe resolve` prints the resting offsets for a layout
//! - `swipe init` writes a default swipe.toml

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use swipe_app::{run_loaded_scenario, HeadlessScenario, RunOutcome};
use swipe_core::{HeightResolver, Measurement, SheetState};
use tracing_subscriber::EnvFilter;

mod config;

use config::{SwipeConfig, CONFIG_FILE};

/// Swipe - bottom sheet state and gesture diagnostics
#[derive(Parser)]
#[command(name = "swipe", version)]
#[command(about = "Drive and inspect a three-state bottom sheet headlessly", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (defaults to ./swipe.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// More logging (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a JSON scenario
    Run {
        /// Scenario file
        scenario: PathBuf,

        /// Write the JSON report to this path
        #[arg(short, long)]
        report: Option<PathBuf>,

        /// Print the JSON report to stdout
        #[arg(long)]
        json: bool,
    },

    /// Print resting offsets for a layout
    Resolve {
        /// Viewport height available to the sheet
        #[arg(long)]
        viewport: f32,

        /// Header height
        #[arg(long, default_value_t = 0.0)]
        header: f32,

        /// Content height
        #[arg(long, default_value_t = 0.0)]
        content: f32,

        /// Only this state (hidden, half or full)
        #[arg(long)]
        state: Option<SheetState>,
    },

    /// Write a default swipe.toml
    Init {
        /// Target file or directory
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Run {
            scenario,
            report,
            json,
        } => cmd_run(cli.config.as_deref(), &scenario, report.as_deref(), json),
        Commands::Resolve {
            viewport,
            header,
            content,
            state,
        } => {
            let config = SwipeConfig::discover(cli.config.as_deref())?;
            cmd_resolve(&config, Measurement::new(viewport, header, content), state);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Init { path, force } => {
            cmd_init(&path, force)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn cmd_run(
    config_path: Option<&Path>,
    scenario_path: &Path,
    report_path: Option<&Path>,
    json: bool,
) -> Result<ExitCode> {
    let config = SwipeConfig::discover(config_path)?;
    let scenario = HeadlessScenario::from_path(scenario_path)?;
    let outcome = run_loaded_scenario(&scenario, config.run_settings())
        .with_context(|| format!("Failed to run {}", scenario_path.display()))?;
    let report = outcome.report();

    if let Some(path) = report_path {
        report.write_to_path(path)?;
        tracing::info!("report written to {}", path.display());
    }
    if json {
        report.write_to_writer(&mut std::io::stdout().lock())?;
    }

    match &outcome {
        RunOutcome::Passed { report } => {
            if !json {
                println!(
                    "passed: {} frames, {} ms, final state {} at {:.1}",
                    report.elapsed_frames,
                    report.elapsed_ms,
                    report.final_state,
                    report.final_offset
                );
            }
            Ok(ExitCode::SUCCESS)
        }
        RunOutcome::Failed { report } => {
            if !json {
                println!(
                    "failed at step {}: {} ({})",
                    report
                        .failed_step_index
                        .map(|i| i.to_string())
                        .unwrap_or_else(|| "?".to_string()),
                    report.message.as_deref().unwrap_or("no message"),
                    report.assertion.as_deref().unwrap_or("unknown")
                );
            }
            Ok(ExitCode::FAILURE)
        }
    }
}

fn cmd_resolve(config: &SwipeConfig, measurement: Measurement, only: Option<SheetState>) {
    let resolver = HeightResolver::new(&config.sheet_config());
    let states: Vec<SheetState> = match only {
        Some(state) => vec![state],
        None => SheetState::ALL.to_vec(),
    };
    for state in states {
        println!("{:<6} {:>8.1}", state, resolver.offset_for(state, &measurement));
    }
    if only.is_none() {
        let (min, max) = resolver.bounds(&measurement);
        println!("{:<6} {:>8.1} .. {:.1}", "range", min, max);
    }
}

fn cmd_init(path: &Path, force: bool) -> Result<()> {
    let target = if path.is_dir() {
        path.join(CONFIG_FILE)
    } else {
        path.to_path_buf()
    };
    if target.exists() && !force {
        bail!(
            "{} already exists; pass --force to overwrite",
            target.display()
        );
    }
    let content = SwipeConfig::default().to_toml()?;
    std::fs::write(&target, content)
        .with_context(|| format!("Failed to write {}", target.display()))?;
    println!("wrote {}", target.display());
    Ok(())
}
