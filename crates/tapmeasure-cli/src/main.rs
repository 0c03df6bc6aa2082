//! tapmeasure CLI - replay recorded taps through the measurement engine
//!
//! Reads a recording (engine config, camera frame, detected planes, taps),
//! runs each tap through a measurement session, and prints the placed
//! annotations as JSON.

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::path::PathBuf;
use tapmeasure_engine::{DistanceUnit, MeasureConfig, MeasureMode, MeasurementEngine, MeasurementSession};
use tapmeasure_raycast::ScreenPoint;
use tapmeasure_scene::{AnchorNode, MeasurementResult, SceneGraph};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod scene_file;

use scene_file::Recording;

#[derive(Parser)]
#[command(name = "tapmeasure")]
#[command(about = "Replay AR measurement taps against a recorded scene", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run every tap in a recording and print the resulting annotations
    Replay {
        /// Recording file (.toml or .json)
        file: PathBuf,
        /// Override the measurement mode
        #[arg(short, long)]
        mode: Option<ModeArg>,
        /// Override the distance display unit
        #[arg(short, long)]
        unit: Option<UnitArg>,
    },
    /// Print the default engine configuration as TOML
    Config,
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    Area,
    Distance,
}

#[derive(Clone, Copy, ValueEnum)]
enum UnitArg {
    M,
    Cm,
}

#[derive(Serialize)]
struct TapLine {
    tap: ScreenPoint,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<MeasurementResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Serialize)]
struct ReplayReport<'a> {
    taps: Vec<TapLine>,
    annotations: Vec<&'a AnchorNode>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Replay { file, mode, unit } => replay(&file, mode, unit)?,
        Commands::Config => print!("{}", MeasureConfig::default().to_toml_string()?),
    }

    Ok(())
}

fn replay(file: &PathBuf, mode: Option<ModeArg>, unit: Option<UnitArg>) -> Result<()> {
    let recording = Recording::load(file)?;

    let mut config = recording.engine.clone();
    if let Some(mode) = mode {
        config.mode = match mode {
            ModeArg::Area => MeasureMode::Area,
            ModeArg::Distance => MeasureMode::Distance,
        };
    }
    if let Some(unit) = unit {
        config.distance_unit = match unit {
            UnitArg::M => DistanceUnit::Meters,
            UnitArg::Cm => DistanceUnit::Centimeters,
        };
    }

    let frame = recording.frame()?;
    if frame.is_none() {
        warn!("recording has no camera frame; every tap will miss");
    }

    let engine = MeasurementEngine::new(recording.scene(), config)?;
    let session = MeasurementSession::new(engine, SceneGraph::new());

    let mut taps = Vec::with_capacity(recording.taps.len());
    for &tap in &recording.taps {
        let line = match session.tap(tap, frame.as_ref()) {
            Ok(report) => TapLine {
                tap,
                result: Some(report.result),
                error: None,
            },
            Err(e) => {
                info!(x = tap.x, y = tap.y, error = %e, "tap produced no annotation");
                TapLine {
                    tap,
                    result: None,
                    error: Some(e.to_string()),
                }
            }
        };
        taps.push(line);
    }

    let scene = session.into_scene()?;
    let report = ReplayReport {
        taps,
        annotations: scene.anchors().collect(),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
