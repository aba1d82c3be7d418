//! Play a scenario file headlessly, writing its snapshots as PNGs
//!
//! Usage: render-scenario <scenario.toml> [output-dir]

use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use voice_dots::scenario::{Scenario, ScenarioRunner};

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "voice_dots=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <scenario.toml> [output-dir]", args[0]);
        eprintln!("\nExample:");
        eprintln!("  render-scenario demos/state_walk.toml output");
        std::process::exit(2);
    }

    let scenario_path = PathBuf::from(&args[1]);
    let output_dir = PathBuf::from(args.get(2).map(String::as_str).unwrap_or("output"));

    let scenario = Scenario::load(&scenario_path)
        .with_context(|| format!("loading {}", scenario_path.display()))?;
    info!("Rendering '{}' into {}", scenario.scenario.name, output_dir.display());

    let report = ScenarioRunner::new(scenario)?.run(Some(&output_dir))?;
    for path in &report.snapshots {
        info!("Wrote {}", path.display());
    }
    for failure in &report.failures {
        eprintln!("FAIL: {}", failure);
    }

    std::process::exit(report.exit_code);
}
