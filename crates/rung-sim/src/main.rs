use std::path::PathBuf;

use clap::Parser;

use rung_sim::config::{ResolvedOutputs, SimConfig};
use rung_sim::logging::init_logging;
use rung_sim::runner::SimRunner;

/// Round-simulation harness for the Rung rules engine.
#[derive(Debug, Parser)]
#[command(
    name = "rung-sim",
    author,
    version,
    about = "Deterministic Rung round simulation harness"
)]
struct Cli {
    /// Path to the YAML configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "sim/sim.yaml")]
    config: PathBuf,

    /// Override the run identifier (substitutes {run_id} templates).
    #[arg(long, value_name = "RUN_ID")]
    run_id: Option<String>,

    /// Override the number of rounds to play.
    #[arg(long, value_name = "ROUNDS")]
    rounds: Option<usize>,

    /// Override the RNG seed for round generation.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Override the number of shuffle passes before each deal.
    #[arg(long, value_name = "PASSES")]
    shuffle_passes: Option<usize>,

    /// Exit after validating the configuration (no simulation is run).
    #[arg(long)]
    validate_only: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = SimConfig::from_path(&cli.config)?;

    if let Some(run_id) = cli.run_id {
        config.run_id = run_id;
    }

    if let Some(rounds) = cli.rounds {
        config.rounds.count = rounds;
    }

    if let Some(seed) = cli.seed {
        config.rounds.seed = Some(seed);
    }

    if let Some(passes) = cli.shuffle_passes {
        config.rounds.shuffle_passes = passes;
    }

    config.validate()?;

    let outputs: ResolvedOutputs = config.resolved_outputs();
    let run_id = config.run_id.clone();
    let rounds = config.rounds.count;

    println!(
        "Loaded configuration '{run_id}' ({rounds} round{})",
        if rounds == 1 { "" } else { "s" }
    );

    let _logging_guard = init_logging(&config.logging, &outputs)?;

    if cli.validate_only {
        println!("Validation-only mode: simulation skipped.");
        return Ok(());
    }

    let runner = SimRunner::new(config, outputs);
    let summary = runner.run()?;
    println!(
        "Simulation complete for '{run_id}': {} rounds → {} rows at {}",
        summary.rounds_played,
        summary.rows_written,
        summary.jsonl_path.display()
    );
    println!("Summary table: {}", summary.summary_path.display());

    Ok(())
}
