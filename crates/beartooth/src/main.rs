use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::{info, warn};
use std::path::PathBuf;

use beartooth::export::{export_to_csv_with_path, render_grid, render_report};
use beartooth::{Config, VariableLayout, build_qubo, interpret_samples, read_samples_csv};

#[derive(Parser)]
#[command(author, version, about = "Landscape QUBO builder and sample decoder", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short = 'c', long = "config", default_value = "config/default.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write the landscape QUBO as JSON for an external solver
    Qubo {
        #[arg(short = 'o', long = "output", default_value = "qubo.json")]
        output: PathBuf,
    },
    /// Decode solver samples (`Bits,Count` CSV) into landscape coordinates
    Decode {
        #[arg(short = 's', long = "samples")]
        samples: PathBuf,
    },
    /// Print the landscape
    Landscape,
}

fn main() -> Result<()> {
    // Initialize logger - defaults to RUST_LOG if set, otherwise INFO
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();

    let args = Args::parse();

    let mut config = if args.config.exists() {
        Config::load_from_file(&args.config)?
    } else {
        warn!(
            "Config file not found: {}, using default settings",
            args.config.display()
        );
        Config::default()
    };
    config.apply_env()?;

    let landscape = config.landscape().context("failed to load landscape")?;
    let layout = VariableLayout::new(landscape.side());
    // Fail on a mismatched embedding before producing anything
    config
        .embedding()
        .context("failed to load embedding")?
        .validate_for(&layout)?;

    match args.command {
        Command::Qubo { output } => {
            let qubo = build_qubo(&landscape, config.problem.encoding_bias)?;
            qubo.save_json(&output, landscape.offset())
                .with_context(|| format!("failed to write {}", output.display()))?;
            info!(
                "QUBO with {} variables and {} coefficients saved to: {}",
                qubo.num_vars(),
                qubo.len(),
                output.display()
            );
            info!("Constant offset f(0, 0) = {}", landscape.offset());
        }
        Command::Decode { samples } => {
            let samples = read_samples_csv(&samples)
                .with_context(|| format!("failed to read samples from {}", samples.display()))?;
            info!("Loaded {} sample rows", samples.len());

            let table = interpret_samples(layout, &samples);
            println!();
            print!("{}", render_report(&landscape, &table));

            if let Some(((x, y), count)) = table.most_sampled() {
                info!(
                    "Most sampled: ({}, {}) x{} at altitude {}",
                    x,
                    y,
                    count,
                    landscape.altitude(x, y)
                );
            }

            let path = export_to_csv_with_path(&table, Some(&config.solver.output_dir))?;
            info!("Sample table saved to: {}", path.display());
        }
        Command::Landscape => {
            println!();
            println!("Landscape:");
            print!("{}", render_grid(landscape.rows()));
            info!("Side {}, offset f(0, 0) = {}", landscape.side(), landscape.offset());
        }
    }

    Ok(())
}
