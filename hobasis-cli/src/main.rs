use hobasis::{config::Config, Basis};
use std::{path::PathBuf, time::Instant};

use anyhow::Context;
use clap::{ArgAction, Parser};
use log::LevelFilter;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// A JSON file with the system settings and the spatial integrator to use
    #[arg(long, short)]
    config: PathBuf,
    /// Write the states, single-particle energies and interaction elements to this
    /// JSON file
    #[arg(long, short)]
    output: Option<PathBuf>,
    /// Use this many shells instead of the one in the configuration
    #[arg(long)]
    shells: Option<usize>,
    /// Log more; repeat for debug and trace output
    #[arg(long, short, action = ArgAction::Count)]
    verbose: u8,
    /// Only log errors
    #[arg(long, short, conflicts_with = "verbose")]
    quiet: bool,
}

impl Args {
    fn log_level(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::Error;
        }
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args: Args = Args::parse();

    // RUST_LOG still wins over the command line
    let mut logger = pretty_env_logger::formatted_builder();
    logger.filter_level(args.log_level());
    if let Ok(filters) = std::env::var("RUST_LOG") {
        logger.parse_filters(&filters);
    }
    logger.init();

    let mut config = Config::load(&args.config)
        .with_context(|| format!("could not load {}", args.config.display()))?;
    if let Some(shells) = args.shells {
        config.shells = shells;
    }

    let mut basis = Basis::new(config);
    basis.create_basis()?;
    basis.compute_sps_energies();

    let start = Instant::now();
    let count = basis.compute_interaction_elements()?;

    println!(
        "{} states, {count} interaction elements after {:0.2?}",
        basis.states().len(),
        start.elapsed()
    );
    println!(
        "single-particle energies: {:3.3?}",
        basis.sps_energies().as_slice()
    );

    if let Some(path) = args.output {
        basis
            .output()
            .save(&path)
            .with_context(|| format!("could not write {}", path.display()))?;
        log::info!("wrote basis to {}", path.display());
    }

    Ok(())
}
