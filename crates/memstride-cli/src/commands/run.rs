//! Run command: drive the timing engine over scenarios and variants.

use anyhow::{bail, Result};
use clap::Args;
use memstride_core::{
    catalog, measure, Arena, Mode, RandomBuffers, RunConfig, DEFAULT_DURATION_SECS,
    DEFAULT_REPEAT,
};

use super::parse_mask;

/// Arguments for the run command.
#[derive(Args)]
pub struct RunArgs {
    /// Benchmark a single scenario by index.
    #[arg(short, long, conflicts_with = "all")]
    pub test: Option<usize>,

    /// Benchmark every scenario.
    #[arg(long)]
    pub all: bool,

    /// Duration of each individual measurement in seconds.
    #[arg(short, long, default_value_t = DEFAULT_DURATION_SECS)]
    pub duration: f64,

    /// Repeat each measurement this many times.
    #[arg(short, long, default_value_t = DEFAULT_REPEAT)]
    pub repeat: usize,

    /// Shorthand for --duration 1 --repeat 2.
    #[arg(short, long)]
    pub quick: bool,

    /// Copy variants to test, as a letter string (a-e). Default: all.
    #[arg(short, long)]
    pub variants: Option<String>,
}

/// Benchmark the selected scenarios against the selected variants.
pub fn run(args: RunArgs) -> Result<()> {
    let mode = match (args.test, args.all) {
        (Some(index), false) => Mode::Single(index),
        (None, true) => Mode::All,
        _ => bail!("specify exactly one of --test and --all"),
    };
    let mask = parse_mask(args.variants.as_deref())?;
    let config = if args.quick {
        RunConfig::quick(mode, mask)?
    } else {
        RunConfig::new(mode, args.duration, args.repeat, mask)?
    };

    let rnd = RandomBuffers::generate();
    let scenarios = catalog(&rnd);
    let mut arena = Arena::new();

    let range = match config.mode {
        Mode::Single(index) => index..=index,
        _ => 0..=scenarios.len() - 1,
    };

    for scenario in &scenarios[range] {
        for variant in config.mask.iter() {
            println!("{}:", variant.name());
            for _ in 0..config.repeat {
                let m = measure(scenario, variant, &mut arena, &rnd, config.duration);
                println!("{}: {:.2} MB/s", scenario.name, m.bandwidth_mb_s);
            }
        }
    }

    Ok(())
}
