//! Validate command: prove variants byte-exact against the reference copy.

use anyhow::{bail, Result};
use clap::Args;
use memstride_core::{Mode, RunConfig, TrialReport, Validator, DEFAULT_REPEAT};

use super::parse_mask;

/// Arguments for the validate command.
#[derive(Args)]
pub struct ValidateArgs {
    /// Number of ten-trial validation rounds per variant.
    #[arg(short, long, default_value_t = DEFAULT_REPEAT)]
    pub repeat: usize,

    /// Shorthand for --repeat 2.
    #[arg(short, long)]
    pub quick: bool,

    /// Copy variants to validate, as a letter string (a-e). Default: all.
    #[arg(short, long)]
    pub variants: Option<String>,
}

/// Validate each selected variant and report per-trial diagnostics.
pub fn validate(args: ValidateArgs) -> Result<()> {
    let mask = parse_mask(args.variants.as_deref())?;
    let config = if args.quick {
        RunConfig::quick(Mode::Validate, mask)?
    } else {
        RunConfig::new(Mode::Validate, 2.0, args.repeat, mask)?
    };

    let mut validator = Validator::new();
    let mut failed_variants = 0usize;

    for variant in config.mask.iter() {
        println!("{}:", variant.name());
        let report = validator.run(variant, 10 * config.repeat);
        for trial in &report.trials {
            print_trial(trial);
        }
        if report.passed() {
            println!("Passed.");
        } else {
            failed_variants += 1;
        }
    }

    if failed_variants > 0 {
        bail!("validation failed for {failed_variants} variant(s)");
    }
    Ok(())
}

fn print_trial(trial: &TrialReport) {
    println!(
        "Testing (source offset = 0x{:08X}, destination offset = 0x{:08X}, size = {}).",
        trial.source, trial.dest, trial.size
    );
    if trial.sampling_exhausted {
        println!(
            "No disjoint destination found for size {}; trial failed.",
            trial.size
        );
        return;
    }
    for &offset in &trial.mismatches {
        println!("Byte at offset {offset} (0x{offset:08X}) doesn't match.");
    }
    if trial.remaining > 0 {
        println!("({} more non-matching bytes present.)", trial.remaining);
    }
    if !trial.passed() {
        println!(
            "Validation failed (source offset = 0x{:08X}, destination offset = 0x{:08X}, size = {}).",
            trial.source, trial.dest, trial.size
        );
    }
}
