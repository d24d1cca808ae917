//! Timing engine: iteration calibration, cache normalization, warm-up, and
//! duration-based measurement.
//!
//! There is no retry logic anywhere in here. Transient system noise is
//! absorbed by looping whole passes until the configured wall-clock duration
//! has elapsed, not by rejecting outliers.

use std::time::{Duration, Instant};

use tracing::debug;

use crate::arena::Arena;
use crate::rng::RandomBuffers;
use crate::scenario::Scenario;
use crate::variant::CopyVariant;

/// Settle time after the warm-up pass.
const WARMUP_SETTLE: Duration = Duration::from_millis(100);

/// Outcome of one timed measurement.
#[derive(Debug, Clone, Copy)]
pub struct Measurement {
    /// Calibrated iterations per pass.
    pub iterations: usize,
    /// Completed whole passes.
    pub passes: usize,
    /// Wall-clock time spent in the timed loop.
    pub elapsed: Duration,
    /// Measured bandwidth in MB/s (1 MB = 1024 * 1024 bytes).
    pub bandwidth_mb_s: f64,
}

/// Choose iterations per pass so each pass moves a roughly fixed number of
/// bytes: 64MB for large transfers, 16MB for medium ones, and a fixed large
/// count for tiny transfers where loop overhead dominates anyway.
#[must_use]
pub fn calibrate_iterations(nominal_bytes: usize) -> usize {
    if nominal_bytes >= 1024 {
        (64 * 1024 * 1024) / nominal_bytes
    } else if nominal_bytes >= 64 {
        (16 * 1024 * 1024) / nominal_bytes
    } else {
        512 * 1024
    }
}

/// One full pass of the scenario against the variant.
fn run_pass(
    scenario: &Scenario,
    variant: CopyVariant,
    arena: &mut Arena,
    rnd: &RandomBuffers,
    iterations: usize,
) {
    let base = arena.base();
    let copy = variant.callable();
    for i in 0..iterations {
        let req = scenario.request(i, rnd);
        // SAFETY: every catalog request stays within the arena, including
        // the full page transferred by the page-copy variants.
        unsafe {
            copy(base.add(req.dst), base.add(req.src).cast_const(), req.len);
        }
    }
}

/// Measure one (scenario, variant) pair.
///
/// Evicts caches, runs one untimed warm-up pass, settles, then repeats whole
/// passes until `duration` of wall-clock time has accumulated.
#[must_use]
pub fn measure(
    scenario: &Scenario,
    variant: CopyVariant,
    arena: &mut Arena,
    rnd: &RandomBuffers,
    duration: Duration,
) -> Measurement {
    let iterations = calibrate_iterations(scenario.nominal_bytes);
    debug!(
        scenario = scenario.name,
        variant = variant.name(),
        iterations,
        "calibrated measurement pass"
    );

    arena.evict_caches();
    run_pass(scenario, variant, arena, rnd, iterations);
    std::thread::sleep(WARMUP_SETTLE);

    let start = Instant::now();
    let mut passes = 0usize;
    let elapsed = loop {
        run_pass(scenario, variant, arena, rnd, iterations);
        passes += 1;
        let elapsed = start.elapsed();
        if elapsed >= duration {
            break elapsed;
        }
    };

    let total_bytes = (scenario.nominal_bytes * iterations * passes) as f64;
    let bandwidth_mb_s = total_bytes / (1024.0 * 1024.0) / elapsed.as_secs_f64();
    debug!(passes, ?elapsed, bandwidth_mb_s, "measurement complete");

    Measurement { iterations, passes, elapsed, bandwidth_mb_s }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::catalog;

    #[test]
    fn test_calibration_tiers() {
        assert_eq!(calibrate_iterations(1024 * 1024), 64);
        assert_eq!(calibrate_iterations(1024), 64 * 1024);
        assert_eq!(calibrate_iterations(64), 256 * 1024);
        assert_eq!(calibrate_iterations(63), 512 * 1024);
        assert_eq!(calibrate_iterations(4), 512 * 1024);
    }

    #[test]
    fn test_measure_smoke() {
        let rnd = RandomBuffers::generate();
        let scenarios = catalog(&rnd);
        let mut arena = Arena::new();
        // "4 bytes word aligned" with a very short duration: enough to
        // check pass accounting without a slow test.
        let m = measure(
            &scenarios[3],
            CopyVariant::Standard,
            &mut arena,
            &rnd,
            Duration::from_millis(20),
        );
        assert_eq!(m.iterations, 512 * 1024);
        assert!(m.passes >= 1);
        assert!(m.elapsed >= Duration::from_millis(20));
        assert!(m.bandwidth_mb_s > 0.0);
    }
}
