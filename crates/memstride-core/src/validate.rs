//! Correctness validation of copy variants against a byte-by-byte reference.
//!
//! Each trial generates a randomized copy request, applies the variant to a
//! scratch buffer and a trivial forward byte copy to an independent
//! reference buffer, then compares the full contents of both. Generated
//! requests are always non-overlapping: the forward reference copy is only
//! correct for disjoint regions, so overlap handling of the variants is
//! deliberately not a tested behavior.

use tracing::debug;

use crate::arena::PAGE_SIZE;
use crate::rng::Lcg;
use crate::routines::CopyFn;
use crate::variant::CopyVariant;

/// Size of the scratch and reference buffers.
pub const VALIDATION_BUFFER_SIZE: usize = 16 * 1024 * 1024;

/// Mismatch offsets reported per trial before truncating to a count.
const MISMATCH_REPORT_LIMIT: usize = 10;

/// Attempts to find a disjoint destination before giving up. The original
/// harness resampled forever; the cap turns a pathological sampling loop
/// into a failed trial with a diagnostic instead of a hang.
const MAX_RESAMPLE_ATTEMPTS: usize = 1024;

/// Seed for the validation request stream, independent of the pattern
/// buffers so validation failures reproduce regardless of run mode.
const VALIDATION_SEED: u64 = 0x6d65_6d73;

/// Outcome of a single validation trial.
#[derive(Debug, Clone)]
pub struct TrialReport {
    /// Source offset of the generated request.
    pub source: usize,
    /// Destination offset of the generated request.
    pub dest: usize,
    /// Transfer size of the generated request.
    pub size: usize,
    /// First mismatching byte offsets, capped at ten.
    pub mismatches: Vec<usize>,
    /// Mismatching bytes beyond the reported ones.
    pub remaining: usize,
    /// True if no disjoint destination was found within the attempt cap.
    pub sampling_exhausted: bool,
}

impl TrialReport {
    /// Whether the trial found the variant byte-exact.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.mismatches.is_empty() && !self.sampling_exhausted
    }
}

/// All trial outcomes for one variant.
#[derive(Debug, Clone)]
pub struct VariantReport {
    /// Name of the validated variant (or custom routine).
    pub variant: &'static str,
    /// Per-trial outcomes, in execution order.
    pub trials: Vec<TrialReport>,
}

impl VariantReport {
    /// Conjunction of all trials.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.trials.iter().all(TrialReport::passed)
    }
}

/// Randomized correctness checker for copy routines.
pub struct Validator {
    scratch: Vec<u8>,
    reference: Vec<u8>,
    rng: Lcg,
}

impl Validator {
    /// Allocate the scratch and reference buffers.
    #[must_use]
    pub fn new() -> Self {
        Self {
            scratch: vec![0u8; VALIDATION_BUFFER_SIZE],
            reference: vec![0u8; VALIDATION_BUFFER_SIZE],
            rng: Lcg::new(VALIDATION_SEED),
        }
    }

    /// Validate a registered variant over `trials` randomized requests.
    pub fn run(&mut self, variant: CopyVariant, trials: usize) -> VariantReport {
        self.run_routine(variant.name(), variant.callable(), variant.is_page_copy(), trials)
    }

    /// Validate an arbitrary routine. `page_copy` selects the fixed-page
    /// request generator used for routines that ignore their length
    /// argument.
    pub fn run_routine(
        &mut self,
        name: &'static str,
        copy: CopyFn,
        page_copy: bool,
        trials: usize,
    ) -> VariantReport {
        let trials = (0..trials).map(|_| self.trial(copy, page_copy)).collect();
        VariantReport { variant: name, trials }
    }

    fn trial(&mut self, copy: CopyFn, page_copy: bool) -> TrialReport {
        let (source, dest, size, sampling_exhausted) = if page_copy {
            self.sample_page_request()
        } else {
            self.sample_disjoint_request()
        };

        let mut report = TrialReport {
            source,
            dest,
            size,
            mismatches: Vec::new(),
            remaining: 0,
            sampling_exhausted,
        };
        if sampling_exhausted {
            debug!(source, size, "no disjoint destination found; trial failed");
            return report;
        }

        fill_pattern(&mut self.reference);
        for i in 0..size {
            let byte = self.reference[source + i];
            self.reference[dest + i] = byte;
        }

        fill_pattern(&mut self.scratch);
        // SAFETY: [dest, dest + size) and [source, source + size) are
        // disjoint and within the buffer; page requests are valid for a
        // full page.
        unsafe {
            copy(
                self.scratch.as_mut_ptr().add(dest),
                self.scratch.as_ptr().add(source),
                size,
            );
        }

        for (i, (a, b)) in self.scratch.iter().zip(&self.reference).enumerate() {
            if a != b {
                if report.mismatches.len() < MISMATCH_REPORT_LIMIT {
                    report.mismatches.push(i);
                } else {
                    report.remaining += 1;
                }
            }
        }
        report
    }

    /// Distinct source and destination pages, page aligned.
    fn sample_page_request(&mut self) -> (usize, usize, usize, bool) {
        let pages = VALIDATION_BUFFER_SIZE / PAGE_SIZE;
        let source = PAGE_SIZE * (self.rng.next_u32() as usize % pages);
        for _ in 0..MAX_RESAMPLE_ATTEMPTS {
            let dest = PAGE_SIZE * (self.rng.next_u32() as usize % pages);
            if dest != source {
                return (source, dest, PAGE_SIZE, false);
            }
        }
        (source, source, PAGE_SIZE, true)
    }

    /// Exponentially distributed size in `[1, 2^20)` plus disjoint offsets.
    fn sample_disjoint_request(&mut self) -> (usize, usize, usize, bool) {
        let size = 2f64.powf(20.0 * self.rng.next_f64()).floor() as usize;
        let span = VALIDATION_BUFFER_SIZE + 1 - size;
        let source = self.rng.next_u32() as usize % span;
        for _ in 0..MAX_RESAMPLE_ATTEMPTS {
            let dest = self.rng.next_u32() as usize % span;
            if dest + size <= source || dest >= source + size {
                return (source, dest, size, false);
            }
        }
        (source, source, size, true)
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

/// Deterministic fill: `byte[i] = i mod 256`.
fn fill_pattern(buffer: &mut [u8]) {
    for (i, byte) in buffer.iter_mut().enumerate() {
        *byte = i as u8;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routines;

    #[test]
    fn test_reference_against_itself_passes() {
        // The byte-loop routine is exactly the comparison reference, so
        // validating it can never report a mismatch.
        let mut validator = Validator::new();
        let report =
            validator.run_routine("byte loop", routines::kernel_copy_orig, false, 10);
        assert!(report.passed());
        for trial in &report.trials {
            assert!(trial.mismatches.is_empty());
            assert_eq!(trial.remaining, 0);
        }
    }

    #[test]
    fn test_generated_requests_are_disjoint() {
        let mut validator = Validator::new();
        let report = validator.run(CopyVariant::Standard, 50);
        assert!(report.passed());
        for t in &report.trials {
            assert!(t.size >= 1 && t.size < 1 << 20);
            assert!(
                t.dest + t.size <= t.source || t.dest >= t.source + t.size,
                "overlapping request generated: {t:?}"
            );
        }
    }

    #[test]
    fn test_page_requests_are_distinct_pages() {
        let mut validator = Validator::new();
        let report = validator.run(CopyVariant::PageOpt, 20);
        assert!(report.passed());
        for t in &report.trials {
            assert_eq!(t.size, PAGE_SIZE);
            assert_eq!(t.source % PAGE_SIZE, 0);
            assert_eq!(t.dest % PAGE_SIZE, 0);
            assert_ne!(t.source, t.dest);
        }
    }

    #[test]
    fn test_short_copy_is_caught() {
        // A routine that drops the final byte must be flagged within the
        // first ten trials: the pattern byte at dest + size - 1 almost
        // never matches the one it should have been replaced with.
        unsafe fn short_copy(dest: *mut u8, src: *const u8, len: usize) -> *mut u8 {
            if len > 0 {
                std::ptr::copy_nonoverlapping(src, dest, len - 1);
            }
            dest
        }
        let mut validator = Validator::new();
        let report = validator.run_routine("short copy", short_copy, false, 10);
        assert!(!report.passed());
        let failed = report.trials.iter().find(|t| !t.passed()).unwrap();
        assert!(!failed.mismatches.is_empty());
    }

    #[test]
    fn test_mismatch_reporting_caps_at_ten() {
        // Copy nothing at all: every byte of the destination range
        // mismatches, so large requests must truncate the report.
        unsafe fn no_copy(dest: *mut u8, _src: *const u8, _len: usize) -> *mut u8 {
            dest
        }
        let mut validator = Validator::new();
        let report = validator.run_routine("no-op", no_copy, false, 20);
        assert!(!report.passed());
        let big = report
            .trials
            .iter()
            .find(|t| t.remaining > 0)
            .expect("some trial should exceed the report cap");
        assert_eq!(big.mismatches.len(), MISMATCH_REPORT_LIMIT);
    }

    #[test]
    fn test_trials_are_reproducible() {
        let run = || {
            let mut v = Validator::new();
            let report = v.run(CopyVariant::KernelOpt, 15);
            report
                .trials
                .iter()
                .map(|t| (t.source, t.dest, t.size))
                .collect::<Vec<_>>()
        };
        assert_eq!(run(), run());
    }
}
