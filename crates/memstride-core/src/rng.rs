//! Deterministic pseudo-random pattern generation.
//!
//! Scenario generators never draw fresh randomness per call. Instead a fixed
//! seed fills five 256-entry buffers once at startup, and every consumer
//! indexes them cyclically with `(i * k + offset) & 255`. The same logical
//! "random" value therefore recurs every 256 iterations, which is intentional:
//! it keeps per-iteration cost negligible and makes every run, and every
//! validation failure, bit-for-bit reproducible.

/// Number of entries in each precomputed random buffer. Must be a power of two.
pub const RANDOM_BUFFER_SIZE: usize = 256;

const INDEX_MASK: usize = RANDOM_BUFFER_SIZE - 1;

/// Fixed seed used for all pattern buffers.
pub const DEFAULT_SEED: u64 = 0;

/// Minimal 64-bit linear congruential generator.
///
/// Produces 31-bit draws from the high half of the state. Small, fast, and
/// fully deterministic, which is all the harness needs.
#[derive(Debug, Clone)]
pub struct Lcg {
    state: u64,
}

impl Lcg {
    /// Create a generator from a seed.
    #[must_use]
    pub const fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Next 31-bit draw.
    pub fn next_u32(&mut self) -> u32 {
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1);
        (self.state >> 33) as u32
    }

    /// Next draw mapped to `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        f64::from(self.next_u32()) / f64::from(1u32 << 31)
    }
}

/// The five precomputed pattern buffers plus the recorded means of the
/// three size distributions.
///
/// Filled from a single generator stream in a fixed order, so a given seed
/// always produces identical buffers.
#[derive(Debug, Clone)]
pub struct RandomBuffers {
    offsets_1k: [u32; RANDOM_BUFFER_SIZE],
    offsets_1m: [u32; RANDOM_BUFFER_SIZE],
    pow2_sizes: [u32; RANDOM_BUFFER_SIZE],
    mult4_sizes: [u32; RANDOM_BUFFER_SIZE],
    byte_sizes: [u32; RANDOM_BUFFER_SIZE],
    pow2_mean: usize,
    mult4_mean: usize,
    byte_mean: usize,
}

impl RandomBuffers {
    /// Fill all buffers from the default seed.
    #[must_use]
    pub fn generate() -> Self {
        Self::with_seed(DEFAULT_SEED)
    }

    /// Fill all buffers from an explicit seed.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        let mut rng = Lcg::new(seed);

        let mut offsets_1k = [0u32; RANDOM_BUFFER_SIZE];
        for entry in &mut offsets_1k {
            *entry = rng.next_u32() % 1024;
        }

        let mut offsets_1m = [0u32; RANDOM_BUFFER_SIZE];
        for entry in &mut offsets_1m {
            *entry = rng.next_u32() % (1024 * 1024);
        }

        let mut pow2_sizes = [0u32; RANDOM_BUFFER_SIZE];
        let mut pow2_total = 0u64;
        for entry in &mut pow2_sizes {
            *entry = pow2_power_law(rng.next_f64());
            pow2_total += u64::from(*entry);
        }

        let mut mult4_sizes = [0u32; RANDOM_BUFFER_SIZE];
        let mut mult4_total = 0u64;
        for entry in &mut mult4_sizes {
            *entry = mult4_power_law(rng.next_f64());
            mult4_total += u64::from(*entry);
        }

        let mut byte_sizes = [0u32; RANDOM_BUFFER_SIZE];
        let mut byte_total = 0u64;
        for entry in &mut byte_sizes {
            *entry = byte_power_law(rng.next_f64());
            byte_total += u64::from(*entry);
        }

        Self {
            offsets_1k,
            offsets_1m,
            pow2_sizes,
            mult4_sizes,
            byte_sizes,
            pow2_mean: (pow2_total / RANDOM_BUFFER_SIZE as u64) as usize,
            mult4_mean: (mult4_total / RANDOM_BUFFER_SIZE as u64) as usize,
            byte_mean: (byte_total / RANDOM_BUFFER_SIZE as u64) as usize,
        }
    }

    /// Cyclic lookup into the `[0, 1024)` offset buffer.
    #[must_use]
    pub fn offset_1k(&self, i: usize) -> usize {
        self.offsets_1k[i & INDEX_MASK] as usize
    }

    /// Cyclic lookup into the `[0, 1M)` offset buffer.
    #[must_use]
    pub fn offset_1m(&self, i: usize) -> usize {
        self.offsets_1m[i & INDEX_MASK] as usize
    }

    /// Cyclic lookup into the powers-of-two size buffer (4 to 4096).
    #[must_use]
    pub fn pow2_size(&self, i: usize) -> usize {
        self.pow2_sizes[i & INDEX_MASK] as usize
    }

    /// Cyclic lookup into the multiples-of-four size buffer (4 to 1024).
    #[must_use]
    pub fn mult4_size(&self, i: usize) -> usize {
        self.mult4_sizes[i & INDEX_MASK] as usize
    }

    /// Cyclic lookup into the byte-granular size buffer (1 to ~1023).
    #[must_use]
    pub fn byte_size(&self, i: usize) -> usize {
        self.byte_sizes[i & INDEX_MASK] as usize
    }

    /// Mean of the powers-of-two size samples.
    #[must_use]
    pub fn pow2_mean(&self) -> usize {
        self.pow2_mean
    }

    /// Mean of the multiples-of-four size samples.
    #[must_use]
    pub fn mult4_mean(&self) -> usize {
        self.mult4_mean
    }

    /// Mean of the byte-granular size samples.
    #[must_use]
    pub fn byte_mean(&self) -> usize {
        self.byte_mean
    }
}

impl Default for RandomBuffers {
    fn default() -> Self {
        Self::generate()
    }
}

/// `4 << floor(11 * 1.5^(10r) / 1.5^10)`: powers of two from 4 to 4096 with
/// mass concentrated toward the small end.
fn pow2_power_law(r: f64) -> u32 {
    let exp = (11.0 * 1.5f64.powf(10.0 * r) / 1.5f64.powi(10)).floor() as u32;
    4u32 << exp
}

/// Two-segment curve over multiples of four: 90% of draws map through an
/// exponent-5 curve into [4, 256], the rest through an exponent-8 curve
/// into [260, 1024].
fn mult4_power_law(f: f64) -> u32 {
    if f < 0.9 {
        let scaled = 252.0 * ((1.0 + f / 0.9).powi(5) - 1.0) / (2f64.powi(5) - 1.0);
        4 + (scaled.floor() as u32 & !3)
    } else {
        let scaled = (1024.0 - 260.0) * ((1.0 + (f - 0.9) / 0.1).powi(8) - 1.0)
            / (2f64.powi(8) - 1.0);
        4 + (scaled.floor() as u32 & !3)
    }
}

/// `1 + floor(1024 * (2^(10r) - 1) / (2^10 - 1))`: a single exponential
/// growth curve from 1 up to ~1023.
fn byte_power_law(r: f64) -> u32 {
    1 + (1024.0 * (2f64.powf(10.0 * r) - 1.0) / (2f64.powi(10) - 1.0)).floor() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_golden_offset_sequence() {
        // Regression anchor: the first three 1K-offset draws for the
        // default seed must never change.
        let rnd = RandomBuffers::generate();
        assert_eq!(rnd.offset_1k(0), 0);
        assert_eq!(rnd.offset_1k(1), 534);
        assert_eq!(rnd.offset_1k(2), 615);
    }

    #[test]
    fn test_buffers_are_deterministic() {
        let a = RandomBuffers::with_seed(7);
        let b = RandomBuffers::with_seed(7);
        for i in 0..RANDOM_BUFFER_SIZE {
            assert_eq!(a.offset_1k(i), b.offset_1k(i));
            assert_eq!(a.offset_1m(i), b.offset_1m(i));
            assert_eq!(a.pow2_size(i), b.pow2_size(i));
            assert_eq!(a.mult4_size(i), b.mult4_size(i));
            assert_eq!(a.byte_size(i), b.byte_size(i));
        }
        assert_eq!(a.pow2_mean(), b.pow2_mean());
    }

    #[test]
    fn test_cyclic_indexing_wraps() {
        let rnd = RandomBuffers::generate();
        assert_eq!(rnd.offset_1k(3), rnd.offset_1k(3 + RANDOM_BUFFER_SIZE));
        assert_eq!(rnd.byte_size(100), rnd.byte_size(100 + 4 * RANDOM_BUFFER_SIZE));
    }

    #[test]
    fn test_pow2_transform_endpoints() {
        assert_eq!(pow2_power_law(0.0), 4);
        // r is always strictly below 1, so the exponent never reaches 11.
        assert_eq!(pow2_power_law(0.999_999), 4096);
    }

    #[test]
    fn test_byte_transform_endpoints() {
        assert_eq!(byte_power_law(0.0), 1);
        assert!(byte_power_law(0.999_999) <= 1024);
    }

    #[test]
    fn test_mult4_segments() {
        assert_eq!(mult4_power_law(0.0), 4);
        // Just below the segment boundary: top of the small-transfer curve.
        assert!(mult4_power_law(0.899_999) <= 256);
        // Second segment starts back at its lower bound.
        assert!(mult4_power_law(0.9) >= 4);
        assert!(mult4_power_law(0.999_999) <= 1024);
    }

    #[test]
    fn test_sampled_bounds() {
        let rnd = RandomBuffers::generate();
        for i in 0..RANDOM_BUFFER_SIZE {
            let p = rnd.pow2_size(i);
            assert!((4..=4096).contains(&p));
            assert!(p.is_power_of_two());
            let m = rnd.mult4_size(i);
            assert!((4..=1024).contains(&m));
            assert_eq!(m % 4, 0);
            let b = rnd.byte_size(i);
            assert!((1..=1024).contains(&b));
            assert!(rnd.offset_1k(i) < 1024);
            assert!(rnd.offset_1m(i) < 1024 * 1024);
        }
    }

    #[test]
    fn test_recorded_means_match_samples() {
        let rnd = RandomBuffers::generate();
        let mean = |f: &dyn Fn(usize) -> usize| {
            (0..RANDOM_BUFFER_SIZE).map(f).sum::<usize>() / RANDOM_BUFFER_SIZE
        };
        assert_eq!(rnd.pow2_mean(), mean(&|i| rnd.pow2_size(i)));
        assert_eq!(rnd.mult4_mean(), mean(&|i| rnd.mult4_size(i)));
        assert_eq!(rnd.byte_mean(), mean(&|i| rnd.byte_size(i)));
    }
}
