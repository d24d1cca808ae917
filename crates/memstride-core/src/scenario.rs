//! Scenario catalog: the access patterns each copy variant is driven with.
//!
//! The catalog holds 48 fixed scenarios covering alignment classes (word,
//! arbitrary, 4/32-byte chunk, page), size classes from 3 bytes to 8MB,
//! power-law size mixes, and locality classes from a cache-line working set
//! up to DRAM-random access across many megabytes. Rather than 48 separate
//! generator functions, each scenario is a small [`Pattern`] descriptor
//! interpreted by one evaluator; a generated request is a pure function of
//! the iteration counter and the precomputed random buffers.

use crate::arena::CHUNK_BASE;
use crate::rng::{RandomBuffers, RANDOM_BUFFER_SIZE};

/// Number of scenarios in the catalog.
pub const SCENARIO_COUNT: usize = 48;

/// One copy request: offsets relative to the arena base, plus a length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CopyRequest {
    /// Destination offset.
    pub dst: usize,
    /// Source offset.
    pub src: usize,
    /// Transfer length in bytes (page-copy variants ignore it).
    pub len: usize,
}

/// Which power-law size buffer a mixed scenario draws lengths from.
#[derive(Debug, Clone, Copy)]
enum SizeDist {
    PowersOfTwo,
    MultiplesOfFour,
    Bytes,
}

/// How a fixed-length scenario indexes the offset buffer.
#[derive(Debug, Clone, Copy)]
enum IndexMode {
    /// Independent draws: `2i` for the destination, `2i + 1` for the source.
    Paired,
    /// One draw for both, so source alignment tracks the destination.
    Shared,
    /// `2i` for both operands. Only the "1M bytes page aligned" scenario
    /// does this; its siblings use `2i + 1` for the source. Almost
    /// certainly a copy-paste quirk, but kept as-is so published numbers
    /// stay comparable across versions.
    PairedSameSource,
}

/// Parameterized access-pattern descriptor.
#[derive(Debug, Clone, Copy)]
enum Pattern {
    /// Offsets from the 1M buffer scaled by `unit`; length drawn from a
    /// power-law buffer.
    Mixed { unit: usize, sizes: SizeDist },
    /// Fixed length; offsets from the 1K buffer scaled by `unit`, the
    /// source shifted by `src_base`, both shifted by `base` (zero for the
    /// page region, [`CHUNK_BASE`] for the chunk region).
    Fixed {
        base: usize,
        unit: usize,
        src_base: usize,
        len: usize,
        index: IndexMode,
    },
    /// Uniform random length `lo + (draw & len_mask)` with unaligned
    /// offsets a page apart; indices from the `4i` family.
    UniformLen { len_mask: usize },
    /// DRAM-random composition: an 8KB-aligned random block, a 256-byte
    /// stride from high bits of the iteration counter, and a fine random
    /// offset (word aligned when `word_aligned`). Length is
    /// `lo + (draw & len_mask)` with `lo` 4 or 1 respectively.
    Dram { word_aligned: bool, len_mask: usize },
}

/// A named access pattern plus its nominal per-call transfer size.
///
/// `nominal_bytes` is the exact length for fixed scenarios and the recorded
/// sample mean for the distribution-driven ones, so bandwidth is normalized
/// to the true average transfer size.
#[derive(Debug, Clone)]
pub struct Scenario {
    /// Scenario name, used in all reporting output.
    pub name: &'static str,
    /// Bytes moved per call, used for calibration and bandwidth.
    pub nominal_bytes: usize,
    pattern: Pattern,
}

impl Scenario {
    /// Generate the request for iteration `i`.
    ///
    /// Pure in `i` and `rnd`: repeated passes over the same range produce
    /// identical request streams for every variant.
    #[must_use]
    pub fn request(&self, i: usize, rnd: &RandomBuffers) -> CopyRequest {
        match self.pattern {
            Pattern::Mixed { unit, sizes } => {
                let len = match sizes {
                    SizeDist::PowersOfTwo => rnd.pow2_size(i),
                    SizeDist::MultiplesOfFour => rnd.mult4_size(i),
                    SizeDist::Bytes => rnd.byte_size(i),
                };
                CopyRequest {
                    dst: rnd.offset_1m(i * 2) * unit,
                    src: rnd.offset_1m(i * 2 + 1) * unit,
                    len,
                }
            }
            Pattern::Fixed { base, unit, src_base, len, index } => {
                let (di, si) = match index {
                    IndexMode::Paired => (i * 2, i * 2 + 1),
                    IndexMode::Shared => (i, i),
                    IndexMode::PairedSameSource => (i * 2, i * 2),
                };
                CopyRequest {
                    dst: base + rnd.offset_1k(di) * unit,
                    src: base + src_base + rnd.offset_1k(si) * unit,
                    len,
                }
            }
            Pattern::UniformLen { len_mask } => CopyRequest {
                dst: rnd.offset_1k(i * 4),
                src: 4096 + rnd.offset_1k(i * 4 + 1),
                len: 1 + (rnd.offset_1k(i * 4 + 2) & len_mask),
            },
            Pattern::Dram { word_aligned, len_mask } => {
                // 256-byte stride stepping through a 4KB window as the
                // iteration counter climbs past each buffer period.
                let stride = ((i / (RANDOM_BUFFER_SIZE / 4)) & 15) * 256;
                let fine = |v: usize| if word_aligned { v & !3 } else { v };
                let lo = if word_aligned { 4 } else { 1 };
                CopyRequest {
                    dst: 8192 * rnd.offset_1k(i * 2) + stride + fine(rnd.offset_1k(i * 4)),
                    src: 8192 * rnd.offset_1k(i * 2 + 1)
                        + stride
                        + fine(rnd.offset_1k(i * 4 + 1)),
                    len: lo + (rnd.offset_1k(i * 4 + 2) & len_mask),
                }
            }
        }
    }
}

/// Fixed-length scenario in the page region with paired indices.
const fn fixed(name: &'static str, unit: usize, src_base: usize, len: usize) -> Scenario {
    Scenario {
        name,
        nominal_bytes: len,
        pattern: Pattern::Fixed { base: 0, unit, src_base, len, index: IndexMode::Paired },
    }
}

/// Fixed-length scenario whose source alignment tracks the destination.
const fn shared(name: &'static str, src_base: usize, len: usize) -> Scenario {
    Scenario {
        name,
        nominal_bytes: len,
        pattern: Pattern::Fixed { base: 0, unit: 1, src_base, len, index: IndexMode::Shared },
    }
}

/// Fixed-length scenario in the chunk region, 32-byte units.
const fn chunk(name: &'static str, src_base: usize, len: usize) -> Scenario {
    Scenario {
        name,
        nominal_bytes: len,
        pattern: Pattern::Fixed {
            base: CHUNK_BASE,
            unit: 32,
            src_base,
            len,
            index: IndexMode::Paired,
        },
    }
}

/// Build the full scenario catalog.
///
/// The three distribution-driven scenarios take their `nominal_bytes` from
/// the means recorded in `rnd`, so bandwidth normalization tracks the actual
/// sampled transfer sizes.
#[must_use]
pub fn catalog(rnd: &RandomBuffers) -> Vec<Scenario> {
    const MB: usize = 1024 * 1024;
    let scenarios = vec![
        Scenario {
            name: "Mixed powers of 2 from 4 to 4096 (power law), word aligned",
            nominal_bytes: rnd.pow2_mean(),
            pattern: Pattern::Mixed { unit: 4, sizes: SizeDist::PowersOfTwo },
        },
        Scenario {
            name: "Mixed multiples of 4 from 4 to 1024 (power law), word aligned",
            nominal_bytes: rnd.mult4_mean(),
            pattern: Pattern::Mixed { unit: 4, sizes: SizeDist::MultiplesOfFour },
        },
        Scenario {
            name: "Mixed from 1 to 1023 (power law), unaligned",
            nominal_bytes: rnd.byte_mean(),
            pattern: Pattern::Mixed { unit: 1, sizes: SizeDist::Bytes },
        },
        fixed("4 bytes word aligned", 4, 8192, 4),
        fixed("8 bytes word aligned", 4, 8192, 8),
        fixed("16 bytes word aligned", 4, 8192, 16),
        fixed("28 bytes word aligned", 4, 8192, 28),
        fixed("32 bytes word aligned", 4, 8192, 32),
        fixed("64 bytes word aligned", 4, 8192, 64),
        fixed("128 bytes word aligned", 4, 8192, 128),
        fixed("256 bytes word aligned", 4, 8192, 256),
        fixed("3 bytes randomly aligned", 1, 8192, 3),
        fixed("8 bytes randomly aligned", 1, 8192, 8),
        fixed("17 bytes randomly aligned", 1, 8192, 17),
        fixed("28 bytes randomly aligned", 1, 8192, 28),
        fixed("64 bytes randomly aligned", 1, 8192, 64),
        fixed("137 bytes randomly aligned", 1, 8192, 137),
        fixed("1024 bytes randomly aligned", 1, 8192, 1024),
        fixed("32768 bytes randomly aligned", 1, 65536, 32768),
        fixed("1M bytes randomly aligned", 1, 2 * MB, MB),
        shared("64 bytes randomly aligned, source aligned with dest", 4096, 64),
        shared("1024 bytes randomly aligned, source aligned with dest", 4096, 1024),
        shared("32768 bytes randomly aligned, source aligned with dest", 65536, 32768),
        shared("1M bytes randomly aligned, source aligned with dest", 2 * MB, MB),
        Scenario {
            name: "Up to 1024 bytes randomly aligned",
            nominal_bytes: 512,
            pattern: Pattern::UniformLen { len_mask: 1023 },
        },
        Scenario {
            name: "Up to 64 bytes randomly aligned",
            nominal_bytes: 32,
            pattern: Pattern::UniformLen { len_mask: 63 },
        },
        Scenario {
            name: "Up to 1024 bytes randomly aligned (DRAM)",
            nominal_bytes: 512,
            pattern: Pattern::Dram { word_aligned: false, len_mask: 1023 },
        },
        Scenario {
            name: "Up to 64 bytes randomly aligned (DRAM)",
            nominal_bytes: 32,
            pattern: Pattern::Dram { word_aligned: false, len_mask: 63 },
        },
        Scenario {
            name: "Up to 1024 bytes word aligned (DRAM)",
            nominal_bytes: 514,
            pattern: Pattern::Dram { word_aligned: true, len_mask: 1020 },
        },
        Scenario {
            name: "Up to 256 bytes word aligned (DRAM)",
            nominal_bytes: 130,
            pattern: Pattern::Dram { word_aligned: true, len_mask: 252 },
        },
        Scenario {
            name: "Up to 64 bytes word aligned (DRAM)",
            nominal_bytes: 34,
            pattern: Pattern::Dram { word_aligned: true, len_mask: 60 },
        },
        fixed("28 bytes 4-byte aligned", 4, 65536, 28),
        fixed("64 bytes 4-byte aligned", 4, 65536, 64),
        fixed("296 bytes 4-byte aligned", 4, 65536, 296),
        fixed("1024 bytes 4-byte aligned", 4, 65536, 1024),
        fixed("4096 bytes 4-byte aligned", 4, 65536, 4096),
        fixed("32768 bytes 4-byte aligned", 4, 131_072, 32768),
        chunk("64 bytes 32-byte aligned", 65536, 64),
        chunk("296 bytes 32-byte aligned", 65536, 296),
        chunk("1024 bytes 32-byte aligned", 65536, 1024),
        chunk("4096 bytes 32-byte aligned", 65536, 4096),
        chunk("32768 bytes 32-byte aligned", 131_072, 32768),
        fixed("1024 bytes page aligned", 4096, 8192 * 1024, 1024),
        fixed("4096 bytes page aligned", 4096, 8192 * 1024, 4096),
        fixed("32768 bytes page aligned", 4096, 8192 * 1024, 32768),
        fixed("256K bytes page aligned", 4096, 8192 * 1024, 256 * 1024),
        Scenario {
            name: "1M bytes page aligned",
            nominal_bytes: MB,
            pattern: Pattern::Fixed {
                base: 0,
                unit: 4096,
                src_base: 8192 * 1024,
                len: MB,
                index: IndexMode::PairedSameSource,
            },
        },
        fixed("8M bytes page aligned", 4096, 16384 * 1024, 8 * MB),
    ];
    debug_assert_eq!(scenarios.len(), SCENARIO_COUNT);
    scenarios
}
