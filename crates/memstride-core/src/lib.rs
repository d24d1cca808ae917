//! Memory-copy benchmarking and validation harness.
//!
//! Measures the throughput of interchangeable copy routines across a fixed
//! catalog of 48 access-pattern scenarios (alignment, size, and
//! cache-locality classes), and proves them byte-exact against a reference
//! copy. The routines themselves are opaque: the harness consumes anything
//! matching the `copy(dest, src, len) -> dest` function-pointer contract.
//!
//! Everything is deterministic by construction. A fixed seed fills the
//! pattern buffers once at startup, scenario generators are pure functions
//! of the iteration counter, and the validator draws its requests from its
//! own seeded stream, so runs are comparable and failures reproduce.
//!
//! # Example
//!
//! ```
//! use memstride_core::{catalog, RandomBuffers, SCENARIO_COUNT};
//!
//! let rnd = RandomBuffers::generate();
//! let scenarios = catalog(&rnd);
//! assert_eq!(scenarios.len(), SCENARIO_COUNT);
//!
//! // Requests are pure in the iteration counter.
//! let req = scenarios[0].request(7, &rnd);
//! assert_eq!(req, scenarios[0].request(7, &rnd));
//! ```

#![deny(missing_docs)]
#![deny(clippy::panic)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_possible_truncation, clippy::cast_precision_loss, clippy::cast_sign_loss)]

pub mod arena;
pub mod config;
mod error;
pub mod rng;
pub mod routines;
pub mod scenario;
pub mod timing;
pub mod validate;
pub mod variant;

pub use arena::{Arena, ARENA_SIZE, CHUNK_BASE, CHUNK_SIZE, PAGE_SIZE};
pub use config::{Mode, RunConfig, DEFAULT_DURATION_SECS, DEFAULT_REPEAT};
pub use error::{Error, Result};
pub use rng::{Lcg, RandomBuffers, RANDOM_BUFFER_SIZE};
pub use routines::CopyFn;
pub use scenario::{catalog, CopyRequest, Scenario, SCENARIO_COUNT};
pub use timing::{calibrate_iterations, measure, Measurement};
pub use validate::{TrialReport, Validator, VariantReport, VALIDATION_BUFFER_SIZE};
pub use variant::{CopyVariant, VariantMask};
