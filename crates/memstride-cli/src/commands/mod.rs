//! CLI command implementations.

mod list;
mod run;
mod validate;

pub use list::list;
pub use run::{run, RunArgs};
pub use validate::{validate, ValidateArgs};

use memstride_core::VariantMask;

/// Resolve the `--variants` letter string; no selection means all variants.
fn parse_mask(spec: Option<&str>) -> memstride_core::Result<VariantMask> {
    match spec {
        None => Ok(VariantMask::ALL),
        Some(s) => VariantMask::from_letters(s),
    }
}
