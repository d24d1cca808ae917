//! List command: enumerate scenarios and variants.

use anyhow::Result;
use memstride_core::{catalog, CopyVariant, RandomBuffers};

/// Print scenario indices/names and variant letters/names.
pub fn list() -> Result<()> {
    let rnd = RandomBuffers::generate();

    println!("Tests:");
    for (i, scenario) in catalog(&rnd).iter().enumerate() {
        println!("{i:>3}    {}", scenario.name);
    }

    println!("memcpy variants:");
    for variant in CopyVariant::ALL {
        println!("  {}    {}", variant.letter(), variant.name());
    }

    Ok(())
}
