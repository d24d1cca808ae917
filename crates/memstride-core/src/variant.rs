//! Copy-variant registry and selection mask.

use crate::error::{Error, Result};
use crate::routines::{self, CopyFn};

/// The closed set of copy implementations under test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyVariant {
    /// Standard library copy.
    Standard,
    /// Kernel-style byte copy, reference version.
    KernelOrig,
    /// Kernel-style block copy, optimized version.
    KernelOpt,
    /// Whole-page copy, reference version. Ignores the length argument.
    PageOrig,
    /// Whole-page copy, optimized version. Ignores the length argument.
    PageOpt,
}

impl CopyVariant {
    /// Every variant, in registry order.
    pub const ALL: [CopyVariant; 5] = [
        CopyVariant::Standard,
        CopyVariant::KernelOrig,
        CopyVariant::KernelOpt,
        CopyVariant::PageOrig,
        CopyVariant::PageOpt,
    ];

    /// Number of registered variants.
    pub const COUNT: usize = Self::ALL.len();

    /// Human-readable variant name, used in all reporting output.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            CopyVariant::Standard => "standard memcpy",
            CopyVariant::KernelOrig => "kernel memcpy (original)",
            CopyVariant::KernelOpt => "kernel memcpy (optimized)",
            CopyVariant::PageOrig => "kernel copy_page (original)",
            CopyVariant::PageOpt => "kernel copy_page (optimized)",
        }
    }

    /// Selection letter used by the driver (`a` through `e`).
    #[must_use]
    pub fn letter(self) -> char {
        (b'a' + self.index() as u8) as char
    }

    /// The routine implementing this variant.
    #[must_use]
    pub fn callable(self) -> CopyFn {
        match self {
            CopyVariant::Standard => routines::standard_copy,
            CopyVariant::KernelOrig => routines::kernel_copy_orig,
            CopyVariant::KernelOpt => routines::kernel_copy_opt,
            CopyVariant::PageOrig => routines::page_copy_orig,
            CopyVariant::PageOpt => routines::page_copy_opt,
        }
    }

    /// Whether this variant always transfers a fixed page-sized block.
    #[must_use]
    pub fn is_page_copy(self) -> bool {
        matches!(self, CopyVariant::PageOrig | CopyVariant::PageOpt)
    }

    fn index(self) -> usize {
        match self {
            CopyVariant::Standard => 0,
            CopyVariant::KernelOrig => 1,
            CopyVariant::KernelOpt => 2,
            CopyVariant::PageOrig => 3,
            CopyVariant::PageOpt => 4,
        }
    }
}

/// Bitmask selecting the active subset of copy variants for a run.
///
/// Built once from configuration and read-only thereafter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariantMask(u8);

impl VariantMask {
    /// Every variant selected.
    pub const ALL: VariantMask = VariantMask((1 << CopyVariant::COUNT) - 1);

    /// No variant selected.
    pub const EMPTY: VariantMask = VariantMask(0);

    /// Parse a selection string of variant letters, e.g. `"abc"` for the
    /// first three variants. Characters outside `a`..`e` are ignored, but a
    /// selection that matches nothing is a configuration error.
    pub fn from_letters(s: &str) -> Result<Self> {
        let mut mask = VariantMask::EMPTY;
        for c in s.chars() {
            if let Some(v) = CopyVariant::ALL.iter().find(|v| v.letter() == c) {
                mask.insert(*v);
            }
        }
        if mask.is_empty() {
            return Err(Error::EmptyVariantSelection(s.to_string()));
        }
        Ok(mask)
    }

    /// Add a variant to the selection.
    pub fn insert(&mut self, variant: CopyVariant) {
        self.0 |= 1 << variant.index();
    }

    /// Whether a variant is selected.
    #[must_use]
    pub fn contains(self, variant: CopyVariant) -> bool {
        self.0 & (1 << variant.index()) != 0
    }

    /// Whether nothing is selected.
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Selected variants, in registry order.
    pub fn iter(self) -> impl Iterator<Item = CopyVariant> {
        CopyVariant::ALL.into_iter().filter(move |v| self.contains(*v))
    }
}

impl Default for VariantMask {
    fn default() -> Self {
        Self::ALL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letters_are_sequential() {
        let letters: String = CopyVariant::ALL.iter().map(|v| v.letter()).collect();
        assert_eq!(letters, "abcde");
    }

    #[test]
    fn test_mask_from_letters() {
        let mask = VariantMask::from_letters("ace").unwrap();
        assert!(mask.contains(CopyVariant::Standard));
        assert!(!mask.contains(CopyVariant::KernelOrig));
        assert!(mask.contains(CopyVariant::KernelOpt));
        assert!(!mask.contains(CopyVariant::PageOrig));
        assert!(mask.contains(CopyVariant::PageOpt));
    }

    #[test]
    fn test_mask_ignores_unknown_letters() {
        let mask = VariantMask::from_letters("zb!").unwrap();
        assert_eq!(mask.iter().collect::<Vec<_>>(), vec![CopyVariant::KernelOrig]);
    }

    #[test]
    fn test_empty_selection_is_an_error() {
        assert!(VariantMask::from_letters("xyz").is_err());
        assert!(VariantMask::from_letters("").is_err());
    }

    #[test]
    fn test_all_mask_iterates_in_registry_order() {
        let all: Vec<_> = VariantMask::ALL.iter().collect();
        assert_eq!(all, CopyVariant::ALL.to_vec());
    }

    #[test]
    fn test_page_copy_flag() {
        assert!(!CopyVariant::Standard.is_page_copy());
        assert!(!CopyVariant::KernelOpt.is_page_copy());
        assert!(CopyVariant::PageOrig.is_page_copy());
        assert!(CopyVariant::PageOpt.is_page_copy());
    }
}
