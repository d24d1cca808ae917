//! Run configuration assembled by the external driver.

use std::time::Duration;

use crate::error::{Error, Result};
use crate::scenario::SCENARIO_COUNT;
use crate::variant::VariantMask;

/// Default per-measurement duration in seconds.
pub const DEFAULT_DURATION_SECS: f64 = 2.0;

/// Default repeat count for measurements and validation.
pub const DEFAULT_REPEAT: usize = 5;

/// What a run does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Benchmark one scenario by catalog index.
    Single(usize),
    /// Benchmark every scenario.
    All,
    /// Validate correctness instead of measuring.
    Validate,
}

/// Validated, immutable configuration for a whole run.
#[derive(Debug, Clone, Copy)]
pub struct RunConfig {
    /// Run mode.
    pub mode: Mode,
    /// Wall-clock duration of each individual measurement.
    pub duration: Duration,
    /// Times each measurement (or block of ten validation trials) repeats.
    pub repeat: usize,
    /// Active copy variants.
    pub mask: VariantMask,
}

impl RunConfig {
    /// Build a configuration, rejecting out-of-range values before any
    /// measurement can start.
    pub fn new(mode: Mode, duration_secs: f64, repeat: usize, mask: VariantMask) -> Result<Self> {
        if !(0.1..100.0).contains(&duration_secs) {
            return Err(Error::DurationOutOfRange(duration_secs));
        }
        if !(1..1000).contains(&repeat) {
            return Err(Error::RepeatOutOfRange(repeat));
        }
        if let Mode::Single(index) = mode {
            if index >= SCENARIO_COUNT {
                return Err(Error::ScenarioOutOfRange { index, count: SCENARIO_COUNT });
            }
        }
        Ok(Self {
            mode,
            duration: Duration::from_secs_f64(duration_secs),
            repeat,
            mask,
        })
    }

    /// The `--quick` shorthand: one-second measurements, two repeats.
    pub fn quick(mode: Mode, mask: VariantMask) -> Result<Self> {
        Self::new(mode, 1.0, 2, mask)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_accepted() {
        let config =
            RunConfig::new(Mode::All, DEFAULT_DURATION_SECS, DEFAULT_REPEAT, VariantMask::ALL)
                .unwrap();
        assert_eq!(config.duration, Duration::from_secs(2));
        assert_eq!(config.repeat, 5);
    }

    #[test]
    fn test_scenario_index_bounds() {
        assert!(RunConfig::new(Mode::Single(0), 2.0, 5, VariantMask::ALL).is_ok());
        assert!(RunConfig::new(Mode::Single(SCENARIO_COUNT - 1), 2.0, 5, VariantMask::ALL).is_ok());
        let err = RunConfig::new(Mode::Single(SCENARIO_COUNT), 2.0, 5, VariantMask::ALL)
            .unwrap_err();
        assert!(matches!(err, Error::ScenarioOutOfRange { index, .. } if index == SCENARIO_COUNT));
    }

    #[test]
    fn test_duration_bounds() {
        assert!(RunConfig::new(Mode::All, 0.1, 5, VariantMask::ALL).is_ok());
        assert!(RunConfig::new(Mode::All, 99.9, 5, VariantMask::ALL).is_ok());
        assert!(RunConfig::new(Mode::All, 0.05, 5, VariantMask::ALL).is_err());
        assert!(RunConfig::new(Mode::All, 100.0, 5, VariantMask::ALL).is_err());
    }

    #[test]
    fn test_repeat_bounds() {
        assert!(RunConfig::new(Mode::All, 2.0, 1, VariantMask::ALL).is_ok());
        assert!(RunConfig::new(Mode::All, 2.0, 999, VariantMask::ALL).is_ok());
        assert!(RunConfig::new(Mode::All, 2.0, 0, VariantMask::ALL).is_err());
        assert!(RunConfig::new(Mode::All, 2.0, 1000, VariantMask::ALL).is_err());
    }

    #[test]
    fn test_quick_shorthand() {
        let config = RunConfig::quick(Mode::Validate, VariantMask::ALL).unwrap();
        assert_eq!(config.duration, Duration::from_secs(1));
        assert_eq!(config.repeat, 2);
    }
}
