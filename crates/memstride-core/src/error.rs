//! Error types for memstride-core.

use thiserror::Error;

/// Errors that can occur while configuring a run.
///
/// The taxonomy is deliberately narrow: everything here is detected before
/// any measurement starts. A validation mismatch is not an error (the run
/// records it and continues), and a malformed scenario/variant pairing is a
/// programming defect rather than a runtime condition.
#[derive(Debug, Error)]
pub enum Error {
    /// Requested scenario index does not exist.
    #[error("scenario index out of range: {index} (catalog has {count})")]
    ScenarioOutOfRange {
        /// Index requested by the driver.
        index: usize,
        /// Number of scenarios in the catalog.
        count: usize,
    },

    /// Per-measurement duration outside the accepted range.
    #[error("duration out of range: {0}s (accepted: 0.1 up to 100)")]
    DurationOutOfRange(f64),

    /// Repeat count outside the accepted range.
    #[error("repeat count out of range: {0} (accepted: 1 up to 1000)")]
    RepeatOutOfRange(usize),

    /// Variant selection string named no known copy variants.
    #[error("variant selection {0:?} matches no copy variants")]
    EmptyVariantSelection(String),
}

/// Result type for harness configuration.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_scenario_out_of_range() {
        let err = Error::ScenarioOutOfRange { index: 48, count: 48 };
        let msg = err.to_string();
        assert!(msg.contains("48"));
        assert!(msg.contains("out of range"));
    }

    #[test]
    fn test_error_display_duration() {
        let err = Error::DurationOutOfRange(250.0);
        assert!(err.to_string().contains("250"));
    }

    #[test]
    fn test_error_implements_std_error() {
        fn assert_std_error<T: std::error::Error>() {}
        assert_std_error::<Error>();
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Error>();
    }
}
