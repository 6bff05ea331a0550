//! Error types for funnel analysis
//!
//! Every failure here is a rejected input: the data is malformed, not
//! transiently unavailable, so nothing is ever retryable.

use crate::stage::FunnelStage;

/// Errors raised while deriving funnel metrics
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FunnelError {
    /// Generic malformed input
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Stage does not follow the canonical funnel order
    #[error("invalid input: stage at position {position} is {found}, expected {expected}")]
    OutOfOrder {
        /// Zero-based position in the snapshot
        position: usize,
        /// Stage required at that position
        expected: FunnelStage,
        /// Stage actually supplied
        found: FunnelStage,
    },

    /// A stage reported fewer than zero users
    #[error("invalid input: stage {stage} has negative count {count}")]
    NegativeCount {
        /// Offending stage
        stage: FunnelStage,
        /// Reported count
        count: i64,
    },

    /// Revenue multiplier is negative, NaN or infinite
    #[error("invalid input: revenue per lost user must be finite and non-negative, got {0}")]
    InvalidRevenue(f64),
}

impl FunnelError {
    /// Whether this error is a rejected input
    ///
    /// Always true today; kept as a classifier so callers do not match on
    /// individual variants.
    #[inline]
    #[must_use]
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            Self::InvalidInput(_)
                | Self::OutOfOrder { .. }
                | Self::NegativeCount { .. }
                | Self::InvalidRevenue(_)
        )
    }

    /// Whether retrying the same call could succeed
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        false
    }
}

/// Errors raised while loading [`AnalyticsConfig`](crate::AnalyticsConfig)
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML could not be parsed into the config shape
    #[error("failed to parse analytics config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Parsed but semantically invalid
    #[error("invalid analytics config: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_variants_are_invalid_input() {
        let errors = [
            FunnelError::InvalidInput("empty".into()),
            FunnelError::OutOfOrder {
                position: 1,
                expected: FunnelStage::ProductViews,
                found: FunnelStage::AddToCart,
            },
            FunnelError::NegativeCount {
                stage: FunnelStage::Visitors,
                count: -1,
            },
            FunnelError::InvalidRevenue(f64::NAN),
        ];
        for err in &errors {
            assert!(err.is_invalid_input());
            assert!(!err.is_retryable());
        }
    }

    #[test]
    fn display_names_the_stage() {
        let err = FunnelError::NegativeCount {
            stage: FunnelStage::AddToCart,
            count: -5,
        };
        assert_eq!(
            err.to_string(),
            "invalid input: stage addToCart has negative count -5"
        );
    }
}
