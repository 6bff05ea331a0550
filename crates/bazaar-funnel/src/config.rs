//! Analytics configuration

use crate::abandonment::DEFAULT_CRITICAL_THRESHOLD;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Tunables for funnel reporting
///
/// Every field has a default, so a TOML file only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// Revenue attributed to each lost user
    pub revenue_per_lost_user: f64,
    /// Drop-off rate above which a point is critical
    pub critical_drop_off_threshold: f64,
    /// Number of abandonment points included in reports
    pub top_abandonment_points: usize,
}

impl AnalyticsConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With revenue per lost user
    #[inline]
    #[must_use]
    pub fn with_revenue_per_lost_user(mut self, revenue: f64) -> Self {
        self.revenue_per_lost_user = revenue;
        self
    }

    /// With critical drop-off threshold
    #[inline]
    #[must_use]
    pub fn with_critical_threshold(mut self, threshold: f64) -> Self {
        self.critical_drop_off_threshold = threshold;
        self
    }

    /// With number of reported abandonment points
    #[inline]
    #[must_use]
    pub fn with_top_abandonment_points(mut self, n: usize) -> Self {
        self.top_abandonment_points = n;
        self
    }

    /// Parse from TOML and validate
    ///
    /// # Errors
    /// Returns [`ConfigError::Parse`] for malformed TOML and
    /// [`ConfigError::Invalid`] for out-of-range values.
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges
    ///
    /// # Errors
    /// Returns [`ConfigError::Invalid`] naming the first bad field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.revenue_per_lost_user.is_finite() || self.revenue_per_lost_user < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "revenue_per_lost_user must be finite and non-negative, got {}",
                self.revenue_per_lost_user
            )));
        }
        if !(0.0..=100.0).contains(&self.critical_drop_off_threshold) {
            return Err(ConfigError::Invalid(format!(
                "critical_drop_off_threshold must be within 0..=100, got {}",
                self.critical_drop_off_threshold
            )));
        }
        Ok(())
    }
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            revenue_per_lost_user: 1500.0,
            critical_drop_off_threshold: DEFAULT_CRITICAL_THRESHOLD,
            top_abandonment_points: 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = AnalyticsConfig::default();
        assert!((config.revenue_per_lost_user - 1500.0).abs() < f64::EPSILON);
        assert!((config.critical_drop_off_threshold - 50.0).abs() < f64::EPSILON);
        assert_eq!(config.top_abandonment_points, 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = AnalyticsConfig::from_toml_str("top_abandonment_points = 2\n").unwrap();
        assert_eq!(config.top_abandonment_points, 2);
        assert!((config.revenue_per_lost_user - 1500.0).abs() < f64::EPSILON);
    }

    #[test]
    fn full_toml() {
        let input = r"
            revenue_per_lost_user = 250.5
            critical_drop_off_threshold = 65.0
            top_abandonment_points = 4
        ";
        let config = AnalyticsConfig::from_toml_str(input).unwrap();
        assert_eq!(
            config,
            AnalyticsConfig::new()
                .with_revenue_per_lost_user(250.5)
                .with_critical_threshold(65.0)
                .with_top_abandonment_points(4)
        );
    }

    #[test]
    fn malformed_toml() {
        let err = AnalyticsConfig::from_toml_str("revenue_per_lost_user = \"lots\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn out_of_range_values() {
        let err = AnalyticsConfig::from_toml_str("revenue_per_lost_user = -3.0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = AnalyticsConfig::from_toml_str("critical_drop_off_threshold = 120.0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }
}
