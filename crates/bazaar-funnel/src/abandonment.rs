//! Abandonment analysis
//!
//! Ranks the transitions where the funnel loses the most users and attaches
//! the severity and recommendation copy shown on the admin dashboard.

use crate::calculator::AnnotatedFunnel;
use crate::stage::FunnelStage;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Drop-off rate above which an abandonment point is critical
pub const DEFAULT_CRITICAL_THRESHOLD: f64 = 50.0;

/// Users lost on the way into a stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbandonmentPoint {
    /// Stage the users failed to reach
    pub stage: FunnelStage,
    /// Percentage of the previous stage lost, in `[0, 100]`
    #[serde(rename = "dropOffRate", alias = "rate")]
    pub drop_off_rate: f64,
    /// Users lost between the previous stage and this one
    #[serde(rename = "usersLost", alias = "dropOff")]
    pub users_lost: u64,
    /// `users_lost` times the revenue per lost user
    #[serde(rename = "revenueImpact", default)]
    pub revenue_impact: f64,
}

impl AbandonmentPoint {
    /// Severity against a critical threshold
    #[inline]
    #[must_use]
    pub fn severity(&self, critical_threshold: f64) -> Severity {
        classify_severity(self.drop_off_rate, critical_threshold)
    }
}

/// Dashboard severity of an abandonment point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// At or below the critical threshold
    Moderate,
    /// Strictly above the critical threshold
    Critical,
}

impl Severity {
    /// Human-readable label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Moderate => "Moderate",
            Self::Critical => "Critical",
        }
    }
}

/// Classify a drop-off rate
#[inline]
#[must_use]
pub fn classify_severity(drop_off_rate: f64, critical_threshold: f64) -> Severity {
    if drop_off_rate > critical_threshold {
        Severity::Critical
    } else {
        Severity::Moderate
    }
}

/// The `n` stages with the highest drop-off rate
///
/// Sorted by drop-off rate descending; equal rates keep canonical stage order
/// (earlier stage first). The entry stage has no drop-off and never appears.
/// Returns fewer than `n` points when the funnel is shorter, and nothing for
/// `n == 0`.
#[must_use]
pub fn top_abandonment_points(funnel: &AnnotatedFunnel, n: usize) -> Vec<AbandonmentPoint> {
    if n == 0 {
        return Vec::new();
    }

    let mut points = funnel.abandonment_points();
    points.sort_by(|a, b| {
        b.drop_off_rate
            .partial_cmp(&a.drop_off_rate)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.stage.cmp(&b.stage))
    });
    points.truncate(n);
    points
}

/// Recommended actions for improving conversion into a stage
#[must_use]
pub fn optimization_suggestions(stage: FunnelStage) -> &'static [&'static str] {
    match stage {
        FunnelStage::Visitors => &[
            "Improve SEO and marketing campaigns",
            "Optimize landing page design",
            "Enhance social media presence",
        ],
        FunnelStage::ProductViews => &[
            "Improve product categorization",
            "Enhance product images and descriptions",
            "Implement better search functionality",
        ],
        FunnelStage::AddToCart => &[
            "Optimize product pricing strategy",
            "Improve product page design",
            "Add social proof and reviews",
            "Implement urgency tactics",
        ],
        FunnelStage::CheckoutStarted => &[
            "Simplify checkout process",
            "Add multiple payment options",
            "Reduce form fields",
            "Improve mobile checkout experience",
        ],
        FunnelStage::CheckoutCompleted => &[
            "Optimize payment gateway",
            "Improve trust signals",
            "Add live chat support",
            "Offer guest checkout",
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::compute_funnel_view;
    use crate::snapshot::FunnelSnapshot;

    fn funnel(counts: &[i64]) -> AnnotatedFunnel {
        let pairs = FunnelStage::ALL
            .iter()
            .copied()
            .zip(counts.iter().copied())
            .collect();
        compute_funnel_view(&FunnelSnapshot::from_pairs(pairs), 1500.0).unwrap()
    }

    #[test]
    fn severity_threshold_is_strict() {
        assert_eq!(classify_severity(50.0, 50.0), Severity::Moderate);
        assert_eq!(classify_severity(50.01, 50.0), Severity::Critical);
        assert_eq!(classify_severity(0.0, 50.0), Severity::Moderate);
    }

    #[test]
    fn top_points_sorted_descending() {
        // drop-offs: 40, 66.67, 40, 33.33
        let view = funnel(&[1000, 600, 200, 120, 80]);
        let top = top_abandonment_points(&view, 3);

        let stages: Vec<_> = top.iter().map(|p| p.stage).collect();
        assert_eq!(
            stages,
            vec![
                FunnelStage::AddToCart,
                FunnelStage::ProductViews,
                FunnelStage::CheckoutStarted,
            ]
        );
    }

    #[test]
    fn ties_keep_canonical_order() {
        // every transition halves the funnel
        let view = funnel(&[160, 80, 40, 20, 10]);
        let top = top_abandonment_points(&view, 4);
        let stages: Vec<_> = top.iter().map(|p| p.stage).collect();
        assert_eq!(stages, FunnelStage::ALL[1..].to_vec());
    }

    #[test]
    fn n_larger_than_funnel() {
        let view = funnel(&[100, 50]);
        assert_eq!(top_abandonment_points(&view, 10).len(), 1);
    }

    #[test]
    fn zero_n_is_empty() {
        let view = funnel(&[1000, 600, 200, 120, 80]);
        assert!(top_abandonment_points(&view, 0).is_empty());
    }

    #[test]
    fn suggestions_exist_for_every_stage() {
        for stage in FunnelStage::ALL {
            assert!(!optimization_suggestions(stage).is_empty());
        }
    }

    #[test]
    fn severity_from_point() {
        let point = AbandonmentPoint {
            stage: FunnelStage::AddToCart,
            drop_off_rate: 66.7,
            users_lost: 400,
            revenue_impact: 0.0,
        };
        assert_eq!(point.severity(DEFAULT_CRITICAL_THRESHOLD), Severity::Critical);
        assert_eq!(point.severity(70.0), Severity::Moderate);
    }
}
