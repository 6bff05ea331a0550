//! Funnel snapshots
//!
//! A [`FunnelSnapshot`] is the raw input for one reporting period: ordered
//! `(stage, count)` pairs as supplied by the analytics source. Counts are
//! signed at this boundary so malformed feeds can be detected and rejected
//! by the calculator rather than wrapped silently.

use crate::abandonment::AbandonmentPoint;
use crate::stage::FunnelStage;
use serde::{Deserialize, Serialize};

/// Ordered stage counts for one reporting period
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FunnelSnapshot {
    stages: Vec<(FunnelStage, i64)>,
    #[serde(default)]
    abandonment_points: Vec<AbandonmentPoint>,
}

impl FunnelSnapshot {
    /// Create empty snapshot
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a stage count
    ///
    /// Order is not checked here; the calculator rejects out-of-order input.
    #[inline]
    #[must_use]
    pub fn with_stage(mut self, stage: FunnelStage, count: i64) -> Self {
        self.stages.push((stage, count));
        self
    }

    /// Build from raw pairs
    #[inline]
    #[must_use]
    pub fn from_pairs(stages: Vec<(FunnelStage, i64)>) -> Self {
        Self {
            stages,
            abandonment_points: Vec::new(),
        }
    }

    /// Attach abandonment points reported by the analytics source
    #[inline]
    #[must_use]
    pub fn with_reported_abandonment(mut self, points: Vec<AbandonmentPoint>) -> Self {
        self.abandonment_points = points;
        self
    }

    /// Stage counts in supplied order
    #[inline]
    #[must_use]
    pub fn stages(&self) -> &[(FunnelStage, i64)] {
        &self.stages
    }

    /// Abandonment points as reported upstream, if any
    ///
    /// These are informational; derived metrics never read them.
    #[inline]
    #[must_use]
    pub fn reported_abandonment_points(&self) -> &[AbandonmentPoint] {
        &self.abandonment_points
    }

    /// Count for a stage, if present
    #[must_use]
    pub fn count(&self, stage: FunnelStage) -> Option<i64> {
        self.stages
            .iter()
            .find(|(s, _)| *s == stage)
            .map(|(_, c)| *c)
    }

    /// Number of stages supplied
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Whether no stages were supplied
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}

/// Flat funnel record as returned by the analytics API
///
/// Field names follow the API's camelCase keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunnelCounts {
    /// Unique visitors
    pub total_visitors: i64,
    /// Users who viewed a product
    pub product_views: i64,
    /// Add-to-cart events
    pub add_to_cart: i64,
    /// Checkouts started
    pub checkout_started: i64,
    /// Checkouts completed
    pub checkout_completed: i64,
    /// Abandonment points precomputed upstream
    #[serde(default)]
    pub abandonment_points: Vec<AbandonmentPoint>,
}

impl From<FunnelCounts> for FunnelSnapshot {
    fn from(counts: FunnelCounts) -> Self {
        FunnelSnapshot::from_pairs(vec![
            (FunnelStage::Visitors, counts.total_visitors),
            (FunnelStage::ProductViews, counts.product_views),
            (FunnelStage::AddToCart, counts.add_to_cart),
            (FunnelStage::CheckoutStarted, counts.checkout_started),
            (FunnelStage::CheckoutCompleted, counts.checkout_completed),
        ])
        .with_reported_abandonment(counts.abandonment_points)
    }
}
