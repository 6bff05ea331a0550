//! Funnel metrics calculator
//!
//! Derives per-stage conversion and drop-off rates from a [`FunnelSnapshot`].
//!
//! # Rates
//! - conversion: `count / visitors * 100`, 0 when there are no visitors
//! - drop-off: `(previous - count) / previous * 100`, 0 when `previous` is 0
//!
//! Both are clamped to `[0, 100]`. A stage reporting more users than the
//! stage before it is a data anomaly: it is accepted, logged, and treated as
//! losing nobody (drop-off 0, users lost 0) rather than as a negative loss.

use crate::abandonment::{self, AbandonmentPoint, Severity};
use crate::config::AnalyticsConfig;
use crate::error::FunnelError;
use crate::snapshot::FunnelSnapshot;
use crate::stage::FunnelStage;
use serde::Serialize;

/// Derived metrics for one stage
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StageView {
    /// Stage
    pub stage: FunnelStage,
    /// Users reaching the stage
    pub count: u64,
    /// Percentage of visitors reaching the stage
    pub conversion_rate: f64,
    /// Percentage of the previous stage lost; `None` for the entry stage
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drop_off_rate: Option<f64>,
    /// Users lost since the previous stage
    pub users_lost: u64,
    /// Estimated revenue lost with those users
    pub revenue_impact: f64,
}

/// A snapshot with every stage annotated
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotatedFunnel {
    stages: Vec<StageView>,
    revenue_per_lost_user: f64,
}

impl AnnotatedFunnel {
    /// Stage views in canonical order
    #[inline]
    #[must_use]
    pub fn stages(&self) -> &[StageView] {
        &self.stages
    }

    /// View for one stage, if the snapshot reached it
    #[must_use]
    pub fn stage(&self, stage: FunnelStage) -> Option<&StageView> {
        self.stages.get(stage.index()).filter(|v| v.stage == stage)
    }

    /// Multiplier used for revenue impact
    #[inline]
    #[must_use]
    pub fn revenue_per_lost_user(&self) -> f64 {
        self.revenue_per_lost_user
    }

    /// Conversion rate of the deepest stage supplied
    #[must_use]
    pub fn overall_conversion_rate(&self) -> f64 {
        self.stages.last().map_or(0.0, |v| v.conversion_rate)
    }

    /// Users lost across all transitions
    #[must_use]
    pub fn total_users_lost(&self) -> u64 {
        self.stages.iter().map(|v| v.users_lost).sum()
    }

    /// Revenue impact across all transitions
    #[must_use]
    pub fn total_revenue_impact(&self) -> f64 {
        self.stages.iter().map(|v| v.revenue_impact).sum()
    }

    /// One abandonment point per non-entry stage, in canonical order
    #[must_use]
    pub fn abandonment_points(&self) -> Vec<AbandonmentPoint> {
        self.stages
            .iter()
            .filter_map(|v| {
                v.drop_off_rate.map(|rate| AbandonmentPoint {
                    stage: v.stage,
                    drop_off_rate: rate,
                    users_lost: v.users_lost,
                    revenue_impact: v.revenue_impact,
                })
            })
            .collect()
    }
}

/// Annotate a snapshot with conversion, drop-off and revenue impact
///
/// The snapshot must be a non-empty, contiguous prefix of the canonical stage
/// order starting at [`FunnelStage::Visitors`], with non-negative counts.
///
/// # Errors
/// - [`FunnelError::InvalidInput`] for an empty or over-long snapshot
/// - [`FunnelError::OutOfOrder`] when a stage is out of canonical order
/// - [`FunnelError::NegativeCount`] for any negative count
/// - [`FunnelError::InvalidRevenue`] for a negative or non-finite multiplier
pub fn compute_funnel_view(
    snapshot: &FunnelSnapshot,
    revenue_per_lost_user: f64,
) -> Result<AnnotatedFunnel, FunnelError> {
    if !revenue_per_lost_user.is_finite() || revenue_per_lost_user < 0.0 {
        return Err(FunnelError::InvalidRevenue(revenue_per_lost_user));
    }

    let counts = validated_counts(snapshot)?;
    let visitors = counts[0].1;

    let mut stages = Vec::with_capacity(counts.len());
    let mut previous: Option<u64> = None;

    for (stage, count) in counts {
        let view = match previous {
            None => StageView {
                stage,
                count,
                conversion_rate: if count > 0 { 100.0 } else { 0.0 },
                drop_off_rate: None,
                users_lost: 0,
                revenue_impact: 0.0,
            },
            Some(prev) => {
                if count > prev {
                    tracing::warn!(
                        stage = %stage,
                        previous = prev,
                        count,
                        "funnel stage exceeds previous stage, clamping drop-off to zero"
                    );
                }
                let users_lost = prev.saturating_sub(count);
                StageView {
                    stage,
                    count,
                    conversion_rate: percentage(count, visitors),
                    drop_off_rate: Some(percentage(users_lost, prev)),
                    users_lost,
                    revenue_impact: to_f64(users_lost) * revenue_per_lost_user,
                }
            }
        };
        previous = Some(count);
        stages.push(view);
    }

    tracing::debug!(
        stages = stages.len(),
        visitors,
        revenue_per_lost_user,
        "computed funnel view"
    );

    Ok(AnnotatedFunnel {
        stages,
        revenue_per_lost_user,
    })
}

/// Check ordering and sign, returning unsigned counts
fn validated_counts(snapshot: &FunnelSnapshot) -> Result<Vec<(FunnelStage, u64)>, FunnelError> {
    if snapshot.is_empty() {
        return Err(FunnelError::InvalidInput(
            "snapshot has no stages".to_string(),
        ));
    }

    snapshot
        .stages()
        .iter()
        .enumerate()
        .map(|(position, &(stage, count))| {
            let expected = FunnelStage::from_index(position).ok_or_else(|| {
                FunnelError::InvalidInput(format!(
                    "snapshot has {} stages, funnel has {}",
                    snapshot.len(),
                    FunnelStage::ALL.len()
                ))
            })?;
            if stage != expected {
                return Err(FunnelError::OutOfOrder {
                    position,
                    expected,
                    found: stage,
                });
            }
            let count =
                u64::try_from(count).map_err(|_| FunnelError::NegativeCount { stage, count })?;
            Ok((stage, count))
        })
        .collect()
}

/// `part / whole * 100`, zero-guarded and clamped to `[0, 100]`
fn percentage(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    (to_f64(part) / to_f64(whole) * 100.0).clamp(0.0, 100.0)
}

#[allow(clippy::cast_precision_loss)]
fn to_f64(value: u64) -> f64 {
    value as f64
}

/// An abandonment point with dashboard annotations
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedAbandonment {
    /// Underlying point
    #[serde(flatten)]
    pub point: AbandonmentPoint,
    /// Severity against the configured threshold
    pub severity: Severity,
    /// Recommended actions for this stage
    pub suggestions: &'static [&'static str],
}

/// Annotated funnel plus its worst abandonment points
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FunnelReport {
    /// Full annotated funnel
    pub funnel: AnnotatedFunnel,
    /// Worst transitions, highest drop-off first
    pub top_abandonment: Vec<RankedAbandonment>,
}

/// Configured front end over [`compute_funnel_view`]
#[derive(Debug, Clone, Default)]
pub struct FunnelMetricsCalculator {
    config: AnalyticsConfig,
}

impl FunnelMetricsCalculator {
    /// Create calculator with configuration
    #[inline]
    #[must_use]
    pub fn new(config: AnalyticsConfig) -> Self {
        Self { config }
    }

    /// Active configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &AnalyticsConfig {
        &self.config
    }

    /// Annotate a snapshot using the configured revenue multiplier
    ///
    /// # Errors
    /// See [`compute_funnel_view`].
    pub fn compute(&self, snapshot: &FunnelSnapshot) -> Result<AnnotatedFunnel, FunnelError> {
        compute_funnel_view(snapshot, self.config.revenue_per_lost_user)
    }

    /// Worst `n` abandonment points of an annotated funnel
    #[inline]
    #[must_use]
    pub fn top_abandonment_points(&self, funnel: &AnnotatedFunnel, n: usize) -> Vec<AbandonmentPoint> {
        abandonment::top_abandonment_points(funnel, n)
    }

    /// Annotate a snapshot and rank its configured number of worst points
    ///
    /// # Errors
    /// See [`compute_funnel_view`].
    pub fn report(&self, snapshot: &FunnelSnapshot) -> Result<FunnelReport, FunnelError> {
        let funnel = self.compute(snapshot)?;
        let top_abandonment = abandonment::top_abandonment_points(
            &funnel,
            self.config.top_abandonment_points,
        )
        .into_iter()
        .map(|point| RankedAbandonment {
            severity: point.severity(self.config.critical_drop_off_threshold),
            suggestions: abandonment::optimization_suggestions(point.stage),
            point,
        })
        .collect();

        Ok(FunnelReport {
            funnel,
            top_abandonment,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 0.01
    }

    fn sample() -> FunnelSnapshot {
        FunnelSnapshot::new()
            .with_stage(FunnelStage::Visitors, 1000)
            .with_stage(FunnelStage::ProductViews, 600)
            .with_stage(FunnelStage::AddToCart, 200)
            .with_stage(FunnelStage::CheckoutStarted, 120)
            .with_stage(FunnelStage::CheckoutCompleted, 80)
    }

    #[test]
    fn worked_example() {
        let view = compute_funnel_view(&sample(), 1500.0).unwrap();

        let pv = view.stage(FunnelStage::ProductViews).unwrap();
        assert!(approx(pv.conversion_rate, 60.0));
        assert!(approx(pv.drop_off_rate.unwrap(), 40.0));
        assert_eq!(pv.users_lost, 400);
        assert!(approx(pv.revenue_impact, 600_000.0));

        let done = view.stage(FunnelStage::CheckoutCompleted).unwrap();
        assert!(approx(done.conversion_rate, 8.0));
        assert!(approx(done.drop_off_rate.unwrap(), 33.33));
        assert_eq!(done.users_lost, 40);
        assert!(approx(done.revenue_impact, 60_000.0));
    }

    #[test]
    fn entry_stage_has_no_drop_off() {
        let view = compute_funnel_view(&sample(), 1500.0).unwrap();
        let entry = &view.stages()[0];
        assert_eq!(entry.stage, FunnelStage::Visitors);
        assert!(approx(entry.conversion_rate, 100.0));
        assert_eq!(entry.drop_off_rate, None);
        assert_eq!(entry.users_lost, 0);
    }

    #[test]
    fn visitors_only() {
        let snapshot = FunnelSnapshot::new().with_stage(FunnelStage::Visitors, 42);
        let view = compute_funnel_view(&snapshot, 1500.0).unwrap();
        assert_eq!(view.stages().len(), 1);
        assert!(approx(view.stages()[0].conversion_rate, 100.0));
        assert!(view.abandonment_points().is_empty());
    }

    #[test]
    fn zero_visitors_guarded() {
        let snapshot = FunnelSnapshot::new()
            .with_stage(FunnelStage::Visitors, 0)
            .with_stage(FunnelStage::ProductViews, 0);
        let view = compute_funnel_view(&snapshot, 1500.0).unwrap();
        assert!(approx(view.stages()[0].conversion_rate, 0.0));
        assert!(approx(view.stages()[1].conversion_rate, 0.0));
        assert_eq!(view.stages()[1].drop_off_rate, Some(0.0));
    }

    #[test]
    fn anomalous_increase_clamped() {
        let snapshot = FunnelSnapshot::new()
            .with_stage(FunnelStage::Visitors, 100)
            .with_stage(FunnelStage::ProductViews, 80)
            .with_stage(FunnelStage::AddToCart, 70)
            .with_stage(FunnelStage::CheckoutStarted, 50)
            .with_stage(FunnelStage::CheckoutCompleted, 60);
        let view = compute_funnel_view(&snapshot, 1500.0).unwrap();
        let done = view.stage(FunnelStage::CheckoutCompleted).unwrap();
        assert_eq!(done.drop_off_rate, Some(0.0));
        assert_eq!(done.users_lost, 0);
        assert!(approx(done.revenue_impact, 0.0));
    }

    #[test]
    fn conversion_clamped_above_visitors() {
        let snapshot = FunnelSnapshot::new()
            .with_stage(FunnelStage::Visitors, 10)
            .with_stage(FunnelStage::ProductViews, 30);
        let view = compute_funnel_view(&snapshot, 1.0).unwrap();
        assert!(approx(view.stages()[1].conversion_rate, 100.0));
    }

    #[test]
    fn negative_count_rejected() {
        let snapshot = FunnelSnapshot::new()
            .with_stage(FunnelStage::Visitors, 10)
            .with_stage(FunnelStage::ProductViews, -1);
        let err = compute_funnel_view(&snapshot, 1.0).unwrap_err();
        assert_eq!(
            err,
            FunnelError::NegativeCount {
                stage: FunnelStage::ProductViews,
                count: -1
            }
        );
    }

    #[test]
    fn out_of_order_rejected() {
        let snapshot = FunnelSnapshot::new()
            .with_stage(FunnelStage::Visitors, 10)
            .with_stage(FunnelStage::AddToCart, 5);
        let err = compute_funnel_view(&snapshot, 1.0).unwrap_err();
        assert!(matches!(
            err,
            FunnelError::OutOfOrder {
                position: 1,
                expected: FunnelStage::ProductViews,
                found: FunnelStage::AddToCart
            }
        ));
    }

    #[test]
    fn must_start_at_visitors() {
        let snapshot = FunnelSnapshot::new().with_stage(FunnelStage::ProductViews, 10);
        assert!(compute_funnel_view(&snapshot, 1.0).is_err());
    }

    #[test]
    fn empty_and_overlong_rejected() {
        assert!(compute_funnel_view(&FunnelSnapshot::new(), 1.0)
            .unwrap_err()
            .is_invalid_input());

        let mut snapshot = sample();
        snapshot = snapshot.with_stage(FunnelStage::CheckoutCompleted, 10);
        assert!(matches!(
            compute_funnel_view(&snapshot, 1.0),
            Err(FunnelError::InvalidInput(_))
        ));
    }

    #[test]
    fn invalid_revenue_rejected() {
        for bad in [-1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                compute_funnel_view(&sample(), bad),
                Err(FunnelError::InvalidRevenue(_))
            ));
        }
    }

    #[test]
    fn totals() {
        let view = compute_funnel_view(&sample(), 10.0).unwrap();
        assert_eq!(view.total_users_lost(), 920);
        assert!(approx(view.total_revenue_impact(), 9200.0));
        assert!(approx(view.overall_conversion_rate(), 8.0));
    }

    #[test]
    fn report_uses_config() {
        let config = AnalyticsConfig::new()
            .with_revenue_per_lost_user(100.0)
            .with_top_abandonment_points(2);
        let calculator = FunnelMetricsCalculator::new(config);
        let report = calculator.report(&sample()).unwrap();

        assert_eq!(report.top_abandonment.len(), 2);
        let worst = &report.top_abandonment[0];
        assert_eq!(worst.point.stage, FunnelStage::AddToCart);
        assert_eq!(worst.severity, Severity::Critical);
        assert!(!worst.suggestions.is_empty());
        assert!(approx(worst.point.revenue_impact, 40_000.0));
        assert_eq!(report.top_abandonment[1].severity, Severity::Moderate);
    }
}
