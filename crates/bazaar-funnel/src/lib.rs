//! Bazaar Funnel Metrics
//!
//! Conversion funnel analytics for the marketplace admin dashboards.
//!
//! # Core Concepts
//!
//! - [`FunnelStage`]: The five fixed steps from visit to purchase
//! - [`FunnelSnapshot`]: Raw stage counts for one reporting period
//! - [`AnnotatedFunnel`]: Conversion, drop-off and revenue impact per stage
//! - [`AbandonmentPoint`]: Users lost on the way into a stage
//! - [`FunnelMetricsCalculator`]: Configured front end producing reports
//!
//! Everything here is a pure function of its inputs; callers own any state.
//!
//! # Example
//!
//! ```rust
//! use bazaar_funnel::{compute_funnel_view, top_abandonment_points, FunnelSnapshot, FunnelStage};
//!
//! let snapshot = FunnelSnapshot::new()
//!     .with_stage(FunnelStage::Visitors, 1000)
//!     .with_stage(FunnelStage::ProductViews, 600)
//!     .with_stage(FunnelStage::AddToCart, 200);
//!
//! let view = compute_funnel_view(&snapshot, 1500.0)?;
//! let worst = top_abandonment_points(&view, 1);
//! assert_eq!(worst[0].stage, FunnelStage::AddToCart);
//! # Ok::<(), bazaar_funnel::FunnelError>(())
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod abandonment;
mod calculator;
mod config;
mod error;
mod snapshot;
mod stage;

// Re-exports
pub use abandonment::{
    classify_severity, optimization_suggestions, top_abandonment_points, AbandonmentPoint,
    Severity, DEFAULT_CRITICAL_THRESHOLD,
};
pub use calculator::{
    compute_funnel_view, AnnotatedFunnel, FunnelMetricsCalculator, FunnelReport,
    RankedAbandonment, StageView,
};
pub use config::AnalyticsConfig;
pub use error::{ConfigError, FunnelError};
pub use snapshot::{FunnelCounts, FunnelSnapshot};
pub use stage::FunnelStage;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
