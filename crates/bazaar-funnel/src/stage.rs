//! Funnel stages
//!
//! Provides [`FunnelStage`], the fixed and totally ordered sequence of steps a
//! shopper passes through on the way to a completed purchase.

use crate::error::FunnelError;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// One step of the purchase funnel
///
/// Variants are declared in canonical order, so the derived `Ord` matches the
/// funnel order: `Visitors < ProductViews < ... < CheckoutCompleted`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FunnelStage {
    /// Unique visitors who landed on the storefront
    #[serde(rename = "visitors")]
    Visitors,
    /// Visitors who viewed at least one product
    #[serde(rename = "productViews")]
    ProductViews,
    /// Products added to a cart
    #[serde(rename = "addToCart")]
    AddToCart,
    /// Shoppers who initiated checkout
    #[serde(rename = "checkoutStarted")]
    CheckoutStarted,
    /// Completed orders
    #[serde(rename = "purchase", alias = "checkoutCompleted")]
    CheckoutCompleted,
}

impl FunnelStage {
    /// All stages in canonical order
    pub const ALL: [FunnelStage; 5] = [
        FunnelStage::Visitors,
        FunnelStage::ProductViews,
        FunnelStage::AddToCart,
        FunnelStage::CheckoutStarted,
        FunnelStage::CheckoutCompleted,
    ];

    /// Position in the canonical order (Visitors = 0)
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Stage at a canonical position
    #[inline]
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// The stage that follows this one, if any
    #[inline]
    #[must_use]
    pub fn next(self) -> Option<Self> {
        Self::from_index(self.index() + 1)
    }

    /// The stage that precedes this one, if any
    #[inline]
    #[must_use]
    pub fn previous(self) -> Option<Self> {
        self.index().checked_sub(1).and_then(Self::from_index)
    }

    /// Whether this is the entry stage of the funnel
    #[inline]
    #[must_use]
    pub const fn is_entry(self) -> bool {
        matches!(self, Self::Visitors)
    }

    /// Stable identifier used by the analytics API
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Visitors => "visitors",
            Self::ProductViews => "productViews",
            Self::AddToCart => "addToCart",
            Self::CheckoutStarted => "checkoutStarted",
            Self::CheckoutCompleted => "purchase",
        }
    }

    /// Dashboard label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Visitors => "Total Visitors",
            Self::ProductViews => "Product Views",
            Self::AddToCart => "Add to Cart",
            Self::CheckoutStarted => "Checkout Started",
            Self::CheckoutCompleted => "Purchase Completed",
        }
    }

    /// One-line description of who is counted at this stage
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Visitors => "Unique visitors who landed on your site",
            Self::ProductViews => "Users who viewed at least one product",
            Self::AddToCart => "Products added to shopping cart",
            Self::CheckoutStarted => "Users who initiated checkout process",
            Self::CheckoutCompleted => "Successful order completions",
        }
    }
}

impl Display for FunnelStage {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for FunnelStage {
    type Err = FunnelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "visitors" => Ok(Self::Visitors),
            "productViews" => Ok(Self::ProductViews),
            "addToCart" => Ok(Self::AddToCart),
            "checkoutStarted" => Ok(Self::CheckoutStarted),
            "purchase" | "checkoutCompleted" => Ok(Self::CheckoutCompleted),
            other => Err(FunnelError::InvalidInput(format!(
                "unknown funnel stage: {other}"
            ))),
        }
    }
}
