//! Staff roles
//!
//! The closed set of staff roles and the fixed role table mapping each role
//! to what it grants.

use crate::error::AccessError;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Marker permission held by partition admins
pub const PARTITION_FULL_ACCESS: &str = "partition_full_access";

/// Marker permission added on resolution for partition admins
pub const PARTITION_SPECIFIC_ACCESS: &str = "partition_specific_access";

/// A staff role
///
/// Serialized as its id (`super_admin`, `viewer`, ...). Deserializing an
/// unknown id fails rather than picking a default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum Role {
    /// Full system access across all partitions
    SuperAdmin,
    /// Full access to assigned partitions
    PartitionAdmin,
    /// Daily operations across partitions
    OperationsManager,
    /// Content and catalog
    ContentManager,
    /// Financial operations
    FinanceManager,
    /// Customer inquiries and issues
    CustomerSupport,
    /// Read-only dashboards
    Viewer,
}

/// What a role grants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleGrant {
    /// Every permission in the catalog
    Wildcard,
    /// Full access scoped to the staff member's partitions
    PartitionScoped,
    /// A fixed list of permission ids
    Fixed(&'static [&'static str]),
}

impl Role {
    /// All roles in table order
    pub const ALL: [Role; 7] = [
        Role::SuperAdmin,
        Role::PartitionAdmin,
        Role::OperationsManager,
        Role::ContentManager,
        Role::FinanceManager,
        Role::CustomerSupport,
        Role::Viewer,
    ];

    /// Stable identifier
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::SuperAdmin => "super_admin",
            Self::PartitionAdmin => "partition_admin",
            Self::OperationsManager => "operations_manager",
            Self::ContentManager => "content_manager",
            Self::FinanceManager => "finance_manager",
            Self::CustomerSupport => "customer_support",
            Self::Viewer => "viewer",
        }
    }

    /// Display name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::SuperAdmin => "Super Admin",
            Self::PartitionAdmin => "Partition Admin",
            Self::OperationsManager => "Operations Manager",
            Self::ContentManager => "Content Manager",
            Self::FinanceManager => "Finance Manager",
            Self::CustomerSupport => "Customer Support",
            Self::Viewer => "Viewer",
        }
    }

    /// One-line description
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::SuperAdmin => "Full system access across all partitions",
            Self::PartitionAdmin => "Full access to specific partitions",
            Self::OperationsManager => "Manage daily operations across partitions",
            Self::ContentManager => "Manage content and catalog",
            Self::FinanceManager => "Handle financial operations",
            Self::CustomerSupport => "Handle customer inquiries and issues",
            Self::Viewer => "Read-only access to dashboards",
        }
    }

    /// Role table entry
    #[must_use]
    pub const fn grant(self) -> RoleGrant {
        match self {
            Self::SuperAdmin => RoleGrant::Wildcard,
            Self::PartitionAdmin => RoleGrant::PartitionScoped,
            Self::OperationsManager => RoleGrant::Fixed(&[
                "order_management",
                "inventory_management",
                "vendor_management",
                "customer_support",
            ]),
            Self::ContentManager => RoleGrant::Fixed(&[
                "product_management",
                "category_management",
                "content_moderation",
                "seo_management",
            ]),
            Self::FinanceManager => RoleGrant::Fixed(&[
                "payment_processing",
                "financial_reporting",
                "refund_management",
                "commission_tracking",
            ]),
            Self::CustomerSupport => RoleGrant::Fixed(&[
                "customer_support",
                "order_tracking",
                "return_processing",
                "chat_moderation",
            ]),
            Self::Viewer => RoleGrant::Fixed(&["dashboard_view", "report_view", "analytics_view"]),
        }
    }

    /// Whether this role sees every partition regardless of assignment
    #[inline]
    #[must_use]
    pub const fn is_global(self) -> bool {
        matches!(self, Self::SuperAdmin)
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Role {
    type Err = AccessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|role| role.id() == s)
            .ok_or_else(|| AccessError::UnknownRole(s.to_string()))
    }
}

impl TryFrom<String> for Role {
    type Error = AccessError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Role> for &'static str {
    fn from(role: Role) -> Self {
        role.id()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_roundtrip() {
        for role in Role::ALL {
            assert_eq!(role.id().parse::<Role>().unwrap(), role);
        }
    }

    #[test]
    fn unknown_id_is_error() {
        assert_eq!(
            "admin".parse::<Role>(),
            Err(AccessError::UnknownRole("admin".to_string()))
        );
        assert!("".parse::<Role>().is_err());
        assert!("Viewer".parse::<Role>().is_err());
    }

    #[test]
    fn serde_by_id() {
        let json = serde_json::to_string(&Role::FinanceManager).unwrap();
        assert_eq!(json, "\"finance_manager\"");
        let role: Role = serde_json::from_str("\"viewer\"").unwrap();
        assert_eq!(role, Role::Viewer);
        assert!(serde_json::from_str::<Role>("\"owner\"").is_err());
    }

    #[test]
    fn grants() {
        assert_eq!(Role::SuperAdmin.grant(), RoleGrant::Wildcard);
        assert_eq!(Role::PartitionAdmin.grant(), RoleGrant::PartitionScoped);
        assert!(matches!(Role::Viewer.grant(), RoleGrant::Fixed(ids) if ids.len() == 3));
    }

    #[test]
    fn only_super_admin_is_global() {
        let global: Vec<_> = Role::ALL.into_iter().filter(|r| r.is_global()).collect();
        assert_eq!(global, vec![Role::SuperAdmin]);
    }
}
