//! Staff records
//!
//! A [`StaffMember`] carries a role and a partition assignment. Its
//! permissions are always recomputed from those two fields, so changing the
//! role is the only way to change what a staff member may do.

use crate::error::AccessError;
use crate::resolver::{Partition, PermissionSet, RolePermissionResolver};
use crate::role::Role;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;
use ulid::Ulid;

/// Unique staff identifier (ULID for sortability)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StaffId(pub Ulid);

impl StaffId {
    /// Generate new staff ID
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl Default for StaffId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for StaffId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Account status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StaffStatus {
    /// Can sign in
    Active,
    /// Disabled by an admin
    Inactive,
    /// Invited, not yet activated
    #[default]
    Pending,
}

impl StaffStatus {
    /// Stable identifier
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Pending => "pending",
        }
    }
}

impl FromStr for StaffStatus {
    type Err = AccessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            "pending" => Ok(Self::Pending),
            other => Err(AccessError::UnknownStatus(other.to_string())),
        }
    }
}

/// A staff member of the admin console
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffMember {
    /// Identifier
    pub id: StaffId,
    /// Full name
    pub name: String,
    /// Login email
    pub email: String,
    /// Assigned role
    pub role: Role,
    /// Assigned partitions
    #[serde(default)]
    pub partitions: BTreeSet<Partition>,
    /// Account status
    #[serde(default)]
    pub status: StaffStatus,
    /// Last successful login
    #[serde(default)]
    pub last_login: Option<DateTime<Utc>>,
    /// Creation time
    pub created_at: DateTime<Utc>,
}

impl StaffMember {
    /// New pending staff member with no partitions
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>, role: Role) -> Self {
        Self {
            id: StaffId::new(),
            name: name.into(),
            email: email.into(),
            role,
            partitions: BTreeSet::new(),
            status: StaffStatus::Pending,
            last_login: None,
            created_at: Utc::now(),
        }
    }

    /// With role
    #[inline]
    #[must_use]
    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    /// With partitions
    #[must_use]
    pub fn with_partitions<I, P>(mut self, partitions: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Partition>,
    {
        self.partitions = partitions.into_iter().map(Into::into).collect();
        self
    }

    /// With status
    #[inline]
    #[must_use]
    pub fn with_status(mut self, status: StaffStatus) -> Self {
        self.status = status;
        self
    }

    /// Effective permissions, derived from role and partitions
    #[must_use]
    pub fn permissions(&self) -> PermissionSet {
        RolePermissionResolver::new().resolve(self.role, &self.partitions)
    }

    /// Whether this staff member may act within a partition
    ///
    /// Super admins may act anywhere. Everyone else needs the partition, or
    /// `*`, in their assignment.
    #[must_use]
    pub fn can_access_partition(&self, partition: &Partition) -> bool {
        self.role.is_global()
            || self
                .partitions
                .iter()
                .any(|p| p.is_wildcard() || p == partition)
    }

    /// Flip between active and inactive
    ///
    /// Pending members become active.
    pub fn toggle_status(&mut self) {
        self.status = match self.status {
            StaffStatus::Active => StaffStatus::Inactive,
            StaffStatus::Inactive | StaffStatus::Pending => StaffStatus::Active,
        };
    }

    /// Check required fields
    ///
    /// # Errors
    /// Returns [`AccessError::InvalidStaff`] when the name or email is blank.
    pub fn validate(&self) -> Result<(), AccessError> {
        if self.name.trim().is_empty() || self.email.trim().is_empty() {
            return Err(AccessError::InvalidStaff(
                "name and email are required".to_string(),
            ));
        }
        Ok(())
    }
}

/// Staff list filter
///
/// Empty query and `None` fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaffFilter {
    /// Case-insensitive substring of name or email
    pub query: String,
    /// Exact role
    pub role: Option<Role>,
    /// Exact status
    pub status: Option<StaffStatus>,
}

impl StaffFilter {
    /// Match everything
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With search query
    #[inline]
    #[must_use]
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    /// With role
    #[inline]
    #[must_use]
    pub fn with_role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }

    /// With status
    #[inline]
    #[must_use]
    pub fn with_status(mut self, status: StaffStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Whether a staff member passes every criterion
    #[must_use]
    pub fn matches(&self, member: &StaffMember) -> bool {
        let query = self.query.to_lowercase();
        let matches_search = member.name.to_lowercase().contains(&query)
            || member.email.to_lowercase().contains(&query);
        let matches_role = self.role.map_or(true, |role| member.role == role);
        let matches_status = self.status.map_or(true, |status| member.status == status);

        matches_search && matches_role && matches_status
    }
}

/// Staff members passing a filter, in input order
#[must_use]
pub fn filter_staff<'a>(staff: &'a [StaffMember], filter: &StaffFilter) -> Vec<&'a StaffMember> {
    staff.iter().filter(|member| filter.matches(member)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(role: Role, partitions: &[&str]) -> StaffMember {
        StaffMember::new("Jordan Lee", "jordan.lee@example.com", role)
            .with_partitions(partitions.iter().copied())
    }

    #[test]
    fn permissions_follow_role_changes() {
        let staff = member(Role::Viewer, &["products"]);
        assert!(staff.permissions().contains("dashboard_view"));
        assert!(!staff.permissions().contains("refund_management"));

        let promoted = staff.with_role(Role::FinanceManager);
        assert!(promoted.permissions().contains("refund_management"));
        assert!(!promoted.permissions().contains("dashboard_view"));
    }

    #[test]
    fn partition_access() {
        let products = Partition::from("products");
        let lending = Partition::from("lending");

        let ops = member(Role::OperationsManager, &["products", "services"]);
        assert!(ops.can_access_partition(&products));
        assert!(!ops.can_access_partition(&lending));

        let wildcard = member(Role::Viewer, &["*"]);
        assert!(wildcard.can_access_partition(&lending));

        let super_admin = member(Role::SuperAdmin, &[]);
        assert!(super_admin.can_access_partition(&lending));

        let partition_admin = member(Role::PartitionAdmin, &[]);
        assert!(!partition_admin.can_access_partition(&products));
    }

    #[test]
    fn toggle_status_cycle() {
        let mut staff = member(Role::Viewer, &[]);
        assert_eq!(staff.status, StaffStatus::Pending);
        staff.toggle_status();
        assert_eq!(staff.status, StaffStatus::Active);
        staff.toggle_status();
        assert_eq!(staff.status, StaffStatus::Inactive);
        staff.toggle_status();
        assert_eq!(staff.status, StaffStatus::Active);
    }

    #[test]
    fn validate_requires_name_and_email() {
        assert!(member(Role::Viewer, &[]).validate().is_ok());
        let blank = StaffMember::new("  ", "x@example.com", Role::Viewer);
        assert!(matches!(blank.validate(), Err(AccessError::InvalidStaff(_))));
        let no_email = StaffMember::new("Sam", "", Role::Viewer);
        assert!(no_email.validate().is_err());
    }

    #[test]
    fn status_parse() {
        assert_eq!("inactive".parse::<StaffStatus>().unwrap(), StaffStatus::Inactive);
        assert_eq!(
            "banned".parse::<StaffStatus>(),
            Err(AccessError::UnknownStatus("banned".to_string()))
        );
    }

    #[test]
    fn filter_criteria() {
        let staff = vec![
            StaffMember::new("Ana Ortiz", "ana@example.com", Role::FinanceManager)
                .with_status(StaffStatus::Active),
            StaffMember::new("Ben Okafor", "ben@example.com", Role::Viewer)
                .with_status(StaffStatus::Inactive),
            StaffMember::new("Chen Wu", "chen@shop.example", Role::Viewer)
                .with_status(StaffStatus::Active),
        ];

        assert_eq!(filter_staff(&staff, &StaffFilter::new()).len(), 3);

        let by_query = filter_staff(&staff, &StaffFilter::new().with_query("SHOP"));
        assert_eq!(by_query.len(), 1);
        assert_eq!(by_query[0].name, "Chen Wu");

        let viewers_active = StaffFilter::new()
            .with_role(Role::Viewer)
            .with_status(StaffStatus::Active);
        let result = filter_staff(&staff, &viewers_active);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name, "Chen Wu");
    }
}
