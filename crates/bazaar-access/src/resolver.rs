//! Permission resolution
//!
//! Permissions are a pure function of `(role, partitions)`: they are derived
//! on demand and never stored or edited independently of the role.
//!
//! Partition assignment never changes which permission ids a role resolves
//! to; it only scopes where they apply, which callers check separately via
//! [`StaffMember::can_access_partition`](crate::StaffMember::can_access_partition).

use crate::catalog;
use crate::error::AccessError;
use crate::role::{Role, RoleGrant, PARTITION_FULL_ACCESS, PARTITION_SPECIFIC_ACCESS};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt::{self, Display, Formatter};

/// Partition that grants every partition in access checks
pub const ALL_PARTITIONS: &str = "*";

/// Business context identifier (`products`, `services`, ...)
///
/// Opaque: not validated against any partition list.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Partition(String);

impl Partition {
    /// Wrap a partition id
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The `*` partition
    #[inline]
    #[must_use]
    pub fn all() -> Self {
        Self(ALL_PARTITIONS.to_string())
    }

    /// Partition id
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is the `*` partition
    #[inline]
    #[must_use]
    pub fn is_wildcard(&self) -> bool {
        self.0 == ALL_PARTITIONS
    }
}

impl Display for Partition {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Partition {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Resolved permission ids, ordered and without duplicates
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionSet(BTreeSet<String>);

impl PermissionSet {
    /// Empty set
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the set contains a permission id
    #[inline]
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.0.contains(id)
    }

    /// Number of permission ids
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the set is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate ids in sorted order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Group ids by catalog category, in catalog order
    ///
    /// Ids outside the catalog (role-specific markers such as
    /// `partition_full_access`) are collected under `"Other"` at the end.
    #[must_use]
    pub fn by_category(&self) -> Vec<(&'static str, Vec<&str>)> {
        let mut groups: Vec<(&'static str, Vec<&str>)> = catalog::PERMISSION_CATEGORIES
            .iter()
            .map(|category| {
                let ids: Vec<&str> = category
                    .permissions
                    .iter()
                    .map(|def| def.id)
                    .filter(|id| self.contains(id))
                    .collect();
                (category.name, ids)
            })
            .filter(|(_, ids)| !ids.is_empty())
            .collect();

        let other: Vec<&str> = self
            .iter()
            .filter(|id| catalog::category_of(id).is_none())
            .collect();
        if !other.is_empty() {
            groups.push(("Other", other));
        }
        groups
    }
}

impl<'a> FromIterator<&'a str> for PermissionSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        Self(iter.into_iter().map(str::to_string).collect())
    }
}

impl<'a> IntoIterator for &'a PermissionSet {
    type Item = &'a String;
    type IntoIter = std::collections::btree_set::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Resolves effective permissions from the static role table
///
/// Stateless; the struct exists so callers can hold a resolver at a seam and
/// swap it in tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct RolePermissionResolver;

impl RolePermissionResolver {
    /// Create resolver
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Resolve permissions for a typed role
    ///
    /// - `SuperAdmin`: every permission in the catalog
    /// - `PartitionAdmin`: `partition_full_access` and `partition_specific_access`
    /// - other roles: their fixed role-table list
    ///
    /// `partitions` does not affect the result.
    #[must_use]
    pub fn resolve(&self, role: Role, partitions: &BTreeSet<Partition>) -> PermissionSet {
        let resolved: PermissionSet = match role.grant() {
            RoleGrant::Wildcard => catalog::all_permission_ids().collect(),
            RoleGrant::PartitionScoped => [PARTITION_FULL_ACCESS, PARTITION_SPECIFIC_ACCESS]
                .into_iter()
                .collect(),
            RoleGrant::Fixed(ids) => ids.iter().copied().collect(),
        };

        tracing::debug!(
            role = %role,
            partitions = partitions.len(),
            permissions = resolved.len(),
            "resolved role permissions"
        );
        resolved
    }

    /// Resolve permissions for a role id
    ///
    /// # Errors
    /// Returns [`AccessError::UnknownRole`] when `role_id` is not in the role
    /// table.
    pub fn resolve_id(
        &self,
        role_id: &str,
        partitions: &BTreeSet<Partition>,
    ) -> Result<PermissionSet, AccessError> {
        let role = role_id.parse::<Role>().map_err(|err| {
            tracing::warn!(role = role_id, "refusing to resolve permissions for unknown role");
            err
        })?;
        Ok(self.resolve(role, partitions))
    }
}

/// Resolve the effective permission set for a role id and partitions
///
/// # Errors
/// Returns [`AccessError::UnknownRole`] for an unrecognised role id.
pub fn resolve_permissions(
    role_id: &str,
    partitions: &BTreeSet<Partition>,
) -> Result<PermissionSet, AccessError> {
    RolePermissionResolver::new().resolve_id(role_id, partitions)
}

/// Whether a role resolves to a given permission
#[must_use]
pub fn has_permission(role: Role, permission: &str) -> bool {
    match role.grant() {
        RoleGrant::Wildcard => catalog::find_permission(permission).is_some(),
        RoleGrant::PartitionScoped => {
            permission == PARTITION_FULL_ACCESS || permission == PARTITION_SPECIFIC_ACCESS
        }
        RoleGrant::Fixed(ids) => ids.iter().any(|id| *id == permission),
    }
}
