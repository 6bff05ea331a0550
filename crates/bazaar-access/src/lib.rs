//! Bazaar Access Control
//!
//! Staff roles and permission resolution for the marketplace admin console.
//!
//! # Core Concepts
//!
//! - [`Role`]: The closed set of staff roles
//! - [`PERMISSION_CATEGORIES`]: Fixed, ordered permission catalog
//! - [`RolePermissionResolver`]: Derives a [`PermissionSet`] from role and partitions
//! - [`StaffMember`]: Staff record whose permissions are always derived
//!
//! # Example
//!
//! ```rust
//! use bazaar_access::{resolve_permissions, Partition};
//! use std::collections::BTreeSet;
//!
//! let partitions: BTreeSet<Partition> = [Partition::from("products")].into_iter().collect();
//! let permissions = resolve_permissions("viewer", &partitions)?;
//! assert!(permissions.contains("analytics_view"));
//!
//! assert!(resolve_permissions("owner", &partitions).is_err());
//! # Ok::<(), bazaar_access::AccessError>(())
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod catalog;
mod error;
mod resolver;
mod role;
mod staff;

// Re-exports
pub use catalog::{
    all_permission_ids, category_of, find_permission, PermissionCategory, PermissionDef,
    PERMISSION_CATEGORIES,
};
pub use error::AccessError;
pub use resolver::{
    has_permission, resolve_permissions, Partition, PermissionSet, RolePermissionResolver,
    ALL_PARTITIONS,
};
pub use role::{Role, RoleGrant, PARTITION_FULL_ACCESS, PARTITION_SPECIFIC_ACCESS};
pub use staff::{filter_staff, StaffFilter, StaffId, StaffMember, StaffStatus};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
