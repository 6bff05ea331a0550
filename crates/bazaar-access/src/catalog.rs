//! Permission catalog
//!
//! The fixed, ordered table of permission categories. Category order and the
//! order of permissions within a category are significant for display; the
//! table is a build-time constant and never mutated.

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use serde::Serialize;

/// A single grantable permission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PermissionDef {
    /// Stable identifier
    pub id: &'static str,
    /// Display name
    pub name: &'static str,
    /// What the permission allows
    pub description: &'static str,
}

/// A named group of permissions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PermissionCategory {
    /// Category name
    pub name: &'static str,
    /// Permissions in display order
    pub permissions: &'static [PermissionDef],
}

const fn perm(id: &'static str, name: &'static str, description: &'static str) -> PermissionDef {
    PermissionDef {
        id,
        name,
        description,
    }
}

/// Every permission category, in display order
pub static PERMISSION_CATEGORIES: &[PermissionCategory] = &[
    PermissionCategory {
        name: "General Access",
        permissions: &[
            perm("dashboard_view", "View Dashboard", "Access to admin dashboard"),
            perm("partition_switch", "Switch Partitions", "Change active business context"),
            perm("user_management", "User Management", "Manage user accounts and permissions"),
            perm("system_settings", "System Settings", "Modify system configuration"),
        ],
    },
    PermissionCategory {
        name: "Product Management",
        permissions: &[
            perm("product_management", "Product Management", "Create, edit, delete products"),
            perm("category_management", "Category Management", "Manage product categories"),
            perm("inventory_management", "Inventory Management", "Track and manage inventory"),
            perm("bulk_upload", "Bulk Upload", "Upload products in bulk"),
            perm("product_approval", "Product Approval", "Approve or reject products"),
        ],
    },
    PermissionCategory {
        name: "Order Management",
        permissions: &[
            perm("order_management", "Order Management", "View and manage orders"),
            perm("order_processing", "Order Processing", "Process orders and updates"),
            perm("shipping_management", "Shipping Management", "Manage shipping and logistics"),
            perm("return_processing", "Return Processing", "Handle returns and refunds"),
            perm("order_analytics", "Order Analytics", "View order-related analytics"),
        ],
    },
    PermissionCategory {
        name: "Vendor Management",
        permissions: &[
            perm("vendor_management", "Vendor Management", "Manage vendor accounts"),
            perm("vendor_approval", "Vendor Approval", "Approve or reject vendors"),
            perm("vendor_support", "Vendor Support", "Provide vendor assistance"),
            perm("commission_tracking", "Commission Tracking", "Track vendor commissions"),
            perm("performance_monitoring", "Performance Monitoring", "Monitor vendor performance"),
        ],
    },
    PermissionCategory {
        name: "Financial Operations",
        permissions: &[
            perm("payment_processing", "Payment Processing", "Process payments and transactions"),
            perm("financial_reporting", "Financial Reporting", "Generate financial reports"),
            perm("refund_management", "Refund Management", "Process refunds"),
            perm("commission_calculations", "Commission Calculations", "Calculate and manage commissions"),
            perm("tax_management", "Tax Management", "Handle tax calculations and reporting"),
        ],
    },
    PermissionCategory {
        name: "Customer Support",
        permissions: &[
            perm("customer_support", "Customer Support", "Handle customer inquiries"),
            perm("chat_moderation", "Chat Moderation", "Moderate customer chats"),
            perm("dispute_resolution", "Dispute Resolution", "Resolve customer disputes"),
            perm("feedback_management", "Feedback Management", "Manage customer feedback"),
            perm("communication_tools", "Communication Tools", "Use communication tools"),
        ],
    },
    PermissionCategory {
        name: "Content & Marketing",
        permissions: &[
            perm("content_moderation", "Content Moderation", "Moderate user-generated content"),
            perm("seo_management", "SEO Management", "Manage SEO settings"),
            perm("marketing_campaigns", "Marketing Campaigns", "Create and manage campaigns"),
            perm("promotion_management", "Promotion Management", "Manage promotions and discounts"),
            perm("analytics_view", "Analytics View", "View marketing analytics"),
        ],
    },
    PermissionCategory {
        name: "Advanced Features",
        permissions: &[
            perm("ai_features", "AI Features", "Access AI-powered features"),
            perm("advanced_analytics", "Advanced Analytics", "Access advanced analytics"),
            perm("bulk_operations", "Bulk Operations", "Perform bulk operations"),
            perm("api_management", "API Management", "Manage API access"),
            perm("system_maintenance", "System Maintenance", "Perform system maintenance"),
        ],
    },
];

/// Permission id -> (category name, definition), in table order
static INDEX: Lazy<IndexMap<&'static str, (&'static str, &'static PermissionDef)>> = Lazy::new(|| {
    PERMISSION_CATEGORIES
        .iter()
        .flat_map(|category| {
            category
                .permissions
                .iter()
                .map(move |def| (def.id, (category.name, def)))
        })
        .collect()
});

/// Look up a permission definition by id
#[must_use]
pub fn find_permission(id: &str) -> Option<&'static PermissionDef> {
    INDEX.get(id).map(|(_, def)| *def)
}

/// Name of the category a permission belongs to
#[must_use]
pub fn category_of(id: &str) -> Option<&'static str> {
    INDEX.get(id).map(|(category, _)| *category)
}

/// Every permission id in table order, without duplicates
pub fn all_permission_ids() -> impl Iterator<Item = &'static str> {
    INDEX.keys().copied()
}
