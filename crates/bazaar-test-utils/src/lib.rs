//! Testing utilities for the Bazaar admin workspace
//!
//! Shared fixtures for funnel snapshots and staff records.

#![allow(missing_docs)]

use bazaar_access::{Partition, Role, StaffMember, StaffStatus};
use bazaar_funnel::{FunnelCounts, FunnelSnapshot, FunnelStage};
use chrono::{DateTime, TimeZone, Utc};

/// 1000 / 600 / 200 / 120 / 80
pub fn sample_counts() -> FunnelCounts {
    FunnelCounts {
        total_visitors: 1000,
        product_views: 600,
        add_to_cart: 200,
        checkout_started: 120,
        checkout_completed: 80,
        abandonment_points: Vec::new(),
    }
}

pub fn sample_snapshot() -> FunnelSnapshot {
    FunnelSnapshot::from(sample_counts())
}

/// Checkout completions exceed checkouts started (50 -> 60)
pub fn anomalous_snapshot() -> FunnelSnapshot {
    FunnelSnapshot::new()
        .with_stage(FunnelStage::Visitors, 400)
        .with_stage(FunnelStage::ProductViews, 250)
        .with_stage(FunnelStage::AddToCart, 90)
        .with_stage(FunnelStage::CheckoutStarted, 50)
        .with_stage(FunnelStage::CheckoutCompleted, 60)
}

pub fn marketplace_partitions() -> Vec<Partition> {
    ["products", "services", "hiring", "lending"]
        .into_iter()
        .map(Partition::from)
        .collect()
}

fn at(year: i32, month: u32, day: u32, hour: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, min, 0).unwrap()
}

/// Five staff members covering each status and several roles
pub fn mock_staff() -> Vec<StaffMember> {
    let mut staff = vec![
        StaffMember::new("John Doe", "john.doe@bazaar.example", Role::OperationsManager)
            .with_partitions(["products", "services"])
            .with_status(StaffStatus::Active),
        StaffMember::new("Sarah Wilson", "sarah.wilson@bazaar.example", Role::FinanceManager)
            .with_partitions(["products", "services", "hiring", "lending"])
            .with_status(StaffStatus::Active),
        StaffMember::new("Mike Johnson", "mike.johnson@bazaar.example", Role::CustomerSupport)
            .with_partitions(["products", "services"])
            .with_status(StaffStatus::Active),
        StaffMember::new("Emily Chen", "emily.chen@bazaar.example", Role::ContentManager)
            .with_partitions(["products"])
            .with_status(StaffStatus::Pending),
        StaffMember::new("David Rodriguez", "david.rodriguez@bazaar.example", Role::Viewer)
            .with_partitions(["products", "services", "hiring"])
            .with_status(StaffStatus::Inactive),
    ];

    let created = [
        at(2023, 6, 15, 8, 0),
        at(2023, 8, 20, 10, 30),
        at(2023, 9, 10, 12, 0),
        at(2024, 1, 10, 14, 20),
        at(2023, 5, 1, 9, 15),
    ];
    for (member, created_at) in staff.iter_mut().zip(created) {
        member.created_at = created_at;
        if member.status != StaffStatus::Pending {
            member.last_login = Some(at(2024, 1, 15, 10, 30));
        }
    }
    staff
}
