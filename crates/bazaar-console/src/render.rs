//! Text rendering for command output

use bazaar_access::{PermissionSet, Role};
use bazaar_funnel::FunnelReport;
use std::fmt::Write;

/// Funnel report as a stage table followed by the ranked abandonment points
#[must_use]
pub fn funnel_report(report: &FunnelReport) -> String {
    let funnel = &report.funnel;
    let mut out = String::new();

    let _ = writeln!(
        out,
        "Conversion Funnel (revenue per lost user: {:.2})",
        funnel.revenue_per_lost_user()
    );
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "{:<20} {:>10} {:>11} {:>9} {:>11} {:>15}",
        "Stage", "Users", "Conversion", "Drop-off", "Users lost", "Revenue impact"
    );

    for view in funnel.stages() {
        let (drop_off, lost, impact) = match view.drop_off_rate {
            Some(rate) => (
                format!("{rate:.1}%"),
                view.users_lost.to_string(),
                format!("{:.2}", view.revenue_impact),
            ),
            None => ("-".to_string(), "-".to_string(), "-".to_string()),
        };
        let _ = writeln!(
            out,
            "{:<20} {:>10} {:>10.1}% {:>9} {:>11} {:>15}",
            view.stage.label(),
            view.count,
            view.conversion_rate,
            drop_off,
            lost,
            impact
        );
    }

    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Overall conversion: {:.1}%",
        funnel.overall_conversion_rate()
    );
    let _ = writeln!(
        out,
        "Total users lost: {} ({:.2})",
        funnel.total_users_lost(),
        funnel.total_revenue_impact()
    );

    if report.top_abandonment.is_empty() {
        return out;
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Key Abandonment Points");
    for (rank, ranked) in report.top_abandonment.iter().enumerate() {
        let point = &ranked.point;
        let _ = writeln!(
            out,
            "{}. {}: {:.1}% drop-off ({} users, {:.2}) [{}]",
            rank + 1,
            point.stage.label(),
            point.drop_off_rate,
            point.users_lost,
            point.revenue_impact,
            ranked.severity.label()
        );
        for suggestion in ranked.suggestions {
            let _ = writeln!(out, "   - {suggestion}");
        }
    }
    out
}

/// Resolved permissions grouped by catalog category
#[must_use]
pub fn permissions(role: Role, partitions: &[String], set: &PermissionSet) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Role: {} ({})", role.name(), role.id());
    let _ = writeln!(out, "{}", role.description());
    let _ = writeln!(
        out,
        "Partitions: {}",
        if partitions.is_empty() {
            "none".to_string()
        } else {
            partitions.join(", ")
        }
    );
    let _ = writeln!(out, "Permissions: {}", set.len());

    for (category, ids) in set.by_category() {
        let _ = writeln!(out);
        let _ = writeln!(out, "{category}");
        for id in ids {
            let _ = writeln!(out, "  - {id}");
        }
    }
    out
}

/// Role table summary
#[must_use]
pub fn roles() -> String {
    let mut out = String::new();
    for role in Role::ALL {
        let _ = writeln!(
            out,
            "{:<20} {:<20} {}",
            role.id(),
            role.name(),
            role.description()
        );
    }
    out
}
