//! Output formatting for CLI display.
//!
//! Provides the [`PrettyPrint`] trait for human-readable output
//! as an alternative to JSON serialization, plus the dashboard
//! renderer.

use crate::models::{Activity, Deal, Organization, Person};
use crate::summary::DealSummary;

/// Trait for human-readable key-value output.
///
/// Implemented by entity types to provide formatted output
/// suitable for terminal display when `--json` is not specified.
pub trait PrettyPrint {
    /// Returns a formatted string for terminal display.
    fn pretty_print(&self) -> String;
}

impl PrettyPrint for Deal {
    fn pretty_print(&self) -> String {
        let header = format!("Deal #{}: {}", self.id, self.title);
        let divider = "─".repeat(header.len().max(30));

        let mut lines = vec![
            header,
            divider,
            format!("Value:          {} {}", self.value, self.currency_or_default()),
            format!("Status:         {}", self.status),
        ];

        if let Some(ref stage) = self.stage_name {
            lines.push(format!("Stage:          {}", stage));
        }

        if let Some(ref person) = self.person_name {
            lines.push(format!("Person:         {}", person));
        }

        if let Some(ref org) = self.org_name {
            lines.push(format!("Organization:   {}", org));
        }

        if let Some(ref added) = self.add_time {
            lines.push(format!("Added:          {}", added.format("%Y-%m-%d %H:%M:%S")));
        }

        lines.join("\n")
    }
}

impl PrettyPrint for Person {
    fn pretty_print(&self) -> String {
        let header = format!("Person #{}: {}", self.id, self.name);
        let divider = "─".repeat(header.len().max(30));

        let mut lines = vec![header, divider];

        if let Some(email) = self.primary_email() {
            lines.push(format!("Email:          {}", email));
        }

        if let Some(phone) = self.primary_phone() {
            lines.push(format!("Phone:          {}", phone));
        }

        if let Some(ref org) = self.org_name {
            lines.push(format!("Organization:   {}", org));
        }

        if let Some(ref added) = self.add_time {
            lines.push(format!("Added:          {}", added.format("%Y-%m-%d %H:%M:%S")));
        }

        lines.join("\n")
    }
}

impl PrettyPrint for Organization {
    fn pretty_print(&self) -> String {
        let header = format!("Organization #{}: {}", self.id, self.name);
        let divider = "─".repeat(header.len().max(30));

        let mut lines = vec![header, divider];

        if let Some(people) = self.people_count {
            lines.push(format!("People:         {}", people));
        }

        if let Some(open) = self.open_deals_count {
            lines.push(format!("Open deals:     {}", open));
        }

        lines.join("\n")
    }
}

impl PrettyPrint for Activity {
    fn pretty_print(&self) -> String {
        let subject = self.subject.as_deref().unwrap_or("(no subject)");
        let header = format!("Activity #{}: {}", self.id, subject);
        let divider = "─".repeat(header.len().max(30));

        let mut lines = vec![
            header,
            divider,
            format!("Done:           {}", if self.done { "yes" } else { "no" }),
        ];

        if let Some(ref kind) = self.activity_type {
            lines.push(format!("Type:           {}", kind));
        }

        if let Some(ref due) = self.due_date {
            lines.push(format!("Due:            {}", due));
        }

        if let Some(ref person) = self.person_name {
            lines.push(format!("Person:         {}", person));
        }

        if let Some(ref deal) = self.deal_title {
            lines.push(format!("Deal:           {}", deal));
        }

        lines.join("\n")
    }
}

/// Render the dashboard summary with a recent-deals list.
pub fn render_dashboard(summary: &DealSummary, recent: &[&Deal]) -> String {
    let mut lines = vec![
        "Deals dashboard".to_string(),
        "─".repeat(30),
        format!("Total deals:    {}", summary.total),
        format!(
            "Status:         {} open, {} won, {} lost",
            summary.open, summary.won, summary.lost
        ),
    ];

    for (currency, total) in &summary.value_by_currency {
        lines.push(format!("Value ({currency}):    {total:.2}"));
    }

    if !recent.is_empty() {
        lines.push(String::new());
        lines.push("Recent deals".to_string());
        for deal in recent {
            lines.push(format!(
                "  #{:<6} {} ({} {})",
                deal.id,
                deal.title,
                deal.value,
                deal.currency_or_default()
            ));
        }
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deal_pretty_print_format() {
        let deal: Deal = serde_json::from_value(serde_json::json!({
            "id": 12,
            "title": "Pilot project",
            "value": 150.0,
            "currency": "USD",
            "status": "open",
            "stage_name": "Qualified"
        }))
        .unwrap();

        let output = deal.pretty_print();
        assert!(output.starts_with("Deal #12"));
        assert!(output.contains("Status:"));
        assert!(output.contains("Qualified"));
    }

    #[test]
    fn test_dashboard_render() {
        let deals: Vec<Deal> = vec![
            serde_json::from_value(serde_json::json!({
                "id": 1, "title": "A", "value": 10.0, "currency": "EUR", "status": "open"
            }))
            .unwrap(),
            serde_json::from_value(serde_json::json!({
                "id": 2, "title": "B", "value": 5.0, "currency": "EUR", "status": "won"
            }))
            .unwrap(),
        ];
        let summary = DealSummary::from_deals(&deals);
        let recent: Vec<&Deal> = deals.iter().collect();

        let output = render_dashboard(&summary, &recent);
        assert!(output.contains("Total deals:    2"));
        assert!(output.contains("1 open, 1 won, 0 lost"));
        assert!(output.contains("Value (EUR):    15.00"));
    }
}
