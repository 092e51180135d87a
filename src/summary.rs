//! In-memory aggregation over fetched deal lists.
//!
//! Dashboards work on a list that has already been assembled by the
//! pagination loop; everything here is plain filtering, sorting, and
//! summing.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::{Deal, DealStatus};

/// Aggregate view of a deal list, as rendered on a dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct DealSummary {
    /// Total number of deals.
    pub total: usize,
    /// Number of open deals.
    pub open: usize,
    /// Number of won deals.
    pub won: usize,
    /// Number of lost deals.
    pub lost: usize,
    /// Summed deal value per currency code.
    pub value_by_currency: BTreeMap<String, f64>,
}

impl DealSummary {
    /// Aggregate a deal list.
    pub fn from_deals(deals: &[Deal]) -> Self {
        let mut value_by_currency: BTreeMap<String, f64> = BTreeMap::new();
        let mut open = 0;
        let mut won = 0;
        let mut lost = 0;

        for deal in deals {
            match deal.status {
                DealStatus::Open => open += 1,
                DealStatus::Won => won += 1,
                DealStatus::Lost => lost += 1,
                DealStatus::Deleted => {}
            }
            *value_by_currency
                .entry(deal.currency_or_default().to_string())
                .or_default() += deal.value;
        }

        Self {
            total: deals.len(),
            open,
            won,
            lost,
            value_by_currency,
        }
    }
}

/// Deals with the given status, in input order.
pub fn filter_by_status(deals: &[Deal], status: DealStatus) -> Vec<&Deal> {
    deals.iter().filter(|d| d.status == status).collect()
}

/// Sort deals by value, highest first.
pub fn sort_by_value(deals: &mut [Deal]) {
    deals.sort_by(|a, b| b.value.total_cmp(&a.value));
}

/// Sort deals by creation time, newest first. Deals without a
/// creation time sort last.
pub fn sort_by_newest(deals: &mut [Deal]) {
    deals.sort_by(|a, b| b.add_time.cmp(&a.add_time));
}

/// The `n` most recently created deals.
pub fn recent(deals: &[Deal], n: usize) -> Vec<&Deal> {
    let mut refs: Vec<&Deal> = deals.iter().collect();
    refs.sort_by(|a, b| b.add_time.cmp(&a.add_time));
    refs.truncate(n);
    refs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deal(id: u64, value: f64, currency: &str, status: &str, add_time: &str) -> Deal {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "title": format!("Deal {id}"),
            "value": value,
            "currency": currency,
            "status": status,
            "add_time": add_time
        }))
        .unwrap()
    }

    fn sample() -> Vec<Deal> {
        vec![
            deal(1, 100.0, "EUR", "open", "2024-01-10 10:00:00"),
            deal(2, 250.0, "EUR", "won", "2024-02-20 10:00:00"),
            deal(3, 70.0, "USD", "lost", "2024-03-05 10:00:00"),
            deal(4, 900.0, "EUR", "open", "2024-01-02 10:00:00"),
        ]
    }

    #[test]
    fn test_summary_counts_and_totals() {
        let deals = sample();
        let summary = DealSummary::from_deals(&deals);

        assert_eq!(summary.total, 4);
        assert_eq!(summary.open, 2);
        assert_eq!(summary.won, 1);
        assert_eq!(summary.lost, 1);
        assert_eq!(summary.value_by_currency["EUR"], 1250.0);
        assert_eq!(summary.value_by_currency["USD"], 70.0);
    }

    #[test]
    fn test_filter_by_status() {
        let deals = sample();
        let open = filter_by_status(&deals, DealStatus::Open);
        assert_eq!(open.len(), 2);
        assert!(open.iter().all(|d| d.is_open()));
    }

    #[test]
    fn test_sort_by_value_descending() {
        let mut deals = sample();
        sort_by_value(&mut deals);
        let values: Vec<f64> = deals.iter().map(|d| d.value).collect();
        assert_eq!(values, vec![900.0, 250.0, 100.0, 70.0]);
    }

    #[test]
    fn test_recent_newest_first() {
        let deals = sample();
        let top2 = recent(&deals, 2);
        assert_eq!(top2[0].id, 3);
        assert_eq!(top2[1].id, 2);
    }

    #[test]
    fn test_recent_handles_missing_add_time() {
        let mut deals = sample();
        deals.push(
            serde_json::from_value(serde_json::json!({ "id": 5, "title": "No time" })).unwrap(),
        );
        let all = recent(&deals, 10);
        // The timeless deal sorts last
        assert_eq!(all.last().unwrap().id, 5);
    }

    #[test]
    fn test_summary_empty() {
        let summary = DealSummary::from_deals(&[]);
        assert_eq!(summary.total, 0);
        assert!(summary.value_by_currency.is_empty());
    }
}
