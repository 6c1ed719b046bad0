//! Derived ticket statistics
//!
//! Stats are always recomputed from the ticket set, never stored, so they
//! cannot drift from the rows. Revenue counts completed tickets only and is
//! tax-exclusive: it sums what the kitchen produced, not what the state
//! collected.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::ticket::{KitchenTicket, TicketStatus};

use super::money::{line_total, to_f64};

/// Aggregate counters over one restaurant's tickets
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct TicketStats {
    pub total: usize,
    pub new: usize,
    pub preparing: usize,
    pub ready: usize,
    /// Tickets still in flight (`new + preparing + ready`)
    pub pending: usize,
    pub completed: usize,
    pub cancelled: usize,
    /// Σ item subtotals of completed tickets, 2dp
    pub revenue: f64,
}

impl TicketStats {
    /// Compute stats over a ticket snapshot
    pub fn compute<'a>(tickets: impl IntoIterator<Item = &'a KitchenTicket>) -> Self {
        let mut stats = Self::default();
        let mut revenue = Decimal::ZERO;

        for ticket in tickets {
            stats.total += 1;
            match ticket.status {
                TicketStatus::New => stats.new += 1,
                TicketStatus::Preparing => stats.preparing += 1,
                TicketStatus::Ready => stats.ready += 1,
                TicketStatus::Completed => {
                    stats.completed += 1;
                    for item in &ticket.items {
                        revenue += line_total(item.price, item.quantity);
                    }
                }
                TicketStatus::Cancelled => stats.cancelled += 1,
            }
        }

        stats.pending = stats.new + stats.preparing + stats.ready;
        stats.revenue = to_f64(revenue);
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::ticket::TicketItem;

    fn ticket(status: TicketStatus, items: Vec<(i32, f64)>) -> KitchenTicket {
        let mut t = KitchenTicket::new(
            "r1".into(),
            "Table 1".into(),
            items
                .into_iter()
                .map(|(quantity, price)| TicketItem {
                    name: "Item".into(),
                    quantity,
                    price,
                    note: None,
                })
                .collect(),
        );
        t.status = status;
        t
    }

    #[test]
    fn test_empty_set_is_all_zero() {
        let tickets: Vec<KitchenTicket> = Vec::new();
        let stats = TicketStats::compute(&tickets);
        assert_eq!(stats, TicketStats::default());
    }

    #[test]
    fn test_counts_and_pending() {
        let tickets = vec![
            ticket(TicketStatus::New, vec![]),
            ticket(TicketStatus::Preparing, vec![]),
            ticket(TicketStatus::Preparing, vec![]),
            ticket(TicketStatus::Ready, vec![]),
            ticket(TicketStatus::Completed, vec![]),
            ticket(TicketStatus::Cancelled, vec![]),
        ];
        let stats = TicketStats::compute(&tickets);
        assert_eq!(stats.total, 6);
        assert_eq!(stats.new, 1);
        assert_eq!(stats.preparing, 2);
        assert_eq!(stats.ready, 1);
        assert_eq!(stats.pending, 4);
        assert_eq!(stats.completed, 1);
        assert_eq!(stats.cancelled, 1);
    }

    #[test]
    fn test_revenue_counts_completed_only_tax_exclusive() {
        let tickets = vec![
            // 2 × 250 = 500, completed: counts
            ticket(TicketStatus::Completed, vec![(2, 250.0)]),
            // in flight: not revenue yet
            ticket(TicketStatus::Ready, vec![(1, 99.0)]),
            // cancelled: never revenue
            ticket(TicketStatus::Cancelled, vec![(4, 25.0)]),
        ];
        let stats = TicketStats::compute(&tickets);
        assert_eq!(stats.revenue, 500.0);
    }
}
