//! Bill composition
//!
//! A [`Bill`] is derived from ticket items and a tax rate at the moment of
//! settlement; it is never stored. The order row keeps only the resulting
//! subtotal / tax / total so historical orders are immune to later rate
//! changes.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::ticket::TicketItem;

use super::money::{line_total, round2, to_decimal, to_f64};

/// One printed line on the bill
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BillLine {
    pub name: String,
    pub quantity: i32,
    pub unit_price: f64,
    pub line_total: f64,
}

/// A composed bill, ready to print or settle
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Bill {
    pub lines: Vec<BillLine>,
    /// Σ line totals, 2dp
    pub subtotal: f64,
    /// Percentage applied to the subtotal
    pub tax_rate_percent: f64,
    pub tax: f64,
    /// subtotal + tax
    pub total: f64,
}

impl Bill {
    /// Compose a bill from captured item prices
    ///
    /// All arithmetic is decimal; each line and the three totals round
    /// once, at the end, so item order never affects the result.
    pub fn compose(items: &[TicketItem], tax_rate_percent: f64) -> Self {
        let mut subtotal = Decimal::ZERO;
        let mut lines = Vec::with_capacity(items.len());

        for item in items {
            let exact = line_total(item.price, item.quantity);
            subtotal += exact;
            lines.push(BillLine {
                name: item.name.clone(),
                quantity: item.quantity,
                unit_price: item.price,
                line_total: to_f64(exact),
            });
        }

        let rate = to_decimal(tax_rate_percent) / Decimal::ONE_HUNDRED;
        let tax = round2(subtotal * rate);
        let subtotal = round2(subtotal);

        Self {
            lines,
            subtotal: to_f64(subtotal),
            tax_rate_percent,
            tax: to_f64(tax),
            total: to_f64(subtotal + tax),
        }
    }

    /// Plain-text receipt body
    pub fn render_receipt(&self, header: &str) -> String {
        let mut out = String::new();
        out.push_str(header);
        out.push('\n');
        for line in &self.lines {
            out.push_str(&format!(
                "{:>2} x {:<24} {:>8.2}\n",
                line.quantity, line.name, line.line_total
            ));
        }
        out.push_str(&format!("{:<31} {:>8.2}\n", "Subtotal", self.subtotal));
        out.push_str(&format!(
            "{:<31} {:>8.2}\n",
            format!("Tax ({}%)", self.tax_rate_percent),
            self.tax
        ));
        out.push_str(&format!("{:<31} {:>8.2}\n", "Total", self.total));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, quantity: i32, price: f64) -> TicketItem {
        TicketItem {
            name: name.into(),
            quantity,
            price,
            note: None,
        }
    }

    #[test]
    fn test_compose_pizza_order() {
        let bill = Bill::compose(
            &[item("Pizza", 2, 250.0), item("Cola", 1, 40.0)],
            10.0,
        );
        assert_eq!(bill.subtotal, 540.0);
        assert_eq!(bill.tax, 54.0);
        assert_eq!(bill.total, 594.0);
        assert_eq!(bill.lines[0].line_total, 500.0);
    }

    #[test]
    fn test_summation_order_invariance() {
        let a = [item("A", 3, 0.1), item("B", 1, 0.2), item("C", 7, 1.13)];
        let b = [a[2].clone(), a[0].clone(), a[1].clone()];
        let bill_a = Bill::compose(&a, 8.25);
        let bill_b = Bill::compose(&b, 8.25);
        assert_eq!(bill_a.subtotal, bill_b.subtotal);
        assert_eq!(bill_a.tax, bill_b.tax);
        assert_eq!(bill_a.total, bill_b.total);
    }

    #[test]
    fn test_empty_bill_is_zero() {
        let bill = Bill::compose(&[], 10.0);
        assert_eq!(bill.subtotal, 0.0);
        assert_eq!(bill.tax, 0.0);
        assert_eq!(bill.total, 0.0);
        assert!(bill.lines.is_empty());
    }

    #[test]
    fn test_zero_tax_rate() {
        let bill = Bill::compose(&[item("Espresso", 1, 2.5)], 0.0);
        assert_eq!(bill.tax, 0.0);
        assert_eq!(bill.total, bill.subtotal);
    }

    #[test]
    fn test_receipt_contains_all_lines() {
        let bill = Bill::compose(&[item("Pizza", 2, 250.0), item("Cola", 1, 40.0)], 10.0);
        let receipt = bill.render_receipt("Table 4");
        assert!(receipt.contains("Pizza"));
        assert!(receipt.contains("Cola"));
        assert!(receipt.contains("Subtotal"));
        assert!(receipt.contains("Tax (10%)"));
        assert!(receipt.contains("540.00"));
        assert!(receipt.contains("594.00"));
    }
}
