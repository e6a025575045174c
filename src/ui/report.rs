//! Plain-text rendering of a [`ProfitabilityReport`]. Rounding happens here
//! and nowhere else.

use std::fmt;

use crate::domain::{profitability_indicator, BreakEven, ProfitabilityReport};

pub const CURRENCY: &str = "EUR";

const NAME_WIDTH: usize = 20;
const CELL_WIDTH: usize = 14;

pub fn money(value: f64) -> String {
    format!("{value:.2} {CURRENCY}")
}

pub fn percent(fraction: f64) -> String {
    format!("{:.1}%", fraction * 100.0)
}

pub fn break_even_label(break_even: &BreakEven) -> String {
    match break_even {
        BreakEven::Reachable { revenue } => money(*revenue),
        BreakEven::Unreachable => "not reachable".to_string(),
    }
}

pub fn render_report(report: &ProfitabilityReport) -> String {
    ReportView(report).to_string()
}

/// Borrowing [`fmt::Display`] adapter that lays out a report as text.
pub struct ReportView<'a>(pub &'a ProfitabilityReport);

impl fmt::Display for ReportView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;
        writeln!(f, "Baskets ({} margins)", report.margin_policy.label())?;
        writeln!(
            f,
            "{:<NAME_WIDTH$}{:>CELL_WIDTH$}{:>CELL_WIDTH$}{:>CELL_WIDTH$}{:>CELL_WIDTH$}",
            "Basket", "Price", "Volume", "Orders", "Revenue"
        )?;
        for basket in &report.baskets {
            writeln!(
                f,
                "{:<NAME_WIDTH$}{:>CELL_WIDTH$}{:>CELL_WIDTH$}{:>CELL_WIDTH$.1}{:>CELL_WIDTH$}",
                truncate(&basket.name, NAME_WIDTH - 1),
                money(basket.selling_price),
                percent(basket.weight),
                basket.order_count,
                money(basket.revenue),
            )?;
        }

        writeln!(f)?;
        writeln!(f, "Monthly totals")?;
        let rows = [
            ("Orders", format!("{:.0}", report.order_count_total)),
            ("Average order value", money(report.average_order_value)),
            ("Revenue", money(report.revenue_total)),
            ("Purchase costs", money(report.purchase_cost_total)),
            ("Shipping", money(report.shipping_cost_total)),
            ("Payment fees", money(report.transaction_fees)),
            ("Variable costs", money(report.variable_costs_total)),
            ("Fixed costs", money(report.fixed_costs_total)),
            ("Gross margin", money(report.gross_margin)),
            ("Gross margin rate", percent(report.gross_margin_rate)),
            ("Result before tax", money(report.result_before_tax)),
            ("Estimated tax", money(report.tax)),
            ("Net result", money(report.net_result)),
            ("Break-even revenue", break_even_label(&report.break_even_revenue)),
        ];
        for (label, value) in rows {
            writeln!(f, "  {label:<24}{value:>18}")?;
        }

        let indicator = profitability_indicator(report);
        writeln!(f)?;
        writeln!(
            f,
            "Status: {} ({})",
            indicator.status.label(),
            indicator.rationale
        )?;

        for advisory in &report.advisories {
            writeln!(f, "Warning: {advisory}")?;
        }

        Ok(())
    }
}

fn truncate(name: &str, max: usize) -> String {
    if name.chars().count() <= max {
        name.to_string()
    } else {
        let mut short: String = name.chars().take(max.saturating_sub(1)).collect();
        short.push('…');
        short
    }
}
