use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::{
    allocation::allocate_volume,
    costs::aggregate_costs,
    entities::{Basket, BasketId, GlobalParameters, ShippingMode},
    orders::forecast_orders,
    pricing::MarginPolicy,
    validation::{ensure_finite, validate_inputs, Advisory, InvalidInput},
};

/// Per-basket slice of the forecast.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BasketOutcome {
    pub id: BasketId,
    pub name: String,
    /// Normalized share of total orders, 0..=1.
    pub weight: f64,
    pub order_count: f64,
    pub selling_price: f64,
    pub revenue: f64,
}

/// Revenue needed for the gross margin to cover fixed costs.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BreakEven {
    Reachable { revenue: f64 },
    /// The gross margin rate is zero or negative: no revenue level covers fixed costs.
    Unreachable,
}

impl BreakEven {
    pub fn revenue(&self) -> Option<f64> {
        match self {
            Self::Reachable { revenue } => Some(*revenue),
            Self::Unreachable => None,
        }
    }

    pub fn is_reachable(&self) -> bool {
        matches!(self, Self::Reachable { .. })
    }
}

/// Monthly forecast for one basket set. Every amount is unrounded.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProfitabilityReport {
    pub margin_policy: MarginPolicy,
    pub order_count_total: f64,
    pub baskets: Vec<BasketOutcome>,
    pub revenue_total: f64,
    pub purchase_cost_total: f64,
    pub shipping_cost_total: f64,
    pub transaction_fees: f64,
    pub variable_costs_total: f64,
    pub fixed_costs_total: f64,
    pub gross_margin: f64,
    pub result_before_tax: f64,
    pub tax: f64,
    pub net_result: f64,
    /// Gross margin as a fraction of revenue; 0 when there is no revenue.
    pub gross_margin_rate: f64,
    pub break_even_revenue: BreakEven,
    /// Weighted average basket value; 0 when there are no orders.
    pub average_order_value: f64,
    pub advisories: Vec<Advisory>,
}

/// Computes the monthly profitability forecast.
///
/// Validation runs first, so an `Err` means nothing was computed. Every ratio
/// is guarded, and amounts so large that an intermediate figure overflows are
/// reported as [`InvalidInput::NonFiniteResult`] rather than returned as NaN.
pub fn compute(
    baskets: &[Basket],
    params: &GlobalParameters,
) -> Result<ProfitabilityReport, InvalidInput> {
    validate_inputs(baskets, params)?;

    let shares: Vec<f64> = baskets.iter().map(|basket| basket.volume_share).collect();
    let allocation = allocate_volume(&shares)?;

    let mut advisories: Vec<Advisory> = allocation.advisory().into_iter().collect();
    if let ShippingMode::Global { .. } = params.shipping {
        let carrying = baskets
            .iter()
            .filter(|basket| basket.shipping_cost > 0.0)
            .count();
        if carrying > 0 {
            advisories.push(Advisory::BasketShippingIgnored { baskets: carrying });
        }
    }
    for advisory in &advisories {
        warn!("{advisory}");
    }

    let orders = forecast_orders(params.monthly_traffic, params.conversion_rate, &allocation);

    let mut outcomes = Vec::with_capacity(baskets.len());
    let mut revenue_total = 0.0;
    for ((basket, weight), order_count) in baskets
        .iter()
        .zip(&allocation.weights)
        .zip(&orders.per_basket)
    {
        let selling_price = ensure_finite(
            &format!("basket `{}` selling_price", basket.name),
            params.margin_policy.selling_price(
                basket.purchase_cost,
                basket.ancillary_fee,
                basket.margin_rate,
            )?,
        )?;
        let revenue = ensure_finite(
            &format!("basket `{}` revenue", basket.name),
            order_count * selling_price,
        )?;
        revenue_total += revenue;

        outcomes.push(BasketOutcome {
            id: basket.id,
            name: basket.name.clone(),
            weight: *weight,
            order_count: *order_count,
            selling_price,
            revenue,
        });
    }

    ensure_finite("revenue_total", revenue_total)?;

    let costs = aggregate_costs(baskets, &orders, revenue_total, params);
    ensure_finite("purchase_cost_total", costs.purchase_cost_total)?;
    ensure_finite("shipping_cost_total", costs.shipping_cost_total)?;
    ensure_finite("transaction_fees", costs.transaction_fees)?;
    ensure_finite("variable_costs_total", costs.variable_costs_total)?;
    ensure_finite("fixed_costs_total", costs.fixed_costs_total)?;

    let gross_margin = ensure_finite("gross_margin", revenue_total - costs.variable_costs_total)?;
    let result_before_tax = ensure_finite(
        "result_before_tax",
        gross_margin - costs.fixed_costs_total,
    )?;
    let tax = income_tax(result_before_tax, params.tax_rate);
    let net_result = result_before_tax - tax;

    let gross_margin_rate = if revenue_total > 0.0 {
        ensure_finite("gross_margin_rate", gross_margin / revenue_total)?
    } else {
        0.0
    };
    let break_even_revenue = if gross_margin_rate > 0.0 {
        BreakEven::Reachable {
            revenue: ensure_finite(
                "break_even_revenue",
                costs.fixed_costs_total / gross_margin_rate,
            )?,
        }
    } else {
        BreakEven::Unreachable
    };
    let average_order_value = if orders.total_orders > 0.0 {
        revenue_total / orders.total_orders
    } else {
        0.0
    };

    debug!(
        "evaluated {} basket(s) under {} margins: {:.2} orders, revenue {:.2}, net {:.2}",
        baskets.len(),
        params.margin_policy.label(),
        orders.total_orders,
        revenue_total,
        net_result
    );

    Ok(ProfitabilityReport {
        margin_policy: params.margin_policy,
        order_count_total: orders.total_orders,
        baskets: outcomes,
        revenue_total,
        purchase_cost_total: costs.purchase_cost_total,
        shipping_cost_total: costs.shipping_cost_total,
        transaction_fees: costs.transaction_fees,
        variable_costs_total: costs.variable_costs_total,
        fixed_costs_total: costs.fixed_costs_total,
        gross_margin,
        result_before_tax,
        tax,
        net_result,
        gross_margin_rate,
        break_even_revenue,
        average_order_value,
        advisories,
    })
}

/// Tax owed on a pre-tax result. Losses produce no tax credit.
pub fn income_tax(result_before_tax: f64, tax_rate: f64) -> f64 {
    let tax = result_before_tax * (tax_rate / 100.0);
    if tax > 0.0 {
        tax
    } else {
        0.0
    }
}

pub fn profitability_indicator(report: &ProfitabilityReport) -> ProfitIndicator {
    let score = report.net_result;

    if report.revenue_total <= 0.0 {
        return ProfitIndicator {
            status: ProfitIndicatorStatus::Red,
            score,
            rationale: "No revenue forecast yet".to_string(),
        };
    }

    let status = if report.net_result > 0.0 {
        ProfitIndicatorStatus::Green
    } else if report.gross_margin > 0.0 {
        ProfitIndicatorStatus::Yellow
    } else {
        ProfitIndicatorStatus::Red
    };

    let mut rationale = format!(
        "Net = {:.0} gross margin - {:.0} fixed - {:.0} tax",
        report.gross_margin, report.fixed_costs_total, report.tax
    );
    if let (ProfitIndicatorStatus::Yellow, Some(threshold)) =
        (status, report.break_even_revenue.revenue())
    {
        rationale.push_str(&format!(", break-even at {threshold:.0} revenue"));
    }

    ProfitIndicator {
        status,
        score,
        rationale,
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ProfitIndicator {
    pub status: ProfitIndicatorStatus,
    pub score: f64,
    pub rationale: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProfitIndicatorStatus {
    /// Net result is positive.
    Green,
    /// Variable costs are covered but fixed costs are not.
    Yellow,
    Red,
}

impl ProfitIndicatorStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Green => "Profitable",
            Self::Yellow => "Below break-even",
            Self::Red => "Loss-making",
        }
    }
}
