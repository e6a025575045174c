//! Variable and fixed cost aggregation.

use serde::{Deserialize, Serialize};

use super::entities::{Basket, FixedCost, GlobalParameters, ShippingMode};
use super::orders::OrderForecast;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub purchase_cost_total: f64,
    pub shipping_cost_total: f64,
    pub transaction_fees: f64,
    pub variable_costs_total: f64,
    pub fixed_costs_total: f64,
}

/// Aggregates every cost line for one evaluation.
///
/// `orders.per_basket` must be aligned with `baskets`.
pub fn aggregate_costs(
    baskets: &[Basket],
    orders: &OrderForecast,
    revenue_total: f64,
    params: &GlobalParameters,
) -> CostBreakdown {
    let purchase_cost_total: f64 = baskets
        .iter()
        .zip(&orders.per_basket)
        .map(|(basket, count)| count * basket.purchase_cost)
        .sum();

    let shipping_cost_total = shipping_cost(baskets, orders, params.shipping);
    let transaction_fees = transaction_fees(
        revenue_total,
        orders.total_orders,
        params.transaction_fee_percent,
        params.transaction_fee_fixed,
    );
    let variable_costs_total = purchase_cost_total + shipping_cost_total + transaction_fees;

    CostBreakdown {
        purchase_cost_total,
        shipping_cost_total,
        transaction_fees,
        variable_costs_total,
        fixed_costs_total: fixed_costs_total(&params.fixed_costs),
    }
}

pub fn shipping_cost(baskets: &[Basket], orders: &OrderForecast, mode: ShippingMode) -> f64 {
    match mode {
        ShippingMode::PerBasket => baskets
            .iter()
            .zip(&orders.per_basket)
            .map(|(basket, count)| count * basket.shipping_cost)
            .sum(),
        ShippingMode::Global { cost_per_order } => orders.total_orders * cost_per_order,
    }
}

/// Payment processor charge: a percentage of revenue plus a flat fee per order.
pub fn transaction_fees(revenue: f64, order_count: f64, fee_percent: f64, fee_fixed: f64) -> f64 {
    revenue * (fee_percent / 100.0) + order_count * fee_fixed
}

pub fn fixed_costs_total(costs: &[FixedCost]) -> f64 {
    costs.iter().map(|cost| cost.amount).sum()
}
