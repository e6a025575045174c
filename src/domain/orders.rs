use super::allocation::VolumeAllocation;

/// Monthly order volume split across baskets. Counts are fractional;
/// rounding is left to whoever displays them.
#[derive(Clone, Debug, PartialEq)]
pub struct OrderForecast {
    pub total_orders: f64,
    pub per_basket: Vec<f64>,
}

pub fn total_orders(monthly_traffic: u64, conversion_rate: f64) -> f64 {
    monthly_traffic as f64 * (conversion_rate / 100.0)
}

pub fn forecast_orders(
    monthly_traffic: u64,
    conversion_rate: f64,
    allocation: &VolumeAllocation,
) -> OrderForecast {
    let total_orders = total_orders(monthly_traffic, conversion_rate);
    let per_basket = allocation
        .weights
        .iter()
        .map(|weight| total_orders * weight)
        .collect();

    OrderForecast {
        total_orders,
        per_basket,
    }
}
