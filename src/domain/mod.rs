//! Profitability engine: pure functions from a basket set and store
//! assumptions to a monthly forecast.

pub mod allocation;
pub mod costs;
pub mod entities;
pub mod evaluation;
pub mod orders;
pub mod pricing;
pub mod scenario;
pub mod validation;

pub use allocation::{allocate_volume, VolumeAllocation};
pub use costs::{aggregate_costs, fixed_costs_total, transaction_fees, CostBreakdown};
pub use entities::{Basket, BasketId, FixedCost, GlobalParameters, ShippingMode};
pub use evaluation::{
    compute, income_tax, profitability_indicator, BasketOutcome, BreakEven, ProfitIndicator,
    ProfitIndicatorStatus, ProfitabilityReport,
};
pub use orders::{forecast_orders, total_orders, OrderForecast};
pub use pricing::MarginPolicy;
pub use scenario::Scenario;
pub use validation::{validate_inputs, Advisory, InvalidInput, SHARE_TARGET, SHARE_TOLERANCE};
