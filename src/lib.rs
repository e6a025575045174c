//! Monthly profitability forecasts for a small online store.
//!
//! [`domain::compute`] turns a basket set and store-wide assumptions into a
//! [`domain::ProfitabilityReport`]. It is a pure function: no I/O, no shared
//! state, safe to call from any number of threads.

pub mod domain;
pub mod ui;
pub mod util;

pub use domain::{
    compute, Advisory, Basket, BasketId, BreakEven, FixedCost, GlobalParameters, InvalidInput,
    MarginPolicy, ProfitabilityReport, Scenario, ShippingMode,
};
