//! Input checks that run before any arithmetic, plus the non-fatal advisories.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::entities::{Basket, GlobalParameters, ShippingMode};

/// Nominal total the raw volume shares are expected to reach.
pub const SHARE_TARGET: f64 = 100.0;
/// Allowed drift of the share total before an advisory is raised.
pub const SHARE_TOLERANCE: f64 = 0.01;

/// Malformed input. No report is produced when one of these is returned.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum InvalidInput {
    #[error("at least one basket is required")]
    EmptyBasketSet,
    #[error("{field} must be a finite, non-negative amount (got {value})")]
    InvalidAmount { field: String, value: f64 },
    #[error("{field} must be a percentage between 0 and 100 (got {value})")]
    PercentOutOfRange { field: String, value: f64 },
    #[error("every volume share is zero; orders cannot be allocated")]
    ZeroVolumeShares,
    #[error("{field} is {margin_rate}; price-based margins must stay below 1")]
    MarginNotBelowOne { field: String, margin_rate: f64 },
    #[error("{field} overflows to {value}; amounts are too large to evaluate")]
    NonFiniteResult { field: String, value: f64 },
}

/// Non-fatal condition returned next to a valid report.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Advisory {
    /// Raw shares did not add up to 100; weights were renormalized.
    VolumeSharesOffTarget { total: f64 },
    /// A flat shipping fee is active, so per-basket shipping values were not charged.
    BasketShippingIgnored { baskets: usize },
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::VolumeSharesOffTarget { total } => write!(
                f,
                "volume shares add up to {total:.2}% instead of 100%; weights were normalized"
            ),
            Self::BasketShippingIgnored { baskets } => write!(
                f,
                "{baskets} basket(s) define their own shipping cost, ignored in favour of the flat per-order fee"
            ),
        }
    }
}

/// Checks every numeric field of the basket set and parameters.
pub fn validate_inputs(baskets: &[Basket], params: &GlobalParameters) -> Result<(), InvalidInput> {
    if baskets.is_empty() {
        return Err(InvalidInput::EmptyBasketSet);
    }

    ensure_percent("conversion_rate", params.conversion_rate)?;
    ensure_percent("tax_rate", params.tax_rate)?;
    ensure_amount("transaction_fee_percent", params.transaction_fee_percent)?;
    ensure_amount("transaction_fee_fixed", params.transaction_fee_fixed)?;

    if let ShippingMode::Global { cost_per_order } = params.shipping {
        ensure_amount("shipping.cost_per_order", cost_per_order)?;
    }

    for cost in &params.fixed_costs {
        ensure_amount(&format!("fixed cost `{}`", cost.name), cost.amount)?;
    }

    for basket in baskets {
        validate_basket(basket, params)?;
    }

    Ok(())
}

fn validate_basket(basket: &Basket, params: &GlobalParameters) -> Result<(), InvalidInput> {
    let field = |name: &str| format!("basket `{}` {name}", basket.name);

    ensure_amount(&field("purchase_cost"), basket.purchase_cost)?;
    ensure_amount(&field("ancillary_fee"), basket.ancillary_fee)?;
    ensure_amount(&field("margin_rate"), basket.margin_rate)?;
    ensure_amount(&field("volume_share"), basket.volume_share)?;
    ensure_amount(&field("shipping_cost"), basket.shipping_cost)?;

    if !params.margin_policy.accepts_margin(basket.margin_rate) {
        return Err(InvalidInput::MarginNotBelowOne {
            field: field("margin_rate"),
            margin_rate: basket.margin_rate,
        });
    }

    Ok(())
}

pub(crate) fn ensure_amount(field: &str, value: f64) -> Result<(), InvalidInput> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(InvalidInput::InvalidAmount {
            field: field.to_string(),
            value,
        })
    }
}

/// Rejects a derived amount that overflowed while every input was finite.
pub(crate) fn ensure_finite(field: &str, value: f64) -> Result<f64, InvalidInput> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(InvalidInput::NonFiniteResult {
            field: field.to_string(),
            value,
        })
    }
}

fn ensure_percent(field: &str, value: f64) -> Result<(), InvalidInput> {
    ensure_amount(field, value)?;
    if value > 100.0 {
        return Err(InvalidInput::PercentOutOfRange {
            field: field.to_string(),
            value,
        });
    }
    Ok(())
}
