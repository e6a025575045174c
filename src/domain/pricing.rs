//! Selling price derivation from a basket's cost base and margin.

use serde::{Deserialize, Serialize};

use super::validation::InvalidInput;

/// Margin convention applied to every basket of an evaluation.
///
/// The two conventions give materially different prices for the same nominal
/// rate: a 60 % margin means `cost × 1.6` under [`MarginPolicy::CostPlus`] but
/// `cost / 0.4` under [`MarginPolicy::PriceBased`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MarginPolicy {
    /// Margin expressed on top of cost: `cost × (1 + margin)`.
    CostPlus,
    /// Margin expressed as a fraction of the final price: `cost / (1 − margin)`.
    PriceBased,
}

impl MarginPolicy {
    pub fn label(&self) -> &'static str {
        match self {
            Self::CostPlus => "cost-plus",
            Self::PriceBased => "price-based",
        }
    }

    /// Exclusive upper bound on the margin rate, if any.
    pub fn margin_cap(&self) -> Option<f64> {
        match self {
            Self::CostPlus => None,
            Self::PriceBased => Some(1.0),
        }
    }

    pub fn accepts_margin(&self, margin_rate: f64) -> bool {
        self.margin_cap().map(|cap| margin_rate < cap).unwrap_or(true)
    }

    /// Price of one unit whose cost base is `purchase_cost + ancillary_fee`.
    pub fn selling_price(
        &self,
        purchase_cost: f64,
        ancillary_fee: f64,
        margin_rate: f64,
    ) -> Result<f64, InvalidInput> {
        let cost = purchase_cost + ancillary_fee;
        match self {
            Self::CostPlus => Ok(cost * (1.0 + margin_rate)),
            Self::PriceBased => {
                if !self.accepts_margin(margin_rate) {
                    return Err(InvalidInput::MarginNotBelowOne {
                        field: "margin_rate".to_string(),
                        margin_rate,
                    });
                }
                Ok(cost / (1.0 - margin_rate))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn cost_plus_marks_up_cost_base() {
        let price = MarginPolicy::CostPlus.selling_price(10.0, 2.0, 0.6).unwrap();
        assert!(close(price, 19.2));
    }

    #[test]
    fn price_based_divides_by_complement() {
        let price = MarginPolicy::PriceBased.selling_price(10.0, 2.0, 0.6).unwrap();
        assert!(close(price, 30.0));
    }

    #[test]
    fn policies_diverge_for_same_nominal_margin() {
        let plus = MarginPolicy::CostPlus.selling_price(50.0, 0.0, 0.5).unwrap();
        let based = MarginPolicy::PriceBased.selling_price(50.0, 0.0, 0.5).unwrap();
        assert!(close(plus, 75.0));
        assert!(close(based, 100.0));
    }

    #[test]
    fn price_based_rejects_full_margin() {
        let err = MarginPolicy::PriceBased
            .selling_price(10.0, 0.0, 1.0)
            .unwrap_err();
        assert!(matches!(err, InvalidInput::MarginNotBelowOne { .. }));
        assert!(MarginPolicy::PriceBased.selling_price(10.0, 0.0, 1.5).is_err());
    }

    #[test]
    fn cost_plus_allows_margins_above_one() {
        let price = MarginPolicy::CostPlus.selling_price(10.0, 0.0, 2.0).unwrap();
        assert!(close(price, 30.0));
        assert!(MarginPolicy::CostPlus.accepts_margin(5.0));
    }

    #[test]
    fn zero_margin_sells_at_cost() {
        for policy in [MarginPolicy::CostPlus, MarginPolicy::PriceBased] {
            let price = policy.selling_price(8.0, 1.5, 0.0).unwrap();
            assert!(close(price, 9.5), "{} gave {price}", policy.label());
        }
    }
}
