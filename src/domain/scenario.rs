//! Caller-owned working copy of baskets and store assumptions.
//!
//! Editing happens here between evaluations; the engine itself only ever
//! sees an immutable snapshot through [`Scenario::evaluate`].

use serde::{Deserialize, Serialize};

use super::{
    entities::{Basket, BasketId, FixedCost, GlobalParameters, ShippingMode},
    evaluation::{compute, ProfitabilityReport},
    pricing::MarginPolicy,
    validation::InvalidInput,
};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub baskets: Vec<Basket>,
    pub params: GlobalParameters,
}

impl Default for Scenario {
    fn default() -> Self {
        Self::new(
            vec![Basket::new("Basket 1")
                .with_costs(20.0, 2.0)
                .with_margin(0.6)
                .with_volume_share(100.0)],
            GlobalParameters {
                monthly_traffic: 1000,
                conversion_rate: 2.0,
                transaction_fee_percent: 2.9,
                transaction_fee_fixed: 0.30,
                fixed_costs: vec![
                    FixedCost::new("Shop subscription", 32.0),
                    FixedCost::new("SEO consultant", 200.0),
                    FixedCost::annual("Domain name", 15.0),
                    FixedCost::new("Marketing", 250.0),
                ],
                tax_rate: 25.0,
                margin_policy: MarginPolicy::PriceBased,
                shipping: ShippingMode::Global {
                    cost_per_order: 6.0,
                },
            },
        )
    }
}

impl Scenario {
    pub fn new(baskets: Vec<Basket>, params: GlobalParameters) -> Self {
        Self { baskets, params }
    }

    pub fn evaluate(&self) -> Result<ProfitabilityReport, InvalidInput> {
        compute(&self.baskets, &self.params)
    }

    /// Appends a zeroed basket named after its position and returns its id.
    pub fn add_basket(&mut self) -> BasketId {
        let basket = Basket::new(format!("Basket {}", self.baskets.len() + 1));
        let id = basket.id;
        self.baskets.push(basket);
        id
    }

    /// Removes the last basket. The final remaining basket is kept.
    pub fn remove_last_basket(&mut self) -> Option<Basket> {
        if self.baskets.len() > 1 {
            self.baskets.pop()
        } else {
            None
        }
    }

    /// Removes a basket by id. The final remaining basket is kept.
    pub fn remove_basket(&mut self, id: BasketId) -> Option<Basket> {
        if self.baskets.len() <= 1 {
            return None;
        }
        let index = self.baskets.iter().position(|basket| basket.id == id)?;
        Some(self.baskets.remove(index))
    }

    pub fn basket(&self, id: BasketId) -> Option<&Basket> {
        self.baskets.iter().find(|basket| basket.id == id)
    }

    pub fn basket_mut(&mut self, id: BasketId) -> Option<&mut Basket> {
        self.baskets.iter_mut().find(|basket| basket.id == id)
    }

    pub fn add_fixed_cost(&mut self, cost: FixedCost) {
        self.params.fixed_costs.push(cost);
    }

    pub fn remove_fixed_cost(&mut self, index: usize) -> Option<FixedCost> {
        (index < self.params.fixed_costs.len()).then(|| self.params.fixed_costs.remove(index))
    }

    /// Sum of the raw volume shares, as entered.
    pub fn share_total(&self) -> f64 {
        self.baskets.iter().map(|basket| basket.volume_share).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_scenario_evaluates_cleanly() {
        let scenario = Scenario::default();
        let report = scenario.evaluate().unwrap();
        assert!(report.advisories.is_empty());
        assert!((report.fixed_costs_total - 483.25).abs() < 1e-9);
        assert!((report.shipping_cost_total - 120.0).abs() < 1e-9);
    }

    #[test]
    fn scenario_built_from_parts_evaluates_them() {
        let shared = Scenario::default().params;
        let baskets = vec![
            Basket::new("Mug").with_costs(8.0, 1.0).with_margin(0.5).with_volume_share(50.0),
            Basket::new("Poster").with_costs(4.0, 0.0).with_margin(0.5).with_volume_share(50.0),
        ];
        let scenario = Scenario::new(baskets.clone(), shared.clone());
        assert_eq!(scenario.baskets, baskets);
        assert_eq!(scenario.params, shared);

        let report = scenario.evaluate().unwrap();
        assert_eq!(report, compute(&baskets, &shared).unwrap());
        assert_eq!(report.baskets.len(), 2);
        assert!((report.baskets[0].selling_price - 18.0).abs() < 1e-9);
        assert!((report.baskets[1].selling_price - 8.0).abs() < 1e-9);
    }

    #[test]
    fn added_baskets_are_numbered_and_zeroed() {
        let mut scenario = Scenario::default();
        let id = scenario.add_basket();
        let added = scenario.basket(id).unwrap();
        assert_eq!(added.name, "Basket 2");
        assert_eq!(added.volume_share, 0.0);
        assert_eq!(scenario.baskets.len(), 2);
    }

    #[test]
    fn last_basket_cannot_be_removed() {
        let mut scenario = Scenario::default();
        assert!(scenario.remove_last_basket().is_none());
        let only = scenario.baskets[0].id;
        assert!(scenario.remove_basket(only).is_none());
        assert_eq!(scenario.baskets.len(), 1);
    }

    #[test]
    fn baskets_are_removed_by_id() {
        let mut scenario = Scenario::default();
        let second = scenario.add_basket();
        scenario.add_basket();
        let removed = scenario.remove_basket(second).unwrap();
        assert_eq!(removed.name, "Basket 2");
        assert!(scenario.basket(second).is_none());
        assert_eq!(scenario.remove_last_basket().unwrap().name, "Basket 3");
    }

    #[test]
    fn edits_flow_into_next_evaluation() {
        let mut scenario = Scenario::default();
        let id = scenario.add_basket();
        if let Some(basket) = scenario.basket_mut(id) {
            basket.purchase_cost = 40.0;
            basket.margin_rate = 0.4;
            basket.volume_share = 100.0;
        }
        assert_eq!(scenario.share_total(), 200.0);

        let report = scenario.evaluate().unwrap();
        assert_eq!(report.baskets.len(), 2);
        assert!((report.baskets[1].weight - 0.5).abs() < 1e-12);
        assert!(!report.advisories.is_empty());
    }

    #[test]
    fn fixed_costs_can_be_added_and_removed() {
        let mut scenario = Scenario::default();
        scenario.add_fixed_cost(FixedCost::new("Accountant", 90.0));
        assert_eq!(scenario.params.fixed_costs.len(), 5);
        assert_eq!(scenario.remove_fixed_cost(4).unwrap().name, "Accountant");
        assert!(scenario.remove_fixed_cost(10).is_none());
    }
}
