use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::pricing::MarginPolicy;

/// Stable identifier for a basket. Opaque to the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BasketId(Uuid);

impl BasketId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for BasketId {
    fn default() -> Self {
        Self::new()
    }
}

/// One product bundle with its own cost structure and share of order volume.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Basket {
    #[serde(default)]
    pub id: BasketId,
    pub name: String,
    /// Unit cost excluding shipping.
    pub purchase_cost: f64,
    /// Packaging and other per-unit costs added before the margin.
    #[serde(default)]
    pub ancillary_fee: f64,
    /// Fractional margin (0.6 = 60 %). Its meaning depends on the [`MarginPolicy`].
    pub margin_rate: f64,
    /// Nominal percentage of total orders. Need not sum to 100 across baskets.
    pub volume_share: f64,
    /// Per-order shipping, only used with [`ShippingMode::PerBasket`].
    #[serde(default)]
    pub shipping_cost: f64,
}

impl Basket {
    /// A basket with a fresh id and zeroed economics.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: BasketId::new(),
            name: name.into(),
            purchase_cost: 0.0,
            ancillary_fee: 0.0,
            margin_rate: 0.0,
            volume_share: 0.0,
            shipping_cost: 0.0,
        }
    }

    pub fn with_costs(mut self, purchase_cost: f64, ancillary_fee: f64) -> Self {
        self.purchase_cost = purchase_cost;
        self.ancillary_fee = ancillary_fee;
        self
    }

    pub fn with_margin(mut self, margin_rate: f64) -> Self {
        self.margin_rate = margin_rate;
        self
    }

    pub fn with_volume_share(mut self, volume_share: f64) -> Self {
        self.volume_share = volume_share;
        self
    }

    pub fn with_shipping(mut self, shipping_cost: f64) -> Self {
        self.shipping_cost = shipping_cost;
        self
    }
}

/// A monthly fixed charge (subscription, consultant, advertising budget...).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FixedCost {
    pub name: String,
    pub amount: f64,
}

impl FixedCost {
    pub fn new(name: impl Into<String>, amount: f64) -> Self {
        Self {
            name: name.into(),
            amount,
        }
    }

    /// Spreads a yearly charge (e.g. a domain name) over twelve months.
    pub fn annual(name: impl Into<String>, yearly_amount: f64) -> Self {
        Self::new(name, yearly_amount / 12.0)
    }
}

/// How shipping is charged. Exactly one mode is active per evaluation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ShippingMode {
    /// Each basket carries its own `shipping_cost`.
    #[default]
    PerBasket,
    /// One flat fee per order regardless of basket.
    Global { cost_per_order: f64 },
}

/// Store-wide assumptions for one evaluation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GlobalParameters {
    /// Visits per month.
    pub monthly_traffic: u64,
    /// Percent of visits that become orders, 0..=100.
    pub conversion_rate: f64,
    /// Payment processor variable charge, percent of revenue.
    pub transaction_fee_percent: f64,
    /// Payment processor flat charge per order.
    pub transaction_fee_fixed: f64,
    #[serde(default)]
    pub fixed_costs: Vec<FixedCost>,
    /// Percent, 0..=100.
    pub tax_rate: f64,
    pub margin_policy: MarginPolicy,
    #[serde(default)]
    pub shipping: ShippingMode,
}
