use crate::utils::error::SplitError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PizzaSize {
    Small,
    Large,
}

impl fmt::Display for PizzaSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PizzaSize::Small => write!(f, "small"),
            PizzaSize::Large => write!(f, "large"),
        }
    }
}

/// One person in the order and the slices they asked for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: String,
    pub required_slices: u32,
    #[serde(default)]
    pub can_take_extra: bool,
}

impl Participant {
    pub fn new(id: impl Into<String>, required_slices: u32, can_take_extra: bool) -> Self {
        Self {
            id: id.into(),
            required_slices,
            can_take_extra,
        }
    }
}

/// Total slices requested across all participants.
///
/// Fails when the total does not fit in a `u32`.
pub fn required_slices(participants: &[Participant]) -> Result<u32, SplitError> {
    participants.iter().try_fold(0u32, |total, participant| {
        total.checked_add(participant.required_slices).ok_or_else(|| {
            SplitError::validation(format!(
                "total required slices exceed {} at participant '{}'",
                u32::MAX,
                participant.id
            ))
        })
    })
}

/// How the cost of an order is turned into per-slice prices and which plan is bought.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Scheme {
    #[default]
    EqualPrice,
    ProportionalPrice,
    Mixed,
}

impl Scheme {
    pub const ALL: [Scheme; 3] = [Scheme::EqualPrice, Scheme::ProportionalPrice, Scheme::Mixed];

    pub fn id(&self) -> &'static str {
        match self {
            Scheme::EqualPrice => "equal-price",
            Scheme::ProportionalPrice => "proportional-price",
            Scheme::Mixed => "mixed",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Scheme::EqualPrice => "Equal price for all slices",
            Scheme::ProportionalPrice => "Proportional price by pizza size",
            Scheme::Mixed => "Mixed calculation",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Scheme::EqualPrice => "All slices cost the same regardless of pizza size",
            Scheme::ProportionalPrice => {
                "A slice costs its pizza's price divided by that pizza's slice count"
            }
            Scheme::Mixed => "Large pizzas for full multiples, one small pizza for the remainder",
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.id())
    }
}

impl FromStr for Scheme {
    type Err = SplitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Scheme::ALL
            .into_iter()
            .find(|scheme| scheme.id() == s)
            .ok_or_else(|| SplitError::InvalidConfigValueError {
                field: "calculation_scheme".to_string(),
                value: s.to_string(),
                reason: "Valid schemes: equal-price, proportional-price, mixed".to_string(),
            })
    }
}

/// Alternative purchase strategies offered for the same set of participants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanVariant {
    /// Only large pizzas, enough to cover every requirement.
    #[default]
    Large,
    /// Only small pizzas, enough to cover every requirement.
    Small,
    /// Closest large/small combination found by the optimizer.
    Optimal,
    /// One large pizza fewer, accepting a small shortfall.
    Reduced,
}

impl PlanVariant {
    pub const ALL: [PlanVariant; 4] = [
        PlanVariant::Large,
        PlanVariant::Small,
        PlanVariant::Optimal,
        PlanVariant::Reduced,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PlanVariant::Large => "large",
            PlanVariant::Small => "small",
            PlanVariant::Optimal => "optimal",
            PlanVariant::Reduced => "reduced",
        }
    }
}

impl fmt::Display for PlanVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for PlanVariant {
    type Err = SplitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PlanVariant::ALL
            .into_iter()
            .find(|variant| variant.as_str() == s)
            .ok_or_else(|| SplitError::InvalidConfigValueError {
                field: "variant".to_string(),
                value: s.to_string(),
                reason: "Valid variants: large, small, optimal, reduced".to_string(),
            })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PizzaSettings {
    pub small_pizza_slices: u32,
    pub large_pizza_slices: u32,
    pub large_pizza_price: f64,
    pub small_pizza_price_percent: f64,
    /// Every Nth pizza in the order is free.
    pub free_pizza_threshold: u32,
    pub use_free_pizza: bool,
    pub free_pizza_is_small: bool,
    pub calculation_scheme: Scheme,
}

impl Default for PizzaSettings {
    fn default() -> Self {
        Self {
            small_pizza_slices: 6,
            large_pizza_slices: 8,
            large_pizza_price: 800.0,
            small_pizza_price_percent: 65.0,
            free_pizza_threshold: 3,
            use_free_pizza: true,
            free_pizza_is_small: false,
            calculation_scheme: Scheme::EqualPrice,
        }
    }
}

impl PizzaSettings {
    /// Small pizza price, rounded half away from zero.
    pub fn small_pizza_price(&self) -> f64 {
        (self.large_pizza_price * self.small_pizza_price_percent / 100.0).round()
    }

    /// True when small pizzas are not actually smaller, which rules out mixed-size plans.
    pub fn small_equal(&self) -> bool {
        self.small_pizza_slices >= self.large_pizza_slices
    }

    pub fn slices_of(&self, size: PizzaSize) -> u32 {
        match size {
            PizzaSize::Small => self.small_pizza_slices,
            PizzaSize::Large => self.large_pizza_slices,
        }
    }

    pub fn price_of(&self, size: PizzaSize) -> f64 {
        match size {
            PizzaSize::Small => self.small_pizza_price(),
            PizzaSize::Large => self.large_pizza_price,
        }
    }
}

/// A single purchased pizza. `price` is 0 for free pizzas; `list_price` keeps what it would have cost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pizza {
    pub size: PizzaSize,
    pub slices: u32,
    pub price: f64,
    pub list_price: f64,
    pub is_free: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AllocationRequest {
    pub variant: PlanVariant,
    /// Actual invoice amount, used instead of the theoretical cost when present.
    pub order_total: Option<f64>,
    pub split_common_slices: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticipantShare {
    pub id: String,
    pub required_slices: u32,
    pub slices: u32,
    pub cost: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationResult {
    pub scheme: Scheme,
    /// `None` when the scheme chooses its own plan.
    pub variant: Option<PlanVariant>,
    pub pizzas: Vec<Pizza>,
    pub pizza_count: u32,
    pub free_pizza_count: u32,
    pub required_slices: u32,
    pub purchased_slices: u32,
    pub shares: Vec<ParticipantShare>,
    /// Final slices by participant id.
    pub per_participant_slices: BTreeMap<String, u32>,
    /// Positive: slices left unassigned. Negative: slices short of the requirements.
    pub residual_slices: i64,
    pub common_slices: u32,
    pub total_cost: f64,
    pub free_pizza_value: f64,
    pub price_per_slice: f64,
    pub common_cost: f64,
}

impl AllocationResult {
    pub fn to_json_pretty(&self) -> Result<String, SplitError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn assigned_slices(&self) -> u32 {
        self.shares.iter().map(|share| share.slices).sum()
    }

    pub fn share(&self, id: &str) -> Option<&ParticipantShare> {
        self.shares.iter().find(|share| share.id == id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanSummary {
    pub variant: PlanVariant,
    pub large_pizzas: u32,
    pub small_pizzas: u32,
    pub free_pizza_count: u32,
    pub purchased_slices: u32,
    pub residual_slices: i64,
}

impl PlanSummary {
    pub fn pizza_count(&self) -> u32 {
        self.large_pizzas + self.small_pizzas
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanOptions {
    pub required_slices: u32,
    pub large: PlanSummary,
    pub small: PlanSummary,
    pub optimal: Option<PlanSummary>,
    pub reduced: Option<PlanSummary>,
}

impl PlanOptions {
    pub fn to_json_pretty(&self) -> Result<String, SplitError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn get(&self, variant: PlanVariant) -> Option<&PlanSummary> {
        match variant {
            PlanVariant::Large => Some(&self.large),
            PlanVariant::Small => Some(&self.small),
            PlanVariant::Optimal => self.optimal.as_ref(),
            PlanVariant::Reduced => self.reduced.as_ref(),
        }
    }

    pub fn available(&self) -> Vec<PlanVariant> {
        PlanVariant::ALL
            .into_iter()
            .filter(|variant| self.get(*variant).is_some())
            .collect()
    }
}
