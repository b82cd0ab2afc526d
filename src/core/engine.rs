use crate::core::planner;
use crate::domain::model::{
    required_slices, AllocationRequest, AllocationResult, Participant, PizzaSettings, PlanOptions,
};
use crate::domain::ports::OrderSource;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_amount, validate_non_empty_string, validate_positive_number, validate_range,
    validate_unique, Validate,
};
use tracing::{debug, info, warn};

impl Validate for PizzaSettings {
    fn validate(&self) -> Result<()> {
        validate_positive_number("settings.small_pizza_slices", self.small_pizza_slices, 1)?;
        validate_positive_number("settings.large_pizza_slices", self.large_pizza_slices, 1)?;
        validate_amount("settings.large_pizza_price", self.large_pizza_price)?;
        validate_amount(
            "settings.small_pizza_price_percent",
            self.small_pizza_price_percent,
        )?;
        validate_range(
            "settings.small_pizza_price_percent",
            self.small_pizza_price_percent,
            0.0,
            100.0,
        )?;
        validate_positive_number("settings.free_pizza_threshold", self.free_pizza_threshold, 2)?;

        if self.small_pizza_slices > self.large_pizza_slices {
            debug!(
                small = self.small_pizza_slices,
                large = self.large_pizza_slices,
                "small pizzas have more slices than large ones, optimal plan disabled"
            );
        }
        Ok(())
    }
}

impl Validate for AllocationRequest {
    fn validate(&self) -> Result<()> {
        if let Some(total) = self.order_total {
            validate_amount("request.order_total", total)?;
        }
        Ok(())
    }
}

impl Validate for [Participant] {
    fn validate(&self) -> Result<()> {
        for participant in self {
            validate_non_empty_string("participants.id", &participant.id)?;
            validate_positive_number(
                &format!("participants.{}.required_slices", participant.id),
                participant.required_slices,
                1,
            )?;
        }
        validate_unique("participants.id", self.iter().map(|p| p.id.as_str()))?;
        required_slices(self)?;
        Ok(())
    }
}

/// Validates the order and runs the configured scheme over it.
pub fn compute_allocation(
    participants: &[Participant],
    settings: &PizzaSettings,
    request: &AllocationRequest,
) -> Result<AllocationResult> {
    settings.validate()?;
    participants.validate()?;
    request.validate()?;

    let scheme = settings.calculation_scheme;
    debug!(
        scheme = %scheme,
        variant = %request.variant,
        participants = participants.len(),
        "computing allocation"
    );

    let result = scheme.compute(participants, settings, request)?;

    if result.residual_slices < 0 {
        warn!(
            shortfall = -result.residual_slices,
            "purchased slices do not cover every requirement"
        );
    } else if result.common_slices > 0 {
        warn!(
            common = result.common_slices,
            "surplus slices left unassigned"
        );
    }
    info!(
        pizzas = result.pizza_count,
        free = result.free_pizza_count,
        total_cost = result.total_cost,
        "allocation complete"
    );

    Ok(result)
}

/// Validates the order and lists every purchase strategy available for it.
pub fn plan_options(participants: &[Participant], settings: &PizzaSettings) -> Result<PlanOptions> {
    settings.validate()?;
    participants.validate()?;

    let options = planner::plan_options(required_slices(participants)?, settings)?;
    debug!(available = ?options.available(), "plan options computed");
    Ok(options)
}

pub struct AllocationEngine<S: OrderSource> {
    source: S,
}

impl<S: OrderSource> AllocationEngine<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn run(&self) -> Result<AllocationResult> {
        info!(
            participants = self.source.participants().len(),
            "starting allocation"
        );
        compute_allocation(
            self.source.participants(),
            self.source.settings(),
            &self.source.request(),
        )
    }

    pub fn options(&self) -> Result<PlanOptions> {
        plan_options(self.source.participants(), self.source.settings())
    }
}
