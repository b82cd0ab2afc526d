use crate::core::cost::{derive_costs, SlicePricing};
use crate::core::distributor::distribute;
use crate::core::planner::{free_pizza_count, mixed_plan, plan_for_variant, purchased_slices};
use crate::domain::model::{
    required_slices, AllocationRequest, AllocationResult, Participant, ParticipantShare, Pizza,
    PizzaSettings, PlanVariant, Scheme,
};
use crate::utils::error::Result;
use tracing::debug;

impl Scheme {
    /// Runs this scheme over an already validated order.
    pub fn compute(
        self,
        participants: &[Participant],
        settings: &PizzaSettings,
        request: &AllocationRequest,
    ) -> Result<AllocationResult> {
        let required = required_slices(participants)?;

        match self {
            Scheme::EqualPrice => {
                let pizzas = plan_for_variant(required, settings, request.variant)?;
                settle(
                    self,
                    required,
                    Some(request.variant),
                    pizzas,
                    participants,
                    SlicePricing::Uniform,
                    request,
                )
            }
            Scheme::ProportionalPrice => {
                let pizzas = plan_for_variant(required, settings, request.variant)?;
                settle(
                    self,
                    required,
                    Some(request.variant),
                    pizzas,
                    participants,
                    SlicePricing::BySize,
                    request,
                )
            }
            Scheme::Mixed => {
                if request.variant != PlanVariant::default() {
                    debug!(variant = %request.variant, "mixed scheme plans its own order, variant ignored");
                }
                let pizzas = mixed_plan(required, settings)?;
                settle(
                    self,
                    required,
                    None,
                    pizzas,
                    participants,
                    SlicePricing::BySize,
                    request,
                )
            }
        }
    }
}

fn settle(
    scheme: Scheme,
    required: u32,
    variant: Option<PlanVariant>,
    pizzas: Vec<Pizza>,
    participants: &[Participant],
    pricing: SlicePricing,
    request: &AllocationRequest,
) -> Result<AllocationResult> {
    let purchased = purchased_slices(&pizzas)?;
    let distribution = distribute(purchased, participants);
    let costs = derive_costs(
        &pizzas,
        &distribution.allocations,
        pricing,
        request.order_total,
        request.split_common_slices,
    );

    let shares: Vec<ParticipantShare> = participants
        .iter()
        .zip(&distribution.allocations)
        .zip(&costs.participant_costs)
        .map(|((participant, &slices), &cost)| ParticipantShare {
            id: participant.id.clone(),
            required_slices: participant.required_slices,
            slices,
            cost,
        })
        .collect();
    let per_participant_slices = shares
        .iter()
        .map(|share| (share.id.clone(), share.slices))
        .collect();

    Ok(AllocationResult {
        scheme,
        variant,
        pizza_count: pizzas.len() as u32,
        free_pizza_count: free_pizza_count(&pizzas),
        required_slices: required,
        purchased_slices: purchased,
        shares,
        per_participant_slices,
        residual_slices: distribution.residual(),
        common_slices: distribution.leftover,
        total_cost: costs.total_cost,
        free_pizza_value: costs.free_pizza_value,
        price_per_slice: costs.price_per_slice,
        common_cost: costs.common_cost,
        pizzas,
    })
}
