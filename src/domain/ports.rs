use crate::domain::model::{AllocationRequest, Participant, PizzaSettings};

/// Anything that can hand the engine a snapshot of an order.
pub trait OrderSource {
    fn settings(&self) -> &PizzaSettings;
    fn participants(&self) -> &[Participant];
    fn request(&self) -> AllocationRequest;
}
