pub mod cost;
pub mod count;
pub mod distributor;
pub mod engine;
pub mod optimizer;
pub mod planner;
pub mod schemes;

pub use crate::domain::model::{AllocationRequest, AllocationResult, Participant, PizzaSettings};
pub use crate::domain::ports::OrderSource;
pub use crate::utils::error::Result;
