pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::cli::CliArgs;

pub use crate::config::toml_config::OrderFile;
pub use crate::core::engine::{compute_allocation, plan_options, AllocationEngine};
pub use crate::domain::model::{
    AllocationRequest, AllocationResult, Participant, ParticipantShare, Pizza, PizzaSettings,
    PizzaSize, PlanOptions, PlanSummary, PlanVariant, Scheme,
};
pub use crate::domain::ports::OrderSource;
pub use crate::utils::error::{Result, SplitError};
