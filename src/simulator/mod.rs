//! Simulation entry points and configuration.
//!
//! Connects the pieces of a run: resolves the policy, validates input,
//! invokes the strategy, and derives metrics into a [`SimulationResult`].
//!
//! # Configuration
//!
//! [`SimulationOptions`] carries the Round-Robin quantum, the final
//! tie-breaker, and optional [`SimulationLimits`] that bound the cost of a
//! run for callers serving untrusted requests.

mod compare;
mod options;
mod runner;

pub use crate::validation::SimulationLimits;
pub use compare::{Comparison, ComparisonMetric, ComparisonRow};
pub use options::{SimulationOptions, COMPARISON_TIME_QUANTUM, DEFAULT_TIME_QUANTUM};
pub use runner::{simulate, SimulationRequest, SimulationResult, Simulator};
