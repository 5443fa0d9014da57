//! Run configuration.

use serde::{Deserialize, Serialize};

use crate::dispatching::TieBreaker;
use crate::validation::SimulationLimits;

/// Round-Robin quantum used when none is configured.
pub const DEFAULT_TIME_QUANTUM: i64 = 1;

/// Round-Robin quantum used by [`Simulator::compare`](super::Simulator::compare)
/// when none is configured.
pub const COMPARISON_TIME_QUANTUM: i64 = 2;

/// Options for a simulation run.
///
/// Deserializes from the request shape `{ "timeQuantum": 2 }`; every field
/// is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SimulationOptions {
    /// Round-Robin quantum (ticks). Ignored by other policies.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_quantum: Option<i64>,
    /// Final tie-breaker for selection-based policies.
    pub tie_breaker: TieBreaker,
    /// Input size caps.
    pub limits: SimulationLimits,
}

impl SimulationOptions {
    /// Creates default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the Round-Robin quantum.
    pub fn with_time_quantum(mut self, quantum: i64) -> Self {
        self.time_quantum = Some(quantum);
        self
    }

    /// Sets the final tie-breaker.
    pub fn with_tie_breaker(mut self, tie_breaker: TieBreaker) -> Self {
        self.tie_breaker = tie_breaker;
        self
    }

    /// Sets input limits.
    pub fn with_limits(mut self, limits: SimulationLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Effective Round-Robin quantum.
    pub fn time_quantum(&self) -> i64 {
        self.time_quantum.unwrap_or(DEFAULT_TIME_QUANTUM)
    }
}
