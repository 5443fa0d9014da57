//! Simulation dispatcher.
//!
//! # Flow
//!
//! 1. Resolve the algorithm identifier.
//! 2. Validate processes and options for that policy, then input limits.
//! 3. Run the strategy to get the timeline.
//! 4. Derive metrics from the timeline.
//!
//! Any failure aborts the run; no partial result is returned.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::{SimulationLimits, SimulationOptions};
use crate::dispatching::TieBreaker;
use crate::error::{Result, SimulationError};
use crate::models::{Gantt, Process, ProcessSet};
use crate::scheduler::{Algorithm, Metrics};
use crate::validation::validate_limits;

/// A simulation request as received from a caller.
///
/// Mirrors the JSON shape `{ "algorithm": "RR", "processes": [...], "timeQuantum": 2 }`.
/// Only per-run choices travel with a request; input limits belong to the
/// [`Simulator`] that serves it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationRequest {
    /// Algorithm identifier (see [`Algorithm`]).
    pub algorithm: String,
    /// Processes to schedule.
    pub processes: ProcessSet,
    /// Round-Robin quantum, overriding the simulator's.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_quantum: Option<i64>,
    /// Final tie-breaker, overriding the simulator's.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tie_breaker: Option<TieBreaker>,
}

impl SimulationRequest {
    /// Creates a request that uses the simulator's options.
    pub fn new(algorithm: impl Into<String>, processes: impl Into<ProcessSet>) -> Self {
        Self {
            algorithm: algorithm.into(),
            processes: processes.into(),
            time_quantum: None,
            tie_breaker: None,
        }
    }

    /// Sets the Round-Robin quantum.
    pub fn with_time_quantum(mut self, quantum: i64) -> Self {
        self.time_quantum = Some(quantum);
        self
    }

    /// Sets the final tie-breaker.
    pub fn with_tie_breaker(mut self, tie_breaker: TieBreaker) -> Self {
        self.tie_breaker = Some(tie_breaker);
        self
    }
}

/// Output of a successful run: `{ algoName, gantt, metrics }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResult {
    /// Human-readable policy name.
    pub algo_name: String,
    /// Execution timeline.
    pub gantt: Gantt,
    /// Derived performance metrics.
    pub metrics: Metrics,
}

/// Runs scheduling simulations with a fixed configuration.
///
/// A simulator holds only configuration; every run allocates its own
/// working state, so one value can serve concurrent callers.
///
/// # Example
///
/// ```
/// use cpu_schedule::models::{Process, ProcessSet};
/// use cpu_schedule::scheduler::Algorithm;
/// use cpu_schedule::Simulator;
///
/// let processes = ProcessSet::new(vec![
///     Process::new("P1", 0, 7),
///     Process::new("P2", 2, 4),
/// ]);
/// let result = Simulator::new().run(Algorithm::Srtf, &processes).unwrap();
///
/// assert_eq!(result.algo_name, "Shortest Remaining Time First");
/// assert_eq!(result.gantt.len(), 3);
/// assert_eq!(result.metrics.process("P1").unwrap().waiting_time, 4);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Simulator {
    options: SimulationOptions,
}

impl Simulator {
    /// Creates a simulator with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces all options.
    pub fn with_options(mut self, options: SimulationOptions) -> Self {
        self.options = options;
        self
    }

    /// Sets the Round-Robin quantum.
    pub fn with_time_quantum(mut self, quantum: i64) -> Self {
        self.options.time_quantum = Some(quantum);
        self
    }

    /// Sets the final tie-breaker.
    pub fn with_tie_breaker(mut self, tie_breaker: TieBreaker) -> Self {
        self.options.tie_breaker = tie_breaker;
        self
    }

    /// Sets input limits.
    pub fn with_limits(mut self, limits: SimulationLimits) -> Self {
        self.options.limits = limits;
        self
    }

    /// Current options.
    pub fn options(&self) -> &SimulationOptions {
        &self.options
    }

    /// Runs one policy over a process set.
    ///
    /// # Errors
    /// - [`SimulationError::EmptyInput`] for an empty set
    /// - [`SimulationError::InvalidInput`] for malformed processes or
    ///   options, or input beyond the configured limits
    #[instrument(level = "debug", skip(self, processes), fields(processes = processes.len()))]
    pub fn run(&self, algorithm: Algorithm, processes: &ProcessSet) -> Result<SimulationResult> {
        algorithm.validate(processes, &self.options)?;
        validate_limits(processes, &self.options.limits).map_err(SimulationError::invalid_input)?;

        let gantt = algorithm.execute(processes, &self.options);
        let metrics = Metrics::calculate(&gantt, processes)?;

        debug!(
            entries = gantt.len(),
            makespan = gantt.makespan(),
            avg_waiting = metrics.average_waiting_time,
            "simulation complete"
        );

        Ok(SimulationResult {
            algo_name: algorithm.display_name().to_string(),
            gantt,
            metrics,
        })
    }

    /// Runs a policy given by identifier (e.g. `"SRTF"`, `"Priority (Preemptive)"`).
    ///
    /// # Errors
    /// [`SimulationError::UnsupportedAlgorithm`] for an unknown identifier,
    /// otherwise as [`Self::run`].
    pub fn run_named(&self, algorithm: &str, processes: &ProcessSet) -> Result<SimulationResult> {
        let algorithm: Algorithm = algorithm.parse()?;
        self.run(algorithm, processes)
    }

    /// Runs a request.
    ///
    /// The request's quantum and tie-breaker override this simulator's;
    /// the configured [`SimulationLimits`] always apply.
    pub fn run_request(&self, request: &SimulationRequest) -> Result<SimulationResult> {
        let mut options = self.options.clone();
        if let Some(quantum) = request.time_quantum {
            options.time_quantum = Some(quantum);
        }
        if let Some(tie_breaker) = request.tie_breaker {
            options.tie_breaker = tie_breaker;
        }
        Self { options }.run_named(&request.algorithm, &request.processes)
    }
}

/// Runs one simulation.
///
/// Convenience entry point equivalent to
/// `Simulator::new().with_options(options.clone()).run_named(algorithm, ..)`.
///
/// # Example
///
/// ```
/// use cpu_schedule::models::Process;
/// use cpu_schedule::{simulate, SimulationOptions};
///
/// let processes = vec![Process::new("P1", 0, 5), Process::new("P2", 1, 3)];
/// let options = SimulationOptions::new().with_time_quantum(2);
/// let result = simulate("RR", &processes, &options).unwrap();
///
/// let slices: Vec<(&str, i64, i64)> = result
///     .gantt
///     .entries()
///     .iter()
///     .map(|e| (e.pid.as_str(), e.start, e.end))
///     .collect();
/// assert_eq!(
///     slices,
///     vec![("P1", 0, 2), ("P2", 2, 4), ("P1", 4, 6), ("P2", 6, 7), ("P1", 7, 8)]
/// );
/// ```
pub fn simulate(
    algorithm: &str,
    processes: &[Process],
    options: &SimulationOptions,
) -> Result<SimulationResult> {
    Simulator::new()
        .with_options(options.clone())
        .run_named(algorithm, &ProcessSet::new(processes.to_vec()))
}
