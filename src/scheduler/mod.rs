//! Scheduling strategies and metrics derivation.
//!
//! The six supported policies form the closed set [`Algorithm`]. Each one
//! is a pure function from a process set (plus options) to a Gantt
//! timeline; no two strategies share state, and each run works on its own
//! copy of the remaining-time bookkeeping.
//!
//! | Policy | Preemptive | Selection |
//! |--------|-----------|-----------|
//! | FCFS | no | arrival order |
//! | SJF | no | smallest burst among arrived |
//! | SRTF | yes | smallest remaining time among arrived |
//! | Priority | no | lowest priority value among arrived |
//! | Priority (Preemptive) | yes | lowest priority value among arrived |
//! | RR | yes | FIFO ready queue, fixed quantum |
//!
//! # Metrics
//!
//! [`Metrics`] derives waiting, turnaround and response times per process
//! plus CPU utilization and throughput from any timeline.

mod fcfs;
mod metrics;
mod preemptive;
mod round_robin;
mod selection;

pub use metrics::{Metrics, ProcessMetrics};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use tracing::trace;

use crate::dispatching::{rules, Candidate, RuleEngine, SelectionContext, TieBreaker};
use crate::error::{Result, SimulationError};
use crate::models::{Gantt, ProcessSet};
use crate::simulator::SimulationOptions;
use crate::validation::{validate_processes, validate_quantum};

/// A CPU scheduling policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Algorithm {
    /// First Come First Serve.
    Fcfs,
    /// Shortest Job First (non-preemptive).
    Sjf,
    /// Shortest Remaining Time First (preemptive SJF).
    Srtf,
    /// Priority scheduling (non-preemptive).
    Priority,
    /// Priority scheduling (preemptive).
    PriorityPreemptive,
    /// Round Robin with a fixed time quantum.
    RoundRobin,
}

impl Algorithm {
    /// Every supported policy, in presentation order.
    pub const ALL: [Algorithm; 6] = [
        Self::Fcfs,
        Self::Sjf,
        Self::Srtf,
        Self::Priority,
        Self::PriorityPreemptive,
        Self::RoundRobin,
    ];

    /// Short identifier accepted by [`FromStr`] and used on the wire.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Fcfs => "FCFS",
            Self::Sjf => "SJF",
            Self::Srtf => "SRTF",
            Self::Priority => "Priority",
            Self::PriorityPreemptive => "Priority (Preemptive)",
            Self::RoundRobin => "RR",
        }
    }

    /// Human-readable name reported as `algoName` in results.
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Fcfs => "First Come First Serve",
            Self::Sjf => "Shortest Job First",
            Self::Srtf => "Shortest Remaining Time First",
            Self::Priority => "Priority",
            Self::PriorityPreemptive => "Priority (Preemptive)",
            Self::RoundRobin => "Round Robin",
        }
    }

    /// Whether a running process can lose the CPU before it finishes.
    pub const fn is_preemptive(&self) -> bool {
        matches!(
            self,
            Self::Srtf | Self::PriorityPreemptive | Self::RoundRobin
        )
    }

    /// Whether every process must carry a priority.
    pub const fn requires_priority(&self) -> bool {
        matches!(self, Self::Priority | Self::PriorityPreemptive)
    }

    /// Whether the policy reads the time quantum.
    pub const fn uses_quantum(&self) -> bool {
        matches!(self, Self::RoundRobin)
    }

    /// Validates a process set and options for this policy.
    ///
    /// # Errors
    /// - [`SimulationError::EmptyInput`] for an empty set
    /// - [`SimulationError::InvalidInput`] for malformed processes, a
    ///   missing priority on a priority-based policy, or a non-positive
    ///   quantum on Round Robin
    pub fn validate(&self, processes: &ProcessSet, options: &SimulationOptions) -> Result<()> {
        if processes.is_empty() {
            return Err(SimulationError::EmptyInput);
        }
        validate_processes(processes, self.requires_priority())
            .map_err(SimulationError::invalid_input)?;
        if self.uses_quantum() {
            validate_quantum(options.time_quantum()).map_err(SimulationError::invalid_input)?;
        }
        Ok(())
    }

    /// Validates the input and produces the execution timeline.
    ///
    /// # Example
    /// ```
    /// use cpu_schedule::models::{GanttEntry, Process, ProcessSet};
    /// use cpu_schedule::scheduler::Algorithm;
    /// use cpu_schedule::SimulationOptions;
    ///
    /// let processes = ProcessSet::new(vec![
    ///     Process::new("P1", 0, 5),
    ///     Process::new("P2", 1, 3),
    /// ]);
    /// let gantt = Algorithm::Fcfs
    ///     .schedule(&processes, &SimulationOptions::default())
    ///     .unwrap();
    /// assert_eq!(
    ///     gantt.entries(),
    ///     &[GanttEntry::new("P1", 0, 5), GanttEntry::new("P2", 5, 8)]
    /// );
    /// ```
    pub fn schedule(&self, processes: &ProcessSet, options: &SimulationOptions) -> Result<Gantt> {
        self.validate(processes, options)?;
        Ok(self.execute(processes, options))
    }

    /// Runs the strategy on input that already passed [`Self::validate`].
    pub(crate) fn execute(&self, processes: &ProcessSet, options: &SimulationOptions) -> Gantt {
        let tie_breaker = options.tie_breaker;
        let gantt = match self {
            Self::Fcfs => fcfs::schedule(processes, tie_breaker),
            Self::Sjf | Self::Priority => {
                selection::schedule(processes, &self.rule_engine(tie_breaker))
            }
            Self::Srtf | Self::PriorityPreemptive => {
                preemptive::schedule(processes, &self.rule_engine(tie_breaker))
            }
            Self::RoundRobin => {
                round_robin::schedule(processes, options.time_quantum(), tie_breaker)
            }
        };
        trace!(
            algorithm = self.as_str(),
            entries = gantt.len(),
            makespan = gantt.makespan(),
            "strategy finished"
        );
        gantt
    }

    /// Selection rules for the policy.
    pub fn rule_engine(&self, tie_breaker: TieBreaker) -> RuleEngine {
        let engine = RuleEngine::new().with_final_tie_breaker(tie_breaker);
        match self {
            Self::Fcfs | Self::RoundRobin => engine.with_rule(rules::ArrivalOrder),
            Self::Sjf => engine.with_rule(rules::ShortestBurst),
            Self::Srtf => engine.with_rule(rules::ShortestRemaining),
            Self::Priority | Self::PriorityPreemptive => engine.with_rule(rules::HighestPriority),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = SimulationError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['_', '-'], " ");
        match normalized.as_str() {
            "fcfs" | "fifo" | "first come first serve" | "first come first served" => {
                Ok(Self::Fcfs)
            }
            "sjf" | "shortest job first" => Ok(Self::Sjf),
            "srtf" | "shortest remaining time first" => Ok(Self::Srtf),
            "priority" | "priority (non preemptive)" => Ok(Self::Priority),
            "priority (preemptive)" | "priority preemptive" => Ok(Self::PriorityPreemptive),
            "rr" | "round robin" => Ok(Self::RoundRobin),
            _ => Err(SimulationError::unsupported_algorithm(s)),
        }
    }
}

impl Serialize for Algorithm {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Algorithm {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Indices of `processes` in arrival order, ties resolved by `tie_breaker`.
fn arrival_order(processes: &ProcessSet, tie_breaker: TieBreaker) -> Vec<usize> {
    let candidates: Vec<Candidate<'_>> = processes
        .iter()
        .enumerate()
        .map(|(i, p)| Candidate::fresh(i, p))
        .collect();
    Algorithm::Fcfs
        .rule_engine(tie_breaker)
        .sort_indices(&candidates, &SelectionContext::default())
        .into_iter()
        .map(|pos| candidates[pos].index)
        .collect()
}

/// Earliest arrival among `pending` indices.
fn next_arrival(processes: &ProcessSet, pending: &[usize]) -> Option<i64> {
    let all = processes.processes();
    pending.iter().map(|&i| all[i].arrival_time).min()
}
