//! Process model.
//!
//! A process is the unit of work handed to the CPU: it becomes eligible at
//! its arrival time and needs a fixed amount of CPU time (its burst) to
//! complete. Priority-based policies additionally read its priority.
//!
//! # Time Representation
//! All times are integer ticks relative to the simulation epoch (t=0).

use serde::{Deserialize, Serialize};

/// A process submitted to the simulated CPU.
///
/// Field names serialize in snake_case (`arrival_time`, `burst_time`) to
/// match the request shape used by callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Process {
    /// Unique process identifier within a set.
    pub pid: String,
    /// Tick at which the process becomes eligible to run.
    pub arrival_time: i64,
    /// Total CPU time required (ticks).
    pub burst_time: i64,
    /// Scheduling priority (lower value = higher priority).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
}

impl Process {
    /// Creates a process without a priority.
    pub fn new(pid: impl Into<String>, arrival_time: i64, burst_time: i64) -> Self {
        Self {
            pid: pid.into(),
            arrival_time,
            burst_time,
            priority: None,
        }
    }

    /// Sets the scheduling priority.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Whether the process has arrived by `time`.
    #[inline]
    pub fn has_arrived(&self, time: i64) -> bool {
        self.arrival_time <= time
    }
}

/// An ordered collection of processes with unique pids.
///
/// The order is the caller's insertion order; it is the default final
/// tie-break for every selection-based policy. A set is never mutated by a
/// simulation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProcessSet {
    processes: Vec<Process>,
}

impl ProcessSet {
    /// Creates a set from processes in insertion order.
    ///
    /// Uniqueness and field ranges are checked by
    /// [`validate_processes`](crate::validation::validate_processes), not here.
    pub fn new(processes: Vec<Process>) -> Self {
        Self { processes }
    }

    /// Adds a process (builder style).
    pub fn with_process(mut self, process: Process) -> Self {
        self.processes.push(process);
        self
    }

    /// Processes in insertion order.
    pub fn processes(&self) -> &[Process] {
        &self.processes
    }

    /// Iterates processes in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Process> {
        self.processes.iter()
    }

    /// Number of processes.
    pub fn len(&self) -> usize {
        self.processes.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }

    /// Finds a process by pid.
    pub fn get(&self, pid: &str) -> Option<&Process> {
        self.processes.iter().find(|p| p.pid == pid)
    }

    /// Earliest arrival time, or `None` for an empty set.
    pub fn earliest_arrival(&self) -> Option<i64> {
        self.processes.iter().map(|p| p.arrival_time).min()
    }

    /// Latest arrival time, or `None` for an empty set.
    pub fn latest_arrival(&self) -> Option<i64> {
        self.processes.iter().map(|p| p.arrival_time).max()
    }

    /// Sum of all bursts (total CPU work), or `None` on `i64` overflow.
    pub fn total_burst(&self) -> Option<i64> {
        self.processes
            .iter()
            .try_fold(0i64, |total, p| total.checked_add(p.burst_time))
    }

    /// Latest tick at which any work-conserving schedule can end.
    ///
    /// The CPU is never idle while work is pending, so every schedule ends
    /// no later than `latest_arrival + total_burst`. `None` when that sum
    /// does not fit in `i64`; `Some(0)` for an empty set.
    pub fn completion_upper_bound(&self) -> Option<i64> {
        match self.latest_arrival() {
            Some(last) => last.checked_add(self.total_burst()?),
            None => Some(0),
        }
    }

    /// Upper bound on the simulated span, measured from the earliest arrival.
    ///
    /// `None` on `i64` overflow.
    pub fn span_upper_bound(&self) -> Option<i64> {
        match self.earliest_arrival() {
            Some(first) => self.completion_upper_bound()?.checked_sub(first),
            None => Some(0),
        }
    }

    /// Whether every process carries a priority.
    pub fn all_have_priority(&self) -> bool {
        self.processes.iter().all(|p| p.priority.is_some())
    }
}

impl From<Vec<Process>> for ProcessSet {
    fn from(processes: Vec<Process>) -> Self {
        Self::new(processes)
    }
}

impl FromIterator<Process> for ProcessSet {
    fn from_iter<I: IntoIterator<Item = Process>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a ProcessSet {
    type Item = &'a Process;
    type IntoIter = std::slice::Iter<'a, Process>;

    fn into_iter(self) -> Self::IntoIter {
        self.processes.iter()
    }
}
