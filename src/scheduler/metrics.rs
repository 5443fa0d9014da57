//! Schedule performance metrics.
//!
//! Derives per-process and aggregate indicators from a completed timeline
//! and its input processes. Nothing here is simulated: every value comes
//! from the timeline's entries.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Turnaround | `last_end(p) - arrival(p)` |
//! | Waiting | `turnaround(p) - burst(p)` |
//! | Response | `first_start(p) - arrival(p)` |
//! | CPU utilization | `busy / (last_completion - earliest_arrival) * 100` |
//! | Throughput | `n / (last_completion - earliest_arrival)` |
//!
//! Averages are arithmetic means over all processes. Idle gaps are not
//! entries, so busy time excludes them automatically.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{Result, SimulationError};
use crate::models::{Gantt, ProcessSet};
use crate::validation::{ValidationError, ValidationErrorKind};

/// Timing indicators for a single process (ticks).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessMetrics {
    /// Time spent ready but not running.
    pub waiting_time: i64,
    /// Time from arrival to completion.
    pub turnaround_time: i64,
    /// Time from arrival to first execution.
    pub response_time: i64,
}

/// Aggregate schedule performance indicators.
///
/// Serializes in camelCase (`averageWaitingTime`, ..., `processMetrics`).
/// The per-process map is ordered by pid so output is byte-identical for
/// identical input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metrics {
    /// Mean waiting time.
    pub average_waiting_time: f64,
    /// Mean turnaround time.
    pub average_turnaround_time: f64,
    /// Mean response time.
    pub average_response_time: f64,
    /// Busy share of the simulated span, in percent (0..=100).
    pub cpu_utilization: f64,
    /// Completed processes per tick of simulated span.
    pub throughput: f64,
    /// Per-process indicators keyed by pid.
    pub process_metrics: BTreeMap<String, ProcessMetrics>,
}

impl Metrics {
    /// Computes metrics from a timeline and its input processes.
    ///
    /// # Arguments
    /// * `gantt` - Chronological timeline produced by a strategy.
    /// * `processes` - The processes the timeline was built from.
    ///
    /// # Errors
    /// - [`SimulationError::EmptyInput`] if `processes` is empty
    /// - [`SimulationError::InvalidInput`] if an entry names an unknown pid
    ///   or a process never runs
    pub fn calculate(gantt: &Gantt, processes: &ProcessSet) -> Result<Self> {
        if processes.is_empty() {
            return Err(SimulationError::EmptyInput);
        }

        let mut errors = Vec::new();
        for entry in gantt.entries() {
            if processes.get(&entry.pid).is_none() {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownPid,
                    format!(
                        "Timeline entry [{}, {}) names unknown pid '{}'",
                        entry.start, entry.end, entry.pid
                    ),
                ));
            }
        }

        let mut process_metrics = BTreeMap::new();
        // Sums of up to n values near `i64::MAX` need a wider accumulator.
        let mut total_waiting: i128 = 0;
        let mut total_turnaround: i128 = 0;
        let mut total_response: i128 = 0;

        for process in processes {
            let (Some(first_start), Some(completion)) = (
                gantt.first_start(&process.pid),
                gantt.completion_time(&process.pid),
            ) else {
                errors.push(ValidationError::new(
                    ValidationErrorKind::MissingEntries,
                    format!("Process '{}' never runs in the timeline", process.pid),
                ));
                continue;
            };

            let turnaround_time = completion.saturating_sub(process.arrival_time);
            let waiting_time = turnaround_time.saturating_sub(process.burst_time);
            let response_time = first_start.saturating_sub(process.arrival_time).max(0);

            total_waiting += i128::from(waiting_time);
            total_turnaround += i128::from(turnaround_time);
            total_response += i128::from(response_time);

            process_metrics.insert(
                process.pid.clone(),
                ProcessMetrics {
                    waiting_time,
                    turnaround_time,
                    response_time,
                },
            );
        }

        if !errors.is_empty() {
            return Err(SimulationError::invalid_input(errors));
        }

        let count = processes.len() as f64;
        let earliest_arrival = processes.earliest_arrival().unwrap_or(0);
        let span = gantt.makespan().saturating_sub(earliest_arrival);

        let (cpu_utilization, throughput) = if span > 0 {
            (
                gantt.busy_time() as f64 / span as f64 * 100.0,
                count / span as f64,
            )
        } else {
            (0.0, 0.0)
        };

        Ok(Self {
            average_waiting_time: total_waiting as f64 / count,
            average_turnaround_time: total_turnaround as f64 / count,
            average_response_time: total_response as f64 / count,
            cpu_utilization,
            throughput,
            process_metrics,
        })
    }

    /// Indicators for one process.
    pub fn process(&self, pid: &str) -> Option<&ProcessMetrics> {
        self.process_metrics.get(pid)
    }

    /// Number of processes covered.
    pub fn process_count(&self) -> usize {
        self.process_metrics.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GanttEntry, Process};

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-10
    }

    #[test]
    fn test_fcfs_example() {
        let processes = ProcessSet::new(vec![Process::new("P1", 0, 5), Process::new("P2", 1, 3)]);
        let gantt = Gantt::from(vec![GanttEntry::new("P1", 0, 5), GanttEntry::new("P2", 5, 8)]);

        let m = Metrics::calculate(&gantt, &processes).unwrap();
        let p1 = m.process("P1").unwrap();
        let p2 = m.process("P2").unwrap();
        assert_eq!((p1.waiting_time, p1.turnaround_time, p1.response_time), (0, 5, 0));
        assert_eq!((p2.waiting_time, p2.turnaround_time, p2.response_time), (4, 7, 4));
        assert!(approx(m.average_waiting_time, 2.0));
        assert!(approx(m.average_turnaround_time, 6.0));
        assert!(approx(m.average_response_time, 2.0));
        assert!(approx(m.cpu_utilization, 100.0));
        assert!(approx(m.throughput, 0.25)); // 2 / 8
    }

    #[test]
    fn test_preemptive_uses_first_and_last_entry() {
        let processes = ProcessSet::new(vec![Process::new("P1", 0, 7), Process::new("P2", 2, 4)]);
        let gantt = Gantt::from(vec![
            GanttEntry::new("P1", 0, 2),
            GanttEntry::new("P2", 2, 6),
            GanttEntry::new("P1", 6, 11),
        ]);

        let m = Metrics::calculate(&gantt, &processes).unwrap();
        let p1 = m.process("P1").unwrap();
        assert_eq!(p1.turnaround_time, 11);
        assert_eq!(p1.waiting_time, 4);
        assert_eq!(p1.response_time, 0);
        let p2 = m.process("P2").unwrap();
        assert_eq!((p2.waiting_time, p2.turnaround_time, p2.response_time), (0, 4, 0));
    }

    #[test]
    fn test_span_from_earliest_arrival() {
        let processes = ProcessSet::new(vec![Process::new("P1", 3, 2)]);
        let gantt = Gantt::from(vec![GanttEntry::new("P1", 3, 5)]);

        let m = Metrics::calculate(&gantt, &processes).unwrap();
        assert!(approx(m.cpu_utilization, 100.0));
        assert!(approx(m.throughput, 0.5));
    }

    #[test]
    fn test_idle_gap_lowers_utilization() {
        let processes = ProcessSet::new(vec![Process::new("P1", 0, 2), Process::new("P2", 6, 2)]);
        let gantt = Gantt::from(vec![GanttEntry::new("P1", 0, 2), GanttEntry::new("P2", 6, 8)]);

        let m = Metrics::calculate(&gantt, &processes).unwrap();
        assert!(approx(m.cpu_utilization, 50.0));
        assert!(approx(m.average_waiting_time, 0.0));
    }

    #[test]
    fn test_empty_processes() {
        let err = Metrics::calculate(&Gantt::new(), &ProcessSet::default()).unwrap_err();
        assert_eq!(err, SimulationError::EmptyInput);
    }

    #[test]
    fn test_unknown_and_missing_pids() {
        let processes = ProcessSet::new(vec![Process::new("P1", 0, 2)]);
        let gantt = Gantt::from(vec![GanttEntry::new("P9", 0, 2)]);

        let err = Metrics::calculate(&gantt, &processes).unwrap_err();
        let kinds: Vec<_> = err.validation_errors().iter().map(|e| e.kind.clone()).collect();
        assert_eq!(
            kinds,
            vec![ValidationErrorKind::UnknownPid, ValidationErrorKind::MissingEntries]
        );
    }

    #[test]
    fn test_totals_near_time_limit() {
        let processes = ProcessSet::new(vec![Process::new("P1", 0, 1), Process::new("P2", 0, 1)]);
        let late = i64::MAX - 1;
        let gantt = Gantt::from(vec![
            GanttEntry::new("P1", late - 1, late),
            GanttEntry::new("P2", late, i64::MAX),
        ]);

        let m = Metrics::calculate(&gantt, &processes).unwrap();
        assert_eq!(m.process("P2").unwrap().turnaround_time, i64::MAX);
        assert!(m.average_turnaround_time > 4.0e18);
        assert!(m.average_waiting_time > 0.0);
    }

    #[test]
    fn test_serialized_shape() {
        let processes = ProcessSet::new(vec![Process::new("P1", 0, 4)]);
        let gantt = Gantt::from(vec![GanttEntry::new("P1", 0, 4)]);
        let m = Metrics::calculate(&gantt, &processes).unwrap();

        let json = serde_json::to_value(&m).unwrap();
        assert_eq!(json["averageWaitingTime"], 0.0);
        assert_eq!(json["cpuUtilization"], 100.0);
        assert_eq!(json["throughput"], 0.25);
        assert_eq!(
            json["processMetrics"]["P1"],
            serde_json::json!({"waitingTime": 0, "turnaroundTime": 4, "responseTime": 0})
        );
    }
}
