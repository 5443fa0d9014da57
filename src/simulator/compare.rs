//! Side-by-side comparison of every policy over one process set.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::debug;

use super::{Simulator, COMPARISON_TIME_QUANTUM};
use crate::error::{Result, SimulationError};
use crate::models::ProcessSet;
use crate::scheduler::{Algorithm, Metrics};
use crate::validation::validate_processes;

/// A metric used to rank policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ComparisonMetric {
    /// Lower is better.
    AverageWaitingTime,
    /// Lower is better.
    AverageTurnaroundTime,
    /// Lower is better.
    AverageResponseTime,
    /// Higher is better.
    CpuUtilization,
    /// Higher is better.
    Throughput,
}

impl ComparisonMetric {
    /// Reads this metric from a metrics record.
    pub fn value(&self, metrics: &Metrics) -> f64 {
        match self {
            Self::AverageWaitingTime => metrics.average_waiting_time,
            Self::AverageTurnaroundTime => metrics.average_turnaround_time,
            Self::AverageResponseTime => metrics.average_response_time,
            Self::CpuUtilization => metrics.cpu_utilization,
            Self::Throughput => metrics.throughput,
        }
    }

    /// Whether larger values rank first.
    pub fn higher_is_better(&self) -> bool {
        matches!(self, Self::CpuUtilization | Self::Throughput)
    }
}

/// Metrics of one policy within a comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonRow {
    /// The policy.
    pub algorithm: Algorithm,
    /// Its metrics over the shared process set.
    pub metrics: Metrics,
}

/// Results of running every policy over the same process set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    /// One row per policy, in [`Algorithm::ALL`] order.
    pub rows: Vec<ComparisonRow>,
}

impl Comparison {
    /// Row for a given policy.
    pub fn get(&self, algorithm: Algorithm) -> Option<&ComparisonRow> {
        self.rows.iter().find(|r| r.algorithm == algorithm)
    }

    /// Policies ordered best-first by `metric`.
    ///
    /// Equal values keep [`Algorithm::ALL`] order.
    pub fn ranking(&self, metric: ComparisonMetric) -> Vec<Algorithm> {
        let mut rows: Vec<&ComparisonRow> = self.rows.iter().collect();
        rows.sort_by(|a, b| {
            let (va, vb) = (metric.value(&a.metrics), metric.value(&b.metrics));
            let ordering = va.partial_cmp(&vb).unwrap_or(Ordering::Equal);
            if metric.higher_is_better() {
                ordering.reverse()
            } else {
                ordering
            }
        });
        rows.into_iter().map(|r| r.algorithm).collect()
    }

    /// Best policy by `metric`.
    pub fn best_by(&self, metric: ComparisonMetric) -> Option<Algorithm> {
        self.ranking(metric).first().copied()
    }
}

impl Simulator {
    /// Runs every policy over `processes`.
    ///
    /// Round Robin uses the configured quantum, or
    /// [`COMPARISON_TIME_QUANTUM`] when none is set.
    ///
    /// # Errors
    /// - [`SimulationError::EmptyInput`] for an empty set
    /// - [`SimulationError::InvalidInput`] if any process lacks a priority
    ///   (the priority policies are part of every comparison) or is
    ///   otherwise malformed
    pub fn compare(&self, processes: &ProcessSet) -> Result<Comparison> {
        if processes.is_empty() {
            return Err(SimulationError::EmptyInput);
        }
        validate_processes(processes, true).map_err(SimulationError::invalid_input)?;

        let mut options = self.options().clone();
        options.time_quantum = Some(options.time_quantum.unwrap_or(COMPARISON_TIME_QUANTUM));
        let simulator = Simulator::new().with_options(options);

        let rows = Algorithm::ALL
            .iter()
            .map(|&algorithm| {
                simulator.run(algorithm, processes).map(|result| ComparisonRow {
                    algorithm,
                    metrics: result.metrics,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        debug!(processes = processes.len(), rows = rows.len(), "comparison complete");
        Ok(Comparison { rows })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Process;
    use crate::validation::ValidationErrorKind;

    fn workload() -> ProcessSet {
        ProcessSet::new(vec![
            Process::new("P1", 0, 8).with_priority(3),
            Process::new("P2", 1, 4).with_priority(1),
            Process::new("P3", 2, 9).with_priority(4),
            Process::new("P4", 3, 5).with_priority(2),
        ])
    }

    #[test]
    fn test_all_policies_present() {
        let comparison = Simulator::new().compare(&workload()).unwrap();
        let algorithms: Vec<Algorithm> = comparison.rows.iter().map(|r| r.algorithm).collect();
        assert_eq!(algorithms, Algorithm::ALL.to_vec());
    }

    #[test]
    fn test_srtf_minimizes_average_waiting() {
        let comparison = Simulator::new().compare(&workload()).unwrap();
        // SRTF: P1 waits 9, P2 0, P3 15, P4 2 → 6.5
        let srtf = comparison.get(Algorithm::Srtf).unwrap();
        assert!((srtf.metrics.average_waiting_time - 6.5).abs() < 1e-10);
        assert_eq!(
            comparison.best_by(ComparisonMetric::AverageWaitingTime),
            Some(Algorithm::Srtf)
        );
    }

    #[test]
    fn test_ranking_direction() {
        let comparison = Simulator::new().compare(&workload()).unwrap();
        // No idle time in this workload: every policy is at 100%, order kept.
        assert_eq!(
            comparison.ranking(ComparisonMetric::CpuUtilization),
            Algorithm::ALL.to_vec()
        );
        let by_waiting = comparison.ranking(ComparisonMetric::AverageWaitingTime);
        let waits: Vec<f64> = by_waiting
            .iter()
            .map(|&a| comparison.get(a).unwrap().metrics.average_waiting_time)
            .collect();
        assert!(waits.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_comparison_quantum_default() {
        let set = ProcessSet::new(vec![
            Process::new("P1", 0, 5).with_priority(1),
            Process::new("P2", 1, 3).with_priority(1),
        ]);
        let comparison = Simulator::new().compare(&set).unwrap();
        let rr = comparison.get(Algorithm::RoundRobin).unwrap();
        // quantum 2: P1 ends at 8, P2 at 7 → waits 3 and 3
        assert!((rr.metrics.average_waiting_time - 3.0).abs() < 1e-10);

        let q1 = Simulator::new().with_time_quantum(1).compare(&set).unwrap();
        assert!(q1.get(Algorithm::RoundRobin).unwrap().metrics != rr.metrics);
    }

    #[test]
    fn test_requires_priority() {
        let set = ProcessSet::new(vec![Process::new("P1", 0, 2)]);
        let err = Simulator::new().compare(&set).unwrap_err();
        assert_eq!(
            err.validation_errors()[0].kind,
            ValidationErrorKind::MissingPriority
        );
    }

    #[test]
    fn test_empty() {
        let err = Simulator::new().compare(&ProcessSet::default()).unwrap_err();
        assert_eq!(err, SimulationError::EmptyInput);
    }
}
