//! Input validation for simulation runs.
//!
//! Checks structural integrity of a process set and of the run options
//! before any strategy executes. Detects:
//! - Empty or duplicate pids
//! - Negative arrival times and non-positive bursts
//! - Missing priorities for priority-based policies
//! - Non-positive Round-Robin quanta
//! - Timelines whose end would not fit in an `i64` tick
//! - Inputs beyond the configured size/span limits
//!
//! All problems are collected; validation does not stop at the first one.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::models::ProcessSet;

/// Caps on input size, bounding the cost of a run.
///
/// `None` means unlimited.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SimulationLimits {
    /// Maximum number of processes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_processes: Option<usize>,
    /// Maximum simulated span (ticks), checked against
    /// [`ProcessSet::span_upper_bound`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_time_span: Option<i64>,
}

impl SimulationLimits {
    /// No limits.
    pub fn unlimited() -> Self {
        Self::default()
    }

    /// Sets the maximum process count.
    pub fn with_max_processes(mut self, max: usize) -> Self {
        self.max_processes = Some(max);
        self
    }

    /// Sets the maximum simulated span.
    pub fn with_max_time_span(mut self, max: i64) -> Self {
        self.max_time_span = Some(max);
        self
    }
}

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationErrorKind {
    /// A process has an empty pid.
    EmptyPid,
    /// Two processes share the same pid.
    DuplicatePid,
    /// A process arrives before t=0.
    NegativeArrival,
    /// A process needs zero or negative CPU time.
    NonPositiveBurst,
    /// A priority-based policy got a process without priority.
    MissingPriority,
    /// The Round-Robin quantum is zero or negative.
    InvalidQuantum,
    /// The input exceeds a configured limit.
    LimitExceeded,
    /// A timeline entry names a pid absent from the process set.
    UnknownPid,
    /// A process never appears in the timeline.
    MissingEntries,
    /// `latest_arrival + total_burst` does not fit in an `i64`.
    TimeOverflow,
}

impl ValidationError {
    /// Creates a validation error.
    pub fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Validates a process set.
///
/// Checks:
/// 1. Every pid is non-empty
/// 2. No duplicate pids
/// 3. `arrival_time >= 0`
/// 4. `burst_time > 0`
/// 5. Every process has a priority, when `require_priority` is set
/// 6. `latest_arrival + total_burst` fits in an `i64`, so no strategy clock
///    can overflow
///
/// An empty set passes; emptiness is reported separately as
/// [`SimulationError::EmptyInput`](crate::SimulationError::EmptyInput).
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_processes(processes: &ProcessSet, require_priority: bool) -> ValidationResult {
    let mut errors = Vec::new();
    let mut pids = HashSet::new();

    for (position, p) in processes.iter().enumerate() {
        if p.pid.trim().is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyPid,
                format!("Process at position {position} has an empty pid"),
            ));
        } else if !pids.insert(p.pid.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicatePid,
                format!("Duplicate pid: {}", p.pid),
            ));
        }

        if p.arrival_time < 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NegativeArrival,
                format!(
                    "Process '{}' has negative arrival time {}",
                    p.pid, p.arrival_time
                ),
            ));
        }

        if p.burst_time <= 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonPositiveBurst,
                format!(
                    "Process '{}' has non-positive burst time {}",
                    p.pid, p.burst_time
                ),
            ));
        }

        if require_priority && p.priority.is_none() {
            errors.push(ValidationError::new(
                ValidationErrorKind::MissingPriority,
                format!("Process '{}' has no priority", p.pid),
            ));
        }
    }

    if processes.completion_upper_bound().is_none() {
        errors.push(ValidationError::new(
            ValidationErrorKind::TimeOverflow,
            "Latest arrival plus total burst time exceeds the representable time range",
        ));
    }

    into_result(errors)
}

/// Validates a Round-Robin quantum.
pub fn validate_quantum(quantum: i64) -> ValidationResult {
    if quantum <= 0 {
        return Err(vec![ValidationError::new(
            ValidationErrorKind::InvalidQuantum,
            format!("Time quantum must be positive, got {quantum}"),
        )]);
    }
    Ok(())
}

/// Checks a process set against size and span limits.
///
/// The span check uses [`ProcessSet::span_upper_bound`], so it rejects
/// inputs before any simulation work is done.
pub fn validate_limits(processes: &ProcessSet, limits: &SimulationLimits) -> ValidationResult {
    let mut errors = Vec::new();

    if let Some(max) = limits.max_processes {
        if processes.len() > max {
            errors.push(ValidationError::new(
                ValidationErrorKind::LimitExceeded,
                format!("{} processes exceed the limit of {max}", processes.len()),
            ));
        }
    }

    if let Some(max) = limits.max_time_span {
        match processes.span_upper_bound() {
            Some(span) if span <= max => {}
            Some(span) => errors.push(ValidationError::new(
                ValidationErrorKind::LimitExceeded,
                format!("Simulated span of up to {span} ticks exceeds the limit of {max}"),
            )),
            None => errors.push(ValidationError::new(
                ValidationErrorKind::LimitExceeded,
                format!("Simulated span overflows the limit of {max}"),
            )),
        }
    }

    into_result(errors)
}

fn into_result(errors: Vec<ValidationError>) -> ValidationResult {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
