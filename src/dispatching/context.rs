//! Selection context and ready candidates for rule evaluation.

use crate::models::Process;

/// A ready process as seen by selection rules.
///
/// `index` is the position in the caller's process set and is what the
/// default tie-breaker compares.
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'a> {
    /// Position in the input process set.
    pub index: usize,
    /// The process itself.
    pub process: &'a Process,
    /// Burst time not yet executed (ticks).
    pub remaining: i64,
}

impl<'a> Candidate<'a> {
    /// Creates a candidate.
    pub fn new(index: usize, process: &'a Process, remaining: i64) -> Self {
        Self {
            index,
            process,
            remaining,
        }
    }

    /// Creates a candidate that has not run yet.
    pub fn fresh(index: usize, process: &'a Process) -> Self {
        Self::new(index, process, process.burst_time)
    }
}

/// Runtime simulation state passed to selection rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectionContext {
    /// Current simulation clock (ticks).
    pub current_time: i64,
}

impl SelectionContext {
    /// Creates a context at the given time.
    pub fn at_time(current_time: i64) -> Self {
        Self { current_time }
    }
}
