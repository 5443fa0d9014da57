//! Built-in selection rules.
//!
//! | Rule | Score | Used by |
//! |------|-------|---------|
//! | `ShortestBurst` | total burst | SJF |
//! | `ShortestRemaining` | unexecuted burst | SRTF |
//! | `HighestPriority` | priority value | Priority, Priority (Preemptive) |
//! | `ArrivalOrder` | arrival time | FCFS, Round Robin admission |
//!
//! # Score Convention
//! All rules return lower scores for processes that should run first.

use super::{Candidate, RuleScore, SelectionContext, SelectionRule};

/// Shortest Job First.
///
/// Prioritizes processes with the smallest total burst. Non-preemptive
/// policies only see fresh candidates, so this equals remaining time there.
#[derive(Debug, Clone, Copy)]
pub struct ShortestBurst;

impl SelectionRule for ShortestBurst {
    fn name(&self) -> &'static str {
        "SJF"
    }

    fn evaluate(&self, candidate: &Candidate<'_>, _context: &SelectionContext) -> RuleScore {
        candidate.process.burst_time
    }

    fn description(&self) -> &'static str {
        "Shortest Job First"
    }
}

/// Shortest Remaining Time.
///
/// Prioritizes processes closest to completion.
#[derive(Debug, Clone, Copy)]
pub struct ShortestRemaining;

impl SelectionRule for ShortestRemaining {
    fn name(&self) -> &'static str {
        "SRTF"
    }

    fn evaluate(&self, candidate: &Candidate<'_>, _context: &SelectionContext) -> RuleScore {
        candidate.remaining
    }

    fn description(&self) -> &'static str {
        "Shortest Remaining Time First"
    }
}

/// Highest priority first (lowest priority value).
///
/// Processes without a priority rank last. Priority-based policies reject
/// such inputs during validation, so this only matters for direct use.
#[derive(Debug, Clone, Copy)]
pub struct HighestPriority;

impl SelectionRule for HighestPriority {
    fn name(&self) -> &'static str {
        "PRIORITY"
    }

    fn evaluate(&self, candidate: &Candidate<'_>, _context: &SelectionContext) -> RuleScore {
        candidate
            .process
            .priority
            .map(RuleScore::from)
            .unwrap_or(RuleScore::MAX)
    }

    fn description(&self) -> &'static str {
        "Highest Priority (lowest value) First"
    }
}

/// First In First Out.
///
/// Prioritizes processes by arrival time.
#[derive(Debug, Clone, Copy)]
pub struct ArrivalOrder;

impl SelectionRule for ArrivalOrder {
    fn name(&self) -> &'static str {
        "FIFO"
    }

    fn evaluate(&self, candidate: &Candidate<'_>, _context: &SelectionContext) -> RuleScore {
        candidate.process.arrival_time
    }

    fn description(&self) -> &'static str {
        "First In First Out"
    }
}
