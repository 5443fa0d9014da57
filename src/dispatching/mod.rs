//! Selection rules and rule engine for picking the next process.
//!
//! Every selection-based policy reduces to "among the ready processes,
//! dispatch the one with the lowest score". Rules compute the score; the
//! engine orders candidates and resolves ties with a total tie-breaker.
//!
//! # Usage
//!
//! ```
//! use cpu_schedule::dispatching::{rules, Candidate, RuleEngine, SelectionContext, TieBreaker};
//! use cpu_schedule::models::Process;
//!
//! let p1 = Process::new("P1", 0, 8);
//! let p2 = Process::new("P2", 0, 3);
//! let ready = vec![Candidate::fresh(0, &p1), Candidate::fresh(1, &p2)];
//!
//! let engine = RuleEngine::new()
//!     .with_rule(rules::ShortestBurst)
//!     .with_final_tie_breaker(TieBreaker::InputOrder);
//! assert_eq!(engine.select_best(&ready, &SelectionContext::at_time(0)), Some(1));
//! ```

mod context;
mod engine;
pub mod rules;

pub use context::{Candidate, SelectionContext};
pub use engine::{RuleEngine, TieBreaker};

use std::fmt::Debug;

/// Score returned by a selection rule.
///
/// Lower scores = dispatched first. Times are integer ticks, so scores are
/// integers and comparisons are exact.
pub type RuleScore = i64;

/// A rule that scores a ready process.
///
/// # Score Convention
/// **Lower score = higher priority.** Rules return smaller values for
/// processes that should get the CPU first.
pub trait SelectionRule: Send + Sync + Debug {
    /// Rule name (e.g., "SJF", "PRIORITY").
    fn name(&self) -> &'static str;

    /// Scores a candidate given the current simulation state.
    fn evaluate(&self, candidate: &Candidate<'_>, context: &SelectionContext) -> RuleScore;

    /// Rule description.
    fn description(&self) -> &'static str {
        self.name()
    }
}
