//! Rule engine for multi-criteria process selection.
//!
//! Applies rules in sequence (the next rule only breaks ties of the
//! previous ones) and finishes with a total tie-breaker, so two distinct
//! candidates never compare equal.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::sync::Arc;

use super::{Candidate, SelectionContext, SelectionRule};

/// How ties are broken after all rules are exhausted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreaker {
    /// Position in the caller's process list (first listed wins).
    #[default]
    InputOrder,
    /// Lexicographic pid, then input order.
    ById,
    /// Earlier arrival, then input order.
    ByArrival,
}

impl TieBreaker {
    /// Total order between two candidates.
    pub fn compare(&self, a: &Candidate<'_>, b: &Candidate<'_>) -> Ordering {
        let primary = match self {
            Self::InputOrder => Ordering::Equal,
            Self::ById => a.process.pid.cmp(&b.process.pid),
            Self::ByArrival => a.process.arrival_time.cmp(&b.process.arrival_time),
        };
        primary.then_with(|| a.index.cmp(&b.index))
    }
}

/// A composable rule engine for process selection.
///
/// # Example
/// ```
/// use cpu_schedule::dispatching::{rules, RuleEngine, TieBreaker};
///
/// let engine = RuleEngine::new()
///     .with_rule(rules::HighestPriority)
///     .with_tie_breaker(rules::ArrivalOrder)
///     .with_final_tie_breaker(TieBreaker::ById);
/// assert_eq!(engine.rule_names(), vec!["PRIORITY", "FIFO"]);
/// ```
#[derive(Clone, Default)]
pub struct RuleEngine {
    rules: Vec<Arc<dyn SelectionRule>>,
    tie_breaker: TieBreaker,
}

impl RuleEngine {
    /// Creates an empty rule engine (every candidate ties until the final
    /// tie-breaker).
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            tie_breaker: TieBreaker::InputOrder,
        }
    }

    /// Adds the primary rule.
    pub fn with_rule<R: SelectionRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Arc::new(rule));
        self
    }

    /// Adds a tie-breaking rule, consulted only when earlier rules tie.
    pub fn with_tie_breaker<R: SelectionRule + 'static>(self, rule: R) -> Self {
        self.with_rule(rule)
    }

    /// Sets the final tie-breaking strategy.
    pub fn with_final_tie_breaker(mut self, tie_breaker: TieBreaker) -> Self {
        self.tie_breaker = tie_breaker;
        self
    }

    /// The final tie-breaker in use.
    pub fn final_tie_breaker(&self) -> TieBreaker {
        self.tie_breaker
    }

    /// Names of the configured rules, in evaluation order.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Compares two candidates (`Less` = `a` is dispatched first).
    pub fn compare(
        &self,
        a: &Candidate<'_>,
        b: &Candidate<'_>,
        context: &SelectionContext,
    ) -> Ordering {
        for rule in &self.rules {
            let ordering = rule.evaluate(a, context).cmp(&rule.evaluate(b, context));
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        self.tie_breaker.compare(a, b)
    }

    /// Returns the position of the candidate to dispatch next.
    pub fn select_best(
        &self,
        candidates: &[Candidate<'_>],
        context: &SelectionContext,
    ) -> Option<usize> {
        let mut best: Option<usize> = None;
        for (pos, candidate) in candidates.iter().enumerate() {
            match best {
                Some(b) if self.compare(candidate, &candidates[b], context) != Ordering::Less => {}
                _ => best = Some(pos),
            }
        }
        best
    }

    /// Sorts candidates by dispatch order.
    ///
    /// Returns positions into `candidates`, highest priority first.
    pub fn sort_indices(
        &self,
        candidates: &[Candidate<'_>],
        context: &SelectionContext,
    ) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..candidates.len()).collect();
        indices.sort_by(|&a, &b| self.compare(&candidates[a], &candidates[b], context));
        indices
    }
}

impl std::fmt::Debug for RuleEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleEngine")
            .field("rules", &self.rule_names())
            .field("tie_breaker", &self.tie_breaker)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatching::rules;
    use crate::models::Process;

    fn candidates(processes: &[Process]) -> Vec<Candidate<'_>> {
        processes
            .iter()
            .enumerate()
            .map(|(i, p)| Candidate::fresh(i, p))
            .collect()
    }

    #[test]
    fn test_shortest_burst_ordering() {
        let processes = vec![
            Process::new("long", 0, 9),
            Process::new("short", 0, 2),
            Process::new("medium", 0, 5),
        ];
        let ready = candidates(&processes);
        let ctx = SelectionContext::at_time(0);
        let engine = RuleEngine::new().with_rule(rules::ShortestBurst);

        let order = engine.sort_indices(&ready, &ctx);
        let pids: Vec<&str> = order.iter().map(|&i| ready[i].process.pid.as_str()).collect();
        assert_eq!(pids, vec!["short", "medium", "long"]);
    }

    #[test]
    fn test_input_order_tie_break() {
        let processes = vec![
            Process::new("B", 0, 4).with_priority(1),
            Process::new("A", 0, 4).with_priority(1),
        ];
        let ready = candidates(&processes);
        let ctx = SelectionContext::at_time(0);
        let engine = RuleEngine::new().with_rule(rules::HighestPriority);

        assert_eq!(engine.select_best(&ready, &ctx), Some(0));
    }

    #[test]
    fn test_by_id_tie_break() {
        let processes = vec![Process::new("B", 0, 4), Process::new("A", 0, 4)];
        let ready = candidates(&processes);
        let ctx = SelectionContext::at_time(0);
        let engine = RuleEngine::new()
            .with_rule(rules::ShortestBurst)
            .with_final_tie_breaker(TieBreaker::ById);

        assert_eq!(engine.select_best(&ready, &ctx), Some(1));
    }

    #[test]
    fn test_by_arrival_tie_break() {
        let processes = vec![Process::new("late", 3, 4), Process::new("early", 1, 4)];
        let ready = candidates(&processes);
        let ctx = SelectionContext::at_time(5);
        let engine = RuleEngine::new()
            .with_rule(rules::ShortestBurst)
            .with_final_tie_breaker(TieBreaker::ByArrival);

        assert_eq!(engine.select_best(&ready, &ctx), Some(1));
    }

    #[test]
    fn test_secondary_rule() {
        let processes = vec![
            Process::new("P1", 2, 3).with_priority(1),
            Process::new("P2", 0, 3).with_priority(1),
        ];
        let ready = candidates(&processes);
        let ctx = SelectionContext::at_time(2);
        let engine = RuleEngine::new()
            .with_rule(rules::HighestPriority)
            .with_tie_breaker(rules::ArrivalOrder);

        // priorities tie, FIFO picks P2
        assert_eq!(engine.select_best(&ready, &ctx), Some(1));
    }

    #[test]
    fn test_remaining_overrides_burst() {
        let processes = vec![Process::new("P1", 0, 7), Process::new("P2", 2, 4)];
        let ready = vec![
            Candidate::new(0, &processes[0], 5),
            Candidate::fresh(1, &processes[1]),
        ];
        let ctx = SelectionContext::at_time(2);

        let srt = RuleEngine::new().with_rule(rules::ShortestRemaining);
        assert_eq!(srt.select_best(&ready, &ctx), Some(1));

        let sjf = RuleEngine::new().with_rule(rules::ShortestBurst);
        assert_eq!(sjf.select_best(&ready, &ctx), Some(1));
    }

    #[test]
    fn test_empty_candidates() {
        let ctx = SelectionContext::at_time(0);
        let engine = RuleEngine::new().with_rule(rules::ShortestBurst);
        assert!(engine.sort_indices(&[], &ctx).is_empty());
        assert!(engine.select_best(&[], &ctx).is_none());
    }

    #[test]
    fn test_debug_lists_rules() {
        let engine = RuleEngine::new().with_rule(rules::ShortestRemaining);
        let text = format!("{engine:?}");
        assert!(text.contains("SRTF"));
        assert!(text.contains("InputOrder"));
    }
}
