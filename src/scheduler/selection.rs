//! Non-preemptive selection scheduling (SJF, Priority).
//!
//! # Algorithm
//!
//! Whenever the CPU is free:
//! 1. Collect unscheduled processes with `arrival_time <= clock`.
//! 2. If none has arrived, jump the clock to the earliest pending arrival.
//! 3. Otherwise dispatch the best candidate under the rule engine and run
//!    it to completion as a single entry.
//!
//! The rule (shortest burst or lowest priority value) is the only
//! difference between SJF and non-preemptive Priority.
//!
//! # Complexity
//! O(n²): each dispatch scans the pending list.

use crate::dispatching::{Candidate, RuleEngine, SelectionContext};
use crate::models::{Gantt, GanttEntry, ProcessSet};

pub(crate) fn schedule(processes: &ProcessSet, engine: &RuleEngine) -> Gantt {
    let all = processes.processes();
    let mut pending: Vec<usize> = (0..all.len()).collect();
    let mut gantt = Gantt::new();
    let mut clock: i64 = 0;

    while !pending.is_empty() {
        let ready: Vec<Candidate<'_>> = pending
            .iter()
            .map(|&i| Candidate::fresh(i, &all[i]))
            .filter(|c| c.process.has_arrived(clock))
            .collect();

        let Some(best) = engine.select_best(&ready, &SelectionContext::at_time(clock)) else {
            match super::next_arrival(processes, &pending) {
                Some(arrival) => clock = arrival,
                None => break,
            }
            continue;
        };

        let chosen = ready[best].index;
        let process = &all[chosen];
        gantt.push(GanttEntry::new(
            process.pid.clone(),
            clock,
            clock + process.burst_time,
        ));
        clock += process.burst_time;
        pending.retain(|&i| i != chosen);
    }

    gantt
}
