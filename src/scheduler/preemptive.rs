//! Preemptive selection scheduling (SRTF, Priority (Preemptive)).
//!
//! # Algorithm
//!
//! Event-driven: the choice of running process can only change when a
//! process arrives or the running one completes. Between those events a
//! remaining-time key only shrinks for the running process and priorities
//! never change, so re-evaluating every tick would pick the same process.
//!
//! 1. At each event, collect arrived and unfinished processes.
//! 2. If none, jump the clock to the next arrival.
//! 3. Otherwise run the best candidate until the earlier of its completion
//!    and the next arrival.
//! 4. Same-pid runs that touch are merged as they are emitted.
//!
//! Results match a one-tick-at-a-time simulation for integer times while
//! doing work proportional to the number of events, not the time span.
//!
//! # Complexity
//! O(n²): at most 2n events, each scanning the pending list.

use tracing::trace;

use crate::dispatching::{Candidate, RuleEngine, SelectionContext};
use crate::models::{Gantt, GanttEntry, ProcessSet};

pub(crate) fn schedule(processes: &ProcessSet, engine: &RuleEngine) -> Gantt {
    let all = processes.processes();
    let mut remaining: Vec<i64> = all.iter().map(|p| p.burst_time).collect();
    let mut pending: Vec<usize> = (0..all.len()).collect();

    let mut arrivals: Vec<i64> = all.iter().map(|p| p.arrival_time).collect();
    arrivals.sort_unstable();
    arrivals.dedup();
    let mut cursor = 0;

    let mut gantt = Gantt::new();
    let mut clock: i64 = 0;
    let mut running: Option<usize> = None;

    while !pending.is_empty() {
        while cursor < arrivals.len() && arrivals[cursor] <= clock {
            cursor += 1;
        }
        let next_arrival = arrivals.get(cursor).copied();

        let ready: Vec<Candidate<'_>> = pending
            .iter()
            .filter(|&&i| all[i].has_arrived(clock))
            .map(|&i| Candidate::new(i, &all[i], remaining[i]))
            .collect();

        let Some(best) = engine.select_best(&ready, &SelectionContext::at_time(clock)) else {
            match next_arrival {
                Some(arrival) => clock = arrival,
                None => break,
            }
            continue;
        };

        let chosen = ready[best].index;
        if let Some(previous) = running {
            if previous != chosen && remaining[previous] > 0 {
                trace!(
                    preempted = %all[previous].pid,
                    by = %all[chosen].pid,
                    at = clock,
                    "preemption"
                );
            }
        }
        running = Some(chosen);

        let completion = clock + remaining[chosen];
        let until = next_arrival.map_or(completion, |arrival| arrival.min(completion));
        gantt.push_coalescing(GanttEntry::new(all[chosen].pid.clone(), clock, until));
        remaining[chosen] -= until - clock;
        clock = until;

        if remaining[chosen] == 0 {
            pending.retain(|&i| i != chosen);
            running = None;
        }
    }

    gantt
}
