//! First Come First Serve.
//!
//! # Algorithm
//!
//! 1. Order processes by arrival time (stable under the tie-breaker).
//! 2. Advance a clock; jump it forward when the next process has not
//!    arrived yet (idle gap, no entry).
//! 3. Emit one contiguous entry per process covering its full burst.
//!
//! # Complexity
//! O(n log n) for the sort, O(n) for the pass.

use crate::dispatching::TieBreaker;
use crate::models::{Gantt, GanttEntry, ProcessSet};

pub(crate) fn schedule(processes: &ProcessSet, tie_breaker: TieBreaker) -> Gantt {
    let all = processes.processes();
    let mut gantt = Gantt::new();
    let mut clock: i64 = 0;

    for idx in super::arrival_order(processes, tie_breaker) {
        let process = &all[idx];
        clock = clock.max(process.arrival_time);
        gantt.push(GanttEntry::new(
            process.pid.clone(),
            clock,
            clock + process.burst_time,
        ));
        clock += process.burst_time;
    }

    gantt
}
