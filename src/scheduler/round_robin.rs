//! Round Robin.
//!
//! # Algorithm
//!
//! 1. Order processes by arrival; start the clock at the first arrival and
//!    admit every process arriving at that tick.
//! 2. If the ready queue is empty, jump to the next arrival and admit.
//! 3. Otherwise dequeue the head and run it for `min(quantum, remaining)`.
//! 4. Admit every process that arrived by the new clock, **then** put the
//!    process that just ran back at the tail if it still has work.
//!
//! Step 4's order puts new arrivals ahead of the returning process and
//! changes the resulting schedule if reversed.
//!
//! Each turn is its own entry; consecutive turns of a lone process are not
//! merged.
//!
//! # Complexity
//! O(n log n + B/q) where B is the total burst and q the quantum.

use std::collections::VecDeque;

use crate::dispatching::TieBreaker;
use crate::models::{Gantt, GanttEntry, Process, ProcessSet};

pub(crate) fn schedule(processes: &ProcessSet, quantum: i64, tie_breaker: TieBreaker) -> Gantt {
    let all = processes.processes();
    let mut remaining: Vec<i64> = all.iter().map(|p| p.burst_time).collect();
    let mut unarrived: VecDeque<usize> = super::arrival_order(processes, tie_breaker).into();
    let mut ready: VecDeque<usize> = VecDeque::new();
    let mut gantt = Gantt::new();

    let mut clock = unarrived.front().map_or(0, |&i| all[i].arrival_time);
    admit(all, &mut unarrived, &mut ready, clock);

    while !ready.is_empty() || !unarrived.is_empty() {
        let Some(current) = ready.pop_front() else {
            if let Some(&next) = unarrived.front() {
                clock = all[next].arrival_time;
            }
            admit(all, &mut unarrived, &mut ready, clock);
            continue;
        };

        let slice = quantum.min(remaining[current]);
        gantt.push(GanttEntry::new(all[current].pid.clone(), clock, clock + slice));
        remaining[current] -= slice;
        clock += slice;

        admit(all, &mut unarrived, &mut ready, clock);
        if remaining[current] > 0 {
            ready.push_back(current);
        }
    }

    gantt
}

/// Moves every process with `arrival_time <= clock` to the ready queue,
/// preserving arrival order.
fn admit(
    all: &[Process],
    unarrived: &mut VecDeque<usize>,
    ready: &mut VecDeque<usize>,
    clock: i64,
) {
    while let Some(&next) = unarrived.front() {
        if !all[next].has_arrived(clock) {
            break;
        }
        ready.push_back(next);
        unarrived.pop_front();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_quantum_two() {
        let set = ProcessSet::new(vec![Process::new("P1", 0, 5), Process::new("P2", 1, 3)]);
        let gantt = schedule(&set, 2, TieBreaker::InputOrder);
        assert_eq!(
            gantt.entries(),
            &[
                GanttEntry::new("P1", 0, 2),
                GanttEntry::new("P2", 2, 4),
                GanttEntry::new("P1", 4, 6),
                GanttEntry::new("P2", 6, 7),
                GanttEntry::new("P1", 7, 8),
            ]
        );
    }

    #[test]
    fn test_new_arrival_goes_before_returning_process() {
        // P2 arrives exactly when P1's first slice ends; it must run next.
        let set = ProcessSet::new(vec![
            Process::new("P1", 0, 4),
            Process::new("P2", 2, 2),
            Process::new("P3", 0, 2),
        ]);
        let gantt = schedule(&set, 2, TieBreaker::InputOrder);
        assert_eq!(
            gantt.entries(),
            &[
                GanttEntry::new("P1", 0, 2),
                GanttEntry::new("P3", 2, 4),
                GanttEntry::new("P2", 4, 6),
                GanttEntry::new("P1", 6, 8),
            ]
        );
    }

    #[test]
    fn test_arrival_during_slice_queued_ahead() {
        let set = ProcessSet::new(vec![Process::new("P1", 0, 6), Process::new("P2", 1, 1)]);
        let gantt = schedule(&set, 3, TieBreaker::InputOrder);
        assert_eq!(
            gantt.entries(),
            &[
                GanttEntry::new("P1", 0, 3),
                GanttEntry::new("P2", 3, 4),
                GanttEntry::new("P1", 4, 7),
            ]
        );
    }

    #[test]
    fn test_idle_jump_to_next_arrival() {
        let set = ProcessSet::new(vec![Process::new("P1", 2, 1), Process::new("P2", 10, 3)]);
        let gantt = schedule(&set, 2, TieBreaker::InputOrder);
        assert_eq!(
            gantt.entries(),
            &[
                GanttEntry::new("P1", 2, 3),
                GanttEntry::new("P2", 10, 12),
                GanttEntry::new("P2", 12, 13),
            ]
        );
    }

    #[test]
    fn test_large_quantum_degenerates_to_fcfs() {
        let set = ProcessSet::new(vec![
            Process::new("P1", 0, 5),
            Process::new("P2", 1, 3),
            Process::new("P3", 2, 1),
        ]);
        let gantt = schedule(&set, 100, TieBreaker::InputOrder);
        assert_eq!(
            gantt.entries(),
            &[
                GanttEntry::new("P1", 0, 5),
                GanttEntry::new("P2", 5, 8),
                GanttEntry::new("P3", 8, 9),
            ]
        );
    }

    #[test]
    fn test_quantum_one_interleaves() {
        let set = ProcessSet::new(vec![Process::new("A", 0, 2), Process::new("B", 0, 2)]);
        let gantt = schedule(&set, 1, TieBreaker::InputOrder);
        let pids: Vec<&str> = gantt.entries().iter().map(|e| e.pid.as_str()).collect();
        assert_eq!(pids, vec!["A", "B", "A", "B"]);
    }
}
