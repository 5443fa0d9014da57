//! Gantt (execution timeline) model.
//!
//! A Gantt sequence lists the intervals during which each process held the
//! CPU. Entries are chronological and never overlap. Idle CPU time is
//! implicit: it is the gap between consecutive entries, never an entry of
//! its own.

use serde::{Deserialize, Serialize};

use super::{Process, ProcessSet};

/// One execution interval `[start, end)` of a process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GanttEntry {
    /// Process that held the CPU.
    pub pid: String,
    /// First tick of the interval.
    pub start: i64,
    /// Tick at which the interval ends (exclusive).
    pub end: i64,
}

impl GanttEntry {
    /// Creates an entry.
    pub fn new(pid: impl Into<String>, start: i64, end: i64) -> Self {
        Self {
            pid: pid.into(),
            start,
            end,
        }
    }

    /// Length of the interval in ticks.
    #[inline]
    pub fn duration(&self) -> i64 {
        self.end - self.start
    }

    /// Whether `time` falls inside `[start, end)`.
    #[inline]
    pub fn contains(&self, time: i64) -> bool {
        self.start <= time && time < self.end
    }
}

/// A gap in the timeline during which no process ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdlePeriod {
    /// First idle tick.
    pub start: i64,
    /// Tick at which the CPU became busy again.
    pub end: i64,
}

/// A chronological, non-overlapping execution timeline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Gantt {
    entries: Vec<GanttEntry>,
}

/// Execution state of a process at a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessStatus {
    /// Arrival time not reached yet.
    NotArrived,
    /// Arrived, unfinished, and not holding the CPU.
    Ready,
    /// Holding the CPU.
    Running,
    /// All burst time consumed.
    Completed,
}

/// Per-process view of the timeline at a given tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessState {
    /// Process identifier.
    pub pid: String,
    /// State at the snapshot time.
    pub status: ProcessStatus,
    /// CPU time consumed before the snapshot time.
    pub executed: i64,
    /// CPU time still required.
    pub remaining: i64,
}

impl Gantt {
    /// Creates an empty timeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry as-is.
    pub fn push(&mut self, entry: GanttEntry) {
        self.entries.push(entry);
    }

    /// Appends an entry, extending the last one instead when it belongs to
    /// the same pid and ends exactly where the new one starts.
    pub fn push_coalescing(&mut self, entry: GanttEntry) {
        if let Some(last) = self.entries.last_mut() {
            if last.pid == entry.pid && last.end == entry.start {
                last.end = entry.end;
                return;
            }
        }
        self.entries.push(entry);
    }

    /// Entries in chronological order.
    pub fn entries(&self) -> &[GanttEntry] {
        &self.entries
    }

    /// Consumes the timeline, returning its entries.
    pub fn into_entries(self) -> Vec<GanttEntry> {
        self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the timeline has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether entries are sorted by start, non-empty and non-overlapping.
    pub fn is_well_formed(&self) -> bool {
        self.entries.iter().all(|e| e.start < e.end)
            && self
                .entries
                .windows(2)
                .all(|w| w[0].end <= w[1].start)
    }

    /// Latest end time across all entries (0 when empty).
    pub fn makespan(&self) -> i64 {
        self.entries.iter().map(|e| e.end).max().unwrap_or(0)
    }

    /// Total time the CPU was busy.
    pub fn busy_time(&self) -> i64 {
        self.entries.iter().map(GanttEntry::duration).sum()
    }

    /// All entries for a given pid, in order.
    pub fn entries_for(&self, pid: &str) -> Vec<&GanttEntry> {
        self.entries.iter().filter(|e| e.pid == pid).collect()
    }

    /// Start of the first entry for a pid.
    pub fn first_start(&self, pid: &str) -> Option<i64> {
        self.entries.iter().find(|e| e.pid == pid).map(|e| e.start)
    }

    /// End of the last entry for a pid.
    pub fn completion_time(&self, pid: &str) -> Option<i64> {
        self.entries
            .iter()
            .rev()
            .find(|e| e.pid == pid)
            .map(|e| e.end)
    }

    /// Total CPU time given to a pid.
    pub fn executed_time(&self, pid: &str) -> i64 {
        self.entries
            .iter()
            .filter(|e| e.pid == pid)
            .map(GanttEntry::duration)
            .sum()
    }

    /// Pid holding the CPU at `time`, if any.
    pub fn running_at(&self, time: i64) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.contains(time))
            .map(|e| e.pid.as_str())
    }

    /// Idle gaps between consecutive entries.
    ///
    /// Time before the first entry is not reported; callers that measure
    /// from the earliest arrival can compare it against the first start.
    pub fn idle_periods(&self) -> Vec<IdlePeriod> {
        self.entries
            .windows(2)
            .filter(|w| w[0].end < w[1].start)
            .map(|w| IdlePeriod {
                start: w[0].end,
                end: w[1].start,
            })
            .collect()
    }

    /// State of every process in `processes` at `time`.
    ///
    /// Execution is counted strictly before `time`, so a process whose last
    /// entry ends at `time` is already `Completed`.
    pub fn snapshot(&self, processes: &ProcessSet, time: i64) -> Vec<ProcessState> {
        let running = self.running_at(time);
        processes
            .iter()
            .map(|p| self.process_state(p, time, running))
            .collect()
    }

    fn process_state(&self, process: &Process, time: i64, running: Option<&str>) -> ProcessState {
        let executed: i64 = self
            .entries
            .iter()
            .filter(|e| e.pid == process.pid && e.start < time)
            .map(|e| e.end.min(time) - e.start)
            .sum();
        let remaining = (process.burst_time - executed).max(0);

        let status = if !process.has_arrived(time) {
            ProcessStatus::NotArrived
        } else if remaining == 0 {
            ProcessStatus::Completed
        } else if running == Some(process.pid.as_str()) {
            ProcessStatus::Running
        } else {
            ProcessStatus::Ready
        };

        ProcessState {
            pid: process.pid.clone(),
            status,
            executed,
            remaining,
        }
    }
}

impl From<Vec<GanttEntry>> for Gantt {
    fn from(entries: Vec<GanttEntry>) -> Self {
        Self { entries }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_gantt() -> Gantt {
        Gantt::from(vec![
            GanttEntry::new("P1", 0, 2),
            GanttEntry::new("P2", 2, 6),
            GanttEntry::new("P1", 6, 11),
            GanttEntry::new("P3", 13, 15),
        ])
    }

    #[test]
    fn test_entry_duration() {
        let e = GanttEntry::new("P1", 3, 8);
        assert_eq!(e.duration(), 5);
        assert!(e.contains(3));
        assert!(e.contains(7));
        assert!(!e.contains(8));
    }

    #[test]
    fn test_push_coalescing_merges_adjacent() {
        let mut g = Gantt::new();
        g.push_coalescing(GanttEntry::new("P1", 0, 1));
        g.push_coalescing(GanttEntry::new("P1", 1, 2));
        g.push_coalescing(GanttEntry::new("P2", 2, 3));
        g.push_coalescing(GanttEntry::new("P1", 3, 4));
        assert_eq!(
            g.entries(),
            &[
                GanttEntry::new("P1", 0, 2),
                GanttEntry::new("P2", 2, 3),
                GanttEntry::new("P1", 3, 4),
            ]
        );
    }

    #[test]
    fn test_push_coalescing_keeps_gap() {
        let mut g = Gantt::new();
        g.push_coalescing(GanttEntry::new("P1", 0, 1));
        g.push_coalescing(GanttEntry::new("P1", 3, 4));
        assert_eq!(g.len(), 2);
    }

    #[test]
    fn test_aggregates() {
        let g = sample_gantt();
        assert_eq!(g.makespan(), 15);
        assert_eq!(g.busy_time(), 13);
        assert_eq!(g.executed_time("P1"), 7);
        assert_eq!(g.first_start("P1"), Some(0));
        assert_eq!(g.completion_time("P1"), Some(11));
        assert_eq!(g.entries_for("P1").len(), 2);
        assert_eq!(g.completion_time("P9"), None);
        assert!(g.is_well_formed());
    }

    #[test]
    fn test_running_and_idle() {
        let g = sample_gantt();
        assert_eq!(g.running_at(0), Some("P1"));
        assert_eq!(g.running_at(2), Some("P2"));
        assert_eq!(g.running_at(12), None);
        assert_eq!(g.idle_periods(), vec![IdlePeriod { start: 11, end: 13 }]);
    }

    #[test]
    fn test_not_well_formed() {
        let overlapping = Gantt::from(vec![
            GanttEntry::new("P1", 0, 3),
            GanttEntry::new("P2", 2, 4),
        ]);
        assert!(!overlapping.is_well_formed());

        let empty_interval = Gantt::from(vec![GanttEntry::new("P1", 2, 2)]);
        assert!(!empty_interval.is_well_formed());
    }

    #[test]
    fn test_snapshot() {
        let processes = ProcessSet::new(vec![
            Process::new("P1", 0, 7),
            Process::new("P2", 2, 4),
            Process::new("P3", 12, 2),
        ]);
        let g = sample_gantt();

        let at_4 = g.snapshot(&processes, 4);
        assert_eq!(at_4[0].status, ProcessStatus::Ready);
        assert_eq!(at_4[0].executed, 2);
        assert_eq!(at_4[0].remaining, 5);
        assert_eq!(at_4[1].status, ProcessStatus::Running);
        assert_eq!(at_4[1].executed, 2);
        assert_eq!(at_4[2].status, ProcessStatus::NotArrived);

        let at_11 = g.snapshot(&processes, 11);
        assert_eq!(at_11[0].status, ProcessStatus::Completed);
        assert_eq!(at_11[1].status, ProcessStatus::Completed);
        assert_eq!(at_11[2].status, ProcessStatus::NotArrived);

        let at_12 = g.snapshot(&processes, 12);
        assert_eq!(at_12[2].status, ProcessStatus::Ready);
        assert_eq!(at_12[2].remaining, 2);
    }

    #[test]
    fn test_serde_transparent() {
        let g = Gantt::from(vec![GanttEntry::new("P1", 0, 5)]);
        let json = serde_json::to_string(&g).unwrap();
        assert_eq!(json, r#"[{"pid":"P1","start":0,"end":5}]"#);
    }
}
