//! CPU scheduling domain models.
//!
//! Provides the input and output data types of a simulation run.
//!
//! | Type | Role |
//! |------|------|
//! | `Process` | Unit of work: arrival, burst, optional priority |
//! | `ProcessSet` | Ordered, immutable input of a run |
//! | `GanttEntry` | One `[start, end)` execution interval |
//! | `Gantt` | Chronological, non-overlapping timeline |
//! | `ProcessState` | Per-process view of the timeline at one tick |

mod gantt;
mod process;

pub use gantt::{Gantt, GanttEntry, IdlePeriod, ProcessState, ProcessStatus};
pub use process::{Process, ProcessSet};
