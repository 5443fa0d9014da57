//! Single-processor CPU scheduling simulator.
//!
//! Given a set of processes (arrival time, burst, optional priority) and a
//! policy, produces the exact execution timeline (Gantt sequence) and the
//! derived performance metrics: waiting, turnaround and response times,
//! CPU utilization and throughput.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Process`, `ProcessSet`, `GanttEntry`, `Gantt`
//! - **`validation`**: Input integrity checks (pids, times, priorities, quantum, limits)
//! - **`dispatching`**: Selection rules and the rule engine with total tie-breaking
//! - **`scheduler`**: The six policies (`Algorithm`) and `Metrics`
//! - **`simulator`**: `Simulator`, options, requests/results, policy comparison
//!
//! # Example
//!
//! ```
//! use cpu_schedule::models::Process;
//! use cpu_schedule::{simulate, SimulationOptions};
//!
//! let processes = vec![Process::new("P1", 0, 5), Process::new("P2", 1, 3)];
//! let result = simulate("FCFS", &processes, &SimulationOptions::default()).unwrap();
//!
//! assert_eq!(result.metrics.process("P2").unwrap().waiting_time, 4);
//! assert_eq!(result.metrics.average_waiting_time, 2.0);
//! ```
//!
//! # Time Model
//!
//! Times are integer ticks. Idle CPU periods are gaps between entries,
//! never entries of their own.
//!
//! # References
//!
//! - Silberschatz, Galvin & Gagne (2018), "Operating System Concepts", Ch. 5
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 3-4

pub mod dispatching;
pub mod error;
pub mod models;
pub mod scheduler;
pub mod simulator;
pub mod validation;

pub use error::{Result, SimulationError};
pub use scheduler::{Algorithm, Metrics, ProcessMetrics};
pub use simulator::{simulate, SimulationOptions, SimulationRequest, SimulationResult, Simulator};
