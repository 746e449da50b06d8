//! Process model.
//!
//! A process is a unit of CPU work: it arrives at a tick, needs a number
//! of ticks of service, and declares a synthetic memory footprint.
//!
//! # Time Representation
//! All times are integer ticks relative to the simulation epoch (t=0).

use serde::{Deserialize, Serialize};

/// A process to be scheduled.
///
/// Immutable input to a simulation run. Mutable per-run state (remaining
/// service, fault penalties) lives in [`crate::dispatching::ProcessState`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Process {
    /// Unique process identifier within a run.
    pub pid: String,
    /// Tick at which the process becomes ready.
    pub arrival_time: i64,
    /// Total CPU ticks required.
    pub burst_time: i64,
    /// Scheduling priority (lower = more urgent).
    pub priority: i32,
    /// Synthetic memory footprint in pages.
    pub pages_count: i64,
}

impl Process {
    /// Creates a new process with priority 0 and no pages.
    pub fn new(pid: impl Into<String>, arrival_time: i64, burst_time: i64) -> Self {
        Self {
            pid: pid.into(),
            arrival_time,
            burst_time,
            priority: 0,
            pages_count: 0,
        }
    }

    /// Sets the scheduling priority.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the declared page count.
    pub fn with_pages(mut self, pages_count: i64) -> Self {
        self.pages_count = pages_count;
        self
    }

    /// Whether the process has arrived by tick `t`.
    #[inline]
    pub fn has_arrived(&self, t: i64) -> bool {
        self.arrival_time <= t
    }
}
