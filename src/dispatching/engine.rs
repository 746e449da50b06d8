//! Round-robin engine.
//!
//! # Algorithm
//!
//! 1. Start the clock at 0 with every process's full burst remaining.
//! 2. Sweep the processes in declaration order. Each arrived, unfinished
//!    process runs `min(quantum, remaining)` ticks at the current clock.
//! 3. After each slice, if work remains anywhere, insert `idle_gap` idle
//!    ticks.
//! 4. If a whole sweep dispatched nothing, idle until the earliest future
//!    arrival; stop if there is none.
//!
//! Ties (simultaneous arrivals) resolve by declaration order, so output
//! is fully deterministic.
//!
//! # Complexity
//! O(s × n) where s = slices dispatched, n = processes.

use super::DispatchContext;
use crate::models::{Process, Timeline};

/// Deterministic time-slicing dispatcher.
///
/// Policies configure it with per-process quanta; it has no notion of
/// priority or memory.
#[derive(Debug, Clone, Default)]
pub struct RoundRobinEngine {
    idle_gap: i64,
}

impl RoundRobinEngine {
    /// Creates an engine with no idle gap.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the idle ticks inserted after each slice.
    pub fn with_idle_gap(mut self, idle_gap: i64) -> Self {
        self.idle_gap = idle_gap.max(0);
        self
    }

    /// Idle ticks inserted after each slice.
    pub fn idle_gap(&self) -> i64 {
        self.idle_gap
    }

    /// Produces the full execution timeline.
    ///
    /// `quanta[i]` is the time slice of `processes[i]`. Missing or
    /// non-positive entries are treated as 1 so the run always
    /// terminates; validation rejects such configs before they get here.
    pub fn run(&self, processes: &[Process], quanta: &[i64]) -> Timeline {
        debug_assert_eq!(processes.len(), quanta.len());

        let mut ctx = DispatchContext::new(processes);

        while ctx.has_unfinished() {
            let mut progressed = false;

            for index in 0..ctx.len() {
                if !ctx.is_ready(index) {
                    continue;
                }
                let quantum = quanta.get(index).copied().unwrap_or(1).max(1);
                ctx.run(index, quantum);
                progressed = true;

                if self.idle_gap > 0 && ctx.has_unfinished() {
                    ctx.idle_for(self.idle_gap);
                }
            }

            if !progressed {
                match ctx.next_arrival() {
                    Some(t) => ctx.idle_until(t),
                    None => {
                        log::warn!(
                            "round-robin stopped at t={} with unfinished processes",
                            ctx.now
                        );
                        break;
                    }
                }
            }
        }

        ctx.into_timeline()
    }
}
