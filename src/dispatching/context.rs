//! Per-run dispatch state.
//!
//! An index-addressed arena of process states plus the simulation clock
//! and the timeline being built. Created fresh for every policy run and
//! consumed into a [`Timeline`] at the end, so no run can observe
//! another's state.

use crate::models::{Process, Timeline};

/// Mutable simulation state of one process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessState {
    /// Position in the declaration order.
    pub index: usize,
    /// Ticks of service still required. Never increases.
    pub remaining: i64,
    /// Ticks at which this process faulted.
    pub faults: Vec<i64>,
}

impl ProcessState {
    fn new(index: usize, process: &Process) -> Self {
        Self {
            index,
            remaining: process.burst_time.max(0),
            faults: Vec::new(),
        }
    }

    /// Whether all service has been delivered.
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.remaining <= 0
    }

    /// Faults recorded at or after `now - window`.
    pub fn recent_faults(&self, now: i64, window: i64) -> usize {
        self.faults
            .iter()
            .rev()
            .take_while(|&&t| t >= now - window)
            .count()
    }
}

/// Runtime dispatch state shared by every dispatcher in this crate.
///
/// Processes are addressed by their index in the declaration order;
/// `pid` strings are only touched when a segment is written.
#[derive(Debug, Clone)]
pub struct DispatchContext<'a> {
    /// Current simulation time (ticks).
    pub now: i64,
    processes: &'a [Process],
    states: Vec<ProcessState>,
    unfinished: usize,
    timeline: Timeline,
}

impl<'a> DispatchContext<'a> {
    /// Creates a context at t=0 over the given processes.
    pub fn new(processes: &'a [Process]) -> Self {
        let states: Vec<ProcessState> = processes
            .iter()
            .enumerate()
            .map(|(i, p)| ProcessState::new(i, p))
            .collect();
        let unfinished = states.iter().filter(|s| !s.is_finished()).count();

        Self {
            now: 0,
            processes,
            states,
            unfinished,
            timeline: Timeline::new(),
        }
    }

    /// Number of processes in the arena.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Whether the arena is empty.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Input process at `index`.
    pub fn process(&self, index: usize) -> &'a Process {
        &self.processes[index]
    }

    /// State of the process at `index`.
    pub fn state(&self, index: usize) -> &ProcessState {
        &self.states[index]
    }

    /// Whether the process at `index` has arrived and still needs service.
    pub fn is_ready(&self, index: usize) -> bool {
        !self.states[index].is_finished() && self.processes[index].has_arrived(self.now)
    }

    /// Whether any process still needs service.
    #[inline]
    pub fn has_unfinished(&self) -> bool {
        self.unfinished > 0
    }

    /// Runs the process at `index` for up to `ticks`, starting now.
    ///
    /// Returns the ticks actually consumed (bounded by remaining service).
    pub fn run(&mut self, index: usize, ticks: i64) -> i64 {
        let state = &mut self.states[index];
        let used = ticks.min(state.remaining).max(0);
        if used == 0 {
            return 0;
        }

        let start = self.now;
        state.remaining -= used;
        if state.is_finished() {
            self.unfinished -= 1;
        }
        self.now += used;
        self.timeline
            .push_process(&self.processes[index].pid, start, self.now);

        log::trace!(
            "dispatch {} [{}, {}) remaining={}",
            self.processes[index].pid,
            start,
            self.now,
            self.states[index].remaining
        );
        used
    }

    /// Records a fault for the process at `index` on tick `time`.
    pub fn record_fault(&mut self, index: usize, time: i64) {
        self.states[index].faults.push(time);
    }

    /// Inserts `ticks` of idle time.
    pub fn idle_for(&mut self, ticks: i64) {
        self.idle_until(self.now + ticks);
    }

    /// Idles until tick `t`. No-op if `t` is not in the future.
    pub fn idle_until(&mut self, t: i64) {
        if t > self.now {
            self.timeline.push_idle(self.now, t);
            self.now = t;
        }
    }

    /// Earliest arrival after `now` among unfinished processes.
    pub fn next_arrival(&self) -> Option<i64> {
        self.states
            .iter()
            .filter(|s| !s.is_finished())
            .map(|s| self.processes[s.index].arrival_time)
            .filter(|&a| a > self.now)
            .min()
    }

    /// Indices of unfinished processes arriving in `(after, now]`,
    /// ordered by arrival then declaration order.
    pub fn arrivals_between(&self, after: i64) -> Vec<usize> {
        let mut arrived: Vec<usize> = self
            .states
            .iter()
            .filter(|s| !s.is_finished())
            .map(|s| s.index)
            .filter(|&i| {
                let a = self.processes[i].arrival_time;
                a > after && a <= self.now
            })
            .collect();
        arrived.sort_by_key(|&i| (self.processes[i].arrival_time, i));
        arrived
    }

    /// Fault ticks per process, in declaration order.
    pub fn fault_ticks(&self) -> impl Iterator<Item = (&'a str, &[i64])> + '_ {
        let processes = self.processes;
        self.states
            .iter()
            .map(move |s| (processes[s.index].pid.as_str(), s.faults.as_slice()))
    }

    /// Finishes the run and returns the built timeline.
    pub fn into_timeline(self) -> Timeline {
        self.timeline
    }
}
