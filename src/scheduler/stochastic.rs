//! Stochastic priority scheduler with simulated page faults.
//!
//! An alternative to the round-robin policies, kept separate because its
//! output depends on a random source. Every run takes an explicit seed or
//! an injected RNG; there is no ambient randomness.
//!
//! # Algorithm
//!
//! 1. Admit arrivals into a FIFO ready queue of arena indices, in
//!    (arrival, declaration) order.
//! 2. Pick the ready process with the lowest `priority + penalty`, where
//!    `penalty` counts its faults in the last [`FAULT_WINDOW`] ticks. Ties
//!    go to the earlier queue position.
//! 3. Run it for up to `cpu_quantum` ticks. A process whose page count
//!    exceeds `memory_threshold` faults on each tick with probability
//!    [`FAULT_PROBABILITY`]; the faulting tick is consumed and ends the
//!    slice.
//! 4. Insert the idle gap, admit new arrivals, then requeue the process
//!    if it still has work. Idle until the next arrival when nothing is
//!    ready.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::collections::{BTreeMap, VecDeque};

use super::SimulationResult;
use crate::dispatching::DispatchContext;
use crate::models::SystemConfig;

/// Per-tick fault probability for eligible processes.
pub const FAULT_PROBABILITY: f64 = 0.15;
/// Ticks over which recent faults raise a process's effective priority.
pub const FAULT_WINDOW: i64 = 10;

/// Priority dispatcher with seeded random page faults.
///
/// # Example
///
/// ```
/// use u_cpusim::models::{Process, SystemConfig};
/// use u_cpusim::scheduler::StochasticScheduler;
///
/// let config = SystemConfig::new(2)
///     .with_total_frames(64)
///     .with_process(Process::new("P1", 0, 5).with_pages(40))
///     .with_process(Process::new("P2", 0, 3).with_priority(1));
///
/// let scheduler = StochasticScheduler::new();
/// let a = scheduler.run(&config, 42);
/// let b = scheduler.run(&config, 42);
/// assert_eq!(a, b);
/// assert_eq!(a.total_time, 8);
/// ```
#[derive(Debug, Clone)]
pub struct StochasticScheduler {
    fault_probability: f64,
    fault_window: i64,
}

impl StochasticScheduler {
    /// Creates a scheduler with the default fault model.
    pub fn new() -> Self {
        Self {
            fault_probability: FAULT_PROBABILITY,
            fault_window: FAULT_WINDOW,
        }
    }

    /// Sets the per-tick fault probability (clamped to `[0, 1]`).
    pub fn with_fault_probability(mut self, probability: f64) -> Self {
        self.fault_probability = if probability.is_nan() {
            0.0
        } else {
            probability.clamp(0.0, 1.0)
        };
        self
    }

    /// Sets the penalty window in ticks.
    pub fn with_fault_window(mut self, window: i64) -> Self {
        self.fault_window = window.max(0);
        self
    }

    /// Runs with a `SmallRng` seeded from `seed`.
    pub fn run(&self, config: &SystemConfig, seed: u64) -> SimulationResult {
        let mut rng = SmallRng::seed_from_u64(seed);
        self.run_with_rng(config, &mut rng)
    }

    /// Runs with a caller-supplied random source.
    pub fn run_with_rng<R: Rng>(&self, config: &SystemConfig, rng: &mut R) -> SimulationResult {
        let processes = &config.processes;
        let quantum = config.cpu_quantum.max(1);
        let mut ctx = DispatchContext::new(processes);
        let mut ready: VecDeque<usize> = VecDeque::new();

        let mut admitted_until = i64::MIN;
        ready.extend(ctx.arrivals_between(admitted_until));
        admitted_until = ctx.now;

        while ctx.has_unfinished() {
            let Some(index) = self.select(&ctx, &ready).and_then(|pos| ready.remove(pos)) else {
                match ctx.next_arrival() {
                    Some(t) => {
                        ctx.idle_until(t);
                        ready.extend(ctx.arrivals_between(admitted_until));
                        admitted_until = ctx.now;
                        continue;
                    }
                    None => {
                        log::warn!(
                            "stochastic scheduler stopped at t={} with unfinished processes",
                            ctx.now
                        );
                        break;
                    }
                }
            };

            let process = ctx.process(index);
            let eligible = process.pages_count as f64 > config.memory_threshold;
            let mut slice = quantum.min(ctx.state(index).remaining);
            let start = ctx.now;

            if eligible {
                for offset in 0..slice {
                    if rng.random_bool(self.fault_probability) {
                        ctx.record_fault(index, start + offset);
                        log::trace!("fault {} at t={}", process.pid, start + offset);
                        slice = offset + 1;
                        break;
                    }
                }
            }
            ctx.run(index, slice);

            if config.cpu_idle_gap > 0 && ctx.has_unfinished() {
                ctx.idle_for(config.cpu_idle_gap);
            }
            ready.extend(ctx.arrivals_between(admitted_until));
            admitted_until = ctx.now;
            if !ctx.state(index).is_finished() {
                ready.push_back(index);
            }
        }

        let fault_record: BTreeMap<String, Vec<i64>> = ctx
            .fault_ticks()
            .map(|(pid, ticks)| (pid.to_string(), ticks.to_vec()))
            .collect();
        let timeline = ctx.into_timeline();

        SimulationResult::calculate(&timeline, processes).with_fault_record(fault_record)
    }

    /// Queue position of the process to run next.
    fn select(&self, ctx: &DispatchContext<'_>, ready: &VecDeque<usize>) -> Option<usize> {
        ready
            .iter()
            .enumerate()
            .min_by_key(|&(_, &index)| {
                let penalty = ctx.state(index).recent_faults(ctx.now, self.fault_window);
                i64::from(ctx.process(index).priority) + penalty as i64
            })
            .map(|(pos, _)| pos)
    }
}

impl Default for StochasticScheduler {
    fn default() -> Self {
        Self::new()
    }
}
