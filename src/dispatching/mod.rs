//! Round-robin dispatching and quantum rules.
//!
//! Provides the time-stepped round-robin engine, the per-run process
//! state arena it operates on, and the rules that decide each process's
//! time slice.
//!
//! # Usage
//!
//! ```
//! use u_cpusim::dispatching::{QuantumRule, RoundRobinEngine};
//! use u_cpusim::dispatching::rules;
//! use u_cpusim::models::{Process, SystemConfig};
//!
//! let config = SystemConfig::new(2)
//!     .with_process(Process::new("P1", 0, 4))
//!     .with_process(Process::new("P2", 0, 4));
//!
//! let quanta = rules::Uniform.quanta(&config);
//! let timeline = RoundRobinEngine::new().run(&config.processes, &quanta);
//! assert_eq!(timeline.total_time(), 8);
//! assert_eq!(timeline.context_switches(), 3);
//! ```

mod context;
mod engine;
pub mod rules;

pub use context::{DispatchContext, ProcessState};
pub use engine::RoundRobinEngine;

use crate::models::{Process, SystemConfig};
use std::fmt::Debug;

/// A rule that assigns each process its round-robin time slice.
///
/// Implementations must return at least 1 for a valid configuration.
pub trait QuantumRule: Send + Sync + Debug {
    /// Rule name (e.g., "UNIFORM").
    fn name(&self) -> &'static str;

    /// Time slice in ticks for `process` under `config`.
    fn quantum(&self, process: &Process, config: &SystemConfig) -> i64;

    /// Rule description.
    fn description(&self) -> &'static str {
        self.name()
    }

    /// Quanta for every process, index-aligned with `config.processes`.
    fn quanta(&self, config: &SystemConfig) -> Vec<i64> {
        config
            .processes
            .iter()
            .map(|p| self.quantum(p, config))
            .collect()
    }
}
