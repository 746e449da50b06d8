//! Side-by-side comparison of the baseline and memory-aware policies.

use serde::{Deserialize, Serialize};

use super::{simulate, Policy, SimulationResult};
use crate::models::SystemConfig;
use crate::validation::{validate_config, ValidationError};

/// Results of both round-robin policies over the same configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    pub baseline: SimulationResult,
    pub memory_aware: SimulationResult,
}

impl Comparison {
    /// Memory-aware minus baseline context switches.
    pub fn context_switch_delta(&self) -> i64 {
        self.memory_aware.context_switches as i64 - self.baseline.context_switches as i64
    }

    /// Memory-aware minus baseline average waiting time.
    pub fn average_waiting_delta(&self) -> f64 {
        self.memory_aware.average_waiting_time - self.baseline.average_waiting_time
    }

    /// Memory-aware minus baseline CPU utilization (percentage points).
    pub fn utilization_delta(&self) -> f64 {
        self.memory_aware.cpu_utilization - self.baseline.cpu_utilization
    }
}

/// Runs baseline and memory-aware over `config`.
///
/// Each run builds its own dispatch state from the shared, immutable
/// config, so neither can observe the other.
///
/// # Example
///
/// ```
/// use u_cpusim::models::{Process, SystemConfig};
/// use u_cpusim::scheduler::compare;
///
/// let config = SystemConfig::new(2)
///     .with_total_frames(100)
///     .with_process(Process::new("P1", 0, 6).with_pages(100))
///     .with_process(Process::new("P2", 0, 4));
///
/// let cmp = compare(&config);
/// assert_eq!(cmp.baseline.context_switches, 4);
/// assert_eq!(cmp.memory_aware.context_switches, 3);
/// assert_eq!(cmp.context_switch_delta(), -1);
/// ```
pub fn compare(config: &SystemConfig) -> Comparison {
    Comparison {
        baseline: simulate(Policy::Baseline, config),
        memory_aware: simulate(Policy::MemoryAware, config),
    }
}

/// Validates `config`, then compares.
pub fn try_compare(config: &SystemConfig) -> Result<Comparison, Vec<ValidationError>> {
    validate_config(config)?;
    Ok(compare(config))
}
