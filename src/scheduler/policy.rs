//! Scheduling policies.
//!
//! Baseline and memory-aware are both thin configurations of the
//! round-robin engine: they differ only in the quantum rule. The
//! stochastic priority policy is a separate dispatcher and must be asked
//! for by name with an explicit seed.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{SimulationResult, StochasticScheduler};
use crate::dispatching::rules::{self, MemoryPressure, Uniform};
use crate::dispatching::{QuantumRule, RoundRobinEngine};
use crate::models::SystemConfig;
use crate::validation::{validate_config, ValidationError};

/// Which dispatcher to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Policy {
    /// Round-robin with a uniform `cpu_quantum`.
    Baseline,
    /// Round-robin with memory-pressure inflated quanta.
    MemoryAware,
    /// Priority selection with seeded random page faults.
    StochasticPriority {
        /// RNG seed; the same seed reproduces the same run.
        seed: u64,
    },
}

impl Policy {
    /// Policy name as used in comparison output.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Baseline => "baseline",
            Self::MemoryAware => "memory_aware",
            Self::StochasticPriority { .. } => "stochastic_priority",
        }
    }
}

/// Runs one policy against a configuration.
///
/// Assumes `config` already passed [`validate_config`]; see
/// [`try_simulate`] for the checked variant.
///
/// # Example
///
/// ```
/// use u_cpusim::models::{Process, SystemConfig};
/// use u_cpusim::scheduler::{simulate, Policy};
///
/// let config = SystemConfig::new(2)
///     .with_process(Process::new("P1", 0, 2))
///     .with_process(Process::new("P2", 5, 2));
///
/// let result = simulate(Policy::Baseline, &config);
/// assert_eq!(result.total_time, 7);
/// assert_eq!(result.context_switches, 0);
/// ```
pub fn simulate(policy: Policy, config: &SystemConfig) -> SimulationResult {
    let result = match policy {
        Policy::Baseline => simulate_baseline(config),
        Policy::MemoryAware => simulate_memory_aware(config),
        Policy::StochasticPriority { seed } => StochasticScheduler::new().run(config, seed),
    };

    log::debug!(
        "{}: {} processes, total_time={}, context_switches={}, utilization={:.1}%",
        policy.name(),
        config.processes.len(),
        result.total_time,
        result.context_switches,
        result.cpu_utilization
    );
    result
}

/// Validates `config`, then runs `policy`.
pub fn try_simulate(
    policy: Policy,
    config: &SystemConfig,
) -> Result<SimulationResult, Vec<ValidationError>> {
    validate_config(config)?;
    Ok(simulate(policy, config))
}

/// Round-robin with every process sliced at `cpu_quantum`.
pub fn simulate_baseline(config: &SystemConfig) -> SimulationResult {
    let quanta = Uniform.quanta(config);
    let timeline = engine_for(config).run(&config.processes, &quanta);
    SimulationResult::calculate(&timeline, &config.processes)
}

/// Round-robin with per-process quanta inflated by memory pressure.
///
/// The result additionally carries `inferred_quanta` and
/// `memory_estimates`.
pub fn simulate_memory_aware(config: &SystemConfig) -> SimulationResult {
    let quanta = MemoryPressure.quanta(config);
    let timeline = engine_for(config).run(&config.processes, &quanta);

    let mut inferred_quanta = BTreeMap::new();
    let mut memory_estimates = BTreeMap::new();
    for (process, &quantum) in config.processes.iter().zip(&quanta) {
        inferred_quanta.insert(process.pid.clone(), quantum);
        memory_estimates.insert(process.pid.clone(), rules::memory_estimate(process, config));
    }

    SimulationResult::calculate(&timeline, &config.processes)
        .with_memory_profile(inferred_quanta, memory_estimates)
}

fn engine_for(config: &SystemConfig) -> RoundRobinEngine {
    RoundRobinEngine::new().with_idle_gap(config.cpu_idle_gap)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Process, Timeline, TraceEvent};

    fn make_config(quantum: i64, processes: Vec<Process>) -> SystemConfig {
        SystemConfig::new(quantum)
            .with_total_frames(100)
            .with_page_size(4)
            .with_processes(processes)
    }

    #[test]
    fn test_baseline_two_equal_bursts() {
        let cfg = make_config(2, vec![Process::new("P1", 0, 4), Process::new("P2", 0, 4)]);
        let r = simulate(Policy::Baseline, &cfg);

        assert_eq!(r.total_time, 8);
        assert_eq!(r.context_switches, 3);
        assert_eq!(r.turnaround_times["P1"], 6);
        assert_eq!(r.turnaround_times["P2"], 8);
        assert_eq!(r.waiting_times["P1"], 2);
        assert_eq!(r.waiting_times["P2"], 4);
        assert!((r.cpu_utilization - 100.0).abs() < 1e-10);
        assert!(r.inferred_quanta.is_none());
        assert!(r.memory_estimates.is_none());
    }

    #[test]
    fn test_baseline_arrival_gap() {
        let cfg = make_config(2, vec![Process::new("P1", 0, 2), Process::new("P2", 5, 2)]);
        let r = simulate(Policy::Baseline, &cfg);

        assert_eq!(r.total_time, 7);
        assert!((r.cpu_utilization - 400.0 / 7.0).abs() < 1e-9);
        assert!(r.trace[2..5].iter().all(|e| e.event == TraceEvent::Idle));
        assert_eq!(r.trace[5].pid.as_deref(), Some("P2"));
    }

    #[test]
    fn test_memory_aware_inflation() {
        let cfg = make_config(2, vec![Process::new("P1", 0, 6).with_pages(50)]);
        let r = simulate(Policy::MemoryAware, &cfg);

        let quanta = r.inferred_quanta.as_ref().unwrap();
        let estimates = r.memory_estimates.as_ref().unwrap();
        assert_eq!(quanta["P1"], 3);
        assert_eq!(estimates["P1"], 164);
        // Two slices of 3 instead of three slices of 2
        assert_eq!(r.memory_timeline.len(), 2);
        assert_eq!(r.memory_timeline[0].end, 3);
    }

    #[test]
    fn test_memory_aware_fewer_switches() {
        let cfg = make_config(
            2,
            vec![
                Process::new("heavy", 0, 8).with_pages(100),
                Process::new("light", 0, 4),
            ],
        );
        let base = simulate(Policy::Baseline, &cfg);
        let mem = simulate(Policy::MemoryAware, &cfg);

        // heavy gets quantum 4: H[0,4) L[4,6) H[6,10) L[10,12)
        assert_eq!(mem.context_switches, 3);
        assert!(base.context_switches > mem.context_switches);
        assert_eq!(base.total_time, mem.total_time);
    }

    #[test]
    fn test_idle_gap_shifts_time_only() {
        let procs = vec![Process::new("P1", 0, 2), Process::new("P2", 0, 2)];
        let plain = simulate(Policy::Baseline, &make_config(2, procs.clone()));
        let gapped = simulate(Policy::Baseline, &make_config(2, procs).with_idle_gap(2));

        assert_eq!(plain.total_time, 4);
        assert_eq!(gapped.total_time, 6);
        assert_eq!(gapped.memory_timeline.len(), plain.memory_timeline.len());
        // P1→IDLE→P2 is not a switch
        assert_eq!(gapped.context_switches, 0);
        assert_eq!(plain.context_switches, 1);
    }

    #[test]
    fn test_waiting_is_turnaround_minus_burst() {
        let procs = vec![
            Process::new("A", 0, 7),
            Process::new("B", 1, 3),
            Process::new("C", 9, 2),
            Process::new("D", 2, 5).with_pages(80),
        ];
        let cfg = make_config(3, procs.clone());
        for policy in [Policy::Baseline, Policy::MemoryAware] {
            let r = simulate(policy, &cfg);
            for p in &procs {
                assert_eq!(
                    r.waiting_times[&p.pid],
                    r.turnaround_times[&p.pid] - p.burst_time
                );
            }
            assert!(r.cpu_utilization > 0.0 && r.cpu_utilization <= 100.0);
            assert!(Timeline::from_trace(&r.trace).is_partition());
        }
    }

    #[test]
    fn test_deterministic_output() {
        let cfg = make_config(
            2,
            vec![
                Process::new("P3", 0, 5).with_pages(30),
                Process::new("P1", 1, 4).with_pages(70),
                Process::new("P2", 1, 3),
            ],
        )
        .with_idle_gap(1);
        for policy in [Policy::Baseline, Policy::MemoryAware] {
            let a = serde_json::to_string(&simulate(policy, &cfg)).unwrap();
            let b = serde_json::to_string(&simulate(policy, &cfg)).unwrap();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_empty_process_list() {
        let r = simulate(Policy::MemoryAware, &make_config(2, vec![]));
        assert_eq!(r.total_time, 0);
        assert!((r.cpu_utilization - 0.0).abs() < 1e-10);
        assert!(r.inferred_quanta.as_ref().unwrap().is_empty());
    }

    #[test]
    fn test_try_simulate_rejects_zero_quantum() {
        let cfg = make_config(0, vec![Process::new("P1", 0, 2)]);
        assert!(try_simulate(Policy::Baseline, &cfg).is_err());

        let ok = make_config(1, vec![Process::new("P1", 0, 2)]);
        assert_eq!(try_simulate(Policy::Baseline, &ok).unwrap().total_time, 2);
    }

    #[test]
    fn test_policy_names_and_serde() {
        assert_eq!(Policy::Baseline.name(), "baseline");
        assert_eq!(Policy::MemoryAware.name(), "memory_aware");
        let json = serde_json::to_string(&Policy::StochasticPriority { seed: 7 }).unwrap();
        assert_eq!(json, r#"{"stochastic_priority":{"seed":7}}"#);
        let p: Policy = serde_json::from_str(r#""memory_aware""#).unwrap();
        assert_eq!(p, Policy::MemoryAware);
    }
}
