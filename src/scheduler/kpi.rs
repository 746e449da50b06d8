//! Simulation metrics (KPIs) and trace derivation.
//!
//! Computes standard CPU scheduling indicators from a completed timeline
//! and its input processes.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Turnaround | completion − arrival |
//! | Waiting | turnaround − burst |
//! | CPU utilization | busy ticks / total ticks × 100 |
//! | Context switches | adjacent process segments with differing pid |
//!
//! A process that never ran reports 0 turnaround and 0 waiting.
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.2: Scheduling Criteria

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::{MemorySegment, Process, Timeline, TraceEntry};

/// Result of one policy run.
///
/// Maps are ordered by pid so serialized output is byte-stable across runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    /// Turnaround per pid (ticks).
    pub turnaround_times: BTreeMap<String, i64>,
    /// Waiting per pid (ticks).
    pub waiting_times: BTreeMap<String, i64>,
    /// Mean waiting time over all processes.
    pub average_waiting_time: f64,
    /// Mean turnaround time over all processes.
    pub average_turnaround_time: f64,
    /// Busy share of total time (0.0..=100.0).
    pub cpu_utilization: f64,
    /// End of the last segment (ticks).
    pub total_time: i64,
    /// Process-to-different-process transitions.
    pub context_switches: usize,
    /// One entry per tick.
    pub trace: Vec<TraceEntry>,
    /// Process segments with IDLE filtered out.
    pub memory_timeline: Vec<MemorySegment>,
    /// Quantum used per pid (memory-aware only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inferred_quanta: Option<BTreeMap<String, i64>>,
    /// Synthetic memory estimate per pid (memory-aware only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory_estimates: Option<BTreeMap<String, i64>>,
    /// Fault ticks per pid (stochastic policy only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fault_record: Option<BTreeMap<String, Vec<i64>>>,
}

impl SimulationResult {
    /// Derives all metrics from a timeline and its input processes.
    ///
    /// # Arguments
    /// * `timeline` - Segments partitioning `[0, total_time)`.
    /// * `processes` - The input processes (for arrival and burst times).
    pub fn calculate(timeline: &Timeline, processes: &[Process]) -> Self {
        let mut turnaround_times = BTreeMap::new();
        let mut waiting_times = BTreeMap::new();
        let mut total_turnaround: i64 = 0;
        let mut total_waiting: i64 = 0;

        for process in processes {
            let (turnaround, waiting) = match timeline.completion_time(&process.pid) {
                Some(completion) => {
                    let turnaround = completion - process.arrival_time;
                    (turnaround, turnaround - process.burst_time)
                }
                // Never ran → sentinel zeros
                None => (0, 0),
            };
            total_turnaround += turnaround;
            total_waiting += waiting;
            turnaround_times.insert(process.pid.clone(), turnaround);
            waiting_times.insert(process.pid.clone(), waiting);
        }

        let (average_waiting_time, average_turnaround_time) = if processes.is_empty() {
            (0.0, 0.0)
        } else {
            let n = processes.len() as f64;
            (total_waiting as f64 / n, total_turnaround as f64 / n)
        };

        let total_time = timeline.total_time();
        let cpu_utilization = if total_time > 0 {
            timeline.busy_ticks() as f64 / total_time as f64 * 100.0
        } else {
            0.0
        };

        Self {
            turnaround_times,
            waiting_times,
            average_waiting_time,
            average_turnaround_time,
            cpu_utilization,
            total_time,
            context_switches: timeline.context_switches(),
            trace: timeline.trace(),
            memory_timeline: timeline.memory_timeline(),
            inferred_quanta: None,
            memory_estimates: None,
            fault_record: None,
        }
    }

    /// Attaches per-process quanta and memory estimates.
    pub fn with_memory_profile(
        mut self,
        inferred_quanta: BTreeMap<String, i64>,
        memory_estimates: BTreeMap<String, i64>,
    ) -> Self {
        self.inferred_quanta = Some(inferred_quanta);
        self.memory_estimates = Some(memory_estimates);
        self
    }

    /// Attaches per-process fault ticks.
    pub fn with_fault_record(mut self, fault_record: BTreeMap<String, Vec<i64>>) -> Self {
        self.fault_record = Some(fault_record);
        self
    }

    /// Ticks the CPU spent idle.
    pub fn idle_time(&self) -> i64 {
        self.trace.iter().filter(|e| e.pid.is_none()).count() as i64
    }

    /// Total faults across all processes (0 when faults were not simulated).
    pub fn total_faults(&self) -> usize {
        self.fault_record
            .as_ref()
            .map(|r| r.values().map(Vec::len).sum())
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TraceEvent;

    fn alternating_timeline() -> Timeline {
        let mut t = Timeline::new();
        t.push_process("P1", 0, 2);
        t.push_process("P2", 2, 4);
        t.push_process("P1", 4, 6);
        t.push_process("P2", 6, 8);
        t
    }

    #[test]
    fn test_kpi_alternating() {
        let procs = vec![Process::new("P1", 0, 4), Process::new("P2", 0, 4)];
        let r = SimulationResult::calculate(&alternating_timeline(), &procs);

        assert_eq!(r.total_time, 8);
        assert_eq!(r.context_switches, 3);
        assert_eq!(r.turnaround_times["P1"], 6);
        assert_eq!(r.turnaround_times["P2"], 8);
        assert_eq!(r.waiting_times["P1"], 2);
        assert_eq!(r.waiting_times["P2"], 4);
        assert!((r.cpu_utilization - 100.0).abs() < 1e-10);
        assert!((r.average_waiting_time - 3.0).abs() < 1e-10);
        assert!((r.average_turnaround_time - 7.0).abs() < 1e-10);
        assert_eq!(r.trace.len(), 8);
        assert_eq!(r.memory_timeline.len(), 4);
    }

    #[test]
    fn test_kpi_idle_gap_utilization() {
        let mut t = Timeline::new();
        t.push_process("P1", 0, 2);
        t.push_idle(2, 5);
        t.push_process("P2", 5, 7);
        let procs = vec![Process::new("P1", 0, 2), Process::new("P2", 5, 2)];

        let r = SimulationResult::calculate(&t, &procs);
        assert_eq!(r.total_time, 7);
        assert!((r.cpu_utilization - 400.0 / 7.0).abs() < 1e-10);
        assert_eq!(r.waiting_times["P2"], 0);
        assert_eq!(r.idle_time(), 3);
        assert_eq!(r.trace[3].event, TraceEvent::Idle);
        assert_eq!(r.memory_timeline.len(), 2);
    }

    #[test]
    fn test_kpi_never_ran_sentinel() {
        let procs = vec![Process::new("P1", 0, 8), Process::new("ghost", 0, 3)];
        let mut t = Timeline::new();
        t.push_process("P1", 0, 8);
        let r = SimulationResult::calculate(&t, &procs);
        assert_eq!(r.turnaround_times["ghost"], 0);
        assert_eq!(r.waiting_times["ghost"], 0);
    }

    #[test]
    fn test_kpi_empty() {
        let r = SimulationResult::calculate(&Timeline::new(), &[]);
        assert_eq!(r.total_time, 0);
        assert_eq!(r.context_switches, 0);
        assert!((r.cpu_utilization - 0.0).abs() < 1e-10);
        assert!((r.average_waiting_time - 0.0).abs() < 1e-10);
        assert!(r.trace.is_empty());
        assert_eq!(r.total_faults(), 0);
    }

    #[test]
    fn test_optional_fields_omitted() {
        let procs = vec![Process::new("P1", 0, 4), Process::new("P2", 0, 4)];
        let r = SimulationResult::calculate(&alternating_timeline(), &procs);
        let json = serde_json::to_value(&r).unwrap();
        assert!(json.get("inferred_quanta").is_none());
        assert!(json.get("memory_estimates").is_none());
        assert!(json.get("fault_record").is_none());
        assert_eq!(json["turnaround_times"]["P1"], 6);

        let with = r.with_memory_profile(
            BTreeMap::from([("P1".to_string(), 3)]),
            BTreeMap::from([("P1".to_string(), 164)]),
        );
        let json = serde_json::to_value(&with).unwrap();
        assert_eq!(json["inferred_quanta"]["P1"], 3);
        assert_eq!(json["memory_estimates"]["P1"], 164);
    }

    #[test]
    fn test_total_faults() {
        let r = SimulationResult::calculate(&Timeline::new(), &[]).with_fault_record(
            BTreeMap::from([
                ("A".to_string(), vec![1, 4]),
                ("B".to_string(), vec![]),
            ]),
        );
        assert_eq!(r.total_faults(), 2);
    }
}
