//! System configuration model.
//!
//! The normalized, flat configuration a simulation consumes. Shape
//! coercion (nested `{system, processes}` payloads and similar) is the
//! boundary layer's job; this crate only ever sees this one shape.

use serde::{Deserialize, Serialize};

use super::Process;

/// Simulated machine parameters and the process set.
///
/// The order of `processes` is significant: it is the round-robin
/// service order and the tie-break order for simultaneous arrivals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemConfig {
    /// Physical frames available to all processes.
    pub total_frames: i64,
    /// Page size (informational, must be >= 1).
    pub page_size: i64,
    /// Baseline time slice in ticks.
    pub cpu_quantum: i64,
    /// Page-count threshold above which the stochastic policy may fault.
    pub memory_threshold: f64,
    /// Idle ticks inserted after each slice, for visual spacing only.
    #[serde(default)]
    pub cpu_idle_gap: i64,
    /// Processes in declaration order.
    pub processes: Vec<Process>,
}

impl SystemConfig {
    /// Creates a configuration with the given quantum and no processes.
    pub fn new(cpu_quantum: i64) -> Self {
        Self {
            total_frames: 0,
            page_size: 1,
            cpu_quantum,
            memory_threshold: 0.0,
            cpu_idle_gap: 0,
            processes: Vec::new(),
        }
    }

    /// Sets the total frame count.
    pub fn with_total_frames(mut self, total_frames: i64) -> Self {
        self.total_frames = total_frames;
        self
    }

    /// Sets the page size.
    pub fn with_page_size(mut self, page_size: i64) -> Self {
        self.page_size = page_size;
        self
    }

    /// Sets the memory threshold.
    pub fn with_memory_threshold(mut self, memory_threshold: f64) -> Self {
        self.memory_threshold = memory_threshold;
        self
    }

    /// Sets the idle gap inserted after each slice.
    pub fn with_idle_gap(mut self, cpu_idle_gap: i64) -> Self {
        self.cpu_idle_gap = cpu_idle_gap;
        self
    }

    /// Appends a process.
    pub fn with_process(mut self, process: Process) -> Self {
        self.processes.push(process);
        self
    }

    /// Replaces the process list.
    pub fn with_processes(mut self, processes: Vec<Process>) -> Self {
        self.processes = processes;
        self
    }

    /// Finds a process by pid.
    pub fn process(&self, pid: &str) -> Option<&Process> {
        self.processes.iter().find(|p| p.pid == pid)
    }

    /// Sum of all burst times.
    pub fn total_burst(&self) -> i64 {
        self.processes.iter().map(|p| p.burst_time).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let cfg = SystemConfig::new(4)
            .with_total_frames(64)
            .with_page_size(4096)
            .with_memory_threshold(0.5)
            .with_idle_gap(1)
            .with_process(Process::new("P1", 0, 3))
            .with_process(Process::new("P2", 2, 5));

        assert_eq!(cfg.cpu_quantum, 4);
        assert_eq!(cfg.total_frames, 64);
        assert_eq!(cfg.page_size, 4096);
        assert_eq!(cfg.cpu_idle_gap, 1);
        assert_eq!(cfg.processes.len(), 2);
        assert_eq!(cfg.total_burst(), 8);
        assert_eq!(cfg.process("P2").map(|p| p.arrival_time), Some(2));
        assert!(cfg.process("P9").is_none());
    }

    #[test]
    fn test_idle_gap_defaults_to_zero() {
        let json = r#"{
            "total_frames": 100,
            "page_size": 4,
            "cpu_quantum": 2,
            "memory_threshold": 0.0,
            "processes": []
        }"#;
        let cfg: SystemConfig = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.cpu_idle_gap, 0);
        assert!(cfg.processes.is_empty());
    }
}
