//! Built-in quantum rules.
//!
//! - **Uniform**: every process gets `cpu_quantum` (baseline round-robin).
//! - **Memory pressure**: the quantum grows with the process's share of
//!   total frames, up to 2× `cpu_quantum`.
//!
//! # Memory signal
//!
//! ```text
//! signal   = min(1, pages_count / max(1, total_frames))
//! estimate = trunc(8 + signal × (320 − 8))
//! quantum  = max(1, round_half_even(cpu_quantum × (1 + signal)))
//! ```
//!
//! A longer slice for memory-heavy processes trades fairness for fewer
//! context switches.

use super::QuantumRule;
use crate::models::{Process, SystemConfig};

/// Lower bound of the synthetic memory estimate.
pub const MEMORY_ESTIMATE_MIN: i64 = 8;
/// Upper bound of the synthetic memory estimate.
pub const MEMORY_ESTIMATE_MAX: i64 = 320;

/// Memory-pressure signal in `[0, 1]` for one process.
pub fn memory_signal(process: &Process, config: &SystemConfig) -> f64 {
    let pages = process.pages_count.max(0) as f64;
    let frames = config.total_frames.max(1) as f64;
    (pages / frames).min(1.0)
}

/// Synthetic memory estimate in `[8, 320]` units.
pub fn memory_estimate(process: &Process, config: &SystemConfig) -> i64 {
    let span = (MEMORY_ESTIMATE_MAX - MEMORY_ESTIMATE_MIN) as f64;
    (MEMORY_ESTIMATE_MIN as f64 + memory_signal(process, config) * span) as i64
}

// ======================== Rules ========================

/// Uniform quantum equal to `cpu_quantum`.
#[derive(Debug, Clone, Copy)]
pub struct Uniform;

impl QuantumRule for Uniform {
    fn name(&self) -> &'static str {
        "UNIFORM"
    }

    fn quantum(&self, _process: &Process, config: &SystemConfig) -> i64 {
        config.cpu_quantum.max(1)
    }

    fn description(&self) -> &'static str {
        "Uniform CPU quantum"
    }
}

/// Quantum inflated by memory pressure.
#[derive(Debug, Clone, Copy)]
pub struct MemoryPressure;

impl QuantumRule for MemoryPressure {
    fn name(&self) -> &'static str {
        "MEMORY_PRESSURE"
    }

    fn quantum(&self, process: &Process, config: &SystemConfig) -> i64 {
        let scaled = config.cpu_quantum as f64 * (1.0 + memory_signal(process, config));
        (scaled.round_ties_even() as i64).max(1)
    }

    fn description(&self) -> &'static str {
        "Memory-pressure inflated quantum"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_config(total_frames: i64, cpu_quantum: i64) -> SystemConfig {
        SystemConfig::new(cpu_quantum).with_total_frames(total_frames)
    }

    #[test]
    fn test_signal_half() {
        let cfg = make_config(100, 2);
        let p = Process::new("P1", 0, 5).with_pages(50);
        assert!((memory_signal(&p, &cfg) - 0.5).abs() < 1e-10);
        assert_eq!(memory_estimate(&p, &cfg), 164);
        assert_eq!(MemoryPressure.quantum(&p, &cfg), 3);
    }

    #[test]
    fn test_signal_saturates() {
        let cfg = make_config(10, 4);
        let p = Process::new("P1", 0, 5).with_pages(500);
        assert!((memory_signal(&p, &cfg) - 1.0).abs() < 1e-10);
        assert_eq!(memory_estimate(&p, &cfg), MEMORY_ESTIMATE_MAX);
        assert_eq!(MemoryPressure.quantum(&p, &cfg), 8);
    }

    #[test]
    fn test_zero_frames_uses_one() {
        let cfg = make_config(0, 2);
        let none = Process::new("P0", 0, 5);
        let one = Process::new("P1", 0, 5).with_pages(1);
        assert_eq!(memory_estimate(&none, &cfg), MEMORY_ESTIMATE_MIN);
        assert_eq!(MemoryPressure.quantum(&none, &cfg), 2);
        assert_eq!(MemoryPressure.quantum(&one, &cfg), 4);
    }

    #[test]
    fn test_half_rounds_to_even() {
        // 1 × 1.5 = 1.5 → 2, 5 × 1.5 = 7.5 → 8, 3 × 1.5 = 4.5 → 4
        let cfg = make_config(2, 1);
        let p = Process::new("P1", 0, 5).with_pages(1);
        assert_eq!(MemoryPressure.quantum(&p, &cfg), 2);
        assert_eq!(MemoryPressure.quantum(&p, &make_config(2, 5)), 8);
        assert_eq!(MemoryPressure.quantum(&p, &make_config(2, 3)), 4);
    }

    #[test]
    fn test_uniform_quanta() {
        let cfg = make_config(100, 3)
            .with_process(Process::new("A", 0, 1).with_pages(90))
            .with_process(Process::new("B", 0, 1));
        assert_eq!(Uniform.quanta(&cfg), vec![3, 3]);
        assert_eq!(MemoryPressure.quanta(&cfg), vec![6, 3]);
        assert_eq!(Uniform.name(), "UNIFORM");
    }
}
