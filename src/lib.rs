//! CPU scheduling simulator for the U-Engine ecosystem.
//!
//! Simulates how a single CPU allocates time slices to a fixed set of
//! processes and reports turnaround, waiting time, utilization, context
//! switches, and a per-tick execution trace.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Process`, `SystemConfig`, `Timeline`,
//!   `TimelineSegment`, `TraceEntry`
//! - **`dispatching`**: Round-robin engine, per-run state arena, quantum rules
//! - **`scheduler`**: Baseline / memory-aware / stochastic policies,
//!   `SimulationResult` KPIs, and side-by-side comparison
//! - **`validation`**: Input integrity checks (quantum, page size, pids, signs)
//!
//! # Example
//!
//! ```
//! use u_cpusim::models::{Process, SystemConfig};
//! use u_cpusim::{compare, simulate, Policy};
//!
//! let config = SystemConfig::new(2)
//!     .with_total_frames(100)
//!     .with_process(Process::new("P1", 0, 4).with_pages(50))
//!     .with_process(Process::new("P2", 0, 4));
//!
//! let baseline = simulate(Policy::Baseline, &config);
//! assert_eq!(baseline.total_time, 8);
//! assert_eq!(baseline.turnaround_times["P1"], 6);
//!
//! let both = compare(&config);
//! assert_eq!(both.memory_aware.inferred_quanta.unwrap()["P1"], 3);
//! ```
//!
//! # Logging
//!
//! Emits through the `log` facade (`debug` per policy run, `trace` per
//! dispatched slice). No logger is installed by this crate.
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5
//! - Arpaci-Dusseau (2018), "Operating Systems: Three Easy Pieces", Ch. 7-8

pub mod dispatching;
pub mod models;
pub mod scheduler;
pub mod validation;

pub use scheduler::{
    compare, simulate, try_compare, try_simulate, Comparison, Policy, SimulationResult,
};
