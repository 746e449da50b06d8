//! Scheduling policies, comparison, and KPI derivation.
//!
//! # Policies
//!
//! - **Baseline**: round-robin with a uniform `cpu_quantum`.
//! - **Memory-aware**: round-robin with quanta inflated by each process's
//!   share of total frames. Deterministic, so it compares tick-for-tick
//!   against the baseline.
//! - **Stochastic priority**: priority selection with seeded random page
//!   faults. Only runs when named explicitly with a seed.
//!
//! # KPI
//!
//! `SimulationResult` carries turnaround, waiting, utilization, context
//! switches, a per-tick trace, and a per-process timeline.
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5
//! - Arpaci-Dusseau (2018), "Operating Systems: Three Easy Pieces", Ch. 7-8

mod compare;
mod kpi;
mod policy;
mod stochastic;

pub use compare::{compare, try_compare, Comparison};
pub use kpi::SimulationResult;
pub use policy::{simulate, simulate_baseline, simulate_memory_aware, try_simulate, Policy};
pub use stochastic::{StochasticScheduler, FAULT_PROBABILITY, FAULT_WINDOW};
