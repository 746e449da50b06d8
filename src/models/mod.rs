//! Simulation domain models.
//!
//! Provides the immutable inputs of a run (`Process`, `SystemConfig`)
//! and the timeline types a dispatcher produces.
//!
//! # Domain Mappings
//!
//! | u-cpusim | OS scheduling | Batch queue |
//! |----------|---------------|-------------|
//! | Process | Task/Thread | Job |
//! | SystemConfig | Machine + run queue | Cluster + queue |
//! | Timeline | Gantt chart | Execution log |

mod config;
mod process;
mod timeline;

pub use config::SystemConfig;
pub use process::Process;
pub use timeline::{MemorySegment, Timeline, TimelineSegment, TraceEntry, TraceEvent};
