//! Execution timeline model.
//!
//! A timeline is the ordered list of segments a dispatcher produced:
//! which process (or nothing) held the CPU over each half-open interval.
//!
//! # Invariant
//! Segments are non-overlapping, in non-decreasing start order, and
//! partition `[0, total_time)` exactly. Zero-length segments are never
//! stored.

use serde::{Deserialize, Serialize};

/// A contiguous run of one process (or IDLE) over `[start, end)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineSegment {
    /// Running process, or `None` when the CPU is idle.
    pub pid: Option<String>,
    /// First tick (inclusive).
    pub start: i64,
    /// Last tick (exclusive).
    pub end: i64,
}

/// What happened on a single tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TraceEvent {
    /// A process held the CPU.
    Running,
    /// No process held the CPU.
    Idle,
}

/// One tick of the expanded timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceEntry {
    /// Tick.
    pub time: i64,
    /// Tick event.
    pub event: TraceEvent,
    /// Running process (`None` when idle).
    pub pid: Option<String>,
}

/// A process bar for UI timelines (IDLE filtered out).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemorySegment {
    pub pid: String,
    pub start: i64,
    pub end: i64,
}

/// Ordered execution segments of one simulation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeline {
    /// Segments in start order.
    pub segments: Vec<TimelineSegment>,
}

impl TimelineSegment {
    /// Creates a process segment.
    pub fn process(pid: impl Into<String>, start: i64, end: i64) -> Self {
        Self {
            pid: Some(pid.into()),
            start,
            end,
        }
    }

    /// Creates an IDLE segment.
    pub fn idle(start: i64, end: i64) -> Self {
        Self {
            pid: None,
            start,
            end,
        }
    }

    /// Whether this segment is IDLE.
    #[inline]
    pub fn is_idle(&self) -> bool {
        self.pid.is_none()
    }

    /// Length in ticks.
    #[inline]
    pub fn duration(&self) -> i64 {
        self.end - self.start
    }
}

impl TraceEntry {
    /// A running tick.
    pub fn running(time: i64, pid: impl Into<String>) -> Self {
        Self {
            time,
            event: TraceEvent::Running,
            pid: Some(pid.into()),
        }
    }

    /// An idle tick.
    pub fn idle(time: i64) -> Self {
        Self {
            time,
            event: TraceEvent::Idle,
            pid: None,
        }
    }
}

impl Timeline {
    /// Creates an empty timeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a segment. Empty segments are dropped.
    pub fn push(&mut self, segment: TimelineSegment) {
        if segment.duration() > 0 {
            self.segments.push(segment);
        }
    }

    /// Appends a process segment `[start, end)`.
    pub fn push_process(&mut self, pid: &str, start: i64, end: i64) {
        self.push(TimelineSegment::process(pid, start, end));
    }

    /// Appends an IDLE segment `[start, end)`.
    pub fn push_idle(&mut self, start: i64, end: i64) {
        self.push(TimelineSegment::idle(start, end));
    }

    /// Rebuilds a timeline from a per-tick trace.
    ///
    /// Consecutive ticks with the same pid (or consecutive idle ticks)
    /// collapse into one segment, so back-to-back slices of the same
    /// process come back merged.
    pub fn from_trace(trace: &[TraceEntry]) -> Self {
        let mut timeline = Self::new();
        let mut current: Option<TimelineSegment> = None;

        for entry in trace {
            let pid = match entry.event {
                TraceEvent::Running => entry.pid.clone(),
                TraceEvent::Idle => None,
            };
            if let Some(seg) = current.as_mut() {
                if seg.pid == pid && seg.end == entry.time {
                    seg.end += 1;
                    continue;
                }
            }
            if let Some(seg) = current.take() {
                timeline.push(seg);
            }
            current = Some(TimelineSegment {
                pid,
                start: entry.time,
                end: entry.time + 1,
            });
        }
        if let Some(seg) = current {
            timeline.push(seg);
        }

        timeline
    }

    /// End of the last segment, or 0 for an empty timeline.
    pub fn total_time(&self) -> i64 {
        self.segments.last().map(|s| s.end).unwrap_or(0)
    }

    /// Ticks spent running any process.
    pub fn busy_ticks(&self) -> i64 {
        self.segments
            .iter()
            .filter(|s| !s.is_idle())
            .map(|s| s.duration())
            .sum()
    }

    /// Ticks spent idle.
    pub fn idle_ticks(&self) -> i64 {
        self.total_time() - self.busy_ticks()
    }

    /// Returns all segments of a given process.
    pub fn segments_for(&self, pid: &str) -> Vec<&TimelineSegment> {
        self.segments
            .iter()
            .filter(|s| s.pid.as_deref() == Some(pid))
            .collect()
    }

    /// End tick of a process's last segment.
    pub fn completion_time(&self, pid: &str) -> Option<i64> {
        self.segments
            .iter()
            .rev()
            .find(|s| s.pid.as_deref() == Some(pid))
            .map(|s| s.end)
    }

    /// Number of adjacent process segments with differing pids.
    ///
    /// An IDLE segment between two processes breaks adjacency, so
    /// `P1 → IDLE → P2` counts zero switches.
    pub fn context_switches(&self) -> usize {
        self.segments
            .windows(2)
            .filter(|pair| match (&pair[0].pid, &pair[1].pid) {
                (Some(a), Some(b)) => a != b,
                _ => false,
            })
            .count()
    }

    /// Whether segments exactly partition `[0, total_time)`.
    pub fn is_partition(&self) -> bool {
        let mut expected_start = 0;
        for seg in &self.segments {
            if seg.start != expected_start || seg.end <= seg.start {
                return false;
            }
            expected_start = seg.end;
        }
        true
    }

    /// Expands segments into one entry per tick.
    pub fn trace(&self) -> Vec<TraceEntry> {
        let mut trace = Vec::with_capacity(self.total_time().max(0) as usize);
        for seg in &self.segments {
            for t in seg.start..seg.end {
                trace.push(match &seg.pid {
                    Some(pid) => TraceEntry::running(t, pid.as_str()),
                    None => TraceEntry::idle(t),
                });
            }
        }
        trace
    }

    /// Process segments only, for per-process UI bars.
    pub fn memory_timeline(&self) -> Vec<MemorySegment> {
        self.segments
            .iter()
            .filter_map(|s| {
                s.pid.as_ref().map(|pid| MemorySegment {
                    pid: pid.clone(),
                    start: s.start,
                    end: s.end,
                })
            })
            .collect()
    }

    /// Number of stored segments.
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }
}
