//! Input validation for simulation configs.
//!
//! The dispatchers assume well-formed input. These checks run before
//! them and report every problem at once. Detects:
//! - Duplicate or empty pids
//! - Quantum or page size below 1
//! - Negative counts and times
//! - Negative or non-finite memory threshold

use crate::models::SystemConfig;
use std::collections::HashSet;
use std::fmt;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two processes share the same pid.
    DuplicateId,
    /// A process has an empty pid.
    EmptyPid,
    /// `cpu_quantum` is below 1.
    InvalidQuantum,
    /// `page_size` is below 1.
    InvalidPageSize,
    /// A count or time that must be non-negative is negative.
    NegativeValue,
    /// `memory_threshold` is negative, NaN, or infinite.
    InvalidThreshold,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Validates a simulation config.
///
/// Checks:
/// 1. `cpu_quantum >= 1` and `page_size >= 1`
/// 2. `total_frames` and `cpu_idle_gap` non-negative
/// 3. `memory_threshold` finite and non-negative
/// 4. Every pid non-empty and unique
/// 5. Every `arrival_time`, `burst_time`, `pages_count` non-negative
///
/// A zero `burst_time` passes: such a process completes without running.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_config(config: &SystemConfig) -> ValidationResult {
    let mut errors = Vec::new();

    if config.cpu_quantum < 1 {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidQuantum,
            format!("cpu_quantum must be >= 1, got {}", config.cpu_quantum),
        ));
    }
    if config.page_size < 1 {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidPageSize,
            format!("page_size must be >= 1, got {}", config.page_size),
        ));
    }
    for (field, value) in [
        ("total_frames", config.total_frames),
        ("cpu_idle_gap", config.cpu_idle_gap),
    ] {
        if value < 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NegativeValue,
                format!("{field} must be >= 0, got {value}"),
            ));
        }
    }
    if !config.memory_threshold.is_finite() || config.memory_threshold < 0.0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidThreshold,
            format!(
                "memory_threshold must be finite and >= 0, got {}",
                config.memory_threshold
            ),
        ));
    }

    let mut pids = HashSet::new();
    for process in &config.processes {
        if process.pid.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyPid,
                "Process with empty pid",
            ));
        } else if !pids.insert(process.pid.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate pid: {}", process.pid),
            ));
        }

        for (field, value) in [
            ("arrival_time", process.arrival_time),
            ("burst_time", process.burst_time),
            ("pages_count", process.pages_count),
        ] {
            if value < 0 {
                errors.push(ValidationError::new(
                    ValidationErrorKind::NegativeValue,
                    format!("Process '{}' {field} must be >= 0, got {value}", process.pid),
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
