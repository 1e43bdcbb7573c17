// core/src/errors/capture_error.rs
use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use super::command_error::CommandError;
use crate::tool::ToolKind;

#[derive(Debug, Error)]
pub enum FailureReason {
    #[error("target application required")]
    MissingTarget,

    #[error("helper script not found at {}", .0.display())]
    MissingScript(PathBuf),

    #[error(transparent)]
    Command(#[from] CommandError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("capture task panicked: {0}")]
    Panicked(String),

    #[error("no backend configured for this tool")]
    NotConfigured,
}

/// A single tool's failure. Never propagated to sibling tools.
#[derive(Debug, Error)]
#[error("{tool}: {reason}")]
pub struct ToolFailure {
    pub tool: ToolKind,
    #[source]
    pub reason: FailureReason,
}

impl ToolFailure {
    pub fn new(tool: ToolKind, reason: impl Into<FailureReason>) -> Self {
        Self {
            tool,
            reason: reason.into(),
        }
    }

    pub fn message(&self) -> String {
        self.reason.to_string()
    }
}

/// Every tool failure of one combo capture, reported after all partial work finished.
#[derive(Debug)]
pub struct AggregateCaptureError {
    failures: Vec<ToolFailure>,
}

impl AggregateCaptureError {
    /// Returns `None` when there is nothing to report.
    pub fn from_failures(mut failures: Vec<ToolFailure>) -> Option<Self> {
        if failures.is_empty() {
            return None;
        }
        failures.sort_by_key(|f| f.tool);
        Some(Self { failures })
    }

    pub fn failures(&self) -> &[ToolFailure] {
        &self.failures
    }

    pub fn failed_tools(&self) -> Vec<ToolKind> {
        self.failures.iter().map(|f| f.tool).collect()
    }

    pub fn failure_for(&self, tool: ToolKind) -> Option<&ToolFailure> {
        self.failures.iter().find(|f| f.tool == tool)
    }
}

impl fmt::Display for AggregateCaptureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("combo capture errors: ")?;
        for (idx, failure) in self.failures.iter().enumerate() {
            if idx > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{failure}")?;
        }
        Ok(())
    }
}

impl std::error::Error for AggregateCaptureError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_failure_set_is_not_an_error() {
        assert!(AggregateCaptureError::from_failures(Vec::new()).is_none());
    }

    #[test]
    fn display_lists_every_failed_tool_in_kind_order() {
        let err = AggregateCaptureError::from_failures(vec![
            ToolFailure::new(ToolKind::MethodTracer, FailureReason::MissingTarget),
            ToolFailure::new(
                ToolKind::SamplingProfiler,
                FailureReason::MissingScript(PathBuf::from("/opt/simpleperf/app_profiler.py")),
            ),
        ])
        .unwrap();

        assert_eq!(
            err.failed_tools(),
            vec![ToolKind::SamplingProfiler, ToolKind::MethodTracer]
        );
        assert_eq!(
            err.to_string(),
            "combo capture errors: sampling-profiler: helper script not found at \
             /opt/simpleperf/app_profiler.py; method-tracer: target application required"
        );
    }

    #[test]
    fn non_zero_exit_prefers_stderr_for_the_message() {
        let failure = ToolFailure::new(
            ToolKind::SystemTrace,
            CommandError::NonZeroExit {
                program: "adb".into(),
                code: 1,
                stdout: "partial output".into(),
                stderr: "error: device 'D1' not found\n".into(),
            },
        );
        assert_eq!(
            failure.message(),
            "adb exited with code 1: error: device 'D1' not found"
        );
    }
}
