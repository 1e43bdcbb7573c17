use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

/// Lifecycle shape of a capture backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureShape {
    /// start, wait, retrieve and cleanup in one blocking call
    OneShot,
    /// measurement window bounded by separate start and stop calls
    StartStop,
}

/// The closed set of supported capture backends.
///
/// Declaration order is the reporting order for results and failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ToolKind {
    TraceEvents,
    SystemTrace,
    SamplingProfiler,
    MethodTracer,
}

impl ToolKind {
    pub const ALL: [ToolKind; 4] = [
        ToolKind::TraceEvents,
        ToolKind::SystemTrace,
        ToolKind::SamplingProfiler,
        ToolKind::MethodTracer,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ToolKind::TraceEvents => "trace-events",
            ToolKind::SystemTrace => "system-trace",
            ToolKind::SamplingProfiler => "sampling-profiler",
            ToolKind::MethodTracer => "method-tracer",
        }
    }

    pub fn shape(self) -> CaptureShape {
        match self {
            ToolKind::MethodTracer => CaptureShape::StartStop,
            _ => CaptureShape::OneShot,
        }
    }

    pub fn is_one_shot(self) -> bool {
        self.shape() == CaptureShape::OneShot
    }

    /// Extension of the primary artifact.
    pub fn extension(self) -> &'static str {
        match self {
            ToolKind::TraceEvents => "html",
            ToolKind::SystemTrace => "perfetto-trace",
            ToolKind::SamplingProfiler => "data",
            ToolKind::MethodTracer => "trace",
        }
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ToolKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        ToolKind::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| ValidationError::UnknownTool(needle.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip_through_from_str() {
        for kind in ToolKind::ALL {
            assert_eq!(kind.as_str().parse::<ToolKind>().unwrap(), kind);
        }
    }

    #[test]
    fn unknown_name_is_a_validation_error() {
        assert_eq!(
            "flamegraph".parse::<ToolKind>(),
            Err(ValidationError::UnknownTool("flamegraph".into()))
        );
    }

    #[test]
    fn only_method_tracer_spans_start_and_stop() {
        let one_shot: Vec<_> = ToolKind::ALL
            .into_iter()
            .filter(|k| k.is_one_shot())
            .collect();
        assert_eq!(
            one_shot,
            vec![
                ToolKind::TraceEvents,
                ToolKind::SystemTrace,
                ToolKind::SamplingProfiler
            ]
        );
        assert_eq!(ToolKind::MethodTracer.shape(), CaptureShape::StartStop);
    }
}
