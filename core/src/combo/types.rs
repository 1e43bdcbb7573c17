use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::errors::AggregateCaptureError;
use crate::tool::{CaptureOptions, ToolKind};

/// Where artifacts of one combo land.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputSpec {
    pub root: PathBuf,
    /// Put every artifact in its own `{tool}_{timestamp}/` folder.
    pub create_subfolder: bool,
}

impl OutputSpec {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            create_subfolder: false,
        }
    }
}

/// One combo capture: a device, a duration and the tools to run against it.
#[derive(Debug, Clone)]
pub struct CaptureRequest {
    pub device: String,
    pub duration: Duration,
    pub enabled: BTreeSet<ToolKind>,
    pub options: CaptureOptions,
    pub output: OutputSpec,
}

impl CaptureRequest {
    pub fn new(device: impl Into<String>, duration_secs: u64, output: OutputSpec) -> Self {
        Self {
            device: device.into(),
            duration: Duration::from_secs(duration_secs),
            enabled: BTreeSet::new(),
            options: CaptureOptions::default(),
            output,
        }
    }

    pub fn enable(mut self, kind: ToolKind) -> Self {
        self.enabled.insert(kind);
        self
    }

    pub fn enable_all(mut self, kinds: impl IntoIterator<Item = ToolKind>) -> Self {
        self.enabled.extend(kinds);
        self
    }

    pub fn with_options(mut self, options: CaptureOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.options.target_app = Some(target.into());
        self
    }
}

/// Lifecycle of a one-shot tool's task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    Pending,
    Running,
    Succeeded,
    Failed,
}

/// Result of a combo capture. Partial success and an error can co-occur.
#[derive(Debug)]
pub struct ComboOutcome {
    results: BTreeMap<ToolKind, PathBuf>,
    error: Option<AggregateCaptureError>,
}

impl ComboOutcome {
    pub(crate) fn new(
        results: BTreeMap<ToolKind, PathBuf>,
        error: Option<AggregateCaptureError>,
    ) -> Self {
        Self { results, error }
    }

    /// Artifact paths of the tools that succeeded.
    pub fn results(&self) -> &BTreeMap<ToolKind, PathBuf> {
        &self.results
    }

    pub fn artifact(&self, kind: ToolKind) -> Option<&Path> {
        self.results.get(&kind).map(PathBuf::as_path)
    }

    pub fn error(&self) -> Option<&AggregateCaptureError> {
        self.error.as_ref()
    }

    pub fn is_complete_success(&self) -> bool {
        self.error.is_none()
    }

    pub fn is_total_failure(&self) -> bool {
        self.results.is_empty() && self.error.is_some()
    }

    /// Caller-facing pair: tool name to artifact path, plus the aggregate error.
    pub fn into_parts(self) -> (BTreeMap<String, PathBuf>, Option<AggregateCaptureError>) {
        let map = self
            .results
            .into_iter()
            .map(|(kind, path)| (kind.as_str().to_string(), path))
            .collect();
        (map, self.error)
    }
}
