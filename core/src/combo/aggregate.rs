use std::collections::BTreeMap;
use std::path::PathBuf;

use super::ComboOutcome;
use crate::errors::{AggregateCaptureError, ToolFailure};
use crate::tool::ToolKind;

/// Collects per-tool outcomes. Each tool is recorded at most once.
#[derive(Debug, Default)]
pub struct ResultCollector {
    results: BTreeMap<ToolKind, PathBuf>,
    failures: Vec<ToolFailure>,
}

impl ResultCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_recorded(&self, kind: ToolKind) -> bool {
        self.results.contains_key(&kind) || self.failures.iter().any(|f| f.tool == kind)
    }

    pub fn record(&mut self, kind: ToolKind, outcome: Result<PathBuf, ToolFailure>) {
        if self.is_recorded(kind) {
            tracing::warn!(
                target: "trace_combo.combo",
                tool = %kind,
                "outcome already recorded, ignoring"
            );
            return;
        }
        match outcome {
            Ok(path) => {
                self.results.insert(kind, path);
            }
            Err(failure) => self.failures.push(failure),
        }
    }

    pub fn fail(&mut self, failure: ToolFailure) {
        let kind = failure.tool;
        self.record(kind, Err(failure));
    }

    pub fn finish(self) -> ComboOutcome {
        ComboOutcome::new(
            self.results,
            AggregateCaptureError::from_failures(self.failures),
        )
    }
}
