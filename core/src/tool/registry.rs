use std::collections::BTreeMap;
use std::sync::Arc;

use super::{OneShotCapture, StartStopCapture, ToolAdapter, ToolKind};

/// Backends available to the orchestrator, at most one per [`ToolKind`].
#[derive(Debug, Clone, Default)]
pub struct ToolSet {
    adapters: BTreeMap<ToolKind, ToolAdapter>,
}

impl ToolSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a one-shot backend, replacing any previous one of the same kind.
    pub fn with_one_shot(mut self, tool: Arc<dyn OneShotCapture>) -> Self {
        self.insert(ToolAdapter::OneShot(tool));
        self
    }

    pub fn with_start_stop(mut self, tool: Arc<dyn StartStopCapture>) -> Self {
        self.insert(ToolAdapter::StartStop(tool));
        self
    }

    pub fn insert(&mut self, adapter: ToolAdapter) {
        let kind = adapter.kind();
        if self.adapters.insert(kind, adapter).is_some() {
            tracing::debug!(
                target: "trace_combo.tool",
                tool = %kind,
                "replaced registered backend"
            );
        }
    }

    pub fn get(&self, kind: ToolKind) -> Option<&ToolAdapter> {
        self.adapters.get(&kind)
    }

    pub fn kinds(&self) -> impl Iterator<Item = ToolKind> + '_ {
        self.adapters.keys().copied()
    }
}
