use std::path::PathBuf;
use std::sync::Arc;

use futures::stream::FuturesUnordered;
use futures::StreamExt;
use tracing::Instrument;
use uuid::Uuid;

use super::aggregate::ResultCollector;
use super::task::{TaskContext, ToolTask};
use super::validate::validate_request;
use super::{CaptureRequest, ComboOutcome};
use crate::errors::{FailureReason, ToolFailure, ValidationError};
use crate::output::{CaptureTimestamp, OutputAllocator};
use crate::tool::{
    CaptureOptions, OneShotCapture, SessionHandle, StartStopCapture, ToolAdapter, ToolKind,
    ToolSet,
};

/// A start/stop tool whose window is open.
struct OpenSession {
    kind: ToolKind,
    tool: Arc<dyn StartStopCapture>,
    session: SessionHandle,
    output: PathBuf,
}

/// Runs several capture backends against one device over one time window.
///
/// Start/stop tools are opened on the calling task before any one-shot worker is
/// spawned and closed after every worker has finished, so their window is exactly
/// the span of the parallel phase. One tool's failure never stops another.
#[derive(Debug, Clone)]
pub struct ComboOrchestrator {
    tools: ToolSet,
}

impl ComboOrchestrator {
    pub fn new(tools: ToolSet) -> Self {
        Self { tools }
    }

    pub fn tools(&self) -> &ToolSet {
        &self.tools
    }

    /// Fails only on request-level validation, before any subprocess runs. Tool
    /// failures are reported through [`ComboOutcome::error`] next to the partial results.
    pub async fn run_combo(
        &self,
        request: CaptureRequest,
    ) -> Result<ComboOutcome, ValidationError> {
        validate_request(&request)?;

        let run_id = Uuid::new_v4();
        let span = tracing::info_span!(
            target: "trace_combo.combo",
            "combo",
            %run_id,
            device = %request.device,
        );
        Ok(self.run_validated(request).instrument(span).await)
    }

    async fn run_validated(&self, request: CaptureRequest) -> ComboOutcome {
        let CaptureRequest {
            device,
            duration,
            enabled,
            options,
            output,
        } = request;

        let timestamp = CaptureTimestamp::now();
        let allocator = OutputAllocator::new(output.root, timestamp);
        let options = Arc::new(options);
        let mut collector = ResultCollector::new();

        tracing::info!(
            target: "trace_combo.combo",
            duration_secs = duration.as_secs(),
            tools = ?enabled,
            timestamp = %timestamp,
            "combo capture starting"
        );

        let mut one_shot: Vec<(ToolKind, Arc<dyn OneShotCapture>)> = Vec::new();
        let mut start_stop: Vec<(ToolKind, Arc<dyn StartStopCapture>)> = Vec::new();
        for kind in enabled {
            match self.tools.get(kind) {
                Some(ToolAdapter::OneShot(tool)) => one_shot.push((kind, Arc::clone(tool))),
                Some(ToolAdapter::StartStop(tool)) => start_stop.push((kind, Arc::clone(tool))),
                None => collector.fail(ToolFailure::new(kind, FailureReason::NotConfigured)),
            }
        }

        let sessions = start_sessions(
            &device,
            &options,
            &allocator,
            output.create_subfolder,
            start_stop,
            &mut collector,
        )
        .await;

        let ctx = TaskContext {
            device,
            duration,
            options: Arc::clone(&options),
            allocator,
            create_subfolder: output.create_subfolder,
        };
        run_parallel_phase(&ctx, one_shot, &mut collector).await;

        stop_sessions(sessions, &options, &mut collector).await;

        let outcome = collector.finish();
        match outcome.error() {
            None => tracing::info!(
                target: "trace_combo.combo",
                succeeded = outcome.results().len(),
                "combo capture finished"
            ),
            Some(err) => tracing::warn!(
                target: "trace_combo.combo",
                succeeded = outcome.results().len(),
                failed = err.failures().len(),
                "combo capture finished with failures"
            ),
        }
        outcome
    }
}

async fn start_sessions(
    device: &str,
    options: &CaptureOptions,
    allocator: &OutputAllocator,
    create_subfolder: bool,
    tools: Vec<(ToolKind, Arc<dyn StartStopCapture>)>,
    collector: &mut ResultCollector,
) -> Vec<OpenSession> {
    let mut sessions = Vec::with_capacity(tools.len());
    for (kind, tool) in tools {
        let Some(target) = options.target() else {
            collector.fail(ToolFailure::new(kind, FailureReason::MissingTarget));
            continue;
        };

        // resolved before the window opens so a storage problem never leaves it open
        let output = match allocator.allocate_for(kind, create_subfolder).await {
            Ok(path) => path,
            Err(e) => {
                collector.fail(ToolFailure::new(kind, e));
                continue;
            }
        };

        match tool.start(device, target, options).await {
            Ok(session) => {
                tracing::info!(
                    target: "trace_combo.tool",
                    tool = %kind,
                    app = target,
                    "window opened"
                );
                sessions.push(OpenSession {
                    kind,
                    tool,
                    session,
                    output,
                });
            }
            Err(failure) => {
                tracing::warn!(
                    target: "trace_combo.tool",
                    tool = %kind,
                    error = %failure.reason,
                    "start failed"
                );
                collector.fail(failure);
            }
        }
    }
    sessions
}

async fn run_parallel_phase(
    ctx: &TaskContext,
    tools: Vec<(ToolKind, Arc<dyn OneShotCapture>)>,
    collector: &mut ResultCollector,
) {
    let mut workers = FuturesUnordered::new();
    for (kind, tool) in tools {
        let ctx = ctx.clone();
        let handle = tokio::spawn(async move {
            let mut task = ToolTask::new(kind, tool);
            task.execute(&ctx).await
        });
        workers.push(async move { (kind, handle.await) });
    }

    // join barrier: drain every worker, failures included
    while let Some((kind, joined)) = workers.next().await {
        let outcome: Result<PathBuf, ToolFailure> = match joined {
            Ok(outcome) => outcome,
            Err(e) => Err(ToolFailure::new(kind, FailureReason::Panicked(e.to_string()))),
        };
        collector.record(kind, outcome);
    }
}

async fn stop_sessions(
    sessions: Vec<OpenSession>,
    options: &CaptureOptions,
    collector: &mut ResultCollector,
) {
    for OpenSession {
        kind,
        tool,
        session,
        output,
    } in sessions
    {
        let outcome = tool.stop(session, &output, options).await;
        if let Err(failure) = &outcome {
            tracing::warn!(
                target: "trace_combo.tool",
                tool = %kind,
                error = %failure.reason,
                "stop failed"
            );
        }
        collector.record(kind, outcome);
    }
}
