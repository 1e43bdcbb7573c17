use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use super::TaskStatus;
use crate::errors::ToolFailure;
use crate::output::OutputAllocator;
use crate::tool::{CaptureOptions, OneShotCapture, ToolKind};

/// Inputs shared read-only by every task of one combo.
#[derive(Clone)]
pub(crate) struct TaskContext {
    pub device: String,
    pub duration: Duration,
    pub options: Arc<CaptureOptions>,
    pub allocator: OutputAllocator,
    pub create_subfolder: bool,
}

/// One enabled one-shot tool, owned exclusively by the worker that runs it.
pub(crate) struct ToolTask {
    kind: ToolKind,
    tool: Arc<dyn OneShotCapture>,
    status: TaskStatus,
}

impl ToolTask {
    pub fn new(kind: ToolKind, tool: Arc<dyn OneShotCapture>) -> Self {
        Self {
            kind,
            tool,
            status: TaskStatus::Pending,
        }
    }

    #[cfg(test)]
    pub fn status(&self) -> TaskStatus {
        self.status
    }

    pub async fn execute(&mut self, ctx: &TaskContext) -> Result<PathBuf, ToolFailure> {
        self.status = TaskStatus::Running;
        let started = Instant::now();

        let outcome = self.capture(ctx).await;
        self.status = if outcome.is_ok() {
            TaskStatus::Succeeded
        } else {
            TaskStatus::Failed
        };

        match &outcome {
            Ok(path) => tracing::info!(
                target: "trace_combo.tool",
                tool = %self.kind,
                status = ?self.status,
                elapsed_ms = started.elapsed().as_millis() as u64,
                path = %path.display(),
                "capture finished"
            ),
            Err(failure) => tracing::warn!(
                target: "trace_combo.tool",
                tool = %self.kind,
                status = ?self.status,
                elapsed_ms = started.elapsed().as_millis() as u64,
                error = %failure.reason,
                "capture failed"
            ),
        }
        outcome
    }

    async fn capture(&self, ctx: &TaskContext) -> Result<PathBuf, ToolFailure> {
        let nest = ctx.create_subfolder || self.tool.nests_output(&ctx.options);
        tracing::debug!(
            target: "trace_combo.tool",
            tool = %self.kind,
            status = ?self.status,
            "task scheduled"
        );
        let output = ctx
            .allocator
            .allocate_for(self.kind, nest)
            .await
            .map_err(|e| ToolFailure::new(self.kind, e))?;

        tracing::debug!(
            target: "trace_combo.tool",
            tool = %self.kind,
            output = %output.display(),
            "capture starting"
        );
        self.tool
            .run(&ctx.device, &output, ctx.duration, &ctx.options)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::FailureReason;
    use crate::output::CaptureTimestamp;
    use async_trait::async_trait;
    use std::path::Path;

    struct Fixed(bool);

    #[async_trait]
    impl OneShotCapture for Fixed {
        fn kind(&self) -> ToolKind {
            ToolKind::SystemTrace
        }

        async fn run(
            &self,
            _device: &str,
            output: &Path,
            _duration: Duration,
            _options: &CaptureOptions,
        ) -> Result<PathBuf, ToolFailure> {
            if self.0 {
                Ok(output.to_path_buf())
            } else {
                Err(ToolFailure::new(self.kind(), FailureReason::NotConfigured))
            }
        }
    }

    fn ctx(root: &Path) -> TaskContext {
        TaskContext {
            device: "D1".into(),
            duration: Duration::from_secs(1),
            options: Arc::new(CaptureOptions::default()),
            allocator: OutputAllocator::new(root, CaptureTimestamp::now()),
            create_subfolder: false,
        }
    }

    #[tokio::test]
    async fn status_follows_outcome() {
        let tmp = tempfile::tempdir().unwrap();

        let mut ok = ToolTask::new(ToolKind::SystemTrace, Arc::new(Fixed(true)));
        assert_eq!(ok.status(), TaskStatus::Pending);
        let path = ok.execute(&ctx(tmp.path())).await.unwrap();
        assert_eq!(ok.status(), TaskStatus::Succeeded);
        assert!(path.starts_with(tmp.path()));

        let mut bad = ToolTask::new(ToolKind::SystemTrace, Arc::new(Fixed(false)));
        assert!(bad.execute(&ctx(tmp.path())).await.is_err());
        assert_eq!(bad.status(), TaskStatus::Failed);
    }
}
