use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use trace_combo_core::api::{
    CaptureOptions, DeviceTransport, FailureReason, SessionHandle, StartStopCapture, ToolFailure,
    ToolKind,
};

use super::remote_tmp;

/// Java method tracing through `am profile start` / `am profile stop`.
pub struct MethodTraceCapture {
    transport: Arc<dyn DeviceTransport>,
}

impl MethodTraceCapture {
    pub fn new(transport: Arc<dyn DeviceTransport>) -> Self {
        Self { transport }
    }
}

fn fail(e: impl Into<FailureReason>) -> ToolFailure {
    ToolFailure::new(ToolKind::MethodTracer, e)
}

#[async_trait]
impl StartStopCapture for MethodTraceCapture {
    fn kind(&self) -> ToolKind {
        ToolKind::MethodTracer
    }

    async fn start(
        &self,
        device: &str,
        target: &str,
        options: &CaptureOptions,
    ) -> Result<SessionHandle, ToolFailure> {
        let remote = remote_tmp(&format!("{target}.trace"));
        let mut argv: Vec<String> = ["am", "profile", "start"].map(String::from).to_vec();
        if options.method_tracer.sampling {
            argv.push("--sampling".to_string());
            argv.push(options.method_tracer.sampling_interval_us.to_string());
        }
        argv.push(target.to_string());
        argv.push(remote.clone());

        self.transport
            .shell_checked(device, &argv)
            .await
            .map_err(fail)?;
        Ok(SessionHandle::new(device, target, remote))
    }

    async fn stop(
        &self,
        session: SessionHandle,
        output: &Path,
        options: &CaptureOptions,
    ) -> Result<PathBuf, ToolFailure> {
        let argv: Vec<String> = vec![
            "am".into(),
            "profile".into(),
            "stop".into(),
            session.target.clone(),
        ];
        self.transport
            .shell_checked(&session.device, &argv)
            .await
            .map_err(fail)?;

        // the runtime writes the file asynchronously after stop
        let flush = options.method_tracer.flush_delay_ms;
        if flush > 0 {
            tokio::time::sleep(Duration::from_millis(flush)).await;
        }

        self.transport
            .pull(&session.device, &session.remote_path, output)
            .await
            .map_err(fail)?;
        self.transport
            .remove(&session.device, &session.remote_path)
            .await;

        tracing::debug!(
            target: "trace_combo.tool",
            tool = %ToolKind::MethodTracer,
            window_ms = (chrono::Local::now() - session.created_at).num_milliseconds(),
            "method trace retrieved"
        );
        Ok(output.to_path_buf())
    }
}
