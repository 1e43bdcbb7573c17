use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use trace_combo_core::api::{
    CaptureOptions, CommandError, DeviceTransport, OneShotCapture, ToolFailure, ToolKind,
};

use super::remote_tmp;

/// System-wide trace recorded by the on-device `perfetto` daemon.
pub struct PerfettoCapture {
    transport: Arc<dyn DeviceTransport>,
}

impl PerfettoCapture {
    pub fn new(transport: Arc<dyn DeviceTransport>) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl OneShotCapture for PerfettoCapture {
    fn kind(&self) -> ToolKind {
        ToolKind::SystemTrace
    }

    async fn run(
        &self,
        device: &str,
        output: &Path,
        duration: Duration,
        options: &CaptureOptions,
    ) -> Result<PathBuf, ToolFailure> {
        let fail = |e: CommandError| ToolFailure::new(ToolKind::SystemTrace, e);
        let opts = &options.system_trace;
        let remote = remote_tmp(&format!(
            "trace_{}.perfetto-trace",
            chrono::Utc::now().timestamp()
        ));

        let mut argv = vec![
            "perfetto".to_string(),
            "-o".to_string(),
            remote.clone(),
            "-t".to_string(),
            format!("{}s", duration.as_secs()),
            "-b".to_string(),
            format!("{}kb", opts.buffer_kb),
        ];
        argv.extend(opts.categories.iter().cloned());

        // blocks on the device for the whole duration
        self.transport
            .shell_checked(device, &argv)
            .await
            .map_err(fail)?;
        self.transport
            .pull(device, &remote, output)
            .await
            .map_err(fail)?;
        self.transport.remove(device, &remote).await;

        Ok(output.to_path_buf())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingRunner;
    use crate::transport::AdbTransport;
    use trace_combo_core::api::FailureReason;

    fn capture(runner: &Arc<RecordingRunner>) -> PerfettoCapture {
        PerfettoCapture::new(Arc::new(AdbTransport::with_runner("adb", runner.clone())))
    }

    #[tokio::test]
    async fn records_pulls_then_cleans_up() {
        let runner = Arc::new(RecordingRunner::new());
        let mut options = CaptureOptions::default();
        options.system_trace.categories = vec!["sched".into(), "gfx".into()];
        options.system_trace.buffer_kb = 1024;

        let out = capture(&runner)
            .run(
                "D1",
                Path::new("/out/t.perfetto-trace"),
                Duration::from_secs(10),
                &options,
            )
            .await
            .unwrap();
        assert_eq!(out, PathBuf::from("/out/t.perfetto-trace"));

        let cmds = runner.commands();
        assert_eq!(cmds.len(), 3);
        assert!(cmds[0].starts_with("adb -s D1 shell perfetto -o /data/local/tmp/trace_"));
        assert!(cmds[0].ends_with("-t 10s -b 1024kb sched gfx"), "{}", cmds[0]);
        assert!(cmds[1].starts_with("adb -s D1 pull /data/local/tmp/trace_"));
        assert!(cmds[1].ends_with(" /out/t.perfetto-trace"));
        assert!(cmds[2].starts_with("adb -s D1 shell rm -f /data/local/tmp/trace_"));
    }

    #[tokio::test]
    async fn cleanup_failure_does_not_fail_the_capture() {
        let runner =
            Arc::new(RecordingRunner::new().fail_when("shell rm", 1, "rm: Permission denied"));
        let result = capture(&runner)
            .run(
                "D1",
                Path::new("/out/t"),
                Duration::from_secs(1),
                &CaptureOptions::default(),
            )
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn device_side_failure_carries_stderr_and_skips_pull() {
        let runner = Arc::new(RecordingRunner::new().fail_when(
            "perfetto",
            1,
            "perfetto: unknown category",
        ));
        let failure = capture(&runner)
            .run(
                "D1",
                Path::new("/out/t"),
                Duration::from_secs(1),
                &CaptureOptions::default(),
            )
            .await
            .unwrap_err();

        assert_eq!(failure.tool, ToolKind::SystemTrace);
        assert!(matches!(failure.reason, FailureReason::Command(_)));
        assert!(failure.message().contains("perfetto: unknown category"));
        assert_eq!(runner.commands().len(), 1);
    }
}
