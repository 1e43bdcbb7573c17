use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use trace_combo_core::api::{
    CaptureOptions, CommandRunner, CommandSpec, DeviceTransport, FailureReason, OneShotCapture,
    ToolFailure, ToolKind,
};

use super::{remote_tmp, require_script};

const APP_PROFILER: &str = "app_profiler.py";
const REPORT_HTML: &str = "report_html.py";

fn fail(e: impl Into<FailureReason>) -> ToolFailure {
    ToolFailure::new(ToolKind::SamplingProfiler, e)
}

/// CPU sampling with simpleperf.
///
/// With a target application the NDK `app_profiler.py` helper drives the recording;
/// without one, `simpleperf record -a` runs system-wide on the device and the samples
/// are pulled afterwards. An HTML report is rendered next to the samples when enabled.
pub struct SimpleperfCapture {
    runner: Arc<dyn CommandRunner>,
    transport: Arc<dyn DeviceTransport>,
    python: String,
    scripts_dir: PathBuf,
}

impl SimpleperfCapture {
    pub fn new(
        runner: Arc<dyn CommandRunner>,
        transport: Arc<dyn DeviceTransport>,
        python: impl Into<String>,
        scripts_dir: PathBuf,
    ) -> Self {
        Self {
            runner,
            transport,
            python: python.into(),
            scripts_dir,
        }
    }

    fn script(&self, name: &str) -> PathBuf {
        self.scripts_dir.join(name)
    }

    async fn profile_app(
        &self,
        device: &str,
        app: &str,
        output: &Path,
        duration: Duration,
        frequency: u32,
    ) -> Result<(), ToolFailure> {
        let mut spec = CommandSpec::new(&self.python)
            .path_arg(&self.script(APP_PROFILER))
            .args(["-p", app, "-o"])
            .path_arg(output)
            .args(["--serial", device, "-r"])
            .arg(format!("-f {frequency} --duration {}", duration.as_secs()));
        // app_profiler keeps its binary cache in the working directory
        if let Some(dir) = output.parent() {
            spec = spec.current_dir(dir);
        }
        self.runner.run_checked(&spec).await.map_err(fail)?;
        Ok(())
    }

    async fn profile_system(
        &self,
        device: &str,
        output: &Path,
        duration: Duration,
        frequency: u32,
    ) -> Result<(), ToolFailure> {
        let remote = remote_tmp("perf.data");
        let argv: Vec<String> = vec![
            "simpleperf".into(),
            "record".into(),
            "-f".into(),
            frequency.to_string(),
            "--duration".into(),
            duration.as_secs().to_string(),
            "-a".into(),
            "-o".into(),
            remote.clone(),
        ];
        self.transport
            .shell_checked(device, &argv)
            .await
            .map_err(fail)?;
        self.transport
            .pull(device, &remote, output)
            .await
            .map_err(fail)?;
        self.transport.remove(device, &remote).await;
        Ok(())
    }

    async fn render_report(&self, samples: &Path) -> Result<PathBuf, ToolFailure> {
        let report = samples.with_extension("html");
        let spec = CommandSpec::new(&self.python)
            .path_arg(&self.script(REPORT_HTML))
            .arg("-i")
            .path_arg(samples)
            .arg("-o")
            .path_arg(&report);
        self.runner.run_checked(&spec).await.map_err(fail)?;
        Ok(report)
    }
}

#[async_trait]
impl OneShotCapture for SimpleperfCapture {
    fn kind(&self) -> ToolKind {
        ToolKind::SamplingProfiler
    }

    fn nests_output(&self, options: &CaptureOptions) -> bool {
        options.sampling_profiler.generate_report
    }

    async fn run(
        &self,
        device: &str,
        output: &Path,
        duration: Duration,
        options: &CaptureOptions,
    ) -> Result<PathBuf, ToolFailure> {
        let opts = &options.sampling_profiler;
        let app = options.target();

        // check helpers up front so a missing script never wastes a capture window
        if app.is_some() {
            require_script(ToolKind::SamplingProfiler, &self.script(APP_PROFILER)).await?;
        }
        if opts.generate_report {
            require_script(ToolKind::SamplingProfiler, &self.script(REPORT_HTML)).await?;
        }

        match app {
            Some(app) => {
                self.profile_app(device, app, output, duration, opts.frequency)
                    .await?
            }
            None => {
                self.profile_system(device, output, duration, opts.frequency)
                    .await?
            }
        }

        if opts.generate_report {
            return self.render_report(output).await;
        }
        Ok(output.to_path_buf())
    }
}
