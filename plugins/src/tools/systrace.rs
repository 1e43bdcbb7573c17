use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use trace_combo_core::api::{
    CaptureOptions, CommandError, CommandRunner, CommandSpec, DeviceTransport, OneShotCapture,
    ToolFailure, ToolKind,
};

use super::require_script;

const AVAILABLE_EVENTS: &str = "/sys/kernel/tracing/available_events";

/// atrace/ftrace capture through the `run_systrace.py` helper. The helper talks to
/// the device itself and writes the HTML report straight to the output path.
pub struct SystraceCapture {
    runner: Arc<dyn CommandRunner>,
    python: String,
    script: PathBuf,
}

impl SystraceCapture {
    pub fn new(
        runner: Arc<dyn CommandRunner>,
        python: impl Into<String>,
        script: PathBuf,
    ) -> Self {
        Self {
            runner,
            python: python.into(),
            script,
        }
    }

    fn script_command(&self) -> CommandSpec {
        CommandSpec::new(&self.python).path_arg(&self.script)
    }

    fn command(
        &self,
        device: &str,
        output: &Path,
        duration: Duration,
        options: &CaptureOptions,
    ) -> CommandSpec {
        let opts = &options.trace_events;
        let mut spec = self
            .script_command()
            .arg("-o")
            .path_arg(output)
            .args(["-t".to_string(), duration.as_secs().to_string()])
            .args(["-e", device]);
        if opts.buffer_kb > 0 {
            spec = spec.args(["-b".to_string(), opts.buffer_kb.to_string()]);
        }
        if let Some(app) = options.target() {
            spec = spec.args(["-a", app]);
        }
        spec.args(opts.categories.iter().cloned())
    }

    /// atrace categories the device supports, as reported by `run_systrace.py -l`.
    pub async fn list_categories(&self, device: &str) -> Result<Vec<String>, ToolFailure> {
        require_script(ToolKind::TraceEvents, &self.script).await?;

        let spec = self.script_command().args(["-l", "-e", device]);
        let out = self
            .runner
            .run_checked(&spec)
            .await
            .map_err(|e| ToolFailure::new(ToolKind::TraceEvents, e))?;
        Ok(parse_category_list(&out.stdout))
    }
}

/// Parses `run_systrace.py -l` output, one `name - description` entry per line.
///
/// ```text
///          gfx - Graphics
///        input - Input
/// ```
pub fn parse_category_list(output: &str) -> Vec<String> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| {
            !line.is_empty() && !line.starts_with("Category") && !line.starts_with("--")
        })
        .filter_map(|line| line.split_whitespace().next())
        .map(str::to_string)
        .collect()
}

/// Kernel trace events (`subsystem:event`) available on the device.
pub async fn list_ftrace_events(
    transport: &dyn DeviceTransport,
    device: &str,
) -> Result<Vec<String>, CommandError> {
    let argv = vec!["cat".to_string(), AVAILABLE_EVENTS.to_string()];
    let out = transport.shell_checked(device, &argv).await?;
    Ok(out
        .stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

#[async_trait]
impl OneShotCapture for SystraceCapture {
    fn kind(&self) -> ToolKind {
        ToolKind::TraceEvents
    }

    async fn run(
        &self,
        device: &str,
        output: &Path,
        duration: Duration,
        options: &CaptureOptions,
    ) -> Result<PathBuf, ToolFailure> {
        require_script(ToolKind::TraceEvents, &self.script).await?;

        let spec = self.command(device, output, duration, options);
        self.runner
            .run_checked(&spec)
            .await
            .map_err(|e| ToolFailure::new(ToolKind::TraceEvents, e))?;
        Ok(output.to_path_buf())
    }
}
