use std::path::PathBuf;
use std::sync::Arc;

use trace_combo_core::api::{AppConfig, CommandRunner, SystemCommandRunner, ToolSet};

use crate::tools::{MethodTraceCapture, PerfettoCapture, SimpleperfCapture, SystraceCapture};
use crate::transport::AdbTransport;

/// Resolves a bare executable name through PATH. Explicit paths and names that
/// cannot be found are kept as configured so the failure surfaces at spawn time.
fn resolve_program(name: &str) -> String {
    if name.contains(std::path::MAIN_SEPARATOR) || name.contains('/') {
        return name.to_string();
    }
    match which::which(name) {
        Ok(path) => path.display().to_string(),
        Err(e) => {
            tracing::debug!(
                target: "trace_combo.plugins",
                program = name,
                error = %e,
                "not on PATH"
            );
            name.to_string()
        }
    }
}

pub fn build_transport(cfg: &AppConfig) -> Arc<AdbTransport> {
    build_transport_with(cfg, Arc::new(SystemCommandRunner))
}

fn build_transport_with(cfg: &AppConfig, runner: Arc<dyn CommandRunner>) -> Arc<AdbTransport> {
    Arc::new(AdbTransport::with_runner(
        resolve_program(&cfg.adb_path),
        runner,
    ))
}

/// Registers every capture backend against a shared adb transport.
pub fn build_tool_set(cfg: &AppConfig) -> ToolSet {
    build_tool_set_with(cfg, Arc::new(SystemCommandRunner))
}

/// The systrace backend on its own, for category discovery.
pub fn build_systrace(cfg: &AppConfig) -> SystraceCapture {
    build_systrace_with(cfg, Arc::new(SystemCommandRunner))
}

fn build_systrace_with(cfg: &AppConfig, runner: Arc<dyn CommandRunner>) -> SystraceCapture {
    SystraceCapture::new(
        runner,
        resolve_program(&cfg.python),
        cfg.scripts.systrace.clone(),
    )
}

pub(crate) fn build_tool_set_with(cfg: &AppConfig, runner: Arc<dyn CommandRunner>) -> ToolSet {
    let transport = build_transport_with(cfg, runner.clone());
    let python = resolve_program(&cfg.python);
    let simpleperf_dir: PathBuf = cfg.scripts.simpleperf_dir.clone();

    ToolSet::new()
        .with_one_shot(Arc::new(build_systrace_with(cfg, runner.clone())))
        .with_one_shot(Arc::new(PerfettoCapture::new(transport.clone())))
        .with_one_shot(Arc::new(SimpleperfCapture::new(
            runner,
            transport.clone(),
            python,
            simpleperf_dir,
        )))
        .with_start_stop(Arc::new(MethodTraceCapture::new(transport)))
}
