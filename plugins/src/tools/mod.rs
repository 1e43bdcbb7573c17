mod perfetto;
mod simpleperf;
mod systrace;
mod traceview;

use std::path::Path;

use trace_combo_core::api::{FailureReason, ToolFailure, ToolKind};

pub use perfetto::PerfettoCapture;
pub use simpleperf::SimpleperfCapture;
pub use systrace::{list_ftrace_events, parse_category_list, SystraceCapture};
pub use traceview::MethodTraceCapture;

const DEVICE_TMP: &str = "/data/local/tmp";

/// Device-side scratch path. Two combos on the same device may pick the same name.
fn remote_tmp(name: &str) -> String {
    format!("{DEVICE_TMP}/{name}")
}

async fn require_script(tool: ToolKind, script: &Path) -> Result<(), ToolFailure> {
    match tokio::fs::try_exists(script).await {
        Ok(true) => Ok(()),
        Ok(false) => Err(ToolFailure::new(
            tool,
            FailureReason::MissingScript(script.to_path_buf()),
        )),
        Err(e) => Err(ToolFailure::new(tool, e)),
    }
}
