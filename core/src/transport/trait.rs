use std::path::Path;

use async_trait::async_trait;

use super::DeviceInfo;
use crate::errors::CommandError;
use crate::exec::CommandOutput;

/// Access to a connected device. Used internally by every adapter.
#[async_trait]
pub trait DeviceTransport: Send + Sync {
    fn name(&self) -> &str;

    /// Whether the transport's host tooling can be invoked at all.
    async fn is_available(&self) -> bool;

    /// Connected devices; an unreachable transport yields an empty list.
    async fn list_devices(&self) -> Vec<DeviceInfo>;

    /// Runs `argv` in a device shell. A non-zero exit is returned, not raised.
    async fn shell(&self, device: &str, argv: &[String]) -> Result<CommandOutput, CommandError>;

    async fn pull(&self, device: &str, remote: &str, local: &Path) -> Result<(), CommandError>;

    /// Like [`shell`](Self::shell) but fails on non-zero exit.
    async fn shell_checked(
        &self,
        device: &str,
        argv: &[String],
    ) -> Result<CommandOutput, CommandError> {
        self.shell(device, argv).await?.check(self.name())
    }

    /// Best-effort removal of a device-side file. Failures are logged and swallowed.
    async fn remove(&self, device: &str, remote: &str) {
        let argv = vec!["rm".to_string(), "-f".to_string(), remote.to_string()];
        match self.shell(device, &argv).await {
            Ok(out) if out.success() => {}
            Ok(out) => tracing::warn!(
                target: "trace_combo.transport",
                device,
                remote,
                exit_code = out.exit_code,
                "remote cleanup failed"
            ),
            Err(e) => tracing::warn!(
                target: "trace_combo.transport",
                device,
                remote,
                error = %e,
                "remote cleanup failed"
            ),
        }
    }
}
