use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;

use trace_combo_core::api::{
    CommandError, CommandOutput, CommandRunner, CommandSpec, DeviceInfo, DeviceTransport,
    SystemCommandRunner,
};

/// [`DeviceTransport`] backed by the `adb` executable.
pub struct AdbTransport {
    adb_path: String,
    runner: Arc<dyn CommandRunner>,
}

impl AdbTransport {
    pub fn new(adb_path: impl Into<String>) -> Self {
        Self::with_runner(adb_path, Arc::new(SystemCommandRunner))
    }

    pub fn with_runner(adb_path: impl Into<String>, runner: Arc<dyn CommandRunner>) -> Self {
        Self {
            adb_path: adb_path.into(),
            runner,
        }
    }

    pub fn adb_path(&self) -> &str {
        &self.adb_path
    }

    fn command(&self) -> CommandSpec {
        CommandSpec::new(&self.adb_path)
    }

    fn on_device(&self, device: &str) -> CommandSpec {
        self.command().args(["-s", device])
    }
}

#[async_trait]
impl DeviceTransport for AdbTransport {
    fn name(&self) -> &str {
        &self.adb_path
    }

    async fn is_available(&self) -> bool {
        matches!(
            self.runner.run(&self.command().arg("--version")).await,
            Ok(out) if out.success()
        )
    }

    async fn list_devices(&self) -> Vec<DeviceInfo> {
        match self
            .runner
            .run_checked(&self.command().args(["devices", "-l"]))
            .await
        {
            Ok(out) => parse_device_list(&out.stdout),
            Err(e) => {
                tracing::warn!(
                    target: "trace_combo.transport",
                    error = %e,
                    "listing devices failed"
                );
                Vec::new()
            }
        }
    }

    async fn shell(&self, device: &str, argv: &[String]) -> Result<CommandOutput, CommandError> {
        let spec = self.on_device(device).arg("shell").args(argv.iter().cloned());
        self.runner.run(&spec).await
    }

    async fn pull(&self, device: &str, remote: &str, local: &Path) -> Result<(), CommandError> {
        let spec = self
            .on_device(device)
            .args(["pull", remote])
            .path_arg(local);
        self.runner.run_checked(&spec).await?;
        Ok(())
    }
}

/// Parses `adb devices -l` output.
///
/// ```text
/// List of devices attached
/// 0123456789ABCDEF       device usb:1-1 product:bullhead model:Nexus_5X device:bullhead transport_id:1
/// ```
pub fn parse_device_list(output: &str) -> Vec<DeviceInfo> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| {
            !line.is_empty() && !line.starts_with("List of devices") && !line.starts_with('*')
        })
        .filter_map(|line| {
            let mut parts = line.split_whitespace();
            let serial = parts.next()?;
            let state = parts.next()?;
            let mut info = DeviceInfo {
                serial: serial.to_string(),
                state: state.to_string(),
                ..DeviceInfo::default()
            };
            for part in parts {
                let Some((key, value)) = part.split_once(':') else {
                    continue;
                };
                let slot = match key {
                    "model" => &mut info.model,
                    "product" => &mut info.product,
                    "device" => &mut info.device,
                    "usb" => &mut info.usb,
                    "transport_id" => &mut info.transport_id,
                    _ => continue,
                };
                *slot = value.to_string();
            }
            Some(info)
        })
        .collect()
}
