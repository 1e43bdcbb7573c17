use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use super::{CaptureOptions, SessionHandle, ToolKind};
use crate::errors::ToolFailure;

/// A backend whose whole lifecycle is one blocking call.
#[async_trait]
pub trait OneShotCapture: Send + Sync {
    fn kind(&self) -> ToolKind;

    /// Whether this capture writes several artifacts and wants its own subfolder.
    fn nests_output(&self, _options: &CaptureOptions) -> bool {
        false
    }

    /// Starts the device-side capture, waits `duration`, retrieves the artifact to
    /// `output` and cleans up the device copy. Cleanup failures never fail the capture.
    ///
    /// Returns the path of the primary artifact.
    async fn run(
        &self,
        device: &str,
        output: &Path,
        duration: Duration,
        options: &CaptureOptions,
    ) -> Result<PathBuf, ToolFailure>;
}

/// A backend whose measurement window spans two separate calls.
#[async_trait]
pub trait StartStopCapture: Send + Sync {
    fn kind(&self) -> ToolKind;

    /// Opens the measurement window. Call at most once per session.
    async fn start(
        &self,
        device: &str,
        target: &str,
        options: &CaptureOptions,
    ) -> Result<SessionHandle, ToolFailure>;

    /// Closes the window, retrieves the artifact to `output`, best-effort remote cleanup.
    async fn stop(
        &self,
        session: SessionHandle,
        output: &Path,
        options: &CaptureOptions,
    ) -> Result<PathBuf, ToolFailure>;
}

/// The two lifecycle shapes a registered backend can have.
#[derive(Clone)]
pub enum ToolAdapter {
    OneShot(Arc<dyn OneShotCapture>),
    StartStop(Arc<dyn StartStopCapture>),
}

impl ToolAdapter {
    pub fn kind(&self) -> ToolKind {
        match self {
            ToolAdapter::OneShot(t) => t.kind(),
            ToolAdapter::StartStop(t) => t.kind(),
        }
    }
}

impl std::fmt::Debug for ToolAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ToolAdapter::OneShot(t) => write!(f, "OneShot({})", t.kind()),
            ToolAdapter::StartStop(t) => write!(f, "StartStop({})", t.kind()),
        }
    }
}
