use chrono::{DateTime, Local};

/// An open measurement window of a start/stop tool.
///
/// Created by [`StartStopCapture::start`](super::StartStopCapture::start) and consumed by
/// [`StartStopCapture::stop`](super::StartStopCapture::stop). It has no task of its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionHandle {
    pub device: String,
    pub target: String,
    pub created_at: DateTime<Local>,
    /// Where the backend writes the artifact on the device.
    pub remote_path: String,
}

impl SessionHandle {
    pub fn new(device: &str, target: &str, remote_path: impl Into<String>) -> Self {
        Self {
            device: device.to_string(),
            target: target.to_string(),
            created_at: Local::now(),
            remote_path: remote_path.into(),
        }
    }
}
