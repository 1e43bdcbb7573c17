use std::fmt;

use chrono::{DateTime, Local};

const LABEL_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Wall-clock instant a combo capture started, rendered with second granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureTimestamp(DateTime<Local>);

impl CaptureTimestamp {
    pub fn now() -> Self {
        Self(Local::now())
    }

    pub fn from_datetime(at: DateTime<Local>) -> Self {
        Self(at)
    }

    pub fn datetime(&self) -> DateTime<Local> {
        self.0
    }

    pub fn label(&self) -> String {
        self.0.format(LABEL_FORMAT).to_string()
    }
}

impl fmt::Display for CaptureTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(LABEL_FORMAT))
    }
}
