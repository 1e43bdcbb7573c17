//! Stable re-exports for consumers (`cli`, `plugins`, and external crates).
//!
//! Prefer importing from `trace_combo_core::api` instead of reaching into internal modules.

pub use crate::combo::{CaptureRequest, ComboOrchestrator, ComboOutcome, OutputSpec};
pub use crate::config::{AppConfig, LoggingConfig, OutputConfig, ScriptsConfig};
pub use crate::errors::{
    AggregateCaptureError, CommandError, FailureReason, ToolFailure, ValidationError,
};
pub use crate::exec::{CommandOutput, CommandRunner, CommandSpec, SystemCommandRunner};
pub use crate::output::{CaptureTimestamp, OutputAllocator};
pub use crate::tool::{
    CaptureOptions, OneShotCapture, SessionHandle, StartStopCapture, ToolAdapter, ToolKind,
    ToolSet,
};
pub use crate::transport::{DeviceInfo, DeviceTransport};
