mod kind;
mod options;
mod registry;
mod session;
mod r#trait;

pub use kind::{CaptureShape, ToolKind};
pub use options::{
    CaptureOptions, MethodTracerOptions, SamplingProfilerOptions, SystemTraceOptions,
    TraceEventsOptions,
};
pub use r#trait::{OneShotCapture, StartStopCapture, ToolAdapter};
pub use registry::ToolSet;
pub use session::SessionHandle;
