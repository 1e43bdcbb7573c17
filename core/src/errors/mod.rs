pub mod capture_error;
pub mod command_error;
pub mod validation_error;

pub use capture_error::{AggregateCaptureError, FailureReason, ToolFailure};
pub use command_error::CommandError;
pub use validation_error::ValidationError;
