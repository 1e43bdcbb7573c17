mod aggregate;
mod orchestrator;
mod task;
mod types;
mod validate;

pub use aggregate::ResultCollector;
pub use orchestrator::ComboOrchestrator;
pub use types::{CaptureRequest, ComboOutcome, OutputSpec, TaskStatus};
pub use validate::validate_request;
