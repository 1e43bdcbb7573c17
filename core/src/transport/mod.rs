mod r#trait;
mod types;

pub use r#trait::DeviceTransport;
pub use types::DeviceInfo;
