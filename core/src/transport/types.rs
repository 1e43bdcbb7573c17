use std::fmt;

use serde::{Deserialize, Serialize};

/// One entry of the device listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceInfo {
    pub serial: String,
    /// e.g. `device`, `offline`, `unauthorized`
    pub state: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub product: String,
    #[serde(default)]
    pub device: String,
    #[serde(default)]
    pub usb: String,
    #[serde(default)]
    pub transport_id: String,
}

impl DeviceInfo {
    pub fn is_ready(&self) -> bool {
        self.state == "device"
    }
}

impl fmt::Display for DeviceInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.model.is_empty() {
            f.write_str(&self.serial)
        } else {
            write!(f, "{} ({})", self.model, self.serial)
        }
    }
}
