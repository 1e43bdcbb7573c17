pub mod adb;

pub use adb::{parse_device_list, AdbTransport};
