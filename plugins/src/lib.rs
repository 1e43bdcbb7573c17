//! Android capture backends and the adb transport they share.
pub mod factory;
pub mod tools;
pub mod transport;

#[cfg(test)]
mod testing;
