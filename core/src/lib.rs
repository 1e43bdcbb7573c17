//! Coordinates simultaneous trace capture by several Android profiling backends
//! against one device.
//!
//! The [`combo::ComboOrchestrator`] opens start/stop tools, runs every one-shot tool
//! on its own worker, waits for all of them, closes the start/stop tools and returns
//! the partial result together with an aggregate error.

pub mod api;
pub mod combo;
pub mod config;
pub mod errors;
pub mod exec;
pub mod output;
pub mod tool;
pub mod transport;
