pub mod categories;
pub mod cli;
pub mod combo;
pub mod devices;

use std::path::Path;

use trace_combo_core::api::AppConfig;
use trace_combo_core::config;

use crate::error::CliError;

pub fn load_config(path: Option<&Path>) -> Result<AppConfig, CliError> {
    match path {
        Some(p) => config::load_from(p),
        None => config::load_default(),
    }
    .map_err(CliError::Config)
}
