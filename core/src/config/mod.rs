mod load;
mod types;

pub use load::{load_default, load_from, DEFAULT_CONFIG_FILE};
pub use types::{AppConfig, LoggingConfig, OutputConfig, ScriptsConfig};
