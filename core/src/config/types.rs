use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::tool::CaptureOptions;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// adb executable, a bare name is resolved through PATH.
    #[serde(default = "default_adb_path")]
    pub adb_path: String,

    /// Interpreter for the systrace and simpleperf helper scripts.
    #[serde(default = "default_python")]
    pub python: String,

    #[serde(default)]
    pub scripts: ScriptsConfig,

    #[serde(default)]
    pub output: OutputConfig,

    /// Defaults for every capture, overridable per run.
    #[serde(default)]
    pub capture: CaptureOptions,

    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_adb_path() -> String {
    "adb".to_string()
}

fn default_python() -> String {
    if cfg!(windows) {
        "python".to_string()
    } else {
        "python3".to_string()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            adb_path: default_adb_path(),
            python: default_python(),
            scripts: ScriptsConfig::default(),
            output: OutputConfig::default(),
            capture: CaptureOptions::default(),
            logging: LoggingConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptsConfig {
    /// `run_systrace.py` from the platform-tools systrace package.
    #[serde(default = "default_systrace_script")]
    pub systrace: PathBuf,

    /// Directory holding `app_profiler.py` and `report_html.py`.
    #[serde(default = "default_simpleperf_dir")]
    pub simpleperf_dir: PathBuf,
}

fn default_systrace_script() -> PathBuf {
    PathBuf::from("external/systrace/systrace/systrace/run_systrace.py")
}

fn default_simpleperf_dir() -> PathBuf {
    PathBuf::from("external/simpleperf")
}

impl Default for ScriptsConfig {
    fn default() -> Self {
        Self {
            systrace: default_systrace_script(),
            simpleperf_dir: default_simpleperf_dir(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,

    #[serde(default)]
    pub create_subfolder: bool,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("output")
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            create_subfolder: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter used when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Also append logs to this file.
    #[serde(default)]
    pub file: Option<PathBuf>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}
