use std::path::{Path, PathBuf};

use anyhow::Context;

use super::types::AppConfig;

pub const DEFAULT_CONFIG_FILE: &str = "trace-combo.toml";

/// Reads `trace-combo.toml` from the working directory if present, else defaults.
pub fn load_default() -> anyhow::Result<AppConfig> {
    let cfg = if Path::new(DEFAULT_CONFIG_FILE).exists() {
        read_file(Path::new(DEFAULT_CONFIG_FILE))?
    } else {
        AppConfig::default()
    };
    Ok(finish(cfg))
}

pub fn load_from(path: &Path) -> anyhow::Result<AppConfig> {
    Ok(finish(read_file(path)?))
}

fn read_file(path: &Path) -> anyhow::Result<AppConfig> {
    let s = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let cfg = toml::from_str::<AppConfig>(&s)
        .with_context(|| format!("parsing config {}", path.display()))?;
    Ok(cfg)
}

fn finish(mut cfg: AppConfig) -> AppConfig {
    apply_env_overrides(&mut cfg, |key| std::env::var(key).ok());
    cfg.output.dir = expand_path(&cfg.output.dir);
    cfg.scripts.systrace = expand_path(&cfg.scripts.systrace);
    cfg.scripts.simpleperf_dir = expand_path(&cfg.scripts.simpleperf_dir);
    cfg
}

fn apply_env_overrides(cfg: &mut AppConfig, lookup: impl Fn(&str) -> Option<String>) {
    let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(v) = non_blank("TRACE_COMBO_ADB") {
        cfg.adb_path = v;
    }
    if let Some(v) = non_blank("TRACE_COMBO_PYTHON") {
        cfg.python = v;
    }
    if let Some(v) = non_blank("TRACE_COMBO_OUTPUT_DIR") {
        cfg.output.dir = PathBuf::from(v);
    }
}

fn expand_path(path: &Path) -> PathBuf {
    match path.to_str() {
        Some(s) => PathBuf::from(shellexpand::tilde(s).into_owned()),
        None => path.to_path_buf(),
    }
}
