use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};

use trace_combo_core::api::ToolKind;

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser, Debug, Clone)]
#[command(name = "trace-combo", version, about)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file. Defaults to ./trace-combo.toml when it exists.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Capture one time window with several tools at once.
    Combo(ComboArgs),
    /// List devices visible to adb.
    Devices(DevicesArgs),
    /// List trace categories (or kernel trace events) a device supports.
    Categories(CategoriesArgs),
}

#[derive(ClapArgs, Debug, Clone)]
pub struct ComboArgs {
    /// Device serial as shown by `adb devices`.
    #[arg(long, short = 'd')]
    pub device: String,

    /// Capture length in seconds.
    #[arg(long, short = 't', default_value_t = 10)]
    pub duration: u64,

    /// Tool to enable: trace-events, system-trace, sampling-profiler, method-tracer.
    /// Repeat the flag or separate with commas.
    #[arg(long = "tool", value_delimiter = ',', value_parser = parse_tool_kind)]
    pub tools: Vec<ToolKind>,

    /// Application package. Required by method-tracer.
    #[arg(long, short = 'a')]
    pub app: Option<String>,

    /// Output directory, overrides the configured one.
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Put every artifact in its own folder.
    #[arg(long, default_value_t = false)]
    pub subfolder: bool,

    /// Skip the simpleperf HTML report and keep the raw samples.
    #[arg(long, default_value_t = false)]
    pub no_report: bool,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct DevicesArgs {
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct CategoriesArgs {
    #[arg(long, short = 'd')]
    pub device: String,

    /// List kernel ftrace events instead of atrace categories.
    #[arg(long, default_value_t = false)]
    pub ftrace: bool,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

fn parse_tool_kind(s: &str) -> Result<ToolKind, String> {
    s.parse::<ToolKind>().map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn combo(argv: &[&str]) -> ComboArgs {
        let args = Args::try_parse_from(argv).unwrap();
        match args.command {
            Commands::Combo(c) => c,
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn repeated_and_comma_separated_tools() {
        let args = combo(&[
            "trace-combo",
            "combo",
            "--device",
            "D1",
            "--tool",
            "trace-events,system-trace",
            "--tool",
            "method-tracer",
            "--app",
            "com.example",
        ]);
        assert_eq!(
            args.tools,
            vec![
                ToolKind::TraceEvents,
                ToolKind::SystemTrace,
                ToolKind::MethodTracer
            ]
        );
        assert_eq!(args.duration, 10);
        assert_eq!(args.app.as_deref(), Some("com.example"));
        assert!(!args.subfolder);
    }

    #[test]
    fn unknown_tool_is_a_parse_error() {
        let err = Args::try_parse_from(["trace-combo", "combo", "-d", "D1", "--tool", "gpu"])
            .unwrap_err();
        assert!(err.to_string().contains("gpu"));
    }

    #[test]
    fn categories_takes_a_device_and_ftrace_switch() {
        let args = Args::try_parse_from(["trace-combo", "categories", "-d", "D1", "--ftrace"])
            .unwrap();
        match args.command {
            Commands::Categories(c) => {
                assert_eq!(c.device, "D1");
                assert!(c.ftrace);
                assert_eq!(c.format, OutputFormat::Text);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn config_flag_is_global() {
        let args =
            Args::try_parse_from(["trace-combo", "devices", "--config", "alt.toml"]).unwrap();
        assert_eq!(args.config, Some(PathBuf::from("alt.toml")));
    }
}
