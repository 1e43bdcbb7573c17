use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Serialize;

use trace_combo_core::api::{
    AggregateCaptureError, AppConfig, CaptureRequest, ComboOrchestrator, ComboOutcome,
    OutputSpec, ToolKind,
};
use trace_combo_plugins::factory;

use crate::commands::cli::{ComboArgs, OutputFormat};
use crate::error::CliError;

#[derive(Serialize)]
struct ComboReport<'a> {
    results: &'a BTreeMap<String, PathBuf>,
    failures: Vec<FailureEntry>,
}

#[derive(Serialize)]
struct FailureEntry {
    tool: ToolKind,
    message: String,
}

pub async fn handle_combo(args: ComboArgs, cfg: &AppConfig) -> Result<i32, CliError> {
    let request = build_request(&args, cfg);
    let orchestrator = ComboOrchestrator::new(factory::build_tool_set(cfg));

    let outcome = orchestrator.run_combo(request).await?;
    let code = exit_code(&outcome);
    let lines = text_lines(outcome.results());
    let (results, error) = outcome.into_parts();

    match args.format {
        OutputFormat::Text => {
            for line in &lines {
                println!("{line}");
            }
        }
        OutputFormat::Json => {
            let report = ComboReport {
                results: &results,
                failures: failure_entries(error.as_ref()),
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }
    if let Some(err) = &error {
        eprintln!("{err}");
    }
    Ok(code)
}

fn build_request(args: &ComboArgs, cfg: &AppConfig) -> CaptureRequest {
    let mut output = OutputSpec::new(
        args.output
            .clone()
            .unwrap_or_else(|| cfg.output.dir.clone()),
    );
    output.create_subfolder = args.subfolder || cfg.output.create_subfolder;

    let mut options = cfg.capture.clone();
    if let Some(app) = &args.app {
        options.target_app = Some(app.clone());
    }
    if args.no_report {
        options.sampling_profiler.generate_report = false;
    }

    CaptureRequest::new(&args.device, args.duration, output)
        .enable_all(args.tools.iter().copied())
        .with_options(options)
}

/// `tool: path`, one per artifact, in tool order.
fn text_lines(results: &BTreeMap<ToolKind, PathBuf>) -> Vec<String> {
    results
        .iter()
        .map(|(tool, path)| format!("{tool}: {}", path.display()))
        .collect()
}

fn failure_entries(error: Option<&AggregateCaptureError>) -> Vec<FailureEntry> {
    error
        .map(|e| {
            e.failures()
                .iter()
                .map(|f| FailureEntry {
                    tool: f.tool,
                    message: f.message(),
                })
                .collect()
        })
        .unwrap_or_default()
}

/// 0 when every tool produced an artifact, 1 when none did, 2 for anything between.
fn exit_code(outcome: &ComboOutcome) -> i32 {
    if outcome.is_complete_success() {
        0
    } else if outcome.is_total_failure() {
        1
    } else {
        2
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::cli::{Args, Commands};
    use clap::Parser;
    use pretty_assertions::assert_eq;
    use trace_combo_core::api::{FailureReason, ToolFailure, ValidationError};

    fn parse(argv: &[&str]) -> ComboArgs {
        match Args::try_parse_from(argv).unwrap().command {
            Commands::Combo(c) => c,
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn request_merges_flags_over_config() {
        let mut cfg = AppConfig::default();
        cfg.output.create_subfolder = true;
        cfg.capture.target_app = Some("com.config".into());

        let args = parse(&[
            "trace-combo",
            "combo",
            "-d",
            "D1",
            "-t",
            "5",
            "--tool",
            "sampling-profiler",
            "--app",
            "com.flag",
            "--output",
            "captures",
            "--no-report",
        ]);
        let req = build_request(&args, &cfg);

        assert_eq!(req.device, "D1");
        assert_eq!(req.duration.as_secs(), 5);
        assert_eq!(req.output.root, PathBuf::from("captures"));
        assert!(req.output.create_subfolder);
        assert_eq!(req.options.target(), Some("com.flag"));
        assert!(!req.options.sampling_profiler.generate_report);
        assert_eq!(
            req.enabled.iter().copied().collect::<Vec<_>>(),
            vec![ToolKind::SamplingProfiler]
        );
    }

    #[test]
    fn request_falls_back_to_configured_output() {
        let cfg = AppConfig::default();
        let args = parse(&["trace-combo", "combo", "-d", "D1", "--tool", "system-trace"]);
        let req = build_request(&args, &cfg);
        assert_eq!(req.output.root, cfg.output.dir);
        assert!(!req.output.create_subfolder);
    }

    #[test]
    fn failures_render_in_tool_order() {
        let err = AggregateCaptureError::from_failures(vec![
            ToolFailure::new(ToolKind::MethodTracer, FailureReason::MissingTarget),
            ToolFailure::new(ToolKind::TraceEvents, FailureReason::NotConfigured),
        ]);
        let entries = failure_entries(err.as_ref());
        let tools: Vec<_> = entries.iter().map(|e| e.tool).collect();
        assert_eq!(tools, vec![ToolKind::TraceEvents, ToolKind::MethodTracer]);
        assert_eq!(entries[1].message, "target application required");
        assert!(failure_entries(None).is_empty());
    }

    #[test]
    fn text_output_follows_tool_order() {
        let results: BTreeMap<ToolKind, PathBuf> = [
            (ToolKind::SamplingProfiler, PathBuf::from("/out/sampling-profiler_1.data")),
            (ToolKind::TraceEvents, PathBuf::from("/out/trace-events_1.html")),
        ]
        .into_iter()
        .collect();
        assert_eq!(
            text_lines(&results),
            vec![
                "trace-events: /out/trace-events_1.html".to_string(),
                "sampling-profiler: /out/sampling-profiler_1.data".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn request_without_tools_is_rejected_before_capture() {
        let args = parse(&["trace-combo", "combo", "-d", "D1"]);
        let err = handle_combo(args, &AppConfig::default()).await.unwrap_err();
        assert!(matches!(
            err,
            CliError::Validation(ValidationError::NoToolsEnabled)
        ));
    }
}
