use serde::{Deserialize, Serialize};

/// Per-tool configuration for one combo capture.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CaptureOptions {
    /// Application package the app-scoped tools attach to.
    #[serde(default)]
    pub target_app: Option<String>,

    #[serde(default)]
    pub trace_events: TraceEventsOptions,

    #[serde(default)]
    pub system_trace: SystemTraceOptions,

    #[serde(default)]
    pub sampling_profiler: SamplingProfilerOptions,

    #[serde(default)]
    pub method_tracer: MethodTracerOptions,
}

impl CaptureOptions {
    /// Target application, ignoring blank values.
    pub fn target(&self) -> Option<&str> {
        self.target_app
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceEventsOptions {
    #[serde(default = "default_trace_events_categories")]
    pub categories: Vec<String>,

    #[serde(default = "default_trace_events_buffer_kb")]
    pub buffer_kb: u32,
}

fn default_trace_events_categories() -> Vec<String> {
    ["sched", "gfx", "view", "wm", "am"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_trace_events_buffer_kb() -> u32 {
    16_384
}

impl Default for TraceEventsOptions {
    fn default() -> Self {
        Self {
            categories: default_trace_events_categories(),
            buffer_kb: default_trace_events_buffer_kb(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemTraceOptions {
    #[serde(default = "default_system_trace_categories")]
    pub categories: Vec<String>,

    #[serde(default = "default_system_trace_buffer_kb")]
    pub buffer_kb: u32,
}

fn default_system_trace_categories() -> Vec<String> {
    [
        "sched",
        "gfx",
        "view",
        "wm",
        "am",
        "hal",
        "res",
        "dalvik",
        "freq",
        "idle",
        "binder_driver",
        "binder_lock",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_system_trace_buffer_kb() -> u32 {
    32_768
}

impl Default for SystemTraceOptions {
    fn default() -> Self {
        Self {
            categories: default_system_trace_categories(),
            buffer_kb: default_system_trace_buffer_kb(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamplingProfilerOptions {
    /// Samples per second.
    #[serde(default = "default_frequency")]
    pub frequency: u32,

    /// Render an HTML report next to the raw samples.
    #[serde(default = "default_generate_report")]
    pub generate_report: bool,
}

fn default_frequency() -> u32 {
    4_000
}

fn default_generate_report() -> bool {
    true
}

impl Default for SamplingProfilerOptions {
    fn default() -> Self {
        Self {
            frequency: default_frequency(),
            generate_report: default_generate_report(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodTracerOptions {
    /// Sample call stacks instead of instrumenting every method.
    #[serde(default)]
    pub sampling: bool,

    #[serde(default = "default_sampling_interval_us")]
    pub sampling_interval_us: u32,

    /// Pause between `am profile stop` and pulling the file.
    #[serde(default = "default_flush_delay_ms")]
    pub flush_delay_ms: u64,
}

fn default_sampling_interval_us() -> u32 {
    1_000
}

fn default_flush_delay_ms() -> u64 {
    1_000
}

impl Default for MethodTracerOptions {
    fn default() -> Self {
        Self {
            sampling: false,
            sampling_interval_us: default_sampling_interval_us(),
            flush_delay_ms: default_flush_delay_ms(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_target_is_treated_as_absent() {
        let mut opts = CaptureOptions::default();
        assert_eq!(opts.target(), None);

        opts.target_app = Some("   ".into());
        assert_eq!(opts.target(), None);

        opts.target_app = Some(" com.example.app ".into());
        assert_eq!(opts.target(), Some("com.example.app"));
    }

    #[test]
    fn partial_toml_keeps_defaults_for_missing_fields() {
        let opts: CaptureOptions = toml::from_str(
            r#"
            target_app = "com.example"

            [sampling_profiler]
            frequency = 1000
            "#,
        )
        .unwrap();

        assert_eq!(opts.sampling_profiler.frequency, 1000);
        assert!(opts.sampling_profiler.generate_report);
        assert_eq!(opts.system_trace.buffer_kb, 32_768);
        assert_eq!(opts.trace_events.categories.len(), 5);
    }
}
