// core/src/errors/command_error.rs
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("executable not found: {program}")]
    NotFound { program: String },

    #[error("failed to spawn process: {program}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} exited with code {code}: {}", diagnostic(.stdout, .stderr))]
    NonZeroExit {
        program: String,
        code: i32,
        stdout: String,
        stderr: String,
    },
}

impl CommandError {
    /// Captured (stdout, stderr) when the process got far enough to produce any.
    pub fn output(&self) -> Option<(&str, &str)> {
        match self {
            CommandError::NonZeroExit { stdout, stderr, .. } => Some((stdout, stderr)),
            _ => None,
        }
    }
}

// stderr is what the backends write diagnostics to; fall back to stdout when it is empty.
fn diagnostic<'a>(stdout: &'a str, stderr: &'a str) -> &'a str {
    let err = stderr.trim();
    if err.is_empty() {
        stdout.trim()
    } else {
        err
    }
}
