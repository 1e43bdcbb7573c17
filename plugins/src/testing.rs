//! Scripted [`CommandRunner`] for adapter tests.
use std::sync::Mutex;

use async_trait::async_trait;

use trace_combo_core::api::{CommandError, CommandOutput, CommandRunner, CommandSpec};

enum Rule {
    Fail {
        needle: String,
        code: i32,
        stderr: String,
    },
    Respond {
        needle: String,
        stdout: String,
    },
    Missing {
        program: String,
    },
}

#[derive(Default)]
pub struct RecordingRunner {
    rules: Vec<Rule>,
    seen: Mutex<Vec<CommandSpec>>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands whose rendered line contains `needle` exit with `code`.
    pub fn fail_when(mut self, needle: &str, code: i32, stderr: &str) -> Self {
        self.rules.push(Rule::Fail {
            needle: needle.to_string(),
            code,
            stderr: stderr.to_string(),
        });
        self
    }

    pub fn respond(mut self, needle: &str, stdout: &str) -> Self {
        self.rules.push(Rule::Respond {
            needle: needle.to_string(),
            stdout: stdout.to_string(),
        });
        self
    }

    pub fn missing(mut self, program: &str) -> Self {
        self.rules.push(Rule::Missing {
            program: program.to_string(),
        });
        self
    }

    pub fn commands(&self) -> Vec<String> {
        self.specs().iter().map(ToString::to_string).collect()
    }

    pub fn specs(&self) -> Vec<CommandSpec> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl CommandRunner for RecordingRunner {
    async fn run(&self, spec: &CommandSpec) -> Result<CommandOutput, CommandError> {
        self.seen.lock().unwrap().push(spec.clone());
        let line = spec.to_string();

        for rule in &self.rules {
            match rule {
                Rule::Missing { program } if *program == spec.program => {
                    return Err(CommandError::NotFound {
                        program: program.clone(),
                    })
                }
                Rule::Fail {
                    needle,
                    code,
                    stderr,
                } if line.contains(needle.as_str()) => {
                    return Ok(CommandOutput {
                        stdout: String::new(),
                        stderr: stderr.clone(),
                        exit_code: *code,
                    })
                }
                Rule::Respond { needle, stdout } if line.contains(needle.as_str()) => {
                    return Ok(CommandOutput {
                        stdout: stdout.clone(),
                        ..CommandOutput::default()
                    })
                }
                _ => {}
            }
        }
        Ok(CommandOutput::default())
    }
}
