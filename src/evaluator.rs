//! External evaluator invocation.
//!
//! The [`Evaluator`] trait is the seam between the grader and whatever
//! produces model text. [`CommandEvaluator`] runs a command-line tool such as
//! `claude -p <prompt>` and captures its stdout.

use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tokio::time::timeout;

use crate::config::EvaluatorConfig;
use crate::error::EvaluatorError;

/// Produces model text for a rendered rubric prompt.
pub trait Evaluator {
    fn evaluate(
        &self,
        prompt: &str,
    ) -> impl Future<Output = Result<String, EvaluatorError>> + Send;
}

/// Runs an external program with the prompt as its final argument.
#[derive(Debug, Clone)]
pub struct CommandEvaluator {
    command: String,
    args: Vec<String>,
    limit: Duration,
}

impl CommandEvaluator {
    pub fn new(command: impl Into<String>, args: Vec<String>, limit: Duration) -> Self {
        Self {
            command: command.into(),
            args,
            limit,
        }
    }

    pub fn from_config(config: &EvaluatorConfig) -> Self {
        Self::new(
            config.command.clone(),
            config.args.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }
}

impl Evaluator for CommandEvaluator {
    async fn evaluate(&self, prompt: &str) -> Result<String, EvaluatorError> {
        let mut cmd = Command::new(&self.command);
        cmd.args(&self.args)
            .arg(prompt)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        tracing::debug!(
            command = %self.command,
            prompt_chars = prompt.chars().count(),
            timeout_secs = self.limit.as_secs_f64(),
            "launching evaluator"
        );

        let child = cmd.spawn().map_err(|source| EvaluatorError::Spawn {
            command: self.command.clone(),
            source,
        })?;

        // Dropping the wait future on timeout drops the child, which kills it.
        let output = match timeout(self.limit, child.wait_with_output()).await {
            Ok(result) => result?,
            Err(_) => {
                tracing::warn!(command = %self.command, "evaluator timed out");
                return Err(EvaluatorError::Timeout {
                    command: self.command.clone(),
                    limit: self.limit,
                });
            }
        };

        // A failing exit status is not fatal: the model text on stdout is
        // still graded.
        let stderr = String::from_utf8_lossy(&output.stderr);
        if !output.status.success() {
            tracing::warn!(
                command = %self.command,
                status = %output.status,
                stderr = %stderr.trim(),
                "evaluator exited unsuccessfully"
            );
        } else if !stderr.is_empty() {
            tracing::debug!(stderr = %stderr.trim(), "evaluator wrote to stderr");
        }

        Ok(String::from_utf8(output.stdout)?)
    }
}
