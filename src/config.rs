//! Configuration loaded from `docgrade.toml`.
//!
//! [`GraderConfig`] holds every tunable. Fields missing from the file use
//! sensible defaults, and a missing default file is not an error.
//! `DOCGRADE_EVALUATOR` and `DOCGRADE_TIMEOUT_SECS` take precedence over the
//! file; CLI flags are applied on top by the caller.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use crate::rubric::DEFAULT_MAX_CONTENT_CHARS;

/// File read when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "docgrade.toml";

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct GraderConfig {
    /// How many characters of the document are embedded in the prompt.
    #[serde(default = "default_max_content_chars")]
    pub max_content_chars: usize,

    #[serde(default)]
    pub evaluator: EvaluatorConfig,
}

/// How the external evaluator is launched.
#[derive(Debug, Clone, Deserialize)]
pub struct EvaluatorConfig {
    /// Program to run.
    #[serde(default = "default_command")]
    pub command: String,

    /// Arguments placed before the prompt.
    #[serde(default = "default_args")]
    pub args: Vec<String>,

    /// Seconds to wait before the evaluator is killed.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_max_content_chars() -> usize {
    DEFAULT_MAX_CONTENT_CHARS
}

fn default_command() -> String {
    "claude".to_string()
}

fn default_args() -> Vec<String> {
    vec!["-p".to_string()]
}

fn default_timeout_secs() -> u64 {
    60
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            command: default_command(),
            args: default_args(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for GraderConfig {
    fn default() -> Self {
        Self {
            max_content_chars: default_max_content_chars(),
            evaluator: EvaluatorConfig::default(),
        }
    }
}

impl GraderConfig {
    /// Loads `docgrade.toml` from the current directory, or an explicit file.
    ///
    /// An explicit path must exist; the default file is optional.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut config = match explicit {
            Some(path) => Self::from_file(path)?,
            None => {
                let path = Path::new(DEFAULT_CONFIG_FILE);
                if path.exists() {
                    Self::from_file(path)?
                } else {
                    Self::default()
                }
            }
        };

        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config = toml::from_str::<GraderConfig>(&contents)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Environment variables take precedence over the configuration file.
    fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(command) = var("DOCGRADE_EVALUATOR")
            && !command.is_empty()
        {
            self.evaluator.command = command;
        }

        if let Some(secs) = var("DOCGRADE_TIMEOUT_SECS")
            && !secs.is_empty()
        {
            self.evaluator.timeout_secs = secs
                .trim()
                .parse()
                .with_context(|| format!("invalid DOCGRADE_TIMEOUT_SECS: {secs:?}"))?;
        }

        Ok(())
    }
}
