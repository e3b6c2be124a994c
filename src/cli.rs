//! Command-line interface built on clap.
//!
//! Two positionals (`<FILE_PATH> <DOC_TYPE>`) plus flags that override
//! values from `docgrade.toml`. Flags go before `<DOC_TYPE>`; anything after
//! it is accepted and ignored.

use std::path::PathBuf;

use clap::Parser;

use crate::config::GraderConfig;
use crate::grader::GradeRequest;

/// Grades a document against a fixed rubric using an external LLM CLI.
#[derive(Debug, Parser)]
#[command(name = "docgrade", version, about)]
pub struct Cli {
    /// Document to grade.
    pub file_path: PathBuf,

    /// Kind of document, e.g. "design doc" or "RFC".
    #[arg(allow_hyphen_values = true)]
    pub doc_type: String,

    /// Configuration file (defaults to ./docgrade.toml when present).
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Evaluator program to run instead of the configured one.
    #[arg(long, value_name = "CMD")]
    pub evaluator: Option<String>,

    /// Seconds to wait for the evaluator.
    #[arg(long, value_name = "SECS")]
    pub timeout_secs: Option<u64>,

    /// Maximum number of document characters sent to the evaluator.
    #[arg(long, value_name = "N")]
    pub max_chars: Option<usize>,

    /// Debug logging on stderr.
    #[arg(long, short, default_value_t = false)]
    pub verbose: bool,

    /// No spinner or summary on stderr.
    #[arg(long, short, default_value_t = false)]
    pub quiet: bool,

    // Extra positionals after the document type are ignored.
    #[arg(hide = true, trailing_var_arg = true, allow_hyphen_values = true)]
    _extra: Vec<String>,
}

impl Cli {
    pub fn request(&self) -> GradeRequest {
        GradeRequest::new(&self.file_path, &self.doc_type)
    }

    /// CLI flags take precedence over file and environment values.
    pub fn apply_overrides(&self, config: &mut GraderConfig) {
        if let Some(command) = &self.evaluator {
            config.evaluator.command = command.clone();
        }
        if let Some(secs) = self.timeout_secs {
            config.evaluator.timeout_secs = secs;
        }
        if let Some(max) = self.max_chars {
            config.max_content_chars = max;
        }
    }
}
