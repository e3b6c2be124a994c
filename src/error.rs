use std::time::Duration;

use thiserror::Error;

/// Every way a single grading run can fail. All of them are recovered into a
/// [`GradeResult`](crate::grader::GradeResult) with a zero score.
#[derive(Debug, Error)]
pub enum GradeError {
    #[error("File not found.")]
    FileNotFound,

    #[error("Model failed to return JSON.")]
    MalformedOutput { raw: String },

    #[error("System Error: {0}")]
    System(#[from] SystemError),
}

/// Catch-all failures after the document was read.
#[derive(Debug, Error)]
pub enum SystemError {
    #[error(transparent)]
    Evaluator(#[from] EvaluatorError),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl From<EvaluatorError> for GradeError {
    fn from(err: EvaluatorError) -> Self {
        GradeError::System(err.into())
    }
}

impl From<serde_json::Error> for GradeError {
    fn from(err: serde_json::Error) -> Self {
        GradeError::System(err.into())
    }
}

#[derive(Debug, Error)]
pub enum EvaluatorError {
    #[error("failed to launch evaluator `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("evaluator `{command}` timed out after {}s", .limit.as_secs_f64())]
    Timeout { command: String, limit: Duration },

    #[error("evaluator I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("evaluator output is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
}
