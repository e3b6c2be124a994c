//! Document grading: read, render, evaluate, extract, parse.
//!
//! [`Grader::grade`] never fails. Every failure is folded into a
//! [`GradeResult::Failed`] with a zero score so the caller always has a JSON
//! payload to print.

use std::path::PathBuf;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::GradeError;
use crate::evaluator::Evaluator;
use crate::extract::extract_json_object;
use crate::rubric;

/// One document to grade.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradeRequest {
    pub file_path: PathBuf,
    /// Free-form label substituted into the prompt ("design doc", "RFC", ...).
    pub doc_type: String,
}

impl GradeRequest {
    pub fn new(file_path: impl Into<PathBuf>, doc_type: impl Into<String>) -> Self {
        Self {
            file_path: file_path.into(),
            doc_type: doc_type.into(),
        }
    }
}

/// Outcome of a grading run, serialized as-is to stdout.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum GradeResult {
    /// The evaluator's JSON object, verbatim and in its original key order.
    Graded(Map<String, Value>),
    /// A zero-score record describing what went wrong.
    Failed {
        score: u8,
        reasoning: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        raw: Option<String>,
    },
}

impl From<GradeError> for GradeResult {
    fn from(err: GradeError) -> Self {
        let reasoning = err.to_string();
        let raw = match err {
            GradeError::MalformedOutput { raw } => Some(raw),
            GradeError::FileNotFound | GradeError::System(_) => None,
        };
        GradeResult::Failed {
            score: 0,
            reasoning,
            raw,
        }
    }
}

impl GradeResult {
    /// Zero-score record for a failure outside the grading pipeline.
    pub fn system_error(err: impl std::fmt::Display) -> Self {
        GradeResult::Failed {
            score: 0,
            reasoning: format!("System Error: {err:#}"),
            raw: None,
        }
    }

    /// Integer score, if the evaluator supplied one.
    pub fn score(&self) -> Option<i64> {
        match self {
            GradeResult::Graded(obj) => obj.get("score").and_then(Value::as_i64),
            GradeResult::Failed { score, .. } => Some(i64::from(*score)),
        }
    }

    pub fn reasoning(&self) -> Option<&str> {
        match self {
            GradeResult::Graded(obj) => obj.get("reasoning").and_then(Value::as_str),
            GradeResult::Failed { reasoning, .. } => Some(reasoning),
        }
    }

    /// Gaps listed by the evaluator; empty for failures.
    pub fn gaps(&self) -> Vec<&str> {
        match self {
            GradeResult::Graded(obj) => obj
                .get("gaps")
                .and_then(Value::as_array)
                .map(|gaps| gaps.iter().filter_map(Value::as_str).collect())
                .unwrap_or_default(),
            GradeResult::Failed { .. } => Vec::new(),
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, GradeResult::Failed { .. })
    }

    pub fn band(&self) -> Option<Band> {
        self.score().map(Band::from_score)
    }
}

/// Rubric band a score falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Band {
    /// 90-100
    Perfect,
    /// 80-89
    Good,
    /// Below 80
    Fail,
}

impl Band {
    pub fn from_score(score: i64) -> Self {
        match score {
            90.. => Band::Perfect,
            80..=89 => Band::Good,
            _ => Band::Fail,
        }
    }
}

impl std::fmt::Display for Band {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Band::Perfect => write!(f, "perfect"),
            Band::Good => write!(f, "good"),
            Band::Fail => write!(f, "fail"),
        }
    }
}

/// Grades documents through an [`Evaluator`].
pub struct Grader<E> {
    evaluator: E,
    max_content_chars: usize,
}

impl<E: Evaluator> Grader<E> {
    #[cfg(test)]
    pub fn new(evaluator: E) -> Self {
        Self::with_max_content_chars(evaluator, rubric::DEFAULT_MAX_CONTENT_CHARS)
    }

    pub fn with_max_content_chars(evaluator: E, max_content_chars: usize) -> Self {
        Self {
            evaluator,
            max_content_chars,
        }
    }

    /// Grades one document. Failures come back as [`GradeResult::Failed`].
    pub async fn grade(&self, request: &GradeRequest) -> GradeResult {
        match self.try_grade(request).await {
            Ok(obj) => GradeResult::Graded(obj),
            Err(err) => {
                tracing::debug!(error = %err, "grading failed");
                err.into()
            }
        }
    }

    async fn try_grade(&self, request: &GradeRequest) -> Result<Map<String, Value>, GradeError> {
        let content = tokio::fs::read_to_string(&request.file_path)
            .await
            .map_err(|err| {
                tracing::debug!(
                    path = %request.file_path.display(),
                    error = %err,
                    "could not read document"
                );
                GradeError::FileNotFound
            })?;

        let prompt = rubric::render(&request.doc_type, &content, self.max_content_chars);
        tracing::info!(
            path = %request.file_path.display(),
            doc_type = %request.doc_type,
            content_chars = content.chars().count(),
            "grading document"
        );

        let output = self.evaluator.evaluate(&prompt).await?;

        let Some(json) = extract_json_object(&output) else {
            return Err(GradeError::MalformedOutput { raw: output });
        };

        Ok(serde_json::from_str::<Map<String, Value>>(json)?)
    }
}
