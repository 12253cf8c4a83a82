//! Request and response bodies for the advisor endpoints.
//!
//! Every response type has a `From<Result<_, AdvisorError>>` impl: handlers work
//! with an explicit `Result` and only fold failures into the wire shape here.

use serde::{Deserialize, Serialize};

use crate::errors::AdvisorError;

/// Prefix carried by `feedback` when an analysis fails.
pub const ANALYSIS_ERROR_PREFIX: &str = "Error during analysis: ";

#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisRequest {
    pub resume: String,
    pub job: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    pub context: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub match_score: u8, // 0..=100
    pub skills: Vec<String>,
    pub feedback: String,
}

impl AnalysisResult {
    /// The failure shape: zero score, no skills, error text in `feedback`.
    pub fn failed(err: &AdvisorError) -> Self {
        Self {
            match_score: 0,
            skills: Vec::new(),
            feedback: format!("{ANALYSIS_ERROR_PREFIX}{err}"),
        }
    }
}

impl From<Result<AnalysisResult, AdvisorError>> for AnalysisResult {
    fn from(outcome: Result<AnalysisResult, AdvisorError>) -> Self {
        outcome.unwrap_or_else(|err| AnalysisResult::failed(&err))
    }
}

/// `/analyze/upload` response: the analysis plus the text extracted from the file.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadAnalysisResult {
    #[serde(flatten)]
    pub analysis: AnalysisResult,
    pub resume_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum QuestionsResult {
    Questions { questions: String },
    Error { error: String },
}

impl From<Result<String, AdvisorError>> for QuestionsResult {
    fn from(outcome: Result<String, AdvisorError>) -> Self {
        match outcome {
            Ok(questions) => QuestionsResult::Questions { questions },
            Err(err) => QuestionsResult::Error {
                error: err.to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ChatResult {
    Reply { reply: String },
    Error { error: String },
}

impl From<Result<String, AdvisorError>> for ChatResult {
    fn from(outcome: Result<String, AdvisorError>) -> Self {
        match outcome {
            Ok(reply) => ChatResult::Reply { reply },
            Err(err) => ChatResult::Error {
                error: err.to_string(),
            },
        }
    }
}
