//! Response sanitizer: turns a free-form model reply into an `AnalysisResult`.

use std::borrow::Cow;

use serde::Deserialize;

use crate::advisor::models::AnalysisResult;
use crate::errors::AdvisorError;

const FENCE: &str = "```";
const JSON_FENCE: &str = "```json";

/// The record the model is asked to return. Extra keys are ignored.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAnalysis {
    match_score: i64,
    skills: Vec<String>,
    feedback: String,
}

/// Trims the reply and, if it opens with a code fence, removes every
/// "```json" and "```" marker anywhere in the text.
pub fn strip_code_fences(text: &str) -> Cow<'_, str> {
    let text = text.trim();
    if !text.starts_with(FENCE) {
        return Cow::Borrowed(text);
    }
    let stripped = text.replace(JSON_FENCE, "").replace(FENCE, "");
    Cow::Owned(stripped.trim().to_string())
}

/// Parses a model reply into an `AnalysisResult`.
pub fn parse_analysis(text: &str) -> Result<AnalysisResult, AdvisorError> {
    let cleaned = strip_code_fences(text);
    let raw: RawAnalysis = serde_json::from_str(&cleaned)?;

    let match_score = u8::try_from(raw.match_score)
        .ok()
        .filter(|score| *score <= 100)
        .ok_or(AdvisorError::ScoreOutOfRange(raw.match_score))?;

    Ok(AnalysisResult {
        match_score,
        skills: raw.skills,
        feedback: raw.feedback,
    })
}
