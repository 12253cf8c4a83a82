//! The three advisor flows: build prompt → call gateway → sanitize.
//!
//! Each returns an explicit `Result`; the handlers fold failures into the
//! endpoint's response shape.

use tracing::warn;

use crate::advisor::models::{AnalysisRequest, AnalysisResult, ChatRequest};
use crate::advisor::prompts::{
    analysis_messages, chat_messages, questions_messages, ANALYSIS_TEMPERATURE,
};
use crate::advisor::sanitizer::parse_analysis;
use crate::errors::AdvisorError;
use crate::llm_client::CompletionGateway;

/// Scores a resume against a job description.
pub async fn analyze_resume(
    gateway: &dyn CompletionGateway,
    model: &str,
    request: &AnalysisRequest,
) -> Result<AnalysisResult, AdvisorError> {
    let messages = analysis_messages(request);
    let outcome = match gateway
        .complete(&messages, model, Some(ANALYSIS_TEMPERATURE))
        .await
    {
        Ok(reply) => parse_analysis(&reply),
        Err(e) => Err(e.into()),
    };

    if let Err(e) = &outcome {
        warn!("Resume analysis failed: {e}");
    }
    outcome
}

/// Generates interview questions. The reply is returned verbatim.
pub async fn generate_questions(
    gateway: &dyn CompletionGateway,
    model: &str,
    request: &AnalysisRequest,
) -> Result<String, AdvisorError> {
    let messages = questions_messages(request);
    gateway
        .complete(&messages, model, None)
        .await
        .map_err(|e| {
            warn!("Interview question generation failed: {e}");
            AdvisorError::from(e)
        })
}

/// Answers one career-chat message. The reply is returned verbatim.
pub async fn chat_reply(
    gateway: &dyn CompletionGateway,
    model: &str,
    request: &ChatRequest,
) -> Result<String, AdvisorError> {
    let messages = chat_messages(request);
    gateway
        .complete(&messages, model, None)
        .await
        .map_err(|e| {
            warn!("Career chat failed: {e}");
            AdvisorError::from(e)
        })
}
