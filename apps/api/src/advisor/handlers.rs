//! Axum route handlers for the advisor API.
//!
//! Once a request body decodes, these always answer 200: gateway and parse
//! failures travel inside the response body.

use axum::{
    extract::{multipart::MultipartRejection, rejection::JsonRejection, Multipart, State},
    Json,
};

use crate::advisor::flows::{analyze_resume, chat_reply, generate_questions};
use crate::advisor::models::{
    AnalysisRequest, AnalysisResult, ChatRequest, ChatResult, QuestionsResult,
    UploadAnalysisResult,
};
use crate::advisor::upload::read_upload;
use crate::errors::AppError;
use crate::state::AppState;

/// POST /analyze
pub async fn handle_analyze(
    State(state): State<AppState>,
    payload: Result<Json<AnalysisRequest>, JsonRejection>,
) -> Result<Json<AnalysisResult>, AppError> {
    let Json(request) = payload?;
    let outcome = analyze_resume(state.gateway.as_ref(), &state.config.model, &request).await;
    Ok(Json(outcome.into()))
}

/// POST /analyze/upload
///
/// Multipart form with a `resume` file (PDF or text) and a `job` field.
/// Echoes the extracted resume text so the client can reuse it for
/// follow-up questions and chat.
pub async fn handle_analyze_upload(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadAnalysisResult>, AppError> {
    let upload = read_upload(multipart?).await?;
    let request = AnalysisRequest {
        resume: upload.resume_text,
        job: upload.job,
    };
    let outcome = analyze_resume(state.gateway.as_ref(), &state.config.model, &request).await;

    Ok(Json(UploadAnalysisResult {
        analysis: outcome.into(),
        resume_text: request.resume,
    }))
}

/// POST /interview-questions
pub async fn handle_interview_questions(
    State(state): State<AppState>,
    payload: Result<Json<AnalysisRequest>, JsonRejection>,
) -> Result<Json<QuestionsResult>, AppError> {
    let Json(request) = payload?;
    let outcome = generate_questions(state.gateway.as_ref(), &state.config.model, &request).await;
    Ok(Json(outcome.into()))
}

/// POST /chat
pub async fn handle_chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResult>, AppError> {
    let Json(request) = payload?;
    let outcome = chat_reply(state.gateway.as_ref(), &state.config.model, &request).await;
    Ok(Json(outcome.into()))
}
