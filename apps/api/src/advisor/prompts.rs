// All LLM prompt constants for the advisor endpoints, plus the builders that
// interpolate caller text into them. Interpolation is verbatim: no escaping,
// truncation, or validation.

use crate::advisor::models::{AnalysisRequest, ChatRequest};
use crate::llm_client::ChatMessage;

/// Sampling temperature for the analysis flow. Other flows use the provider default.
pub const ANALYSIS_TEMPERATURE: f32 = 0.2;

/// System prompt for resume analysis. Enforces JSON-only output.
pub const ANALYSIS_SYSTEM: &str = r#"You are an expert Applicant Tracking System (ATS) and Technical Recruiter.
Your task is to evaluate resumes against job descriptions with high precision.
Return ONLY a valid JSON object with the following structure:
{
    "matchScore": <integer between 0-100>,
    "skills": [<list of strings, extracting only relevant technical and soft skills present in the resume that match the job>],
    "feedback": "<detailed feedback string explaining the score, missing skills, and suggestions for improvement>"
}
Do NOT include any other text or markdown formatting (like ```json)."#;

/// Analysis prompt template. Replace `{job}` and `{resume}` before sending.
pub const ANALYSIS_PROMPT_TEMPLATE: &str = "Job Description:
{job}

Resume Content:
{resume}";

/// Interview question prompt template. Sent as the only message.
/// Replace `{resume}` and `{job}` before sending.
pub const QUESTIONS_PROMPT_TEMPLATE: &str = "Based on the resume content and job description below, \
generate 5 technical interview questions and 5 behavioral interview questions.
Resume: {resume}
Job: {job}";

/// System prompt for the career chat.
pub const CHAT_SYSTEM: &str = "You are a helpful career assistant having a conversation \
about the user's resume. Use the provided context (resume/job) to answer questions.";

/// Chat prompt template. Replace `{context}` and `{message}` before sending.
pub const CHAT_PROMPT_TEMPLATE: &str = "Context:
{context}

User Question: {message}";

/// Fills `template` placeholders in a single pass, so placeholder-like text inside
/// caller input is never expanded a second time.
fn fill(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        let matched = values.iter().find_map(|(key, value)| {
            tail.strip_prefix('{')
                .and_then(|t| t.strip_prefix(*key))
                .and_then(|t| t.strip_prefix('}'))
                .map(|after| (*value, after))
        });
        match matched {
            Some((value, after)) => {
                out.push_str(value);
                rest = after;
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

pub fn analysis_messages(request: &AnalysisRequest) -> Vec<ChatMessage> {
    let prompt = fill(
        ANALYSIS_PROMPT_TEMPLATE,
        &[("job", request.job.as_str()), ("resume", request.resume.as_str())],
    );
    vec![ChatMessage::system(ANALYSIS_SYSTEM), ChatMessage::user(prompt)]
}

pub fn questions_messages(request: &AnalysisRequest) -> Vec<ChatMessage> {
    let prompt = fill(
        QUESTIONS_PROMPT_TEMPLATE,
        &[("resume", request.resume.as_str()), ("job", request.job.as_str())],
    );
    vec![ChatMessage::user(prompt)]
}

pub fn chat_messages(request: &ChatRequest) -> Vec<ChatMessage> {
    let prompt = fill(
        CHAT_PROMPT_TEMPLATE,
        &[
            ("context", request.context.as_str()),
            ("message", request.message.as_str()),
        ],
    );
    vec![ChatMessage::system(CHAT_SYSTEM), ChatMessage::user(prompt)]
}
